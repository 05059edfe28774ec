pub mod classify;
pub mod session;
