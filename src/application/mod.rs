pub mod config;
pub mod sample_data;
pub mod services;
