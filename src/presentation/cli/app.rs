use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// wardwatch: distress-sound alert monitoring
///
/// Classifies sound events through an external agent, tracks the resulting
/// alerts through their lifecycle and summarizes them into reports.
#[derive(Parser, Debug)]
#[command(name = "wardwatch")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute (defaults to an interactive session)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open an interactive monitoring session
    #[command(alias = "s")]
    Session,

    /// Classify one sound event and print the resulting alert
    #[command(alias = "c")]
    Classify {
        #[command(flatten)]
        event: ClassifyArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

// A sound event as typed by the operator, shared with the session shell.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ClassifyArgs {
    /// Detected sound type (Scream, Glass Break, Aggression, Medical Distress, ...)
    pub sound_type: String,

    /// Zone where the sound was picked up
    #[arg(short, long)]
    pub zone: String,

    /// Detector confidence in [0, 1]
    #[arg(long, default_value_t = 0.85, value_parser = parse_unit_interval)]
    pub confidence: f64,

    /// Notification channel override
    #[arg(long)]
    pub channel: Option<String>,
}

/// Accepts a float in [0, 1].
pub fn parse_unit_interval(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is outside [0, 1]"))
    }
}
