use std::io::Write;

use anyhow::{Context, Result};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::application::services::Session;
use crate::presentation::cli::formatters::status_fmt::format_stats;
use crate::presentation::cli::shell::{Flow, run_line};

fn print_banner(session: &Session) -> Result<()> {
    println!("{}", "━".repeat(40).cyan());
    println!("{}", "  WARDWATCH · distress alert monitor".bold().cyan());
    println!("{}", "━".repeat(40).cyan());
    println!("Signed in as {}", session.operator().bold());
    println!("{}", format_stats(&session.stats()?));
    println!("{}", "Type `help` for commands, `quit` to leave.".dimmed());
    Ok(())
}

fn prompt() -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{} ", "wardwatch>".cyan().bold())?;
    stdout.flush().context("Failed to flush stdout")
}

/// Interactive loop over stdin until `quit` or end of input.
pub async fn run_session(session: &Session) -> Result<()> {
    print_banner(session)?;
    info!(operator = session.operator(), "session started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read from stdin")?
        else {
            println!();
            break;
        };
        let mut stdout = std::io::stdout();
        if run_line(session, &line, &mut stdout).await == Flow::Quit {
            break;
        }
    }

    info!("session ended");
    Ok(())
}
