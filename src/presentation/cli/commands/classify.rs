use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::application::services::{Classified, ClassifyRequest, Session};
use crate::presentation::cli::app::ClassifyArgs;
use crate::presentation::cli::formatters::alert_fmt::format_alert;

const BELL: &str = "\x07";

impl From<ClassifyArgs> for ClassifyRequest {
    fn from(args: ClassifyArgs) -> Self {
        Self {
            sound_type: args.sound_type,
            zone: args.zone,
            confidence_score: args.confidence,
            channel: args.channel,
        }
    }
}

/// Text shown after a successful classification. The bell is only added to
/// human-readable output.
pub fn render_classified(classified: &Classified, now: DateTime<Utc>, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(&classified.alert)
            .context("Failed to serialize alert");
    }
    let mut text = format!(
        "{}\n{}",
        "New alert stored".green().bold(),
        format_alert(&classified.alert, now)
    );
    if classified.ring {
        text.push_str(BELL);
    }
    Ok(text)
}

pub async fn run_classify(session: &Session, args: ClassifyArgs, json: bool) -> Result<()> {
    let classified = session
        .classify(args.into())
        .await
        .context("Classification failed")?;
    let text = render_classified(&classified, session.now(), json)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}").context("Failed to write to stdout")?;
    Ok(())
}
