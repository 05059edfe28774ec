use std::io::Write;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use thiserror::Error;
use tracing::{debug, warn};

use super::app::{ClassifyArgs, parse_unit_interval};
use super::commands::classify::render_classified;
use super::formatters::alert_fmt::{format_alert, format_alert_feed};
use super::formatters::report_fmt::format_report;
use super::formatters::status_fmt::{format_notification_settings, format_stats, section_header};
use super::formatters::table_fmt::{
    format_history_table, format_zone_registry, format_zone_status_table,
};
use crate::application::services::Session;
use crate::domain::entities::event::KNOWN_DISTRESS_TYPES;
use crate::domain::rules::history::{HistoryCriteria, WILDCARD, selector};
use crate::domain::value_objects::Severity;

/// One line typed at the session prompt.
#[derive(Parser, Debug)]
#[command(name = "wardwatch", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands available inside a session
#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// List visible alerts, open and most severe first
    #[command(alias = "a")]
    Alerts {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the status of every active zone
    #[command(alias = "z")]
    Zones,

    /// Show the dashboard counters
    Stats,

    /// Classify a sound event and store the resulting alert
    #[command(alias = "c")]
    Classify(ClassifyArgs),

    /// Acknowledge an alert
    #[command(alias = "acknowledge")]
    Ack { id: String },

    /// Resolve an alert, with optional notes
    Resolve {
        id: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        notes: Vec<String>,
    },

    /// Filter and list alert history
    #[command(alias = "h")]
    History(HistoryArgs),

    /// Summarize the filtered history into a report
    #[command(alias = "r")]
    Report,

    /// Write the current report as JSON
    Export { path: Option<PathBuf> },

    /// Manage monitored zones
    Zone {
        #[command(subcommand)]
        action: ZoneAction,
    },

    /// Show or hide the sample alerts
    Samples { state: Switch },

    /// Show or change notification settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },

    /// Leave the session
    #[command(aliases = ["exit", "q"])]
    Quit,
}

#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct HistoryArgs {
    /// Zone name, or "all"
    #[arg(long)]
    pub zone: Option<String>,

    /// Distress type, or "all"
    #[arg(long = "type")]
    pub distress_type: Option<String>,

    /// Severity, or "all"
    #[arg(long, value_parser = parse_severity_selector)]
    pub severity: Option<SeveritySelector>,

    /// Free-text search over type, zone, responder and notes
    #[arg(long)]
    pub search: Option<String>,

    /// Clear every filter first
    #[arg(long)]
    pub reset: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ZoneAction {
    /// List every zone, inactive ones included
    List,
    /// Add a zone
    Add {
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, value_parser = parse_unit_interval)]
        sensitivity: Option<f64>,
    },
    /// Remove a zone by id or name
    Remove { zone: String },
    /// Activate or deactivate a zone
    Toggle { zone: String },
    /// Set a zone's detection sensitivity
    Sensitivity {
        zone: String,
        #[arg(value_parser = parse_unit_interval)]
        value: f64,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    /// Restore the configured defaults
    Reset,
    /// Set the notification channel for a severity
    Channel {
        #[arg(value_parser = parse_severity)]
        severity: Severity,
        channel: String,
    },
    /// Turn the bell on or off for a severity
    Sound {
        #[arg(value_parser = parse_severity)]
        severity: Severity,
        state: Switch,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeveritySelector {
    All,
    Only(Severity),
}

/// Case-insensitive severity label.
pub fn parse_severity(raw: &str) -> Result<Severity, String> {
    let raw = raw.trim();
    Severity::ALL
        .into_iter()
        .find(|s| s.as_str().eq_ignore_ascii_case(raw))
        .ok_or_else(|| format!("unknown severity '{raw}' (expected critical, high, medium or low)"))
}

fn parse_severity_selector(raw: &str) -> Result<SeveritySelector, String> {
    if raw.trim().eq_ignore_ascii_case(WILDCARD) {
        Ok(SeveritySelector::All)
    } else {
        parse_severity(raw).map(SeveritySelector::Only)
    }
}

impl HistoryArgs {
    /// Applies the given flags on top of `current`; flags left out keep their value.
    #[must_use]
    pub fn apply(&self, current: HistoryCriteria) -> HistoryCriteria {
        let mut criteria = if self.reset {
            HistoryCriteria::default()
        } else {
            current
        };
        if let Some(zone) = &self.zone {
            criteria.zone = selector(Some(zone));
        }
        if let Some(distress_type) = &self.distress_type {
            criteria.distress_type = selector(Some(distress_type));
        }
        match self.severity {
            Some(SeveritySelector::All) => criteria.severity = None,
            Some(SeveritySelector::Only(severity)) => criteria.severity = Some(severity),
            None => {}
        }
        if let Some(search) = &self.search {
            criteria.search = search.trim().to_string();
        }
        criteria
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unterminated {0} quote")]
pub struct TokenizeError(char);

/// Splits a prompt line into words. Single and double quotes group words;
/// a backslash outside single quotes escapes the next character.
pub fn split_line(line: &str) -> Result<Vec<String>, TokenizeError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('\''), c) => current.push(c),
            (_, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_word = true;
            }
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if let Some(q) = quote {
        return Err(TokenizeError(q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Whether the session loop keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs `view` and prints its text. A panic while building the view is
/// reported as an error so that the session survives it.
fn render<F>(out: &mut dyn Write, view: F) -> Result<()>
where
    F: FnOnce() -> Result<String>,
{
    let text = catch_unwind(AssertUnwindSafe(view))
        .map_err(|_| anyhow!("this view failed to display; run the command again"))??;
    writeln!(out, "{text}")?;
    Ok(())
}

/// Parses and executes one prompt line. Never fails: every error is written
/// to `out` and the session goes on.
pub async fn run_line(session: &Session, line: &str, out: &mut dyn Write) -> Flow {
    let words = match split_line(line) {
        Ok(words) if words.is_empty() => return Flow::Continue,
        Ok(words) => words,
        Err(e) => {
            report_error(out, &anyhow!(e));
            return Flow::Continue;
        }
    };

    let parsed = match ShellLine::try_parse_from(&words) {
        Ok(parsed) => parsed,
        Err(e) => {
            // Help requests arrive here too; both kinds are just printed.
            if let Err(e) = writeln!(out, "{}", e.render().to_string().trim_end()) {
                warn!(error = %e, "cannot write to output");
            }
            return Flow::Continue;
        }
    };

    debug!(command = ?parsed.command, "shell command");
    match execute(session, parsed.command, out).await {
        Ok(flow) => flow,
        Err(e) => {
            report_error(out, &e);
            Flow::Continue
        }
    }
}

fn report_error(out: &mut dyn Write, error: &anyhow::Error) {
    if let Err(e) = writeln!(out, "{} {error:#}", "error:".red().bold()) {
        warn!(error = %e, "cannot write to output");
    }
}

/// Executes one parsed command against the session.
pub async fn execute(session: &Session, command: ShellCommand, out: &mut dyn Write) -> Result<Flow> {
    match command {
        ShellCommand::Alerts { json } => render(out, || {
            let alerts = session.sorted_alerts()?;
            if json {
                return Ok(serde_json::to_string_pretty(&alerts)?);
            }
            Ok(format!(
                "{}\n{}\n\n{}",
                section_header("Alerts"),
                format_stats(&session.stats()?),
                format_alert_feed(&alerts, session.now())
            ))
        })?,
        ShellCommand::Zones => render(out, || {
            let statuses = session.zone_statuses()?;
            let hidden = session.zones()?.len().saturating_sub(statuses.len());
            let mut text = format!(
                "{}\n{}",
                section_header("Zones"),
                format_zone_status_table(&statuses)
            );
            if hidden > 0 {
                text.push_str(&format!(
                    "\n{}",
                    format!("{hidden} inactive zone(s) hidden; see `zone list`").dimmed()
                ));
            }
            Ok(text)
        })?,
        ShellCommand::Stats => render(out, || Ok(format_stats(&session.stats()?)))?,
        ShellCommand::Classify(args) => {
            let classified = session.classify(args.into()).await?;
            render(out, || render_classified(&classified, session.now(), false))?;
        }
        ShellCommand::Ack { id } => {
            let alert = session.acknowledge(&id)?;
            render(out, || {
                Ok(format!(
                    "{}\n{}",
                    "Alert acknowledged".green().bold(),
                    format_alert(&alert, session.now())
                ))
            })?;
        }
        ShellCommand::Resolve { id, notes } => {
            let alert = session.resolve(&id, &notes.join(" "))?;
            render(out, || {
                Ok(format!(
                    "{}\n{}",
                    "Alert resolved".green().bold(),
                    format_alert(&alert, session.now())
                ))
            })?;
        }
        ShellCommand::History(args) => {
            let criteria = args.apply(session.history_criteria()?);
            session.set_history_criteria(criteria.clone())?;
            render(out, || {
                let history = session.filtered_history()?;
                Ok(format!(
                    "{}\n{}\n{}\n{}",
                    section_header("History"),
                    describe_criteria(&criteria).dimmed(),
                    format_history_table(&history),
                    format!("{} alert(s)", history.len()).dimmed()
                ))
            })?;
        }
        ShellCommand::Report => {
            let count = session.filtered_history()?.len();
            writeln!(out, "{}", format!("Summarizing {count} alert(s)...").dimmed())?;
            let report = session.generate_report().await?;
            render(out, || Ok(format_report(&report, session.range_label())))?;
        }
        ShellCommand::Export { path } => {
            let written = session.export_report(path.as_deref())?;
            writeln!(out, "Report exported to {}", written.display())?;
        }
        ShellCommand::Zone { action } => zone_action(session, action, out)?,
        ShellCommand::Samples { state } => {
            session.set_show_sample_data(state.is_on());
            let label = if state.is_on() { "shown" } else { "hidden" };
            writeln!(out, "Sample data {label}.")?;
        }
        ShellCommand::Settings { action } => {
            match action {
                None => {}
                Some(SettingsAction::Reset) => {
                    session.reset_notification_settings()?;
                    writeln!(out, "{}", "Settings reset to defaults.".green())?;
                }
                Some(SettingsAction::Channel { severity, channel }) => {
                    session.set_notification_channel(severity, &channel)?;
                    writeln!(out, "{}", "Settings saved.".green())?;
                }
                Some(SettingsAction::Sound { severity, state }) => {
                    session.set_notification_sound(severity, state.is_on())?;
                    writeln!(out, "{}", "Settings saved.".green())?;
                }
            }
            render(out, || {
                let settings = session.notification_settings()?;
                let samples = if session.shows_sample_data() { "shown" } else { "hidden" };
                Ok(format!(
                    "{}\n\n{} {samples}",
                    format_notification_settings(&settings),
                    "Sample data:".bold()
                ))
            })?;
        }
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn zone_action(session: &Session, action: ZoneAction, out: &mut dyn Write) -> Result<()> {
    match action {
        ZoneAction::List => {
            render(out, || Ok(format_zone_registry(&session.zones()?)))?;
        }
        ZoneAction::Add {
            name,
            description,
            sensitivity,
        } => {
            let zone = session.add_zone(&name, &description, sensitivity)?;
            writeln!(out, "Zone '{}' added ({})", zone.name, zone.id)?;
        }
        ZoneAction::Remove { zone } => {
            let removed = session.remove_zone(&zone)?;
            writeln!(out, "Zone '{}' removed", removed.name)?;
        }
        ZoneAction::Toggle { zone } => {
            let zone = session.toggle_zone(&zone)?;
            let state = if zone.active { "active" } else { "inactive" };
            writeln!(out, "Zone '{}' is now {state}", zone.name)?;
        }
        ZoneAction::Sensitivity { zone, value } => {
            let zone = session.set_zone_sensitivity(&zone, value)?;
            writeln!(out, "Zone '{}' sensitivity set to {:.2}", zone.name, zone.sensitivity)?;
        }
    }
    Ok(())
}

fn describe_criteria(criteria: &HistoryCriteria) -> String {
    let or_all = |v: Option<&str>| v.unwrap_or(WILDCARD).to_string();
    let mut text = format!(
        "zone={} type={} severity={}",
        or_all(criteria.zone.as_deref()),
        or_all(criteria.distress_type.as_deref()),
        or_all(criteria.severity.as_ref().map(Severity::as_str)),
    );
    if !criteria.search.is_empty() {
        text.push_str(&format!(" search=\"{}\"", criteria.search));
    }
    if criteria.distress_type.is_none() {
        text.push_str(&format!("\nknown types: {}", KNOWN_DISTRESS_TYPES.join(", ")));
    }
    text
}
