use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::rules::zone_status::DEFAULT_LOOKBACK_MINUTES;
use crate::domain::value_objects::{ResponseTimePolicy, Severity, SeverityMap};

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    #[serde(default)]
    pub zones: ZonesConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// Operator identity and sample-data behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Recorded as responder on acknowledge/resolve
    #[serde(default = "default_operator")]
    pub operator: String,
    #[serde(default = "default_true")]
    pub show_sample_data: bool,
    #[serde(default = "default_true")]
    pub seed_sample_data: bool,
    /// RFC 3339 instant. When set, the session clock is frozen there.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_time: Option<DateTime<Utc>>,
}

/// External classification/summarization agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// "http" or "offline"
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_classification_agent")]
    pub classification_agent_id: String,
    #[serde(default = "default_summary_agent")]
    pub summary_agent_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Absent means no local deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleConfig {
    #[serde(default)]
    pub response_time: ResponseTimePolicy,
    #[serde(default = "default_resolve_notes")]
    pub resolve_default_notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonesConfig {
    /// How long a resolved alert keeps its zone "recent"
    #[serde(default = "default_lookback")]
    pub lookback_minutes: u32,
    #[serde(default = "default_true")]
    pub unique_names: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_range_label")]
    pub range_label: String,
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Reject a second classification or report while one is running
    #[serde(default = "default_true")]
    pub single_flight: bool,
}

/// Per-severity notification channel and sound settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_channel")]
    pub default_channel: String,
    #[serde(default = "default_channels")]
    pub channels: SeverityMap<String>,
    #[serde(default = "default_sound")]
    pub sound: SeverityMap<bool>,
}

impl NotificationConfig {
    /// Channel used when a classification request names none.
    #[must_use]
    pub fn request_channel(&self) -> &str {
        let critical = self.channels.get(Severity::Critical);
        if critical.trim().is_empty() {
            &self.default_channel
        } else {
            critical
        }
    }

    #[must_use]
    pub fn rings_for(&self, severity: Severity) -> bool {
        *self.sound.get(severity)
    }
}

// --- Defaults ---

const fn default_true() -> bool {
    true
}

fn default_operator() -> String {
    "Current User".into()
}

fn default_provider() -> String {
    "offline".into()
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".into()
}

fn default_classification_agent() -> String {
    "distress-classifier".into()
}

fn default_summary_agent() -> String {
    "alert-summarizer".into()
}

fn default_resolve_notes() -> String {
    "Resolved".into()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn default_lookback() -> u32 {
    DEFAULT_LOOKBACK_MINUTES as u32
}

fn default_range_label() -> String {
    "Last 7 days".into()
}

fn default_export_path() -> PathBuf {
    PathBuf::from("alert-report.json")
}

fn default_channels() -> SeverityMap<String> {
    SeverityMap {
        critical: "#emergency-alerts".into(),
        high: "#facility-alerts".into(),
        medium: "#facility-alerts".into(),
        low: "#monitoring-log".into(),
    }
}

const fn default_sound() -> SeverityMap<bool> {
    SeverityMap {
        critical: true,
        high: true,
        medium: false,
        low: false,
    }
}

fn default_channel() -> String {
    "#facility-alerts".into()
}

// --- Default impls ---

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            operator: default_operator(),
            show_sample_data: default_true(),
            seed_sample_data: default_true(),
            reference_time: None,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            classification_agent_id: default_classification_agent(),
            summary_agent_id: default_summary_agent(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            response_time: ResponseTimePolicy::default(),
            resolve_default_notes: default_resolve_notes(),
        }
    }
}

impl Default for ZonesConfig {
    fn default() -> Self {
        Self {
            lookback_minutes: default_lookback(),
            unique_names: default_true(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            range_label: default_range_label(),
            export_path: default_export_path(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            single_flight: default_true(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_channel: default_channel(),
            channels: default_channels(),
            sound: default_sound(),
        }
    }
}

// --- AppConfig methods ---

impl AppConfig {
    /// Load config from default path or create default config file
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined,
    /// the file cannot be read, or the TOML content is invalid.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_or_create(&path)
    }

    /// Load from a specific path, or create a default config file if missing
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config.sanitized())
    }

    /// Save config to a specific path, creating parent directories if needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("wardwatch").join("config.toml"))
    }

    /// Repairs values a hand-edited file can get wrong.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if self.general.operator.trim().is_empty() {
            self.general.operator = default_operator();
        }
        if self.lifecycle.resolve_default_notes.trim().is_empty() {
            self.lifecycle.resolve_default_notes = default_resolve_notes();
        }
        if self.report.range_label.trim().is_empty() {
            self.report.range_label = default_range_label();
        }
        if self.notifications.default_channel.trim().is_empty() {
            self.notifications.default_channel = default_channel();
        }
        self
    }
}
