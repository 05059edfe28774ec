use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use super::in_flight::{ActionKind, InFlight};
use crate::application::config::{AppConfig, NotificationConfig};
use crate::application::sample_data::{sample_alerts, sample_zones};
use crate::domain::entities::zone::DEFAULT_SENSITIVITY;
use crate::domain::entities::{Alert, Report, SoundEvent, Zone};
use crate::domain::ports::{AgentTransport, Clock};
use crate::domain::rules::{
    DashboardStats, HistoryCriteria, ZoneStatusResolver, display_order, filter_history,
};
use crate::domain::value_objects::{Severity, ZoneStatus};
use crate::infrastructure::ai::{
    ClassificationError, ClassificationGateway, ReportError, ReportGateway,
};
use crate::infrastructure::persistence::{AlertStore, LifecycleSettings, StoreError, ZoneRegistry};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("a {0} request is already in progress")]
    Busy(ActionKind),
    #[error("no report to export; generate one first")]
    NoReport,
    #[error("failed to export report: {0}")]
    Export(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Classification(#[from] ClassificationError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// A classification request as entered by the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyRequest {
    pub sound_type: String,
    pub zone: String,
    pub confidence_score: f64,
    /// Falls back to the channel configured for Critical
    pub channel: Option<String>,
}

/// A freshly classified and stored alert.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub alert: Alert,
    /// Sound is enabled for the alert's severity
    pub ring: bool,
}

/// One in-memory monitoring session.
///
/// Owns the alert store, the zone registry, the current report and the
/// in-flight markers, and orchestrates every user action over them.
pub struct Session {
    alerts: AlertStore,
    zones: ZoneRegistry,
    classifier: ClassificationGateway,
    reporter: ReportGateway,
    clock: Arc<dyn Clock>,
    resolver: ZoneStatusResolver,
    operator: String,
    range_label: String,
    export_path: PathBuf,
    default_notifications: NotificationConfig,
    notifications: Mutex<NotificationConfig>,
    history: Mutex<HistoryCriteria>,
    report: Mutex<Option<Report>>,
    show_samples: AtomicBool,
    in_flight: InFlight,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, SessionError> {
    mutex.lock().map_err(|_| SessionError::Store(StoreError::LockPoisoned))
}

impl Session {
    /// Builds a session from configuration, seeding the demonstration data when enabled.
    pub fn from_config(
        config: &AppConfig,
        transport: Arc<dyn AgentTransport>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, SessionError> {
        let session = Self {
            alerts: AlertStore::new(LifecycleSettings {
                response_time: config.lifecycle.response_time,
                default_notes: config.lifecycle.resolve_default_notes.clone(),
            }),
            zones: ZoneRegistry::new(config.zones.unique_names),
            classifier: ClassificationGateway::new(
                Arc::clone(&transport),
                config.agent.classification_agent_id.clone(),
            ),
            reporter: ReportGateway::new(transport, config.agent.summary_agent_id.clone()),
            clock,
            resolver: ZoneStatusResolver::with_lookback_minutes(config.zones.lookback_minutes),
            operator: config.general.operator.clone(),
            range_label: config.report.range_label.clone(),
            export_path: config.report.export_path.clone(),
            default_notifications: config.notifications.clone(),
            notifications: Mutex::new(config.notifications.clone()),
            history: Mutex::new(HistoryCriteria::default()),
            report: Mutex::new(None),
            show_samples: AtomicBool::new(config.general.show_sample_data),
            in_flight: InFlight::new(config.session.single_flight),
        };
        if config.general.seed_sample_data {
            session.seed_samples()?;
        }
        Ok(session)
    }

    fn seed_samples(&self) -> Result<(), SessionError> {
        let now = self.clock.now();
        // Oldest first so that head insertion leaves the newest on top.
        for alert in sample_alerts(now).into_iter().rev() {
            self.alerts.append(alert)?;
        }
        for zone in sample_zones() {
            self.zones.insert(zone)?;
        }
        info!("sample data seeded");
        Ok(())
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    #[must_use]
    pub fn operator(&self) -> &str {
        &self.operator
    }

    // --- Alerts ---

    /// The working set every derived view is computed from.
    pub fn visible_alerts(&self) -> Result<Vec<Alert>, SessionError> {
        let show_samples = self.shows_sample_data();
        Ok(self.alerts.with_alerts(|alerts| {
            alerts
                .iter()
                .filter(|a| show_samples || !a.is_sample())
                .cloned()
                .collect()
        })?)
    }

    pub fn alert(&self, id: &str) -> Result<Option<Alert>, SessionError> {
        Ok(self.alerts.get(id)?)
    }

    /// Visible alerts in dashboard order.
    pub fn sorted_alerts(&self) -> Result<Vec<Alert>, SessionError> {
        let visible = self.visible_alerts()?;
        Ok(display_order(&visible).into_iter().cloned().collect())
    }

    /// Sends the event to the classifier and stores the resulting alert.
    /// On any failure nothing is stored.
    pub async fn classify(&self, request: ClassifyRequest) -> Result<Classified, SessionError> {
        let _guard = self
            .in_flight
            .begin(ActionKind::Classification)
            .ok_or(SessionError::Busy(ActionKind::Classification))?;

        let channel = match request.channel.filter(|c| !c.trim().is_empty()) {
            Some(channel) => channel,
            None => lock(&self.notifications)?.request_channel().to_string(),
        };
        let event = SoundEvent {
            sound_type: request.sound_type,
            confidence_score: request.confidence_score.clamp(0.0, 1.0),
            zone: request.zone,
            timestamp: self.clock.now(),
            notification_channel: channel,
        };

        let alert = self.classifier.classify(&event).await.inspect_err(|e| {
            warn!(error = %e, "classification failed");
        })?;
        self.alerts.append(alert.clone())?;
        let ring = lock(&self.notifications)?.rings_for(alert.severity);
        Ok(Classified { alert, ring })
    }

    pub fn acknowledge(&self, id: &str) -> Result<Alert, SessionError> {
        Ok(self.alerts.acknowledge(id, &self.operator)?)
    }

    pub fn resolve(&self, id: &str, notes: &str) -> Result<Alert, SessionError> {
        Ok(self
            .alerts
            .resolve(id, notes, &self.operator, self.clock.now())?)
    }

    pub fn stats(&self) -> Result<DashboardStats, SessionError> {
        let visible = self.visible_alerts()?;
        let zones = self.zones.list_all()?;
        Ok(DashboardStats::compute(&visible, &zones))
    }

    // --- Zones ---

    pub fn zones(&self) -> Result<Vec<Zone>, SessionError> {
        Ok(self.zones.list_all()?)
    }

    /// Status of every active zone, in registry order.
    pub fn zone_statuses(&self) -> Result<Vec<(Zone, ZoneStatus)>, SessionError> {
        let visible = self.visible_alerts()?;
        let now = self.clock.now();
        Ok(self
            .zones
            .active_zones()?
            .into_iter()
            .map(|zone| {
                let status = self.resolver.resolve(&zone, &visible, now);
                (zone, status)
            })
            .collect())
    }

    pub fn add_zone(
        &self,
        name: &str,
        description: &str,
        sensitivity: Option<f64>,
    ) -> Result<Zone, SessionError> {
        Ok(self
            .zones
            .add(name, description, sensitivity.unwrap_or(DEFAULT_SENSITIVITY))?)
    }

    /// `key` is a zone id or an exact zone name.
    pub fn remove_zone(&self, key: &str) -> Result<Zone, SessionError> {
        let id = self.zone_id(key)?;
        Ok(self.zones.remove(&id)?)
    }

    pub fn toggle_zone(&self, key: &str) -> Result<Zone, SessionError> {
        let id = self.zone_id(key)?;
        Ok(self.zones.toggle_active(&id)?)
    }

    pub fn set_zone_sensitivity(&self, key: &str, value: f64) -> Result<Zone, SessionError> {
        let id = self.zone_id(key)?;
        Ok(self.zones.update_sensitivity(&id, value)?)
    }

    fn zone_id(&self, key: &str) -> Result<String, SessionError> {
        self.zones
            .find(key)?
            .map(|z| z.id)
            .ok_or_else(|| SessionError::Store(StoreError::NotFound(key.to_string())))
    }

    // --- History ---

    pub fn history_criteria(&self) -> Result<HistoryCriteria, SessionError> {
        Ok(lock(&self.history)?.clone())
    }

    pub fn set_history_criteria(&self, criteria: HistoryCriteria) -> Result<(), SessionError> {
        *lock(&self.history)? = criteria;
        Ok(())
    }

    /// Visible alerts matching the current history criteria, store order.
    pub fn filtered_history(&self) -> Result<Vec<Alert>, SessionError> {
        let criteria = self.history_criteria()?;
        let visible = self.visible_alerts()?;
        Ok(filter_history(&visible, &criteria).into_iter().cloned().collect())
    }

    // --- Reports ---

    /// Summarizes the filtered history. The previous report is discarded
    /// as soon as generation starts, and is not restored on failure.
    pub async fn generate_report(&self) -> Result<Report, SessionError> {
        let _guard = self
            .in_flight
            .begin(ActionKind::Report)
            .ok_or(SessionError::Busy(ActionKind::Report))?;
        *lock(&self.report)? = None;

        let batch = self.filtered_history()?;
        let refs: Vec<&Alert> = batch.iter().collect();
        let report = self
            .reporter
            .summarize(&refs, &self.range_label)
            .await
            .inspect_err(|e| warn!(error = %e, "report generation failed"))?;

        *lock(&self.report)? = Some(report.clone());
        Ok(report)
    }

    pub fn current_report(&self) -> Result<Option<Report>, SessionError> {
        Ok(lock(&self.report)?.clone())
    }

    /// Writes the current report as pretty JSON. Returns the path written.
    pub fn export_report(&self, path: Option<&Path>) -> Result<PathBuf, SessionError> {
        let report = self.current_report()?.ok_or(SessionError::NoReport)?;
        let path = path.map_or_else(|| self.export_path.clone(), Path::to_path_buf);
        let json = report
            .to_pretty_json()
            .map_err(|e| SessionError::Export(e.to_string()))?;
        std::fs::write(&path, json)
            .map_err(|e| SessionError::Export(format!("{}: {e}", path.display())))?;
        info!(path = %path.display(), "report exported");
        Ok(path)
    }

    #[must_use]
    pub fn range_label(&self) -> &str {
        &self.range_label
    }

    // --- Settings ---

    #[must_use]
    pub fn shows_sample_data(&self) -> bool {
        self.show_samples.load(Ordering::Relaxed)
    }

    pub fn set_show_sample_data(&self, show: bool) {
        self.show_samples.store(show, Ordering::Relaxed);
        info!(show, "sample data visibility changed");
    }

    pub fn notification_settings(&self) -> Result<NotificationConfig, SessionError> {
        Ok(lock(&self.notifications)?.clone())
    }

    pub fn set_notification_channel(
        &self,
        severity: Severity,
        channel: &str,
    ) -> Result<(), SessionError> {
        *lock(&self.notifications)?.channels.get_mut(severity) = channel.trim().to_string();
        Ok(())
    }

    pub fn set_notification_sound(&self, severity: Severity, on: bool) -> Result<(), SessionError> {
        *lock(&self.notifications)?.sound.get_mut(severity) = on;
        Ok(())
    }

    pub fn reset_notification_settings(&self) -> Result<(), SessionError> {
        *lock(&self.notifications)? = self.default_notifications.clone();
        info!("notification settings reset");
        Ok(())
    }

    #[must_use]
    pub fn is_in_flight(&self, kind: ActionKind) -> bool {
        self.in_flight.is_running(kind)
    }
}
