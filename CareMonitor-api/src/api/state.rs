use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::FromRef;

use care_monitor_data::database::DatabasePool;
use care_monitor_data::mail::{MailConfig, SmtpMailTransport};
use care_monitor_data::repository::HealthRecordRepository;
use care_monitor_data::speech::{CommandSpeechSynthesizer, SpeechConfig};
use care_monitor_domain::health::{HealthService, HealthServiceTrait};
use care_monitor_domain::services::{
    FallAlertService, FallAlertServiceTrait, HealthDataService, HealthDataServiceTrait,
    MailConfigSource, ReminderService, ReminderServiceTrait,
};

/// Service types for dependency injection
pub type HealthDataServiceHandle = Arc<dyn HealthDataServiceTrait + Send + Sync>;
pub type FallAlertServiceHandle = Arc<dyn FallAlertServiceTrait + Send + Sync>;
pub type ReminderServiceHandle = Arc<dyn ReminderServiceTrait + Send + Sync>;
pub type HealthServiceHandle = Arc<dyn HealthServiceTrait + Send + Sync>;

/// Directory the static pages are read from
#[derive(Debug, Clone)]
pub struct TemplateDir(pub PathBuf);

/// Everything the handlers need, split per handler with `FromRef`
#[derive(Clone, FromRef)]
pub struct AppState {
    pub health_data: HealthDataServiceHandle,
    pub fall_alert: FallAlertServiceHandle,
    pub reminder: ReminderServiceHandle,
    pub health: HealthServiceHandle,
    pub templates: TemplateDir,
}

impl AppState {
    /// Wire the production adapters: SQLite store, SMTP relay and the
    /// command-line speech engine.
    pub fn new(pool: DatabasePool, speech: SpeechConfig, templates_dir: PathBuf) -> Self {
        let repository = HealthRecordRepository::new(pool);
        let mail_config: MailConfigSource = Arc::new(MailConfig::from_env);

        Self {
            health_data: Arc::new(HealthDataService::new(repository.clone())),
            fall_alert: Arc::new(FallAlertService::with_config_source(
                SmtpMailTransport::new(),
                mail_config.clone(),
            )),
            reminder: Arc::new(ReminderService::new(CommandSpeechSynthesizer::new(speech))),
            health: Arc::new(HealthService::new(repository, mail_config)),
            templates: TemplateDir(templates_dir),
        }
    }
}
