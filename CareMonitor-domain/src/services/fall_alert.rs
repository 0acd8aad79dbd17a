use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, warn};

use care_monitor_data::mail::{MailConfig, MailError, MailTransport, OutgoingMail};

use crate::entities::requests::FallAlertRequest;
use super::local_timestamp;

/// Subject line of every fall alert
pub const ALERT_SUBJECT: &str = "URGENT: Fall Alert";

/// Supplies mail settings at the moment an alert is sent
pub type MailConfigSource = Arc<dyn Fn() -> Result<MailConfig, MailError> + Send + Sync>;

/// Fall alert errors
#[derive(Debug, Error)]
pub enum FallAlertError {
    /// Settings missing or delivery failed; nothing was sent
    #[error("Failed to send alert: {0}")]
    Delivery(#[from] MailError),
}

/// Trait for fall alert operations
#[async_trait]
pub trait FallAlertServiceTrait {
    /// Notify the caregiver by email, one attempt only
    async fn send_alert(&self, request: FallAlertRequest) -> Result<(), FallAlertError>;
}

/// Relays fall alerts to the configured caregiver
pub struct FallAlertService<T: MailTransport> {
    transport: T,
    config_source: MailConfigSource,
}

impl<T: MailTransport> FallAlertService<T> {
    /// Create a service reading its mail settings from the environment
    pub fn new(transport: T) -> Self {
        Self::with_config_source(transport, Arc::new(MailConfig::from_env))
    }

    /// Create a service with an explicit settings source
    pub fn with_config_source(transport: T, config_source: MailConfigSource) -> Self {
        Self {
            transport,
            config_source,
        }
    }
}

/// Build the notification for a fall at `location` detected at `detected_at`
pub fn compose_alert(location: &str, detected_at: &str) -> OutgoingMail {
    OutgoingMail {
        subject: ALERT_SUBJECT.to_string(),
        body: format!(
            "A fall has been detected at {} on {}.",
            location, detected_at
        ),
    }
}

#[async_trait]
impl<T: MailTransport + Send + Sync> FallAlertServiceTrait for FallAlertService<T> {
    async fn send_alert(&self, request: FallAlertRequest) -> Result<(), FallAlertError> {
        let config = (self.config_source)().map_err(|e| {
            warn!("Fall alert not sent: {}", e);
            FallAlertError::Delivery(e)
        })?;

        let mail = compose_alert(&request.location, &local_timestamp());

        self.transport.send(&config, mail).await.map_err(|e| {
            error!("Failed to deliver fall alert: {}", e);
            FallAlertError::Delivery(e)
        })?;

        info!(location = %request.location, "FALL ALERT sent to caregiver");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use care_monitor_data::testing::RecordingMailTransport;

    fn test_config() -> MailConfig {
        MailConfig {
            sender: "alerts@example.com".to_string(),
            receiver: "carer@example.com".to_string(),
            password: "app-password".to_string(),
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
        }
    }

    fn service(transport: RecordingMailTransport) -> FallAlertService<RecordingMailTransport> {
        FallAlertService::with_config_source(transport, Arc::new(|| Ok(test_config())))
    }

    fn living_room() -> FallAlertRequest {
        FallAlertRequest {
            location: "Living Room".to_string(),
        }
    }

    #[test]
    fn alert_body_names_location_and_time() {
        let mail = compose_alert("Kitchen", "2024-03-01 08:30:00");
        assert_eq!(mail.subject, "URGENT: Fall Alert");
        assert_eq!(
            mail.body,
            "A fall has been detected at Kitchen on 2024-03-01 08:30:00."
        );
    }

    #[tokio::test]
    async fn sends_one_message_to_configured_receiver() {
        let transport = RecordingMailTransport::new();
        service(transport.clone()).send_alert(living_room()).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0.receiver, "carer@example.com");
        assert_eq!(sent[0].1.subject, ALERT_SUBJECT);
        assert!(sent[0].1.body.contains("Living Room"));
    }

    #[tokio::test]
    async fn transport_failure_carries_reason() {
        let transport = RecordingMailTransport::failing_with(MailError::Rejected(
            "535 5.7.8 Username and Password not accepted".to_string(),
        ));

        let err = service(transport).send_alert(living_room()).await.unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Failed to send alert:"));
        assert!(message.contains("Username and Password not accepted"));
    }

    #[tokio::test]
    async fn missing_configuration_fails_before_sending() {
        let transport = RecordingMailTransport::new();
        let service = FallAlertService::with_config_source(
            transport.clone(),
            Arc::new(|| Err(MailError::MissingConfig(vec!["EMAIL_PASSWORD"]))),
        );

        let err = service.send_alert(living_room()).await.unwrap_err();
        assert!(err.to_string().contains("EMAIL_PASSWORD"));
        assert!(transport.sent().is_empty());
    }
}
