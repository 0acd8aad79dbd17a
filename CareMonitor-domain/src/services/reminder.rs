use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, warn};

use care_monitor_data::speech::{SpeechError, SpeechSynthesizer};

use crate::entities::requests::ReminderRequest;

/// Reminder errors
#[derive(Debug, Error)]
pub enum ReminderError {
    /// Engine could not be acquired or failed while speaking
    #[error("Failed to send reminder: {0}")]
    Speech(#[from] SpeechError),
}

/// Trait for spoken reminders
#[async_trait]
pub trait ReminderServiceTrait {
    /// Speak the reminder and return the text that was spoken
    async fn send_reminder(&self, request: ReminderRequest) -> Result<String, ReminderError>;
}

/// Speaks reminders, one engine session per request
pub struct ReminderService<S: SpeechSynthesizer> {
    synthesizer: S,
}

impl<S: SpeechSynthesizer> ReminderService<S> {
    pub fn new(synthesizer: S) -> Self {
        Self { synthesizer }
    }
}

#[async_trait]
impl<S: SpeechSynthesizer + Send + Sync> ReminderServiceTrait for ReminderService<S> {
    async fn send_reminder(&self, request: ReminderRequest) -> Result<String, ReminderError> {
        let mut session = self.synthesizer.open().await.map_err(|e| {
            error!("Could not start speech engine: {}", e);
            ReminderError::Speech(e)
        })?;

        let spoken = session.speak(&request.message).await;
        // The session is released whether or not speaking worked
        let released = session.close().await;

        if let Err(e) = spoken {
            error!("Speech engine failed: {}", e);
            if let Err(release_err) = released {
                warn!("Speech session release also failed: {}", release_err);
            }
            return Err(ReminderError::Speech(e));
        }
        released?;

        info!("Reminder spoken");
        Ok(request.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use care_monitor_data::testing::{RecordingSpeechSynthesizer, SpeechFailure};
    use crate::entities::requests::DEFAULT_REMINDER;

    fn request(message: &str) -> ReminderRequest {
        ReminderRequest {
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn speaks_and_releases_session() {
        let synth = RecordingSpeechSynthesizer::new();
        let service = ReminderService::new(synth.clone());

        let spoken = service.send_reminder(request(DEFAULT_REMINDER)).await.unwrap();

        assert_eq!(spoken, DEFAULT_REMINDER);
        assert_eq!(synth.spoken(), vec![DEFAULT_REMINDER.to_string()]);
        assert_eq!(synth.opened(), 1);
        assert_eq!(synth.closed(), 1);
    }

    #[tokio::test]
    async fn each_request_gets_its_own_session() {
        let synth = RecordingSpeechSynthesizer::new();
        let service = ReminderService::new(synth.clone());

        service.send_reminder(request("Drink water")).await.unwrap();
        service.send_reminder(request("Stretch")).await.unwrap();

        assert_eq!(synth.opened(), 2);
        assert_eq!(synth.closed(), 2);
    }

    #[tokio::test]
    async fn session_is_released_when_speaking_fails() {
        let synth = RecordingSpeechSynthesizer::failing_at(SpeechFailure::Speak);
        let service = ReminderService::new(synth.clone());

        let err = service.send_reminder(request("Hello")).await.unwrap_err();

        assert!(err.to_string().starts_with("Failed to send reminder:"));
        assert!(err.to_string().contains("driver crashed"));
        assert_eq!(synth.opened(), 1);
        assert_eq!(synth.closed(), 1);
    }

    #[tokio::test]
    async fn unavailable_engine_is_reported() {
        let synth = RecordingSpeechSynthesizer::failing_at(SpeechFailure::Open);
        let service = ReminderService::new(synth.clone());

        let err = service.send_reminder(request("Hello")).await.unwrap_err();
        assert!(err.to_string().contains("unavailable"));
        assert_eq!(synth.closed(), 0);
    }
}
