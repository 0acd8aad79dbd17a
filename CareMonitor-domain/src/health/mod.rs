//! Domain layer health check functionality
//! This module reports whether the store and the mail settings are usable

use std::collections::HashMap;

use async_trait::async_trait;

use care_monitor_data::repository::HealthRecordRepositoryTrait;

use crate::services::MailConfigSource;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but some operations will fail
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

impl SystemHealth {
    /// Derive the overall status from the worst component
    pub fn from_components(components: HashMap<String, HealthComponent>) -> Self {
        let status = if components
            .values()
            .any(|c| c.status == ComponentStatus::Unhealthy)
        {
            SystemStatus::Unhealthy
        } else if components
            .values()
            .any(|c| c.status == ComponentStatus::Degraded)
        {
            SystemStatus::Degraded
        } else {
            SystemStatus::Healthy
        };

        Self { status, components }
    }
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;
}

/// Checks the store with a trivial query and the mail settings for presence
pub struct HealthService<R: HealthRecordRepositoryTrait> {
    repository: R,
    mail_config: MailConfigSource,
}

impl<R: HealthRecordRepositoryTrait> HealthService<R> {
    pub fn new(repository: R, mail_config: MailConfigSource) -> Self {
        Self {
            repository,
            mail_config,
        }
    }
}

#[async_trait]
impl<R: HealthRecordRepositoryTrait + Send + Sync> HealthServiceTrait for HealthService<R> {
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = HashMap::new();

        let database = match self.repository.ping().await {
            Ok(()) => HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
            Err(e) => HealthComponent {
                status: ComponentStatus::Unhealthy,
                details: Some(format!("Database connection failed: {}", e)),
            },
        };
        components.insert("database".to_string(), database);

        // Alerts cannot go out without mail settings, everything else still works
        let mail = match (self.mail_config)() {
            Ok(_) => HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
            Err(e) => HealthComponent {
                status: ComponentStatus::Degraded,
                details: Some(e.to_string()),
            },
        };
        components.insert("mail".to_string(), mail);

        SystemHealth::from_components(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use care_monitor_data::mail::{MailConfig, MailError};
    use care_monitor_data::testing::InMemoryHealthRecordRepository;
    use std::sync::Arc;

    fn configured() -> MailConfigSource {
        Arc::new(|| {
            Ok(MailConfig {
                sender: "a@example.com".to_string(),
                receiver: "b@example.com".to_string(),
                password: "x".to_string(),
                smtp_host: "smtp.example.com".to_string(),
                smtp_port: 587,
            })
        })
    }

    #[tokio::test]
    async fn healthy_when_store_and_mail_are_ready() {
        let service = HealthService::new(InMemoryHealthRecordRepository::new(), configured());
        let health = service.get_system_health().await;

        assert_eq!(health.status, SystemStatus::Healthy);
        assert!(health.components.contains_key("database"));
        assert!(health.components.contains_key("mail"));
    }

    #[tokio::test]
    async fn degraded_without_mail_settings() {
        let service = HealthService::new(
            InMemoryHealthRecordRepository::new(),
            Arc::new(|| Err(MailError::MissingConfig(vec!["SENDER_EMAIL"]))),
        );
        let health = service.get_system_health().await;

        assert_eq!(health.status, SystemStatus::Degraded);
        let mail = &health.components["mail"];
        assert_eq!(mail.status, ComponentStatus::Degraded);
        assert!(mail.details.as_deref().unwrap_or_default().contains("SENDER_EMAIL"));
    }

    #[tokio::test]
    async fn unhealthy_when_store_is_down() {
        let service = HealthService::new(InMemoryHealthRecordRepository::unavailable(), configured());
        let health = service.get_system_health().await;

        assert_eq!(health.status, SystemStatus::Unhealthy);
        assert_eq!(health.components["database"].status, ComponentStatus::Unhealthy);
    }
}
