use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use super::{MailConfig, MailError, MailTransport, OutgoingMail};

/// SMTP delivery over a STARTTLS-upgraded, authenticated session.
///
/// A new session is opened for every message and closed after it.
#[derive(Debug, Clone, Default)]
pub struct SmtpMailTransport;

impl SmtpMailTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, config: &MailConfig, mail: OutgoingMail) -> Result<(), MailError> {
        let message = build_message(config, mail)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| MailError::Connection(e.to_string()))?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.sender.clone(),
                config.password.clone(),
            ))
            .build();

        debug!(
            "Connecting to SMTP relay {}:{}",
            config.smtp_host, config.smtp_port
        );

        transport.send(message).await.map_err(classify_smtp_error)?;

        info!("Delivered mail to {}", config.receiver);
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| MailError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// Assemble the plain-text message from sender to receiver
pub(crate) fn build_message(config: &MailConfig, mail: OutgoingMail) -> Result<Message, MailError> {
    let from = parse_mailbox(&config.sender)?;
    let to = parse_mailbox(&config.receiver)?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(mail.subject)
        .header(ContentType::TEXT_PLAIN)
        .body(mail.body)
        .map_err(|e| MailError::Message(e.to_string()))
}

fn classify_smtp_error(err: lettre::transport::smtp::Error) -> MailError {
    // Transient and permanent errors both carry a server reply code
    if err.is_permanent() || err.is_transient() {
        MailError::Rejected(err.to_string())
    } else {
        MailError::Connection(err.to_string())
    }
}
