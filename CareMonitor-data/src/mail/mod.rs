//! Outgoing email delivery
//!
//! Credentials are read when a message is sent, never at startup, so a
//! missing secret fails that one delivery instead of the whole process.

mod config;
mod smtp;

pub use config::MailConfig;
pub use smtp::SmtpMailTransport;

use async_trait::async_trait;
use thiserror::Error;

/// Mail delivery errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MailError {
    /// One or more required settings are absent
    #[error("mail configuration missing: {}", .0.join(", "))]
    MissingConfig(Vec<&'static str>),

    /// Sender or recipient is not a valid mailbox
    #[error("invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Message could not be assembled
    #[error("could not build message: {0}")]
    Message(String),

    /// Server refused the login or the message
    #[error("rejected by mail server: {0}")]
    Rejected(String),

    /// Server could not be reached or the session broke off
    #[error("mail server connection failed: {0}")]
    Connection(String),
}

/// A plain-text message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub subject: String,
    pub body: String,
}

/// Delivers one message per call; no retries
#[async_trait]
pub trait MailTransport {
    async fn send(&self, config: &MailConfig, mail: OutgoingMail) -> Result<(), MailError>;
}
