use std::env;
use std::fmt;

use super::MailError;

const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;

/// Sender account, recipient and relay for outgoing alerts
#[derive(Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub sender: String,
    pub receiver: String,
    pub password: String,
    pub smtp_host: String,
    pub smtp_port: u16,
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("sender", &self.sender)
            .field("receiver", &self.receiver)
            .field("password", &"<redacted>")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .finish()
    }
}

impl MailConfig {
    /// Read the mail settings from the process environment
    pub fn from_env() -> Result<Self, MailError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the settings from an arbitrary key lookup.
    ///
    /// `SENDER_EMAIL`, `RECEIVER_EMAIL` and `EMAIL_PASSWORD` are checked
    /// together and every missing one is reported at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MailError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str, missing: &mut Vec<&'static str>| {
            match lookup(key).filter(|v| !v.trim().is_empty()) {
                Some(value) => value,
                None => {
                    missing.push(key);
                    String::new()
                }
            }
        };

        let mut missing = Vec::new();
        let sender = required("SENDER_EMAIL", &mut missing);
        let receiver = required("RECEIVER_EMAIL", &mut missing);
        let password = required("EMAIL_PASSWORD", &mut missing);

        if !missing.is_empty() {
            return Err(MailError::MissingConfig(missing));
        }

        let smtp_host = lookup("SMTP_HOST")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string());
        let smtp_port = lookup("SMTP_PORT")
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_SMTP_PORT);

        Ok(Self {
            sender,
            receiver,
            password,
            smtp_host,
            smtp_port,
        })
    }
}
