//! Speech synthesis
//!
//! The underlying engine is not safe to share between concurrent callers, so
//! every utterance runs in its own [`SpeechSession`] which the caller must
//! [`close`](SpeechSession::close) once done.

mod command;

pub use command::{CommandSpeechSynthesizer, SpeechConfig};

use async_trait::async_trait;
use thiserror::Error;

/// Speech synthesis errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpeechError {
    /// Engine could not be started
    #[error("speech engine unavailable: {0}")]
    Unavailable(String),

    /// Engine started but failed to speak
    #[error("speech engine failed: {0}")]
    Engine(String),

    /// Session has already spoken or been closed
    #[error("speech session is closed")]
    Closed,
}

/// Hands out request-scoped speech sessions
#[async_trait]
pub trait SpeechSynthesizer {
    /// Acquire a fresh engine instance
    async fn open(&self) -> Result<Box<dyn SpeechSession>, SpeechError>;
}

/// One engine instance owned by a single request
#[async_trait]
pub trait SpeechSession: Send {
    /// Speak `text`, returning once playback has finished
    async fn speak(&mut self, text: &str) -> Result<(), SpeechError>;

    /// Tear the engine instance down
    async fn close(self: Box<Self>) -> Result<(), SpeechError>;
}
