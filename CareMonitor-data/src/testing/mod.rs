// Test doubles for the store and the external collaborators
// This module is only available when the "mock" feature is enabled

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::mail::{MailConfig, MailError, MailTransport, OutgoingMail};
use crate::models::health_record::{HealthRecord, NewHealthRecord};
use crate::repository::{HealthRecordRepositoryTrait, RepositoryError};
use crate::speech::{SpeechError, SpeechSession, SpeechSynthesizer};

/// In-memory append-only store
#[derive(Debug, Clone, Default)]
pub struct InMemoryHealthRecordRepository {
    records: Arc<Mutex<Vec<HealthRecord>>>,
    unavailable: bool,
}

impl InMemoryHealthRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the store to refuse every operation
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Snapshot of everything written so far
    pub fn records(&self) -> Vec<HealthRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable {
            Err(RepositoryError::Unavailable("store is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl HealthRecordRepositoryTrait for InMemoryHealthRecordRepository {
    async fn create(&self, record: NewHealthRecord) -> Result<HealthRecord, RepositoryError> {
        self.check_available()?;
        let mut records = self.records.lock()?;
        let id = records.len() as i64 + 1;
        let stored = record.with_id(id);
        records.push(stored.clone());
        Ok(stored)
    }

    async fn get_all(&self) -> Result<Vec<HealthRecord>, RepositoryError> {
        self.check_available()?;
        Ok(self.records.lock()?.clone())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check_available()
    }
}

/// Mail transport that records messages instead of sending them
#[derive(Debug, Clone, Default)]
pub struct RecordingMailTransport {
    sent: Arc<Mutex<Vec<(MailConfig, OutgoingMail)>>>,
    failure: Option<MailError>,
}

impl RecordingMailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure every send to fail with `error`
    pub fn failing_with(error: MailError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Messages accepted so far
    pub fn sent(&self) -> Vec<(MailConfig, OutgoingMail)> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MailTransport for RecordingMailTransport {
    async fn send(&self, config: &MailConfig, mail: OutgoingMail) -> Result<(), MailError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.sent
            .lock()
            .map_err(|e| MailError::Connection(e.to_string()))?
            .push((config.clone(), mail));
        Ok(())
    }
}

/// Where a recording synthesizer should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechFailure {
    Open,
    Speak,
}

/// Speech synthesizer that records utterances and session lifetimes
#[derive(Debug, Clone, Default)]
pub struct RecordingSpeechSynthesizer {
    spoken: Arc<Mutex<Vec<String>>>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
    failure: Option<SpeechFailure>,
}

impl RecordingSpeechSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(failure: SpeechFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    /// Texts spoken so far
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Number of sessions acquired
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Number of sessions released
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizer for RecordingSpeechSynthesizer {
    async fn open(&self) -> Result<Box<dyn SpeechSession>, SpeechError> {
        if self.failure == Some(SpeechFailure::Open) {
            return Err(SpeechError::Unavailable("no audio device".to_string()));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(RecordingSpeechSession {
            owner: self.clone(),
        }))
    }
}

struct RecordingSpeechSession {
    owner: RecordingSpeechSynthesizer,
}

#[async_trait]
impl SpeechSession for RecordingSpeechSession {
    async fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
        if self.owner.failure == Some(SpeechFailure::Speak) {
            return Err(SpeechError::Engine("driver crashed".to_string()));
        }
        self.owner
            .spoken
            .lock()
            .map_err(|e| SpeechError::Engine(e.to_string()))?
            .push(text.to_string());
        Ok(())
    }

    async fn close(self: Box<Self>) -> Result<(), SpeechError> {
        self.owner.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
