use std::env;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStderr, Command};
use tracing::{debug, warn};

use super::{SpeechError, SpeechSession, SpeechSynthesizer};

const DEFAULT_TTS_BIN: &str = "espeak-ng";

/// Command-line engine settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechConfig {
    /// Executable that reads text on stdin and plays it
    pub binary: String,
    /// Voice name passed with `-v`
    pub voice: Option<String>,
    /// Words per minute passed with `-s`
    pub rate: Option<u32>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_TTS_BIN.to_string(),
            voice: None,
            rate: None,
        }
    }
}

impl SpeechConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            binary: lookup("TTS_BIN")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TTS_BIN.to_string()),
            voice: lookup("TTS_VOICE").filter(|v| !v.trim().is_empty()),
            rate: lookup("TTS_RATE").and_then(|v| v.parse::<u32>().ok()),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        if let Some(voice) = &self.voice {
            cmd.arg("-v").arg(voice);
        }
        if let Some(rate) = self.rate {
            cmd.arg("-s").arg(rate.to_string());
        }
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

/// Speaks through an external text-to-speech program such as `espeak-ng`.
///
/// Each session spawns its own engine process; the text is written to the
/// process's stdin and the call returns when the process exits.
#[derive(Debug, Clone, Default)]
pub struct CommandSpeechSynthesizer {
    config: SpeechConfig,
}

impl CommandSpeechSynthesizer {
    pub fn new(config: SpeechConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SpeechSynthesizer for CommandSpeechSynthesizer {
    async fn open(&self) -> Result<Box<dyn SpeechSession>, SpeechError> {
        let child = self.config.command().spawn().map_err(|e| {
            SpeechError::Unavailable(format!("{}: {}", self.config.binary, e))
        })?;

        debug!("Started speech engine {} (pid {:?})", self.config.binary, child.id());
        Ok(Box::new(CommandSpeechSession { child: Some(child) }))
    }
}

struct CommandSpeechSession {
    child: Option<Child>,
}

#[async_trait]
impl SpeechSession for CommandSpeechSession {
    async fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
        let child = self.child.as_mut().ok_or(SpeechError::Closed)?;

        let mut stdin = child.stdin.take().ok_or(SpeechError::Closed)?;
        let stderr = child.stderr.take();

        let written = async {
            stdin.write_all(text.as_bytes()).await?;
            stdin.write_all(b"\n").await?;
            stdin.shutdown().await
        }
        .await;
        // Closing stdin signals end of input
        drop(stdin);

        let (status, diagnostics) = tokio::join!(child.wait(), read_stderr(stderr));
        let status = status.map_err(|e| SpeechError::Engine(e.to_string()))?;

        if !status.success() {
            let detail = diagnostics.trim();
            return Err(SpeechError::Engine(if detail.is_empty() {
                format!("engine exited with {}", status)
            } else {
                format!("engine exited with {}: {}", status, detail)
            }));
        }

        written.map_err(|e| SpeechError::Engine(format!("could not pass text to engine: {}", e)))
    }

    async fn close(mut self: Box<Self>) -> Result<(), SpeechError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        match child.try_wait() {
            Ok(Some(_)) => Ok(()),
            Ok(None) => {
                warn!("Speech engine still running at close, stopping it");
                child
                    .kill()
                    .await
                    .map_err(|e| SpeechError::Engine(e.to_string()))
            }
            Err(e) => Err(SpeechError::Engine(e.to_string())),
        }
    }
}

async fn read_stderr(stderr: Option<ChildStderr>) -> String {
    let mut output = String::new();
    if let Some(mut stderr) = stderr {
        let _ = stderr.read_to_string(&mut output).await;
    }
    output
}
