//! Transcripts produced by an external agent command.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use super::{build_instruction, TranscriptSource};
use crate::error::SourceError;
use crate::models::config::AgentConfig;

/// Runs an agent once per query.
///
/// The query is appended as the last argument, the instruction is written to
/// stdin, and stdout is the transcript.
#[derive(Debug, Clone)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandSource {
    /// Create a source from a command line.
    pub fn new(command: &[String], timeout: Duration) -> Result<Self, SourceError> {
        let (program, args) = command.split_first().ok_or(SourceError::NotConfigured)?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout,
        })
    }

    pub fn from_config(config: &AgentConfig) -> Result<Self, SourceError> {
        Self::new(&config.command, Duration::from_secs(config.timeout_secs))
    }
}

impl TranscriptSource for CommandSource {
    async fn fetch(&self, query: &str) -> Result<String, SourceError> {
        info!("Running agent {} for {}", self.program, query);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(query)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SourceError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let instruction = build_instruction(query);
        let run = async move {
            if let Some(mut stdin) = child.stdin.take() {
                // The agent may exit without reading its input
                if let Err(e) = stdin.write_all(instruction.as_bytes()).await {
                    debug!("Agent did not accept instruction: {}", e);
                }
            }
            child.wait_with_output().await
        };

        let output = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| SourceError::Timeout(self.timeout))?
            .map_err(|source| SourceError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SourceError::AgentFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let transcript = String::from_utf8(output.stdout).map_err(|_| SourceError::InvalidOutput)?;
        debug!("Agent returned {} bytes", transcript.len());
        Ok(transcript)
    }
}
