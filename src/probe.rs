//! Host uptime probe.
//!
//! The status endpoint reads the host uptime through the [`UptimeSource`]
//! trait. The production source, [`CommandUptime`], runs an external command
//! (`uptime -p` by default) once per call, captures its standard output up to
//! a fixed bound, and returns it trimmed. Nothing is cached between calls.

use std::io;
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::config::ProbeConfig;

/// Failure to obtain the uptime string from the host.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Failed to start uptime command: {0}")]
    Spawn(#[source] io::Error),

    #[error("Failed to read uptime command output: {0}")]
    Io(#[source] io::Error),

    #[error("Uptime command exited with {0}")]
    ExitStatus(ExitStatus),

    #[error("Uptime command output exceeded {limit} bytes")]
    OutputTooLarge { limit: usize },

    #[error("Uptime command output is not valid UTF-8")]
    InvalidUtf8,

    #[error("Uptime command produced no output")]
    EmptyOutput,
}

/// Source of the human-readable host uptime, e.g. `up 3 hours, 12 minutes`.
///
/// Implementations must return a non-empty string without surrounding
/// whitespace.
#[async_trait]
pub trait UptimeSource: Send + Sync {
    async fn uptime(&self) -> Result<String, ProbeError>;
}

/// Uptime source that spawns a command for every call.
#[derive(Debug, Clone)]
pub struct CommandUptime {
    program: String,
    args: Vec<String>,
    max_output_bytes: usize,
}

impl CommandUptime {
    pub fn new(config: &ProbeConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            max_output_bytes: config.max_output_bytes,
        }
    }
}

#[async_trait]
impl UptimeSource for CommandUptime {
    async fn uptime(&self) -> Result<String, ProbeError> {
        tracing::debug!(program = %self.program, args = ?self.args, "Running uptime command");

        // kill_on_drop: a cancelled request must not leave the child running
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(ProbeError::Spawn)?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ProbeError::Io(io::Error::other("stdout was not captured")))?;

        // Read one byte past the limit to tell "exactly full" from "overflowed"
        let limit = self.max_output_bytes;
        let mut output = Vec::with_capacity(limit.min(1024));
        let mut reader = stdout.take((limit as u64).saturating_add(1));
        reader
            .read_to_end(&mut output)
            .await
            .map_err(ProbeError::Io)?;
        drop(reader);

        if output.len() > limit {
            if let Err(e) = child.kill().await {
                tracing::warn!(error = %e, program = %self.program, "Failed to kill uptime command");
            }
            return Err(ProbeError::OutputTooLarge { limit });
        }

        let status = child.wait().await.map_err(ProbeError::Io)?;
        if !status.success() {
            return Err(ProbeError::ExitStatus(status));
        }

        let text = String::from_utf8(output).map_err(|_| ProbeError::InvalidUtf8)?;
        let uptime = text.trim();
        if uptime.is_empty() {
            return Err(ProbeError::EmptyOutput);
        }

        Ok(uptime.to_string())
    }
}
