//! Completer backed by an external command.
//!
//! The conversation is written to the command's stdin as a JSON array of
//! `{"role", "content"}` messages; its stdout, trimmed, is the reply.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::base::Completer;
use crate::types::config::CompleterConfig;
use crate::types::errors::{CompletionError, CompletionResult};
use crate::types::question::Turn;
use crate::{AgoraError, AgoraResult};

/// Completer that shells out to a local program.
pub struct CommandCompleter {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandCompleter {
    /// Creates a new command completer.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Creates a completer from configuration.
    pub fn from_config(config: &CompleterConfig) -> AgoraResult<Self> {
        if config.command.trim().is_empty() {
            return Err(AgoraError::config(
                "completer.command must be set for the command provider",
            ));
        }

        Ok(Self::new(&config.command)
            .with_args(config.args.clone())
            .with_timeout(config.timeout()))
    }

    /// Sets the command arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, input: Vec<u8>) -> CompletionResult<std::process::Output> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CompletionError::Process(self.command.clone(), e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&input)
                .await
                .map_err(|e| CompletionError::Process(self.command.clone(), e.to_string()))?;
        }

        child
            .wait_with_output()
            .await
            .map_err(|e| CompletionError::Process(self.command.clone(), e.to_string()))
    }
}

#[async_trait]
impl Completer for CommandCompleter {
    fn name(&self) -> &str {
        &self.command
    }

    async fn complete(&self, conversation: &[Turn]) -> CompletionResult<String> {
        let input = serde_json::to_vec(conversation)
            .map_err(|e| CompletionError::Malformed(self.command.clone(), e.to_string()))?;

        let result = tokio::time::timeout(self.timeout, self.run(input)).await;

        match result {
            Ok(Ok(output)) => {
                if output.status.success() {
                    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Err(CompletionError::Process(
                        self.command.clone(),
                        stderr.trim().to_string(),
                    ))
                }
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(CompletionError::Timeout(self.command.clone())),
        }
    }
}
