//! The bundler seam.
//!
//! The build never bundles anything itself. It hands the resolved bundler
//! config to a [`Bundler`] and waits for it to finish.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use crate::env::Environment;
use crate::error::BundlerError;

/// Runs one bundler pass over a resolved config.
#[async_trait]
pub trait Bundler: Send + Sync {
    async fn bundle(&self, config: &Value, environment: Environment) -> Result<(), BundlerError>;
}

/// Bundles by running an external command.
///
/// The config is written to the child's stdin as JSON and `NODE_ENV` is set
/// to the build environment.
#[derive(Debug, Clone)]
pub struct ProcessBundler {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBundler {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Split a command line like `"node 'my scripts/bundle.js' --json"` with
    /// shell quoting rules. Returns `Ok(None)` for a blank command.
    pub fn parse(command_line: &str) -> Result<Option<Self>, BundlerError> {
        let parts = shell_words::split(command_line).map_err(|e| {
            BundlerError::Custom(format!("invalid bundler command `{command_line}`: {e}"))
        })?;
        let mut parts = parts.into_iter();
        let Some(program) = parts.next() else {
            return Ok(None);
        };
        Ok(Some(Self::new(program).args(parts)))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl Bundler for ProcessBundler {
    async fn bundle(&self, config: &Value, environment: Environment) -> Result<(), BundlerError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .env("NODE_ENV", environment.as_str())
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped());
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }

        debug!(program = %self.program, args = ?self.args, "spawning bundler");
        let mut child = command.spawn().map_err(|source| BundlerError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            let payload = serde_json::to_vec(config)
                .map_err(|e| BundlerError::Custom(format!("failed to serialize bundler config: {e}")))?;
            match stdin.write_all(&payload).await {
                Ok(()) => {}
                // The bundler may not read its config from stdin at all.
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Err(e) => return Err(e.into()),
            }
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(BundlerError::Failed {
                program: self.program.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        info!(program = %self.program, "bundler finished");
        Ok(())
    }
}
