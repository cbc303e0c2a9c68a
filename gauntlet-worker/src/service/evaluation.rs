//! Evaluation service
//!
//! The scoring routine is an external collaborator: challenge hosts ship a
//! command alongside the worker, the worker hands it the downloaded
//! artifact and the phase codename, and the command prints its scores as a
//! JSON object on the final line of stdout.

use std::path::Path;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use gauntlet_core::domain::evaluation::EvaluationOutput;

/// Service trait for scoring a downloaded submission artifact
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Scores an artifact for the given phase codename.
    ///
    /// An error returned here is reported to the platform as a FAILED
    /// submission; it never aborts the worker.
    async fn evaluate(&self, artifact: &Path, codename: &str) -> Result<EvaluationOutput>;
}

/// Runs the host-provided scoring command as a child process.
///
/// The configured command string is split on whitespace (no shell
/// interpretation); the artifact path and phase codename are appended as
/// the final two arguments. A non-zero exit is an evaluation failure, with
/// the child's stderr as the error text.
pub struct ProcessEvaluator {
    program: String,
    base_args: Vec<String>,
}

impl ProcessEvaluator {
    /// Creates an evaluator for the given command string
    pub fn new(command: impl Into<String>) -> Self {
        let command = command.into();
        let mut parts = command.split_whitespace().map(str::to_string);

        Self {
            program: parts.next().unwrap_or_default(),
            base_args: parts.collect(),
        }
    }

    /// Parses captured stdout into an [`EvaluationOutput`].
    ///
    /// The final non-empty line must be JSON. An object with a `result`
    /// key is treated as an envelope (`result` + optional `metadata`); any
    /// other JSON value is the scores payload itself. Preceding lines are
    /// kept as passthrough stdout.
    fn parse_output(stdout: &str) -> Result<EvaluationOutput> {
        let mut lines: Vec<&str> = stdout.lines().collect();
        while matches!(lines.last(), Some(line) if line.trim().is_empty()) {
            lines.pop();
        }

        let json_line = lines.pop().context("Evaluator produced no output")?;
        let value: serde_json::Value = serde_json::from_str(json_line.trim())
            .context("Final line of evaluator output is not valid JSON")?;

        let (result, metadata) = match value {
            serde_json::Value::Object(mut map) if map.contains_key("result") => {
                let result = map.remove("result").unwrap_or(serde_json::Value::Null);
                (result, map.remove("metadata"))
            }
            other => (other, None),
        };

        let leading = lines.join("\n");
        let stdout = (!leading.trim().is_empty()).then_some(leading);

        Ok(EvaluationOutput {
            result,
            stdout,
            metadata,
        })
    }
}

#[async_trait]
impl Evaluator for ProcessEvaluator {
    async fn evaluate(&self, artifact: &Path, codename: &str) -> Result<EvaluationOutput> {
        debug!(
            "Running evaluator: {} {:?} {} {}",
            self.program,
            self.base_args,
            artifact.display(),
            codename
        );

        let output = Command::new(&self.program)
            .args(&self.base_args)
            .arg(artifact)
            .arg(codename)
            .output()
            .await
            .with_context(|| format!("Failed to spawn evaluator command '{}'", self.program))?;

        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim()
            };
            bail!("Evaluator exited with {}: {}", output.status, detail);
        }

        Self::parse_output(&stdout)
    }
}
