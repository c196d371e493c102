//! Tokio Process Runner
//!
//! 基于 tokio::process 实现 ProcessRunnerPort，超时后子进程随 future 一起被杀掉

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use crate::application::ports::{ProcessError, ProcessOutput, ProcessRunnerPort, ProcessSpec};

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunnerPort for TokioProcessRunner {
    async fn run(&self, spec: ProcessSpec) -> Result<ProcessOutput, ProcessError> {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &spec.working_dir {
            cmd.current_dir(dir);
        }

        tracing::debug!(
            program = %spec.program,
            args = spec.args.len(),
            working_dir = ?spec.working_dir,
            timeout_secs = spec.timeout.as_secs(),
            "Running external command"
        );

        let child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ProcessError::NotFound(spec.program.clone())
            } else {
                ProcessError::SpawnFailed {
                    program: spec.program.clone(),
                    message: e.to_string(),
                }
            }
        })?;

        let output = tokio::time::timeout(spec.timeout, child.wait_with_output())
            .await
            .map_err(|_| ProcessError::Timeout(spec.timeout))?
            .map_err(|e| ProcessError::SpawnFailed {
                program: spec.program.clone(),
                message: e.to_string(),
            })?;

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
