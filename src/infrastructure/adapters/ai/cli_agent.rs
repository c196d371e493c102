//! CLI Agent - 本地 AI CLI 回答生成方
//!
//! 在仓库目录下运行 `claude -p <prompt> --no-stream` 或 `opencode run <prompt>`，
//! 回答从 stdout 读取。超时、非零退出、启动失败或空输出都会按重试策略重试

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    AnswerGeneratorPort, CliStatus, ProcessError, ProcessRunnerPort, ProcessSpec, ProviderError,
};
use crate::application::retry::{retry_async, RetryPolicy};
use crate::domain::AnswerProviderId;

/// 单次调用超时（秒）
pub const DEFAULT_CLI_TIMEOUT_SECS: u64 = 120;

/// 系统检查读取版本号的超时
const VERSION_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct CliAgentConfig {
    /// 可执行文件名或路径
    pub program: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl CliAgentConfig {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: Duration::from_secs(DEFAULT_CLI_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// 本地 CLI 回答生成方
pub struct CliAnswerGenerator {
    id: AnswerProviderId,
    config: CliAgentConfig,
    runner: Arc<dyn ProcessRunnerPort>,
}

impl CliAnswerGenerator {
    pub fn claude_code(config: CliAgentConfig, runner: Arc<dyn ProcessRunnerPort>) -> Self {
        Self {
            id: AnswerProviderId::ClaudeCode,
            config,
            runner,
        }
    }

    pub fn opencode(config: CliAgentConfig, runner: Arc<dyn ProcessRunnerPort>) -> Self {
        Self {
            id: AnswerProviderId::OpenCode,
            config,
            runner,
        }
    }

    fn analyze_args(&self, prompt: &str) -> Vec<String> {
        match self.id {
            AnswerProviderId::OpenCode => vec!["run".to_string(), prompt.to_string()],
            _ => vec!["-p".to_string(), prompt.to_string(), "--no-stream".to_string()],
        }
    }

    fn availability_spec(&self) -> ProcessSpec {
        match self.id {
            AnswerProviderId::OpenCode => {
                ProcessSpec::new(&self.config.program, Duration::from_secs(5)).arg("--help")
            }
            _ => ProcessSpec::new(&self.config.program, Duration::from_secs(10)).arg("--version"),
        }
    }

    async fn run_once(&self, repository_path: &Path, prompt: &str) -> Result<String, ProviderError> {
        let spec = ProcessSpec::new(&self.config.program, self.config.timeout)
            .args(self.analyze_args(prompt))
            .current_dir(repository_path);

        let output = self.runner.run(spec).await.map_err(|e| match e {
            ProcessError::Timeout(t) => ProviderError::Timeout {
                provider: self.id,
                secs: t.as_secs(),
            },
            other => ProviderError::ExecutionFailed {
                provider: self.id,
                message: other.to_string(),
            },
        })?;

        if !output.success() {
            let code = output
                .exit_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            let stderr = output.stderr.trim();
            let message = if stderr.is_empty() {
                format!("exit code {}", code)
            } else {
                format!("exit code {}: {}", code, stderr)
            };
            return Err(ProviderError::ExecutionFailed {
                provider: self.id,
                message,
            });
        }

        let stdout = output.stdout.trim();
        if stdout.is_empty() {
            return Err(ProviderError::EmptyResponse(self.id));
        }

        Ok(stdout.to_string())
    }
}

#[async_trait]
impl AnswerGeneratorPort for CliAnswerGenerator {
    fn id(&self) -> AnswerProviderId {
        self.id
    }

    async fn analyze(
        &self,
        repository_path: &Path,
        _question: &str,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        if !self.is_available().await {
            return Err(ProviderError::Unavailable(self.id));
        }

        let label = format!("{} cli", self.id);
        retry_async(&self.config.retry, &label, move |attempt| {
            tracing::info!(
                provider = %self.id,
                attempt,
                max_attempts = self.config.retry.max_attempts,
                "Running AI CLI"
            );
            self.run_once(repository_path, prompt)
        })
        .await
    }

    async fn is_available(&self) -> bool {
        match self.runner.run(self.availability_spec()).await {
            Ok(output) => output.success(),
            Err(e) => {
                tracing::debug!(provider = %self.id, error = %e, "CLI availability check failed");
                false
            }
        }
    }

    /// `<program> --version`：能启动即已安装，退出码为 0 即已配置，stdout 为版本号
    async fn cli_status(&self) -> Option<CliStatus> {
        let name = self.id.display_name();
        let spec = ProcessSpec::new(&self.config.program, VERSION_CHECK_TIMEOUT).arg("--version");
        let mut status = CliStatus::default();

        match self.runner.run(spec).await {
            Ok(output) if output.success() => {
                status.installed = true;
                status.configured = true;
                let version = output.stdout.trim();
                if !version.is_empty() {
                    status.version = Some(version.to_string());
                }
            }
            Ok(output) => {
                status.installed = true;
                let stderr = output.stderr.trim();
                status.error = Some(format!(
                    "Could not get {} version: {}",
                    name,
                    if stderr.is_empty() { "non-zero exit status" } else { stderr }
                ));
            }
            Err(ProcessError::NotFound(_)) => {
                status.error = Some(format!("{} not found in PATH", name));
            }
            Err(e @ ProcessError::Timeout(_)) => {
                status.installed = true;
                status.error = Some(format!("Could not get {} version: {}", name, e));
            }
            Err(e) => {
                status.error = Some(e.to_string());
            }
        }

        tracing::debug!(provider = %self.id, ?status, "CLI status checked");
        Some(status)
    }
}
