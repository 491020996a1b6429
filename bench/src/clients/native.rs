use super::{ClientKind, EchoClient};
use crate::error::BenchError;
use crate::measurement::MeasurementConfig;
use crate::target::Target;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

const VERSION: &str = "beast-1.90";

/// Async read loop in the native client, the one that mirrors a real epoll/recvmsg sequence.
const ASYNC_MODE: &str = "1";

/// Prebuilt native echo client, run as a child process per measurement.
///
/// Invoked as `<binary> <is_async> <is_secure> <host> <port> <msg_size> <duration_sec>`,
/// it prints one `label:value` line with its requests per second. It does its
/// own timing and has no warmup phase.
#[derive(Debug, Clone)]
pub struct NativeClient {
    path: PathBuf,
    workdir: PathBuf,
}

impl NativeClient {
    pub fn new(path: PathBuf, workdir: PathBuf) -> Self {
        Self { path, workdir }
    }

    fn arguments(target: &Target, config: &MeasurementConfig) -> Vec<String> {
        vec![
            ASYNC_MODE.to_owned(),
            if target.transport().is_tls() { "1" } else { "0" }.to_owned(),
            target.host().to_owned(),
            target.port().to_string(),
            config.message_size().to_string(),
            config.duration_secs.to_string(),
        ]
    }
}

#[async_trait]
impl EchoClient for NativeClient {
    fn name(&self) -> &str {
        ClientKind::Native.name()
    }

    fn version(&self) -> &str {
        VERSION
    }

    fn is_runtime_agnostic(&self) -> bool {
        true
    }

    async fn measure(
        &self,
        target: &Target,
        config: &MeasurementConfig,
    ) -> Result<u64, BenchError> {
        let path = self.path.display().to_string();
        let arguments = Self::arguments(target, config);
        if config.warmup_cycles > 0 {
            debug!("{path} has no warmup phase, ignoring {} warmup cycles", config.warmup_cycles);
        }
        info!("Spawning native client: {path} {}", arguments.join(" "));

        let output = Command::new(&self.path)
            .args(&arguments)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| BenchError::NativeClientFailed {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(BenchError::NativeClientFailed {
                path,
                reason: format!(
                    "exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        parse_native_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Extracts the rate from the first `label:value` line, e.g. `ssl client:12345`.
pub fn parse_native_output(stdout: &str) -> Result<u64, BenchError> {
    let line = stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| BenchError::InvalidNativeOutput(stdout.to_owned()))?;

    let (_, value) = line
        .split_once(':')
        .ok_or_else(|| BenchError::InvalidNativeOutput(stdout.to_owned()))?;

    value
        .trim()
        .parse::<u64>()
        .map_err(|_| BenchError::InvalidNativeOutput(stdout.to_owned()))
}
