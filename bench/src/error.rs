use thiserror::Error;
use ws_bench_report::results_table::ResultsTableError;
use ws_bench_report::runtime_flavor::RuntimeFlavor;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Cannot connect to {url}: {reason}")]
    Connection { url: String, reason: String },
    #[error("Invalid TLS configuration: {0}")]
    Tls(#[from] rustls::Error),
    #[error("Cannot build {flavor} runtime: {source}")]
    Runtime {
        flavor: RuntimeFlavor,
        source: std::io::Error,
    },
    #[error("Native client '{path}' failed: {reason}")]
    NativeClientFailed { path: String, reason: String },
    #[error("Invalid native client output: {0:?}")]
    InvalidNativeOutput(String),
    #[error("Blocking client task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
    #[error("Results table error: {0}")]
    ResultsTable(#[from] ResultsTableError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BenchError {
    pub fn connection(url: &str, reason: impl ToString) -> Self {
        BenchError::Connection {
            url: url.to_owned(),
            reason: reason.to_string(),
        }
    }
}
