use super::{runtime_flavor::RuntimeFlavor, transport::BenchmarkTransport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct BenchmarkParams {
    pub host: String,
    pub tcp_port: u16,
    pub tls_port: u16,
    pub message_size: u32,
    pub duration_secs: u64,
    pub warmup_cycles: u64,
    pub clients: Vec<String>,
    pub transports: Vec<BenchmarkTransport>,
    pub flavors: Vec<RuntimeFlavor>,
    pub bench_command: String,
}

impl BenchmarkParams {
    pub fn format_flavors(&self) -> String {
        self.flavors
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn format_transports(&self) -> String {
        self.transports
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// File name stem shared by every artifact of a run, keyed by message size.
    pub fn artifact_stem(&self) -> String {
        format!("benchmark-{}", self.message_size)
    }
}
