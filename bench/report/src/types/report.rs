use super::host_info::HostInfo;
use super::params::BenchmarkParams;
use super::results_table::ResultsTable;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct BenchmarkReport {
    /// Benchmark unique identifier
    pub uuid: Uuid,

    /// Timestamp when the benchmark was finished
    pub timestamp: String,

    /// Machine running the clients
    pub host: HostInfo,

    /// Benchmark parameters
    pub params: BenchmarkParams,

    /// Requests per second per client and transport/flavor column
    pub results: ResultsTable,
}

impl BenchmarkReport {
    pub fn new(host: HostInfo, params: BenchmarkParams, results: ResultsTable) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            host,
            params,
            results,
        }
    }

    pub fn dump_to_json(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let report_json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, report_json)
    }
}
