use serde::{Deserialize, Serialize};
use sysinfo::System;

/// Machine the client side of the benchmark ran on.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct HostInfo {
    pub hostname: String,
    pub cpu_name: String,
    pub cpu_cores: usize,
    pub total_memory_mb: u64,
    pub os: String,
}

impl HostInfo {
    pub fn collect() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();

        let cpu_name = sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| String::from("unknown"));
        let os = format!(
            "{} {}",
            System::name().unwrap_or_else(|| String::from("unknown")),
            System::kernel_version().unwrap_or_default()
        );

        Self {
            hostname: System::host_name().unwrap_or_else(|| String::from("unknown")),
            cpu_name,
            cpu_cores: sys.cpus().len(),
            total_memory_mb: sys.total_memory() / 1024 / 1024,
            os: os.trim().to_string(),
        }
    }

    pub fn summary(&self) -> String {
        format!("{}, {} cores, {}", self.cpu_name, self.cpu_cores, self.os)
    }
}
