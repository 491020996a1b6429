use human_repr::{HumanCount, HumanDuration};
use std::time::{Duration, Instant};
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileEntry {
    pub label: String,
    pub wall_time: Duration,
    /// Process CPU usage since the previous sample, 100% per fully used core
    pub cpu_usage_percent: f32,
    pub memory_bytes: u64,
}

/// Wall time and process resource usage of every client invocation of a run.
pub struct RunProfiler {
    system: System,
    pid: Option<Pid>,
    started_at: Instant,
    entries: Vec<ProfileEntry>,
}

impl RunProfiler {
    pub fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                warn!("Cannot resolve own pid, process usage will not be profiled: {e}");
                None
            }
        };
        let mut profiler = Self {
            system: System::new(),
            pid,
            started_at: Instant::now(),
            entries: Vec::new(),
        };
        profiler.sample();
        profiler
    }

    pub fn record(&mut self, label: String, wall_time: Duration) {
        let (cpu_usage_percent, memory_bytes) = self.sample();
        self.entries.push(ProfileEntry {
            label,
            wall_time,
            cpu_usage_percent,
            memory_bytes,
        });
    }

    pub fn entries(&self) -> &[ProfileEntry] {
        &self.entries
    }

    pub fn print_stats(&self) {
        info!(
            "Profile of {} client invocations, total wall time: {}",
            self.entries.len(),
            self.started_at.elapsed().human_duration()
        );
        for entry in &self.entries {
            info!(
                "{}: wall time {}, cpu {:.1}%, memory {}",
                entry.label,
                entry.wall_time.human_duration(),
                entry.cpu_usage_percent,
                entry.memory_bytes.human_count_bytes()
            );
        }
    }

    fn sample(&mut self) -> (f32, u64) {
        let Some(pid) = self.pid else {
            return (0.0, 0);
        };
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );
        self.system
            .process(pid)
            .map(|p| (p.cpu_usage(), p.memory()))
            .unwrap_or((0.0, 0))
    }
}

impl Default for RunProfiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_should_keep_invocation_order() {
        let mut profiler = RunProfiler::new();
        profiler.record("first".to_owned(), Duration::from_millis(5));
        profiler.record("second".to_owned(), Duration::from_millis(7));

        let labels = profiler
            .entries()
            .iter()
            .map(|e| e.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["first", "second"]);
        assert_eq!(profiler.entries()[1].wall_time, Duration::from_millis(7));
        assert!(profiler.entries()[0].memory_bytes > 0);
    }
}
