use crate::report::BenchmarkReport;

impl BenchmarkReport {
    /// Chart subtitle: runtime flavors, message size and the machine it ran on.
    pub fn subtext(&self) -> String {
        format!(
            "tokio runtime: {}, msg_size={}, duration={}s, warmup={} cycles\n{}",
            self.params.format_flavors(),
            self.params.message_size,
            self.params.duration_secs,
            self.params.warmup_cycles,
            self.host.summary()
        )
    }
}
