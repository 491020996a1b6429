use crate::report::BenchmarkReport;

impl BenchmarkReport {
    pub fn title(&self) -> String {
        "Echo round-trip performance".to_owned()
    }
}
