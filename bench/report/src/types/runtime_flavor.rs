use derive_more::derive::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Scheduler the async clients are driven by, one benchmark column per flavor.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, Default, Hash, PartialOrd, Ord,
)]
pub enum RuntimeFlavor {
    #[default]
    #[display("current-thread")]
    #[serde(rename = "current_thread")]
    CurrentThread,
    #[display("multi-thread")]
    #[serde(rename = "multi_thread")]
    MultiThread,
}

impl FromStr for RuntimeFlavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "current-thread" | "current" | "ct" => Ok(RuntimeFlavor::CurrentThread),
            "multi-thread" | "multi" | "mt" => Ok(RuntimeFlavor::MultiThread),
            other => Err(format!(
                "Unknown runtime flavor: '{other}', expected 'current-thread' or 'multi-thread'"
            )),
        }
    }
}
