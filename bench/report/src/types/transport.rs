use derive_more::derive::Display;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, Default, Hash, PartialOrd, Ord,
)]
pub enum BenchmarkTransport {
    #[default]
    #[display("tcp")]
    #[serde(rename = "tcp")]
    Tcp,
    #[display("tls")]
    #[serde(rename = "tls")]
    Tls,
}

impl BenchmarkTransport {
    pub fn is_tls(&self) -> bool {
        matches!(self, BenchmarkTransport::Tls)
    }

    /// WebSocket URL scheme used to reach a listener of this transport.
    pub fn scheme(&self) -> &'static str {
        match self {
            BenchmarkTransport::Tcp => "ws",
            BenchmarkTransport::Tls => "wss",
        }
    }
}
