use crate::args::common::WsBenchArgs;
use crate::error::BenchError;
use crate::measurement::MeasurementConfig;
use crate::target::Target;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use tungstenite::protocol::WebSocketConfig;

pub mod native;
pub mod tokio_tungstenite_client;
pub mod tungstenite_client;

/// One WebSocket client library behind the echo round-trip measurement.
///
/// Implementations open exactly one connection to the target, keep a single
/// request in flight, reuse `config.payload` for every send and account
/// replies the way `RoundTripMeter` does, so results are comparable across
/// libraries.
#[async_trait]
pub trait EchoClient: Send + Sync {
    /// Display name, also the results table row key.
    fn name(&self) -> &str;

    /// Version of the library under test, used for labels only.
    fn version(&self) -> &str;

    /// Clients that do not run on the tokio scheduler are measured once per
    /// target and their result is shared by every runtime flavor column.
    fn is_runtime_agnostic(&self) -> bool {
        false
    }

    /// Returns requests per second.
    async fn measure(&self, target: &Target, config: &MeasurementConfig)
        -> Result<u64, BenchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientKind {
    TokioTungstenite,
    Tungstenite,
    Native,
}

impl ClientKind {
    pub fn name(&self) -> &'static str {
        match self {
            ClientKind::TokioTungstenite => "tokio-tungstenite",
            ClientKind::Tungstenite => "tungstenite",
            ClientKind::Native => "native",
        }
    }
}

impl fmt::Display for ClientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClientKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tokio-tungstenite" | "tokio_tungstenite" => Ok(ClientKind::TokioTungstenite),
            "tungstenite" => Ok(ClientKind::Tungstenite),
            "native" | "beast" => Ok(ClientKind::Native),
            other => Err(format!(
                "Unknown client: '{other}', expected one of: tokio-tungstenite, tungstenite, native"
            )),
        }
    }
}

/// No inbound message or frame caps, the echo payload size is up to the user.
pub(crate) fn unlimited_websocket_config() -> WebSocketConfig {
    WebSocketConfig::default()
        .max_message_size(None)
        .max_frame_size(None)
}

pub fn create_client(kind: ClientKind, args: &WsBenchArgs) -> Box<dyn EchoClient> {
    match kind {
        ClientKind::TokioTungstenite => Box::new(tokio_tungstenite_client::TokioTungsteniteClient),
        ClientKind::Tungstenite => Box::new(tungstenite_client::TungsteniteClient),
        ClientKind::Native => Box::new(native::NativeClient::new(
            args.native_client_path.clone(),
            args.native_client_workdir.clone(),
        )),
    }
}

pub fn create_clients(args: &WsBenchArgs) -> Vec<Box<dyn EchoClient>> {
    args.clients
        .iter()
        .map(|kind| create_client(*kind, args))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_client_kinds() {
        assert_eq!(
            ClientKind::from_str("Tokio_Tungstenite").unwrap(),
            ClientKind::TokioTungstenite
        );
        assert_eq!(ClientKind::from_str("beast").unwrap(), ClientKind::Native);
        assert!(ClientKind::from_str("aiohttp").is_err());
    }
}
