use super::{unlimited_websocket_config, ClientKind, EchoClient};
use crate::error::BenchError;
use crate::measurement::{MeasurementConfig, MeterState, RoundTripMeter};
use crate::target::Target;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async_tls_with_config, Connector};
use tracing::{debug, warn};

const VERSION: &str = "0.26";

/// Async client driven by whichever tokio runtime flavor the driver provides.
#[derive(Debug, Default)]
pub struct TokioTungsteniteClient;

#[async_trait]
impl EchoClient for TokioTungsteniteClient {
    fn name(&self) -> &str {
        ClientKind::TokioTungstenite.name()
    }

    fn version(&self) -> &str {
        VERSION
    }

    async fn measure(
        &self,
        target: &Target,
        config: &MeasurementConfig,
    ) -> Result<u64, BenchError> {
        let url = target.url();
        let connector = match target.tls_config() {
            Some(tls) => Connector::Rustls(tls.clone()),
            None => Connector::Plain,
        };
        let (mut ws, _) = connect_async_tls_with_config(
            url.as_str(),
            Some(unlimited_websocket_config()),
            true,
            Some(connector),
        )
        .await
        .map_err(|e| BenchError::connection(&url, e))?;
        debug!("{} connected to {url}", self.name());

        let mut meter = RoundTripMeter::from_config(config);
        meter.start();
        if let Err(e) = ws.send(Message::Binary(config.payload.clone())).await {
            return meter.interrupted(&url, e);
        }

        loop {
            let reason = match ws.next().await {
                Some(Ok(Message::Binary(_) | Message::Text(_))) => match meter.on_reply() {
                    MeterState::Finished(rps) => {
                        if let Err(e) = ws.close(None).await {
                            debug!("{} could not close {url}: {e}", self.name());
                        }
                        while let Some(Ok(_)) = ws.next().await {}
                        return Ok(rps);
                    }
                    MeterState::WarmingUp | MeterState::Measuring => {
                        match ws.send(Message::Binary(config.payload.clone())).await {
                            Ok(()) => continue,
                            Err(e) => e.to_string(),
                        }
                    }
                },
                Some(Ok(Message::Close(frame))) => format!("closed by peer ({frame:?})"),
                Some(Ok(_)) => continue,
                Some(Err(e)) => e.to_string(),
                None => "stream ended".to_owned(),
            };

            warn!(
                "{} loop to {url} ended early after {} counted cycles: {reason}",
                self.name(),
                meter.counted_cycles()
            );
            return meter.interrupted(&url, reason);
        }
    }
}
