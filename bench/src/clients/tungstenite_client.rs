use super::{unlimited_websocket_config, ClientKind, EchoClient};
use crate::error::BenchError;
use crate::measurement::{MeasurementConfig, MeterState, RoundTripMeter};
use crate::target::Target;
use async_trait::async_trait;
use std::io::{Read, Write};
use std::net::TcpStream;
use tracing::{debug, warn};
use tungstenite::{client_tls_with_config, Connector, Error, Message, WebSocket};

const VERSION: &str = "0.26";

/// Blocking client, measured on a dedicated thread outside the async scheduler.
#[derive(Debug, Default)]
pub struct TungsteniteClient;

#[async_trait]
impl EchoClient for TungsteniteClient {
    fn name(&self) -> &str {
        ClientKind::Tungstenite.name()
    }

    fn version(&self) -> &str {
        VERSION
    }

    fn is_runtime_agnostic(&self) -> bool {
        true
    }

    async fn measure(
        &self,
        target: &Target,
        config: &MeasurementConfig,
    ) -> Result<u64, BenchError> {
        let target = target.clone();
        let config = config.clone();
        tokio::task::spawn_blocking(move || measure_blocking(&target, &config)).await?
    }
}

fn measure_blocking(target: &Target, config: &MeasurementConfig) -> Result<u64, BenchError> {
    let url = target.url();
    let stream = TcpStream::connect((target.host(), target.port()))
        .map_err(|e| BenchError::connection(&url, e))?;
    stream
        .set_nodelay(true)
        .map_err(|e| BenchError::connection(&url, e))?;

    let connector = match target.tls_config() {
        Some(tls) => Connector::Rustls(tls.clone()),
        None => Connector::Plain,
    };
    let (mut ws, _) = client_tls_with_config(
        url.as_str(),
        stream,
        Some(unlimited_websocket_config()),
        Some(connector),
    )
    .map_err(|e| BenchError::connection(&url, e))?;
    debug!("{} connected to {url}", ClientKind::Tungstenite);

    let mut meter = RoundTripMeter::from_config(config);
    meter.start();
    if let Err(e) = ws.send(Message::Binary(config.payload.clone())) {
        return meter.interrupted(&url, e);
    }

    loop {
        let reason = match ws.read() {
            Ok(Message::Binary(_) | Message::Text(_)) => match meter.on_reply() {
                MeterState::Finished(rps) => {
                    close_gracefully(&mut ws, &url);
                    return Ok(rps);
                }
                MeterState::WarmingUp | MeterState::Measuring => {
                    match ws.send(Message::Binary(config.payload.clone())) {
                        Ok(()) => continue,
                        Err(e) => e.to_string(),
                    }
                }
            },
            Ok(Message::Close(frame)) => format!("closed by peer ({frame:?})"),
            Ok(_) => continue,
            Err(e) => e.to_string(),
        };

        warn!(
            "{} loop to {url} ended early after {} counted cycles: {reason}",
            ClientKind::Tungstenite,
            meter.counted_cycles()
        );
        return meter.interrupted(&url, reason);
    }
}

/// Sends a close frame and reads until the peer acknowledges it.
fn close_gracefully<S: Read + Write>(ws: &mut WebSocket<S>, url: &str) {
    if let Err(e) = ws.close(None) {
        debug!("{} could not close {url}: {e}", ClientKind::Tungstenite);
        return;
    }
    loop {
        match ws.read() {
            Ok(_) => continue,
            Err(Error::ConnectionClosed) => break,
            Err(e) => {
                debug!("{} close of {url} ended with: {e}", ClientKind::Tungstenite);
                break;
            }
        }
    }
}
