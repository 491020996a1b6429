use clap::Parser;
use futures::{SinkExt, StreamExt};
use rcgen::CertifiedKey;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio_rustls::rustls::crypto::ring;
use tokio_rustls::rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio_rustls::rustls::ServerConfig;
use tokio_rustls::TlsAcceptor;
use tokio_tungstenite::tungstenite::Message;
use ws_bench::args::common::WsBenchArgs;

/// WebSocket echo server on a background thread, bound to an ephemeral port.
pub struct EchoServer {
    pub addr: SocketAddr,
}

impl EchoServer {
    pub fn plain() -> Self {
        Self::start(None, None)
    }

    /// Plain server that sends a close frame after echoing `echoes` messages.
    pub fn closing_after(echoes: u64) -> Self {
        Self::start(None, Some(echoes))
    }

    /// Self-signed certificate for `localhost`, clients are expected not to verify it.
    pub fn tls() -> Self {
        let CertifiedKey { cert, key_pair } =
            rcgen::generate_simple_self_signed(vec!["localhost".to_owned()]).unwrap();
        let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_pair.serialize_der()));
        let config = ServerConfig::builder_with_provider(Arc::new(ring::default_provider()))
            .with_safe_default_protocol_versions()
            .unwrap()
            .with_no_client_auth()
            .with_single_cert(vec![cert.der().clone()], key)
            .unwrap();
        Self::start(Some(TlsAcceptor::from(Arc::new(config))), None)
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    fn start(acceptor: Option<TlsAcceptor>, echo_limit: Option<u64>) -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = TcpListener::from_std(listener).unwrap();
                loop {
                    let Ok((stream, _)) = listener.accept().await else {
                        continue;
                    };
                    stream.set_nodelay(true).unwrap();
                    let acceptor = acceptor.clone();
                    tokio::spawn(async move {
                        match acceptor {
                            Some(acceptor) => {
                                if let Ok(stream) = acceptor.accept(stream).await {
                                    echo(stream, echo_limit).await;
                                }
                            }
                            None => echo(stream, echo_limit).await,
                        }
                    });
                }
            });
        });

        Self { addr }
    }
}

async fn echo<S: AsyncRead + AsyncWrite + Unpin>(stream: S, echo_limit: Option<u64>) {
    let Ok(mut ws) = tokio_tungstenite::accept_async(stream).await else {
        return;
    };
    let mut echoed = 0;
    while let Some(Ok(message)) = ws.next().await {
        match message {
            Message::Binary(_) | Message::Text(_) => {
                if echo_limit.is_some_and(|limit| echoed >= limit) {
                    if ws.close(None).await.is_err() {
                        return;
                    }
                    continue;
                }
                if ws.send(message).await.is_err() {
                    return;
                }
                echoed += 1;
            }
            _ => {}
        }
    }
}

/// Port nothing listens on.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

pub fn args(extra: &[&str]) -> WsBenchArgs {
    let base = [
        "ws-bench",
        "--host",
        "127.0.0.1",
        "--duration",
        "1",
        "--warmup-cycles",
        "10",
    ];
    WsBenchArgs::try_parse_from(base.iter().chain(extra.iter()).copied()).unwrap()
}
