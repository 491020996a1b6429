use crate::args::common::WsBenchArgs;
use crate::error::BenchError;
use crate::utils::tls::create_insecure_client_config;
use rustls::ClientConfig;
use std::fmt;
use std::sync::Arc;
use ws_bench_report::transport::BenchmarkTransport;

/// Where a client connects: one per transport per run, immutable.
#[derive(Clone)]
pub struct Target {
    host: String,
    port: u16,
    tls: Option<Arc<ClientConfig>>,
}

impl Target {
    pub fn plain(host: &str, port: u16) -> Self {
        Self {
            host: host.to_owned(),
            port,
            tls: None,
        }
    }

    pub fn tls(host: &str, port: u16, config: Arc<ClientConfig>) -> Self {
        Self {
            host: host.to_owned(),
            port,
            tls: Some(config),
        }
    }

    pub fn transport(&self) -> BenchmarkTransport {
        match self.tls {
            Some(_) => BenchmarkTransport::Tls,
            None => BenchmarkTransport::Tcp,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn tls_config(&self) -> Option<&Arc<ClientConfig>> {
        self.tls.as_ref()
    }

    pub fn url(&self) -> String {
        let host = if self.host.contains(':') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        format!("{}://{}:{}/", self.transport().scheme(), host, self.port)
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("transport", &self.transport())
            .field("url", &self.url())
            .finish()
    }
}

/// TLS target first, then plain, skipping the disabled ones.
pub fn create_targets(args: &WsBenchArgs) -> Result<Vec<Target>, BenchError> {
    let mut targets = Vec::with_capacity(2);
    if !args.skip_tls {
        let config = create_insecure_client_config()?;
        targets.push(Target::tls(&args.host, args.tls_port, config));
    }
    if !args.skip_tcp {
        targets.push(Target::plain(&args.host, args.tcp_port));
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_should_follow_transport() {
        assert_eq!(Target::plain("127.0.0.1", 9001).url(), "ws://127.0.0.1:9001/");
        let config = create_insecure_client_config().unwrap();
        let tls = Target::tls("localhost", 9002, config);
        assert_eq!(tls.url(), "wss://localhost:9002/");
        assert_eq!(tls.transport(), BenchmarkTransport::Tls);
    }

    #[test]
    fn url_should_bracket_ipv6_hosts() {
        assert_eq!(Target::plain("::1", 9001).url(), "ws://[::1]:9001/");
    }
}
