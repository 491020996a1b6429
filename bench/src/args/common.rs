use super::defaults::*;
use crate::clients::ClientKind;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::collections::HashSet;
use std::num::{NonZeroU64, NonZeroUsize};
use std::path::{Path, PathBuf};
use ws_bench_report::params::BenchmarkParams;
use ws_bench_report::runtime_flavor::RuntimeFlavor;
use ws_bench_report::transport::BenchmarkTransport;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct WsBenchArgs {
    /// Echo server host
    #[arg(long, default_value_t = DEFAULT_HOST.to_owned())]
    pub host: String,

    /// Server port with plain tcp websockets
    #[arg(long, default_value_t = DEFAULT_TCP_PORT)]
    pub tcp_port: u16,

    /// Server port with tls websockets
    #[arg(long, visible_alias = "ssl-port", default_value_t = DEFAULT_TLS_PORT)]
    pub tls_port: u16,

    /// Message size in bytes
    #[arg(long, short = 's', default_value_t = DEFAULT_MESSAGE_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    pub msg_size: u32,

    /// Duration of every test in seconds
    #[arg(long, short = 'd', default_value_t = DEFAULT_DURATION_SECS)]
    pub duration: NonZeroU64,

    /// Echo round trips excluded from timing at the start of every test
    #[arg(long, short = 'w', default_value_t = DEFAULT_WARMUP_CYCLES)]
    pub warmup_cycles: u64,

    /// Comma separated list of clients
    #[arg(long, short = 'c', value_delimiter = ',', default_value = DEFAULT_CLIENTS)]
    pub clients: Vec<ClientKind>,

    /// Comma separated list of tokio runtime flavors
    #[arg(long, short = 'f', visible_alias = "loops", value_delimiter = ',', default_value = DEFAULT_FLAVORS)]
    pub flavors: Vec<RuntimeFlavor>,

    /// Worker threads of the multi-thread flavor, tokio decides if not provided
    #[arg(long)]
    pub worker_threads: Option<NonZeroUsize>,

    /// Disable plain tcp client test
    #[arg(long, default_value_t = false)]
    pub skip_tcp: bool,

    /// Disable tls client test
    #[arg(long, visible_alias = "skip-ssl", default_value_t = false)]
    pub skip_tls: bool,

    /// Disable plots
    #[arg(long, default_value_t = false, conflicts_with = "save_plot")]
    pub no_plot: bool,

    /// Save plot and results table to the results directory instead of showing them
    #[arg(long, default_value_t = false)]
    pub save_plot: bool,

    /// Directory for saved plots and results tables
    #[arg(long, default_value = DEFAULT_RESULTS_DIR)]
    pub results_dir: PathBuf,

    /// Native echo client executable
    #[arg(long, default_value = DEFAULT_NATIVE_CLIENT_PATH)]
    pub native_client_path: PathBuf,

    /// Working directory of the native echo client
    #[arg(long, default_value = DEFAULT_NATIVE_CLIENT_WORKDIR)]
    pub native_client_workdir: PathBuf,

    /// Enable profiling, print profile stats afterwards instead of plotting
    #[arg(long, default_value_t = false)]
    pub profile: bool,
}

impl WsBenchArgs {
    /// Exits with a usage error when the combination of arguments cannot produce a table.
    pub fn validate(&self) {
        if let Err((kind, message)) = self.check() {
            WsBenchArgs::command().error(kind, message).exit();
        }
    }

    fn check(&self) -> Result<(), (ErrorKind, String)> {
        if self.skip_tcp && self.skip_tls {
            return Err((
                ErrorKind::ArgumentConflict,
                "--skip-tcp and --skip-tls cannot be used together, nothing would be measured"
                    .to_owned(),
            ));
        }

        if self.clients.is_empty() {
            return Err((
                ErrorKind::ValueValidation,
                "at least one client is required".to_owned(),
            ));
        }

        if self.flavors.is_empty() {
            return Err((
                ErrorKind::ValueValidation,
                "at least one runtime flavor is required".to_owned(),
            ));
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = self.clients.iter().find(|c| !seen.insert(**c)) {
            return Err((
                ErrorKind::ValueValidation,
                format!("client '{duplicate}' is listed more than once"),
            ));
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = self.flavors.iter().find(|f| !seen.insert(**f)) {
            return Err((
                ErrorKind::ValueValidation,
                format!("runtime flavor '{duplicate}' is listed more than once"),
            ));
        }

        Ok(())
    }

    /// Transports in the order they are measured: tls first, then plain tcp.
    pub fn transports(&self) -> Vec<BenchmarkTransport> {
        let mut transports = Vec::with_capacity(2);
        if !self.skip_tls {
            transports.push(BenchmarkTransport::Tls);
        }
        if !self.skip_tcp {
            transports.push(BenchmarkTransport::Tcp);
        }
        transports
    }

    pub fn plot_enabled(&self) -> bool {
        !self.no_plot
    }
}

fn recreate_bench_command(args: &WsBenchArgs) -> String {
    let mut parts = vec!["ws-bench".to_string()];

    if args.host != DEFAULT_HOST {
        parts.push(format!("--host {}", args.host));
    }
    if args.tcp_port != DEFAULT_TCP_PORT {
        parts.push(format!("--tcp-port {}", args.tcp_port));
    }
    if args.tls_port != DEFAULT_TLS_PORT {
        parts.push(format!("--tls-port {}", args.tls_port));
    }
    if args.msg_size != DEFAULT_MESSAGE_SIZE {
        parts.push(format!("--msg-size {}", args.msg_size));
    }
    if args.duration != DEFAULT_DURATION_SECS {
        parts.push(format!("--duration {}", args.duration));
    }
    if args.warmup_cycles != DEFAULT_WARMUP_CYCLES {
        parts.push(format!("--warmup-cycles {}", args.warmup_cycles));
    }

    let clients = args
        .clients
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",");
    if clients != DEFAULT_CLIENTS {
        parts.push(format!("--clients {clients}"));
    }

    let flavors = args
        .flavors
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(",");
    if flavors != DEFAULT_FLAVORS {
        parts.push(format!("--flavors {flavors}"));
    }

    if let Some(worker_threads) = args.worker_threads {
        parts.push(format!("--worker-threads {worker_threads}"));
    }
    if args.skip_tcp {
        parts.push("--skip-tcp".to_string());
    }
    if args.skip_tls {
        parts.push("--skip-tls".to_string());
    }
    if args.no_plot {
        parts.push("--no-plot".to_string());
    }
    if args.save_plot {
        parts.push("--save-plot".to_string());
    }
    if args.results_dir != Path::new(DEFAULT_RESULTS_DIR) {
        parts.push(format!("--results-dir {}", args.results_dir.display()));
    }
    if args.native_client_path != Path::new(DEFAULT_NATIVE_CLIENT_PATH) {
        parts.push(format!(
            "--native-client-path {}",
            args.native_client_path.display()
        ));
    }
    if args.native_client_workdir != Path::new(DEFAULT_NATIVE_CLIENT_WORKDIR) {
        parts.push(format!(
            "--native-client-workdir {}",
            args.native_client_workdir.display()
        ));
    }
    if args.profile {
        parts.push("--profile".to_string());
    }

    parts.join(" ")
}

impl From<&WsBenchArgs> for BenchmarkParams {
    fn from(args: &WsBenchArgs) -> Self {
        BenchmarkParams {
            host: args.host.clone(),
            tcp_port: args.tcp_port,
            tls_port: args.tls_port,
            message_size: args.msg_size,
            duration_secs: args.duration.get(),
            warmup_cycles: args.warmup_cycles,
            clients: args.clients.iter().map(|c| c.to_string()).collect(),
            transports: args.transports(),
            flavors: args.flavors.clone(),
            bench_command: recreate_bench_command(args),
        }
    }
}
