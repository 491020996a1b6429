mod common;

use async_trait::async_trait;
use common::{args, closed_port, EchoServer};
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use ws_bench::benchmark_runner::BenchmarkRunner;
use ws_bench::clients::tokio_tungstenite_client::TokioTungsteniteClient;
use ws_bench::clients::tungstenite_client::TungsteniteClient;
use ws_bench::clients::EchoClient;
use ws_bench::error::BenchError;
use ws_bench::measurement::MeasurementConfig;
use ws_bench::target::Target;
use ws_bench_report::results_table::ResultsColumn;
use ws_bench_report::runtime_flavor::RuntimeFlavor;
use ws_bench_report::transport::BenchmarkTransport;

struct FixedRateClient {
    name: &'static str,
    rate: u64,
    runtime_agnostic: bool,
    calls: Arc<AtomicU64>,
}

impl FixedRateClient {
    fn boxed(name: &'static str, rate: u64, runtime_agnostic: bool) -> Box<dyn EchoClient> {
        Box::new(Self {
            name,
            rate,
            runtime_agnostic,
            calls: Arc::default(),
        })
    }
}

#[async_trait]
impl EchoClient for FixedRateClient {
    fn name(&self) -> &str {
        self.name
    }

    fn version(&self) -> &str {
        "1.0"
    }

    fn is_runtime_agnostic(&self) -> bool {
        self.runtime_agnostic
    }

    async fn measure(&self, _: &Target, _: &MeasurementConfig) -> Result<u64, BenchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rate + call)
    }
}

fn column(transport: BenchmarkTransport, flavor: RuntimeFlavor) -> ResultsColumn {
    ResultsColumn::new(transport, flavor)
}

#[test]
fn plain_tokio_tungstenite_should_measure_positive_rate() {
    let server = EchoServer::plain();
    let port = server.port().to_string();
    let args = args(&[
        "--tcp-port",
        &port,
        "--skip-tls",
        "--clients",
        "tokio-tungstenite",
        "--flavors",
        "current-thread",
    ]);

    let report = BenchmarkRunner::new(args).run().unwrap();

    let results = &report.results;
    assert_eq!(
        results.columns,
        vec![column(BenchmarkTransport::Tcp, RuntimeFlavor::CurrentThread)]
    );
    assert_eq!(results.rows.len(), 1);
    assert_eq!(results.rows[0].label(), "tokio-tungstenite-0.26");
    assert!(results.rows[0].values[0].unwrap() > 0);
}

#[test]
fn tls_clients_should_fill_every_flavor_column() {
    let server = EchoServer::tls();
    let port = server.port().to_string();
    let args = args(&[
        "--tls-port",
        &port,
        "--skip-tcp",
        "--clients",
        "tokio-tungstenite,tungstenite",
        "--flavors",
        "current-thread,multi-thread",
    ]);

    let report = BenchmarkRunner::new(args).run().unwrap();

    let results = &report.results;
    let current = column(BenchmarkTransport::Tls, RuntimeFlavor::CurrentThread);
    let multi = column(BenchmarkTransport::Tls, RuntimeFlavor::MultiThread);
    assert_eq!(results.columns, vec![current, multi]);
    assert!(results.get("tokio-tungstenite", &current).unwrap() > 0);
    assert!(results.get("tokio-tungstenite", &multi).unwrap() > 0);

    let blocking = results.get("tungstenite", &current).unwrap();
    assert!(blocking > 0);
    assert_eq!(results.get("tungstenite", &multi), Some(blocking));
}

#[test]
fn refused_connection_should_abort_the_run() {
    let port = closed_port().to_string();
    let args = args(&[
        "--tcp-port",
        &port,
        "--skip-tls",
        "--clients",
        "tokio-tungstenite",
        "--flavors",
        "current-thread",
    ]);

    let result = BenchmarkRunner::new(args).run();

    assert!(matches!(result, Err(BenchError::Connection { .. })));
}

fn early_close_config(warmup_cycles: u64) -> MeasurementConfig {
    MeasurementConfig::with_random_payload(64, NonZeroU64::new(5).unwrap(), warmup_cycles)
}

#[tokio::test]
async fn peer_close_after_counted_cycles_should_yield_partial_rate() {
    let server = EchoServer::closing_after(50);
    let target = Target::plain("127.0.0.1", server.port());
    let config = early_close_config(0);

    let async_rate = TokioTungsteniteClient.measure(&target, &config).await.unwrap();
    let blocking_rate = TungsteniteClient.measure(&target, &config).await.unwrap();

    assert_eq!(async_rate, 10);
    assert_eq!(blocking_rate, 10);
}

#[tokio::test]
async fn peer_close_during_warmup_should_be_a_connection_error() {
    let server = EchoServer::closing_after(50);
    let target = Target::plain("127.0.0.1", server.port());
    let config = early_close_config(100);

    let async_result = TokioTungsteniteClient.measure(&target, &config).await;
    let blocking_result = TungsteniteClient.measure(&target, &config).await;

    assert!(matches!(async_result, Err(BenchError::Connection { .. })));
    assert!(matches!(blocking_result, Err(BenchError::Connection { .. })));
}

#[test]
fn rows_should_follow_client_order() {
    let args = args(&["--skip-tls", "--flavors", "multi-thread,current-thread"]);
    let clients = vec![
        FixedRateClient::boxed("zeta", 10, false),
        FixedRateClient::boxed("alpha", 20, false),
    ];

    let report = BenchmarkRunner::with_clients(args, clients).run().unwrap();

    let results = &report.results;
    let labels = results.rows.iter().map(|r| r.label()).collect::<Vec<_>>();
    assert_eq!(labels, vec!["zeta-1.0", "alpha-1.0"]);
    assert_eq!(
        results.column_names(),
        vec!["tcp-multi-thread", "tcp-current-thread"]
    );
    assert_eq!(results.rows[0].values, vec![Some(10), Some(11)]);
    assert_eq!(results.rows[1].values, vec![Some(20), Some(21)]);
}

#[test]
fn runtime_agnostic_client_should_run_once_per_target() {
    let calls = Arc::new(AtomicU64::new(0));
    let client = Box::new(FixedRateClient {
        name: "blocking",
        rate: 100,
        runtime_agnostic: true,
        calls: calls.clone(),
    });
    let args = args(&[]);

    let report = BenchmarkRunner::with_clients(args, vec![client])
        .run()
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    let results = &report.results;
    assert_eq!(
        results.column_names(),
        vec![
            "tls-current-thread",
            "tls-multi-thread",
            "tcp-current-thread",
            "tcp-multi-thread"
        ]
    );
    assert_eq!(
        results.rows[0].values,
        vec![Some(100), Some(100), Some(101), Some(101)]
    );
}

#[test]
fn save_mode_should_write_artifacts_to_results_dir() {
    let dir = tempfile::tempdir().unwrap();
    let results_dir = dir.path().join("out");
    let args = args(&[
        "--skip-tls",
        "--msg-size",
        "64",
        "--flavors",
        "current-thread",
        "--save-plot",
        "--results-dir",
        results_dir.to_str().unwrap(),
    ]);
    let mut runner =
        BenchmarkRunner::with_clients(args, vec![FixedRateClient::boxed("fake", 7, false)]);

    let report = runner.run().unwrap();
    runner.publish(&report).unwrap();

    let csv = std::fs::read_to_string(results_dir.join("benchmark-64.csv")).unwrap();
    assert_eq!(csv, "client,version,tcp-current-thread\nfake,1.0,7\n");
    assert!(results_dir.join("benchmark-64.json").exists());
}

#[test]
fn profile_mode_should_skip_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let results_dir = dir.path().join("out");
    let args = args(&[
        "--skip-tcp",
        "--profile",
        "--save-plot",
        "--results-dir",
        results_dir.to_str().unwrap(),
    ]);
    let mut runner =
        BenchmarkRunner::with_clients(args, vec![FixedRateClient::boxed("fake", 7, false)]);

    let report = runner.run().unwrap();
    runner.publish(&report).unwrap();

    assert!(!results_dir.exists());
}

/// Scripts are all written before the first child process is spawned.
#[cfg(unix)]
#[test]
fn native_client_should_report_rate_printed_by_binary_and_fail_on_error_exit() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let write_script = |name: &str, body: &str| {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_str().unwrap().to_owned()
    };
    // Echoes the message size argument back as the rate.
    let echoing = write_script("ws_echo_client", "#!/bin/sh\necho \"plain client:$5\"\n");
    let failing = write_script("broken_client", "#!/bin/sh\necho 'connect failed' >&2\nexit 3\n");
    let workdir = dir.path().to_str().unwrap().to_owned();

    let echoing_args = args(&[
        "--skip-tls",
        "--msg-size",
        "321",
        "--clients",
        "native",
        "--native-client-path",
        &echoing,
        "--native-client-workdir",
        &workdir,
    ]);
    let report = BenchmarkRunner::new(echoing_args).run().unwrap();

    assert_eq!(report.results.rows[0].label(), "native-beast-1.90");
    assert_eq!(report.results.rows[0].values, vec![Some(321), Some(321)]);

    let failing_args = args(&[
        "--skip-tls",
        "--clients",
        "native",
        "--native-client-path",
        &failing,
    ]);
    let result = BenchmarkRunner::new(failing_args).run();

    assert!(matches!(result, Err(BenchError::NativeClientFailed { .. })));
}
