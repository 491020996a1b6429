use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};
use ws_bench::args::common::WsBenchArgs;
use ws_bench::benchmark_runner::BenchmarkRunner;
use ws_bench::error::BenchError;

fn main() -> Result<(), BenchError> {
    let args = WsBenchArgs::parse();

    Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("INFO")))
        .init();

    args.validate();

    let mut runner = BenchmarkRunner::new(args);
    let report = runner.run().inspect_err(|e| error!("Benchmark failed: {e}"))?;
    runner
        .publish(&report)
        .inspect_err(|e| error!("Cannot publish results: {e}"))?;

    info!("Finished the benchmarks.");
    Ok(())
}
