use crate::args::common::WsBenchArgs;
use crate::clients::{create_clients, EchoClient};
use crate::error::BenchError;
use crate::measurement::MeasurementConfig;
use crate::plot::{publish, PlotMode};
use crate::profiler::RunProfiler;
use crate::runtime::build_runtime;
use crate::target::{create_targets, Target};
use std::time::Instant;
use tracing::{info, warn};
use ws_bench_report::host_info::HostInfo;
use ws_bench_report::params::BenchmarkParams;
use ws_bench_report::report::BenchmarkReport;
use ws_bench_report::results_table::{ResultsColumn, ResultsTable};
use ws_bench_report::runtime_flavor::RuntimeFlavor;

pub struct BenchmarkRunner {
    args: WsBenchArgs,
    clients: Vec<Box<dyn EchoClient>>,
    profiler: Option<RunProfiler>,
}

impl BenchmarkRunner {
    pub fn new(args: WsBenchArgs) -> Self {
        let clients = create_clients(&args);
        Self::with_clients(args, clients)
    }

    /// Runner measuring the given clients in order instead of the ones named in `args`.
    pub fn with_clients(args: WsBenchArgs, clients: Vec<Box<dyn EchoClient>>) -> Self {
        let profiler = args.profile.then(RunProfiler::new);
        Self {
            args,
            clients,
            profiler,
        }
    }

    /// Measures every client against every target and runtime flavor.
    /// The first failing invocation aborts the run.
    pub fn run(&mut self) -> Result<BenchmarkReport, BenchError> {
        let targets = create_targets(&self.args)?;
        let mut results = ResultsTable::default();
        for client in &self.clients {
            results.add_client(client.name(), client.version())?;
        }

        info!(
            "Starting to benchmark {} client(s) against {}",
            self.clients.len(),
            targets
                .iter()
                .map(|t| t.url())
                .collect::<Vec<_>>()
                .join(", ")
        );

        for index in 0..self.clients.len() {
            for target in &targets {
                let config = MeasurementConfig::with_random_payload(
                    self.args.msg_size,
                    self.args.duration,
                    self.args.warmup_cycles,
                );
                if self.clients[index].is_runtime_agnostic() {
                    self.measure_once(index, target, &config, &mut results)?;
                } else {
                    for flavor in self.args.flavors.clone() {
                        self.measure_on(index, target, &config, flavor, &mut results)?;
                    }
                }
            }
        }

        results.validate_complete()?;
        info!("Benchmarking finished");

        let mut params = BenchmarkParams::from(&self.args);
        params.clients = self.clients.iter().map(|c| c.name().to_owned()).collect();
        Ok(BenchmarkReport::new(HostInfo::collect(), params, results))
    }

    /// Prints the summary, then profile stats or the chart, depending on the arguments.
    pub fn publish(&self, report: &BenchmarkReport) -> Result<(), BenchError> {
        report.print_summary();

        if let Some(profiler) = &self.profiler {
            profiler.print_stats();
            return Ok(());
        }

        if !self.args.plot_enabled() {
            return Ok(());
        }

        let mode = if self.args.save_plot {
            PlotMode::Save(self.args.results_dir.clone())
        } else {
            PlotMode::Display
        };
        publish(report, &mode)
    }

    fn measure_on(
        &mut self,
        index: usize,
        target: &Target,
        config: &MeasurementConfig,
        flavor: RuntimeFlavor,
        results: &mut ResultsTable,
    ) -> Result<(), BenchError> {
        let client = &self.clients[index];
        let transport = target.transport();
        info!(
            "Run {} {transport} {} bytes {flavor} test",
            client.name(),
            config.message_size()
        );

        let runtime = build_runtime(flavor, self.args.worker_threads)?;
        let started_at = Instant::now();
        let rps = runtime.block_on(client.measure(target, config))?;
        let elapsed = started_at.elapsed();
        drop(runtime);

        info!("{} {transport} {flavor}: {rps} request/second", client.name());
        results.insert(client.name(), ResultsColumn::new(transport, flavor), rps)?;

        let label = format!("{}-{transport}-{flavor}", client.name());
        if let Some(profiler) = self.profiler.as_mut() {
            profiler.record(label, elapsed);
        }
        Ok(())
    }

    /// A client that does not depend on the scheduler is driven by a
    /// current-thread runtime once, its rate fills every flavor column.
    fn measure_once(
        &mut self,
        index: usize,
        target: &Target,
        config: &MeasurementConfig,
        results: &mut ResultsTable,
    ) -> Result<(), BenchError> {
        let client = &self.clients[index];
        let transport = target.transport();
        info!(
            "Run {} {transport} {} bytes test",
            client.name(),
            config.message_size()
        );

        let runtime = build_runtime(RuntimeFlavor::CurrentThread, None)?;
        let started_at = Instant::now();
        let rps = runtime.block_on(client.measure(target, config))?;
        let elapsed = started_at.elapsed();
        drop(runtime);

        info!("{} {transport}: {rps} request/second", client.name());
        if self.args.flavors.len() > 1 {
            warn!(
                "{} does not run on the tokio scheduler, reusing its result for every runtime flavor",
                client.name()
            );
        }
        for flavor in &self.args.flavors {
            results.insert(client.name(), ResultsColumn::new(transport, *flavor), rps)?;
        }

        let label = format!("{}-{transport}", client.name());
        if let Some(profiler) = self.profiler.as_mut() {
            profiler.record(label, elapsed);
        }
        Ok(())
    }
}
