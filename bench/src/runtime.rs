use crate::error::BenchError;
use std::num::NonZeroUsize;
use tokio::runtime::{Builder, Runtime};
use ws_bench_report::runtime_flavor::RuntimeFlavor;

/// Fresh runtime for a single client invocation, dropped once it completes.
pub fn build_runtime(
    flavor: RuntimeFlavor,
    worker_threads: Option<NonZeroUsize>,
) -> Result<Runtime, BenchError> {
    let mut builder = match flavor {
        RuntimeFlavor::CurrentThread => Builder::new_current_thread(),
        RuntimeFlavor::MultiThread => {
            let mut builder = Builder::new_multi_thread();
            if let Some(worker_threads) = worker_threads {
                builder.worker_threads(worker_threads.get());
            }
            builder
        }
    };

    builder
        .enable_all()
        .thread_name(format!("ws-bench-{flavor}"))
        .build()
        .map_err(|source| BenchError::Runtime { flavor, source })
}
