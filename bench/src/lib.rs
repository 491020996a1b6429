pub mod args;
pub mod benchmark_runner;
pub mod clients;
pub mod error;
pub mod measurement;
pub mod plot;
pub mod profiler;
pub mod runtime;
pub mod target;
pub mod utils;
