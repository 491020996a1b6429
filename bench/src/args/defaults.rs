use std::num::NonZeroU64;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_TCP_PORT: u16 = 9001;
pub const DEFAULT_TLS_PORT: u16 = 9002;

pub const DEFAULT_MESSAGE_SIZE: u32 = 256;
pub const DEFAULT_DURATION_SECS: NonZeroU64 = nonzero_lit::u64!(5);
pub const DEFAULT_WARMUP_CYCLES: u64 = 100;

pub const DEFAULT_CLIENTS: &str = "tokio-tungstenite,tungstenite,native";
pub const DEFAULT_FLAVORS: &str = "current-thread,multi-thread";

pub const DEFAULT_RESULTS_DIR: &str = "results";
pub const DEFAULT_NATIVE_CLIENT_PATH: &str = "build/src/ws_echo_client";
pub const DEFAULT_NATIVE_CLIENT_WORKDIR: &str = ".";
