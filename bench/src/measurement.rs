use crate::error::BenchError;
use bytes::Bytes;
use rand::RngCore;
use std::num::NonZeroU64;
use std::time::{Duration, Instant};

/// Immutable inputs shared by every client invocation of a run.
#[derive(Debug, Clone)]
pub struct MeasurementConfig {
    /// Sent as-is on every cycle, never regenerated.
    pub payload: Bytes,
    pub duration_secs: NonZeroU64,
    pub warmup_cycles: u64,
}

impl MeasurementConfig {
    pub fn new(payload: Bytes, duration_secs: NonZeroU64, warmup_cycles: u64) -> Self {
        Self {
            payload,
            duration_secs,
            warmup_cycles,
        }
    }

    /// Config with a fresh random payload of `message_size` bytes.
    pub fn with_random_payload(
        message_size: u32,
        duration_secs: NonZeroU64,
        warmup_cycles: u64,
    ) -> Self {
        let mut payload = vec![0u8; message_size as usize];
        rand::thread_rng().fill_bytes(&mut payload);
        Self::new(Bytes::from(payload), duration_secs, warmup_cycles)
    }

    pub fn message_size(&self) -> usize {
        self.payload.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterState {
    /// Reply consumed by warmup, send the next request.
    WarmingUp,
    /// Reply counted, send the next request.
    Measuring,
    /// Duration elapsed, stop sending and report this rate.
    Finished(u64),
}

/// Echo round-trip accounting shared by every in-process client.
///
/// The first `warmup_cycles` replies neither count nor start the clock. The
/// clock starts when the last warmup reply arrives, or on `start` if there is
/// no warmup. Each later reply is counted; once the clock reaches the
/// configured duration the meter finishes with `counted / duration`, floored.
#[derive(Debug)]
pub struct RoundTripMeter {
    duration: Duration,
    duration_secs: u64,
    warmup_left: u64,
    started_at: Option<Instant>,
    counted_cycles: u64,
}

impl RoundTripMeter {
    pub fn new(duration_secs: NonZeroU64, warmup_cycles: u64) -> Self {
        Self {
            duration: Duration::from_secs(duration_secs.get()),
            duration_secs: duration_secs.get(),
            warmup_left: warmup_cycles,
            started_at: None,
            counted_cycles: 0,
        }
    }

    pub fn from_config(config: &MeasurementConfig) -> Self {
        Self::new(config.duration_secs, config.warmup_cycles)
    }

    /// Call once the connection is established, right before the first send.
    pub fn start(&mut self) {
        self.start_at(Instant::now())
    }

    pub fn on_reply(&mut self) -> MeterState {
        self.on_reply_at(Instant::now())
    }

    pub(crate) fn start_at(&mut self, now: Instant) {
        if self.warmup_left == 0 && self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub(crate) fn on_reply_at(&mut self, now: Instant) -> MeterState {
        if self.warmup_left > 0 {
            self.warmup_left -= 1;
            if self.warmup_left == 0 {
                self.started_at = Some(now);
            }
            return MeterState::WarmingUp;
        }

        let started_at = *self.started_at.get_or_insert(now);
        self.counted_cycles += 1;
        if now.duration_since(started_at) >= self.duration {
            return MeterState::Finished(self.rate());
        }
        MeterState::Measuring
    }

    pub fn counted_cycles(&self) -> u64 {
        self.counted_cycles
    }

    /// Requests per second over the configured duration, truncated.
    pub fn rate(&self) -> u64 {
        self.counted_cycles / self.duration_secs
    }

    /// The loop ended before the duration elapsed (peer close, protocol error).
    /// Whatever was counted is still reported, unless nothing was.
    pub fn interrupted(&self, url: &str, reason: impl ToString) -> Result<u64, BenchError> {
        if self.counted_cycles == 0 {
            return Err(BenchError::connection(
                url,
                format!(
                    "connection ended before any round trip was measured: {}",
                    reason.to_string()
                ),
            ));
        }
        Ok(self.rate())
    }
}
