use std::sync::atomic::{AtomicU64, Ordering};

use super::Error;

/// Track FCP engine counters without external dependencies.
pub(crate) struct Metrics;

static FED_BYTES: AtomicU64 = AtomicU64::new(0);
static ENCODED_FRAMES: AtomicU64 = AtomicU64::new(0);
static DECODED_FRAMES: AtomicU64 = AtomicU64::new(0);
static REJECTED_FRAMES: AtomicU64 = AtomicU64::new(0);
static SKIPPED_BYTES: AtomicU64 = AtomicU64::new(0);

struct RejectionCounters {
    bad_header: AtomicU64,
    bad_tail: AtomicU64,
    crc_mismatch: AtomicU64,
    length_mismatch: AtomicU64,
    truncated_payload: AtomicU64,
}

static REJECTION_COUNTERS: RejectionCounters = RejectionCounters::new();

impl RejectionCounters {
    const fn new() -> Self {
        Self {
            bad_header: AtomicU64::new(0),
            bad_tail: AtomicU64::new(0),
            crc_mismatch: AtomicU64::new(0),
            length_mismatch: AtomicU64::new(0),
            truncated_payload: AtomicU64::new(0),
        }
    }

    fn increment(&self, reason: &Error) {
        match reason {
            Error::BadHeader { .. } => self.bad_header.fetch_add(1, Ordering::Relaxed),
            Error::BadTail { .. } => self.bad_tail.fetch_add(1, Ordering::Relaxed),
            Error::CrcMismatch { .. } => self.crc_mismatch.fetch_add(1, Ordering::Relaxed),
            Error::LengthMismatch { .. } | Error::BufferTooSmall { .. } => {
                self.length_mismatch.fetch_add(1, Ordering::Relaxed)
            }
            Error::TruncatedPayload { .. } => {
                self.truncated_payload.fetch_add(1, Ordering::Relaxed)
            }
            // encode-side errors never reach the rejection path
            Error::PayloadTooLarge { .. } | Error::PayloadMismatch { .. } => 0,
        };
    }
}

impl Metrics {
    #[inline]
    pub(crate) fn record_fed(bytes: usize) {
        FED_BYTES.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_encoded() {
        ENCODED_FRAMES.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_decoded() {
        DECODED_FRAMES.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_rejected(reason: &Error) {
        REJECTED_FRAMES.fetch_add(1, Ordering::Relaxed);
        REJECTION_COUNTERS.increment(reason);
    }

    #[inline]
    pub(crate) fn record_skipped(bytes: usize) {
        SKIPPED_BYTES.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn totals() -> MetricsSnapshot {
        MetricsSnapshot {
            fed_bytes: FED_BYTES.load(Ordering::Relaxed),
            encoded_frames: ENCODED_FRAMES.load(Ordering::Relaxed),
            decoded_frames: DECODED_FRAMES.load(Ordering::Relaxed),
            rejected_frames: REJECTED_FRAMES.load(Ordering::Relaxed),
            skipped_bytes: SKIPPED_BYTES.load(Ordering::Relaxed),
            rejected_bad_header: REJECTION_COUNTERS.bad_header.load(Ordering::Relaxed),
            rejected_bad_tail: REJECTION_COUNTERS.bad_tail.load(Ordering::Relaxed),
            rejected_crc: REJECTION_COUNTERS.crc_mismatch.load(Ordering::Relaxed),
            rejected_length: REJECTION_COUNTERS.length_mismatch.load(Ordering::Relaxed),
            rejected_truncated: REJECTION_COUNTERS.truncated_payload.load(Ordering::Relaxed),
        }
    }
}

/// Lightweight snapshot of engine counters.
///
/// Counters are process-global and cumulative across all [`crate::Link`]
/// instances; capture two snapshots and diff them to observe an interval.
#[derive(Default, Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    /// Total bytes handed to `feed`
    pub fed_bytes: u64,
    /// Frames successfully encoded
    pub encoded_frames: u64,
    /// Frames decoded into packets
    pub decoded_frames: u64,
    /// Frames rejected on the receive path
    pub rejected_frames: u64,
    /// Noise bytes discarded while scanning for a frame header
    pub skipped_bytes: u64,
    /// Rejections: header marker absent
    pub rejected_bad_header: u64,
    /// Rejections: tail marker absent
    pub rejected_bad_tail: u64,
    /// Rejections: checksum mismatch
    pub rejected_crc: u64,
    /// Rejections: declared length inconsistent
    pub rejected_length: u64,
    /// Rejections: payload shorter than its kind's layout
    pub rejected_truncated: u64,
}

impl MetricsSnapshot {
    /// Capture the current counter values.
    #[must_use]
    pub fn capture() -> Self {
        Metrics::totals()
    }

    /// Fraction of resolved frames that were rejected, if any resolved.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rejection_rate(&self) -> Option<f64> {
        let resolved = self.decoded_frames + self.rejected_frames;
        if resolved == 0 {
            return None;
        }

        Some(self.rejected_frames as f64 / resolved as f64)
    }
}
