//! FCP error types

use thiserror::Error;

use super::types::PacketKind;

/// FCP protocol errors
///
/// Receive-side variants (`BadHeader` through `TruncatedPayload`) are
/// recoverable: the streaming layer reports them inside an outcome and
/// resynchronizes. Encode-side variants (`PayloadTooLarge`,
/// `PayloadMismatch`) propagate to the caller, which controls the
/// offending input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Frame does not start with the 0xAA header marker
    #[error("bad frame header: expected 0xAA, got {found:#04x}")]
    BadHeader {
        /// Byte found at the header position
        found: u8,
    },

    /// Frame does not end with the 0x55 tail marker
    #[error("bad frame tail: expected 0x55, got {found:#04x}")]
    BadTail {
        /// Byte found at the tail position
        found: u8,
    },

    /// Checksum verification failed
    #[error("crc mismatch: expected {expected:#06x}, got {found:#06x}")]
    CrcMismatch {
        /// Checksum recomputed over the received bytes
        expected: u16,
        /// Checksum transmitted in the frame
        found: u16,
    },

    /// Declared payload length inconsistent with the bytes supplied
    #[error("length mismatch: declared {declared} payload bytes, frame is {got} bytes")]
    LengthMismatch {
        /// Payload length declared in the frame
        declared: usize,
        /// Bytes actually supplied
        got: usize,
    },

    /// Payload passed the checksum but is shorter than its kind requires
    #[error("truncated {kind} payload: need {needed} bytes, got {got}")]
    TruncatedPayload {
        /// Kind whose layout the payload failed to satisfy
        kind: PacketKind,
        /// Minimum payload size for the kind
        needed: usize,
        /// Bytes actually present
        got: usize,
    },

    /// Buffer too small to hold even a minimum frame
    #[error("buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall {
        /// Needed size
        needed: usize,
        /// Actual size
        got: usize,
    },

    /// Payload too large for the single-byte length field
    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge {
        /// Payload size
        size: usize,
        /// Maximum allowed
        max: usize,
    },

    /// Payload variant does not agree with the requested packet kind
    #[error("payload does not match packet kind {kind}")]
    PayloadMismatch {
        /// Kind requested by the caller
        kind: PacketKind,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
