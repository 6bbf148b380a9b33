//! FCP protocol core implementation
//!
//! This module provides the wire format, packet kinds, payload codecs, and
//! frame validation for FCP.

mod codec;
mod crc;
mod error;
mod frame;
mod metrics;
mod packet;
mod payload;
mod types;

pub use codec::{decode, encode};
pub use crc::crc16;
pub use error::{Error, Result};
pub use frame::RawFrame;
pub use metrics::MetricsSnapshot;
pub use packet::Packet;
pub use payload::{
    FORCE_CONTROL_SIZE, ForceControl, HEARTBEAT_SIZE, Heartbeat, Payload, STATUS_SIZE, Status,
};
pub use types::PacketKind;

pub(crate) use metrics::Metrics;

/// Frame header marker byte
pub const FRAME_HEADER: u8 = 0xAA;

/// Frame tail marker byte
pub const FRAME_TAIL: u8 = 0x55;

/// Bytes before the payload: header + length + type + timestamp
pub const PREFIX_SIZE: usize = 7;

/// Checksum size in bytes
pub const CHECKSUM_SIZE: usize = 2;

/// Frame bytes that are not payload (prefix + checksum + tail)
pub const FRAME_OVERHEAD: usize = PREFIX_SIZE + CHECKSUM_SIZE + 1;

/// Minimum frame size (zero-length payload, e.g. a bare handshake)
pub const MIN_FRAME_SIZE: usize = FRAME_OVERHEAD;

/// Maximum payload size, capped by the single-byte length field
pub const MAX_PAYLOAD_SIZE: usize = u8::MAX as usize;
