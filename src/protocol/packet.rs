//! FCP packet implementation

use std::time::{SystemTime, UNIX_EPOCH};

use bytes::Bytes;

use super::{PacketKind, Payload, Result};

/// FCP packet: a kind, a millisecond timestamp, and a typed payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Packet {
    kind: PacketKind,
    /// Milliseconds since the Unix epoch, truncated to 32 bits. Wraps
    /// roughly every 49.7 days; consumers compare deltas, not absolutes.
    timestamp: u32,
    payload: Payload,
}

impl Packet {
    /// Create a packet stamped with the current time.
    #[must_use]
    pub fn new(kind: PacketKind, payload: Payload) -> Self {
        Self {
            kind,
            timestamp: now_millis(),
            payload,
        }
    }

    /// Create a packet with an explicit timestamp.
    #[must_use]
    pub const fn with_timestamp(kind: PacketKind, timestamp: u32, payload: Payload) -> Self {
        Self {
            kind,
            timestamp,
            payload,
        }
    }

    /// Reassemble a packet from already-validated parts.
    #[must_use]
    pub const fn from_parts(kind: PacketKind, timestamp: u32, payload: Payload) -> Self {
        Self {
            kind,
            timestamp,
            payload,
        }
    }

    /// Create a STATUS telemetry packet.
    #[must_use]
    pub fn status(status: super::Status) -> Self {
        Self::new(PacketKind::Status, Payload::Status(status))
    }

    /// Create a FORCE_CONTROL command packet.
    #[must_use]
    pub fn force_control(cmd: super::ForceControl) -> Self {
        Self::new(PacketKind::ForceControl, Payload::ForceControl(cmd))
    }

    /// Create a HEARTBEAT packet.
    #[must_use]
    pub fn heartbeat(hb: super::Heartbeat) -> Self {
        Self::new(PacketKind::Heartbeat, Payload::Heartbeat(hb))
    }

    /// Create a HANDSHAKE packet carrying the protocol version byte.
    #[must_use]
    pub fn handshake() -> Self {
        Self::new(
            PacketKind::Handshake,
            Payload::Raw(Bytes::from_static(&[crate::PROTOCOL_VERSION])),
        )
    }

    /// Create an EMERGENCY_STOP packet (empty payload).
    #[must_use]
    pub fn emergency_stop() -> Self {
        Self::new(PacketKind::EmergencyStop, Payload::Raw(Bytes::new()))
    }

    /// Get the packet kind
    #[must_use]
    pub const fn kind(&self) -> PacketKind {
        self.kind
    }

    /// Get the millisecond timestamp
    #[must_use]
    pub const fn timestamp(&self) -> u32 {
        self.timestamp
    }

    /// Get the payload
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Consume the packet, returning the payload
    #[must_use]
    pub fn into_payload(self) -> Payload {
        self.payload
    }

    /// Encode the packet to wire bytes
    pub fn encode(&self) -> Result<Vec<u8>> {
        super::encode(self)
    }

    /// Decode exactly one frame from bytes
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        super::decode(Bytes::copy_from_slice(bytes))
    }
}

/// Current time as 32-bit wall-clock milliseconds.
fn now_millis() -> u32 {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (since_epoch.as_millis() & 0xFFFF_FFFF) as u32
}
