//! FCP payload codecs
//!
//! One fixed little-endian layout per structured packet kind, converted
//! to/from typed structs with public fields. Kinds without a fixed layout
//! carry opaque bytes.

use bytes::Bytes;

use super::{Error, PacketKind, Result};

/// Wire size of a STATUS payload
pub const STATUS_SIZE: usize = 24;

/// Wire size of a FORCE_CONTROL payload
pub const FORCE_CONTROL_SIZE: usize = 17;

/// Wire size of a HEARTBEAT payload
pub const HEARTBEAT_SIZE: usize = 5;

/// STATUS telemetry reported by the controller.
///
/// Wire layout: four little-endian f32s, five flag/error bytes, three
/// reserved bytes (zero on encode, ignored on decode).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status {
    /// Measured force
    pub force_value: f32,
    /// Force change rate
    pub force_rate: f32,
    /// Current position
    pub position: f32,
    /// Current velocity
    pub velocity: f32,
    /// Motor drive enabled (0/1)
    pub motor_enabled: u8,
    /// Position setpoint reached (0/1)
    pub position_reached: u8,
    /// Stall condition detected (0/1)
    pub stall_detected: u8,
    /// Emergency stop engaged (0/1)
    pub emergency_stop: u8,
    /// Controller error code, 0 when healthy
    pub error_code: u8,
}

/// FORCE_CONTROL setpoint command.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForceControl {
    /// Controller force mode selector
    pub mode: u8,
    /// Target force to reach
    pub target_force: f32,
    /// Force ramp rate
    pub force_rate: f32,
    /// Safety ceiling the controller must not exceed
    pub max_force: f32,
    /// Seconds to hold the target once reached
    pub hold_time: f32,
}

impl Default for ForceControl {
    /// Documented command defaults: `max_force` 5.0, `hold_time` 0.0.
    fn default() -> Self {
        Self {
            mode: 0,
            target_force: 0.0,
            force_rate: 0.0,
            max_force: 5.0,
            hold_time: 0.0,
        }
    }
}

/// HEARTBEAT keep-alive from the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heartbeat {
    /// Controller-side millisecond timestamp
    pub timestamp: u32,
    /// Liveness status, 1 when healthy
    pub status: u8,
}

impl Default for Heartbeat {
    /// Documented default: `status` 1 (healthy).
    fn default() -> Self {
        Self {
            timestamp: 0,
            status: 1,
        }
    }
}

/// Decoded payload of one packet, tagged by kind.
///
/// `Raw` covers every kind without a fixed layout (ALERT, COMPLETE,
/// RESPONSE, HANDSHAKE, POSITION_CONTROL, HYBRID_CONTROL, PARAMETER_SET,
/// EMERGENCY_STOP) as well as [`PacketKind::Unknown`] codes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Payload {
    /// STATUS telemetry
    Status(Status),
    /// FORCE_CONTROL command
    ForceControl(ForceControl),
    /// HEARTBEAT keep-alive
    Heartbeat(Heartbeat),
    /// Opaque payload bytes, uninterpreted
    Raw(Bytes),
}

impl Payload {
    /// Decode payload bytes for `kind`.
    ///
    /// Structured kinds require at least their layout size; extra trailing
    /// bytes are tolerated and ignored. Every other kind decodes as
    /// [`Payload::Raw`] with zero interpretation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedPayload`] when a structured kind's payload
    /// is shorter than its layout. The frame already passed its checksum at
    /// this point, so truncation means a kind/length mismatch at the
    /// sender, not transit corruption.
    pub fn decode(kind: PacketKind, bytes: Bytes) -> Result<Self> {
        match kind {
            PacketKind::Status => Ok(Self::Status(Status::from_bytes(&bytes)?)),
            PacketKind::ForceControl => Ok(Self::ForceControl(ForceControl::from_bytes(&bytes)?)),
            PacketKind::Heartbeat => Ok(Self::Heartbeat(Heartbeat::from_bytes(&bytes)?)),
            _ => Ok(Self::Raw(bytes)),
        }
    }

    /// Serialize the payload onto the end of `buf`. Never fails: every
    /// field of a typed variant is present by construction.
    pub(crate) fn encode_into(&self, buf: &mut Vec<u8>) {
        match self {
            Self::Status(status) => status.write_to(buf),
            Self::ForceControl(cmd) => cmd.write_to(buf),
            Self::Heartbeat(hb) => hb.write_to(buf),
            Self::Raw(bytes) => buf.extend_from_slice(bytes),
        }
    }

    /// Size of the payload once encoded
    #[must_use]
    pub fn wire_size(&self) -> usize {
        match self {
            Self::Status(_) => STATUS_SIZE,
            Self::ForceControl(_) => FORCE_CONTROL_SIZE,
            Self::Heartbeat(_) => HEARTBEAT_SIZE,
            Self::Raw(bytes) => bytes.len(),
        }
    }

    /// Check whether this payload may be framed under `kind`.
    ///
    /// A typed variant matches only its own kind. `Raw` matches any kind
    /// without a structured layout; pairing it with a structured kind is
    /// caller misuse and rejected at encode time.
    #[must_use]
    pub fn matches_kind(&self, kind: PacketKind) -> bool {
        match self {
            Self::Status(_) => kind == PacketKind::Status,
            Self::ForceControl(_) => kind == PacketKind::ForceControl,
            Self::Heartbeat(_) => kind == PacketKind::Heartbeat,
            Self::Raw(_) => !kind.has_structured_payload(),
        }
    }
}

impl Status {
    fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.force_value.to_le_bytes());
        buf.extend_from_slice(&self.force_rate.to_le_bytes());
        buf.extend_from_slice(&self.position.to_le_bytes());
        buf.extend_from_slice(&self.velocity.to_le_bytes());
        buf.push(self.motor_enabled);
        buf.push(self.position_reached);
        buf.push(self.stall_detected);
        buf.push(self.emergency_stop);
        buf.push(self.error_code);
        // reserved
        buf.extend_from_slice(&[0u8; 3]);
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < STATUS_SIZE {
            return Err(Error::TruncatedPayload {
                kind: PacketKind::Status,
                needed: STATUS_SIZE,
                got: bytes.len(),
            });
        }

        Ok(Self {
            force_value: f32::from_le_bytes(bytes[0..4].try_into().unwrap()),
            force_rate: f32::from_le_bytes(bytes[4..8].try_into().unwrap()),
            position: f32::from_le_bytes(bytes[8..12].try_into().unwrap()),
            velocity: f32::from_le_bytes(bytes[12..16].try_into().unwrap()),
            motor_enabled: bytes[16],
            position_reached: bytes[17],
            stall_detected: bytes[18],
            emergency_stop: bytes[19],
            error_code: bytes[20],
        })
    }
}

impl ForceControl {
    fn write_to(&self, buf: &mut Vec<u8>) {
        buf.push(self.mode);
        buf.extend_from_slice(&self.target_force.to_le_bytes());
        buf.extend_from_slice(&self.force_rate.to_le_bytes());
        buf.extend_from_slice(&self.max_force.to_le_bytes());
        buf.extend_from_slice(&self.hold_time.to_le_bytes());
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < FORCE_CONTROL_SIZE {
            return Err(Error::TruncatedPayload {
                kind: PacketKind::ForceControl,
                needed: FORCE_CONTROL_SIZE,
                got: bytes.len(),
            });
        }

        Ok(Self {
            mode: bytes[0],
            target_force: f32::from_le_bytes(bytes[1..5].try_into().unwrap()),
            force_rate: f32::from_le_bytes(bytes[5..9].try_into().unwrap()),
            max_force: f32::from_le_bytes(bytes[9..13].try_into().unwrap()),
            hold_time: f32::from_le_bytes(bytes[13..17].try_into().unwrap()),
        })
    }
}

impl Heartbeat {
    fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.timestamp.to_le_bytes());
        buf.push(self.status);
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEARTBEAT_SIZE {
            return Err(Error::TruncatedPayload {
                kind: PacketKind::Heartbeat,
                needed: HEARTBEAT_SIZE,
                got: bytes.len(),
            });
        }

        Ok(Self {
            timestamp: u32::from_le_bytes(bytes[0..4].try_into().unwrap()),
            status: bytes[4],
        })
    }
}
