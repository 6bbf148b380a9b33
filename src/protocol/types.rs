//! FCP packet kinds

use std::fmt;

/// FCP packet kinds, split by direction on the wire.
///
/// Unrecognized type codes are representable as [`PacketKind::Unknown`] so
/// that forward-compatible packets flow through the engine instead of
/// failing it; their payloads stay opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PacketKind {
    /// Session opener, valid in either direction
    Handshake,

    /// Periodic telemetry: force, position, velocity, flags
    Status,
    /// Fault or warning raised by the controller
    Alert,
    /// Command completion notification
    Complete,
    /// Reply to a host command
    Response,
    /// Keep-alive from the controller
    Heartbeat,

    /// Force-mode setpoint command
    ForceControl,
    /// Position-mode setpoint command
    PositionControl,
    /// Combined force/position command
    HybridControl,
    /// Controller parameter write
    ParameterSet,
    /// Immediate motion abort
    EmergencyStop,

    /// Type code not in the enumeration; payload stays opaque
    Unknown(u8),
}

impl PacketKind {
    /// Convert from a wire type code. Total: unrecognized codes map to
    /// [`PacketKind::Unknown`].
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0x00 => Self::Handshake,
            0x10 => Self::Status,
            0x20 => Self::Alert,
            0x21 => Self::Complete,
            0x30 => Self::ForceControl,
            0x31 => Self::PositionControl,
            0x32 => Self::HybridControl,
            0x40 => Self::ParameterSet,
            0x50 => Self::EmergencyStop,
            0x80 => Self::Response,
            0x90 => Self::Heartbeat,
            other => Self::Unknown(other),
        }
    }

    /// Convert to the wire type code
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Handshake => 0x00,
            Self::Status => 0x10,
            Self::Alert => 0x20,
            Self::Complete => 0x21,
            Self::ForceControl => 0x30,
            Self::PositionControl => 0x31,
            Self::HybridControl => 0x32,
            Self::ParameterSet => 0x40,
            Self::EmergencyStop => 0x50,
            Self::Response => 0x80,
            Self::Heartbeat => 0x90,
            Self::Unknown(code) => code,
        }
    }

    /// Check whether this kind travels device→host
    #[must_use]
    pub const fn is_device_to_host(self) -> bool {
        matches!(
            self,
            Self::Status
                | Self::Alert
                | Self::Complete
                | Self::Response
                | Self::Heartbeat
                | Self::Handshake
        )
    }

    /// Check whether this kind travels host→device
    #[must_use]
    pub const fn is_host_to_device(self) -> bool {
        matches!(
            self,
            Self::ForceControl
                | Self::PositionControl
                | Self::HybridControl
                | Self::ParameterSet
                | Self::EmergencyStop
                | Self::Handshake
        )
    }

    /// Check whether this kind carries a fixed-layout payload
    #[must_use]
    pub const fn has_structured_payload(self) -> bool {
        matches!(self, Self::Status | Self::ForceControl | Self::Heartbeat)
    }
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handshake => write!(f, "Handshake"),
            Self::Status => write!(f, "Status"),
            Self::Alert => write!(f, "Alert"),
            Self::Complete => write!(f, "Complete"),
            Self::Response => write!(f, "Response"),
            Self::Heartbeat => write!(f, "Heartbeat"),
            Self::ForceControl => write!(f, "ForceControl"),
            Self::PositionControl => write!(f, "PositionControl"),
            Self::HybridControl => write!(f, "HybridControl"),
            Self::ParameterSet => write!(f, "ParameterSet"),
            Self::EmergencyStop => write!(f, "EmergencyStop"),
            Self::Unknown(code) => write!(f, "Unknown({code:#04x})"),
        }
    }
}
