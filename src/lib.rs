//! FCP (Force Control Protocol) - wire protocol engine for the force-controller serial link
//!
//! This library implements the binary packet protocol spoken between a host
//! application and the embedded force/motion controller: a streaming framer
//! that turns an arbitrarily fragmented (and possibly corrupted) byte stream
//! into validated, typed packets, plus the inverse encoder that serializes
//! typed commands into wire frames.
//!
//! The engine performs no I/O. The transport collaborator owns the serial
//! port and sees the engine through three calls: [`Link::encode`],
//! [`Link::feed`], and [`Link::reset`].
//!
//! # Quick Start
//!
//! ```rust
//! use fcp::{Link, Outcome, PacketKind, Payload, Status};
//!
//! let mut link = Link::new();
//!
//! // Encode a status packet into wire bytes
//! let status = Status { force_value: 1.5, position: 45.0, ..Status::default() };
//! let bytes = link.encode(PacketKind::Status, Payload::Status(status))?;
//!
//! // Feed received bytes back in, at any chunk granularity
//! for outcome in link.feed(&bytes) {
//!     match outcome {
//!         Outcome::Decoded(packet) => println!("got {}", packet.kind()),
//!         Outcome::Rejected { reason, .. } => eprintln!("dropped frame: {reason}"),
//!     }
//! }
//! # Ok::<(), fcp::Error>(())
//! ```
//!
//! # Features
//!
//! - **Typed payloads** - per-kind structs with documented defaults, no open maps
//! - **Built-in checksums** - CRC16-MODBUS over every frame
//! - **Resynchronization** - a corrupted frame costs one byte of stream, never a later frame
//! - **Zero-copy payload slices** - `bytes::Bytes` end to end

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod protocol;
pub mod stream;

pub use protocol::{
    Error, FRAME_HEADER, FRAME_TAIL, ForceControl, Heartbeat, MAX_PAYLOAD_SIZE, MetricsSnapshot,
    Packet, PacketKind, Payload, RawFrame, Result, Status, crc16,
};
pub use stream::{FrameAssembler, Link, Outcome};

/// Protocol version byte carried in handshake payloads.
pub const PROTOCOL_VERSION: u8 = 0x10;
