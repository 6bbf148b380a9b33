//! Protocol facade for one serial connection

use bytes::Bytes;
use tracing::{debug, trace};

use super::assembler::FrameAssembler;
use crate::protocol::{Error, Metrics, Packet, PacketKind, Payload, Result, encode};

/// Result of resolving one frame from the receive stream.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// A validated frame decoded into a typed packet
    Decoded(Packet),
    /// A frame refused during validation or payload decoding
    Rejected {
        /// Why the frame was refused
        reason: Error,
        /// The offending bytes: the candidate frame for framing and
        /// checksum failures, the payload slice for payload failures
        bytes: Bytes,
    },
}

/// The protocol engine for one serial connection: `encode` out, `feed` in.
///
/// Owns the residual receive buffer. Single-threaded by contract: exactly
/// one logical reader calls [`Link::feed`] with bytes in arrival order.
/// Each active serial link gets its own instance with independent state.
///
/// Receive-side failures never propagate as errors; the collaborator
/// observes them as [`Outcome::Rejected`] and the engine keeps going.
/// Encode-side failures return `Err` because the caller controls the
/// offending input.
#[derive(Debug, Default)]
pub struct Link {
    assembler: FrameAssembler,
}

impl Link {
    /// Create a link with no buffered state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            assembler: FrameAssembler::new(),
        }
    }

    /// Encode a command into wire bytes, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns an error when `payload` does not agree with `kind` or
    /// exceeds the 255-byte payload ceiling. Nothing is buffered on error;
    /// the caller corrects the input and retries.
    pub fn encode(&self, kind: PacketKind, payload: Payload) -> Result<Vec<u8>> {
        let packet = Packet::new(kind, payload);
        let bytes = encode(&packet)?;
        Metrics::record_encoded();
        trace!(%kind, len = bytes.len(), "encoded frame");
        Ok(bytes)
    }

    /// Encode an already-constructed packet, keeping its timestamp.
    pub fn encode_packet(&self, packet: &Packet) -> Result<Vec<u8>> {
        let bytes = encode(packet)?;
        Metrics::record_encoded();
        trace!(kind = %packet.kind(), len = bytes.len(), "encoded frame");
        Ok(bytes)
    }

    /// Feed newly received bytes; returns decoded packets and rejected
    /// frames in stream order.
    ///
    /// Safe to call with arbitrary chunk boundaries: a valid frame
    /// straddling two calls is decoded when its last byte arrives, and a
    /// corrupted frame never reorders or duplicates a later valid one.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Outcome> {
        self.assembler
            .feed(bytes)
            .into_iter()
            .map(|resolved| match resolved {
                Ok(frame) => {
                    let kind = frame.kind();
                    let timestamp = frame.timestamp();
                    let payload_bytes = frame.into_payload();
                    match Payload::decode(kind, payload_bytes.clone()) {
                        Ok(payload) => {
                            Metrics::record_decoded();
                            Outcome::Decoded(Packet::from_parts(kind, timestamp, payload))
                        }
                        Err(reason) => {
                            // passed the checksum, so the sender framed a
                            // short payload under this kind
                            debug!(%kind, %reason, "payload decode failed");
                            Metrics::record_rejected(&reason);
                            Outcome::Rejected {
                                reason,
                                bytes: payload_bytes,
                            }
                        }
                    }
                }
                Err(rejection) => {
                    Metrics::record_rejected(&rejection.reason);
                    Outcome::Rejected {
                        reason: rejection.reason,
                        bytes: rejection.bytes,
                    }
                }
            })
            .collect()
    }

    /// Drop all residual receive state.
    ///
    /// The transport collaborator calls this when a connection is dropped
    /// and re-established; bytes from a dead connection must never be
    /// stitched to bytes from a new one.
    pub fn reset(&mut self) {
        self.assembler.reset();
    }

    /// Bytes buffered awaiting the rest of a frame.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.assembler.pending()
    }
}
