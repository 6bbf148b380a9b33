//! Byte-stream frame assembly
//!
//! Consumes chunks of any size (down to one byte), buffers the unresolved
//! tail, and emits every complete candidate frame as either a validated
//! [`RawFrame`] or a [`Rejection`].

use bytes::{Buf, Bytes, BytesMut};
use tracing::{debug, trace};

use crate::protocol::{Error, FRAME_HEADER, FRAME_OVERHEAD, Metrics, RawFrame};

/// A candidate frame that failed validation.
#[derive(Debug, Clone)]
pub struct Rejection {
    /// Why the frame was refused
    pub reason: Error,
    /// The candidate frame bytes, for logging or counting
    pub bytes: Bytes,
}

/// Streaming frame assembler with resynchronization.
///
/// Owns the residual buffer between `feed` calls: exactly the bytes not yet
/// resolved into a complete or rejected frame. One assembler per serial
/// connection; feeding bytes from two connections into one assembler
/// stitches dead streams together.
///
/// # Resynchronization
///
/// When a candidate frame fails validation, only the header byte that
/// opened it is discarded. Scanning resumes one byte later, so a legitimate
/// frame whose header happens to sit inside the failed candidate (say, a
/// 0xAA inside a corrupted payload) is still found. Corruption costs one
/// byte of stream, never a later frame.
#[derive(Debug, Default)]
pub struct FrameAssembler {
    buf: BytesMut,
}

impl FrameAssembler {
    /// Create an assembler with an empty residual buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: BytesMut::new(),
        }
    }

    /// Feed one chunk of received bytes.
    ///
    /// Returns every frame resolved by this chunk, in stream order. An
    /// incomplete frame at the end of the buffer emits nothing and is
    /// retained for the next call.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Result<RawFrame, Rejection>> {
        Metrics::record_fed(chunk.len());
        self.buf.extend_from_slice(chunk);
        trace!(
            chunk = chunk.len(),
            buffered = self.buf.len(),
            "buffering received bytes"
        );

        let mut resolved = Vec::new();

        loop {
            // Seek the next header marker, dropping noise in front of it
            let Some(start) = self.buf.iter().position(|&b| b == FRAME_HEADER) else {
                let skipped = self.buf.len();
                if skipped > 0 {
                    Metrics::record_skipped(skipped);
                    debug!(skipped, "no frame header in buffer, discarding");
                    self.buf.clear();
                }
                break;
            };
            if start > 0 {
                Metrics::record_skipped(start);
                debug!(skipped = start, "skipped noise before frame header");
                self.buf.advance(start);
            }

            // Need the length byte before the frame size is known
            if self.buf.len() < 2 {
                break;
            }
            let frame_size = FRAME_OVERHEAD + self.buf[1] as usize;
            if self.buf.len() < frame_size {
                break;
            }

            let candidate = Bytes::copy_from_slice(&self.buf[..frame_size]);
            match RawFrame::parse(&candidate) {
                Ok(frame) => {
                    trace!(kind = %frame.kind(), len = frame.payload().len(), "frame assembled");
                    self.buf.advance(frame_size);
                    resolved.push(Ok(frame));
                }
                Err(reason) => {
                    debug!(%reason, "frame rejected, resynchronizing");
                    // Drop only the failed header byte; the next legitimate
                    // frame may start inside this candidate.
                    Metrics::record_skipped(1);
                    self.buf.advance(1);
                    resolved.push(Err(Rejection {
                        reason,
                        bytes: candidate,
                    }));
                }
            }
        }

        resolved
    }

    /// Discard all residual state.
    ///
    /// Call on transport reconnect: bytes buffered from a dead connection
    /// must never be stitched to bytes from a new one.
    pub fn reset(&mut self) {
        if !self.buf.is_empty() {
            debug!(discarded = self.buf.len(), "assembler reset");
        }
        self.buf.clear();
    }

    /// Bytes currently buffered awaiting more data.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}
