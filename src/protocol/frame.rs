//! FCP frame validation
//!
//! A [`RawFrame`] is one structurally valid wire frame after marker, length,
//! and checksum checks, before payload interpretation.

use bytes::Bytes;

use super::{
    CHECKSUM_SIZE, Error, FRAME_HEADER, FRAME_OVERHEAD, FRAME_TAIL, MIN_FRAME_SIZE, PREFIX_SIZE,
    PacketKind, Result, crc16,
};

/// One validated frame: type code, timestamp, and the undecoded payload.
///
/// # Wire Format
///
/// ```text
/// offset  size  field
/// 0       1     header, 0xAA
/// 1       1     payload length (0-255)
/// 2       1     type code
/// 3       4     timestamp, u32 little-endian milliseconds
/// 7       len   payload
/// 7+len   2     crc16-modbus over bytes[1 .. 7+len), little-endian
/// 9+len   1     tail, 0x55
/// ```
#[derive(Debug, Clone)]
pub struct RawFrame {
    kind: PacketKind,
    timestamp: u32,
    payload: Bytes,
}

impl RawFrame {
    /// Validate `bytes` as exactly one frame.
    ///
    /// The checksum covers the length field through the end of the payload;
    /// the header marker and the checksum/tail bytes are excluded.
    ///
    /// # Errors
    ///
    /// - [`Error::BufferTooSmall`] — fewer bytes than a minimum frame
    /// - [`Error::BadHeader`] — first byte is not 0xAA
    /// - [`Error::LengthMismatch`] — declared length disagrees with `bytes.len()`
    /// - [`Error::BadTail`] — last byte is not 0x55
    /// - [`Error::CrcMismatch`] — transmitted checksum fails verification
    pub fn parse(bytes: &Bytes) -> Result<Self> {
        if bytes.len() < MIN_FRAME_SIZE {
            return Err(Error::BufferTooSmall {
                needed: MIN_FRAME_SIZE,
                got: bytes.len(),
            });
        }

        if bytes[0] != FRAME_HEADER {
            return Err(Error::BadHeader { found: bytes[0] });
        }

        let declared = bytes[1] as usize;
        if bytes.len() != FRAME_OVERHEAD + declared {
            return Err(Error::LengthMismatch {
                declared,
                got: bytes.len(),
            });
        }

        let tail = bytes[bytes.len() - 1];
        if tail != FRAME_TAIL {
            return Err(Error::BadTail { found: tail });
        }

        let crc_offset = PREFIX_SIZE + declared;
        let found = u16::from_le_bytes(
            bytes[crc_offset..crc_offset + CHECKSUM_SIZE]
                .try_into()
                .unwrap(),
        );
        let expected = crc16(&bytes[1..crc_offset]);
        if found != expected {
            return Err(Error::CrcMismatch { expected, found });
        }

        Ok(Self {
            kind: PacketKind::from_u8(bytes[2]),
            timestamp: u32::from_le_bytes(bytes[3..7].try_into().unwrap()),
            payload: bytes.slice(PREFIX_SIZE..crc_offset),
        })
    }

    /// Get the packet kind
    #[must_use]
    pub const fn kind(&self) -> PacketKind {
        self.kind
    }

    /// Get the sender's millisecond timestamp
    #[must_use]
    pub const fn timestamp(&self) -> u32 {
        self.timestamp
    }

    /// Get the undecoded payload bytes
    #[must_use]
    pub const fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Consume the frame, returning the payload bytes
    #[must_use]
    pub fn into_payload(self) -> Bytes {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Packet, Payload, encode};

    fn sample_frame() -> Bytes {
        let packet = Packet::with_timestamp(
            PacketKind::Heartbeat,
            1000,
            Payload::Heartbeat(crate::protocol::Heartbeat {
                timestamp: 42,
                status: 1,
            }),
        );
        Bytes::from(encode(&packet).unwrap())
    }

    #[test]
    fn test_parse_valid_frame() {
        let bytes = sample_frame();
        let frame = RawFrame::parse(&bytes).unwrap();

        assert_eq!(frame.kind(), PacketKind::Heartbeat);
        assert_eq!(frame.timestamp(), 1000);
        assert_eq!(frame.payload().len(), 5);
    }

    #[test]
    fn test_bad_header() {
        let mut bytes = sample_frame().to_vec();
        bytes[0] = 0xAB;
        let result = RawFrame::parse(&Bytes::from(bytes));
        assert!(matches!(result, Err(Error::BadHeader { found: 0xAB })));
    }

    #[test]
    fn test_bad_tail() {
        let mut bytes = sample_frame().to_vec();
        let last = bytes.len() - 1;
        bytes[last] = 0x56;
        let result = RawFrame::parse(&Bytes::from(bytes));
        assert!(matches!(result, Err(Error::BadTail { found: 0x56 })));
    }

    #[test]
    fn test_crc_mismatch() {
        let mut bytes = sample_frame().to_vec();
        bytes[8] ^= 0x01; // flip one payload bit
        let result = RawFrame::parse(&Bytes::from(bytes));
        assert!(matches!(result, Err(Error::CrcMismatch { .. })));
    }

    #[test]
    fn test_length_mismatch() {
        let mut bytes = sample_frame().to_vec();
        bytes.push(0x00); // one byte too many for the declared length
        let result = RawFrame::parse(&Bytes::from(bytes));
        assert!(matches!(result, Err(Error::LengthMismatch { .. })));
    }

    #[test]
    fn test_too_short() {
        let bytes = Bytes::from_static(&[0xAA; 9]);
        let result = RawFrame::parse(&bytes);
        assert!(matches!(result, Err(Error::BufferTooSmall { .. })));
    }

    #[test]
    fn test_zero_length_payload() {
        let packet = Packet::with_timestamp(PacketKind::Handshake, 0, Payload::Raw(Bytes::new()));
        let bytes = Bytes::from(encode(&packet).unwrap());
        assert_eq!(bytes.len(), MIN_FRAME_SIZE);

        let frame = RawFrame::parse(&bytes).unwrap();
        assert_eq!(frame.kind(), PacketKind::Handshake);
        assert!(frame.payload().is_empty());
    }
}
