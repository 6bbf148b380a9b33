//! FCP frame codec (encode/decode)
//!
//! Whole-frame serialization for complete buffers. The streaming path in
//! [`crate::stream`] builds on [`RawFrame::parse`] directly; these functions
//! serve callers that already hold exactly one frame.

use bytes::Bytes;

use super::{
    Error, FRAME_HEADER, FRAME_OVERHEAD, FRAME_TAIL, MAX_PAYLOAD_SIZE, Packet, Payload, RawFrame,
    Result, crc16,
};

/// Encode a packet to wire bytes.
///
/// # Format
///
/// ```text
/// [0xAA] [LEN (1)] [TYPE (1)] [TIMESTAMP (4)] [PAYLOAD (len)] [CRC16 (2)] [0x55]
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The payload variant does not agree with the packet's kind
/// - The payload exceeds the 255-byte ceiling of the length field
pub fn encode(packet: &Packet) -> Result<Vec<u8>> {
    let kind = packet.kind();
    let payload = packet.payload();

    if !payload.matches_kind(kind) {
        return Err(Error::PayloadMismatch { kind });
    }

    let payload_len = payload.wire_size();
    if payload_len > MAX_PAYLOAD_SIZE {
        return Err(Error::PayloadTooLarge {
            size: payload_len,
            max: MAX_PAYLOAD_SIZE,
        });
    }

    let mut bytes = Vec::with_capacity(FRAME_OVERHEAD + payload_len);
    bytes.push(FRAME_HEADER);
    bytes.push(payload_len as u8);
    bytes.push(kind.as_u8());
    bytes.extend_from_slice(&packet.timestamp().to_le_bytes());
    payload.encode_into(&mut bytes);

    // Checksum covers everything after the header marker
    let crc = crc16(&bytes[1..]);
    bytes.extend_from_slice(&crc.to_le_bytes());
    bytes.push(FRAME_TAIL);

    Ok(bytes)
}

/// Decode exactly one frame from bytes.
///
/// # Errors
///
/// Returns an error if frame validation fails (markers, length, checksum)
/// or if a structured kind's payload is shorter than its layout. Unknown
/// type codes are not errors: they decode to [`Payload::Raw`].
pub fn decode(bytes: Bytes) -> Result<Packet> {
    let frame = RawFrame::parse(&bytes)?;
    let kind = frame.kind();
    let timestamp = frame.timestamp();
    let payload = Payload::decode(kind, frame.into_payload())?;

    Ok(Packet::from_parts(kind, timestamp, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ForceControl, Heartbeat, PacketKind, Status};

    #[test]
    fn test_encode_decode_roundtrip() {
        let original = Packet::with_timestamp(
            PacketKind::ForceControl,
            123_456,
            Payload::ForceControl(ForceControl {
                mode: 2,
                target_force: 2.5,
                force_rate: 0.5,
                max_force: 5.0,
                hold_time: 2.0,
            }),
        );

        let encoded = encode(&original).unwrap();
        let decoded = decode(Bytes::from(encoded)).unwrap();

        assert_eq!(decoded.kind(), original.kind());
        assert_eq!(decoded.timestamp(), original.timestamp());
        assert_eq!(decoded.payload(), original.payload());
    }

    #[test]
    fn test_status_frame_shape() {
        let status = Status {
            force_value: 1.5,
            force_rate: 0.2,
            position: 45.0,
            velocity: 10.0,
            motor_enabled: 1,
            ..Status::default()
        };
        let packet = Packet::with_timestamp(PacketKind::Status, 0, Payload::Status(status));
        let encoded = encode(&packet).unwrap();

        assert_eq!(encoded.len(), 34);
        assert_eq!(&encoded[0..3], &[0xAA, 0x18, 0x10]);
        assert_eq!(*encoded.last().unwrap(), 0x55);
    }

    #[test]
    fn test_payload_mismatch_rejected() {
        let packet = Packet::with_timestamp(
            PacketKind::Status,
            0,
            Payload::Heartbeat(Heartbeat::default()),
        );
        let result = encode(&packet);
        assert!(matches!(
            result,
            Err(Error::PayloadMismatch {
                kind: PacketKind::Status
            })
        ));
    }

    #[test]
    fn test_raw_payload_too_large() {
        let packet = Packet::with_timestamp(
            PacketKind::ParameterSet,
            0,
            Payload::Raw(Bytes::from(vec![0u8; 256])),
        );
        let result = encode(&packet);
        assert!(matches!(result, Err(Error::PayloadTooLarge { size: 256, .. })));
    }

    #[test]
    fn test_decode_corrupted_payload() {
        let packet = Packet::with_timestamp(
            PacketKind::Status,
            0,
            Payload::Status(Status::default()),
        );
        let mut encoded = encode(&packet).unwrap();
        encoded[10] ^= 0xFF;

        let result = decode(Bytes::from(encoded));
        assert!(matches!(result, Err(Error::CrcMismatch { .. })));
    }

    #[test]
    fn test_unknown_kind_passthrough() {
        let payload = Bytes::from_static(&[0x01, 0x02, 0x03]);
        let packet = Packet::with_timestamp(
            PacketKind::Unknown(0x99),
            77,
            Payload::Raw(payload.clone()),
        );

        let encoded = encode(&packet).unwrap();
        assert_eq!(encoded[2], 0x99);

        let decoded = decode(Bytes::from(encoded)).unwrap();
        assert_eq!(decoded.kind(), PacketKind::Unknown(0x99));
        assert_eq!(decoded.payload(), &Payload::Raw(payload));
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use crate::stream::{Link, Outcome};
        use proptest::prelude::*;

        // Strategy to generate kinds that carry raw payloads
        fn raw_kind_strategy() -> impl Strategy<Value = PacketKind> {
            prop_oneof![
                Just(PacketKind::Handshake),
                Just(PacketKind::Alert),
                Just(PacketKind::Complete),
                Just(PacketKind::Response),
                Just(PacketKind::PositionControl),
                Just(PacketKind::HybridControl),
                Just(PacketKind::ParameterSet),
                Just(PacketKind::EmergencyStop),
                (0u8..=255).prop_map(|code| PacketKind::from_u8(code)),
            ]
            .prop_filter("raw payload kinds only", |k| !k.has_structured_payload())
        }

        fn status_strategy() -> impl Strategy<Value = Status> {
            (
                any::<f32>().prop_filter("finite", |f| f.is_finite()),
                any::<f32>().prop_filter("finite", |f| f.is_finite()),
                any::<f32>().prop_filter("finite", |f| f.is_finite()),
                any::<f32>().prop_filter("finite", |f| f.is_finite()),
                any::<u8>(),
                any::<u8>(),
                any::<u8>(),
                any::<u8>(),
                any::<u8>(),
            )
                .prop_map(
                    |(
                        force_value,
                        force_rate,
                        position,
                        velocity,
                        motor_enabled,
                        position_reached,
                        stall_detected,
                        emergency_stop,
                        error_code,
                    )| Status {
                        force_value,
                        force_rate,
                        position,
                        velocity,
                        motor_enabled,
                        position_reached,
                        stall_detected,
                        emergency_stop,
                        error_code,
                    },
                )
        }

        proptest! {
            /// Property: any status packet should roundtrip exactly
            #[test]
            fn prop_status_roundtrip(status in status_strategy(), timestamp in any::<u32>()) {
                let original = Packet::with_timestamp(
                    PacketKind::Status,
                    timestamp,
                    Payload::Status(status),
                );
                let encoded = encode(&original).unwrap();
                let decoded = decode(Bytes::from(encoded)).unwrap();

                prop_assert_eq!(decoded.kind(), original.kind());
                prop_assert_eq!(decoded.timestamp(), timestamp);
                prop_assert_eq!(decoded.payload(), original.payload());
            }

            /// Property: raw payloads of any size up to the ceiling roundtrip unchanged
            #[test]
            fn prop_raw_roundtrip(
                kind in raw_kind_strategy(),
                payload in prop::collection::vec(any::<u8>(), 0..=255),
                timestamp in any::<u32>(),
            ) {
                let original = Packet::with_timestamp(
                    kind,
                    timestamp,
                    Payload::Raw(Bytes::from(payload.clone())),
                );
                let encoded = encode(&original).unwrap();
                let decoded = decode(Bytes::from(encoded)).unwrap();

                prop_assert_eq!(decoded.kind(), kind);
                prop_assert_eq!(decoded.payload(), &Payload::Raw(Bytes::from(payload)));
            }

            /// Property: corrupting any single non-header byte is detected
            #[test]
            fn prop_corruption_detected(
                payload in prop::collection::vec(any::<u8>(), 1..=64),
                corrupt_offset_ratio in 0.0f64..1.0,
                corrupt_value in 1u8..=255,
            ) {
                let original = Packet::with_timestamp(
                    PacketKind::ParameterSet,
                    0,
                    Payload::Raw(Bytes::from(payload)),
                );
                let mut encoded = encode(&original).unwrap();

                // corrupt anywhere between the length field and the checksum
                let span = encoded.len() - 2;
                let corrupt_offset = 1 + ((span - 1) as f64 * corrupt_offset_ratio) as usize;
                encoded[corrupt_offset] ^= corrupt_value;

                let result = decode(Bytes::from(encoded));
                prop_assert!(result.is_err(), "corrupted frame should be rejected");
            }

            /// Property: feeding a frame in arbitrary chunks decodes identically
            #[test]
            fn prop_chunking_equivalence(
                payload in prop::collection::vec(any::<u8>(), 0..=64),
                timestamp in any::<u32>(),
                chunk_size in 1usize..=16,
            ) {
                let original = Packet::with_timestamp(
                    PacketKind::Response,
                    timestamp,
                    Payload::Raw(Bytes::from(payload)),
                );
                let encoded = encode(&original).unwrap();

                let whole = decode(Bytes::from(encoded.clone())).unwrap();

                let mut link = Link::new();
                let mut outcomes = Vec::new();
                for chunk in encoded.chunks(chunk_size) {
                    outcomes.extend(link.feed(chunk));
                }

                prop_assert_eq!(outcomes.len(), 1);
                match outcomes.remove(0) {
                    Outcome::Decoded(packet) => {
                        prop_assert_eq!(packet.kind(), whole.kind());
                        prop_assert_eq!(packet.timestamp(), whole.timestamp());
                        prop_assert_eq!(packet.payload(), whole.payload());
                    }
                    Outcome::Rejected { reason, .. } => {
                        return Err(TestCaseError::fail(format!("unexpected rejection: {reason}")));
                    }
                }
            }
        }
    }
}
