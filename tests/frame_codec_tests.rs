use election_rpc::constants::FRAME_HEADER_SIZE;
use election_rpc::frame::{Frame, FrameCodec, FrameDecodeError, FrameKind};

fn sample_frame() -> Frame {
    Frame {
        kind: FrameKind::Call,
        request_id: 7,
        method_id: 0xDEAD_BEEF_0102_0304,
        status: 0,
        payload: b"region 101".to_vec(),
    }
}

#[test]
fn test_encode_places_header_fields_little_endian() {
    let bytes = FrameCodec::encode(&sample_frame()).unwrap();

    assert_eq!(bytes.len(), FRAME_HEADER_SIZE + 10);
    assert_eq!(bytes[0], 0);
    assert_eq!(&bytes[1..5], &7u32.to_le_bytes());
    assert_eq!(&bytes[5..13], &0xDEAD_BEEF_0102_0304u64.to_le_bytes());
    assert_eq!(bytes[13], 0);
    assert_eq!(&bytes[14..18], &10u32.to_le_bytes());
    assert_eq!(&bytes[18..], b"region 101");
}

#[test]
fn test_decode_reverses_encode() {
    let frame = Frame {
        kind: FrameKind::Response,
        status: 2,
        ..sample_frame()
    };
    let bytes = FrameCodec::encode(&frame).unwrap();

    assert_eq!(FrameCodec::decode(&bytes).unwrap(), frame);
}

#[test]
fn test_empty_payload_is_a_valid_frame() {
    let frame = Frame {
        payload: vec![],
        ..sample_frame()
    };
    let bytes = FrameCodec::encode(&frame).unwrap();

    assert_eq!(bytes.len(), FRAME_HEADER_SIZE);
    assert_eq!(FrameCodec::decode(&bytes).unwrap().payload, Vec::<u8>::new());
}

#[test]
fn test_decode_rejects_short_header() {
    let bytes = FrameCodec::encode(&sample_frame()).unwrap();

    assert_eq!(
        FrameCodec::decode(&bytes[..5]),
        Err(FrameDecodeError::IncompleteHeader(5))
    );
    assert_eq!(
        FrameCodec::decode(&[]),
        Err(FrameDecodeError::IncompleteHeader(0))
    );
}

#[test]
fn test_decode_rejects_unknown_kind() {
    let mut bytes = FrameCodec::encode(&sample_frame()).unwrap();
    bytes[0] = 9;

    assert_eq!(
        FrameCodec::decode(&bytes),
        Err(FrameDecodeError::CorruptFrame(9))
    );
}

#[test]
fn test_decode_rejects_truncated_payload() {
    let bytes = FrameCodec::encode(&sample_frame()).unwrap();
    let truncated = &bytes[..bytes.len() - 3];

    assert_eq!(
        FrameCodec::decode(truncated),
        Err(FrameDecodeError::PayloadLengthMismatch {
            declared: 10,
            actual: 7
        })
    );
}

#[test]
fn test_decode_rejects_trailing_bytes() {
    let mut bytes = FrameCodec::encode(&sample_frame()).unwrap();
    bytes.extend_from_slice(b"xx");

    assert_eq!(
        FrameCodec::decode(&bytes),
        Err(FrameDecodeError::PayloadLengthMismatch {
            declared: 10,
            actual: 12
        })
    );
}
