//! Codec Tests
//!
//! Tests for request assembly, response parsing and the stream helpers.

use std::collections::HashMap;
use std::io::Cursor;

use aerowire::protocol::{
    derive_flags, parse_message, read_frame, read_response, write_request, Bin, FieldType,
    FrameHeader, Info1Flags, Info2Flags, Key, MessageBase, MessageType, Operation,
    RequestBuilder, Response, FRAME_HEADER_SIZE, MESSAGE_BASE_SIZE,
};
use aerowire::{Config, Value, WireError};

fn key() -> Key {
    Key::new("test", None, "k1").unwrap()
}

/// Frame + base + bins, as a server would send them
fn response_bytes(base: MessageBase, bins: &[Bin]) -> Vec<u8> {
    let mut payload = base.pack().to_vec();
    for bin in bins {
        bin.write_to(&mut payload).unwrap();
    }
    let mut message = FrameHeader::new(MessageType::Message, payload.len() as u64)
        .pack()
        .unwrap()
        .to_vec();
    message.extend_from_slice(&payload);
    message
}

// =============================================================================
// Request Shape Tests
// =============================================================================

#[test]
fn test_write_request_shape() {
    let request = RequestBuilder::default()
        .write(&key(), [("hello", "hey")])
        .unwrap();

    assert!(request.base.info1.is_empty());
    assert_eq!(request.base.info2, Info2Flags::WRITE);
    assert_eq!(request.base.field_count, 2);
    assert_eq!(request.base.bin_count, 1);
    assert_eq!(request.bins[0].operation, Operation::Write);
    assert_eq!(request.bins[0].value, Value::from("hey"));
}

#[test]
fn test_read_all_shape() {
    let request = RequestBuilder::default().read_all(&key()).unwrap();
    assert_eq!(request.base.info1, Info1Flags::READ | Info1Flags::GET_ALL);
    assert!(request.base.info2.is_empty());
    assert!(request.bins.is_empty());
}

#[test]
fn test_read_selected_shape() {
    let request = RequestBuilder::default()
        .read_selected(&key(), ["a", "b"])
        .unwrap();
    assert_eq!(request.base.info1, Info1Flags::READ);
    assert_eq!(request.base.bin_count, 2);
    for bin in &request.bins {
        assert_eq!(bin.operation, Operation::Read);
        assert_eq!(bin.value, Value::Undef);
    }
}

#[test]
fn test_delete_shape() {
    let request = RequestBuilder::default().delete(&key()).unwrap();
    assert_eq!(request.base.info2, Info2Flags::DELETE | Info2Flags::WRITE);
    assert!(request.base.info1.is_empty());
    assert_eq!(request.base.bin_count, 0);
}

#[test]
fn test_set_adds_field() {
    let key = Key::new("test", Some("users"), "k1").unwrap();
    let request = RequestBuilder::default().read_all(&key).unwrap();
    assert_eq!(request.fields[1].field_type, FieldType::Set);
    assert_eq!(request.fields[1].as_str().unwrap(), "users");
    assert_eq!(request.base.field_count, 3);
}

#[test]
fn test_unsupported_key_type() {
    let err = Key::new("test", None, Value::List(vec![])).unwrap_err();
    assert!(err.is_unsupported_type());
}

// =============================================================================
// Flag Derivation Tests
// =============================================================================

#[test]
fn test_flags_read_only() {
    let bins = [Bin::read("a"), Bin::new("b", Operation::MapRead, Value::Undef)];
    let (info1, info2) = derive_flags(&bins);
    assert_eq!(info1, Info1Flags::READ);
    assert!(info2.is_empty());
}

#[test]
fn test_flags_write_only() {
    let bins = [
        Bin::write("a", 1i64),
        Bin::new("b", Operation::Increment, Value::Integer(2)),
        Bin::new("c", Operation::Append, Value::from("x")),
    ];
    let (info1, info2) = derive_flags(&bins);
    assert!(info1.is_empty());
    assert_eq!(info2, Info2Flags::WRITE);
}

#[test]
fn test_flags_mixed() {
    let bins = [Bin::new("a", Operation::Increment, Value::Integer(1)), Bin::read("a")];
    let (info1, info2) = derive_flags(&bins);
    assert_eq!(info1, Info1Flags::READ);
    assert_eq!(info2, Info2Flags::WRITE);

    let request = RequestBuilder::default().operate(&key(), bins.to_vec()).unwrap();
    assert_eq!(request.base.info1, Info1Flags::READ);
    assert_eq!(request.base.info2, Info2Flags::WRITE);
}

#[test]
fn test_flags_none() {
    let (info1, info2) = derive_flags(&[]);
    assert!(info1.is_empty());
    assert!(info2.is_empty());
}

// =============================================================================
// Wire Format Verification Tests
// =============================================================================

#[test]
fn test_wire_format_write_request() {
    let key = key();
    let bytes = RequestBuilder::default()
        .write(&key, [("hello", "hey")])
        .unwrap()
        .pack()
        .unwrap();

    let namespace_len = 5 + 4;
    let digest_len = 5 + 20;
    let bin_len = 8 + 5 + 3;
    let payload_len = MESSAGE_BASE_SIZE + namespace_len + digest_len + bin_len;
    assert_eq!(bytes.len(), FRAME_HEADER_SIZE + payload_len);

    // Frame
    assert_eq!(bytes[0], 2);
    assert_eq!(bytes[1], MessageType::Message as u8);
    assert_eq!(&bytes[2..8], &(payload_len as u64).to_be_bytes()[2..]);

    // Message base
    let base = &bytes[8..8 + MESSAGE_BASE_SIZE];
    assert_eq!(base[0], 22);
    assert_eq!(base[2], Info2Flags::WRITE.bits());
    assert_eq!(&base[14..18], &1000u32.to_be_bytes()); // transaction ttl
    assert_eq!(&base[18..20], &[0, 2]); // fields
    assert_eq!(&base[20..22], &[0, 1]); // bins

    // Namespace field
    let fields = &bytes[8 + MESSAGE_BASE_SIZE..];
    assert_eq!(&fields[..9], &[0, 0, 0, 5, 0, b't', b'e', b's', b't']);

    // Digest field
    assert_eq!(&fields[9..14], &[0, 0, 0, 21, 4]);
    assert_eq!(&fields[14..34], key.digest().as_bytes());

    // Bin
    assert_eq!(&fields[34..38], &[0, 0, 0, 12]);
    assert_eq!(&fields[38..], &[2, 3, 0, 5, b'h', b'e', b'l', b'l', b'o', b'h', b'e', b'y']);
}

// =============================================================================
// Response Parsing Tests
// =============================================================================

#[test]
fn test_end_to_end_write_then_ok_no_bins() {
    let request = RequestBuilder::default()
        .write(&key(), [("hello", "hey")])
        .unwrap();
    assert!(!request.pack().unwrap().is_empty());

    let response = parse_message(&response_bytes(MessageBase::default(), &[])).unwrap();
    assert!(response.is_ok());
    assert!(response.bins.is_none());
    response.assert_ok(&HashMap::<u8, String>::new()).unwrap();
}

#[test]
fn test_empty_bins_distinct_from_no_bins() {
    let none = parse_message(&response_bytes(MessageBase::default(), &[])).unwrap();
    assert_eq!(none.bins(), None);

    let base = MessageBase {
        bin_count: 1,
        ..Default::default()
    };
    let some = parse_message(&response_bytes(base, &[Bin::read("gone")])).unwrap();
    let bins = some.bins().unwrap();
    assert_eq!(bins.len(), 1);
    assert_eq!(bins["gone"], Value::Undef);
}

#[test]
fn test_response_values() {
    let base = MessageBase {
        generation: 3,
        record_ttl: 600,
        bin_count: 3,
        ..Default::default()
    };
    let bins = [
        Bin::new("s", Operation::Read, Value::from("hey")),
        Bin::new("i", Operation::Read, Value::Integer(-42)),
        Bin::new("l", Operation::Read, Value::List(vec![Value::Double(0.5)])),
    ];
    let response = parse_message(&response_bytes(base, &bins)).unwrap();

    assert_eq!(response.generation, 3);
    assert_eq!(response.record_ttl, 600);
    assert_eq!(response.get("s"), Some(&Value::from("hey")));
    assert_eq!(response.get("i"), Some(&Value::Integer(-42)));
    assert_eq!(response.get("l"), Some(&Value::List(vec![Value::Double(0.5)])));
}

#[test]
fn test_error_status() {
    let base = MessageBase {
        result_code: 2,
        ..Default::default()
    };
    let response = parse_message(&response_bytes(base, &[])).unwrap();
    assert!(!response.is_ok());

    let mut table = HashMap::new();
    table.insert(2u8, "Key not found".to_string());
    match response.assert_ok(&table) {
        Err(WireError::ProtocolStatus { code, message }) => {
            assert_eq!(code, 2);
            assert_eq!(message, "Key not found");
        }
        other => panic!("Expected ProtocolStatus, got {:?}", other),
    }
}

#[test]
fn test_parse_message_length_mismatch() {
    let mut bytes = response_bytes(MessageBase::default(), &[]);
    bytes.push(0);
    assert!(parse_message(&bytes).unwrap_err().is_format());

    let bytes = response_bytes(MessageBase::default(), &[]);
    assert!(parse_message(&bytes[..bytes.len() - 1]).unwrap_err().is_format());
}

#[test]
fn test_parse_message_rejects_other_types() {
    let mut bytes = response_bytes(MessageBase::default(), &[]);
    bytes[1] = MessageType::Compressed as u8;
    assert!(parse_message(&bytes).unwrap_err().is_unsupported_type());
}

// =============================================================================
// Stream I/O Tests
// =============================================================================

#[test]
fn test_stream_write_request() {
    let request = RequestBuilder::default().read_all(&key()).unwrap();

    let mut buffer = Vec::new();
    write_request(&mut buffer, &request).unwrap();
    assert_eq!(buffer, request.pack().unwrap());

    let mut cursor = Cursor::new(buffer);
    let (header, payload) = read_frame(&mut cursor, 1024).unwrap();
    assert_eq!(header.message_type, MessageType::Message);
    assert_eq!(payload, request.payload().unwrap());
}

#[test]
fn test_stream_multiple_responses() {
    let mut buffer = Vec::new();
    buffer.extend(response_bytes(MessageBase::default(), &[]));
    let base = MessageBase {
        bin_count: 1,
        ..Default::default()
    };
    buffer.extend(response_bytes(base, &[Bin::read("x")]));

    let config = Config::default();
    let mut cursor = Cursor::new(buffer);
    let first = read_response(&mut cursor, &config).unwrap();
    let second = read_response(&mut cursor, &config).unwrap();

    assert!(first.bins.is_none());
    assert!(second.bins.is_some());
}

#[test]
fn test_stream_payload_limit() {
    let bytes = response_bytes(MessageBase::default(), &[]);
    let config = Config::builder().max_payload_size(10).build();
    let err = read_response(&mut Cursor::new(bytes), &config).unwrap_err();
    assert!(err.to_string().contains("Payload too large"));
}

#[test]
fn test_stream_truncated_payload_is_io_error() {
    let bytes = response_bytes(MessageBase::default(), &[]);
    let mut cursor = Cursor::new(bytes[..bytes.len() - 3].to_vec());
    let err = read_response(&mut cursor, &Config::default()).unwrap_err();
    match err {
        WireError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
        other => panic!("Expected IO error, got {:?}", other),
    }
}

#[test]
fn test_response_parse_direct_payload() {
    let bytes = response_bytes(MessageBase::default(), &[]);
    let response = Response::parse(&bytes[FRAME_HEADER_SIZE..]).unwrap();
    assert!(response.is_ok());
}
