//! Bin Tests
//!
//! These tests verify:
//! - Sequential bin walks driven by reported consumed lengths
//! - Every value kind survives the bin envelope
//! - Unknown tags and inconsistent lengths are rejected without partial output

use aerowire::protocol::{Bin, Operation, BIN_HEADER_SIZE};
use aerowire::{ParticleType, Value};

// =============================================================================
// Sequential Parse Tests
// =============================================================================

#[test]
fn test_sequential_bin_walk() {
    let bins = vec![
        Bin::write("name", "Ada"),
        Bin::write("age", 36i64),
        Bin::write("score", 99.5),
        Bin::write("tags", Value::List(vec![Value::from("a"), Value::Integer(2)])),
        Bin::read("missing"),
        Bin::new("counter", Operation::Increment, Value::Integer(-1)),
    ];

    let mut bytes = Vec::new();
    for bin in &bins {
        bytes.extend_from_slice(&bin.pack().unwrap());
    }

    let mut offset = 0;
    let mut decoded = Vec::new();
    for _ in 0..bins.len() {
        let (bin, consumed) = Bin::unpack(&bytes[offset..]).unwrap();
        assert_eq!(consumed, bin.encoded_len());
        offset += consumed;
        decoded.push(bin);
    }

    assert_eq!(decoded, bins);
    assert_eq!(offset, bytes.len(), "no leftover bytes");
}

#[test]
fn test_bin_length_counts_opcode_and_rest() {
    let bin = Bin::write("ab", 5i64);
    let packed = bin.pack().unwrap();
    let declared = u32::from_be_bytes([packed[0], packed[1], packed[2], packed[3]]) as usize;

    assert_eq!(declared, packed.len() - 4);
    assert_eq!(packed.len(), BIN_HEADER_SIZE + 2 + 8);
    assert_eq!(packed[4], Operation::Write as u8);
    assert_eq!(packed[5], ParticleType::Integer.tag());
}

#[test]
fn test_bin_version_preserved() {
    let mut bin = Bin::write("v", "x");
    bin.version = 3;
    let (decoded, _) = Bin::unpack(&bin.pack().unwrap()).unwrap();
    assert_eq!(decoded.version, 3);
}

#[test]
fn test_multibyte_bin_name() {
    let bin = Bin::write("näme", "välue");
    let packed = bin.pack().unwrap();
    assert_eq!(packed[7] as usize, "näme".len());

    let (decoded, consumed) = Bin::unpack(&packed).unwrap();
    assert_eq!(decoded.name, "näme");
    assert_eq!(consumed, packed.len());
}

// =============================================================================
// Rejection Tests
// =============================================================================

#[test]
fn test_unknown_value_tag_rejected() {
    let mut packed = Bin::write("x", "abc").pack().unwrap();
    packed[5] = 42;
    let err = Bin::unpack(&packed).unwrap_err();
    assert!(err.is_unsupported_type());
}

#[test]
fn test_map_value_tag_rejected() {
    let mut packed = Bin::write("x", "abc").pack().unwrap();
    packed[5] = ParticleType::Map.tag();
    assert!(Bin::unpack(&packed).unwrap_err().is_unsupported_type());
}

#[test]
fn test_unknown_operation_rejected() {
    let mut packed = Bin::write("x", 1i64).pack().unwrap();
    packed[4] = 8;
    assert!(Bin::unpack(&packed).unwrap_err().is_unsupported_type());
}

#[test]
fn test_truncated_bin() {
    let packed = Bin::write("x", "hello").pack().unwrap();
    for cut in [0, 3, 7, packed.len() - 1] {
        assert!(Bin::unpack(&packed[..cut]).unwrap_err().is_format(), "cut at {}", cut);
    }
}

#[test]
fn test_declared_length_too_short_for_integer() {
    // Declared length cuts the 8-byte integer to 4 bytes
    let mut packed = Bin::write("n", 1i64).pack().unwrap();
    let short = (packed.len() - 4 - 4) as u32;
    packed[..4].copy_from_slice(&short.to_be_bytes());
    assert!(Bin::unpack(&packed).unwrap_err().is_format());
}

#[test]
fn test_invalid_utf8_string_value() {
    let mut packed = Bin::write("s", "ab").pack().unwrap();
    let last = packed.len() - 1;
    packed[last] = 0xFF;
    assert!(Bin::unpack(&packed).unwrap_err().is_format());
}
