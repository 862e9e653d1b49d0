//! List encoding
//!
//! Lists travel as a MessagePack array. Each element carries its own marker,
//! so elements are self-delimiting and may nest. Strings are wrapped as a
//! MessagePack str whose length includes one leading particle-type byte:
//!
//! ```text
//! ┌────────────┬──────────┬───────────────┐
//! │ str marker │ type (1) │ UTF-8 bytes   │
//! │ len = n+1  │   = 3    │ (n)           │
//! └────────────┴──────────┴───────────────┘
//! ```

use rmp::Marker;

use super::{ParticleType, Value};
use crate::error::{Result, WireError};
use crate::reader::WireReader;

/// Deepest list nesting accepted while decoding
pub const MAX_NESTING_DEPTH: usize = 64;

// =============================================================================
// Encoding
// =============================================================================

pub(super) fn pack(items: &[Value], out: &mut Vec<u8>) -> Result<()> {
    rmp::encode::write_array_len(out, wire_len(items.len(), "List")?).map_err(encode_error)?;
    for item in items {
        pack_element(item, out)?;
    }
    Ok(())
}

fn pack_element(value: &Value, out: &mut Vec<u8>) -> Result<()> {
    match value {
        Value::Undef => rmp::encode::write_nil(out).map_err(encode_error)?,
        Value::Integer(i) => {
            rmp::encode::write_sint(out, *i).map_err(encode_error)?;
        }
        Value::Double(d) => rmp::encode::write_f64(out, *d).map_err(encode_error)?,
        Value::String(s) => {
            rmp::encode::write_str_len(out, wire_len(s.len() + 1, "String")?)
                .map_err(encode_error)?;
            out.push(ParticleType::String.tag());
            out.extend_from_slice(s.as_bytes());
        }
        Value::List(items) => pack(items, out)?,
    }
    Ok(())
}

fn wire_len(len: usize, kind: &str) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        WireError::UnsupportedType(format!("{} of length {} exceeds 32-bit limit", kind, len))
    })
}

fn encode_error<E: std::fmt::Display>(e: E) -> WireError {
    WireError::Format(format!("MessagePack encode failed: {}", e))
}

/// Exact encoded size of a list, matching what `pack` emits
pub(super) fn encoded_len(items: &[Value]) -> usize {
    container_header_len(items.len()) + items.iter().map(element_len).sum::<usize>()
}

fn element_len(value: &Value) -> usize {
    match value {
        Value::Undef => 1,
        Value::Integer(i) => sint_len(*i),
        Value::Double(_) => 9,
        Value::String(s) => str_header_len(s.len() + 1) + s.len() + 1,
        Value::List(items) => encoded_len(items),
    }
}

fn container_header_len(len: usize) -> usize {
    match len {
        0..=15 => 1,
        16..=0xFFFF => 3,
        _ => 5,
    }
}

fn str_header_len(len: usize) -> usize {
    match len {
        0..=31 => 1,
        32..=0xFF => 2,
        0x100..=0xFFFF => 3,
        _ => 5,
    }
}

// Mirrors rmp::encode::write_sint's choice of the most compact marker.
fn sint_len(i: i64) -> usize {
    match i {
        -32..=127 => 1,
        -128..=-33 | 128..=255 => 2,
        -32768..=-129 | 256..=65535 => 3,
        -2147483648..=-32769 | 65536..=4294967295 => 5,
        _ => 9,
    }
}

// =============================================================================
// Decoding
// =============================================================================

pub(super) fn unpack(data: &[u8]) -> Result<Vec<Value>> {
    let mut reader = WireReader::new(data);
    let items = match unpack_element(&mut reader, 0)? {
        Value::List(items) => items,
        other => {
            return Err(WireError::Format(format!(
                "List payload does not start with an array (found {:?})",
                other.particle_type()
            )))
        }
    };
    reader.finish("List payload")?;
    Ok(items)
}

fn unpack_element(reader: &mut WireReader<'_>, depth: usize) -> Result<Value> {
    let marker = Marker::from_u8(reader.read_u8()?);
    let value = match marker {
        Marker::Null => Value::Undef,

        Marker::FixPos(n) => Value::Integer(i64::from(n)),
        Marker::FixNeg(n) => Value::Integer(i64::from(n)),
        Marker::U8 => Value::Integer(i64::from(reader.read_u8()?)),
        Marker::U16 => Value::Integer(i64::from(reader.read_u16()?)),
        Marker::U32 => Value::Integer(i64::from(reader.read_u32()?)),
        Marker::U64 => {
            let n = reader.read_u64()?;
            Value::Integer(i64::try_from(n).map_err(|_| {
                WireError::Format(format!("List integer {} exceeds signed 64 bits", n))
            })?)
        }
        Marker::I8 => Value::Integer(i64::from(reader.read_u8()? as i8)),
        Marker::I16 => Value::Integer(i64::from(reader.read_u16()? as i16)),
        Marker::I32 => Value::Integer(i64::from(reader.read_u32()? as i32)),
        Marker::I64 => Value::Integer(reader.read_i64()?),

        Marker::F32 => Value::Double(f64::from(reader.read_f32()?)),
        Marker::F64 => Value::Double(reader.read_f64()?),

        Marker::FixStr(n) => unpack_string(reader, usize::from(n))?,
        Marker::Str8 | Marker::Bin8 => {
            let len = usize::from(reader.read_u8()?);
            unpack_string(reader, len)?
        }
        Marker::Str16 | Marker::Bin16 => {
            let len = usize::from(reader.read_u16()?);
            unpack_string(reader, len)?
        }
        Marker::Str32 | Marker::Bin32 => {
            let len = reader.read_u32()? as usize;
            unpack_string(reader, len)?
        }

        Marker::FixArray(n) => unpack_array(reader, usize::from(n), depth)?,
        Marker::Array16 => {
            let len = usize::from(reader.read_u16()?);
            unpack_array(reader, len, depth)?
        }
        Marker::Array32 => {
            let len = reader.read_u32()? as usize;
            unpack_array(reader, len, depth)?
        }

        Marker::FixMap(_) | Marker::Map16 | Marker::Map32 => {
            return Err(WireError::UnsupportedType(
                "Map elements have no wire encoding".to_string(),
            ))
        }
        other => {
            return Err(WireError::UnsupportedType(format!(
                "Unsupported list element marker {:?}",
                other
            )))
        }
    };
    Ok(value)
}

fn unpack_array(reader: &mut WireReader<'_>, len: usize, depth: usize) -> Result<Value> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(WireError::Format(format!(
            "List nesting deeper than {}",
            MAX_NESTING_DEPTH
        )));
    }
    // Every element needs at least one byte, which bounds the allocation.
    let mut items = Vec::with_capacity(len.min(reader.remaining()));
    for _ in 0..len {
        items.push(unpack_element(reader, depth + 1)?);
    }
    Ok(Value::List(items))
}

fn unpack_string(reader: &mut WireReader<'_>, len: usize) -> Result<Value> {
    if len == 0 {
        return Err(WireError::Format(
            "List string element missing particle type byte".to_string(),
        ));
    }
    let tag = reader.read_u8()?;
    if tag != ParticleType::String.tag() {
        return Err(WireError::UnsupportedType(format!(
            "Unsupported particle type {} inside list",
            tag
        )));
    }
    Ok(Value::String(reader.read_str(len - 1)?.to_owned()))
}
