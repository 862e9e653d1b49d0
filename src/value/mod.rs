//! Value Module
//!
//! Typed values ("particles") carried in bins and used as user keys.
//!
//! ## Particle Types
//! ```text
//! ┌──────┬──────────┬──────────────────────────────────────────┐
//! │ Tag  │ Kind     │ Wire encoding                            │
//! ├──────┼──────────┼──────────────────────────────────────────┤
//! │  0   │ Undef    │ empty                                    │
//! │  1   │ Integer  │ 8 bytes, big-endian two's complement     │
//! │  2   │ Double   │ 8 bytes, IEEE754 big-endian              │
//! │  3   │ String   │ raw UTF-8, length implied by the record  │
//! │ 19   │ Map      │ reserved, no wire form                   │
//! │ 20   │ List     │ MessagePack array of tagged elements     │
//! └──────┴──────────┴──────────────────────────────────────────┘
//! ```

mod list;

pub use list::MAX_NESTING_DEPTH;

use std::fmt;

use crate::error::{Result, WireError};

/// Particle type tag as it appears on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ParticleType {
    Undef = 0,
    Integer = 1,
    Double = 2,
    String = 3,
    Map = 19,
    List = 20,
}

/// Every tag this codec recognises, in tag order
pub const PARTICLE_TYPES: [ParticleType; 6] = [
    ParticleType::Undef,
    ParticleType::Integer,
    ParticleType::Double,
    ParticleType::String,
    ParticleType::Map,
    ParticleType::List,
];

impl ParticleType {
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ParticleType {
    type Error = WireError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(ParticleType::Undef),
            1 => Ok(ParticleType::Integer),
            2 => Ok(ParticleType::Double),
            3 => Ok(ParticleType::String),
            19 => Ok(ParticleType::Map),
            20 => Ok(ParticleType::List),
            _ => Err(WireError::UnsupportedType(format!(
                "Unknown particle type: {}",
                tag
            ))),
        }
    }
}

/// A single typed value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value (read requests, absent bins)
    Undef,

    /// UTF-8 text
    String(String),

    /// Signed 64-bit integer
    Integer(i64),

    /// IEEE754 double
    Double(f64),

    /// Ordered sequence of values
    List(Vec<Value>),
}

impl Value {
    /// Tag written in front of this value's payload
    pub fn particle_type(&self) -> ParticleType {
        match self {
            Value::Undef => ParticleType::Undef,
            Value::String(_) => ParticleType::String,
            Value::Integer(_) => ParticleType::Integer,
            Value::Double(_) => ParticleType::Double,
            Value::List(_) => ParticleType::List,
        }
    }

    /// Canonical payload bytes (no tag, no length prefix)
    pub fn pack_data(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_data(&mut out)?;
        Ok(out)
    }

    /// Append the canonical payload bytes to `out`
    pub fn write_data(&self, out: &mut Vec<u8>) -> Result<()> {
        match self {
            Value::Undef => {}
            Value::String(s) => out.extend_from_slice(s.as_bytes()),
            Value::Integer(i) => out.extend_from_slice(&i.to_be_bytes()),
            Value::Double(d) => out.extend_from_slice(&d.to_be_bytes()),
            Value::List(items) => list::pack(items, out)?,
        }
        Ok(())
    }

    /// Exact size of `pack_data()` output
    pub fn encoded_len(&self) -> usize {
        match self {
            Value::Undef => 0,
            Value::String(s) => s.len(),
            Value::Integer(_) | Value::Double(_) => 8,
            Value::List(items) => list::encoded_len(items),
        }
    }

    /// Decode a payload whose extent is already known from the enclosing record
    pub fn unpack(tag: u8, data: &[u8]) -> Result<Value> {
        match ParticleType::try_from(tag)? {
            ParticleType::Undef => {
                if !data.is_empty() {
                    return Err(WireError::Format(format!(
                        "Undef value with {} payload bytes",
                        data.len()
                    )));
                }
                Ok(Value::Undef)
            }
            ParticleType::Integer => Ok(Value::Integer(i64::from_be_bytes(fixed8(data, "Integer")?))),
            ParticleType::Double => Ok(Value::Double(f64::from_be_bytes(fixed8(data, "Double")?))),
            ParticleType::String => std::str::from_utf8(data)
                .map(|s| Value::String(s.to_owned()))
                .map_err(|e| WireError::Format(format!("String value is not UTF-8: {}", e))),
            ParticleType::List => Ok(Value::List(list::unpack(data)?)),
            ParticleType::Map => Err(WireError::UnsupportedType(
                "Map values have no wire encoding".to_string(),
            )),
        }
    }

    pub fn is_undef(&self) -> bool {
        matches!(self, Value::Undef)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

fn fixed8(data: &[u8], kind: &str) -> Result<[u8; 8]> {
    data.try_into().map_err(|_| {
        WireError::Format(format!(
            "{} value must be 8 bytes, got {}",
            kind,
            data.len()
        ))
    })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undef => write!(f, "undef"),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Double(d) => write!(f, "{:?}", d),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

// =============================================================================
// Host value conversions
// =============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Undef, Into::into)
    }
}

/// Integers above `i64::MAX` have no wire form
impl TryFrom<u64> for Value {
    type Error = WireError;

    fn try_from(i: u64) -> Result<Self> {
        i64::try_from(i).map(Value::Integer).map_err(|_| {
            WireError::UnsupportedType(format!("Integer {} does not fit in signed 64 bits", i))
        })
    }
}
