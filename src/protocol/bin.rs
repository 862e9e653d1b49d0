//! Bin records
//!
//! One named value slot plus the operation applied to it.
//!
//! ```text
//! ┌────────────┬────────┬──────────┬─────────┬─────────┬──────────┬───────────┐
//! │ Length (4) │ Op (1) │ Type (1) │ Ver (1) │ NLen(1) │ Name     │ Value     │
//! └────────────┴────────┴──────────┴─────────┴─────────┴──────────┴───────────┘
//! ```
//!
//! The length covers everything after itself, opcode included.

use bytes::BufMut;

use crate::error::{Result, WireError};
use crate::reader::WireReader;
use crate::value::Value;

/// Bin header size: length (4) + op (1) + type (1) + version (1) + name length (1)
pub const BIN_HEADER_SIZE: usize = 8;

/// Longest bin name the 1-byte length can describe
pub const MAX_BIN_NAME_LEN: usize = u8::MAX as usize;

/// Operation codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Operation {
    Read = 1,
    Write = 2,
    CdtRead = 3,
    CdtModify = 4,
    Increment = 5,
    MapRead = 6,
    MapModify = 7,
    Append = 9,
    Prepend = 10,
    Touch = 11,
    BitRead = 12,
    BitModify = 13,
    Delete = 14,
}

impl Operation {
    /// Operations that only return data
    pub fn is_read(self) -> bool {
        matches!(
            self,
            Operation::Read | Operation::CdtRead | Operation::MapRead | Operation::BitRead
        )
    }

    /// Operations that change the record
    pub fn is_write(self) -> bool {
        !self.is_read()
    }
}

impl TryFrom<u8> for Operation {
    type Error = WireError;

    fn try_from(byte: u8) -> Result<Self> {
        match byte {
            1 => Ok(Operation::Read),
            2 => Ok(Operation::Write),
            3 => Ok(Operation::CdtRead),
            4 => Ok(Operation::CdtModify),
            5 => Ok(Operation::Increment),
            6 => Ok(Operation::MapRead),
            7 => Ok(Operation::MapModify),
            9 => Ok(Operation::Append),
            10 => Ok(Operation::Prepend),
            11 => Ok(Operation::Touch),
            12 => Ok(Operation::BitRead),
            13 => Ok(Operation::BitModify),
            14 => Ok(Operation::Delete),
            _ => Err(WireError::UnsupportedType(format!(
                "Unknown operation code: {}",
                byte
            ))),
        }
    }
}

/// A named value slot with its operation
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub operation: Operation,
    pub version: u8,
    pub name: String,
    pub value: Value,
}

impl Bin {
    pub fn new(name: impl Into<String>, operation: Operation, value: Value) -> Self {
        Self {
            operation,
            version: 0,
            name: name.into(),
            value,
        }
    }

    /// Overwrite `name` with `value`
    pub fn write(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(name, Operation::Write, value.into())
    }

    /// Fetch `name`; carries no value
    pub fn read(name: impl Into<String>) -> Self {
        Self::new(name, Operation::Read, Value::Undef)
    }

    /// Total bytes this bin occupies on the wire
    pub fn encoded_len(&self) -> usize {
        BIN_HEADER_SIZE + self.name.len() + self.value.encoded_len()
    }

    pub fn pack(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out)?;
        Ok(out)
    }

    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        let name_len = u8::try_from(self.name.len()).map_err(|_| {
            WireError::Format(format!(
                "Bin name of {} bytes exceeds {}",
                self.name.len(),
                MAX_BIN_NAME_LEN
            ))
        })?;
        let length = u32::try_from(self.encoded_len() - 4).map_err(|_| {
            WireError::Format(format!("Bin '{}' too large to encode", self.name))
        })?;

        out.put_u32(length);
        out.put_u8(self.operation as u8);
        out.put_u8(self.value.particle_type().tag());
        out.put_u8(self.version);
        out.put_u8(name_len);
        out.put_slice(self.name.as_bytes());
        self.value.write_data(out)
    }

    /// Decode one bin from the front of `bytes`, returning it with the number
    /// of bytes consumed
    pub fn unpack(bytes: &[u8]) -> Result<(Self, usize)> {
        let mut reader = WireReader::new(bytes);
        let bin = Self::read_from(&mut reader)?;
        Ok((bin, reader.position()))
    }

    pub(crate) fn read_from(reader: &mut WireReader<'_>) -> Result<Self> {
        let length = reader.read_u32()? as usize;
        if length < BIN_HEADER_SIZE - 4 {
            return Err(WireError::Format(format!(
                "Bin length {} shorter than its {}-byte sub-header",
                length,
                BIN_HEADER_SIZE - 4
            )));
        }

        // Everything below stays inside the declared extent.
        let mut record = WireReader::new(reader.read_bytes(length)?);
        let operation = Operation::try_from(record.read_u8()?)?;
        let tag = record.read_u8()?;
        let version = record.read_u8()?;
        let name_len = usize::from(record.read_u8()?);
        let name = record.read_str(name_len)?.to_owned();
        let value = Value::unpack(tag, record.rest())?;

        Ok(Self {
            operation,
            version,
            name,
            value,
        })
    }
}
