//! Field records
//!
//! ```text
//! ┌──────────────┬──────────┬─────────────────────┐
//! │ Length (4)   │ Type (1) │ Payload (Length-1)  │
//! └──────────────┴──────────┴─────────────────────┘
//! ```
//!
//! The length counts the type byte plus the payload.

use bytes::BufMut;

use super::digest::{Digest, DIGEST_SIZE};
use crate::error::{Result, WireError};
use crate::reader::WireReader;
use crate::value::Value;

/// Field header size: length (4) + type (1)
pub const FIELD_HEADER_SIZE: usize = 5;

/// Field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FieldType {
    Namespace = 0,
    Set = 1,
    /// Original user key (particle type + packed bytes)
    Key = 2,
    /// 20-byte key digest
    Digest = 4,
}

impl TryFrom<u8> for FieldType {
    type Error = WireError;

    fn try_from(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(FieldType::Namespace),
            1 => Ok(FieldType::Set),
            2 => Ok(FieldType::Key),
            4 => Ok(FieldType::Digest),
            _ => Err(WireError::UnsupportedType(format!(
                "Unknown field type: {}",
                byte
            ))),
        }
    }
}

/// One typed, length-prefixed field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub field_type: FieldType,
    pub data: Vec<u8>,
}

impl Field {
    pub fn namespace(namespace: &str) -> Self {
        Self {
            field_type: FieldType::Namespace,
            data: namespace.as_bytes().to_vec(),
        }
    }

    pub fn set(name: &str) -> Self {
        Self {
            field_type: FieldType::Set,
            data: name.as_bytes().to_vec(),
        }
    }

    pub fn digest(digest: &Digest) -> Self {
        Self {
            field_type: FieldType::Digest,
            data: digest.as_bytes().to_vec(),
        }
    }

    /// Literal user key, for servers that store the key alongside the record
    pub fn user_key(key: &Value) -> Result<Self> {
        let mut data = Vec::with_capacity(1 + key.encoded_len());
        data.push(key.particle_type().tag());
        key.write_data(&mut data)?;
        Ok(Self {
            field_type: FieldType::Key,
            data,
        })
    }

    /// Total bytes this field occupies on the wire
    pub fn encoded_len(&self) -> usize {
        FIELD_HEADER_SIZE + self.data.len()
    }

    pub fn pack(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out)?;
        Ok(out)
    }

    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        let length = u32::try_from(self.data.len() + 1).map_err(|_| {
            WireError::Format(format!("Field payload of {} bytes too large", self.data.len()))
        })?;
        out.put_u32(length);
        out.put_u8(self.field_type as u8);
        out.put_slice(&self.data);
        Ok(())
    }

    /// Decode one field from the front of `bytes`, returning it with the
    /// number of bytes consumed
    pub fn unpack(bytes: &[u8]) -> Result<(Self, usize)> {
        let mut reader = WireReader::new(bytes);
        let field = Self::read_from(&mut reader)?;
        Ok((field, reader.position()))
    }

    pub(crate) fn read_from(reader: &mut WireReader<'_>) -> Result<Self> {
        let length = reader.read_u32()? as usize;
        if length == 0 {
            return Err(WireError::Format(
                "Field length 0 leaves no room for the type byte".to_string(),
            ));
        }
        let field_type = FieldType::try_from(reader.read_u8()?)?;
        let data = reader.read_bytes(length - 1)?;

        if field_type == FieldType::Digest && data.len() != DIGEST_SIZE {
            return Err(WireError::Format(format!(
                "Digest field must carry {} bytes, got {}",
                DIGEST_SIZE,
                data.len()
            )));
        }

        Ok(Self {
            field_type,
            data: data.to_vec(),
        })
    }

    /// Payload as text (namespace and set fields)
    pub fn as_str(&self) -> Result<&str> {
        std::str::from_utf8(&self.data)
            .map_err(|e| WireError::Format(format!("{:?} field is not UTF-8: {}", self.field_type, e)))
    }

    /// Payload as a digest (digest fields)
    pub fn as_digest(&self) -> Result<Digest> {
        if self.field_type != FieldType::Digest {
            return Err(WireError::UnsupportedType(format!(
                "{:?} field does not carry a digest",
                self.field_type
            )));
        }
        Digest::from_bytes(&self.data)
    }
}
