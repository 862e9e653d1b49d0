//! Frame header
//!
//! Outermost 8-byte envelope around every message.
//!
//! ```text
//! ┌────────────┬──────────┬──────────────────────────┐
//! │ Version(1) │ Type(1)  │ Payload length (6, BE)   │
//! │    = 2     │          │                          │
//! └────────────┴──────────┴──────────────────────────┘
//! ```

use bytes::BufMut;

use crate::error::{Result, WireError};
use crate::reader::WireReader;

/// Header size: version (1) + type (1) + length (6)
pub const FRAME_HEADER_SIZE: usize = 8;

/// The only protocol version this codec speaks
pub const PROTOCOL_VERSION: u8 = 2;

/// Largest payload length a 48-bit length field can carry
pub const MAX_FRAME_LENGTH: u64 = (1 << 48) - 1;

/// Message types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageType {
    Info = 1,
    Admin = 2,
    Message = 3,
    Compressed = 4,
}

impl TryFrom<u8> for MessageType {
    type Error = WireError;

    fn try_from(byte: u8) -> Result<Self> {
        match byte {
            1 => Ok(MessageType::Info),
            2 => Ok(MessageType::Admin),
            3 => Ok(MessageType::Message),
            4 => Ok(MessageType::Compressed),
            _ => Err(WireError::UnsupportedType(format!(
                "Unknown message type: 0x{:02x}",
                byte
            ))),
        }
    }
}

/// Parsed or to-be-written frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub message_type: MessageType,

    /// Exact byte length of the payload that follows the header
    pub length: u64,
}

impl FrameHeader {
    pub fn new(message_type: MessageType, length: u64) -> Self {
        Self {
            message_type,
            length,
        }
    }

    /// Encode to the fixed 8-byte form
    pub fn pack(&self) -> Result<[u8; FRAME_HEADER_SIZE]> {
        if self.length > MAX_FRAME_LENGTH {
            return Err(WireError::Format(format!(
                "Payload length {} exceeds 48-bit frame limit",
                self.length
            )));
        }

        let mut out = [0u8; FRAME_HEADER_SIZE];
        let mut buf = &mut out[..];
        buf.put_u8(PROTOCOL_VERSION);
        buf.put_u8(self.message_type as u8);
        buf.put_uint(self.length, 6);
        Ok(out)
    }

    /// Decode from the first 8 bytes of `bytes`
    pub fn unpack(bytes: &[u8]) -> Result<Self> {
        Self::read_from(&mut WireReader::new(bytes))
    }

    pub(crate) fn read_from(reader: &mut WireReader<'_>) -> Result<Self> {
        let version = reader.read_u8()?;
        if version != PROTOCOL_VERSION {
            tracing::warn!("Rejecting frame with protocol version {}", version);
            return Err(WireError::Format(format!(
                "Unsupported protocol version: {} (expected {})",
                version, PROTOCOL_VERSION
            )));
        }
        let message_type = MessageType::try_from(reader.read_u8()?)?;
        let length = reader.read_u48()?;

        Ok(Self {
            message_type,
            length,
        })
    }
}
