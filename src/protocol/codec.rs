//! Protocol codec
//!
//! Whole-message helpers on top of the record codecs.
//!
//! ## Message Layout
//! ```text
//! ┌──────────────┬──────────────────┬──────────┬──────────┐
//! │ Frame (8)    │ MessageBase (22) │ Fields   │ Bins     │
//! └──────────────┴──────────────────┴──────────┴──────────┘
//! ```
//!
//! The stream helpers only honour the transport contract: write the exact
//! bytes of a request, read exactly 8 header bytes and then exactly the
//! announced payload. They open nothing and retry nothing.

use std::io::{Read, Write};

use super::header::{FrameHeader, MessageType, FRAME_HEADER_SIZE};
use super::request::Request;
use super::response::Response;
use crate::config::Config;
use crate::error::{Result, WireError};
use crate::reader::WireReader;

// =============================================================================
// Buffer helpers
// =============================================================================

/// Parse a complete response message (frame header included)
pub fn parse_message(bytes: &[u8]) -> Result<Response> {
    let mut reader = WireReader::new(bytes);
    let header = FrameHeader::read_from(&mut reader)?;
    expect_message(&header)?;

    if header.length != reader.remaining() as u64 {
        return Err(WireError::Format(format!(
            "Frame announces {} payload bytes, buffer holds {}",
            header.length,
            reader.remaining()
        )));
    }

    Response::parse(reader.rest())
}

fn expect_message(header: &FrameHeader) -> Result<()> {
    match header.message_type {
        MessageType::Message => Ok(()),
        other => Err(WireError::UnsupportedType(format!(
            "Expected a record message, got {:?}",
            other
        ))),
    }
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one frame: exactly 8 header bytes, then exactly the payload
pub fn read_frame<R: Read>(reader: &mut R, max_payload: u64) -> Result<(FrameHeader, Vec<u8>)> {
    let mut header_bytes = [0u8; FRAME_HEADER_SIZE];
    reader.read_exact(&mut header_bytes)?;
    let header = FrameHeader::unpack(&header_bytes)?;

    if header.length > max_payload {
        tracing::warn!(
            "Rejecting frame of {} bytes (limit {})",
            header.length,
            max_payload
        );
        return Err(WireError::Format(format!(
            "Payload too large: {} bytes (max {})",
            header.length, max_payload
        )));
    }

    let mut payload = vec![0u8; header.length as usize];
    if !payload.is_empty() {
        reader.read_exact(&mut payload)?;
    }

    tracing::trace!(
        "Read {:?} frame with {} payload bytes",
        header.message_type,
        header.length
    );
    Ok((header, payload))
}

/// Read and parse one response message
pub fn read_response<R: Read>(reader: &mut R, config: &Config) -> Result<Response> {
    let (header, payload) = read_frame(reader, config.max_payload_size)?;
    expect_message(&header)?;
    Response::parse(&payload)
}

/// Write a request to a stream
pub fn write_request<W: Write>(writer: &mut W, request: &Request) -> Result<()> {
    let bytes = request.pack()?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
