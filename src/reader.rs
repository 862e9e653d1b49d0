//! Wire Reader
//!
//! Bounds-checked cursor over a received buffer. Every read advances the
//! position, so count-driven record walks (fields, bins, list elements) never
//! re-slice the buffer or lose track of how much has been consumed.

use bytes::Buf;

use crate::error::{Result, WireError};

/// Sequential big-endian reader over a borrowed byte slice
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to consume
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Unconsumed tail of the buffer
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Take exactly `len` bytes or fail without moving the cursor
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(WireError::Format(format!(
                "Truncated buffer: need {} bytes at offset {}, {} available",
                len,
                self.pos,
                self.remaining()
            )));
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Take exactly `len` bytes and decode them as UTF-8
    pub fn read_str(&mut self, len: usize) -> Result<&'a str> {
        let at = self.pos;
        let bytes = self.read_bytes(len)?;
        std::str::from_utf8(bytes)
            .map_err(|e| WireError::Format(format!("Invalid UTF-8 at offset {}: {}", at, e)))
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(self.read_bytes(2)?.get_u16())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(self.read_bytes(4)?.get_u32())
    }

    /// 6-byte big-endian unsigned integer
    pub fn read_u48(&mut self) -> Result<u64> {
        Ok(self.read_bytes(6)?.get_uint(6))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(self.read_bytes(8)?.get_u64())
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(self.read_bytes(8)?.get_i64())
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(self.read_bytes(4)?.get_f32())
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(self.read_bytes(8)?.get_f64())
    }

    /// Fail if anything is left unconsumed
    pub fn finish(&self, what: &str) -> Result<()> {
        if !self.is_empty() {
            return Err(WireError::Format(format!(
                "{}: {} trailing bytes after offset {}",
                what,
                self.remaining(),
                self.pos
            )));
        }
        Ok(())
    }
}
