//! Message base
//!
//! Fixed 22-byte record header that opens every message payload.
//!
//! ```text
//! ┌──────────┬───────┬───────┬───────┬─────┬────────┬─────────┬─────────┬─────────┬────────┬────────┐
//! │ Size (1) │ I1(1) │ I2(1) │ I3(1) │ Pad │ Res(1) │ Gen (4) │ RTTL(4) │ TTTL(4) │ NF (2) │ NB (2) │
//! └──────────┴───────┴───────┴───────┴─────┴────────┴─────────┴─────────┴─────────┴────────┴────────┘
//! ```

use bytes::BufMut;

use super::flags::{Info1Flags, Info2Flags, Info3Flags};
use crate::error::Result;
use crate::reader::WireReader;

/// Fixed size of the record header, also written as its first byte
pub const MESSAGE_BASE_SIZE: usize = 22;

/// Record header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageBase {
    /// Size byte as received. Packing always writes `MESSAGE_BASE_SIZE`.
    pub self_size: u8,

    pub info1: Info1Flags,
    pub info2: Info2Flags,
    pub info3: Info3Flags,

    /// 0 on success, otherwise a server result code
    pub result_code: u8,

    pub generation: u32,
    pub record_ttl: u32,
    pub transaction_ttl: u32,

    /// Number of field records that follow
    pub field_count: u16,

    /// Number of bin records that follow the fields
    pub bin_count: u16,
}

impl Default for MessageBase {
    fn default() -> Self {
        Self {
            self_size: MESSAGE_BASE_SIZE as u8,
            info1: Info1Flags::empty(),
            info2: Info2Flags::empty(),
            info3: Info3Flags::empty(),
            result_code: 0,
            generation: 0,
            record_ttl: 0,
            transaction_ttl: 0,
            field_count: 0,
            bin_count: 0,
        }
    }
}

impl MessageBase {
    pub fn pack(&self) -> [u8; MESSAGE_BASE_SIZE] {
        let mut out = [0u8; MESSAGE_BASE_SIZE];
        let mut buf = &mut out[..];
        buf.put_u8(MESSAGE_BASE_SIZE as u8);
        buf.put_u8(self.info1.bits());
        buf.put_u8(self.info2.bits());
        buf.put_u8(self.info3.bits());
        buf.put_u8(0);
        buf.put_u8(self.result_code);
        buf.put_u32(self.generation);
        buf.put_u32(self.record_ttl);
        buf.put_u32(self.transaction_ttl);
        buf.put_u16(self.field_count);
        buf.put_u16(self.bin_count);
        out
    }

    pub fn unpack(bytes: &[u8]) -> Result<Self> {
        Self::read_from(&mut WireReader::new(bytes))
    }

    pub(crate) fn read_from(reader: &mut WireReader<'_>) -> Result<Self> {
        let self_size = reader.read_u8()?;
        let info1 = Info1Flags::from_bits_retain(reader.read_u8()?);
        let info2 = Info2Flags::from_bits_retain(reader.read_u8()?);
        let info3 = Info3Flags::from_bits_retain(reader.read_u8()?);
        let _pad = reader.read_u8()?;

        Ok(Self {
            self_size,
            info1,
            info2,
            info3,
            result_code: reader.read_u8()?,
            generation: reader.read_u32()?,
            record_ttl: reader.read_u32()?,
            transaction_ttl: reader.read_u32()?,
            field_count: reader.read_u16()?,
            bin_count: reader.read_u16()?,
        })
    }
}
