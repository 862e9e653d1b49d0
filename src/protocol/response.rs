//! Response parsing
//!
//! A response payload is a `MessageBase` followed by `field_count` fields and
//! `bin_count` bins. Records are walked one at a time with a single cursor and
//! the payload must be consumed exactly.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::base::MessageBase;
use super::bin::Bin;
use super::field::Field;
use crate::error::{Result, WireError};
use crate::reader::WireReader;
use crate::value::Value;

/// Raw server result code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultCode(pub u8);

impl ResultCode {
    pub const OK: ResultCode = ResultCode(0);

    pub fn is_success(self) -> bool {
        self == Self::OK
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lookup from result code to a human-readable description.
///
/// The codec carries codes only; callers supply the table.
pub trait ErrorTable {
    fn describe(&self, code: u8) -> Option<&str>;
}

impl ErrorTable for HashMap<u8, String> {
    fn describe(&self, code: u8) -> Option<&str> {
        self.get(&code).map(String::as_str)
    }
}

impl ErrorTable for BTreeMap<u8, String> {
    fn describe(&self, code: u8) -> Option<&str> {
        self.get(&code).map(String::as_str)
    }
}

/// A parsed response message
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub result_code: ResultCode,
    pub generation: u32,
    pub record_ttl: u32,

    /// `None` when the server returned no bins at all, as opposed to
    /// `Some` of an empty map
    pub bins: Option<BTreeMap<String, Value>>,
}

impl Response {
    /// Parse a payload (everything after the frame header)
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut reader = WireReader::new(payload);
        let base = MessageBase::read_from(&mut reader)?;

        for _ in 0..base.field_count {
            let field = Field::read_from(&mut reader)?;
            tracing::trace!("Skipping response field {:?}", field.field_type);
        }

        let bins = if base.bin_count == 0 {
            None
        } else {
            let mut bins = BTreeMap::new();
            for _ in 0..base.bin_count {
                let bin = Bin::read_from(&mut reader)?;
                bins.insert(bin.name, bin.value);
            }
            Some(bins)
        };

        reader.finish("Response payload")?;

        tracing::debug!(
            result_code = base.result_code,
            generation = base.generation,
            bins = base.bin_count,
            "Parsed response"
        );

        Ok(Self {
            result_code: ResultCode(base.result_code),
            generation: base.generation,
            record_ttl: base.record_ttl,
            bins,
        })
    }

    /// Whether the server reported success
    pub fn is_ok(&self) -> bool {
        self.result_code.is_success()
    }

    /// Turn a non-zero result code into `WireError::ProtocolStatus`
    pub fn assert_ok(&self, table: &dyn ErrorTable) -> Result<()> {
        if self.is_ok() {
            return Ok(());
        }
        let code = self.result_code.0;
        let message = table
            .describe(code)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("unknown status {}", code));
        Err(WireError::ProtocolStatus { code, message })
    }

    pub fn bins(&self) -> Option<&BTreeMap<String, Value>> {
        self.bins.as_ref()
    }

    /// Value of one bin, if the response carried it
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bins.as_ref().and_then(|bins| bins.get(name))
    }
}
