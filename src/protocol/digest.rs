//! Key digest
//!
//! A record's storage identity is a RIPEMD-160 hash over
//! `set name (if any) ++ particle type ++ packed key bytes`. The server hashes
//! the same bytes to locate the record, so any drift here silently addresses a
//! different record.

use std::fmt;

use ripemd::{Digest as _, Ripemd160};

use crate::error::{Result, WireError};
use crate::value::Value;

/// Digest length in bytes
pub const DIGEST_SIZE: usize = 20;

/// 20-byte record identity
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    /// Digest of a user key. Only string and integer keys are addressable.
    pub fn compute(key: &Value, set: Option<&str>) -> Result<Self> {
        match key {
            Value::String(_) | Value::Integer(_) => {}
            other => {
                return Err(WireError::UnsupportedType(format!(
                    "{:?} values cannot be used as keys",
                    other.particle_type()
                )))
            }
        }
        let data = key.pack_data()?;
        Ok(Self::compute_raw(set, key.particle_type().tag(), &data))
    }

    /// Hash already-packed key material
    pub fn compute_raw(set: Option<&str>, tag: u8, data: &[u8]) -> Self {
        let mut hasher = Ripemd160::new();
        if let Some(set) = set {
            hasher.update(set.as_bytes());
        }
        hasher.update([tag]);
        hasher.update(data);

        let mut out = [0u8; DIGEST_SIZE];
        out.copy_from_slice(&hasher.finalize());
        Self(out)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; DIGEST_SIZE] = bytes.try_into().map_err(|_| {
            WireError::Format(format!(
                "Digest must be {} bytes, got {}",
                DIGEST_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self(raw))
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(raw: [u8; DIGEST_SIZE]) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
