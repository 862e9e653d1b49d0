//! Request assembly
//!
//! A request is one `MessageBase`, the key fields (namespace, optional set,
//! digest) and zero or more bins, wrapped in a `Message` frame.

use super::base::{MessageBase, MESSAGE_BASE_SIZE};
use super::bin::{Bin, Operation};
use super::digest::Digest;
use super::field::Field;
use super::flags::{Info1Flags, Info2Flags};
use super::header::{FrameHeader, MessageType, FRAME_HEADER_SIZE};
use crate::config::Config;
use crate::error::{Result, WireError};
use crate::value::Value;

/// Record address: namespace, optional set and user key, with the digest
/// computed once up front
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    namespace: String,
    set: Option<String>,
    user_key: Value,
    digest: Digest,
}

impl Key {
    /// An empty set name is treated as no set.
    pub fn new(
        namespace: impl Into<String>,
        set: Option<&str>,
        user_key: impl Into<Value>,
    ) -> Result<Self> {
        let set = set.filter(|s| !s.is_empty()).map(str::to_owned);
        let user_key = user_key.into();
        let digest = Digest::compute(&user_key, set.as_deref())?;

        Ok(Self {
            namespace: namespace.into(),
            set,
            user_key,
            digest,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn set(&self) -> Option<&str> {
        self.set.as_deref()
    }

    pub fn user_key(&self) -> &Value {
        &self.user_key
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::with_capacity(3);
        fields.push(Field::namespace(&self.namespace));
        if let Some(set) = &self.set {
            fields.push(Field::set(set));
        }
        fields.push(Field::digest(&self.digest));
        fields
    }
}

/// A fully assembled request, ready to pack
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub base: MessageBase,
    pub fields: Vec<Field>,
    pub bins: Vec<Bin>,
}

impl Request {
    /// Combine header, fields and bins, filling in the record counts
    pub fn new(mut base: MessageBase, fields: Vec<Field>, bins: Vec<Bin>) -> Result<Self> {
        base.field_count = count(fields.len(), "fields")?;
        base.bin_count = count(bins.len(), "bins")?;
        Ok(Self { base, fields, bins })
    }

    /// Size of the body without the frame header
    pub fn payload_len(&self) -> usize {
        MESSAGE_BASE_SIZE
            + self.fields.iter().map(Field::encoded_len).sum::<usize>()
            + self.bins.iter().map(Bin::encoded_len).sum::<usize>()
    }

    /// Body without the frame header
    pub fn payload(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.payload_len());
        self.write_payload(&mut out)?;
        Ok(out)
    }

    /// Frame header followed by the body
    pub fn pack(&self) -> Result<Vec<u8>> {
        let payload_len = self.payload_len();
        let header = FrameHeader::new(MessageType::Message, payload_len as u64).pack()?;

        let mut out = Vec::with_capacity(FRAME_HEADER_SIZE + payload_len);
        out.extend_from_slice(&header);
        self.write_payload(&mut out)?;

        debug_assert_eq!(out.len(), FRAME_HEADER_SIZE + payload_len);
        tracing::trace!(
            "Packed request: {} fields, {} bins, {} payload bytes",
            self.fields.len(),
            self.bins.len(),
            payload_len
        );
        Ok(out)
    }

    fn write_payload(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&self.base.pack());
        for field in &self.fields {
            field.write_to(out)?;
        }
        for bin in &self.bins {
            bin.write_to(out)?;
        }
        Ok(())
    }
}

fn count(len: usize, what: &str) -> Result<u16> {
    u16::try_from(len)
        .map_err(|_| WireError::Format(format!("Too many {}: {} (max {})", what, len, u16::MAX)))
}

/// Info flags implied by a batch of operations: any read-class op sets
/// `READ`, any write-class op sets `WRITE`, independently of each other
pub fn derive_flags(bins: &[Bin]) -> (Info1Flags, Info2Flags) {
    let mut info1 = Info1Flags::empty();
    let mut info2 = Info2Flags::empty();
    for bin in bins {
        if bin.operation.is_read() {
            info1 |= Info1Flags::READ;
        } else {
            info2 |= Info2Flags::WRITE;
        }
    }
    (info1, info2)
}

/// Builds the canonical request shapes using shared defaults
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    config: Config,
}

impl RequestBuilder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Write every `(name, value)` pair
    pub fn write<I, N, V>(&self, key: &Key, bins: I) -> Result<Request>
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<Value>,
    {
        let bins = bins
            .into_iter()
            .map(|(name, value)| Bin::write(name, value))
            .collect();
        self.build(key, Info1Flags::empty(), Info2Flags::WRITE, bins)
    }

    /// Fetch the whole record
    pub fn read_all(&self, key: &Key) -> Result<Request> {
        self.build(key, Info1Flags::READ | Info1Flags::GET_ALL, Info2Flags::empty(), Vec::new())
    }

    /// Fetch only the named bins
    pub fn read_selected<I, N>(&self, key: &Key, names: I) -> Result<Request>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let bins = names.into_iter().map(Bin::read).collect();
        self.build(key, Info1Flags::READ, Info2Flags::empty(), bins)
    }

    /// Remove the record
    pub fn delete(&self, key: &Key) -> Result<Request> {
        self.build(key, Info1Flags::empty(), Info2Flags::DELETE | Info2Flags::WRITE, Vec::new())
    }

    /// Refresh the record's TTL without changing bins
    pub fn touch(&self, key: &Key) -> Result<Request> {
        let bins = vec![Bin::new("", Operation::Touch, Value::Undef)];
        self.build(key, Info1Flags::empty(), Info2Flags::WRITE, bins)
    }

    /// Arbitrary mix of operations; flags follow from the operation classes
    pub fn operate(&self, key: &Key, bins: Vec<Bin>) -> Result<Request> {
        let (info1, info2) = derive_flags(&bins);
        self.build(key, info1, info2, bins)
    }

    fn build(
        &self,
        key: &Key,
        info1: Info1Flags,
        info2: Info2Flags,
        bins: Vec<Bin>,
    ) -> Result<Request> {
        let base = MessageBase {
            info1,
            info2,
            info3: self.config.info3,
            generation: self.config.generation,
            record_ttl: self.config.record_ttl,
            transaction_ttl: self.config.transaction_ttl_ms,
            ..Default::default()
        };

        let request = Request::new(base, key.fields(), bins)?;
        tracing::debug!(
            namespace = key.namespace(),
            set = key.set().unwrap_or(""),
            digest = %key.digest(),
            fields = request.fields.len(),
            bins = request.bins.len(),
            "Built request"
        );
        Ok(request)
    }
}
