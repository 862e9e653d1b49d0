//! Configuration for aerowire
//!
//! Request defaults and decoding limits, with a builder.

use crate::error::{Result, WireError};
use crate::protocol::{Info3Flags, MAX_FRAME_LENGTH};

/// Codec configuration shared by request building and response reading
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Request Defaults
    // -------------------------------------------------------------------------
    /// Transaction deadline hint sent in every request header (milliseconds)
    pub transaction_ttl_ms: u32,

    /// Record expiry sent with writes (0 = namespace default)
    pub record_ttl: u32,

    /// Expected generation, only meaningful with generation-checked writes
    pub generation: u32,

    /// Extra info3 bits OR-ed into every request
    pub info3: Info3Flags,

    // -------------------------------------------------------------------------
    // Decoding Limits
    // -------------------------------------------------------------------------
    /// Largest payload the stream reader will allocate for (bytes)
    pub max_payload_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transaction_ttl_ms: 1000,
            record_ttl: 0,
            generation: 0,
            info3: Info3Flags::empty(),
            max_payload_size: 128 * 1024 * 1024, // 128 MB
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the transaction TTL (in milliseconds)
    pub fn transaction_ttl_ms(mut self, ms: u32) -> Self {
        self.config.transaction_ttl_ms = ms;
        self
    }

    /// Set the record TTL (in seconds)
    pub fn record_ttl(mut self, ttl: u32) -> Self {
        self.config.record_ttl = ttl;
        self
    }

    /// Set the expected record generation
    pub fn generation(mut self, generation: u32) -> Self {
        self.config.generation = generation;
        self
    }

    /// Set the info3 bits added to every request
    pub fn info3(mut self, flags: Info3Flags) -> Self {
        self.config.info3 = flags;
        self
    }

    /// Set the maximum accepted payload size (in bytes)
    pub fn max_payload_size(mut self, size: u64) -> Self {
        self.config.max_payload_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }

    /// Build, rejecting limits the frame header cannot express
    pub fn try_build(self) -> Result<Config> {
        if self.config.max_payload_size > MAX_FRAME_LENGTH {
            return Err(WireError::Config(format!(
                "max_payload_size {} exceeds 48-bit frame limit {}",
                self.config.max_payload_size, MAX_FRAME_LENGTH
            )));
        }
        Ok(self.config)
    }
}
