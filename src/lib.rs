//! # aerowire
//!
//! Client-side codec for a record-oriented key/value database protocol
//! (namespaces, sets, typed bins, digest-addressed records):
//! - Frame headers and fixed record headers
//! - Length-prefixed field and bin records
//! - RIPEMD-160 key digests matching the server's hashing
//! - Typed values, including nested lists
//!
//! The codec performs no network I/O of its own. It turns logical requests
//! into exact byte sequences and exact byte sequences back into responses.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │            RequestBuilder  /  Response::parse                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!        ┌──────────────┼──────────────┬──────────────┐
//!        ▼              ▼              ▼              ▼
//!  ┌───────────┐ ┌─────────────┐ ┌──────────┐ ┌─────────────┐
//!  │FrameHeader│ │ MessageBase │ │  Field   │ │     Bin     │
//!  └───────────┘ └─────────────┘ └────┬─────┘ └──────┬──────┘
//!                                     │              │
//!                                     ▼              ▼
//!                               ┌──────────┐  ┌─────────────┐
//!                               │  Digest  │─▶│    Value    │
//!                               └──────────┘  └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use aerowire::protocol::{Key, RequestBuilder};
//!
//! let key = Key::new("test", None, "k1").unwrap();
//! let request = RequestBuilder::default()
//!     .write(&key, [("hello", "hey")])
//!     .unwrap();
//! let bytes = request.pack().unwrap();
//! assert_eq!(bytes[0], 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod reader;
pub mod value;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{WireError, Result};
pub use config::Config;
pub use value::{ParticleType, Value};
pub use protocol::{Bin, Digest, Key, Operation, Request, RequestBuilder, Response};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of aerowire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
