//! Protocol Module
//!
//! Binary framing and record encoding for the database wire protocol.
//! All multi-byte integers are big-endian.
//!
//! ## Layout
//! ```text
//! ┌──────────────┬──────────────────┬────────────────────┬────────────────────┐
//! │ Frame (8)    │ MessageBase (22) │ Field × field_count│ Bin × bin_count    │
//! └──────────────┴──────────────────┴────────────────────┴────────────────────┘
//! ```
//!
//! | Structure    | Bytes | Layout                                                   |
//! |--------------|-------|----------------------------------------------------------|
//! | Frame        | 8     | version(1)=2, type(1), payload length(6)                 |
//! | MessageBase  | 22    | size, info1-3, pad, result, gen, ttls, counts            |
//! | Field header | 5     | length(4), type(1)                                       |
//! | Bin header   | 8     | length(4), op(1), particle type(1), version(1), name len |
//!
//! ### Message Types
//! - 1: INFO
//! - 2: ADMIN
//! - 3: MESSAGE
//! - 4: COMPRESSED

mod base;
mod bin;
mod codec;
mod digest;
mod field;
mod flags;
mod header;
mod request;
mod response;

pub use base::{MessageBase, MESSAGE_BASE_SIZE};
pub use bin::{Bin, Operation, BIN_HEADER_SIZE, MAX_BIN_NAME_LEN};
pub use codec::{parse_message, read_frame, read_response, write_request};
pub use digest::{Digest, DIGEST_SIZE};
pub use field::{Field, FieldType, FIELD_HEADER_SIZE};
pub use flags::{Info1Flags, Info2Flags, Info3Flags};
pub use header::{FrameHeader, MessageType, FRAME_HEADER_SIZE, MAX_FRAME_LENGTH, PROTOCOL_VERSION};
pub use request::{derive_flags, Key, Request, RequestBuilder};
pub use response::{ErrorTable, Response, ResultCode};
