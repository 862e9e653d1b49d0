//! Info flags
//!
//! The three bitflag bytes of the record header that select read, write,
//! delete and commit behaviour.

use bitflags::bitflags;

bitflags! {
    /// Read-side behaviour
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Info1Flags: u8 {
        const READ = 1;
        const GET_ALL = 1 << 1;
        const BATCH_INDEX = 1 << 3;
        const XDR = 1 << 4;
        const DONT_GET_BIN_DATA = 1 << 5;
        const READ_MODE_AP_ALL = 1 << 6;
        const COMPRESS_RESPONSE = 1 << 7;
    }
}

bitflags! {
    /// Write-side behaviour
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Info2Flags: u8 {
        const WRITE = 1;
        const DELETE = 1 << 1;
        const GENERATION = 1 << 2;
        const GENERATION_GT = 1 << 3;
        const DURABLE_DELETE = 1 << 4;
        const CREATE_ONLY = 1 << 5;
        const RESPOND_ALL_OPS = 1 << 7;
    }
}

bitflags! {
    /// Commit and existence behaviour
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Info3Flags: u8 {
        const LAST = 1;
        const COMMIT_MASTER = 1 << 1;
        const PARTITION_DONE = 1 << 2;
        const UPDATE_ONLY = 1 << 3;
        const CREATE_OR_REPLACE = 1 << 4;
        const REPLACE_ONLY = 1 << 5;
        const SC_READ_TYPE = 1 << 6;
        const SC_READ_RELAX = 1 << 7;
    }
}
