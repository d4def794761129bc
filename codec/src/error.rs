//! Error types for codec operations

use thiserror::Error;

/// Error type for codec operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("end of data")]
    EndOfData,
    #[error("capacity exhausted")]
    CapacityExhausted,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid byte at offset {offset}: expected {expected}, found {found:#010b}")]
    InvalidByte {
        offset: usize,
        expected: &'static str, // bit pattern, e.g. "10xxxxxx"
        found: u8,
    },
    #[error("encoded {surrogate} surrogate at offset {offset}")]
    EncodedSurrogate { offset: usize, surrogate: Surrogate }, // offset of the group's lead byte
    #[error("raw null byte at offset {offset}")]
    RawNull { offset: usize },
    #[error("unpaired {surrogate} surrogate {unit:#06x} at index {index}")]
    UnpairedSurrogate {
        index: usize, // code unit index, not byte offset
        unit: u16,
        surrogate: Surrogate,
    },
}

/// Half of a UTF-16 surrogate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surrogate {
    High,
    Low,
}

impl std::fmt::Display for Surrogate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Low => write!(f, "low"),
        }
    }
}
