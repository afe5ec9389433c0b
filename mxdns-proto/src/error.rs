//! Custom error type definitions.

use thiserror::Error;

use crate::RecordType;

/// Errors that may arise during parsing.
///
/// Every variant means the response could not be decoded as sent; none of them
/// is recoverable by re-reading the same buffer.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Read of {wanted} byte(s) at offset {offset} exceeds message length {len}.")]
    OffsetOverflow {
        offset: usize,
        wanted: usize,
        len: usize,
    },

    #[error("Invalid opcode: valid are 0 to 2 and 4 to 6, got {0}.")]
    InvalidOpcode(u8),

    #[error("Invalid rcode: valid are 0 to 5, got {0}.")]
    InvalidRcode(u16),

    #[error("Invalid class: valid are 1, 3, 4, 254 or 255, got {0}.")]
    InvalidClass(u16),

    #[error("Invalid name length: must be smaller than 255, is {0}.")]
    NameTooLong(usize),

    #[error("Invalid label length in name: must be smaller than 64, is {0}.")]
    LabelTooLong(usize),

    #[error("Invalid name: labels must contain only a-z, A-Z, 0-9, underscores, and hyphens, and must not start or end with a hyphen.")]
    NameInvalidChars,

    #[error("Invalid name: contains an empty label.")]
    EmptyLabel,

    #[error("Invalid label type: must be 192 (i.e. a compression pointer) or 0, is {0}.")]
    InvalidLabelType(u8),

    #[error("Followed more than {0} compression pointers, assuming a pointer cycle.")]
    PointerCycle(usize),

    #[error("Encountered name compression where it is explicitly prohibited.")]
    CompressionProhibited,

    #[error("Received truncated message (TC flag set).")]
    TruncatedMessage,

    #[error("{rtype} RDATA did not occupy its declared {rdlength} byte(s).")]
    RdataLengthMismatch { rtype: RecordType, rdlength: u16 },
}

/// Errors that may arise during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Cannot query for the root name: the domain must contain at least one label.")]
    EmptyDomain,

    #[error("Domain name too long: allowed are up to 255 bytes encoded, got {0}.")]
    DomainTooLong(usize),

    #[error("Label too long: allowed are up to 63 bytes, got {0}.")]
    LabelTooLong(usize),

    #[error("IO error.")]
    Io(#[from] std::io::Error),
}
