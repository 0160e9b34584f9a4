use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("invalid integer at offset {0}")]
    InvalidInteger(usize),

    #[error("integer at offset {0} has a leading zero")]
    LeadingZero(usize),

    #[error("byte string length at offset {0} is not a valid non-negative decimal")]
    InvalidLength(usize),

    #[error("unrecognized value tag {0:#04x} at offset {1}")]
    UnknownTag(u8, usize),

    #[error("dict keys at offset {0} are not in canonical ascending order")]
    UnorderedKeys(usize),

    #[error("dict at offset {0} contains a duplicate key")]
    DuplicateKey(usize),

    #[error("{0} trailing byte(s) after the root value")]
    TrailingBytes(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
