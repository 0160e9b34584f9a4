use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("decoding bencode: {0}")]
    Decode(#[from] torrentwatch_bencode::Error),

    #[error("missing required field {0:?}")]
    MissingField(&'static str),

    #[error("field {0:?} has the wrong type")]
    WrongType(&'static str),

    #[error("info dict has both `length` and `files`, or neither")]
    AmbiguousLength,

    #[error("a file entry's `path` list is empty or contains an empty component")]
    EmptyPath,

    #[error("`piece length` must be a positive integer")]
    BadPieceLength,

    #[error("`pieces` length {0} is not a multiple of 20")]
    BadPiecesLength(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
