use thiserror::Error;

/// Combined error type for operations that can fail outright (as opposed to
/// the scanner, which never does — see [`torrentwatch_scanner::scan`]).
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Bencode(#[from] torrentwatch_bencode::Error),

    #[error(transparent)]
    Metainfo(#[from] torrentwatch_metainfo::Error),

    #[error(transparent)]
    Version(#[from] torrentwatch_version::MalformedVersion),

    /// An exception escaped a coroutine body and was never caught before
    /// the coroutine's result future settled.
    #[error("coroutine future rejected: {cause}")]
    FutureRejected { cause: String },
}

pub type Result<T> = std::result::Result<T, Error>;
