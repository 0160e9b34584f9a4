//! Structural validation and field extraction for decoded torrent metainfo
//! dicts: checks a bencoded root value has the shape a `.torrent` file must
//! have, then extracts the summary fields a directory scanner needs plus
//! the SHA-1 infohash of its `info` sub-value.

mod error;
mod extract;
mod info_hash;
mod validate;

pub use error::{Error, Result};
pub use extract::{torrent_from_bytes, Metainfo};
pub use info_hash::{InfoHash, ParseInfoHashError};
pub use validate::check_message;
