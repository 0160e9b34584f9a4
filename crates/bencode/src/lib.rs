//! A minimal bencode codec: the four-shape binary format used by `.torrent`
//! files (integers, byte strings, lists, and dicts with canonically sorted
//! keys).
//!
//! Dicts decode into a [`std::collections::BTreeMap`] so canonical key
//! ordering is a property of the container, not a check layered on top, and
//! [`decode_with_raw_info`] hands back the exact on-disk bytes of a
//! torrent's `info` sub-value so its SHA-1 infohash never drifts from a
//! re-encode.

mod decode;
mod encode;
mod error;
mod value;

pub use decode::{decode, decode_with_raw_info};
pub use encode::encode;
pub use error::{Error, Result};
pub use value::{escape_bytes, Value};
