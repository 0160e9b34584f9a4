use bytes::Bytes;
use torrentwatch_bencode::{decode_with_raw_info, Value};
use torrentwatch_sha1w::{ISha1, Sha1};
use tracing::trace;

use crate::error::{Error, Result};
use crate::info_hash::InfoHash;
use crate::validate::check_message;

/// Everything extracted from a validated torrent file, short of the
/// filesystem path it was read from (the scanner owns that).
#[derive(Debug, Clone)]
pub struct Metainfo {
    pub info_hash: InfoHash,
    pub display_name: String,
    pub num_files: usize,
    pub total_length: u64,
    pub announce_list: Vec<String>,
    pub failure_reason: Option<String>,
    pub warning_message: Option<String>,
    /// The fully decoded root dict, kept only when the caller asked for it
    /// (see `ScanOptions::include_metainfo` in the scanner crate) — callers
    /// that only need the summary fields above don't pay to retain it.
    pub root: Option<Value>,
}

fn lossy_string(bytes: &Bytes) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn collect_announce_list(root: &Value) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(list) = root.get(b"announce-list").and_then(Value::as_list) {
        for tier in list {
            if let Some(tier) = tier.as_list() {
                for url in tier {
                    if let Some(b) = url.as_bytes() {
                        out.push(lossy_string(b));
                    }
                }
            }
        }
    }
    if out.is_empty() {
        if let Some(b) = root.get(b"announce").and_then(Value::as_bytes) {
            out.push(lossy_string(b));
        }
    }
    out
}

/// Decodes, validates, and extracts a torrent's summary fields, hashing the
/// raw on-disk bytes of its `info` sub-value rather than re-encoding it —
/// the only way the resulting infohash stays stable across this process.
pub fn torrent_from_bytes(bytes: &Bytes, keep_root: bool) -> Result<Metainfo> {
    let (root, info_raw) = decode_with_raw_info(bytes)?;
    check_message(&root)?;

    let info = root
        .get(b"info")
        .and_then(Value::as_dict)
        .ok_or(Error::MissingField("info"))?;

    let info_raw = info_raw.ok_or(Error::MissingField("info"))?;
    let mut hasher = Sha1::new();
    hasher.update(&info_raw);
    let info_hash = InfoHash::new(hasher.finish());
    trace!(%info_hash, "computed infohash");

    let display_name = info
        .get(b"name".as_slice())
        .and_then(Value::as_bytes)
        .map(lossy_string)
        .unwrap_or_default();

    let (num_files, total_length) = match info.get(b"files".as_slice()) {
        Some(files) => {
            let files = files.as_list().ok_or(Error::WrongType("files"))?;
            let total: i64 = files
                .iter()
                .filter_map(|f| f.as_dict())
                .filter_map(|f| f.get(b"length".as_slice()))
                .filter_map(Value::as_integer)
                .sum();
            (files.len(), total as u64)
        }
        None => {
            let length = info
                .get(b"length".as_slice())
                .and_then(Value::as_integer)
                .ok_or(Error::MissingField("length"))?;
            (1, length as u64)
        }
    };

    let failure_reason = root
        .get(b"failure reason")
        .and_then(Value::as_bytes)
        .map(lossy_string);
    let warning_message = root
        .get(b"warning message")
        .and_then(Value::as_bytes)
        .map(lossy_string);
    let announce_list = collect_announce_list(&root);

    Ok(Metainfo {
        info_hash,
        display_name,
        num_files,
        total_length,
        announce_list,
        failure_reason,
        warning_message,
        root: if keep_root { Some(root) } else { None },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bstr(s: &str) -> String {
        format!("{}:{}", s.len(), s)
    }

    fn sample_torrent() -> Bytes {
        let info = format!(
            "d{l}i12345e{n}{pl}i16384e{p}20:01234567890123456789e",
            l = bstr("length"),
            n = bstr("name") + &bstr("my-file.bin"),
            pl = bstr("piece length"),
            p = bstr("pieces"),
        );
        let root = format!(
            "d{a}{info_k}{info_v}e",
            a = bstr("announce") + &bstr("http://example.com/ann"),
            info_k = bstr("info"),
            info_v = info,
        );
        Bytes::from(root.into_bytes())
    }

    #[test]
    fn extracts_single_file_summary() {
        let m = torrent_from_bytes(&sample_torrent(), false).unwrap();
        assert_eq!(m.num_files, 1);
        assert_eq!(m.total_length, 12345);
        assert_eq!(m.display_name, "my-file.bin");
        assert_eq!(m.announce_list, vec!["http://example.com/ann".to_string()]);
        assert!(m.root.is_none());
    }

    #[test]
    fn keeps_root_when_requested() {
        let m = torrent_from_bytes(&sample_torrent(), true).unwrap();
        assert!(m.root.is_some());
    }

    #[test]
    fn infohash_is_stable_across_identical_bytes() {
        let a = torrent_from_bytes(&sample_torrent(), false).unwrap();
        let b = torrent_from_bytes(&sample_torrent(), false).unwrap();
        assert_eq!(a.info_hash, b.info_hash);
    }

    #[test]
    fn rejects_malformed_bencode() {
        let bytes = Bytes::from_static(b"not bencoded");
        assert!(torrent_from_bytes(&bytes, false).is_err());
    }
}
