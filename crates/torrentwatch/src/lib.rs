//! Facade crate tying together the bencode codec, torrent metainfo
//! validator, directory scanner, coroutine scheduler, and version
//! comparator behind a single dependency, the way a small multi-crate
//! workspace's top-level crate re-exports its pieces for downstream users.

mod error;
mod logging;

pub use error::{Error, Result};
pub use logging::init_logging;

pub use torrentwatch_bencode::{decode, decode_with_raw_info, encode, Value};
pub use torrentwatch_coroutine::{launch_coroutine, Future, Resolver};
pub use torrentwatch_metainfo::{check_message, torrent_from_bytes, InfoHash, Metainfo};
pub use torrentwatch_scanner::{scan, ScanOptions, ScannerState, Severity, TorrentRecord};
pub use torrentwatch_version::{MalformedVersion, Version};

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write as _;

    #[test]
    fn scanner_and_metainfo_compose_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let info = "d6:lengthi5e4:name1:x12:piece lengthi16384e6:pieces20:01234567890123456789e";
        let bytes = format!("d4:info{info}e");
        let mut f = File::create(dir.path().join("a.torrent")).unwrap();
        f.write_all(bytes.as_bytes()).unwrap();

        let (state, added, removed) = scan(
            dir.path(),
            &ScannerState::default(),
            |_, _| {},
            &ScanOptions::default(),
        );
        assert_eq!(added.len(), 1);
        assert!(removed.is_empty());
        assert_eq!(state.parsed.len(), 1);
    }
}
