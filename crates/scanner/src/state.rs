use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use torrentwatch_metainfo::InfoHash;

use crate::fingerprint::Fingerprint;
use crate::record::TorrentRecord;

/// State carried by the caller between scans. Owned entirely outside this
/// crate: `scan` takes one by reference and returns a fresh one, so a
/// caller can checkpoint it (e.g. serialize it to disk) however it likes.
#[derive(Debug, Clone, Default)]
pub struct ScannerState {
    pub parsed: BTreeMap<InfoHash, TorrentRecord>,
    pub files: BTreeMap<PathBuf, (Fingerprint, Option<InfoHash>)>,
    pub blocked: HashSet<PathBuf>,
}
