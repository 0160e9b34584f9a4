use std::path::{Path, PathBuf};

use torrentwatch_bencode::Value;
use torrentwatch_metainfo::Metainfo;

/// A single tracked torrent: the scanner's view of one accepted `.torrent`
/// file, combining where it lives on disk with what was extracted from it.
#[derive(Debug, Clone)]
pub struct TorrentRecord {
    pub path: PathBuf,
    pub file_name: String,
    pub num_files: usize,
    pub total_length: u64,
    pub display_name: String,
    pub failure_reason: Option<String>,
    pub warning_message: Option<String>,
    pub announce_list: Vec<String>,
    pub metainfo: Option<Value>,
}

impl TorrentRecord {
    pub(crate) fn from_metainfo(path: &Path, metainfo: Metainfo) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let display_name = if metainfo.display_name.is_empty() {
            file_name.clone()
        } else {
            metainfo.display_name
        };
        TorrentRecord {
            path: path.to_path_buf(),
            file_name,
            num_files: metainfo.num_files,
            total_length: metainfo.total_length,
            display_name,
            failure_reason: metainfo.failure_reason,
            warning_message: metainfo.warning_message,
            announce_list: metainfo.announce_list,
            metainfo: metainfo.root,
        }
    }
}
