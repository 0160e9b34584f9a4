/// Knobs for a single `scan` call, in the same spirit as the small
/// `Default`-backed options structs used elsewhere for per-call behavior
/// rather than process-wide configuration.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Retain the fully decoded root dict on each [`crate::TorrentRecord`].
    /// On by default; callers that only need the summary fields and want to
    /// avoid retaining a potentially large dict for torrents with many files
    /// can turn this off.
    pub include_metainfo: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            include_metainfo: true,
        }
    }
}
