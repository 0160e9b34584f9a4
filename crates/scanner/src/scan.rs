use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use torrentwatch_metainfo::{torrent_from_bytes, InfoHash};

use crate::discover::discover;
use crate::options::ScanOptions;
use crate::record::TorrentRecord;
use crate::severity::Severity;
use crate::state::ScannerState;

/// Runs one discovery + reconciliation pass over `root`, diffing the result
/// against `prev`. Deterministic given the same filesystem snapshot and
/// `prev`; idempotent (scanning the freshly returned state again yields no
/// further changes). Per-path failures are reported through `error_sink`
/// and never abort the scan — the returned state is always complete.
pub fn scan(
    root: &Path,
    prev: &ScannerState,
    mut error_sink: impl FnMut(Severity, &str),
    options: &ScanOptions,
) -> (
    ScannerState,
    HashMap<InfoHash, TorrentRecord>,
    HashMap<InfoHash, TorrentRecord>,
) {
    let mut new_state = ScannerState::default();
    let mut added = HashMap::new();
    let mut removed = HashMap::new();
    let mut candidates = Vec::new();

    debug!(root = %root.display(), "phase 1: discovery");
    let discovered = discover(root, &mut error_sink);

    debug!(count = discovered.len(), "phase 2: reconciliation");
    for (path, fp) in discovered.iter() {
        match prev.files.get(path) {
            None => candidates.push(path.clone()),
            Some((old_fp, old_hash)) if *old_fp == *fp => match old_hash {
                Some(h) => {
                    if prev.blocked.contains(path) {
                        candidates.push(path.clone());
                    } else if let Some(record) = prev.parsed.get(h) {
                        new_state.parsed.insert(*h, record.clone());
                        new_state.files.insert(path.clone(), (*fp, Some(*h)));
                    } else {
                        // prior state was inconsistent (hash in files but
                        // not in parsed); treat defensively as a candidate.
                        candidates.push(path.clone());
                    }
                }
                None => {
                    new_state.blocked.insert(path.clone());
                    new_state.files.insert(path.clone(), (*fp, None));
                }
            },
            Some((_, old_hash)) => {
                // fingerprint changed
                if !prev.blocked.contains(path) {
                    if let Some(h) = old_hash {
                        if let Some(record) = prev.parsed.get(h) {
                            removed.insert(*h, record.clone());
                        }
                    }
                }
                candidates.push(path.clone());
            }
        }
    }

    debug!(count = candidates.len(), "phase 3: parsing candidates");
    for path in candidates {
        let fp = *discovered.get(&path).expect("candidate came from discovered");
        let bytes = match fs::read(&path) {
            Ok(b) => b,
            Err(e) => {
                let msg = format!("reading {}: {e}", path.display());
                warn!("{msg}");
                error_sink(Severity::Warning, &msg);
                new_state.blocked.insert(path.clone());
                new_state.files.insert(path, (fp, None));
                continue;
            }
        };
        let bytes = bytes::Bytes::from(bytes);
        match torrent_from_bytes(&bytes, options.include_metainfo) {
            Ok(metainfo) => {
                let hash = metainfo.info_hash;
                if new_state.parsed.contains_key(&hash) {
                    let msg = format!(
                        "{} has the same infohash as an already-accepted torrent ({hash})",
                        path.display()
                    );
                    warn!("{msg}");
                    error_sink(Severity::Warning, &msg);
                    new_state.blocked.insert(path.clone());
                    new_state.files.insert(path, (fp, Some(hash)));
                } else {
                    let record = TorrentRecord::from_metainfo(&path, metainfo);
                    new_state.files.insert(path.clone(), (fp, Some(hash)));
                    new_state.parsed.insert(hash, record.clone());
                    added.insert(hash, record);
                }
            }
            Err(e) => {
                let msg = format!("parsing {}: {e}", path.display());
                warn!("{msg}");
                error_sink(Severity::Warning, &msg);
                new_state.blocked.insert(path.clone());
                new_state.files.insert(path, (fp, None));
            }
        }
    }

    debug!("phase 4: removals");
    for (path, (_, old_hash)) in prev.files.iter() {
        if new_state.files.contains_key(path) || prev.blocked.contains(path) {
            continue;
        }
        if let Some(h) = old_hash {
            if let Some(record) = prev.parsed.get(h) {
                removed.insert(*h, record.clone());
            }
        }
    }

    // A torrent re-added under the same infohash within this same scan
    // (e.g. two paths swapping content) should not appear in both diffs.
    removed.retain(|h, _| !added.contains_key(h) && !new_state.parsed.contains_key(h));

    (new_state, added, removed)
}
