use std::collections::{BTreeMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{trace, warn};

use crate::fingerprint::{fingerprint_of, Fingerprint};
use crate::severity::Severity;

/// Breadth-first discovery: a directory's children are only descended into
/// when that directory itself holds no `.torrent` files — the decision is
/// per-directory, independent of sibling branches. A true FIFO queue (not a
/// LIFO stack) is used so sibling directories at the same depth are fully
/// enumerated before any of their children are visited.
pub fn discover(
    root: &Path,
    error_sink: &mut dyn FnMut(Severity, &str),
) -> BTreeMap<PathBuf, Fingerprint> {
    let mut discovered = BTreeMap::new();
    let mut queue: VecDeque<PathBuf> = VecDeque::new();
    queue.push_back(root.to_path_buf());

    while let Some(dir) = queue.pop_front() {
        trace!(path = %dir.display(), "listing directory");
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                let msg = format!("reading directory {}: {e}", dir.display());
                warn!("{msg}");
                error_sink(Severity::Warning, &msg);
                continue;
            }
        };

        let mut torrent_paths = Vec::new();
        let mut subdirs = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    let msg = format!("reading an entry of {}: {e}", dir.display());
                    warn!("{msg}");
                    error_sink(Severity::Warning, &msg);
                    continue;
                }
            };
            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(e) => {
                    let msg = format!("stat {}: {e}", entry.path().display());
                    warn!("{msg}");
                    error_sink(Severity::Warning, &msg);
                    continue;
                }
            };
            if file_type.is_dir() {
                subdirs.push(entry.path());
            } else if file_type.is_file() {
                let name = entry.file_name();
                if name.to_string_lossy().ends_with(".torrent") {
                    torrent_paths.push(entry.path());
                }
            }
        }

        if torrent_paths.is_empty() {
            for d in subdirs {
                queue.push_back(d);
            }
            continue;
        }

        for path in torrent_paths {
            match fingerprint_of(&path) {
                Ok(fp) => {
                    discovered.insert(path, fp);
                }
                Err(e) => {
                    let msg = format!("stat {}: {e}", path.display());
                    warn!("{msg}");
                    error_sink(Severity::Warning, &msg);
                }
            }
        }
    }

    discovered
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self as stdfs, File};

    #[test]
    fn stops_descending_once_torrents_are_found() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("a.torrent")).unwrap();
        stdfs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("sub").join("b.torrent")).unwrap();

        let mut errors = Vec::new();
        let found = discover(dir.path(), &mut |sev, msg| errors.push((sev, msg.to_string())));

        assert_eq!(found.len(), 1);
        assert!(found.contains_key(&dir.path().join("a.torrent")));
        assert!(errors.is_empty());
    }

    #[test]
    fn descends_when_a_directory_has_no_torrents() {
        let dir = tempfile::tempdir().unwrap();
        stdfs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("sub").join("b.torrent")).unwrap();

        let mut errors = Vec::new();
        let found = discover(dir.path(), &mut |sev, msg| errors.push((sev, msg.to_string())));

        assert_eq!(found.len(), 1);
        assert!(found.contains_key(&dir.path().join("sub").join("b.torrent")));
    }

    #[test]
    fn ignores_non_torrent_files() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();

        let mut errors = Vec::new();
        let found = discover(dir.path(), &mut |_, _| {});
        let _ = &mut errors;
        assert!(found.is_empty());
    }
}
