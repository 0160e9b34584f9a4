use std::fs;
use std::io;
use std::path::Path;
use std::time::UNIX_EPOCH;

/// Cheap stand-in for a file's content identity: modification time (as
/// nanoseconds since the epoch, so it is trivially `Eq`/`Hash` regardless of
/// platform clock representation) plus size. Two scans of an untouched file
/// produce an equal fingerprint; the scanner never re-parses on that basis
/// alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub mtime_nanos: u128,
    pub size: u64,
}

pub fn fingerprint_of(path: &Path) -> io::Result<Fingerprint> {
    let meta = fs::metadata(path)?;
    let mtime = meta.modified()?;
    let mtime_nanos = mtime
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    Ok(Fingerprint {
        mtime_nanos,
        size: meta.len(),
    })
}
