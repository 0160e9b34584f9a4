//! Incremental, breadth-first directory scanner for `.torrent` files.
//!
//! A single [`scan`] call discovers candidate files, reconciles them
//! against a caller-owned [`ScannerState`] from a previous call, parses
//! only what changed, and returns a minimal added/removed diff. The
//! scanner never aborts on a single bad path — failures are funneled
//! through an `error_sink` callback and the offending path is quarantined
//! in [`ScannerState::blocked`].

mod discover;
mod fingerprint;
mod options;
mod record;
mod scan;
mod severity;
mod state;

pub use fingerprint::Fingerprint;
pub use options::ScanOptions;
pub use record::TorrentRecord;
pub use scan::scan;
pub use severity::Severity;
pub use state::ScannerState;
