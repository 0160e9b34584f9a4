/// How seriously a scan-time problem should be treated by the caller's
/// reporting layer. The scanner itself never escalates a `Warning` into an
/// aborted scan — see the crate-level docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}
