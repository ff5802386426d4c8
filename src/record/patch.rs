//! Borrowed view of an eligible failed patch record.

/// A failed patch invocation with everything needed to rebuild it locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPatch<'a> {
    /// The unified diff that failed to apply
    pub diff: &'a str,
    /// Pre-patch content of each targeted file, in logged order
    pub files: Vec<OriginalFile<'a>>,
    /// When the invocation was logged, if known
    pub timestamp: Option<&'a str>,
}

/// Original content of one file targeted by a failed patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginalFile<'a> {
    /// Path relative to the project root, as logged
    pub path: &'a str,
    pub content: &'a str,
}
