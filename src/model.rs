use std::time::SystemTime;

use chrono::Local;

pub(crate) const UPLOADS_DIR: &str = "uploads";

/// One discovered file in a catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FileEntry {
    pub(crate) name: String,
    pub(crate) size: u64,
    pub(crate) modified: SystemTime,
    pub(crate) hash: ContentHash,
}

/// Outcome of hashing a file during a scan. Files that cannot be read keep
/// their row in the snapshot with a sentinel digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ContentHash {
    Sha256(String),
    Unreadable,
}

impl ContentHash {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            ContentHash::Sha256(hex) => hex,
            ContentHash::Unreadable => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PanelMode {
    Download,
    Upload(String),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PromptState {
    pub(crate) buffer: String,
}

/// Discrete result of the filename prompt, produced by key handling and
/// consumed by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PromptOutcome {
    Committed(String),
    Cancelled,
}

/// Selection follows the filename, not the row index, so a snapshot that
/// reorders rows keeps the same file highlighted.
pub(crate) fn retarget_row(entries: &[FileEntry], previous: Option<&str>) -> usize {
    let Some(previous) = previous else {
        return 0;
    };
    entries
        .iter()
        .position(|entry| entry.name == previous)
        .unwrap_or(0)
}

pub(crate) fn format_modified(modified: SystemTime) -> String {
    let dt = chrono::DateTime::<Local>::from(modified);
    dt.format("%Y-%m-%d %H:%M").to_string()
}
