use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use sha2::{Digest, Sha256};

use crate::model::{ContentHash, FileEntry, UPLOADS_DIR};

const HASH_CHUNK_SIZE: usize = 8192;

/// Scans the served directory tree. Stateless apart from the root path; every
/// call produces a fresh snapshot.
#[derive(Debug, Clone)]
pub(crate) struct Catalog {
    root: PathBuf,
}

impl Catalog {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Two flat scans: files directly under the root, then directly under
    /// `uploads/` with a display prefix so the namespaces never collide.
    /// Enumeration failures degrade to whatever could be listed; nothing here
    /// may abort the dashboard.
    pub(crate) fn scan(&self) -> Vec<FileEntry> {
        let mut entries = Vec::new();
        collect_dir(&self.root, None, &mut entries);
        collect_dir(&self.root.join(UPLOADS_DIR), Some(UPLOADS_DIR), &mut entries);
        // Stable sort keeps directory-iteration order for equal timestamps.
        entries.sort_by(|a, b| b.modified.cmp(&a.modified));
        entries
    }
}

fn collect_dir(dir: &Path, prefix: Option<&str>, out: &mut Vec<FileEntry>) {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return;
    };
    for entry in read_dir.flatten() {
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        let name = match prefix {
            Some(prefix) => format!("{prefix}/{file_name}"),
            None => file_name.to_string(),
        };
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        out.push(FileEntry {
            name,
            size: metadata.len(),
            modified,
            hash: hash_file(&entry.path()),
        });
    }
}

/// Streaming SHA-256 over fixed-size chunks. An unreadable file yields the
/// sentinel variant instead of failing the scan.
pub(crate) fn hash_file(path: &Path) -> ContentHash {
    match try_hash(path) {
        Ok(hex) => ContentHash::Sha256(hex),
        Err(_) => ContentHash::Unreadable,
    }
}

fn try_hash(path: &Path) -> std::io::Result<String> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut chunk = [0u8; HASH_CHUNK_SIZE];
    loop {
        let read = file.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        hasher.update(&chunk[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}
