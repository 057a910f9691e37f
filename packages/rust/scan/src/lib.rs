//! Deterministic filesystem traversal: tree rendering and content scanning.
//!
//! Both walks share the same ordering policy so the structure document and
//! the content document stay consistent: at every level, hidden entries
//! and the build-cache directory are dropped, subdirectories come first
//! (each fully expanded before its siblings' files), and both lists are
//! sorted lexicographically.

pub mod content;
pub mod tree;

use std::path::{Path, PathBuf};

use reposnap_shared::{RepoSnapError, Result};

pub use content::scan;
pub use tree::render;

/// Directory name always dropped from traversal (build-cache artifacts).
pub const CACHE_DIR_MARKER: &str = "__pycache__";

/// A directory entry surviving the traversal filters.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) name: String,
    pub(crate) path: PathBuf,
}

/// List `dir`, partitioned into (subdirectories, files), filtered and
/// sorted per the traversal policy. Entries that are neither directories
/// nor regular files (sockets, broken links) are skipped.
pub(crate) fn sorted_entries(dir: &Path) -> Result<(Vec<Entry>, Vec<Entry>)> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    let read_dir = std::fs::read_dir(dir).map_err(|e| RepoSnapError::io(dir, e))?;

    for entry in read_dir {
        let entry = entry.map_err(|e| RepoSnapError::io(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();

        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if path.is_dir() {
            if name == CACHE_DIR_MARKER {
                continue;
            }
            dirs.push(Entry { name, path });
        } else if path.is_file() {
            files.push(Entry { name, path });
        }
    }

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));

    Ok((dirs, files))
}
