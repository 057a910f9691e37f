//! Content scanning: a single linear pass collecting matching files.

use std::path::Path;

use tracing::{debug, warn};

use reposnap_shared::{ExtensionSet, FileEntry, Result};

use crate::sorted_entries;

/// Walk `root` in the tree renderer's order and collect a [`FileEntry`]
/// for every file whose extension is in `extensions`.
///
/// Files that cannot be read or decoded as UTF-8 still produce an entry,
/// with `content: None`; a single unreadable file never aborts the scan.
pub fn scan(root: &Path, extensions: &ExtensionSet) -> Result<Vec<FileEntry>> {
    let mut entries = Vec::new();
    scan_level(root, root, extensions, &mut entries)?;

    debug!(
        root = %root.display(),
        matched = entries.len(),
        "content scan complete"
    );
    Ok(entries)
}

fn scan_level(
    dir: &Path,
    root: &Path,
    extensions: &ExtensionSet,
    out: &mut Vec<FileEntry>,
) -> Result<()> {
    let (dirs, files) = sorted_entries(dir)?;

    for entry in &dirs {
        scan_level(&entry.path, root, extensions, out)?;
    }

    for entry in &files {
        if !extensions.matches(&entry.name) {
            continue;
        }

        let path = relative_path(&entry.path, root);
        let content = match std::fs::read_to_string(&entry.path) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(path = %entry.path.display(), error = %e, "unreadable file, recording placeholder");
                None
            }
        };

        out.push(FileEntry { path, content });
    }

    Ok(())
}

/// Relative `/`-separated path of `path` under `root`.
fn relative_path(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree;

    #[test]
    fn scans_matching_files_in_traversal_order() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir(root.join("a")).unwrap();
        std::fs::write(root.join("a/x.py"), "print('x')").unwrap();
        std::fs::write(root.join("a/y.md"), "# y").unwrap();
        std::fs::write(root.join("b.txt"), "excluded").unwrap();

        let extensions = ExtensionSet::new([".py", ".md"]);
        let entries = scan(root, &extensions).unwrap();

        let paths: Vec<_> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["a/x.py", "a/y.md"]);
        assert_eq!(entries[0].content.as_deref(), Some("print('x')"));
    }

    #[test]
    fn unreadable_file_gets_placeholder_and_scan_continues() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::write(root.join("bad.py"), [0xFFu8, 0xFE, 0x00, 0x80]).unwrap();
        std::fs::write(root.join("good.py"), "ok = True").unwrap();

        let extensions = ExtensionSet::new([".py"]);
        let entries = scan(root, &extensions).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, "bad.py");
        assert!(entries[0].content.is_none());
        assert_eq!(entries[1].content.as_deref(), Some("ok = True"));
    }

    #[test]
    fn hidden_files_and_dirs_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir(root.join(".git")).unwrap();
        std::fs::write(root.join(".git/config.py"), "").unwrap();
        std::fs::write(root.join(".secret.py"), "").unwrap();
        std::fs::write(root.join("visible.py"), "").unwrap();

        let entries = scan(root, &ExtensionSet::new([".py"])).unwrap();
        let paths: Vec<_> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["visible.py"]);
    }

    #[test]
    fn empty_extension_set_matches_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.py"), "").unwrap();

        let entries = scan(tmp.path(), &ExtensionSet::new(Vec::<String>::new())).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn scan_order_matches_tree_leaf_order() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("src/deep")).unwrap();
        std::fs::create_dir(root.join("docs")).unwrap();
        std::fs::write(root.join("src/deep/inner.rs"), "").unwrap();
        std::fs::write(root.join("src/lib.rs"), "").unwrap();
        std::fs::write(root.join("docs/a.md"), "").unwrap();
        std::fs::write(root.join("README.md"), "").unwrap();

        let rendered = tree::render(root).unwrap();
        let entries = scan(root, &ExtensionSet::new([".rs", ".md"])).unwrap();

        // Every scanned path must appear as a leaf in the tree, and in the
        // same relative order.
        let mut cursor = 0;
        for entry in &entries {
            let leaf = entry.path.rsplit('/').next().unwrap();
            let pos = rendered[cursor..]
                .find(leaf)
                .unwrap_or_else(|| panic!("{leaf} missing or out of order in tree"));
            cursor += pos;
        }
    }
}
