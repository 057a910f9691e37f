//! Connector-style directory tree rendering.

use std::path::Path;

use tracing::debug;

use reposnap_shared::Result;

use crate::sorted_entries;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACER: &str = "    ";

/// Render `root` as a human-readable ASCII tree.
///
/// The root appears as a bare first line using its own display name; below
/// it, each level lists fully-expanded subdirectories before files, both
/// sorted lexicographically, with `└── ` marking the last entry of a
/// level. Output is byte-identical across runs on an unchanged tree.
pub fn render(root: &Path) -> Result<String> {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());

    let mut out = String::new();
    out.push_str(&name);
    out.push('\n');

    render_level(root, "", &mut out)?;

    debug!(root = %root.display(), bytes = out.len(), "tree rendered");
    Ok(out)
}

fn render_level(dir: &Path, prefix: &str, out: &mut String) -> Result<()> {
    let (dirs, files) = sorted_entries(dir)?;

    for (i, entry) in dirs.iter().enumerate() {
        // A directory is terminal only when no files follow at this level.
        let is_last = i + 1 == dirs.len() && files.is_empty();

        out.push_str(prefix);
        out.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        out.push_str(&entry.name);
        out.push('\n');

        let child_prefix = format!("{prefix}{}", if is_last { SPACER } else { PIPE });
        render_level(&entry.path, &child_prefix, out)?;
    }

    for (i, entry) in files.iter().enumerate() {
        let is_last = i + 1 == files.len();

        out.push_str(prefix);
        out.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        out.push_str(&entry.name);
        out.push('\n');
    }

    Ok(())
}
