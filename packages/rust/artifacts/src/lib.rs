//! Snapshot document assembly.
//!
//! Pure builders for the two markdown artifacts produced from a scan: the
//! directory-structure document and the file-content document. No
//! filesystem or network access here — persistence is the caller's job.

use chrono::{DateTime, Local};
use tracing::debug;

use reposnap_shared::{ABSENCE_MARKER, FileEntry};

/// Timestamp format used inside generated documents.
pub const DOC_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp format used in generated file names.
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Horizontal rule under each file heading in the content document.
const ENTRY_RULE: &str = "------------";

/// Build the structure document: title, generation timestamp, and the
/// rendered tree fenced as a literal block.
pub fn build_structure_document(
    name: &str,
    tree: &str,
    generated_at: DateTime<Local>,
) -> String {
    let mut doc = String::new();

    doc.push_str(&format!("# {name} - Directory Structure\n\n"));
    doc.push_str(&format!(
        "Generated: {}\n\n",
        generated_at.format(DOC_TIMESTAMP_FORMAT)
    ));
    doc.push_str("```\n");
    doc.push_str(tree);
    if !tree.ends_with('\n') {
        doc.push('\n');
    }
    doc.push_str("```\n");

    debug!(name, bytes = doc.len(), "structure document built");
    doc
}

/// Build the content document: one subsection per entry, in scan order.
///
/// Unreadable entries get the absence marker in place of content; no
/// entry is ever skipped, truncated, or reordered.
pub fn build_content_document(entries: &[FileEntry]) -> String {
    let mut doc = String::new();

    for entry in entries {
        doc.push_str(&format!("## {}\n", entry.path));
        doc.push_str(ENTRY_RULE);
        doc.push('\n');
        match &entry.content {
            Some(text) => doc.push_str(text),
            None => doc.push_str(ABSENCE_MARKER),
        }
        doc.push_str("\n\n");
    }

    debug!(entries = entries.len(), bytes = doc.len(), "content document built");
    doc
}

/// Timestamped artifact file name: `{name}_{kind}_{timestamp}.md`.
pub fn artifact_file_name(name: &str, kind: &str, generated_at: DateTime<Local>) -> String {
    format!(
        "{name}_{kind}_{}.md",
        generated_at.format(FILE_TIMESTAMP_FORMAT)
    )
}
