//! Core domain types for RepoSnap snapshots.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

/// Sentinel content recorded when a matched file could not be read as text.
pub const ABSENCE_MARKER: &str = "# Failed to read content";

/// Hosting-domain marker that qualifies an `http(s)` URL as a clonable
/// remote target.
const REMOTE_HOST_MARKER: &str = "github.com";

/// Default extension groups, mirroring the interactive surface's checkboxes.
pub const PROGRAMMING_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".ts", ".java", ".cpp", ".hpp", ".c", ".h", ".go", ".rs",
];
pub const CONFIG_EXTENSIONS: &[&str] = &[".json", ".yml", ".yaml", ".toml"];
pub const DOC_EXTENSIONS: &[&str] = &[".md", ".txt"];

// ---------------------------------------------------------------------------
// TargetSpec
// ---------------------------------------------------------------------------

/// How a target specification was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Remote repository URL to be cloned into a temporary directory.
    Remote,
    /// Pre-existing local directory, owned by the caller.
    Local,
}

/// A user-supplied repository identifier: remote URL or local path.
///
/// Classification happens once at construction and never changes:
/// a spec is remote iff it parses as an `http`/`https` URL whose host
/// carries the recognized hosting-domain marker. Everything else is
/// treated as a local filesystem path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    raw: String,
    kind: TargetKind,
}

impl TargetSpec {
    /// Classify and wrap a raw target string.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let kind = classify(&raw);
        Self { raw, kind }
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn is_remote(&self) -> bool {
        self.kind == TargetKind::Remote
    }

    /// The raw string as supplied by the user.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Human-readable snapshot name derived from the target's basename.
    ///
    /// Remote: final URL segment with a trailing `.git` stripped.
    /// Local: directory basename (falls back to the raw string).
    pub fn display_name(&self) -> String {
        match self.kind {
            TargetKind::Remote => {
                let tail = self
                    .raw
                    .trim_end_matches('/')
                    .rsplit('/')
                    .next()
                    .unwrap_or(&self.raw);
                tail.trim_end_matches(".git").to_string()
            }
            TargetKind::Local => Path::new(&self.raw)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.raw.clone()),
        }
    }
}

impl std::fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

fn classify(raw: &str) -> TargetKind {
    let Ok(url) = Url::parse(raw) else {
        return TargetKind::Local;
    };

    let scheme_ok = matches!(url.scheme(), "http" | "https");
    let host_ok = url
        .host_str()
        .is_some_and(|h| h.contains(REMOTE_HOST_MARKER));

    if scheme_ok && host_ok {
        TargetKind::Remote
    } else {
        TargetKind::Local
    }
}

// ---------------------------------------------------------------------------
// ExtensionSet
// ---------------------------------------------------------------------------

/// An immutable set of dot-prefixed file-extension tokens (e.g. `.py`).
///
/// Membership is the only operation the pipeline uses. Tokens are
/// normalized to carry a leading dot; matching is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionSet(BTreeSet<String>);

impl ExtensionSet {
    /// Build a set from extension tokens, normalizing each to `.ext` form.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = tokens
            .into_iter()
            .map(|t| normalize_token(t.as_ref()))
            .filter(|t| t.len() > 1)
            .collect();
        Self(set)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True iff `file_name`'s extension (the suffix after the final `.`,
    /// re-prefixed with `.`) is a member. Names without a `.` never match.
    pub fn matches(&self, file_name: &str) -> bool {
        match file_name.rsplit_once('.') {
            Some((_, suffix)) => self.0.contains(&format!(".{suffix}")),
            None => false,
        }
    }

    /// Iterate the tokens in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for ExtensionSet {
    /// The process-wide default set: programming + configuration +
    /// documentation extensions.
    fn default() -> Self {
        Self::new(
            PROGRAMMING_EXTENSIONS
                .iter()
                .chain(CONFIG_EXTENSIONS)
                .chain(DOC_EXTENSIONS),
        )
    }
}

fn normalize_token(token: &str) -> String {
    let token = token.trim();
    if token.starts_with('.') {
        token.to_string()
    } else {
        format!(".{token}")
    }
}

// ---------------------------------------------------------------------------
// FileEntry
// ---------------------------------------------------------------------------

/// One scanned file: its path relative to the working directory (always
/// `/`-separated) and its text content. `content` is `None` when the file
/// matched the extension filter but could not be read or decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub content: Option<String>,
}
