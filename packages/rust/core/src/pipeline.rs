//! End-to-end snapshot pipeline: target spec → acquire → render + scan → assemble.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::{info, instrument};

use reposnap_artifacts::{build_content_document, build_structure_document};
use reposnap_shared::{ExtensionSet, FileEntry, Result, TargetSpec};

/// Configuration for a single snapshot run.
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Repository to snapshot (remote URL or local path).
    pub target: TargetSpec,
    /// Extensions to scan; an empty set falls back to the built-in default.
    pub extensions: ExtensionSet,
}

/// Result of a successful snapshot run.
#[derive(Debug, Clone)]
pub struct SnapshotResult {
    /// Snapshot name derived from the target's basename.
    pub name: String,
    /// The directory-structure markdown document.
    pub structure_doc: String,
    /// The file-content markdown document.
    pub content_doc: String,
    /// Ordered scan results for downstream consumers.
    pub entries: Vec<FileEntry>,
    /// Timestamp both documents were generated with.
    pub generated_at: DateTime<Local>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when the pipeline completes.
    fn done(&self, result: &SnapshotResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _result: &SnapshotResult) {}
}

/// Run the full snapshot pipeline.
///
/// 1. Acquire a working copy (clone remote targets into a temp dir)
/// 2. Render the directory tree
/// 3. Scan file contents
/// 4. Assemble both documents
///
/// Any temporary clone is released before this returns, on success and
/// failure alike; `WorkingCopy`'s drop guard covers the remaining exits.
#[instrument(skip_all, fields(target = %config.target))]
pub fn run(config: &SnapshotConfig, progress: &dyn ProgressReporter) -> Result<SnapshotResult> {
    let start = Instant::now();

    info!(target = %config.target, "starting snapshot pipeline");

    progress.phase("Acquiring repository");
    let mut working = reposnap_acquire::acquire(&config.target)?;

    let outcome = snapshot_working_copy(config, working.path(), progress);
    let released = working.release();

    let (structure_doc, content_doc, entries, generated_at) = outcome?;
    released?;

    let result = SnapshotResult {
        name: config.target.display_name(),
        structure_doc,
        content_doc,
        entries,
        generated_at,
        elapsed: start.elapsed(),
    };

    progress.done(&result);

    info!(
        name = %result.name,
        files = result.entries.len(),
        elapsed_ms = result.elapsed.as_millis(),
        "snapshot pipeline complete"
    );

    Ok(result)
}

/// The scoped portion of the pipeline: everything that runs between
/// acquisition and release.
fn snapshot_working_copy(
    config: &SnapshotConfig,
    root: &std::path::Path,
    progress: &dyn ProgressReporter,
) -> Result<(String, String, Vec<FileEntry>, DateTime<Local>)> {
    progress.phase("Rendering directory tree");
    let tree = reposnap_scan::tree::render(root)?;

    progress.phase("Scanning file contents");
    let extensions = if config.extensions.is_empty() {
        ExtensionSet::default()
    } else {
        config.extensions.clone()
    };
    let entries = reposnap_scan::content::scan(root, &extensions)?;

    progress.phase("Assembling documents");
    let generated_at = Local::now();
    let name = config.target.display_name();
    let structure_doc = build_structure_document(&name, &tree, generated_at);
    let content_doc = build_content_document(&entries);

    Ok((structure_doc, content_doc, entries, generated_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reposnap_shared::RepoSnapError;

    fn fixture_repo() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir(root.join("a")).unwrap();
        std::fs::write(root.join("a/x.py"), "print('x')\n").unwrap();
        std::fs::write(root.join("a/y.md"), "# y\n").unwrap();
        std::fs::write(root.join("b.txt"), "plain text\n").unwrap();
        tmp
    }

    fn config_for(tmp: &tempfile::TempDir, extensions: ExtensionSet) -> SnapshotConfig {
        SnapshotConfig {
            target: TargetSpec::new(tmp.path().to_string_lossy()),
            extensions,
        }
    }

    #[test]
    fn run_produces_both_documents_and_entries() {
        let tmp = fixture_repo();
        let config = config_for(&tmp, ExtensionSet::new([".py", ".md"]));

        let result = run(&config, &SilentProgress).unwrap();

        let paths: Vec<_> = result.entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["a/x.py", "a/y.md"]);

        assert!(result.structure_doc.contains("Directory Structure"));
        assert!(result.structure_doc.contains("b.txt")); // tree shows non-matching files
        assert!(result.content_doc.contains("## a/x.py"));
        assert!(!result.content_doc.contains("b.txt")); // content does not
    }

    #[test]
    fn run_uses_local_basename_as_snapshot_name() {
        let tmp = fixture_repo();
        let config = config_for(&tmp, ExtensionSet::default());

        let result = run(&config, &SilentProgress).unwrap();
        let expected = tmp.path().file_name().unwrap().to_string_lossy();
        assert_eq!(result.name, expected);
    }

    #[test]
    fn empty_extension_set_falls_back_to_default() {
        let tmp = fixture_repo();
        let config = config_for(&tmp, ExtensionSet::new(Vec::<String>::new()));

        let result = run(&config, &SilentProgress).unwrap();
        // Default set includes .py, .md and .txt.
        let paths: Vec<_> = result.entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["a/x.py", "a/y.md", "b.txt"]);
    }

    #[test]
    fn nonexistent_target_is_acquisition_error() {
        let config = SnapshotConfig {
            target: TargetSpec::new("/no/such/repository"),
            extensions: ExtensionSet::default(),
        };

        let err = run(&config, &SilentProgress).unwrap_err();
        assert!(matches!(err, RepoSnapError::Acquisition { .. }));
    }

    #[test]
    fn local_target_survives_pipeline() {
        let tmp = fixture_repo();
        let config = config_for(&tmp, ExtensionSet::default());

        run(&config, &SilentProgress).unwrap();
        // Caller-owned directory must never be deleted.
        assert!(tmp.path().join("a/x.py").exists());
    }

    #[test]
    fn phases_are_reported_in_order() {
        use std::cell::RefCell;

        struct Recorder(RefCell<Vec<String>>);
        impl ProgressReporter for Recorder {
            fn phase(&self, name: &str) {
                self.0.borrow_mut().push(name.to_string());
            }
            fn done(&self, _: &SnapshotResult) {
                self.0.borrow_mut().push("done".into());
            }
        }

        let tmp = fixture_repo();
        let config = config_for(&tmp, ExtensionSet::default());
        let recorder = Recorder(RefCell::new(Vec::new()));

        run(&config, &recorder).unwrap();

        let phases = recorder.0.into_inner();
        assert_eq!(
            phases,
            [
                "Acquiring repository",
                "Rendering directory tree",
                "Scanning file contents",
                "Assembling documents",
                "done"
            ]
        );
    }
}
