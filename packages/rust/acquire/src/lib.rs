//! Source acquisition: resolving a target spec into an on-disk working copy.
//!
//! Remote targets are cloned with full history into a fresh temporary
//! directory owned by the returned [`WorkingCopy`]; local targets are
//! validated and borrowed from the caller, never deleted. Temporary clones
//! are removed by [`WorkingCopy::release`] or, failing that, when the
//! handle is dropped — so a failure anywhere downstream cannot leak a
//! clone on disk.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use tracing::{debug, info, warn};

use reposnap_shared::{RepoSnapError, Result, TargetSpec};

// ---------------------------------------------------------------------------
// WorkingCopy
// ---------------------------------------------------------------------------

/// The materialized repository root, regardless of origin.
///
/// For remote targets this owns the temporary clone directory; for local
/// targets it merely borrows the caller's path.
#[derive(Debug)]
pub struct WorkingCopy {
    path: PathBuf,
    temp: Option<TempDir>,
}

impl WorkingCopy {
    /// Absolute path to the repository root.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True iff this working copy owns a temporary clone.
    pub fn is_temporary(&self) -> bool {
        self.temp.is_some()
    }

    /// Delete the temporary clone, if this working copy owns one.
    ///
    /// Safe to call any number of times; caller-owned local paths are
    /// never touched, and a clone directory that already vanished is not
    /// an error.
    pub fn release(&mut self) -> Result<()> {
        let Some(temp) = self.temp.take() else {
            return Ok(());
        };

        let path = temp.path().to_path_buf();
        match temp.close() {
            Ok(()) => {
                debug!(path = %path.display(), "removed temporary clone");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RepoSnapError::io(path, e)),
        }
    }
}

// ---------------------------------------------------------------------------
// acquire
// ---------------------------------------------------------------------------

/// Resolve a target spec into a concrete on-disk working copy.
///
/// Remote specs are cloned into a fresh temporary directory; local specs
/// must name an existing directory. Fails with
/// [`RepoSnapError::Acquisition`] in every other case.
pub fn acquire(spec: &TargetSpec) -> Result<WorkingCopy> {
    if spec.is_remote() {
        clone_remote(spec)
    } else {
        use_local(spec)
    }
}

fn use_local(spec: &TargetSpec) -> Result<WorkingCopy> {
    let path = Path::new(spec.as_str());

    if !path.is_dir() {
        return Err(RepoSnapError::acquisition(format!(
            "directory not found: {}",
            path.display()
        )));
    }

    let path = std::fs::canonicalize(path).map_err(|e| RepoSnapError::io(path, e))?;
    debug!(path = %path.display(), "using caller-owned local directory");

    Ok(WorkingCopy { path, temp: None })
}

fn clone_remote(spec: &TargetSpec) -> Result<WorkingCopy> {
    // The TempDir handle removes the directory on drop, so an error
    // return from any point below leaves nothing behind.
    let temp = TempDir::new().map_err(|e| {
        RepoSnapError::acquisition(format!("could not create temporary directory: {e}"))
    })?;

    info!(url = %spec, path = %temp.path().display(), "cloning remote repository");

    let output = Command::new("git")
        .arg("clone")
        .arg(spec.as_str())
        .arg(temp.path())
        .output()
        .map_err(|e| {
            RepoSnapError::acquisition(format!("failed to launch git: {e}"))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(url = %spec, %stderr, "git clone failed");
        return Err(classify_clone_failure(spec, &stderr));
    }

    let path = temp.path().to_path_buf();
    info!(path = %path.display(), "clone complete");

    Ok(WorkingCopy {
        path,
        temp: Some(temp),
    })
}

/// Map git's stderr onto a more specific acquisition message.
fn classify_clone_failure(spec: &TargetSpec, stderr: &str) -> RepoSnapError {
    if stderr.contains("Repository not found") || stderr.contains("404") {
        return RepoSnapError::acquisition(format!("repository not found: {spec}"));
    }

    if stderr.contains("Authentication failed") || stderr.contains("could not read Username") {
        return RepoSnapError::acquisition(format!(
            "authentication required for repository: {spec}"
        ));
    }

    RepoSnapError::acquisition(format!("git clone failed for {spec}: {}", stderr.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_local_directory() {
        let dir = tempfile::tempdir().unwrap();
        let spec = TargetSpec::new(dir.path().to_string_lossy());

        let copy = acquire(&spec).unwrap();
        assert!(!copy.is_temporary());
        assert!(copy.path().is_dir());
    }

    #[test]
    fn acquire_nonexistent_local_path_fails() {
        let spec = TargetSpec::new("/definitely/not/a/real/path");
        let err = acquire(&spec).unwrap_err();
        assert!(matches!(err, RepoSnapError::Acquisition { .. }));
        assert!(err.to_string().contains("directory not found"));
    }

    #[test]
    fn acquire_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "not a directory").unwrap();

        let spec = TargetSpec::new(file.to_string_lossy());
        assert!(acquire(&spec).is_err());
    }

    #[test]
    fn release_is_noop_for_local() {
        let dir = tempfile::tempdir().unwrap();
        let spec = TargetSpec::new(dir.path().to_string_lossy());

        let mut copy = acquire(&spec).unwrap();
        copy.release().unwrap();
        copy.release().unwrap();

        // Caller-owned path survives release.
        assert!(dir.path().is_dir());
    }

    #[test]
    fn release_removes_temporary_clone_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().to_path_buf();
        std::fs::write(path.join("file.rs"), "fn main() {}").unwrap();

        let mut copy = WorkingCopy {
            path: path.clone(),
            temp: Some(temp),
        };

        copy.release().unwrap();
        assert!(!path.exists());

        // Second release is a no-op, never an error.
        copy.release().unwrap();
    }

    #[test]
    fn clone_failure_classifies_missing_repository() {
        let spec = TargetSpec::new("https://github.com/user/gone");
        let stderr = "remote: Repository not found.\nfatal: repository not found";

        let err = classify_clone_failure(&spec, stderr);
        assert!(matches!(err, RepoSnapError::Acquisition { .. }));
        assert_eq!(
            err.to_string(),
            "acquisition error: repository not found: https://github.com/user/gone"
        );
    }

    #[test]
    fn clone_failure_classifies_authentication() {
        let spec = TargetSpec::new("https://github.com/user/private");

        for stderr in [
            "fatal: Authentication failed for 'https://github.com/user/private'",
            "fatal: could not read Username for 'https://github.com': terminal prompts disabled",
        ] {
            let err = classify_clone_failure(&spec, stderr);
            assert!(err.to_string().contains("authentication required"));
        }
    }

    #[test]
    fn clone_failure_falls_back_to_raw_stderr() {
        let spec = TargetSpec::new("https://github.com/user/repo");
        let err = classify_clone_failure(&spec, "fatal: unable to access: connection timed out\n");

        assert_eq!(
            err.to_string(),
            "acquisition error: git clone failed for https://github.com/user/repo: \
             fatal: unable to access: connection timed out"
        );
    }

    #[test]
    fn drop_removes_temporary_clone() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().to_path_buf();

        {
            let _copy = WorkingCopy {
                path: path.clone(),
                temp: Some(temp),
            };
        }

        assert!(!path.exists());
    }
}
