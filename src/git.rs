//! Lockfile retrieval from git revisions

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

/// Error type for git retrieval
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("Failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("git show {revision}:{} failed: {stderr}", .path.display())]
    Show {
        revision: String,
        path: PathBuf,
        stderr: String,
    },
}

/// Contents of `path` at `revision`, relative to the current directory
pub fn show_file(path: &Path, revision: &str) -> Result<Cursor<Vec<u8>>, GitError> {
    show_file_in(None, path, revision)
}

/// Like [`show_file`], running git in `workdir` when given
pub fn show_file_in(
    workdir: Option<&Path>,
    path: &Path,
    revision: &str,
) -> Result<Cursor<Vec<u8>>, GitError> {
    let object = if path.is_relative() {
        format!("{}:./{}", revision, path.display())
    } else {
        format!("{}:{}", revision, path.display())
    };
    debug!("Reading {} from git", object);

    let mut command = Command::new("git");
    command.arg("show").arg(&object);
    if let Some(workdir) = workdir {
        command.current_dir(workdir);
    }
    let output = command.output().map_err(GitError::Spawn)?;

    if !output.status.success() {
        return Err(GitError::Show {
            revision: revision.to_string(),
            path: path.to_path_buf(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(Cursor::new(output.stdout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_file_outside_a_repository_fails() {
        let dir = tempfile::tempdir().unwrap();

        let result = show_file_in(Some(dir.path()), Path::new("Cargo.lock"), "HEAD");

        assert!(result.is_err());
    }

    #[test]
    fn show_error_names_revision_and_path() {
        let error = GitError::Show {
            revision: "main".to_string(),
            path: PathBuf::from("Cargo.lock"),
            stderr: "fatal: invalid object name 'main'.".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "git show main:Cargo.lock failed: fatal: invalid object name 'main'."
        );
    }
}
