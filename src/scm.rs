//! Source-control client
//!
//! Materializes remote repositories into exclusively-owned workspace
//! directories and pushes generated artifacts back. Shells out to the `git`
//! CLI; the core never sees anything but "here is a local path".

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum ScmError {
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("git {operation} failed: {stderr}")]
    Git { operation: String, stderr: String },
}

pub struct GitClient {
    base_dir: PathBuf,
}

impl GitClient {
    /// Workspaces are created under `base_dir`, one directory per repo.
    pub fn new(base_dir: PathBuf) -> Result<Self, ScmError> {
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Clone `url` (branch `branch`) into a fresh workspace and return its
    /// path. A leftover workspace for the same repo is destroyed first.
    pub fn materialize(
        &self,
        url: &str,
        branch: &str,
        token: Option<&str>,
    ) -> Result<PathBuf, ScmError> {
        let repo_name = url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or("workspace")
            .trim_end_matches(".git");
        let target = self.base_dir.join(repo_name);

        if target.exists() {
            info!(workspace = %target.display(), "Workspace already exists. Cleaning up first.");
            self.destroy(&target);
        }

        let clone_url = match token {
            Some(token) if url.starts_with("https://") => {
                url.replacen("https://", &format!("https://{}@", token), 1)
            }
            _ => url.to_string(),
        };

        info!(url, branch, target = %target.display(), "Cloning repository");
        let output = Command::new("git")
            .args(["clone", "--branch", branch, "--single-branch", &clone_url])
            .arg(&target)
            .output()?;

        if !output.status.success() {
            let mut stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            // The token would otherwise leak through git's own error text
            if let Some(token) = token.filter(|t| !t.is_empty()) {
                stderr = stderr.replace(token, "***");
            }
            return Err(ScmError::Git {
                operation: "clone".to_string(),
                stderr,
            });
        }
        Ok(target)
    }

    /// Commit all changes in `workspace` and push. Returns `Ok(false)` when
    /// there was nothing to commit.
    pub fn commit_and_push(&self, workspace: &Path, message: &str) -> Result<bool, ScmError> {
        self.run_git(workspace, &["add", "-A"])?;

        let status = Command::new("git")
            .current_dir(workspace)
            .args(["status", "--porcelain"])
            .output()?;
        if status.stdout.is_empty() {
            info!("No changes to push.");
            return Ok(false);
        }

        self.run_git(workspace, &["commit", "-m", message])?;
        self.run_git(workspace, &["push", "origin", "HEAD"])?;
        info!("Pushed generated files to remote.");
        Ok(true)
    }

    /// Best-effort recursive delete. Read-only attributes (git object files
    /// on some platforms) are cleared before retrying.
    pub fn destroy(&self, workspace: &Path) {
        if !workspace.exists() {
            return;
        }
        info!(workspace = %workspace.display(), "Cleaning up workspace");
        if std::fs::remove_dir_all(workspace).is_err() {
            clear_readonly(workspace);
            if let Err(err) = std::fs::remove_dir_all(workspace) {
                error!(workspace = %workspace.display(), error = %err, "Failed to delete workspace");
            }
        }
    }

    fn run_git(&self, workspace: &Path, args: &[&str]) -> Result<(), ScmError> {
        let output = Command::new("git")
            .current_dir(workspace)
            .args(args)
            .output()?;
        if !output.status.success() {
            return Err(ScmError::Git {
                operation: args.first().copied().unwrap_or("?").to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(())
    }
}

fn clear_readonly(path: &Path) {
    let entries = match std::fs::read_dir(path) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Cannot list directory during cleanup");
            return;
        }
    };
    for entry in entries.flatten() {
        let entry_path = entry.path();
        if let Ok(metadata) = entry.metadata() {
            let mut perms = metadata.permissions();
            if perms.readonly() {
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    perms.set_mode(perms.mode() | 0o200);
                }
                #[cfg(not(unix))]
                perms.set_readonly(false);
                let _ = std::fs::set_permissions(&entry_path, perms);
            }
            if metadata.is_dir() {
                clear_readonly(&entry_path);
            }
        }
    }
}
