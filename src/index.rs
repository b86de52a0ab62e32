//! Directory indexer
//!
//! Walks a workspace once and produces a normalized [`FileIndex`]: the full
//! list of relative paths plus lookup buckets by bare filename and by file
//! extension. Detectors never touch the filesystem tree themselves; they
//! query this index and only open the specific manifests they care about.

use ignore::WalkBuilder;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Root-level indexing failure. Fatal to a classification call; everything
/// below the root degrades by skipping instead.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("workspace path does not exist: {0}")]
    NotFound(PathBuf),

    #[error("workspace path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read workspace root {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Immutable index of a workspace directory tree.
///
/// Paths are relative to the indexed root, use `/` separators, and are
/// sorted so repeated runs over an unmodified tree produce identical
/// indices.
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    files: Vec<String>,
    by_name: HashMap<String, Vec<String>>,
    by_extension: HashMap<String, Vec<String>>,
}

impl FileIndex {
    /// Build an index for `root`, walking the full tree depth.
    ///
    /// Gitignored paths and the `.git` directory are excluded; they are
    /// never classification signals. Unreadable subtrees are logged and
    /// skipped, only an unreadable root is an error.
    pub fn build(root: &Path) -> Result<Self, IndexError> {
        if !root.exists() {
            return Err(IndexError::NotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(IndexError::NotADirectory(root.to_path_buf()));
        }
        // Surfaces permission errors on the root itself; WalkBuilder would
        // silently yield nothing for them.
        std::fs::read_dir(root).map_err(|source| IndexError::Unreadable {
            path: root.to_path_buf(),
            source,
        })?;

        let mut files = Vec::new();

        for result in WalkBuilder::new(root)
            .hidden(false)
            .git_ignore(true)
            .filter_entry(|entry| entry.file_name() != ".git")
            .build()
        {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    warn!(error = %err, "Failed to read directory entry");
                    continue;
                }
            };
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            files.push(rel);
        }

        files.sort();

        let mut by_name: HashMap<String, Vec<String>> = HashMap::new();
        let mut by_extension: HashMap<String, Vec<String>> = HashMap::new();

        for rel in &files {
            let name = rel.rsplit('/').next().unwrap_or(rel).to_string();
            // A leading dot is part of the name, not an extension (".env")
            if let Some((stem, ext)) = name.rsplit_once('.') {
                if !stem.is_empty() && !ext.is_empty() {
                    by_extension
                        .entry(format!(".{}", ext))
                        .or_default()
                        .push(rel.clone());
                }
            }
            by_name.entry(name).or_default().push(rel.clone());
        }

        debug!(root = %root.display(), files = files.len(), "Workspace indexed");

        Ok(Self {
            files,
            by_name,
            by_extension,
        })
    }

    /// All indexed relative paths, sorted.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Every path whose bare filename equals `name`.
    pub fn named(&self, name: &str) -> &[String] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First path (in sort order) whose bare filename equals `name`.
    pub fn first_named(&self, name: &str) -> Option<&str> {
        self.named(name).first().map(String::as_str)
    }

    /// Shallowest path whose bare filename equals `name`, ties broken by
    /// sort order. Manifest reads use this so a nested copy never shadows
    /// the workspace-level one.
    pub fn shallowest_named(&self, name: &str) -> Option<&str> {
        self.named(name)
            .iter()
            .min_by_key(|path| path.matches('/').count())
            .map(String::as_str)
    }

    pub fn has_named(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Every path with the given extension; `ext` includes the leading dot.
    pub fn with_extension(&self, ext: &str) -> &[String] {
        self.by_extension
            .get(ext)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_extension(&self, ext: &str) -> bool {
        self.by_extension.contains_key(ext)
    }

    pub fn contains(&self, rel_path: &str) -> bool {
        self.files.binary_search_by(|f| f.as_str().cmp(rel_path)).is_ok()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_build_nonexistent_root() {
        let result = FileIndex::build(Path::new("/nonexistent/workspace"));
        assert!(matches!(result, Err(IndexError::NotFound(_))));
    }

    #[test]
    fn test_build_root_not_a_directory() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "file.txt");
        let result = FileIndex::build(&dir.path().join("file.txt"));
        assert!(matches!(result, Err(IndexError::NotADirectory(_))));
    }

    #[test]
    fn test_index_is_sorted_and_relative() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.txt");
        touch(dir.path(), "a.txt");
        touch(dir.path(), "sub/c.txt");

        let index = FileIndex::build(dir.path()).unwrap();
        assert_eq!(index.files(), &["a.txt", "b.txt", "sub/c.txt"]);
    }

    #[test]
    fn test_full_depth_traversal() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "cmd/server/deep/nested/main.go");

        let index = FileIndex::build(dir.path()).unwrap();
        assert_eq!(
            index.first_named("main.go"),
            Some("cmd/server/deep/nested/main.go")
        );
    }

    #[test]
    fn test_by_name_buckets_merge_duplicates() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "package.json");
        touch(dir.path(), "packages/api/package.json");

        let index = FileIndex::build(dir.path()).unwrap();
        assert_eq!(index.named("package.json").len(), 2);
        assert_eq!(index.first_named("package.json"), Some("package.json"));
    }

    #[test]
    fn test_shallowest_named_prefers_root_over_sort_order() {
        // "api/package.json" sorts before "package.json"; depth wins
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "api/package.json");
        touch(dir.path(), "package.json");

        let index = FileIndex::build(dir.path()).unwrap();
        assert_eq!(index.first_named("package.json"), Some("api/package.json"));
        assert_eq!(index.shallowest_named("package.json"), Some("package.json"));
    }

    #[test]
    fn test_shallowest_named_equal_depth_falls_back_to_sort_order() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "api/requirements.txt");
        touch(dir.path(), "web/requirements.txt");

        let index = FileIndex::build(dir.path()).unwrap();
        assert_eq!(
            index.shallowest_named("requirements.txt"),
            Some("api/requirements.txt")
        );
    }

    #[test]
    fn test_by_extension_includes_leading_dot() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/index.php");
        touch(dir.path(), "README");

        let index = FileIndex::build(dir.path()).unwrap();
        assert_eq!(index.with_extension(".php"), &["src/index.php"]);
        assert!(!index.has_extension(".md"));
        // Extensionless files land in by_name only
        assert!(index.has_named("README"));
    }

    #[test]
    fn test_dotfiles_have_no_extension() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".env");
        touch(dir.path(), ".gitignore");

        let index = FileIndex::build(dir.path()).unwrap();
        assert!(!index.has_extension(".env"));
        assert!(!index.has_extension(".gitignore"));
        assert!(index.has_named(".env"));
    }

    #[test]
    fn test_git_dir_is_skipped() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".git/config");
        touch(dir.path(), "main.py");

        let index = FileIndex::build(dir.path()).unwrap();
        assert_eq!(index.files(), &["main.py"]);
    }

    #[test]
    fn test_contains() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "app/main.py");

        let index = FileIndex::build(dir.path()).unwrap();
        assert!(index.contains("app/main.py"));
        assert!(!index.contains("main.py"));
    }
}
