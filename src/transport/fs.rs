use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::PrepError;

/// Filesystem listing of the documents inside one category directory.
pub struct DocumentDir {
    root: PathBuf,
    follow_links: bool,
}

impl DocumentDir {
    /// Create a listing rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: false,
        }
    }

    /// Configure symlink traversal.
    pub fn with_follow_symlinks(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Regular files directly under the root, sorted by path.
    ///
    /// Sub-directories are not descended into. A missing or unreadable root
    /// is a resource error.
    pub fn files(&self) -> Result<Vec<PathBuf>, PrepError> {
        let metadata =
            fs::metadata(&self.root).map_err(|err| PrepError::resource(&self.root, err))?;
        if !metadata.is_dir() {
            return Err(PrepError::resource(
                &self.root,
                std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
            ));
        }
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_links)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|err| {
                let path = err.path().unwrap_or(self.root.as_path()).to_path_buf();
                PrepError::resource(path, err.into())
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

/// Read a whole document as text.
///
/// Invalid UTF-8 is replaced with U+FFFD; only IO failures are errors.
pub fn read_document(path: &Path) -> Result<String, PrepError> {
    let bytes = fs::read(path).map_err(|err| PrepError::resource(path, err))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
