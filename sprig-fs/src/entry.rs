use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::FsTreeError;

/// File or folder reported by [`FsTreeAdapter`].
///
/// [`FsTreeAdapter`]: crate::FsTreeAdapter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FsEntry {
    name: String,
    path: PathBuf,
    is_folder: bool,
}

impl FsEntry {
    pub fn new(
        name: impl Into<String>,
        path: PathBuf,
        is_folder: bool,
    ) -> Self {
        Self {
            name: name.into(),
            path,
            is_folder,
        }
    }

    /// Entry for an existing directory, used as the root of a tree.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FsTreeError> {
        let path = path.as_ref();
        let metadata = fs::metadata(path)?;
        if !metadata.is_dir() {
            return Err(FsTreeError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        Ok(Self::new(root_label(path), path.to_path_buf(), true))
    }

    /// Display name: the last path component.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_folder(&self) -> bool {
        self.is_folder
    }
}

/// Label of a root directory; paths without a final component (such as `/`)
/// are shown whole.
fn root_label(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(ToString::to_string)
        .unwrap_or_else(|| path.display().to_string())
}
