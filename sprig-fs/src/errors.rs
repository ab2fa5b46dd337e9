use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted while opening a directory tree.
#[derive(Debug, Error)]
pub enum FsTreeError {
    #[error("file tree I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("`{}` is not a directory", path.display())]
    NotADirectory { path: PathBuf },
}
