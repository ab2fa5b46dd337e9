/// Knobs controlling which entries a [`FsTreeAdapter`] reports and in which
/// order.
///
/// [`FsTreeAdapter`]: crate::FsTreeAdapter
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FsTreeOptions {
    /// Report entries whose name starts with a dot.
    pub show_hidden: bool,
    /// Place folders before files within a directory.
    pub folders_first: bool,
    /// Treat symlinks to directories as folders.
    ///
    /// A symlink cycle then yields an unbounded tree; traversals stay lazy,
    /// so only consume what you need.
    pub follow_symlinks: bool,
}

impl Default for FsTreeOptions {
    fn default() -> Self {
        Self {
            show_hidden: false,
            folders_first: true,
            follow_symlinks: true,
        }
    }
}
