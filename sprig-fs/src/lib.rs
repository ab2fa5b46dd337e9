//! Directory trees on top of [`sprig_tree`].
//!
//! [`FsTreeAdapter`] lists the contents of a directory as tree children,
//! sorted with [`compare_titles`]. [`fs_tree`] builds a collapsed tree rooted
//! at a directory in one call.
//!
//! See `examples/fs_tree.rs` for a runnable listing.

mod adapter;
mod entry;
mod errors;
mod options;
mod order;
#[cfg(test)]
mod testing;

use std::path::Path;

use sprig_tree::TreeNode;

pub use adapter::FsTreeAdapter;
pub use entry::FsEntry;
pub use errors::FsTreeError;
pub use options::FsTreeOptions;
pub use order::compare_titles;

/// Build a collapsed tree over the directory at `root`.
pub fn fs_tree(
    root: impl AsRef<Path>,
    options: FsTreeOptions,
) -> Result<TreeNode<FsEntry>, FsTreeError> {
    let entry = FsEntry::from_path(root)?;
    log::debug!("opening file tree at {}", entry.path().display());
    Ok(TreeNode::root_collapsed(entry, FsTreeAdapter::new(options)))
}
