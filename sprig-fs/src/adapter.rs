use std::fs::{self, DirEntry};

use sprig_tree::{Children, TreeAdapter};

use crate::entry::FsEntry;
use crate::options::FsTreeOptions;
use crate::order::compare_entries;

/// [`TreeAdapter`] exposing a directory hierarchy.
///
/// Directories are re-read on every enumeration, so the tree always reflects
/// the current disk contents. Entries that cannot be inspected are skipped
/// with a warning rather than failing the whole listing.
#[derive(Debug, Clone, Default)]
pub struct FsTreeAdapter {
    options: FsTreeOptions,
}

impl FsTreeAdapter {
    pub fn new(options: FsTreeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FsTreeOptions {
        &self.options
    }

    /// Load the visible children of `entry` in enumeration order.
    fn sorted_children(&self, entry: &FsEntry) -> Vec<FsEntry> {
        let mut children = self.read_children(entry);
        children.sort_by(|left, right| {
            compare_entries(left, right, self.options.folders_first)
        });
        children
    }

    fn read_children(&self, entry: &FsEntry) -> Vec<FsEntry> {
        if !entry.is_folder() {
            return Vec::new();
        }

        let reader = match fs::read_dir(entry.path()) {
            Ok(reader) => reader,
            Err(err) => {
                log::warn!(
                    "failed to read directory {}: {err}",
                    entry.path().display()
                );
                return Vec::new();
            },
        };

        let mut children = Vec::new();
        for dir_entry in reader {
            let dir_entry = match dir_entry {
                Ok(dir_entry) => dir_entry,
                Err(err) => {
                    log::warn!("failed to read directory entry: {err}");
                    continue;
                },
            };

            let name = dir_entry.file_name().to_string_lossy().to_string();
            if !self.options.show_hidden && name.starts_with('.') {
                continue;
            }

            let Some(is_folder) = self.is_folder(&dir_entry) else {
                continue;
            };
            children.push(FsEntry::new(name, dir_entry.path(), is_folder));
        }
        children
    }

    fn is_folder(&self, dir_entry: &DirEntry) -> Option<bool> {
        let file_type = match dir_entry.file_type() {
            Ok(file_type) => file_type,
            Err(err) => {
                log::warn!(
                    "failed to read type of {}: {err}",
                    dir_entry.path().display()
                );
                return None;
            },
        };

        if !file_type.is_symlink() {
            return Some(file_type.is_dir());
        }
        if !self.options.follow_symlinks {
            return Some(false);
        }

        match fs::metadata(dir_entry.path()) {
            Ok(metadata) => Some(metadata.is_dir()),
            Err(err) => {
                log::debug!(
                    "dangling symlink {}: {err}",
                    dir_entry.path().display()
                );
                Some(false)
            },
        }
    }
}

impl TreeAdapter<FsEntry> for FsTreeAdapter {
    fn children_of(&self, value: &FsEntry) -> Children<'_, FsEntry> {
        Box::new(self.sorted_children(value).into_iter())
    }

    fn child_count_of(&self, value: &FsEntry) -> usize {
        self.read_children(value).len()
    }
}
