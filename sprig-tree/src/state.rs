use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::path::TreePath;

/// [`TreeState`] shared between the owner of a tree and all of its nodes.
///
/// Node methods that change the state take a mutable borrow and node methods
/// that read it take a shared one, so calling them while the owner holds a
/// conflicting guard panics. Drop guards before going back to the nodes.
pub type SharedTreeState = Rc<RefCell<TreeState>>;

/// Tree-wide expand/collapse and selection state, keyed by [`TreePath`].
///
/// The state knows nothing about node values; a path that no longer
/// resolves simply never matches a rendered node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeState {
    expanded: HashSet<TreePath>,
    selected: HashSet<TreePath>,
}

impl TreeState {
    /// Fresh state: root collapsed, nothing selected.
    pub fn root_collapsed() -> Self {
        Self::default()
    }

    /// Wrap a state so it can be handed to [`TreeNode::root`].
    ///
    /// [`TreeNode::root`]: crate::TreeNode::root
    pub fn shared(self) -> SharedTreeState {
        Rc::new(RefCell::new(self))
    }

    // --- Expansion ---

    pub fn expand<I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = TreePath>,
    {
        for path in paths {
            log::trace!("expanding tree path {path}");
            self.expanded.insert(path);
        }
    }

    pub fn collapse<'a, I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = &'a TreePath>,
    {
        for path in paths {
            log::trace!("collapsing tree path {path}");
            self.expanded.remove(path);
        }
    }

    pub fn is_expanded(&self, path: &TreePath) -> bool {
        self.expanded.contains(path)
    }

    /// Expanded paths in no particular order.
    pub fn expanded_paths(&self) -> impl Iterator<Item = &TreePath> {
        self.expanded.iter()
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    // --- Selection ---

    pub fn select<I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = TreePath>,
    {
        self.selected.extend(paths);
    }

    pub fn deselect<'a, I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = &'a TreePath>,
    {
        for path in paths {
            self.selected.remove(path);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, path: &TreePath) -> bool {
        self.selected.contains(path)
    }

    /// Selected paths in no particular order.
    pub fn selected_paths(&self) -> impl Iterator<Item = &TreePath> {
        self.selected.iter()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }
}
