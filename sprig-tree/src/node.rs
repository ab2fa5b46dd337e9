use std::any::type_name;
use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt;
use std::iter::Enumerate;
use std::rc::Rc;

use crate::adapter::{Children, TreeAdapter};
use crate::errors::{Result, TreeError};
use crate::path::TreePath;
use crate::state::{SharedTreeState, TreeState};

/// Identity shared by every node of one tree.
///
/// Nodes reach the root through this record, so the root never has to point
/// at itself.
struct Tree<T: Clone> {
    root_value: T,
    adapter: Box<dyn TreeAdapter<T>>,
    state: SharedTreeState,
}

/// Cursor describing "this path, in this tree".
///
/// A node is a cheap, immutable view: children and parents are computed on
/// demand through the tree's adapter and nothing is cached between calls.
/// The only mutable part of a tree is its [`TreeState`], which every node of
/// the tree shares.
pub struct TreeNode<T: Clone> {
    tree: Rc<Tree<T>>,
    path: TreePath,
    value: T,
}

impl<T: Clone> TreeNode<T> {
    /// Create the root node of a tree.
    pub fn root<A>(value: T, adapter: A, state: SharedTreeState) -> Self
    where
        A: TreeAdapter<T> + 'static,
    {
        let tree = Tree {
            root_value: value.clone(),
            adapter: Box::new(adapter),
            state,
        };
        Self {
            tree: Rc::new(tree),
            path: TreePath::root(),
            value,
        }
    }

    /// Create the root node of a tree with fresh, collapsed state.
    pub fn root_collapsed<A>(value: T, adapter: A) -> Self
    where
        A: TreeAdapter<T> + 'static,
    {
        Self::root(value, adapter, TreeState::root_collapsed().shared())
    }

    /// Create the root node of a tree whose adapter is built by `factory`.
    ///
    /// The factory runs exactly once, before the tree exists. Any collaborator
    /// the adapter needs must be captured by the factory.
    pub fn try_root<A, E, F>(
        value: T,
        factory: F,
        state: SharedTreeState,
    ) -> Result<Self>
    where
        A: TreeAdapter<T> + 'static,
        E: Into<Box<dyn StdError + Send + Sync>>,
        F: FnOnce() -> std::result::Result<A, E>,
    {
        let adapter = factory().map_err(|err| TreeError::AdapterConstruction {
            adapter: type_name::<A>(),
            source: err.into(),
        })?;
        Ok(Self::root(value, adapter, state))
    }

    // --- Position ---

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// Absolute path of this node.
    pub fn path(&self) -> &TreePath {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.path.is_root()
    }

    pub fn depth(&self) -> usize {
        self.path.depth()
    }

    pub fn index_within_siblings(&self) -> usize {
        self.path.index_within_siblings()
    }

    /// Value at the root position of this node's tree.
    pub fn root_value(&self) -> &T {
        &self.tree.root_value
    }

    pub fn root_node(&self) -> Self {
        Self {
            tree: Rc::clone(&self.tree),
            path: TreePath::root(),
            value: self.tree.root_value.clone(),
        }
    }

    /// Handle to the state shared by every node of this tree.
    pub fn shared_state(&self) -> SharedTreeState {
        Rc::clone(&self.tree.state)
    }

    // --- Navigation ---

    pub fn child_count(&self) -> usize {
        self.tree.adapter.child_count_of(&self.value)
    }

    pub fn is_leaf(&self) -> bool {
        self.child_count() == 0
    }

    /// Lazily yield the children of this node in sibling order.
    pub fn children(&self) -> ChildNodes<'_, T> {
        ChildNodes::of(&self.tree, self)
    }

    /// Parent node, resolved from the root; `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let parent_path = self.path.parent()?;
        self.root_node().resolve(&parent_path)
    }

    /// Resolve an absolute path within this node's tree.
    ///
    /// Paths below this node are resolved from here; any other path is
    /// resolved from the root.
    pub fn resolve(&self, absolute: &TreePath) -> Option<Self> {
        let resolved = if absolute.starts_with(&self.path) {
            let suffix = absolute.sub_path(self.path.len() - 1);
            self.resolve_relative(&suffix)
        } else {
            self.root_node().resolve_relative(absolute)
        };

        if resolved.is_none() {
            log::debug!("tree path {absolute} does not resolve");
        }
        resolved
    }

    /// Resolve `relative` with this node as its first element.
    ///
    /// Mirrors [`TreeAdapter::resolve_relative`], walking node cursors so the
    /// resolved node carries its absolute path.
    pub fn resolve_relative(&self, relative: &TreePath) -> Option<Self> {
        if relative.is_root() {
            return Some(self.clone());
        }

        let child_index = relative.child_index()?;
        let child = self.children().nth(child_index)?;

        if relative.len() > 2 {
            child.resolve_relative(&relative.sub_path(1))
        } else {
            Some(child)
        }
    }

    // --- Expand / collapse ---

    /// Expand this node together with all of its ancestors.
    ///
    /// # Panics
    ///
    /// Panics if the shared state is currently borrowed, for example through
    /// a guard obtained from [`Self::shared_state`].
    pub fn expand(&self) {
        self.expand_paths(self.path.hierarchy_up());
    }

    /// # Panics
    ///
    /// Panics if the shared state is currently borrowed.
    pub fn expand_paths<I>(&self, paths: I)
    where
        I: IntoIterator<Item = TreePath>,
    {
        self.tree.state.borrow_mut().expand(paths);
    }

    /// Collapse this node only; descendants keep their state.
    ///
    /// # Panics
    ///
    /// Panics if the shared state is currently borrowed.
    pub fn collapse(&self) {
        self.collapse_paths([&self.path]);
    }

    /// # Panics
    ///
    /// Panics if the shared state is currently borrowed.
    pub fn collapse_paths<'a, I>(&self, paths: I)
    where
        I: IntoIterator<Item = &'a TreePath>,
    {
        self.tree.state.borrow_mut().collapse(paths);
    }

    /// # Panics
    ///
    /// Panics if the shared state is currently mutably borrowed.
    pub fn is_expanded(&self, path: &TreePath) -> bool {
        self.tree.state.borrow().is_expanded(path)
    }

    pub fn is_self_expanded(&self) -> bool {
        self.is_expanded(&self.path)
    }

    // --- Selection ---

    /// # Panics
    ///
    /// Panics if the shared state is currently borrowed.
    pub fn select(&self) {
        self.select_paths([self.path.clone()]);
    }

    /// # Panics
    ///
    /// Panics if the shared state is currently borrowed.
    pub fn select_paths<I>(&self, paths: I)
    where
        I: IntoIterator<Item = TreePath>,
    {
        self.tree.state.borrow_mut().select(paths);
    }

    /// # Panics
    ///
    /// Panics if the shared state is currently borrowed.
    pub fn clear_selection(&self) {
        self.tree.state.borrow_mut().clear_selection();
    }

    /// # Panics
    ///
    /// Panics if the shared state is currently mutably borrowed.
    pub fn is_selected(&self, path: &TreePath) -> bool {
        self.tree.state.borrow().is_selected(path)
    }

    pub fn is_self_selected(&self) -> bool {
        self.is_selected(&self.path)
    }

    // --- Traversal ---

    /// This node, its parent, grandparent and so on up to the root.
    pub fn hierarchy_up(&self) -> Ancestors<T> {
        Ancestors {
            next: Some(self.clone()),
        }
    }

    /// Pre-order traversal of the subtree rooted at this node.
    pub fn depth_first(&self) -> DepthFirst<'_, T> {
        DepthFirst {
            tree: &self.tree,
            start: Some(self.clone()),
            last: None,
            stack: Vec::new(),
        }
    }

    /// Level-order traversal of the subtree rooted at this node.
    pub fn breadth_first(&self) -> BreadthFirst<'_, T> {
        BreadthFirst {
            tree: &self.tree,
            start: Some(self.clone()),
            current: None,
            queue: VecDeque::new(),
        }
    }
}

impl<T: Clone> Clone for TreeNode<T> {
    fn clone(&self) -> Self {
        Self {
            tree: Rc::clone(&self.tree),
            path: self.path.clone(),
            value: self.value.clone(),
        }
    }
}

/// Nodes are the same position when they share a tree and a path.
impl<T: Clone> PartialEq for TreeNode<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree) && self.path == other.path
    }
}

impl<T: Clone> Eq for TreeNode<T> {}

impl<T: Clone + fmt::Debug> fmt::Debug for TreeNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("path", &self.path)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// Iterator returned by [`TreeNode::children`].
pub struct ChildNodes<'a, T: Clone> {
    tree: &'a Rc<Tree<T>>,
    parent: TreePath,
    children: Enumerate<Children<'a, T>>,
}

impl<'a, T: Clone> ChildNodes<'a, T> {
    fn of(tree: &'a Rc<Tree<T>>, node: &TreeNode<T>) -> Self {
        Self {
            tree,
            parent: node.path.clone(),
            children: tree.adapter.children_of(&node.value).enumerate(),
        }
    }
}

impl<T: Clone> Iterator for ChildNodes<'_, T> {
    type Item = TreeNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, value) = self.children.next()?;
        Some(TreeNode {
            tree: Rc::clone(self.tree),
            path: self.parent.append(index),
            value,
        })
    }
}

/// Iterator returned by [`TreeNode::hierarchy_up`].
pub struct Ancestors<T: Clone> {
    next: Option<TreeNode<T>>,
}

impl<T: Clone> Iterator for Ancestors<T> {
    type Item = TreeNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}

/// Iterator returned by [`TreeNode::depth_first`].
///
/// Keeps one lazy child iterator per level instead of recursing, so deep
/// trees do not grow the call stack. The children of a yielded node are
/// only enumerated once the next node is requested.
pub struct DepthFirst<'a, T: Clone> {
    tree: &'a Rc<Tree<T>>,
    start: Option<TreeNode<T>>,
    last: Option<TreeNode<T>>,
    stack: Vec<ChildNodes<'a, T>>,
}

impl<T: Clone> Iterator for DepthFirst<'_, T> {
    type Item = TreeNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            self.last = Some(start.clone());
            return Some(start);
        }
        if let Some(last) = self.last.take() {
            self.stack.push(ChildNodes::of(self.tree, &last));
        }

        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(child) => {
                    self.last = Some(child.clone());
                    return Some(child);
                },
                None => {
                    self.stack.pop();
                },
            }
        }
    }
}

/// Iterator returned by [`TreeNode::breadth_first`].
///
/// Yielded nodes wait in a queue; a node's children are enumerated when the
/// traversal reaches them.
pub struct BreadthFirst<'a, T: Clone> {
    tree: &'a Rc<Tree<T>>,
    start: Option<TreeNode<T>>,
    current: Option<ChildNodes<'a, T>>,
    queue: VecDeque<TreeNode<T>>,
}

impl<T: Clone> Iterator for BreadthFirst<'_, T> {
    type Item = TreeNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            self.queue.push_back(start.clone());
            return Some(start);
        }

        loop {
            let next_child =
                self.current.as_mut().and_then(|children| children.next());
            if let Some(child) = next_child {
                self.queue.push_back(child.clone());
                return Some(child);
            }
            self.current = None;

            let parent = self.queue.pop_front()?;
            self.current = Some(ChildNodes::of(self.tree, &parent));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashSet;
    use std::io;

    use super::*;
    use crate::adapter::adapter_fn;

    fn fixture() -> TreeNode<&'static str> {
        let adapter = adapter_fn(|value: &&'static str| match *value {
            "root" => vec!["a", "b", "c"],
            "b" => vec!["x", "y"],
            "y" => vec!["z"],
            _ => Vec::new(),
        });
        TreeNode::root_collapsed("root", adapter)
    }

    fn path(text: &str) -> TreePath {
        text.parse().expect("test path should parse")
    }

    fn values(
        nodes: impl Iterator<Item = TreeNode<&'static str>>,
    ) -> Vec<&'static str> {
        nodes.map(|node| *node.value()).collect()
    }

    #[test]
    fn children_carry_appended_paths() {
        let root = fixture();
        let children: Vec<_> = root.children().collect();

        assert_eq!(children.len(), 3);
        assert_eq!(children[1].value(), &"b");
        assert_eq!(children[1].path(), &path("/0/1"));
        assert_eq!(children[1].index_within_siblings(), 1);
        assert_eq!(children[1].depth(), 1);
        assert_eq!(children[1].root_value(), &"root");
    }

    #[test]
    fn leaf_has_no_children() {
        let root = fixture();
        let leaf = root.resolve(&path("/0/0")).expect("a should resolve");
        assert!(leaf.is_leaf());
        assert_eq!(leaf.children().count(), 0);
        assert!(!root.is_leaf());
        assert_eq!(root.child_count(), 3);
    }

    #[test]
    fn resolve_finds_nested_nodes() {
        let root = fixture();
        let y = root.resolve(&path("/0/1/1")).expect("y should resolve");
        assert_eq!(y.value(), &"y");
        assert_eq!(y.path(), &path("/0/1/1"));

        let z = y.resolve(&path("/0/1/1/0")).expect("z should resolve");
        assert_eq!(z.value(), &"z");
    }

    #[test]
    fn resolve_outside_subtree_goes_through_root() {
        let root = fixture();
        let x = root.resolve(&path("/0/1/0")).expect("x should resolve");
        let c = x.resolve(&path("/0/2")).expect("c should resolve");
        assert_eq!(c.value(), &"c");
        assert_eq!(c.path(), &path("/0/2"));

        let back_to_root = x.resolve(&TreePath::root()).expect("root");
        assert!(back_to_root.is_root());
        assert_eq!(back_to_root, root);
    }

    #[test]
    fn resolve_of_missing_path_is_none() {
        let root = fixture();
        assert!(root.resolve(&path("/0/3")).is_none());
        assert!(root.resolve(&path("/0/1/1/0/0")).is_none());
    }

    #[test]
    fn parent_walks_back_up() {
        let root = fixture();
        let z = root.resolve(&path("/0/1/1/0")).expect("z should resolve");
        let y = z.parent().expect("z has a parent");
        assert_eq!(y.value(), &"y");
        assert_eq!(y.path(), &path("/0/1/1"));
        assert!(root.parent().is_none());
    }

    #[test]
    fn nodes_with_equal_paths_are_equal() {
        let root = fixture();
        let first = root.resolve(&path("/0/1")).expect("b should resolve");
        let second = root.children().nth(1).expect("b is a child");
        assert_eq!(first, second);

        let other_tree = fixture();
        assert_ne!(root, other_tree);
    }

    #[test]
    fn hierarchy_up_ends_at_root() {
        let root = fixture();
        let z = root.resolve(&path("/0/1/1/0")).expect("z should resolve");
        assert_eq!(values(z.hierarchy_up()), vec!["z", "y", "b", "root"]);
        assert_eq!(values(z.hierarchy_up()), vec!["z", "y", "b", "root"]);
    }

    #[test]
    fn depth_first_is_pre_order() {
        let root = fixture();
        assert_eq!(
            values(root.depth_first()),
            vec!["root", "a", "b", "x", "y", "z", "c"]
        );

        let b = root.resolve(&path("/0/1")).expect("b should resolve");
        assert_eq!(values(b.depth_first()), vec!["b", "x", "y", "z"]);
    }

    #[test]
    fn breadth_first_is_level_order() {
        let root = fixture();
        assert_eq!(
            values(root.breadth_first()),
            vec!["root", "a", "b", "c", "x", "y", "z"]
        );
    }

    #[test]
    fn traversals_visit_each_path_once() {
        let root = fixture();
        for nodes in [
            root.depth_first().collect::<Vec<_>>(),
            root.breadth_first().collect::<Vec<_>>(),
        ] {
            let paths: HashSet<_> =
                nodes.iter().map(|node| node.path().clone()).collect();
            assert_eq!(nodes.len(), 7);
            assert_eq!(paths.len(), 7);
            assert!(nodes[0].is_root());
        }
    }

    /// Every node has infinitely many children.
    struct Unbounded;

    impl TreeAdapter<u64> for Unbounded {
        fn children_of(&self, value: &u64) -> Children<'_, u64> {
            let base = value * 10;
            Box::new((0..).map(move |index| base + index))
        }
    }

    #[test]
    fn traversals_are_lazy_on_unbounded_trees() {
        let root = TreeNode::root_collapsed(1_u64, Unbounded);

        let breadth: Vec<_> = root
            .breadth_first()
            .take(4)
            .map(|node| *node.value())
            .collect();
        assert_eq!(breadth, vec![1, 10, 11, 12]);

        let depth: Vec<_> = root
            .depth_first()
            .take(4)
            .map(|node| *node.value())
            .collect();
        assert_eq!(depth, vec![1, 10, 100, 1000]);

        let deep = root
            .resolve(&path("/0/2/3"))
            .expect("unbounded tree always resolves");
        assert_eq!(deep.value(), &123);
    }

    /// Counts `children_of` calls made by the tree.
    struct Counting {
        calls: Rc<Cell<usize>>,
    }

    impl TreeAdapter<u32> for Counting {
        fn children_of(&self, value: &u32) -> Children<'_, u32> {
            self.calls.set(self.calls.get() + 1);
            let base = value * 10;
            Box::new((1..=3).map(move |index| base + index))
        }
    }

    fn counting_tree() -> (TreeNode<u32>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let adapter = Counting {
            calls: Rc::clone(&calls),
        };
        (TreeNode::root_collapsed(0, adapter), calls)
    }

    #[test]
    fn depth_first_enumerates_children_only_when_pulled() {
        let (root, calls) = counting_tree();

        let mut nodes = root.depth_first();
        assert_eq!(nodes.next().map(|node| *node.value()), Some(0));
        assert_eq!(calls.get(), 0);

        assert_eq!(nodes.next().map(|node| *node.value()), Some(1));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn breadth_first_enumerates_children_only_when_pulled() {
        let (root, calls) = counting_tree();

        let first: Vec<_> =
            root.breadth_first().take(1).map(|node| *node.value()).collect();
        assert_eq!(first, vec![0]);
        assert_eq!(calls.get(), 0);

        let level: Vec<_> =
            root.breadth_first().take(4).map(|node| *node.value()).collect();
        assert_eq!(level, vec![0, 1, 2, 3]);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    #[should_panic]
    fn given_borrowed_state_when_expanding_then_panics() {
        let root = fixture();
        let state = root.shared_state();
        let _guard = state.borrow();
        root.expand();
    }

    #[test]
    fn expand_marks_all_ancestors() {
        let root = fixture();
        let z = root.resolve(&path("/0/1/1/0")).expect("z should resolve");
        z.expand();

        let state = root.shared_state();
        let state = state.borrow();
        assert_eq!(state.expanded_count(), z.depth() + 1);
        for ancestor in z.hierarchy_up() {
            assert!(state.is_expanded(ancestor.path()));
        }
        assert!(!state.is_expanded(&path("/0/2")));
    }

    #[test]
    fn state_is_shared_across_nodes_and_owner() {
        let state = TreeState::root_collapsed().shared();
        let root = TreeNode::root(
            "root",
            adapter_fn(|value: &&'static str| match *value {
                "root" => vec!["a"],
                _ => Vec::new(),
            }),
            Rc::clone(&state),
        );
        let a = root.children().next().expect("a is a child");

        a.select();
        root.expand_paths([path("/0")]);

        assert!(!root.is_self_selected());
        assert!(root.is_selected(a.path()));
        assert!(a.is_self_selected());
        assert!(a.is_expanded(&TreePath::root()));
        assert!(state.borrow().is_selected(&path("/0/0")));

        root.clear_selection();
        assert!(!a.is_self_selected());

        a.expand();
        a.collapse();
        assert!(!a.is_self_expanded());
        assert!(root.is_self_expanded());
        root.collapse_paths([&TreePath::root()]);
        assert_eq!(state.borrow().expanded_count(), 0);
    }

    #[derive(Debug)]
    struct NeedsConnection;

    impl TreeAdapter<u8> for NeedsConnection {
        fn children_of(&self, _value: &u8) -> Children<'_, u8> {
            Box::new(std::iter::empty())
        }
    }

    #[test]
    fn given_failing_factory_when_building_root_then_error_names_adapter() {
        let result = TreeNode::try_root(
            0_u8,
            || -> std::result::Result<NeedsConnection, io::Error> {
                Err(io::Error::other("no connection"))
            },
            TreeState::root_collapsed().shared(),
        );

        let err = result.expect_err("factory failure should surface");
        let message = err.to_string();
        assert!(message.contains("NeedsConnection"), "{message}");
        assert!(message.contains("no connection"), "{message}");
    }

    #[test]
    fn given_working_factory_when_building_root_then_tree_is_usable() {
        let root = TreeNode::try_root(
            0_u8,
            || Ok::<_, io::Error>(NeedsConnection),
            TreeState::root_collapsed().shared(),
        )
        .expect("factory should succeed");
        assert!(root.is_leaf());
    }
}
