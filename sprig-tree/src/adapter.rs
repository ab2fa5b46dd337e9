use std::rc::Rc;

use crate::converter::{TreeAdapterWithConverter, TreeConverter};
use crate::path::TreePath;

/// Lazily produced children of a node.
///
/// The iterator may borrow the adapter, never the parent value.
pub type Children<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

/// Exposes parent/child relationships for node values of type `T`.
///
/// The adapter is the only source of truth for child existence. Enumeration
/// order defines sibling indices and must be stable across calls for the
/// same logical value.
pub trait TreeAdapter<T: Clone> {
    /// Enumerate the children of `value`.
    ///
    /// Must be finite and free of caller-visible side effects, so calling it
    /// repeatedly yields the same sequence.
    fn children_of(&self, value: &T) -> Children<'_, T>;

    /// Number of children of `value`.
    fn child_count_of(&self, value: &T) -> usize {
        self.children_of(value).count()
    }

    /// Resolve `relative` starting at `node`.
    ///
    /// A path of length 1 denotes `node` itself. Otherwise the element at
    /// position 1 is the 0-based sibling index of the next step, and the
    /// remainder is resolved from that child.
    fn resolve_relative(&self, node: &T, relative: &TreePath) -> Option<T> {
        if relative.is_root() {
            return Some(node.clone());
        }

        let child_index = relative.child_index()?;
        let child = self.children_of(node).nth(child_index)?;

        if relative.len() > 2 {
            self.resolve_relative(&child, &relative.sub_path(1))
        } else {
            Some(child)
        }
    }

    /// Layer a converter on top of this adapter, producing an adapter over
    /// the converted node type `V`.
    fn convert<V, C>(
        self,
        converter: C,
    ) -> TreeAdapterWithConverter<T, V, Self, C>
    where
        Self: Sized,
        V: Clone,
        C: TreeConverter<T, V>,
    {
        TreeAdapterWithConverter::new(self, converter)
    }
}

impl<T, A> TreeAdapter<T> for Rc<A>
where
    T: Clone,
    A: TreeAdapter<T> + ?Sized,
{
    fn children_of(&self, value: &T) -> Children<'_, T> {
        (**self).children_of(value)
    }

    fn child_count_of(&self, value: &T) -> usize {
        (**self).child_count_of(value)
    }

    fn resolve_relative(&self, node: &T, relative: &TreePath) -> Option<T> {
        (**self).resolve_relative(node, relative)
    }
}

impl<T, A> TreeAdapter<T> for Box<A>
where
    T: Clone,
    A: TreeAdapter<T> + ?Sized,
{
    fn children_of(&self, value: &T) -> Children<'_, T> {
        (**self).children_of(value)
    }

    fn child_count_of(&self, value: &T) -> usize {
        (**self).child_count_of(value)
    }

    fn resolve_relative(&self, node: &T, relative: &TreePath) -> Option<T> {
        (**self).resolve_relative(node, relative)
    }
}

/// Adapter backed by a closure returning the children of a value.
pub struct FnAdapter<F> {
    children: F,
}

/// Build an adapter from a closure.
pub fn adapter_fn<T, F>(children: F) -> FnAdapter<F>
where
    F: Fn(&T) -> Vec<T>,
{
    FnAdapter { children }
}

impl<F> std::fmt::Debug for FnAdapter<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnAdapter").finish_non_exhaustive()
    }
}

impl<T, F> TreeAdapter<T> for FnAdapter<F>
where
    T: Clone + 'static,
    F: Fn(&T) -> Vec<T>,
{
    fn children_of(&self, value: &T) -> Children<'_, T> {
        Box::new((self.children)(value).into_iter())
    }

    fn child_count_of(&self, value: &T) -> usize {
        (self.children)(value).len()
    }
}
