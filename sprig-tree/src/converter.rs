use std::fmt;
use std::marker::PhantomData;

use crate::adapter::{Children, TreeAdapter};
use crate::path::TreePath;

/// Bidirectional mapping between an underlying node type `U` and a
/// presentation node type `T`.
pub trait TreeConverter<U, T> {
    /// Build the `T` node for `value`, given its intended parent and its
    /// 0-based position among its siblings.
    fn from_underlying(&self, value: U, parent: &T, sibling_index: usize) -> T;

    /// Map a `T` node back to the value the underlying adapter understands.
    ///
    /// `None` means the node cannot be mapped; it is then treated as a leaf
    /// and no path resolves from it.
    fn to_underlying(&self, value: &T) -> Option<U>;
}

/// Converter made of two closures.
pub struct FnConverter<F, G> {
    from: F,
    to: G,
}

/// Build a converter from a `from` and a `to` closure.
pub fn converter_fn<U, T, F, G>(from: F, to: G) -> FnConverter<F, G>
where
    F: Fn(U, &T, usize) -> T,
    G: Fn(&T) -> Option<U>,
{
    FnConverter { from, to }
}

impl<F, G> fmt::Debug for FnConverter<F, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnConverter").finish_non_exhaustive()
    }
}

impl<U, T, F, G> TreeConverter<U, T> for FnConverter<F, G>
where
    F: Fn(U, &T, usize) -> T,
    G: Fn(&T) -> Option<U>,
{
    fn from_underlying(&self, value: U, parent: &T, sibling_index: usize) -> T {
        (self.from)(value, parent, sibling_index)
    }

    fn to_underlying(&self, value: &T) -> Option<U> {
        (self.to)(value)
    }
}

/// Adapter over `T` built from an adapter over `U` and a converter.
///
/// Usually created through [`TreeAdapter::convert`].
pub struct TreeAdapterWithConverter<U, T, A, C> {
    underlying: A,
    converter: C,
    _nodes: PhantomData<fn(U) -> T>,
}

impl<U, T, A, C> TreeAdapterWithConverter<U, T, A, C> {
    pub fn new(underlying: A, converter: C) -> Self {
        Self {
            underlying,
            converter,
            _nodes: PhantomData,
        }
    }

    pub fn underlying(&self) -> &A {
        &self.underlying
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }
}

impl<U, T, A, C> fmt::Debug for TreeAdapterWithConverter<U, T, A, C>
where
    A: fmt::Debug,
    C: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeAdapterWithConverter")
            .field("underlying", &self.underlying)
            .field("converter", &self.converter)
            .finish()
    }
}

impl<U, T, A, C> TreeAdapter<T> for TreeAdapterWithConverter<U, T, A, C>
where
    U: Clone + 'static,
    T: Clone + 'static,
    A: TreeAdapter<U>,
    C: TreeConverter<U, T>,
{
    fn children_of(&self, value: &T) -> Children<'_, T> {
        let Some(underlying) = self.converter.to_underlying(value) else {
            return Box::new(std::iter::empty());
        };

        let parent = value.clone();
        let converter = &self.converter;
        Box::new(self.underlying.children_of(&underlying).enumerate().map(
            move |(sibling_index, child)| {
                converter.from_underlying(child, &parent, sibling_index)
            },
        ))
    }

    fn child_count_of(&self, value: &T) -> usize {
        self.converter
            .to_underlying(value)
            .map_or(0, |underlying| self.underlying.child_count_of(&underlying))
    }

    fn resolve_relative(&self, node: &T, relative: &TreePath) -> Option<T> {
        // One underlying resolution per hop, re-wrapped with the converted
        // parent of that hop. An un-mappable start node resolves to nothing,
        // including for the self path.
        let mut underlying = self.converter.to_underlying(node)?;
        let mut current = node.clone();
        for &sibling_index in &relative.as_slice()[1..] {
            let step = TreePath::root().append(sibling_index);
            let child = self.underlying.resolve_relative(&underlying, &step)?;
            current = self.converter.from_underlying(
                child.clone(),
                &current,
                sibling_index,
            );
            underlying = child;
        }
        Some(current)
    }
}
