use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::TreePathError;

/// Canonical address of a node within a tree.
///
/// A path is a non-empty sequence of sibling indices. The first element is a
/// placeholder for "this node itself", so the root is `[0]` and the child at
/// sibling index `i` of the root is `[0, i]`.
///
/// Paths are immutable: every operation that changes the shape returns a new
/// instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreePath {
    elements: Vec<usize>,
}

impl TreePath {
    /// Delimiter used by [`fmt::Display`], [`FromStr`] and serde.
    pub const DEFAULT_DELIMITER: &'static str = "/";

    /// The path of the root node, `[0]`.
    pub fn root() -> Self {
        Self { elements: vec![0] }
    }

    /// Build a path from its canonical integer sequence.
    pub fn from_canonical(
        elements: Vec<usize>,
    ) -> Result<Self, TreePathError> {
        if elements.is_empty() {
            return Err(TreePathError::EmptyPath);
        }
        Ok(Self { elements })
    }

    /// Return a new path one element longer.
    pub fn append(&self, index_within_siblings: usize) -> Self {
        let mut elements = Vec::with_capacity(self.elements.len() + 1);
        elements.extend_from_slice(&self.elements);
        elements.push(index_within_siblings);
        Self { elements }
    }

    /// Drop the first `start` elements.
    ///
    /// The first remaining element becomes the new "self" placeholder.
    ///
    /// # Panics
    ///
    /// Panics if `start` is not smaller than [`Self::len`], since the result
    /// would be empty.
    pub fn sub_path(&self, start: usize) -> Self {
        assert!(
            start < self.elements.len(),
            "sub path start {start} out of bounds for path of length {}",
            self.elements.len()
        );
        Self {
            elements: self.elements[start..].to_vec(),
        }
    }

    /// Return the path with its last element removed, or `None` for a root
    /// path.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            elements: self.elements[..self.elements.len() - 1].to_vec(),
        })
    }

    pub fn is_root(&self) -> bool {
        self.elements.len() == 1
    }

    /// Whether `other`'s elements are a prefix of this path.
    pub fn starts_with(&self, other: &TreePath) -> bool {
        self.elements.starts_with(&other.elements)
    }

    /// Sibling index of the next node addressed by this path, i.e. the
    /// element at position 1.
    pub fn child_index(&self) -> Option<usize> {
        self.elements.get(1).copied()
    }

    /// Last element, the node's position among its siblings.
    pub fn index_within_siblings(&self) -> usize {
        self.elements[self.elements.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always `false`; present for symmetry with [`Self::len`].
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of edges between the root and the addressed node.
    pub fn depth(&self) -> usize {
        self.elements.len() - 1
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.elements
    }

    /// Iterate this path, its parent, grandparent and so on up to and
    /// including the root.
    pub fn hierarchy_up(&self) -> HierarchyUp {
        HierarchyUp {
            next: Some(self.clone()),
        }
    }

    /// Encode the path as `delimiter` followed by each element, joined by
    /// `delimiter` (e.g. `/0/3/1`).
    pub fn stringify(&self, delimiter: &str) -> String {
        let mut out = String::new();
        for element in &self.elements {
            out.push_str(delimiter);
            out.push_str(&element.to_string());
        }
        out
    }

    /// Inverse of [`Self::stringify`].
    ///
    /// An empty `text` parses to the root path. The leading delimiter may be
    /// omitted; every other token must be a non-empty run of ASCII digits.
    pub fn parse(text: &str, delimiter: &str) -> Result<Self, TreePathError> {
        if delimiter.is_empty() {
            return Err(TreePathError::EmptyDelimiter);
        }
        if text.is_empty() {
            return Ok(Self::root());
        }

        let body = text.strip_prefix(delimiter).unwrap_or(text);
        let elements = body
            .split(delimiter)
            .map(|token| parse_element(token, text))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { elements })
    }
}

fn parse_element(token: &str, text: &str) -> Result<usize, TreePathError> {
    let malformed = || TreePathError::MalformedToken {
        token: token.to_string(),
        text: text.to_string(),
    };

    if token.is_empty() || !token.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(malformed());
    }
    token.parse::<usize>().map_err(|_| malformed())
}

impl Default for TreePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify(Self::DEFAULT_DELIMITER))
    }
}

impl FromStr for TreePath {
    type Err = TreePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, Self::DEFAULT_DELIMITER)
    }
}

impl TryFrom<Vec<usize>> for TreePath {
    type Error = TreePathError;

    fn try_from(elements: Vec<usize>) -> Result<Self, Self::Error> {
        Self::from_canonical(elements)
    }
}

impl Serialize for TreePath {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TreePath {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        deserializer.deserialize_str(TreePathVisitor)
    }
}

struct TreePathVisitor;

impl Visitor<'_> for TreePathVisitor {
    type Value = TreePath;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a stringified tree path such as `/0/3/1`")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<TreePath, E> {
        value.parse().map_err(E::custom)
    }
}

/// Iterator returned by [`TreePath::hierarchy_up`].
#[derive(Debug, Clone)]
pub struct HierarchyUp {
    next: Option<TreePath>,
}

impl Iterator for HierarchyUp {
    type Item = TreePath;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.next.as_ref().map_or(0, TreePath::len);
        (len, Some(len))
    }
}

impl ExactSizeIterator for HierarchyUp {}
