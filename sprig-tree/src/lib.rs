//! Path-addressed, lazily materialized trees.
//!
//! This crate lets arbitrary hierarchical data be navigated uniformly:
//! - [`TreePath`] addresses a node by sibling indices (`/0/3/1`);
//! - [`TreeAdapter`] tells the crate how to enumerate the children of a
//!   value, and [`TreeConverter`] layers one adapter over another;
//! - [`TreeNode`] is a cheap cursor that computes children and parents on
//!   demand and offers depth-first, breadth-first and ancestor traversals;
//! - [`TreeState`] holds the expanded and selected paths of one tree and is
//!   shared by all of its nodes.
//!
//! Everything is single-threaded: nodes use `Rc`/`RefCell` internally.
//!
//! # Quick Example
//!
//! ```
//! use sprig_tree::{TreeNode, TreePath, adapter_fn};
//!
//! let adapter = adapter_fn(|value: &&'static str| match *value {
//!     "root" => vec!["docs", "src"],
//!     "src" => vec!["lib.rs", "main.rs"],
//!     _ => Vec::new(),
//! });
//! let root = TreeNode::root_collapsed("root", adapter);
//!
//! let path: TreePath = "/0/1/1".parse().unwrap();
//! let main = root.resolve(&path).unwrap();
//! assert_eq!(main.value(), &"main.rs");
//!
//! main.expand();
//! assert!(root.is_self_expanded());
//!
//! let names: Vec<_> = root.depth_first().map(|node| *node.value()).collect();
//! assert_eq!(names, ["root", "docs", "src", "lib.rs", "main.rs"]);
//! ```

mod adapter;
mod converter;
mod errors;
mod node;
mod path;
mod state;

pub use adapter::{Children, FnAdapter, TreeAdapter, adapter_fn};
pub use converter::{
    FnConverter, TreeAdapterWithConverter, TreeConverter, converter_fn,
};
pub use errors::{Result, TreeError, TreePathError};
pub use node::{Ancestors, BreadthFirst, ChildNodes, DepthFirst, TreeNode};
pub use path::{HierarchyUp, TreePath};
pub use state::{SharedTreeState, TreeState};
