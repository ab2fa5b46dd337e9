//! Print a directory tree.
//!
//! ```text
//! cargo run -p sprig-fs --example fs_tree -- [DIR] [DEPTH]
//! ```
//!
//! Folders down to `DEPTH` (default 2) are expanded; the listing walks the
//! tree depth-first and only descends into expanded folders.

use anyhow::Context;
use sprig_fs::{FsEntry, FsTreeOptions, fs_tree};
use sprig_tree::TreeNode;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let dir = args.next().unwrap_or_else(|| String::from("."));
    let max_depth = match args.next() {
        Some(depth) => depth
            .parse::<usize>()
            .with_context(|| format!("invalid depth `{depth}`"))?,
        None => 2,
    };

    let root = fs_tree(&dir, FsTreeOptions::default())
        .with_context(|| format!("failed to open `{dir}`"))?;

    for node in root.breadth_first() {
        if node.depth() < max_depth && node.value().is_folder() {
            node.expand();
        }
        if node.depth() >= max_depth {
            break;
        }
    }

    print_visible(&root);
    Ok(())
}

fn print_visible(node: &TreeNode<FsEntry>) {
    let marker = match (node.value().is_folder(), node.is_self_expanded()) {
        (true, true) => "v ",
        (true, false) => "> ",
        (false, _) => "  ",
    };
    println!(
        "{:<12} {}{marker}{}",
        node.path().to_string(),
        "  ".repeat(node.depth()),
        node.value().name()
    );

    if node.is_self_expanded() {
        for child in node.children() {
            print_visible(&child);
        }
    }
}
