pub mod arena;
pub mod colour;
pub mod domain;
pub mod error;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use compact_str::CompactString;

pub use self::arena::{Direction, Node, NodeId, Tree, TreeBuilder};
pub use self::colour::ColourTag;
pub use self::domain::{Domain, FileSystem, Population};
pub use self::error::{InvariantViolation, TreeError};
use crate::scanner::types::RawFileEntry;

/// Display name for a path: its base name, or the whole path for roots like `/`.
fn base_name(path: &Path) -> CompactString {
    path.file_name()
        .map(|n| CompactString::new(n.to_string_lossy()))
        .unwrap_or_else(|| CompactString::new(path.to_string_lossy()))
}

/// Build a filesystem tree from scanner output.
///
/// `entries` must be in pre-order with the scanned root first, which is what
/// `scanner::scan` produces. Walking it backwards visits every child before
/// its parent, so the tree can be assembled bottom-up while each directory
/// keeps the listing order of its entries.
pub fn build_file_tree(entries: &[RawFileEntry]) -> anyhow::Result<Tree<FileSystem>> {
    let Some(first) = entries.first() else {
        return Ok(Tree::empty());
    };

    let dir_count = entries.iter().filter(|e| e.is_dir).count();
    tracing::info!(
        "Building tree from {} entries ({} dirs, {} files), root {}",
        entries.len(),
        dir_count,
        entries.len() - dir_count,
        first.path.display()
    );

    let mut builder = TreeBuilder::<FileSystem>::new();
    // parent path -> children seen so far, in reverse listing order
    let mut pending: HashMap<PathBuf, Vec<NodeId>> = HashMap::new();

    for entry in entries[1..].iter().rev() {
        let id = build_entry(&mut builder, &mut pending, entry)?;
        match &entry.parent {
            Some(parent) => pending.entry(parent.clone()).or_default().push(id),
            None => tracing::warn!("Entry without parent skipped: {}", entry.path.display()),
        }
    }
    let root = build_entry(&mut builder, &mut pending, first)?;

    for (orphan_parent, children) in &pending {
        tracing::warn!(
            "{} entries reference unknown directory {}",
            children.len(),
            orphan_parent.display()
        );
    }

    let tree = builder.finish(root)?;
    tracing::info!(
        "Tree built: {} nodes, {} direct children of root, total weight {}",
        tree.len(),
        tree.child_count(root),
        tree.total_weight(root)
    );
    Ok(tree)
}

fn build_entry(
    builder: &mut TreeBuilder<FileSystem>,
    pending: &mut HashMap<PathBuf, Vec<NodeId>>,
    entry: &RawFileEntry,
) -> anyhow::Result<NodeId> {
    let name = base_name(&entry.path);
    if !entry.is_dir {
        return Ok(builder.leaf(name, entry.size));
    }
    let mut children = pending.remove(&entry.path).unwrap_or_default();
    children.reverse();
    builder
        .internal(name, children)
        .with_context(|| format!("attaching children of {}", entry.path.display()))
}
