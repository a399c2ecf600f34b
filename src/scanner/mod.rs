pub mod population;
pub mod types;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use jwalk::{Parallelism, WalkDir};

use self::types::RawFileEntry;
use crate::tree::{self, FileSystem, Tree};

/// Walk `root` and return every entry in pre-order, root first.
///
/// Each directory's entries come out in the order the OS lists them; that
/// order later decides where each item lands in the treemap. Hidden files are
/// included and symlinks are not followed. Entries that cannot be read are
/// logged and skipped.
pub fn scan(root: &Path) -> Result<Vec<RawFileEntry>> {
    std::fs::symlink_metadata(root)
        .with_context(|| format!("cannot read scan root {}", root.display()))?;

    let start = Instant::now();
    let walker = WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(false)
        .parallelism(Parallelism::Serial);

    let mut entries = Vec::new();
    let mut total_bytes: u64 = 0;
    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        let is_dir = entry.file_type().is_dir();
        let size = if is_dir {
            0
        } else {
            match entry.metadata() {
                Ok(meta) => meta.len(),
                Err(e) => {
                    tracing::warn!("No size for {}: {}", path.display(), e);
                    0
                }
            }
        };
        total_bytes += size;

        let parent = if entry.depth == 0 {
            None
        } else {
            path.parent().map(Path::to_path_buf)
        };
        entries.push(RawFileEntry {
            path,
            size,
            is_dir,
            parent,
        });
    }

    tracing::info!(
        "Scanned {} entries ({} bytes) under {} in {} ms",
        entries.len(),
        total_bytes,
        root.display(),
        start.elapsed().as_millis()
    );
    Ok(entries)
}

/// Scan `root` and assemble the filesystem tree in one go.
pub fn load_file_tree(root: &Path) -> Result<Tree<FileSystem>> {
    let entries = scan(root)?;
    tree::build_file_tree(&entries)
}
