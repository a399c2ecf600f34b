use crate::tree::{Domain, NodeId, Tree};

/// Format bytes into human-readable size string.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;
    const TB: u64 = 1024 * GB;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Text shown under the treemap for a selected leaf: `path (weight)`.
pub fn status_line<D: Domain>(tree: &Tree<D>, node: NodeId) -> String {
    format!(
        "{} ({})",
        tree.path_label(node),
        D::describe_weight(tree.total_weight(node))
    )
}
