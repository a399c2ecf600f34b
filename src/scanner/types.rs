use std::path::PathBuf;

/// Raw file entry collected during scanning, before tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFileEntry {
    /// Full path to the file or directory
    pub path: PathBuf,
    /// File size in bytes (0 for directories)
    pub size: u64,
    /// Whether this entry is a directory
    pub is_dir: bool,
    /// Parent directory path (None for the scanned root)
    pub parent: Option<PathBuf>,
}
