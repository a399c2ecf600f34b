use std::fmt::{Debug, Display};

use compact_str::CompactString;

use crate::ui::tooltip::format_size;

/// The small capability that distinguishes one flavour of tree from another.
///
/// Structure, layout and hit-testing never look at the flavour; only loaders
/// and path/weight formatting do.
pub trait Domain {
    /// Label carried by every non-empty node.
    type Name: Clone + Debug + Display;

    /// Token placed between names in a path label.
    const SEPARATOR: &'static str;

    /// Human-readable weight for status text.
    fn describe_weight(weight: u64) -> String {
        weight.to_string()
    }
}

/// Files and folders; weight is a byte count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileSystem;

impl Domain for FileSystem {
    type Name = CompactString;
    const SEPARATOR: &'static str = "/";

    fn describe_weight(weight: u64) -> String {
        format_size(weight)
    }
}

/// World → region → country; weight is a head count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Population;

impl Domain for Population {
    type Name = CompactString;
    const SEPARATOR: &'static str = "//";
}
