// Public library interface for silvamap-rs
// The debug binaries and any frontend drive the same modules

pub mod app;
pub mod layout;
pub mod scanner;
pub mod tree;
pub mod ui;
