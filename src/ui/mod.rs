pub mod input;
pub mod selection;
pub mod tooltip;
