use crate::app::DisplayConfig;
use crate::tree::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Other,
}

/// Raw events a frontend forwards to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerUp {
        x: i32,
        y: i32,
        button: PointerButton,
    },
    KeyUp(Key),
    Resized {
        width: u32,
        height: u32,
    },
}

/// Input action produced from raw input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Select (or deselect) the leaf under the pointer
    Select { x: i32, y: i32 },
    /// Delete the leaf under the pointer
    Delete { x: i32, y: i32 },
    /// Grow or shrink the selected leaf
    ResizeSelected(Direction),
    /// Window resized
    Viewport { width: u32, height: u32 },
    /// No action
    None,
}

/// Map an event to an action. Pointer events over the text band are ignored.
pub fn process_event(event: InputEvent, config: &DisplayConfig) -> InputAction {
    match event {
        InputEvent::PointerUp { x, y, button } => {
            if !config.treemap_rect().contains(x, y) {
                return InputAction::None;
            }
            match button {
                PointerButton::Primary => InputAction::Select { x, y },
                PointerButton::Secondary => InputAction::Delete { x, y },
                PointerButton::Other => InputAction::None,
            }
        }
        InputEvent::KeyUp(Key::Up) => InputAction::ResizeSelected(Direction::Increase),
        InputEvent::KeyUp(Key::Down) => InputAction::ResizeSelected(Direction::Decrease),
        InputEvent::KeyUp(Key::Other) => InputAction::None,
        InputEvent::Resized { width, height } => InputAction::Viewport { width, height },
    }
}
