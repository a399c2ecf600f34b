use crate::layout::{self, Layout, Rect};
use crate::tree::{ColourTag, Direction, Domain, NodeId, Tree, TreeError};
use crate::ui::input::{self, InputAction, InputEvent};
use crate::ui::selection::{self, Selection, SelectionChange};
use crate::ui::tooltip;

/// Screen geometry and interaction settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Full window width (px)
    pub width: u32,
    /// Full window height (px), treemap plus text band
    pub height: u32,
    /// Height of the status text band under the treemap (px)
    pub text_height: u32,
    /// How far one arrow press moves the selected leaf, in percent of its weight
    pub resize_step_percent: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            text_height: 30,
            resize_step_percent: 1,
        }
    }
}

impl DisplayConfig {
    /// The part of the window the treemap is drawn into.
    pub fn treemap_rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height.saturating_sub(self.text_height))
    }
}

/// Headless application state: one tree, its cached layout and the user's selection.
///
/// A frontend forwards events to `handle` and redraws from `draw_list` and
/// `status` whenever `handle` reports a change.
pub struct App<D: Domain> {
    tree: Tree<D>,
    pub config: DisplayConfig,
    layout: Option<Layout>,
    selection: Selection,
    status: String,
}

impl<D: Domain> App<D> {
    pub fn new(tree: Tree<D>, config: DisplayConfig) -> Self {
        Self {
            tree,
            config,
            layout: None,
            selection: Selection::new(),
            status: String::new(),
        }
    }

    pub fn tree(&self) -> &Tree<D> {
        &self.tree
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selection.current()
    }

    /// Current layout, recomputed if the tree or viewport changed since the last call.
    pub fn layout(&mut self) -> &Layout {
        let rect = self.config.treemap_rect();
        let tree = &self.tree;
        self.layout.get_or_insert_with(|| {
            let computed = layout::compute_layout(tree, tree.root(), rect);
            tracing::debug!("Relayout: {} rectangles", computed.len());
            computed
        })
    }

    pub fn draw_list(&mut self) -> Vec<(Rect, ColourTag)> {
        self.layout().draw_list()
    }

    /// Apply one input event. Returns true when the display needs redrawing.
    pub fn handle(&mut self, event: InputEvent) -> Result<bool, TreeError> {
        match input::process_event(event, &self.config) {
            InputAction::Select { x, y } => Ok(self.select_at(x, y)),
            InputAction::Delete { x, y } => self.delete_at(x, y),
            InputAction::ResizeSelected(direction) => self.resize_selected(direction),
            InputAction::Viewport { width, height } => {
                self.resize_viewport(width, height);
                Ok(true)
            }
            InputAction::None => Ok(false),
        }
    }

    pub fn resize_viewport(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        self.layout = None;
    }

    fn hit(&self, x: i32, y: i32) -> Option<NodeId> {
        layout::locate(&self.tree, self.tree.root(), self.config.treemap_rect(), x, y)
            .map(|hit| hit.node)
    }

    fn select_at(&mut self, x: i32, y: i32) -> bool {
        let Some(node) = self.hit(x, y) else {
            return false;
        };
        match self.selection.toggle(node) {
            SelectionChange::Selected(node) => {
                self.status = tooltip::status_line(&self.tree, node);
            }
            SelectionChange::Deselected => self.status.clear(),
        }
        true
    }

    fn delete_at(&mut self, x: i32, y: i32) -> Result<bool, TreeError> {
        let Some(node) = self.hit(x, y) else {
            return Ok(false);
        };
        let removed = self.tree.delete_leaf(node)?;
        tracing::info!("Deleted node {} ({} removed)", node, D::describe_weight(removed));
        self.selection.forget(node);
        self.status.clear();
        self.layout = None;
        Ok(true)
    }

    fn resize_selected(&mut self, direction: Direction) -> Result<bool, TreeError> {
        let Some(node) = self.selection.current() else {
            return Ok(false);
        };
        let step = selection::resize_step(
            self.tree.total_weight(node),
            self.config.resize_step_percent,
        );
        self.tree.adjust_weight(node, step, direction)?;
        self.status = tooltip::status_line(&self.tree, node);
        self.layout = None;
        Ok(true)
    }
}
