use std::any::Any;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::{InputEvent, Keymap};
use crate::state::AppState;

/// Navigation actions handled by the PaneManager
#[derive(Debug, Clone, PartialEq)]
pub enum NavAction {
    /// Return to the pane below the current one
    PopPane,
}

/// Slider and reset-button events
#[derive(Debug, Clone, PartialEq)]
pub enum ParamAction {
    /// Move a parameter by a number of slider steps
    Nudge(String, i32),
    /// Set a parameter directly (clamped into range)
    Set(String, f64),
    /// Restore every parameter to its default
    ResetAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackAction {
    TogglePause,
    Restart,
}

/// Actions returned from pane input handling
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Quit,
    Nav(NavAction),
    Param(ParamAction),
    Playback(PlaybackAction),
}

/// Trait for UI panes (screens/views)
pub trait Pane {
    /// Unique identifier, also the keymap section name in keybindings.json
    fn id(&self) -> &'static str;

    /// Handle an input event, returning an action
    fn handle_input(&mut self, event: InputEvent, state: &AppState) -> Action;

    /// Render the pane into `area`
    fn render(&self, area: Rect, buf: &mut Buffer, state: &AppState);

    /// Get the keymap for this pane (for the help pane)
    fn keymap(&self) -> &Keymap;

    /// Called when this pane becomes active
    fn on_enter(&mut self, _state: &AppState) {}

    /// Return self as Any for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Owns all panes and a stack of active pane indices
pub struct PaneManager {
    panes: Vec<Box<dyn Pane>>,
    stack: Vec<usize>,
}

impl PaneManager {
    /// Create a manager with `initial_pane` active
    pub fn new(initial_pane: Box<dyn Pane>) -> Self {
        Self {
            panes: vec![initial_pane],
            stack: vec![0],
        }
    }

    /// Add a pane (does not make it active)
    pub fn add_pane(&mut self, pane: Box<dyn Pane>) {
        self.panes.push(pane);
    }

    fn active_index(&self) -> usize {
        self.stack.last().copied().unwrap_or(0)
    }

    pub fn active(&self) -> &dyn Pane {
        self.panes[self.active_index()].as_ref()
    }

    pub fn active_mut(&mut self) -> &mut dyn Pane {
        let index = self.active_index();
        self.panes[index].as_mut()
    }

    /// Push a pane by ID on top of the current one
    pub fn push_to(&mut self, id: &str, state: &AppState) -> bool {
        match self.panes.iter().position(|p| p.id() == id) {
            Some(index) if index != self.active_index() => {
                self.stack.push(index);
                self.panes[index].on_enter(state);
                true
            }
            Some(_) => true,
            None => {
                log::warn!("No pane registered with id '{}'", id);
                false
            }
        }
    }

    /// Pop back to the previous pane. The bottom pane is never popped.
    pub fn pop(&mut self, state: &AppState) {
        if self.stack.len() > 1 {
            self.stack.pop();
            let index = self.active_index();
            self.panes[index].on_enter(state);
        }
    }

    /// Handle input for the active pane, applying navigation actions here
    pub fn handle_input(&mut self, event: InputEvent, state: &AppState) -> Action {
        let action = self.active_mut().handle_input(event, state);
        if action == Action::Nav(NavAction::PopPane) {
            self.pop(state);
        }
        action
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, state: &AppState) {
        self.active().render(area, buf, state);
    }

    /// Get a pane by ID, downcast to its concrete type
    pub fn get_pane_mut<T: 'static>(&mut self, id: &str) -> Option<&mut T> {
        self.panes
            .iter_mut()
            .find(|p| p.id() == id)
            .and_then(|p| p.as_any_mut().downcast_mut::<T>())
    }
}
