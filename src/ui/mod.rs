pub mod frame;
pub mod input;
pub mod keybindings;
pub mod keymap;
pub mod layout_helpers;
pub mod pane;
pub mod ratatui_impl;
pub mod style;
pub mod surface;
pub mod widgets;

pub use frame::Frame;
pub use input::{InputEvent, InputSource, KeyCode, Modifiers};
pub use keymap::Keymap;
pub use pane::{Action, NavAction, Pane, PaneManager, ParamAction, PlaybackAction};
pub use ratatui_impl::RatatuiBackend;
pub use style::{Color, Style};
pub use surface::{Axes, PlotSurface};
