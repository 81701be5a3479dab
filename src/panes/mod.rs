mod help_pane;
mod plot_pane;

pub use help_pane::HelpPane;
pub use plot_pane::PlotPane;
