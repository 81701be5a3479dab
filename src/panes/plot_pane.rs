use std::any::Any;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget};

use crate::state::{AppState, Param};
use crate::ui::widgets::{Button, Slider};
use crate::ui::{Action, Axes, Color, InputEvent, Keymap, ParamAction, PlaybackAction, Pane, Style};

pub const RESET_LABEL: &str = "Reset";

/// Grid guide lines per axis
const GRID_DIVISIONS: u32 = 5;

/// Animated curve on the left, slider column and reset button on the right
pub struct PlotPane {
    keymap: Keymap,
    /// Index into sliders, with `slider_count` meaning the reset button
    focus: usize,
}

impl PlotPane {
    pub fn new(keymap: Keymap) -> Self {
        Self { keymap, focus: 0 }
    }

    #[cfg(test)]
    pub fn focus(&self) -> usize {
        self.focus
    }

    fn widget_count(state: &AppState) -> usize {
        state.params.len() + 1
    }

    fn reset_focused(&self, state: &AppState) -> bool {
        self.focus == state.params.len()
    }

    fn nudge_focused(&self, state: &AppState, steps: i32) -> Action {
        match state.params.params().get(self.focus) {
            Some(param) => Action::Param(ParamAction::Nudge(param.name.clone(), steps)),
            None => Action::None,
        }
    }

    fn set_focused(&self, state: &AppState, pick: fn(&Param) -> f64) -> Action {
        match state.params.params().get(self.focus) {
            Some(param) => Action::Param(ParamAction::Set(param.name.clone(), pick(param))),
            None => Action::None,
        }
    }

    fn render_chart(&self, area: Rect, buf: &mut Buffer, state: &AppState) {
        let surface = state.surface();
        let axes = surface.axes();
        let points = surface.points();
        let guides = grid_lines(axes);

        let guide_style = ratatui::style::Style::from(Style::new().fg(Color::DARK_GRAY));
        let mut datasets: Vec<Dataset> = guides
            .iter()
            .map(|line| {
                Dataset::default()
                    .marker(Marker::Dot)
                    .graph_type(GraphType::Line)
                    .style(guide_style)
                    .data(line)
            })
            .collect();
        datasets.push(
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(ratatui::style::Style::from(Style::new().fg(Color::LINE_COLOR)))
                .data(&points),
        );

        let axis_style = ratatui::style::Style::from(Style::new().fg(Color::GRAY));
        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", surface.title()))
                    .title_style(ratatui::style::Style::from(Style::new().fg(Color::WHITE).bold()))
                    .border_style(axis_style),
            )
            .x_axis(
                Axis::default()
                    .title(axes.x_label.as_str())
                    .style(axis_style)
                    .bounds(axes.x_bounds)
                    .labels(axis_labels(axes.x_bounds)),
            )
            .y_axis(
                Axis::default()
                    .title(axes.y_label.as_str())
                    .style(axis_style)
                    .bounds(axes.y_bounds)
                    .labels(axis_labels(axes.y_bounds)),
            );
        chart.render(area, buf);
    }

    fn render_controls(&self, area: Rect, buf: &mut Buffer, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Controls ")
            .border_style(ratatui::style::Style::from(Style::new().fg(Color::GRAY)))
            .title_style(ratatui::style::Style::from(Style::new().fg(Color::SKY_BLUE)));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut y = inner.y;
        for (i, param) in state.params.params().iter().enumerate() {
            if y + Slider::HEIGHT > inner.bottom() {
                break;
            }
            Slider::new(param)
                .focused(i == self.focus)
                .render(Rect::new(inner.x, y, inner.width, Slider::HEIGHT), buf);
            y += Slider::HEIGHT + 1;
        }

        // Reset button pinned to the bottom of the column
        if inner.height >= Button::HEIGHT {
            let button_y = inner.bottom() - Button::HEIGHT;
            if button_y >= y {
                let width = inner.width.min(16);
                let x = inner.x + (inner.width - width) / 2;
                Button::new(RESET_LABEL)
                    .focused(self.reset_focused(state))
                    .render(Rect::new(x, button_y, width, Button::HEIGHT), buf);
            }
            if button_y > y {
                let hint = if state.scheduler.is_playing() { "[p] Pause" } else { "[p] Play" };
                Paragraph::new(Line::from(Span::styled(
                    hint,
                    ratatui::style::Style::from(Style::new().fg(Color::DARK_GRAY)),
                )))
                .render(Rect::new(inner.x + 1, button_y - 1, inner.width.saturating_sub(1), 1), buf);
            }
        }
    }
}

impl Default for PlotPane {
    fn default() -> Self {
        Self::new(Keymap::new())
    }
}

/// Tick labels at both ends and the middle of an axis
fn axis_labels(bounds: [f64; 2]) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]].iter().map(|v| format_tick(*v)).collect()
}

fn format_tick(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        format!("{:.1}", v)
    }
}

/// Interior horizontal and vertical guide lines as two-point segments
fn grid_lines(axes: &Axes) -> Vec<[(f64, f64); 2]> {
    if !axes.grid {
        return Vec::new();
    }
    let [x0, x1] = axes.x_bounds;
    let [y0, y1] = axes.y_bounds;
    let mut lines = Vec::new();
    for i in 1..GRID_DIVISIONS {
        let f = i as f64 / GRID_DIVISIONS as f64;
        let x = x0 + (x1 - x0) * f;
        let y = y0 + (y1 - y0) * f;
        lines.push([(x, y0), (x, y1)]);
        lines.push([(x0, y), (x1, y)]);
    }
    lines
}

impl Pane for PlotPane {
    fn id(&self) -> &'static str {
        "plot"
    }

    fn handle_input(&mut self, event: InputEvent, state: &AppState) -> Action {
        let count = Self::widget_count(state);
        match self.keymap.lookup(&event) {
            Some("quit") => Action::Quit,
            Some("focus_next") => {
                self.focus = (self.focus + 1) % count;
                Action::None
            }
            Some("focus_prev") => {
                self.focus = (self.focus + count - 1) % count;
                Action::None
            }
            Some("increase") => self.nudge_focused(state, 1),
            Some("decrease") => self.nudge_focused(state, -1),
            Some("increase_big") => self.nudge_focused(state, 10),
            Some("decrease_big") => self.nudge_focused(state, -10),
            Some("to_min") => self.set_focused(state, |p| p.min),
            Some("to_max") => self.set_focused(state, |p| p.max),
            Some("activate") if self.reset_focused(state) => Action::Param(ParamAction::ResetAll),
            Some("reset") => Action::Param(ParamAction::ResetAll),
            Some("pause") => Action::Playback(PlaybackAction::TogglePause),
            Some("restart") => Action::Playback(PlaybackAction::Restart),
            _ => Action::None,
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer, state: &AppState) {
        let [plot_area, controls_area] =
            Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)]).areas(area);
        self.render_chart(plot_area, buf, state);
        self.render_controls(controls_area, buf, state);
    }

    fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    fn on_enter(&mut self, state: &AppState) {
        self.focus = self.focus.min(Self::widget_count(state) - 1);
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::state::param::{AMPLITUDE, SPEED};
    use crate::ui::keybindings::load_keybindings_from;
    use crate::ui::{KeyCode, Modifiers};

    fn setup() -> (PlotPane, AppState) {
        let config = Config::load_from(None).unwrap();
        let state = AppState::from_config(&config).unwrap();
        let (_, keymaps) = load_keybindings_from(None);
        (PlotPane::new(keymaps["plot"].clone()), state)
    }

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::key(code)
    }

    fn screen(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "));
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_focus_cycles_through_sliders_and_button() {
        let (mut pane, state) = setup();
        assert_eq!(pane.focus(), 0);
        pane.handle_input(key(KeyCode::Down), &state);
        assert_eq!(pane.focus(), 1);
        pane.handle_input(key(KeyCode::Tab), &state);
        assert_eq!(pane.focus(), 2);
        pane.handle_input(key(KeyCode::Down), &state);
        assert_eq!(pane.focus(), 0);
        pane.handle_input(key(KeyCode::Up), &state);
        assert_eq!(pane.focus(), 2);
    }

    #[test]
    fn test_arrows_nudge_focused_slider() {
        let (mut pane, state) = setup();
        assert_eq!(
            pane.handle_input(key(KeyCode::Right), &state),
            Action::Param(ParamAction::Nudge(SPEED.into(), 1))
        );
        pane.handle_input(key(KeyCode::Down), &state);
        assert_eq!(
            pane.handle_input(InputEvent::new(KeyCode::Left, Modifiers::shift()), &state),
            Action::Param(ParamAction::Nudge(AMPLITUDE.into(), -10))
        );
        assert_eq!(
            pane.handle_input(key(KeyCode::PageUp), &state),
            Action::Param(ParamAction::Nudge(AMPLITUDE.into(), 10))
        );
    }

    #[test]
    fn test_home_end_jump_to_limits() {
        let (mut pane, state) = setup();
        assert_eq!(
            pane.handle_input(key(KeyCode::Home), &state),
            Action::Param(ParamAction::Set(SPEED.into(), 0.0))
        );
        pane.handle_input(key(KeyCode::Down), &state);
        assert_eq!(
            pane.handle_input(key(KeyCode::End), &state),
            Action::Param(ParamAction::Set(AMPLITUDE.into(), 5.0))
        );
        pane.handle_input(key(KeyCode::Down), &state);
        assert_eq!(pane.handle_input(key(KeyCode::End), &state), Action::None);
    }

    #[test]
    fn test_back_tab_moves_focus_back() {
        let (mut pane, state) = setup();
        pane.handle_input(key(KeyCode::BackTab), &state);
        assert_eq!(pane.focus(), 2);
        pane.handle_input(key(KeyCode::BackTab), &state);
        assert_eq!(pane.focus(), 1);
    }

    #[test]
    fn test_activate_only_presses_button() {
        let (mut pane, state) = setup();
        assert_eq!(pane.handle_input(key(KeyCode::Enter), &state), Action::None);
        pane.handle_input(key(KeyCode::Up), &state);
        assert_eq!(
            pane.handle_input(key(KeyCode::Enter), &state),
            Action::Param(ParamAction::ResetAll)
        );
        // Arrows on the button do nothing
        assert_eq!(pane.handle_input(key(KeyCode::Right), &state), Action::None);
    }

    #[test]
    fn test_global_pane_keys() {
        let (mut pane, state) = setup();
        assert_eq!(
            pane.handle_input(key(KeyCode::Char('r')), &state),
            Action::Param(ParamAction::ResetAll)
        );
        assert_eq!(
            pane.handle_input(key(KeyCode::Char('p')), &state),
            Action::Playback(PlaybackAction::TogglePause)
        );
        assert_eq!(
            pane.handle_input(key(KeyCode::Char('0')), &state),
            Action::Playback(PlaybackAction::Restart)
        );
        assert_eq!(pane.handle_input(key(KeyCode::Char('q')), &state), Action::Quit);
    }

    #[test]
    fn test_render_shows_title_sliders_and_button() {
        let (pane, mut state) = setup();
        state.on_tick(1.5).unwrap();
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        pane.render(area, &mut buf, &state);
        let text = screen(&buf);
        assert!(text.contains("Interactive graph at time=1.50"), "{}", text);
        assert!(text.contains("Speed"));
        assert!(text.contains("Amplitude"));
        assert!(text.contains("3.00"));
        assert!(text.contains("5.00"));
        assert!(text.contains(RESET_LABEL));
        assert!(text.contains("X Axis"));
    }

    #[test]
    fn test_render_tiny_area_does_not_panic() {
        let (pane, state) = setup();
        for (w, h) in [(0, 0), (1, 1), (5, 3), (12, 4)] {
            let area = Rect::new(0, 0, w, h);
            let mut buf = Buffer::empty(area);
            pane.render(area, &mut buf, &state);
        }
    }

    #[test]
    fn test_grid_lines() {
        let lines = grid_lines(&Axes::default());
        assert_eq!(lines.len(), 8);
        assert!(lines.contains(&[(2.0, 0.0), (2.0, 10.0)]));
        assert!(lines.contains(&[(0.0, 8.0), (10.0, 8.0)]));
        let none = Axes {
            grid: false,
            ..Axes::default()
        };
        assert!(grid_lines(&none).is_empty());
    }

    #[test]
    fn test_axis_labels() {
        assert_eq!(axis_labels([0.0, 10.0]), vec!["0", "5", "10"]);
        assert_eq!(axis_labels([0.0, 5.0]), vec!["0", "2.5", "5"]);
    }
}
