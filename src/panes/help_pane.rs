use std::any::Any;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::state::AppState;
use crate::ui::layout_helpers::center_rect;
use crate::ui::{Action, Color, InputEvent, Keymap, NavAction, Pane, Style};

/// Overlay listing the bindings of the pane it was opened from
pub struct HelpPane {
    keymap: Keymap,
    /// (key, description) rows
    rows: Vec<(String, String)>,
    title: String,
    scroll: usize,
}

impl HelpPane {
    pub fn new(keymap: Keymap) -> Self {
        Self {
            keymap,
            rows: Vec::new(),
            title: String::new(),
            scroll: 0,
        }
    }

    /// Show `keymap` under `pane_title`. Resets scrolling.
    pub fn set_context(&mut self, pane_title: &str, keymap: &Keymap) {
        self.title = pane_title.to_string();
        self.scroll = 0;
        self.rows = keymap
            .bindings()
            .iter()
            .map(|b| (b.pattern.display(), b.description.to_string()))
            .collect();
    }
}

impl Default for HelpPane {
    fn default() -> Self {
        Self::new(Keymap::new())
    }
}

impl Pane for HelpPane {
    fn id(&self) -> &'static str {
        "help"
    }

    fn handle_input(&mut self, event: InputEvent, _state: &AppState) -> Action {
        match self.keymap.lookup(&event) {
            Some("close") => Action::Nav(NavAction::PopPane),
            Some("up") => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            Some("down") => {
                self.scroll = (self.scroll + 1).min(self.rows.len().saturating_sub(1));
                Action::None
            }
            Some("top") => {
                self.scroll = 0;
                Action::None
            }
            Some("bottom") => {
                self.scroll = self.rows.len().saturating_sub(1);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer, _state: &AppState) {
        let rect = center_rect(area, 60, 20);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Help: {} ", self.title))
            .border_style(ratatui::style::Style::from(Style::new().fg(Color::SKY_BLUE)))
            .title_style(ratatui::style::Style::from(Style::new().fg(Color::SKY_BLUE)));
        let inner = block.inner(rect);
        block.render(rect, buf);
        if inner.height < 3 {
            return;
        }

        let visible = inner.height.saturating_sub(3) as usize;
        let scroll = self.scroll.min(self.rows.len().saturating_sub(visible));
        let key_style = ratatui::style::Style::from(Style::new().fg(Color::CYAN).bold());
        let desc_style = ratatui::style::Style::from(Style::new().fg(Color::WHITE));
        let max_desc = inner.width.saturating_sub(14) as usize;

        for (i, (key, desc)) in self.rows.iter().skip(scroll).take(visible).enumerate() {
            let desc: String = desc.chars().take(max_desc).collect();
            let line = Line::from(vec![
                Span::styled(format!("{:<12}", key), key_style),
                Span::styled(desc, desc_style),
            ]);
            let y = inner.y + 1 + i as u16;
            Paragraph::new(line).render(Rect::new(inner.x + 1, y, inner.width.saturating_sub(1), 1), buf);
        }

        let hint_style = ratatui::style::Style::from(Style::new().fg(Color::DARK_GRAY));
        let footer = if self.rows.len() > visible {
            format!(
                "[ESC/F1] Close  [Up/Down] Scroll  {}-{}/{}",
                scroll + 1,
                (scroll + visible).min(self.rows.len()),
                self.rows.len()
            )
        } else {
            "[ESC/F1] Close".to_string()
        };
        Paragraph::new(Line::from(Span::styled(footer, hint_style))).render(
            Rect::new(inner.x + 1, inner.bottom() - 1, inner.width.saturating_sub(1), 1),
            buf,
        );
    }

    fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
