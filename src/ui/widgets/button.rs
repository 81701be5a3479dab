use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::ui::{Color, Style};

/// Boxed push button
pub struct Button<'a> {
    label: &'a str,
    focused: bool,
}

impl<'a> Button<'a> {
    pub const HEIGHT: u16 = 3;

    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < Self::HEIGHT || area.width < 3 {
            return;
        }
        let (border, text) = if self.focused {
            (
                Style::new().fg(Color::BUTTON_COLOR).bold(),
                Style::new().fg(Color::WHITE).bg(Color::SELECTION_BG).bold(),
            )
        } else {
            (Style::new().fg(Color::GRAY), Style::new().fg(Color::BUTTON_COLOR))
        };
        let rect = Rect::new(area.x, area.y, area.width, Self::HEIGHT);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(ratatui::style::Style::from(border));
        Paragraph::new(self.label)
            .style(ratatui::style::Style::from(text))
            .alignment(Alignment::Center)
            .block(block)
            .render(rect, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_centered_label() {
        let area = Rect::new(0, 0, 11, 3);
        let mut buf = Buffer::empty(area);
        Button::new("Reset").render(area, &mut buf);
        let middle: String = (0..11)
            .map(|x| buf.cell((x, 1)).map(|c| c.symbol().to_string()).unwrap_or_default())
            .collect();
        assert_eq!(middle, "│  Reset  │");
    }
}
