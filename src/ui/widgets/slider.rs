use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::state::Param;
use crate::ui::{Color, Style};

const FILLED: char = '█';
const EMPTY: char = '·';
const KNOB: char = '▐';

/// Horizontal slider bound to one parameter. Two rows: label/value, then the track.
pub struct Slider<'a> {
    param: &'a Param,
    focused: bool,
}

impl<'a> Slider<'a> {
    pub const HEIGHT: u16 = 2;

    pub fn new(param: &'a Param) -> Self {
        Self {
            param,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

/// Knob column on a track `width` cells wide. Cells left of the knob are filled.
pub fn knob_position(fraction: f64, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    ((width - 1) as f64 * fraction.clamp(0.0, 1.0)).round() as u16
}

impl Widget for Slider<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < Self::HEIGHT {
            return;
        }

        let label_style = if self.focused {
            Style::new().fg(Color::WHITE).bg(Color::SELECTION_BG).bold()
        } else {
            Style::new().fg(Color::GRAY)
        };
        let value_text = format!("{:.2}", self.param.value());
        let pad = (area.width as usize)
            .saturating_sub(self.param.label.chars().count() + value_text.len() + 2);
        let marker = if self.focused { '>' } else { ' ' };
        let line = Line::from(vec![
            Span::styled(format!("{}{}", marker, self.param.label), label_style),
            Span::raw(" ".repeat(pad)),
            Span::styled(value_text, Style::new().fg(Color::CYAN)),
        ]);
        Paragraph::new(line).render(Rect::new(area.x, area.y, area.width, 1), buf);

        let track_x = area.x + 1;
        let track_width = area.width.saturating_sub(2);
        let knob = knob_position(self.param.fraction(), track_width);
        let fill_style = ratatui::style::Style::from(Style::new().fg(Color::SLIDER_FILL));
        let empty_style = ratatui::style::Style::from(Style::new().fg(Color::DARK_GRAY));
        let knob_color = if self.focused { Color::WHITE } else { Color::SKY_BLUE };
        let knob_style = ratatui::style::Style::from(Style::new().fg(knob_color));
        let y = area.y + 1;
        for i in 0..track_width {
            let (ch, style) = if i == knob {
                (KNOB, knob_style)
            } else if i < knob {
                (FILLED, fill_style)
            } else {
                (EMPTY, empty_style)
            };
            if let Some(cell) = buf.cell_mut((track_x + i, y)) {
                cell.set_char(ch).set_style(style);
            }
        }
    }
}
