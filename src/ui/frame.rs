use std::collections::VecDeque;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use super::{Color, Style};
use crate::playback::PlaybackState;
use crate::state::AppState;

const CONSOLE_LINES: u16 = 3;
const CONSOLE_CAPACITY: usize = 100;

/// Outer chrome: border, header bar with playback status, and a message console
pub struct Frame {
    messages: VecDeque<String>,
}

impl Frame {
    pub fn new() -> Self {
        Self {
            messages: VecDeque::with_capacity(CONSOLE_CAPACITY),
        }
    }

    /// Push a message to the console ring buffer
    pub fn push_message(&mut self, msg: String) {
        if self.messages.len() >= CONSOLE_CAPACITY {
            self.messages.pop_front();
        }
        self.messages.push_back(msg);
    }

    #[cfg(test)]
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    /// Area left for the active pane inside the border and above the console
    pub fn content_area(area: Rect) -> Rect {
        Rect::new(
            area.x + 1,
            area.y + 1,
            area.width.saturating_sub(2),
            area.height.saturating_sub(CONSOLE_LINES + 3),
        )
    }

    pub fn render_buf(&self, area: Rect, buf: &mut Buffer, state: &AppState) {
        if area.width < 10 || area.height < CONSOLE_LINES + 6 {
            return;
        }

        let border_style = ratatui::style::Style::from(Style::new().fg(Color::GRAY));
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .render(area, buf);

        // Header line in the top border
        let (status, status_color) = match state.scheduler.state() {
            PlaybackState::Playing => ("PLAYING", Color::CYAN),
            PlaybackState::Paused => ("PAUSED", Color::PAUSED_COLOR),
            PlaybackState::Stopped => ("STOPPED", Color::GRAY),
        };
        let header = Line::from(vec![
            Span::styled(
                " TUIPLOT ",
                ratatui::style::Style::from(Style::new().fg(Color::CYAN).bold()),
            ),
            Span::styled(
                format!("[{}] ", status),
                ratatui::style::Style::from(Style::new().fg(status_color).bold()),
            ),
            Span::styled(
                format!(
                    "frame {}  {:.0} fps ",
                    state.scheduler.cursor(),
                    1.0 / state.scheduler.interval().as_secs_f64().max(1e-3)
                ),
                ratatui::style::Style::from(Style::new().fg(Color::GRAY)),
            ),
        ]);
        let header_width = header.width() as u16;
        Paragraph::new(header).render(
            Rect::new(area.x + 1, area.y, header_width.min(area.width.saturating_sub(2)), 1),
            buf,
        );

        // Console separator line
        let sep_y = area.y + area.height.saturating_sub(CONSOLE_LINES + 2);
        if let Some(cell) = buf.cell_mut((area.x, sep_y)) {
            cell.set_char('├').set_style(border_style);
        }
        for x in (area.x + 1)..(area.x + area.width.saturating_sub(1)) {
            if let Some(cell) = buf.cell_mut((x, sep_y)) {
                cell.set_char('─').set_style(border_style);
            }
        }
        if let Some(cell) = buf.cell_mut((area.x + area.width.saturating_sub(1), sep_y)) {
            cell.set_char('┤').set_style(border_style);
        }

        // Console messages, newest at the bottom
        let console_y = sep_y + 1;
        let skip = self.messages.len().saturating_sub(CONSOLE_LINES as usize);
        let max_width = area.width.saturating_sub(4) as usize;
        let prompt_style = ratatui::style::Style::from(Style::new().fg(Color::DARK_GRAY));
        let msg_style = ratatui::style::Style::from(Style::new().fg(Color::SKY_BLUE));

        for (i, msg) in self.messages.iter().skip(skip).enumerate() {
            let y = console_y + i as u16;
            let truncated: String = msg.chars().take(max_width).collect();
            let line = Line::from(vec![
                Span::styled("> ", prompt_style),
                Span::styled(truncated, msg_style),
            ]);
            Paragraph::new(line).render(Rect::new(area.x + 2, y, area.width.saturating_sub(4), 1), buf);
        }
    }
}
