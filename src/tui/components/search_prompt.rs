//! # SearchPrompt Component
//!
//! One-line input box shown while the search prompt is open. Places the
//! terminal cursor after the typed text.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;

pub const PROMPT_HEIGHT: u16 = 3;

pub struct SearchPrompt<'a> {
    pub input: &'a str,
}

impl<'a> SearchPrompt<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input }
    }
}

impl Component for SearchPrompt<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(" Search (block number or hash) ")
            .border_style(Style::default().fg(Color::Cyan));
        let inner_width = area.width.saturating_sub(2);

        // Keep the tail of long input visible.
        let typed = u16::try_from(self.input.width()).unwrap_or(u16::MAX);
        let scroll = typed.saturating_sub(inner_width.saturating_sub(1));
        frame.render_widget(Paragraph::new(self.input).block(block).scroll((0, scroll)), area);

        let cursor_x = area.x + 1 + typed.saturating_sub(scroll).min(inner_width);
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::{Backend, TestBackend};
    use ratatui::layout::Position;

    #[test]
    fn test_renders_input_and_places_cursor() {
        let mut terminal = Terminal::new(TestBackend::new(40, PROMPT_HEIGHT)).unwrap();
        terminal
            .draw(|f| SearchPrompt::new("12345").render(f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("12345"));
        assert!(text.contains("Search"));
        assert_eq!(
            terminal.backend_mut().get_cursor_position().unwrap(),
            Position::new(6, 1)
        );
    }

    #[test]
    fn test_cursor_uses_display_width() {
        let mut terminal = Terminal::new(TestBackend::new(40, PROMPT_HEIGHT)).unwrap();
        terminal
            .draw(|f| SearchPrompt::new("日本").render(f, f.area()))
            .unwrap();
        assert_eq!(
            terminal.backend_mut().get_cursor_position().unwrap(),
            Position::new(5, 1)
        );
    }
}
