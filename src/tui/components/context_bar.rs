//! # ContextBar Component
//!
//! Top-left panel: which chain we are connected to, plus the transient status
//! line. Info status renders yellow, errors red. Long statuses wrap, and
//! `height` grows the panel to fit them (up to `MAX_STATUS_ROWS`).
//!
//! Stateless. All three props come from the `NavigationController`:
//!
//! ```rust,ignore
//! let mut bar = ContextBar::new(nav.context(), nav.status());
//! bar.render(frame, area);
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::state::{ChainContext, Status};
use crate::tui::component::Component;

pub struct ContextBar<'a> {
    pub context: &'a ChainContext,
    pub status: Option<&'a Status>,
}

/// Rows a status may take before the rest is cut off.
const MAX_STATUS_ROWS: usize = 4;

impl<'a> ContextBar<'a> {
    pub fn new(context: &'a ChainContext, status: Option<&'a Status>) -> Self {
        Self { context, status }
    }

    /// Panel height for an area `width` columns wide: border, URL, ID and
    /// the wrapped status. One status row is always reserved.
    pub fn height(status: Option<&Status>, width: u16) -> u16 {
        let inner = usize::from(width.saturating_sub(2));
        let rows = status
            .map(|s| wrapped_rows(s.text(), inner))
            .unwrap_or(1)
            .clamp(1, MAX_STATUS_ROWS);
        // rows <= MAX_STATUS_ROWS
        4 + rows as u16
    }
}

/// Greedy word wrap estimate; words wider than a row are split.
fn wrapped_rows(text: &str, width: usize) -> usize {
    if width == 0 {
        return 1;
    }
    let mut rows = 1;
    let mut used = 0;
    for word in text.split_whitespace() {
        let w = word.width();
        if used > 0 && used + 1 + w <= width {
            used += 1 + w;
            continue;
        }
        if used > 0 {
            rows += 1;
        }
        used = w;
        while used > width {
            rows += 1;
            used -= width;
        }
    }
    rows
}

impl Component for ContextBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = self
            .context
            .lines()
            .into_iter()
            .map(Line::raw)
            .collect();

        if let Some(status) = self.status {
            let color = if status.is_error() {
                Color::Red
            } else {
                Color::Yellow
            };
            lines.push(Line::styled(status.text().to_string(), Style::default().fg(color)));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::bordered().title(" Chain "))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
