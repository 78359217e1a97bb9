//! # ControlsPanel Component
//!
//! Top-right panel listing the active controls in mapping order, one per
//! line: `label  description`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::controls::ControlEntry;
use crate::tui::component::Component;

pub struct ControlsPanel<'a> {
    pub controls: &'a [ControlEntry],
}

impl<'a> ControlsPanel<'a> {
    pub fn new(controls: &'a [ControlEntry]) -> Self {
        Self { controls }
    }

    /// Rows needed to show every entry, borders included.
    pub fn height(controls: &[ControlEntry]) -> u16 {
        u16::try_from(controls.len()).unwrap_or(u16::MAX).saturating_add(2)
    }
}

impl Component for ControlsPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let label_width = self
            .controls
            .iter()
            .map(|c| c.label.width())
            .max()
            .unwrap_or(0);

        let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let lines: Vec<Line> = self
            .controls
            .iter()
            .map(|entry| {
                let pad = " ".repeat(label_width - entry.label.width() + 2);
                Line::from(vec![
                    Span::styled(entry.label.clone(), key_style),
                    Span::raw(pad),
                    Span::raw(entry.description.clone()),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines).block(
            Block::bordered()
                .title(" Controls ")
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(paragraph, area);
    }
}
