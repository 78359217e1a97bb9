//! # MainView Component
//!
//! Paints whatever the current view published: a bordered box titled with
//! the view title, label/value fields at the top, then either a notice line
//! or the transaction table.
//!
//! ```text
//! ┌ Block 5 | 0xb10c… ─────────────────────┐
//! │ Time:        2023-11-14 22:14:20 UTC    │
//! │ Withdrawals: 0                          │
//! │ ┌ 2 Transactions ──────────────────────┐│
//! │ │ 0x7a…0000                            ││
//! │ │ 0x7a…0001                            ││
//! ```
//!
//! The table keeps a `TableState` owned by the `Screen`, so ratatui can keep
//! the highlighted row scrolled into view across frames.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Row, Table, TableState};
use unicode_width::UnicodeWidthStr;

use crate::core::view::ViewOutput;
use crate::tui::component::Component;

pub struct MainView<'a> {
    pub output: Option<&'a ViewOutput>,
    pub table_state: &'a mut TableState,
}

impl<'a> MainView<'a> {
    pub fn new(output: Option<&'a ViewOutput>, table_state: &'a mut TableState) -> Self {
        Self {
            output,
            table_state,
        }
    }
}

impl Component for MainView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(output) = self.output else {
            let empty = Paragraph::new("Nothing to show")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::bordered());
            frame.render_widget(empty, area);
            return;
        };

        let block = Block::bordered().title(format!(" {} ", output.title));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let field_rows = u16::try_from(output.fields.len()).unwrap_or(u16::MAX);
        let notice_rows = u16::from(output.notice.is_some());
        let [fields_area, notice_area, table_area] = Layout::vertical([
            Constraint::Length(field_rows),
            Constraint::Length(notice_rows),
            Constraint::Min(0),
        ])
        .areas(inner);

        frame.render_widget(Paragraph::new(field_lines(output)), fields_area);

        if let Some(notice) = &output.notice {
            let notice = Paragraph::new(notice.as_str())
                .style(Style::default().add_modifier(Modifier::ITALIC));
            frame.render_widget(notice, notice_area);
        }

        if let Some(table) = &output.table {
            let rows: Vec<Row> = table.rows.iter().map(|r| Row::new([r.as_str()])).collect();
            let widget = Table::new(rows, [Constraint::Percentage(100)])
                .block(Block::bordered().title(format!(" {} ", table.title)))
                .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
            self.table_state.select(Some(table.selected));
            frame.render_stateful_widget(widget, table_area, self.table_state);
        }
    }
}

/// `Label:` padded to a common width, then the value.
fn field_lines(output: &ViewOutput) -> Vec<Line<'_>> {
    let width = output
        .fields
        .iter()
        .map(|(label, _)| label.width())
        .max()
        .unwrap_or(0);
    let label_style = Style::default().add_modifier(Modifier::BOLD);
    output
        .fields
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label}:"), label_style),
                Span::raw(" ".repeat(width - label.width() + 1)),
                Span::raw(value.as_str()),
            ])
        })
        .collect()
}
