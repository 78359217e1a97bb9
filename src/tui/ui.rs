use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::navigation::SearchPrompt as PromptState;
use crate::core::state::{ChainContext, Status};
use crate::tui::Screen;
use crate::tui::component::Component;
use crate::tui::components::{ContextBar, ControlsPanel, MainView, PROMPT_HEIGHT, SearchPrompt};

/// Everything the frame needs besides the screen itself.
pub struct Chrome<'a> {
    pub context: &'a ChainContext,
    pub status: Option<&'a Status>,
    pub prompt: Option<&'a PromptState>,
}

/// ```text
/// ┌ Chain ──────────────────┐┌ Controls ───────┐
/// │ URL / ID / status       ││ /  Search  ...  │
/// └─────────────────────────┘└─────────────────┘
/// ┌ Search ───────────────────────────────────┐   (only while open)
/// └───────────────────────────────────────────┘
/// ┌ <view title> ─────────────────────────────┐
/// │ main view                                 │
/// ```
pub fn draw_ui(frame: &mut Frame, chrome: &Chrome, screen: &mut Screen) {
    use Constraint::{Length, Min, Percentage};

    let columns = Layout::horizontal([Percentage(60), Percentage(40)]);
    let [context_column, _] = columns.areas(frame.area());
    let top_height = ControlsPanel::height(screen.controls())
        .max(ContextBar::height(chrome.status, context_column.width));
    let prompt_height = if chrome.prompt.is_some() { PROMPT_HEIGHT } else { 0 };
    let [top_area, prompt_area, main_area] =
        Layout::vertical([Length(top_height), Length(prompt_height), Min(0)])
            .areas(frame.area());
    let [context_area, controls_area] = columns.areas(top_area);

    ContextBar::new(chrome.context, chrome.status).render(frame, context_area);
    ControlsPanel::new(screen.controls()).render(frame, controls_area);

    if let Some(prompt) = chrome.prompt {
        SearchPrompt::new(&prompt.input).render(frame, prompt_area);
    }

    draw_main(frame, main_area, screen);
}

fn draw_main(frame: &mut Frame, area: Rect, screen: &mut Screen) {
    let (output, table_state) = screen.main_parts();
    MainView::new(output, table_state).render(frame, area);
}
