use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the screen.
///
/// Components receive their data as struct fields ("props") and render into
/// the area they are given. `render` takes `&mut self` so stateful widgets
/// (the transaction table) can update their presentation state during the
/// render pass.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
