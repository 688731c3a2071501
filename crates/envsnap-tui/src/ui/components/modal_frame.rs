use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::ui::layout;
use crate::ui::theme::Palette;

/// Configuration for modal sizing
pub struct ModalSize {
    /// Maximum width in columns (capped by terminal width - 4)
    pub max_width: u16,
    /// Height as a fraction of terminal height (0.0 - 1.0)
    pub height_percent: f32,
}

impl Default for ModalSize {
    fn default() -> Self {
        Self {
            max_width: layout::MODAL_DEFAULT_WIDTH,
            height_percent: layout::MODAL_DEFAULT_HEIGHT_PERCENT,
        }
    }
}

/// Calculate centered modal area
pub fn modal_area(terminal_area: Rect, size: &ModalSize) -> Rect {
    let popup_width = size.max_width.min(terminal_area.width.saturating_sub(4));
    let popup_height = (terminal_area.height as f32 * size.height_percent) as u16;
    let popup_x = terminal_area.x + (terminal_area.width.saturating_sub(popup_width)) / 2;
    let popup_y = terminal_area.y + (terminal_area.height.saturating_sub(popup_height)) / 2;
    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

/// Clear the area and draw the bordered modal background.
/// Returns the inner area.
pub fn render_modal_background(f: &mut Frame, area: Rect, palette: &Palette) -> Rect {
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(true))
        .style(Style::default().bg(palette.bg_modal));
    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}

/// Render modal header with title on the left and hint on the right.
/// Returns the remaining area below the header.
pub fn render_modal_header(
    f: &mut Frame,
    area: Rect,
    title: &str,
    hint: &str,
    palette: &Palette,
) -> Rect {
    // 1 line for content + 1 for spacing
    let chunks = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).split(area);
    let header_area = layout::with_content_padding(chunks[0]);

    let spacing = (header_area.width as usize).saturating_sub(title.width() + hint.width());
    let header_line = Line::from(vec![
        Span::styled(title.to_string(), palette.modal_title()),
        Span::raw(" ".repeat(spacing)),
        Span::styled(hint.to_string(), palette.modal_hint()),
    ]);
    f.render_widget(Paragraph::new(header_line), header_area);

    chunks[1]
}
