use ratatui::layout::Rect;

/// Horizontal padding for main content areas
pub const CONTENT_PADDING_H: u16 = 2;

pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 1;
pub const STATUSBAR_HEIGHT: u16 = 1;

pub const MODAL_DEFAULT_WIDTH: u16 = 70;
pub const MODAL_DEFAULT_HEIGHT_PERCENT: f32 = 0.7;

/// Width of the sound bar in the event list
pub const SOUND_BAR_WIDTH: usize = 10;
/// Width of the note stem in the event list
pub const STEM_WIDTH: usize = 10;

/// Apply horizontal content padding
pub fn with_content_padding(area: Rect) -> Rect {
    Rect::new(
        area.x + CONTENT_PADDING_H,
        area.y,
        area.width.saturating_sub(CONTENT_PADDING_H * 2),
        area.height,
    )
}
