use envsnap_core::constants::HIDDEN_NOTE_SENTINEL;
use envsnap_core::NormalizedEvent;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::ui::components::{modal_area, render_modal_background, render_modal_header, ModalSize};
use crate::ui::format::{format_created_at, format_reading};
use crate::ui::layout;
use crate::ui::theme::{temperature_color, Palette};

pub fn render_detail_modal(f: &mut Frame, event: &NormalizedEvent, palette: &Palette) {
    let area = modal_area(f.area(), &ModalSize::default());
    let inner = render_modal_background(f, area, palette);
    let title = format!("event_id: {}", event.event_id);
    let body = render_modal_header(f, inner, &title, "Esc close", palette);
    let body = layout::with_content_padding(body);

    f.render_widget(
        Paragraph::new(detail_lines(event, palette)).wrap(Wrap { trim: false }),
        body,
    );
}

/// Lines of the detail view, also used by tests.
pub fn detail_lines(event: &NormalizedEvent, palette: &Palette) -> Vec<Line<'static>> {
    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<16}", label), palette.muted()),
            Span::styled(value, Style::default().fg(palette.text_primary)),
        ])
    };

    let mut lines = vec![
        field("created_at", format_created_at(&event.created_at)),
        Line::from(vec![
            Span::styled(format!("{:<16}", "Temp (°C)"), palette.muted()),
            Span::styled(
                "● ",
                Style::default().fg(temperature_color(event.temp_c, palette)),
            ),
            Span::styled(format_reading(event.temp_c), Style::default().fg(palette.text_primary)),
        ]),
        field("Humidity (%)", format_reading(event.humidity_pct)),
        field("Sound loudness", format_reading(event.sound_loudness)),
        field("Note words", event.note_word_count.to_string()),
        Line::raw(""),
        Line::from(Span::styled("Note:", palette.title())),
    ];

    if event.needs_note() {
        lines.push(Line::from(Span::styled(
            "(empty, add one through the submission form)",
            palette.dim(),
        )));
    } else {
        lines.push(Line::from(Span::styled(event.note.clone(), palette.ink())));
    }

    lines.push(Line::raw(""));
    let photo = if event.photo_url.trim().is_empty() {
        "(none)".to_string()
    } else {
        event.photo_url.clone()
    };
    lines.push(field("Photo", photo));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        format!(
            "Set the note to \"{}\" in the sheet to hide this entry.",
            HIDDEN_NOTE_SENTINEL
        ),
        palette.dim(),
    )));
    lines
}
