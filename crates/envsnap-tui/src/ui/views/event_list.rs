use envsnap_core::{FeedRuntime, NormalizedEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::ui::format::{humidity_ring, note_stem, sound_bar};
use crate::ui::layout::{SOUND_BAR_WIDTH, STEM_WIDTH};
use crate::ui::theme::{temperature_color, Palette};
use crate::ui::App;

const ADD_NOTE_HINT: &str = "add note ↓";

pub fn render_event_list(f: &mut Frame, app: &App, feed: &FeedRuntime, area: Rect) {
    let palette = &app.palette;
    let events = feed.store().display_list();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(!app.show_detail))
        .style(Style::default().bg(palette.bg_panel))
        .title(Span::styled(column_header(), palette.muted()));

    if events.is_empty() {
        let message = if feed.store().has_loaded() {
            "No events to show."
        } else {
            "Waiting for the first load…"
        };
        f.render_widget(
            Paragraph::new(Span::styled(message, palette.dim())).block(block),
            area,
        );
        return;
    }

    let len = events.len();
    let items: Vec<ListItem> = (0..len)
        .map(|row| {
            let event = &events[app.order.to_store_index(row, len)];
            ListItem::new(event_row(event, palette))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(palette.selected_row())
        .highlight_symbol("▶ ");

    let mut state = ListState::default().with_selected(app.selected_row(feed));
    f.render_stateful_widget(list, area, &mut state);
}

fn column_header() -> String {
    format!(
        " {:>5}  T  {:^7}  {:<sw$}  {:<nw$} ",
        "id",
        "hum",
        "sound",
        "note",
        sw = SOUND_BAR_WIDTH,
        nw = STEM_WIDTH,
    )
}

/// One glyph row: id, temperature dot inside the humidity ring, sound bar,
/// note stem or the add-note hint, then the start of the note.
pub fn event_row(event: &NormalizedEvent, palette: &Palette) -> Line<'static> {
    let ring = humidity_ring(event.humidity_pct);
    // The ring is symmetric around the dot
    let (ring_left, ring_right) = ring.split_once('●').unwrap_or((ring.as_str(), ""));
    let dot_style = Style::default().fg(temperature_color(event.temp_c, palette));

    let mut spans = vec![
        Span::styled(format!("{:>5}  ", event.event_id), palette.title()),
        Span::styled(ring_left.to_string(), palette.ink()),
        Span::styled("●", dot_style),
        Span::styled(ring_right.to_string(), palette.ink()),
        Span::raw("  "),
        Span::styled(sound_bar(event.sound_loudness, SOUND_BAR_WIDTH), palette.muted()),
        Span::raw("  "),
    ];

    if event.needs_note() {
        spans.push(Span::styled(format!("{:<w$}", ADD_NOTE_HINT, w = STEM_WIDTH), palette.dim()));
    } else {
        spans.push(Span::styled(note_stem(event.note_word_count, STEM_WIDTH), palette.ink()));
        spans.push(Span::raw("  "));
        spans.push(Span::styled(event.note.clone(), palette.muted()));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use envsnap_core::models::MissingReadings;
    use envsnap_core::RawEventRecord;
    use serde_json::json;

    fn event(value: serde_json::Value) -> NormalizedEvent {
        NormalizedEvent::from_raw(&RawEventRecord::from_value(&value), MissingReadings::Zero)
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_row_with_note() {
        let e = event(json!({
            "event_id": 6, "temp_c": 17.2, "humidity_pct": 61.0,
            "sound_loudness": 47, "note": "Espresso machine bursts."
        }));
        let row = text(&event_row(&e, &Palette::dark()));
        assert!(row.starts_with("    6  "));
        assert!(row.contains("((●))"));
        assert!(row.contains("█████░░░░░"));
        assert!(row.ends_with("Espresso machine bursts."));
        assert!(!row.contains(ADD_NOTE_HINT));
    }

    #[test]
    fn test_row_without_note_shows_hint() {
        let e = event(json!({"event_id": 2, "temp_c": 20.1, "note": "  "}));
        let row = text(&event_row(&e, &Palette::light()));
        assert!(row.contains(ADD_NOTE_HINT));
    }
}
