use envsnap_core::FeedRuntime;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use tokio::time::Instant;

use crate::ui::components::{render_statusbar, Activity};
use crate::ui::layout::{self, FOOTER_HEIGHT, HEADER_HEIGHT, STATUSBAR_HEIGHT};
use crate::ui::theme;
use crate::ui::views::{render_detail_modal, render_event_list};
use crate::ui::App;

const TITLE: &str = "Environmental Snapshot Viewer";
const KEY_HINTS: &str = "↑/↓ select • Enter details • r reload • c check new • x cancel • o order • q quit";

pub fn render(f: &mut Frame, app: &App, feed: &FeedRuntime) {
    let area = f.area();
    f.render_widget(Block::default().style(app.palette.app()), area);

    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(FOOTER_HEIGHT),
        Constraint::Length(STATUSBAR_HEIGHT),
    ])
    .split(area);

    render_header(f, app, feed, chunks[0]);
    render_event_list(f, app, feed, layout::with_content_padding(chunks[1]));
    render_footer(f, app, chunks[2]);

    let activity = Activity {
        fetching: feed.is_fetching(),
        burst_elapsed_secs: feed.burst().elapsed(Instant::now()).map(|d| d.as_secs()),
        burst_total_secs: feed.burst().schedule().total.as_secs(),
        event_count: feed.store().display_list().len(),
    };
    render_statusbar(
        f,
        chunks[3],
        app.notifications.current(),
        &activity,
        app.frame_counter,
        &app.palette,
    );

    if app.show_detail {
        if let Some(event) = feed.store().selected() {
            render_detail_modal(f, event, &app.palette);
        }
    }
}

fn render_header(f: &mut Frame, app: &App, feed: &FeedRuntime, area: Rect) {
    let palette = &app.palette;
    let padded = layout::with_content_padding(area);

    let status = feed.store().status_message();
    let status_style = if status.starts_with("Fetch error") {
        Style::default().fg(theme::ACCENT_ERROR)
    } else if status.starts_with('✅') {
        Style::default().fg(theme::ACCENT_SUCCESS)
    } else {
        palette.muted()
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(TITLE, palette.title()),
            Span::styled(format!("  {}", app.source_label), palette.dim()),
        ]),
        Line::from(Span::styled(status.to_string(), status_style)),
    ];
    f.render_widget(Paragraph::new(lines), padded);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let padded = layout::with_content_padding(area);
    let line = if app.pending_quit {
        Line::from(Span::styled(
            "Press Ctrl+C again to quit",
            Style::default()
                .fg(theme::ACCENT_WARNING)
                .add_modifier(Modifier::BOLD),
        ))
    } else if app.show_detail {
        Line::from(Span::styled("Esc close details", app.palette.dim()))
    } else {
        Line::from(Span::styled(KEY_HINTS, app.palette.dim()))
    };
    f.render_widget(Paragraph::new(line), padded);
}
