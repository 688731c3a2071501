use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use envsnap_core::FeedRuntime;
use tracing::debug;

use crate::ui::notifications::Notification;
use crate::ui::App;

/// Rows moved by PageUp/PageDown
const PAGE_STEP: isize = 10;

pub fn handle_key(app: &mut App, feed: &mut FeedRuntime, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        if app.pending_quit {
            app.quit();
        } else {
            app.pending_quit = true;
        }
        return;
    }
    // Any other key disarms a pending Ctrl+C
    app.pending_quit = false;

    if app.show_detail {
        handle_detail_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(feed, -1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(feed, 1),
        KeyCode::PageUp => app.move_selection(feed, -PAGE_STEP),
        KeyCode::PageDown => app.move_selection(feed, PAGE_STEP),
        KeyCode::Home | KeyCode::Char('g') => app.select_first_row(feed),
        KeyCode::End | KeyCode::Char('G') => app.select_last_row(feed),
        KeyCode::Enter => {
            if feed.store().selected().is_some() {
                app.show_detail = true;
            }
        }
        KeyCode::Char('r') => {
            if !feed.refresh("Manual refresh") {
                app.notify(Notification::warning("Fetch already in progress"));
            }
        }
        KeyCode::Char('c') if !feed.is_live_source() => {
            // Fixed data never grows, a single reload is all a check can do
            if feed.refresh("Reload demo data") {
                app.notify(Notification::info("Demo data reloaded"));
            } else {
                app.notify(Notification::warning("Fetch already in progress"));
            }
        }
        KeyCode::Char('c') => {
            let handle = feed.start_burst_check();
            debug!(?handle, "burst check requested");
            app.notify(Notification::info("Checking for a new event"));
        }
        KeyCode::Char('x') => {
            if !feed.stop_burst() {
                app.notify(Notification::info("No check running"));
            }
        }
        KeyCode::Char('o') => app.toggle_order(),
        KeyCode::Backspace => app.notifications.dismiss(),
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.show_detail = false,
        _ => {}
    }
}
