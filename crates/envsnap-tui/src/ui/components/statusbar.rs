// Status bar at the very bottom of the app.
// Notification on the left, fetch/burst activity and event count on the right.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::ui::notifications::Notification;
use crate::ui::theme::{self, Palette};

/// What the right-hand column reports
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub fetching: bool,
    /// Elapsed seconds of a running burst
    pub burst_elapsed_secs: Option<u64>,
    pub burst_total_secs: u64,
    pub event_count: usize,
}

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn activity_label(activity: &Activity, frame: u64) -> String {
    let mut parts = Vec::new();
    if let Some(elapsed) = activity.burst_elapsed_secs {
        parts.push(format!(
            "check {}s/{}s",
            elapsed.min(activity.burst_total_secs),
            activity.burst_total_secs
        ));
    }
    if activity.fetching {
        let spinner = SPINNER[(frame / 4) as usize % SPINNER.len()];
        parts.push(format!("{} fetching", spinner));
    }
    parts.push(format!("{} events", activity.event_count));
    format!("{} ", parts.join(" • "))
}

pub fn render_statusbar(
    f: &mut Frame,
    area: Rect,
    current_notification: Option<&Notification>,
    activity: &Activity,
    frame: u64,
    palette: &Palette,
) {
    let label = activity_label(activity, frame);
    let label_width = (label.width() + 1) as u16;

    let chunks = Layout::horizontal([Constraint::Min(0), Constraint::Length(label_width)]).split(area);
    let notification_area = chunks[0];
    let activity_area = chunks[1];
    let bg = Style::default().bg(palette.bg_statusbar);

    let notification_paragraph = if let Some(notification) = current_notification {
        let icon = notification.level.icon();
        let color = notification.level.color();
        let available = (notification_area.width as usize).saturating_sub(icon.width() + 2);
        let message = truncate_with_ellipsis(&notification.message, available);
        Paragraph::new(Line::from(vec![
            Span::styled(format!(" {} ", icon), Style::default().fg(color)),
            Span::styled(message, Style::default().fg(color)),
        ]))
        .style(bg)
    } else {
        Paragraph::new("").style(bg)
    };
    f.render_widget(notification_paragraph, notification_area);

    let color = if activity.burst_elapsed_secs.is_some() || activity.fetching {
        theme::ACCENT_WARNING
    } else {
        palette.text_muted
    };
    let padding = (activity_area.width as usize).saturating_sub(label.width());
    let padded = format!("{}{}", " ".repeat(padding), label);
    f.render_widget(
        Paragraph::new(padded).style(bg.fg(color)),
        activity_area,
    );
}

/// Truncate a string to fit within max_width, adding "..." if needed.
/// Grapheme-aware so emoji and combining characters are never split.
pub fn truncate_with_ellipsis(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let (target_width, suffix) = if max_width <= 3 {
        (max_width, "")
    } else {
        (max_width - 3, "...")
    };

    let mut current_width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let grapheme_width = grapheme.width();
        if current_width + grapheme_width > target_width {
            break;
        }
        result.push_str(grapheme);
        current_width += grapheme_width;
    }
    result.push_str(suffix);
    result
}
