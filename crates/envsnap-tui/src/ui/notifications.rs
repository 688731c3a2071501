// Toast queue shown in the status bar.
// The store's status line is the persistent state; toasts announce changes.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::style::Color;

use crate::ui::theme;

/// How long an identical message is suppressed after being pushed
const DEDUP_WINDOW: Duration = Duration::from_secs(2);

/// Notification priority levels (higher = more important)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "ℹ",
            NotificationLevel::Success => "✓",
            NotificationLevel::Warning => "⚠",
            NotificationLevel::Error => "✗",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            NotificationLevel::Info => theme::ACCENT_PRIMARY,
            NotificationLevel::Success => theme::ACCENT_SUCCESS,
            NotificationLevel::Warning => theme::ACCENT_WARNING,
            NotificationLevel::Error => theme::ACCENT_ERROR,
        }
    }

    fn default_duration(&self) -> Duration {
        match self {
            NotificationLevel::Info | NotificationLevel::Success => Duration::from_secs(3),
            NotificationLevel::Warning => Duration::from_secs(4),
            NotificationLevel::Error => Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration: Duration,
    pub shown_at: Option<Instant>,
}

impl Notification {
    fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            duration: level.default_duration(),
            shown_at: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at
            .map(|shown| shown.elapsed() >= self.duration)
            .unwrap_or(false)
    }

    fn mark_shown(&mut self) {
        if self.shown_at.is_none() {
            self.shown_at = Some(Instant::now());
        }
    }
}

/// Queue of notifications with priority handling
#[derive(Debug, Default)]
pub struct NotificationQueue {
    queue: VecDeque<Notification>,
    current: Option<Notification>,
    recent: Vec<(String, Instant)>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notification now, or queue it behind the current one.
    /// A higher level replaces the current notification outright.
    pub fn push(&mut self, mut notification: Notification) {
        let now = Instant::now();
        self.recent.retain(|(_, expiry)| *expiry > now);
        if self.recent.iter().any(|(m, _)| *m == notification.message) {
            return;
        }
        self.recent
            .push((notification.message.clone(), now + DEDUP_WINDOW));

        match self.current.as_ref() {
            None => {
                notification.mark_shown();
                self.current = Some(notification);
            }
            Some(current) if notification.level > current.level => {
                notification.mark_shown();
                self.current = Some(notification);
            }
            Some(_) => {
                let pos = self
                    .queue
                    .iter()
                    .position(|n| n.level < notification.level)
                    .unwrap_or(self.queue.len());
                self.queue.insert(pos, notification);
            }
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
        self.advance();
    }

    /// Drop the current notification once it has expired
    pub fn tick(&mut self) {
        if self.current.as_ref().is_some_and(Notification::is_expired) {
            self.current = None;
            self.advance();
        }
    }

    fn advance(&mut self) {
        if self.current.is_none() {
            if let Some(mut next) = self.queue.pop_front() {
                next.mark_shown();
                self.current = Some(next);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.queue.is_empty()
    }
}
