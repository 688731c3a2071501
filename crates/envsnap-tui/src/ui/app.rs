use envsnap_core::{BurstOutcome, FeedChange, FeedRuntime};

use crate::ui::notifications::{Notification, NotificationQueue};
use crate::ui::theme::{Palette, ThemeMode};

/// Order of the event list on screen. The store always keeps ascending ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    NewestFirst,
    OldestFirst,
}

impl ListOrder {
    /// Row on screen for a store index
    pub fn to_row(self, store_index: usize, len: usize) -> usize {
        match self {
            ListOrder::OldestFirst => store_index,
            ListOrder::NewestFirst => len.saturating_sub(1).saturating_sub(store_index),
        }
    }

    /// Store index for a row on screen. The mapping is its own inverse.
    pub fn to_store_index(self, row: usize, len: usize) -> usize {
        self.to_row(row, len)
    }
}

/// View state of the viewer. Feed data lives in [`FeedRuntime`].
pub struct App {
    pub running: bool,
    /// First Ctrl+C arms quit, the second one exits
    pub pending_quit: bool,
    pub show_detail: bool,
    pub order: ListOrder,
    pub palette: Palette,
    pub notifications: NotificationQueue,
    pub source_label: String,
    /// Frame counter for the activity spinner
    pub frame_counter: u64,
}

impl App {
    pub fn new(order: ListOrder, theme: ThemeMode, source_label: String) -> Self {
        Self {
            running: true,
            pending_quit: false,
            show_detail: false,
            order,
            palette: Palette::for_mode(theme),
            notifications: NotificationQueue::new(),
            source_label,
            frame_counter: 0,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self) {
        self.frame_counter = self.frame_counter.wrapping_add(1);
        if !self.notifications.is_empty() {
            self.notifications.tick();
        }
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    // ===== Selection =====

    /// Selected row on screen, or None when the list is empty
    pub fn selected_row(&self, feed: &FeedRuntime) -> Option<usize> {
        let store = feed.store();
        let len = store.display_list().len();
        (len > 0).then(|| self.order.to_row(store.selected_index(), len))
    }

    /// Move the selection by `delta` rows on screen, clamped to the list
    pub fn move_selection(&mut self, feed: &mut FeedRuntime, delta: isize) {
        let len = feed.store().display_list().len();
        let Some(row) = self.selected_row(feed) else {
            return;
        };
        let target = row.saturating_add_signed(delta).min(len - 1);
        feed.select(self.order.to_store_index(target, len));
    }

    pub fn select_first_row(&mut self, feed: &mut FeedRuntime) {
        let len = feed.store().display_list().len();
        if len > 0 {
            feed.select(self.order.to_store_index(0, len));
        }
    }

    pub fn select_last_row(&mut self, feed: &mut FeedRuntime) {
        let len = feed.store().display_list().len();
        if len > 0 {
            feed.select(self.order.to_store_index(len - 1, len));
        }
    }

    pub fn toggle_order(&mut self) {
        self.order = match self.order {
            ListOrder::NewestFirst => ListOrder::OldestFirst,
            ListOrder::OldestFirst => ListOrder::NewestFirst,
        };
    }

    // ===== Feed changes =====

    /// Announce a runtime change. The store's status line is already updated.
    pub fn on_feed_change(&mut self, change: &FeedChange, feed: &FeedRuntime) {
        match change {
            FeedChange::Loaded {
                new_arrival: Some(id),
                ..
            } => self.notify(Notification::success(format!("New entry detected: id={}", id))),
            FeedChange::Loaded { .. } => {}
            FeedChange::FetchFailed { reason } => {
                self.notify(Notification::error(format!("Fetch error: {}", reason)));
            }
            FeedChange::BurstTick {
                fetch_started: false,
                ..
            } => self.notify(Notification::warning("Previous fetch still running, poll skipped")),
            FeedChange::BurstTick { .. } => {}
            FeedChange::BurstFinished { outcome } => {
                let message = outcome.status_message(feed.burst().schedule());
                let notification = match outcome {
                    BurstOutcome::NewArrival { .. } => Notification::success(message),
                    BurstOutcome::TimedOut => Notification::warning(message),
                    BurstOutcome::Cancelled => Notification::info(message),
                };
                self.notify(notification);
            }
        }
    }
}
