use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use envsnap_core::FeedRuntime;
use futures::StreamExt;
use tracing::{debug, info};

use crate::input::handle_key;
use crate::render::render;
use crate::ui::{App, Tui};

/// Redraw cadence for the spinner, burst clock and toast expiry
const UI_TICK_MS: u64 = 100;

pub async fn run_app(terminal: &mut Tui, app: &mut App, feed: &mut FeedRuntime) -> Result<()> {
    let mut event_stream = EventStream::new();
    let mut tick_interval = tokio::time::interval(Duration::from_millis(UI_TICK_MS));

    while app.running {
        terminal.draw(|f| render(f, app, feed))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        handle_key(app, feed, key);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    // Terminal input closed
                    None => app.quit(),
                }
            }

            change = feed.next_change() => {
                debug!(?change, "feed change");
                app.on_feed_change(&change, feed);
            }

            _ = tick_interval.tick() => {
                app.tick();
            }
        }
    }

    info!("viewer loop finished");
    Ok(())
}
