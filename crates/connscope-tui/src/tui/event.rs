use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Terminal and timer events
#[derive(Clone, Debug)]
pub enum Event {
    /// UI tick (for notice expiry and redraws)
    Tick,
    /// Time to refresh the connections list
    Poll,
    /// Key press event
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Error reading terminal input
    Error(String),
}

/// Event handler merging terminal input with the UI tick and the list poll
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate and poll interval
    pub fn new(tick_rate: Duration, poll_interval: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        {
            let cancel = cancel.clone();

            tokio::spawn(async move {
                let mut reader = EventStream::new();
                let mut tick_interval = tokio::time::interval(tick_rate);
                // The first poll tick fires immediately; the initial fetch is
                // issued separately when the view opens.
                let mut poll_interval = tokio::time::interval_at(
                    tokio::time::Instant::now() + poll_interval,
                    poll_interval,
                );
                poll_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

                loop {
                    let crossterm_event = reader.next().fuse();

                    let event = tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = tick_interval.tick() => Event::Tick,
                        _ = poll_interval.tick() => Event::Poll,
                        maybe_event = crossterm_event => match maybe_event {
                            Some(Ok(CrosstermEvent::Key(key))) => {
                                // Filter out release events (important for Windows)
                                if key.kind != KeyEventKind::Press {
                                    continue;
                                }
                                Event::Key(key)
                            }
                            Some(Ok(CrosstermEvent::Resize(w, h))) => Event::Resize(w, h),
                            Some(Ok(_)) => continue,
                            Some(Err(e)) => Event::Error(e.to_string()),
                            None => break,
                        },
                    };

                    if sender.send(event).is_err() {
                        break;
                    }
                }
            });
        }

        Self { receiver, cancel }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }

    /// Shutdown the event handler
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}
