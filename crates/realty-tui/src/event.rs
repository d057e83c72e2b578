//! Terminal event reader — a background tokio task turning crossterm's
//! event stream plus two timers into one channel of [`Event`]s.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Everything the application loop reacts to.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed. Release and repeat events are filtered out.
    Key(KeyEvent),
    /// Mouse press, drag, release, or scroll. Drag-reorder depends on
    /// these arriving in order.
    Mouse(MouseEvent),
    /// Terminal resized to (cols, rows).
    Resize(u16, u16),
    /// Periodic tick for toast expiry and throbber animation.
    Tick,
    /// Redraw request.
    Render,
}

/// Reads terminal events on a background task and hands them out over an
/// unbounded channel. Dropping the reader stops the task.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    /// Spawn the reader. `tick_rate` drives [`Event::Tick`], `render_rate`
    /// drives [`Event::Render`].
    pub fn new(tick_rate: Duration, render_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let task_cancel = cancel.clone();
        tokio::spawn(async move {
            let mut stream = EventStream::new();
            let mut tick = tokio::time::interval(tick_rate);
            let mut render = tokio::time::interval(render_rate);

            // Skip, never burst, when the loop falls behind.
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            render.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                let event = tokio::select! {
                    () = task_cancel.cancelled() => break,

                    _ = tick.tick() => Event::Tick,

                    _ = render.tick() => Event::Render,

                    Some(Ok(terminal_event)) = stream.next() => {
                        match terminal_event {
                            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                                Event::Key(key)
                            }
                            CrosstermEvent::Mouse(mouse) => Event::Mouse(mouse),
                            CrosstermEvent::Resize(cols, rows) => Event::Resize(cols, rows),
                            _ => continue,
                        }
                    }
                };

                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx, cancel }
    }

    /// Next event, or `None` once the reader has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Ask the background task to stop.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
