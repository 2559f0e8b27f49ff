use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::{sync::mpsc, task::JoinHandle};

use wrap_context::wohyna;

/// Terminal events.
#[derive(Clone, Copy, Debug)]
pub enum Event {
    Tick,
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Forwards terminal events from a background task.
#[derive(Debug)]
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
    handler: JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate);
        let (sender, receiver) = mpsc::unbounded_channel();

        let handler = tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick = tokio::time::interval(tick_rate);

            loop {
                let tick_delay = tick.tick();
                let crossterm_event = reader.next().fuse();

                let event = tokio::select! {
                    _ = sender.closed() => break,
                    _ = tick_delay => Event::Tick,
                    Some(Ok(event)) = crossterm_event => match event {
                        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
                        CrosstermEvent::Mouse(mouse) => Event::Mouse(mouse),
                        CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
                        _ => continue,
                    },
                };

                if sender.send(event).is_err() {
                    break;
                }
            }
        });

        Self { receiver, handler }
    }

    pub async fn next(&mut self) -> anyhow::Result<Event> {
        self.receiver
            .recv()
            .await
            .ok_or_else(|| wohyna!("Event stream closed"))
    }

    pub fn stop(&self) {
        self.handler.abort();
    }
}
