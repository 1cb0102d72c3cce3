use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize,
}

/// Shared switch for the tick source. Ticks are only emitted while armed.
#[derive(Clone, Debug, Default)]
pub struct TickControl {
    armed: Arc<AtomicBool>,
}

impl TickControl {
    pub fn set_armed(&self, armed: bool) {
        self.armed.store(armed, Ordering::Relaxed);
    }

    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Relaxed)
    }
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    ticks: TickControl,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let ticks = TickControl::default();
        let thread_ticks = ticks.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    let sent = match event::read() {
                        Ok(Event::Key(key)) => tx.send(AppEvent::Key(key)),
                        Ok(Event::Resize(_, _)) => tx.send(AppEvent::Resize),
                        _ => Ok(()),
                    };
                    if sent.is_err() {
                        return;
                    }
                } else if thread_ticks.is_armed() && tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, ticks }
    }

    pub fn ticks(&self) -> &TickControl {
        &self.ticks
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
