use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
  /// Terminal key press
  Key(KeyEvent),
  /// Terminal was resized; the next draw picks up the new size
  Resize,
  /// Views poll their subscriptions and submissions, the cache collects
  /// garbage
  Tick,
}

/// Turn a raw terminal event into an app event. Key releases and repeats
/// (reported on some platforms) are dropped so one press acts once.
fn translate(event: CrosstermEvent) -> Option<Event> {
  match event {
    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
    CrosstermEvent::Resize(..) => Some(Event::Resize),
    _ => None,
  }
}

/// Merges terminal input with a fixed-rate tick on one channel
pub struct EventHandler {
  rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
  /// Start reading the terminal. The reader task stops once the handler is
  /// dropped.
  pub fn new(tick_rate: Duration) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
      let mut input = EventStream::new();
      let mut ticks = tokio::time::interval(tick_rate);
      // A slow frame must not be followed by a burst of polls
      ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

      loop {
        let event = tokio::select! {
          _ = ticks.tick() => Event::Tick,
          read = input.next() => match read {
            Some(Ok(raw)) => match translate(raw) {
              Some(event) => event,
              None => continue,
            },
            // Terminal closed or unreadable
            Some(Err(_)) | None => break,
          },
        };

        if tx.send(event).is_err() {
          break;
        }
      }
    });

    Self { rx }
  }

  /// Receive the next event
  pub async fn next(&mut self) -> Option<Event> {
    self.rx.recv().await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

  fn key(kind: KeyEventKind) -> CrosstermEvent {
    CrosstermEvent::Key(KeyEvent {
      code: KeyCode::Char('d'),
      modifiers: KeyModifiers::NONE,
      kind,
      state: KeyEventState::NONE,
    })
  }

  #[test]
  fn test_only_key_presses_pass() {
    assert!(matches!(translate(key(KeyEventKind::Press)), Some(Event::Key(_))));
    assert_eq!(translate(key(KeyEventKind::Release)), None);
    assert_eq!(translate(key(KeyEventKind::Repeat)), None);
  }

  #[test]
  fn test_resize_and_other_events() {
    assert_eq!(translate(CrosstermEvent::Resize(80, 24)), Some(Event::Resize));
    assert_eq!(translate(CrosstermEvent::FocusGained), None);
  }
}
