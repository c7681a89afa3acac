/// What a component did with a key.
///
/// Views try their components in order and stop at the first one that
/// consumed the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult<T> {
  /// Consumed with nothing to report (cursor moved, character typed)
  Handled,
  /// Consumed, and the parent has to act on `T`
  Event(T),
  /// Not for this component
  NotHandled,
}

impl<T> KeyResult<T> {
  pub fn is_consumed(&self) -> bool {
    !matches!(self, KeyResult::NotHandled)
  }

  /// The reported event, if any
  pub fn event(self) -> Option<T> {
    match self {
      KeyResult::Event(event) => Some(event),
      KeyResult::Handled | KeyResult::NotHandled => None,
    }
  }
}
