use crate::forms::MutationStatus;
use ratatui::prelude::*;

/// Truncate a string to a maximum number of characters, adding "..." if
/// truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Format an amount with two decimals
pub fn money(amount: f64) -> String {
  format!("{:.2}", amount)
}

/// Display color for a mutation status line
pub fn status_color(status: &MutationStatus) -> Color {
  match status {
    MutationStatus::Idle | MutationStatus::Pending { .. } => Color::DarkGray,
    MutationStatus::Success { .. } => Color::Green,
    MutationStatus::Error { .. } => Color::Red,
  }
}

/// Status message as a styled line, empty while idle
pub fn status_line(status: &MutationStatus) -> Line<'static> {
  match status.message() {
    Some(message) => Line::styled(message.to_string(), Style::default().fg(status_color(status))),
    None => Line::default(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
  }

  #[test]
  fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 8), "hello...");
  }

  #[test]
  fn test_truncate_multibyte() {
    assert_eq!(truncate("Crème brûlée Ltd", 8), "Crème...");
  }

  #[test]
  fn test_money() {
    assert_eq!(money(12.5), "12.50");
    assert_eq!(money(0.0), "0.00");
  }

  #[test]
  fn test_status_color() {
    assert_eq!(status_color(&MutationStatus::saving()), Color::DarkGray);
    assert_eq!(status_color(&MutationStatus::saved()), Color::Green);
    assert_eq!(status_color(&MutationStatus::error("nope")), Color::Red);
  }

  #[test]
  fn test_status_line_idle_is_empty() {
    assert_eq!(status_line(&MutationStatus::Idle).width(), 0);
    assert_eq!(status_line(&MutationStatus::deleted()).width(), "Deleted successfully".len());
  }
}
