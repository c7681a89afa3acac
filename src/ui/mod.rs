pub mod components;
pub mod renderfns;
pub mod view;
pub mod views;

use crate::api::ApiError;
use crate::cache::CacheEntry;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, TableState, Wrap};

/// Keep a table selection inside `len` rows (or clear it when empty)
pub fn ensure_valid_selection(state: &mut TableState, len: usize) {
  match state.selected() {
    _ if len == 0 => state.select(None),
    None => state.select(Some(0)),
    Some(i) if i >= len => state.select(Some(len - 1)),
    Some(_) => {}
  }
}

/// Title suffix describing a cache entry: loading, refreshing, or failed
pub fn entry_state_label<K, V>(entry: &CacheEntry<K, V, ApiError>) -> &'static str {
  match (entry.is_loading(), entry.value.is_some(), entry.is_error()) {
    (true, false, _) => " (loading...)",
    (true, true, _) => " (refreshing...)",
    (_, _, true) => " (error)",
    _ => "",
  }
}

/// Full-area error panel used when a view has nothing else to show
pub fn draw_error_panel(frame: &mut Frame, area: Rect, title: &str, error: &ApiError, hint: &str) {
  let block = Block::default()
    .title(format!(" {} ", title))
    .title_alignment(Alignment::Center)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));

  let text = vec![
    Line::styled(error.to_string(), Style::default().fg(Color::Red)),
    Line::default(),
    Line::styled(hint.to_string(), Style::default().fg(Color::DarkGray)),
  ];

  frame.render_widget(
    Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
    area,
  );
}

/// Bordered placeholder with a dim message (loading, empty list)
pub fn draw_placeholder(frame: &mut Frame, area: Rect, title: &str, message: &str) {
  let block = Block::default()
    .title(format!(" {} ", title))
    .title_alignment(Alignment::Center)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Blue));

  frame.render_widget(
    Paragraph::new(message.to_string())
      .block(block)
      .style(Style::default().fg(Color::DarkGray)),
    area,
  );
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ensure_valid_selection() {
    let mut state = TableState::default();
    ensure_valid_selection(&mut state, 3);
    assert_eq!(state.selected(), Some(0));

    state.select(Some(5));
    ensure_valid_selection(&mut state, 3);
    assert_eq!(state.selected(), Some(2));

    ensure_valid_selection(&mut state, 0);
    assert_eq!(state.selected(), None);
  }
}
