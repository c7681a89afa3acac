use super::input::{InputResult, TextInput};
use super::KeyResult;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Events emitted by the field list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
  /// Ctrl-S anywhere, or Enter on the last field
  Submit,
}

#[derive(Debug, Clone)]
struct Field {
  label: &'static str,
  input: TextInput,
}

/// Vertical stack of labelled text inputs with one focused field
#[derive(Debug, Clone)]
pub struct FieldList {
  fields: Vec<Field>,
  focused: usize,
}

impl FieldList {
  pub fn new(labels: &[&'static str]) -> Self {
    Self {
      fields: labels
        .iter()
        .map(|&label| Field {
          label,
          input: TextInput::new(),
        })
        .collect(),
      focused: 0,
    }
  }

  pub fn value(&self, idx: usize) -> &str {
    self.fields.get(idx).map_or("", |f| f.input.value())
  }

  pub fn set_value(&mut self, idx: usize, value: impl Into<String>) {
    if let Some(field) = self.fields.get_mut(idx) {
      field.input = TextInput::with_value(value);
    }
  }

  pub fn focused(&self) -> usize {
    self.focused
  }

  fn focus_next(&mut self) {
    if !self.fields.is_empty() {
      self.focused = (self.focused + 1) % self.fields.len();
    }
  }

  fn focus_previous(&mut self) {
    if !self.fields.is_empty() {
      self.focused = self.focused.checked_sub(1).unwrap_or(self.fields.len() - 1);
    }
  }

  fn on_last_field(&self) -> bool {
    self.focused + 1 >= self.fields.len()
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<FieldEvent> {
    match key.code {
      KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        return KeyResult::Event(FieldEvent::Submit);
      }
      KeyCode::Tab | KeyCode::Down => {
        self.focus_next();
        return KeyResult::Handled;
      }
      KeyCode::BackTab | KeyCode::Up => {
        self.focus_previous();
        return KeyResult::Handled;
      }
      KeyCode::Enter => {
        if self.on_last_field() {
          return KeyResult::Event(FieldEvent::Submit);
        }
        self.focus_next();
        return KeyResult::Handled;
      }
      // Esc is the parent's "back"
      KeyCode::Esc => return KeyResult::NotHandled,
      _ => {}
    }

    let Some(field) = self.fields.get_mut(self.focused) else {
      return KeyResult::NotHandled;
    };
    match field.input.handle_key(key) {
      InputResult::Consumed => KeyResult::Handled,
      _ => KeyResult::NotHandled,
    }
  }

  /// Height needed to render all fields
  pub fn height(&self) -> u16 {
    self.fields.len() as u16 * 3
  }

  pub fn render(&self, frame: &mut Frame, area: Rect, editable: bool) {
    let rows = Layout::default()
      .direction(Direction::Vertical)
      .constraints(self.fields.iter().map(|_| Constraint::Length(3)))
      .split(area);

    for (idx, (field, row)) in self.fields.iter().zip(rows.iter()).enumerate() {
      let focused = editable && idx == self.focused;
      let border = if focused {
        Style::default().fg(Color::Yellow)
      } else {
        Style::default().fg(Color::DarkGray)
      };

      let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {} ", field.label));
      let inner = block.inner(*row);

      frame.render_widget(
        Paragraph::new(field.input.value()).block(block),
        *row,
      );

      if focused && inner.width > 0 && inner.height > 0 {
        let offset = (field.input.cursor_position() as u16).min(inner.width - 1);
        frame.set_cursor_position(Position::new(inner.x + offset, inner.y));
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn fields() -> FieldList {
    FieldList::new(&["Customer name", "Customer address"])
  }

  #[test]
  fn test_typing_goes_to_focused_field() {
    let mut list = fields();
    list.handle_key(key(KeyCode::Char('A')));
    list.handle_key(key(KeyCode::Tab));
    list.handle_key(key(KeyCode::Char('B')));

    assert_eq!(list.value(0), "A");
    assert_eq!(list.value(1), "B");
  }

  #[test]
  fn test_tab_and_backtab_wrap() {
    let mut list = fields();
    list.handle_key(key(KeyCode::BackTab));
    assert_eq!(list.focused(), 1);
    list.handle_key(key(KeyCode::Tab));
    assert_eq!(list.focused(), 0);
  }

  #[test]
  fn test_enter_advances_then_submits() {
    let mut list = fields();
    assert_eq!(list.handle_key(key(KeyCode::Enter)), KeyResult::Handled);
    assert_eq!(list.focused(), 1);
    assert_eq!(
      list.handle_key(key(KeyCode::Enter)),
      KeyResult::Event(FieldEvent::Submit)
    );
  }

  #[test]
  fn test_ctrl_s_submits_from_any_field() {
    let mut list = fields();
    assert_eq!(
      list.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
      KeyResult::Event(FieldEvent::Submit)
    );
  }

  #[test]
  fn test_set_value_and_escape() {
    let mut list = fields();
    list.set_value(1, "1 Main St");
    assert_eq!(list.value(1), "1 Main St");
    assert_eq!(list.value(5), "");
    assert_eq!(list.handle_key(key(KeyCode::Esc)), KeyResult::NotHandled);
  }
}
