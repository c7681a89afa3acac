use crate::cache::Subscription;
use crate::forms::{HeaderForm, HeaderMode};
use crate::invoices::{InvoiceKey, InvoiceQueries, Mutations};
use crate::ui::components::{FieldEvent, FieldList};
use crate::ui::{draw_error_panel, draw_placeholder};
use crate::ui::renderfns::status_line;
use crate::ui::view::{ShortcutInfo, View, ViewAction};
use crate::ui::views::InvoiceDetailView;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

const NAME: usize = 0;
const ADDRESS: usize = 1;

/// Create or edit an invoice header
pub struct HeaderFormView {
  mutations: Mutations,
  form: HeaderForm,
  fields: FieldList,
  /// Edit only: the invoice the draft is seeded from
  source: Option<Subscription<InvoiceQueries>>,
  seeded: bool,
}

impl HeaderFormView {
  pub fn create(mutations: Mutations) -> Self {
    Self {
      mutations,
      form: HeaderForm::create(),
      fields: FieldList::new(&["Customer name", "Customer address"]),
      source: None,
      seeded: true,
    }
  }

  pub fn edit(id: i64, mutations: Mutations) -> Self {
    let mut source = mutations.cache().subscribe(&InvoiceKey::invoice(id));
    source.read();

    let mut view = Self {
      mutations,
      form: HeaderForm::edit(id),
      fields: FieldList::new(&["Customer name", "Customer address"]),
      source: Some(source),
      seeded: false,
    };
    view.try_seed();
    view
  }

  /// Copy the loaded invoice into the draft, once
  fn try_seed(&mut self) {
    if self.seeded {
      return;
    }
    let Some(invoice) = self
      .source
      .as_ref()
      .and_then(|s| s.entry().value())
      .and_then(|d| d.as_invoice())
    else {
      return;
    };

    self.form.seed(invoice);
    self.fields.set_value(NAME, self.form.draft.customer_name.clone());
    self.fields.set_value(ADDRESS, self.form.draft.customer_address.clone());
    self.seeded = true;
  }

  fn submit(&mut self) {
    self.form.draft.customer_name = self.fields.value(NAME).to_string();
    self.form.draft.customer_address = self.fields.value(ADDRESS).to_string();
    self.form.submit(&self.mutations);
  }

  fn title(&self) -> String {
    match self.form.mode() {
      HeaderMode::Create => "New invoice".to_string(),
      HeaderMode::Edit { id } => format!("Edit invoice {}", id),
    }
  }
}

impl View for HeaderFormView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    if key.code == KeyCode::Esc {
      return ViewAction::Pop;
    }
    if !self.seeded {
      return ViewAction::None;
    }

    if let (KeyCode::Enter, Some(id)) = (key.code, self.form.status().created_id()) {
      return ViewAction::Replace(Box::new(InvoiceDetailView::new(id, self.mutations.clone())));
    }

    if let Some(FieldEvent::Submit) = self.fields.handle_key(key).event() {
      self.submit();
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let title = self.title();

    if !self.seeded {
      let error = self.source.as_ref().and_then(|s| s.entry().error());
      match error {
        Some(error) => draw_error_panel(frame, area, &title, error, "Press Esc to go back."),
        None => draw_placeholder(frame, area, &title, "Loading invoice..."),
      }
      return;
    }

    let block = Block::default()
      .title(format!(" {} ", title))
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(self.fields.height()),
        Constraint::Length(1), // Status
        Constraint::Length(1), // Go to created invoice
        Constraint::Min(0),
      ])
      .split(inner);

    self.fields.render(frame, chunks[0], !self.form.status().is_pending());
    frame.render_widget(Paragraph::new(status_line(self.form.status())), chunks[1]);

    if let Some(id) = self.form.status().created_id() {
      let hint = Line::from(vec![
        Span::styled("<enter>", Style::default().fg(Color::Cyan)),
        Span::styled(format!(" Go to invoice {}", id), Style::default().fg(Color::DarkGray)),
      ]);
      frame.render_widget(Paragraph::new(hint), chunks[2]);
    }
  }

  fn breadcrumb_label(&self) -> String {
    self.title()
  }

  fn tick(&mut self) {
    if let Some(source) = self.source.as_mut() {
      source.poll();
    }
    self.try_seed();
    self.form.poll();
  }

  fn captures_input(&self) -> bool {
    true
  }

  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new("tab", "next field").with_priority(10),
      ShortcutInfo::new("ctrl-s", "save").with_priority(20),
      ShortcutInfo::new("esc", "back").with_priority(30),
    ]
  }
}
