use crate::api::InvoiceLine;
use crate::forms::{LineForm, LineMode};
use crate::invoices::Mutations;
use crate::query::Query;
use crate::ui::components::{FieldEvent, FieldList};
use crate::ui::renderfns::status_line;
use crate::ui::view::{ShortcutInfo, View, ViewAction};
use crate::ui::views::InvoiceDetailView;
use crate::ui::{draw_error_panel, draw_placeholder};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

const ITEM_NUMBER: usize = 0;
const DESCRIPTION: usize = 1;
const UNIT_PRICE: usize = 2;
const QUANTITY: usize = 3;

const LABELS: &[&str] = &["Item number", "Description", "Unit price", "Quantity"];

/// Create or edit one invoice line
pub struct LineFormView {
  mutations: Mutations,
  form: LineForm,
  fields: FieldList,
  /// Edit only: the line itself, fetched directly rather than through the
  /// invoice cache
  source: Option<Query<InvoiceLine>>,
  seeded: bool,
}

impl LineFormView {
  pub fn create(invoice_id: i64, mutations: Mutations) -> Self {
    let mut view = Self {
      mutations,
      form: LineForm::create(invoice_id),
      fields: FieldList::new(LABELS),
      source: None,
      seeded: true,
    };
    view.sync_fields();
    view
  }

  pub fn edit(invoice_id: i64, line_number: i64, mutations: Mutations) -> Self {
    let client = mutations.client().clone();
    let mut source = Query::new(move || {
      let client = client.clone();
      async move { client.get_line(invoice_id, line_number).await }
    });
    source.fetch();

    Self {
      mutations,
      form: LineForm::edit(invoice_id, line_number),
      fields: FieldList::new(LABELS),
      source: Some(source),
      seeded: false,
    }
  }

  /// Copy the draft into the inputs
  fn sync_fields(&mut self) {
    let draft = &self.form.draft;
    self.fields.set_value(ITEM_NUMBER, draft.item_number.clone());
    self.fields.set_value(DESCRIPTION, draft.description.clone());
    self.fields.set_value(UNIT_PRICE, draft.unit_price.clone());
    self.fields.set_value(QUANTITY, draft.quantity.clone());
  }

  fn try_seed(&mut self) {
    if self.seeded {
      return;
    }
    let Some(line) = self.source.as_ref().and_then(Query::data) else {
      return;
    };

    self.form.seed(line);
    self.seeded = true;
    self.sync_fields();
  }

  fn submit(&mut self) {
    let draft = &mut self.form.draft;
    draft.item_number = self.fields.value(ITEM_NUMBER).to_string();
    draft.description = self.fields.value(DESCRIPTION).to_string();
    draft.unit_price = self.fields.value(UNIT_PRICE).to_string();
    draft.quantity = self.fields.value(QUANTITY).to_string();
    self.form.submit(&self.mutations);
  }

  fn title(&self) -> String {
    match self.form.mode() {
      LineMode::Create { invoice_id } => format!("New line on invoice {}", invoice_id),
      LineMode::Edit {
        invoice_id,
        line_number,
      } => format!("Edit line {} of invoice {}", line_number, invoice_id),
    }
  }
}

impl View for LineFormView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    if key.code == KeyCode::Esc {
      return ViewAction::Pop;
    }
    if !self.seeded {
      if let (KeyCode::Char('r'), Some(source)) = (key.code, self.source.as_mut()) {
        if !source.is_loading() {
          source.refetch();
        }
      }
      return ViewAction::None;
    }

    // After a create, Enter goes to the invoice that now holds the line
    if key.code == KeyCode::Enter && self.form.status().created_id().is_some() {
      let invoice_id = self.form.mode().invoice_id();
      return ViewAction::Replace(Box::new(InvoiceDetailView::new(
        invoice_id,
        self.mutations.clone(),
      )));
    }

    if let Some(FieldEvent::Submit) = self.fields.handle_key(key).event() {
      self.submit();
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let title = self.title();

    if !self.seeded {
      match self.source.as_ref().and_then(Query::error) {
        Some(error) => draw_error_panel(
          frame,
          area,
          &title,
          error,
          "Press 'r' to retry or Esc to go back.",
        ),
        None => draw_placeholder(frame, area, &title, "Loading line..."),
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
        Constraint::Length(1), // Go to invoice
        Constraint::Min(0),
      ])
      .split(inner);

    self.fields.render(frame, chunks[0], !self.form.status().is_pending());
    frame.render_widget(Paragraph::new(status_line(self.form.status())), chunks[1]);

    if self.form.status().created_id().is_some() {
      let hint = Line::from(vec![
        Span::styled("<enter>", Style::default().fg(Color::Cyan)),
        Span::styled(
          format!(" Go to invoice {}", self.form.mode().invoice_id()),
          Style::default().fg(Color::DarkGray),
        ),
      ]);
      frame.render_widget(Paragraph::new(hint), chunks[2]);
    }
  }

  fn breadcrumb_label(&self) -> String {
    match self.form.mode() {
      LineMode::Create { .. } => "New line".to_string(),
      LineMode::Edit { line_number, .. } => format!("Line {}", line_number),
    }
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
