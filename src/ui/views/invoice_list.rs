use crate::api::Invoice;
use crate::cache::Subscription;
use crate::forms::{MutationStatus, Submission};
use crate::invoices::{InvoiceKey, InvoiceQueries, Mutations};
use crate::ui::components::{FilterEvent, FilterInput, KeyResult};
use crate::ui::renderfns::{money, status_line, truncate};
use crate::ui::view::{ShortcutInfo, View, ViewAction};
use crate::ui::views::{HeaderFormView, InvoiceDetailView};
use crate::ui::{draw_error_panel, draw_placeholder, ensure_valid_selection, entry_state_label};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use tracing::info;

/// Home view: every invoice, one row each
pub struct InvoiceListView {
  mutations: Mutations,
  invoices: Subscription<InvoiceQueries>,
  table_state: TableState,
  filter: FilterInput,
  filter_text: String,
  /// Delete in flight, with the invoice id it targets
  deleting: Option<(i64, Submission<()>)>,
  delete_status: MutationStatus,
}

impl InvoiceListView {
  pub fn new(mutations: Mutations) -> Self {
    let mut invoices = mutations.cache().subscribe(&InvoiceKey::InvoiceList);
    invoices.read();

    Self {
      mutations,
      invoices,
      table_state: TableState::default(),
      filter: FilterInput::new(),
      filter_text: String::new(),
      deleting: None,
      delete_status: MutationStatus::Idle,
    }
  }

  /// Invoices matching the customer filter
  fn visible(&self) -> Vec<&Invoice> {
    let all = self
      .invoices
      .entry()
      .value()
      .and_then(|d| d.as_invoices())
      .unwrap_or_default();

    let needle = self.filter_text.to_lowercase();
    all
      .iter()
      .filter(|i| needle.is_empty() || i.customer_name.to_lowercase().contains(&needle))
      .collect()
  }

  fn selected_id(&self) -> Option<i64> {
    let idx = self.table_state.selected()?;
    self.visible().get(idx).map(|i| i.id)
  }

  fn start_delete(&mut self) {
    if self.delete_status.is_pending() {
      return;
    }
    let Some(id) = self.selected_id() else {
      return;
    };

    info!(id, "deleting invoice");
    let mutations = self.mutations.clone();
    self.deleting = Some((
      id,
      Submission::spawn(async move { mutations.delete_invoice(id).await }),
    ));
    self.delete_status = MutationStatus::deleting();
  }

  fn render_table(&mut self, frame: &mut Frame, area: Rect) {
    let entry = self.invoices.entry();
    let label = entry_state_label(entry);

    // Nothing to show but the failure
    if entry.value().is_none() {
      match entry.error() {
        Some(error) => draw_error_panel(frame, area, "Invoices", error, "Press 'r' to retry."),
        None => draw_placeholder(frame, area, "Invoices", "Loading invoices..."),
      }
      return;
    }

    let visible_len = self.visible().len();
    ensure_valid_selection(&mut self.table_state, visible_len);

    let filter_indicator = if self.filter_text.is_empty() {
      String::new()
    } else {
      format!(" [/{}]", self.filter_text)
    };
    let title = format!(" Invoices ({}){}{} ", visible_len, filter_indicator, label);

    let block = Block::default()
      .title(title)
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    if visible_len == 0 {
      let content = if self.filter_text.is_empty() {
        "No invoices yet. Press 'n' to create one."
      } else {
        "No invoices match the filter."
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    }

    let deleting_id = self.deleting.as_ref().map(|(id, _)| *id);
    let header_style = Style::default().fg(Color::Yellow).bold();
    let header = Row::new(vec![
      Cell::from("Id").style(header_style),
      Cell::from("Customer").style(header_style),
      Cell::from("Address").style(header_style),
      Cell::from("Lines").style(header_style),
      Cell::from("Total").style(header_style),
    ]);

    let rows: Vec<Row> = self
      .visible()
      .into_iter()
      .map(|invoice| {
        let style = if Some(invoice.id) == deleting_id {
          Style::default().fg(Color::DarkGray)
        } else {
          Style::default()
        };
        Row::new(vec![
          Cell::from(invoice.id.to_string()).style(Style::default().fg(Color::Cyan)),
          Cell::from(truncate(&invoice.customer_name, 30)),
          Cell::from(truncate(&invoice.customer_address, 40)),
          Cell::from(invoice.items.len().to_string()),
          Cell::from(money(invoice.total())),
        ])
        .style(style)
      })
      .collect();

    let widths = [
      Constraint::Length(8),
      Constraint::Min(16),
      Constraint::Min(20),
      Constraint::Length(6),
      Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
      .header(header)
      .block(block)
      .row_highlight_style(
        Style::default()
          .bg(Color::DarkGray)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("> ");

    frame.render_stateful_widget(table, area, &mut self.table_state);
  }

  // Key handling helpers for or_else chain pattern
  fn handle_overlays(&mut self, key: KeyEvent) -> Option<ViewAction> {
    match self.filter.handle_key(key) {
      KeyResult::Handled => Some(ViewAction::None),
      KeyResult::Event(FilterEvent::Changed(text)) => {
        self.filter_text = text;
        self.table_state.select(Some(0));
        Some(ViewAction::None)
      }
      KeyResult::Event(FilterEvent::Submitted) => Some(ViewAction::None),
      KeyResult::NotHandled => None,
    }
  }

  fn handle_navigation(&mut self, key: KeyEvent) -> Option<ViewAction> {
    match key.code {
      KeyCode::Char('j') | KeyCode::Down => {
        self.table_state.select_next();
        Some(ViewAction::None)
      }
      KeyCode::Char('k') | KeyCode::Up => {
        self.table_state.select_previous();
        Some(ViewAction::None)
      }
      _ => None,
    }
  }

  fn handle_actions(&mut self, key: KeyEvent) -> Option<ViewAction> {
    match key.code {
      KeyCode::Char('r') => {
        self.invoices.refetch();
        Some(ViewAction::None)
      }
      KeyCode::Char('n') => Some(ViewAction::Push(Box::new(HeaderFormView::create(
        self.mutations.clone(),
      )))),
      KeyCode::Char('d') => {
        self.start_delete();
        Some(ViewAction::None)
      }
      KeyCode::Enter => {
        let id = self.selected_id()?;
        Some(ViewAction::Push(Box::new(InvoiceDetailView::new(
          id,
          self.mutations.clone(),
        ))))
      }
      KeyCode::Esc if !self.filter_text.is_empty() => {
        self.filter_text.clear();
        Some(ViewAction::None)
      }
      KeyCode::Char('q') | KeyCode::Esc => Some(ViewAction::Pop),
      _ => None,
    }
  }
}

impl View for InvoiceListView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    self
      .handle_overlays(key)
      .or_else(|| self.handle_navigation(key))
      .or_else(|| self.handle_actions(key))
      .unwrap_or(ViewAction::None)
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Min(1), Constraint::Length(1)])
      .split(area);

    self.render_table(frame, chunks[0]);
    frame.render_widget(Paragraph::new(status_line(&self.delete_status)), chunks[1]);

    // Let filter component render its overlay
    self.filter.render_overlay(frame, area);
  }

  fn breadcrumb_label(&self) -> String {
    "Invoices".to_string()
  }

  fn tick(&mut self) {
    self.invoices.poll();

    if let Some(result) = self.deleting.as_mut().and_then(|(_, s)| s.try_take()) {
      self.deleting = None;
      self.delete_status = match result {
        Ok(()) => MutationStatus::deleted(),
        Err(e) => MutationStatus::error(e.to_string()),
      };
    }
  }

  fn captures_input(&self) -> bool {
    self.filter.is_active()
  }

  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new(":", "command").with_priority(10),
      ShortcutInfo::new("/", "filter").with_priority(20),
      ShortcutInfo::new("enter", "open").with_priority(30),
      ShortcutInfo::new("n", "new").with_priority(40),
      ShortcutInfo::new("d", "delete").with_priority(50),
      ShortcutInfo::new("r", "refresh").with_priority(60),
      ShortcutInfo::new("q", "quit").with_priority(70),
    ]
  }
}
