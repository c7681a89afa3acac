use crate::api::Invoice;
use crate::cache::Subscription;
use crate::forms::{MutationStatus, Submission};
use crate::invoices::{InvoiceKey, InvoiceQueries, Mutations};
use crate::ui::renderfns::{money, status_line, truncate};
use crate::ui::view::{ShortcutInfo, View, ViewAction};
use crate::ui::views::{HeaderFormView, LineFormView};
use crate::ui::{draw_error_panel, draw_placeholder, ensure_valid_selection, entry_state_label};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use tracing::info;

/// One invoice: header fields and its lines
pub struct InvoiceDetailView {
  id: i64,
  mutations: Mutations,
  invoice: Subscription<InvoiceQueries>,
  table_state: TableState,
  /// Line delete in flight, with the line number it targets
  deleting: Option<(i64, Submission<()>)>,
  delete_status: MutationStatus,
}

impl InvoiceDetailView {
  pub fn new(id: i64, mutations: Mutations) -> Self {
    let mut invoice = mutations.cache().subscribe(&InvoiceKey::invoice(id));
    invoice.read();

    Self {
      id,
      mutations,
      invoice,
      table_state: TableState::default(),
      deleting: None,
      delete_status: MutationStatus::Idle,
    }
  }

  fn data(&self) -> Option<&Invoice> {
    self.invoice.entry().value().and_then(|d| d.as_invoice())
  }

  fn selected_line(&self) -> Option<i64> {
    let idx = self.table_state.selected()?;
    self.data()?.items.get(idx).map(|l| l.line_number)
  }

  fn start_delete(&mut self) {
    if self.delete_status.is_pending() {
      return;
    }
    let Some(line_number) = self.selected_line() else {
      return;
    };

    info!(invoice = self.id, line_number, "deleting invoice line");
    let mutations = self.mutations.clone();
    let invoice_id = self.id;
    self.deleting = Some((
      line_number,
      Submission::spawn(async move { mutations.delete_line(invoice_id, line_number).await }),
    ));
    self.delete_status = MutationStatus::deleting();
  }

  fn render_detail(&mut self, frame: &mut Frame, area: Rect) {
    let title = format!("Invoice {}", self.id);
    let entry = self.invoice.entry();
    let label = entry_state_label(entry);

    // A missing or failed invoice gets the whole area
    let Some(invoice) = self.data().cloned() else {
      match self.invoice.entry().error() {
        Some(error) if error.is_not_found() => draw_error_panel(
          frame,
          area,
          &title,
          error,
          "This invoice does not exist. Press 'q' to go back.",
        ),
        Some(error) => draw_error_panel(frame, area, &title, error, "Press 'r' to retry."),
        None => draw_placeholder(frame, area, &title, "Loading invoice..."),
      }
      return;
    };

    let block = Block::default()
      .title(format!(" {}{} ", title, label))
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(4), // Header fields
        Constraint::Min(1),    // Lines
        Constraint::Length(1), // Status
      ])
      .split(inner);

    let dim = Style::default().fg(Color::DarkGray);
    let header = vec![
      Line::from(vec![
        Span::styled("Customer: ", dim),
        Span::raw(invoice.customer_name.clone()),
      ]),
      Line::from(vec![
        Span::styled("Address:  ", dim),
        Span::raw(invoice.customer_address.clone()),
      ]),
      Line::from(vec![
        Span::styled("Total:    ", dim),
        Span::styled(money(invoice.total()), Style::default().fg(Color::Yellow).bold()),
      ]),
    ];
    frame.render_widget(Paragraph::new(header), chunks[0]);

    self.render_lines(frame, chunks[1], &invoice);
    frame.render_widget(Paragraph::new(status_line(&self.delete_status)), chunks[2]);
  }

  fn render_lines(&mut self, frame: &mut Frame, area: Rect, invoice: &Invoice) {
    ensure_valid_selection(&mut self.table_state, invoice.items.len());

    let block = Block::default()
      .title(format!(" Lines ({}) ", invoice.items.len()))
      .borders(Borders::TOP)
      .border_style(Style::default().fg(Color::DarkGray));

    if invoice.items.is_empty() {
      let paragraph = Paragraph::new("No lines yet. Press 'n' to add one.")
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    }

    let deleting = self.deleting.as_ref().map(|(n, _)| *n);
    let header_style = Style::default().fg(Color::Yellow).bold();
    let header = Row::new(vec![
      Cell::from("#").style(header_style),
      Cell::from("Item").style(header_style),
      Cell::from("Description").style(header_style),
      Cell::from("Price").style(header_style),
      Cell::from("Qty").style(header_style),
      Cell::from("Total").style(header_style),
    ]);

    let rows: Vec<Row> = invoice
      .items
      .iter()
      .map(|line| {
        let style = if Some(line.line_number) == deleting {
          Style::default().fg(Color::DarkGray)
        } else {
          Style::default()
        };
        Row::new(vec![
          Cell::from(line.line_number.to_string()).style(Style::default().fg(Color::Cyan)),
          Cell::from(truncate(&line.item_number, 16)),
          Cell::from(truncate(line.description.as_deref().unwrap_or(""), 40)),
          Cell::from(money(line.unit_price)),
          Cell::from(line.quantity.to_string()),
          Cell::from(money(line.total())),
        ])
        .style(style)
      })
      .collect();

    let widths = [
      Constraint::Length(4),
      Constraint::Length(16),
      Constraint::Min(16),
      Constraint::Length(10),
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
        self.invoice.refetch();
        Some(ViewAction::None)
      }
      KeyCode::Char('q') | KeyCode::Esc => Some(ViewAction::Pop),
      _ => None,
    }
  }

  /// Actions that need a loaded invoice
  fn handle_edits(&mut self, key: KeyEvent) -> Option<ViewAction> {
    self.data()?;

    match key.code {
      KeyCode::Char('e') => Some(ViewAction::Push(Box::new(HeaderFormView::edit(
        self.id,
        self.mutations.clone(),
      )))),
      KeyCode::Char('n') => Some(ViewAction::Push(Box::new(LineFormView::create(
        self.id,
        self.mutations.clone(),
      )))),
      KeyCode::Enter => {
        let line_number = self.selected_line()?;
        Some(ViewAction::Push(Box::new(LineFormView::edit(
          self.id,
          line_number,
          self.mutations.clone(),
        ))))
      }
      KeyCode::Char('d') => {
        self.start_delete();
        Some(ViewAction::None)
      }
      _ => None,
    }
  }
}

impl View for InvoiceDetailView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    self
      .handle_navigation(key)
      .or_else(|| self.handle_edits(key))
      .or_else(|| self.handle_actions(key))
      .unwrap_or(ViewAction::None)
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    self.render_detail(frame, area);
  }

  fn breadcrumb_label(&self) -> String {
    format!("Invoice {}", self.id)
  }

  fn tick(&mut self) {
    self.invoice.poll();

    if let Some(result) = self.deleting.as_mut().and_then(|(_, s)| s.try_take()) {
      self.deleting = None;
      self.delete_status = match result {
        Ok(()) => MutationStatus::deleted(),
        Err(e) => MutationStatus::error(e.to_string()),
      };
    }
  }

  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    if self.data().is_none() {
      return vec![
        ShortcutInfo::new("r", "refresh").with_priority(10),
        ShortcutInfo::new("q", "back").with_priority(20),
      ];
    }
    vec![
      ShortcutInfo::new("e", "edit").with_priority(10),
      ShortcutInfo::new("n", "new line").with_priority(20),
      ShortcutInfo::new("enter", "edit line").with_priority(30),
      ShortcutInfo::new("d", "delete line").with_priority(40),
      ShortcutInfo::new("r", "refresh").with_priority(50),
      ShortcutInfo::new("q", "back").with_priority(60),
    ]
  }
}
