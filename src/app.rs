use crate::api::InvoiceClient;
use crate::cache::CacheOptions;
use crate::commands::{self, CommandAction};
use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::invoices::{InvoiceCache, InvoiceQueries, Mutations};
use crate::ui::components::{CommandEvent, CommandInput, KeyResult};
use crate::ui::renderfns::{draw_footer, draw_header};
use crate::ui::view::{View, ViewAction};
use crate::ui::views::{HeaderFormView, InvoiceDetailView, InvoiceListView};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Main application state
pub struct App {
  /// Navigation stack - root is always at index 0
  view_stack: Vec<Box<dyn View>>,

  /// Command overlay (after pressing :)
  command: CommandInput,

  /// Last command error, shown in the footer until the next key
  message: Option<String>,

  /// Header title
  title: String,

  /// API host shown next to the title
  host: String,

  /// Shared cache and write side; views get clones
  mutations: Mutations,

  /// Whether to quit
  should_quit: bool,
}

impl App {
  pub fn new(config: Config) -> Result<Self> {
    let client = InvoiceClient::new(&config.api)?;
    let host = client.host();
    let cache = InvoiceCache::new(
      InvoiceQueries::new(client.clone()),
      CacheOptions {
        stale_time: config.cache.stale_time(),
        gc_time: config.cache.gc_time(),
      },
    );
    let mutations = Mutations::new(client, cache);

    info!(
      host = %host,
      stale_secs = config.cache.stale_secs,
      gc_secs = config.cache.gc_secs,
      "starting invoicer"
    );

    Ok(Self {
      view_stack: vec![Box::new(InvoiceListView::new(mutations.clone()))],
      command: CommandInput::new(),
      message: None,
      title: config.title.unwrap_or_else(|| "invoicer".to_string()),
      host,
      mutations,
      should_quit: false,
    })
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut events = EventHandler::new(Duration::from_millis(100));

    // The terminal is restored even when drawing fails
    let result = self.main_loop(&mut terminal, &mut events).await;

    // Cleanup terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
  }

  async fn main_loop<B: Backend>(
    &mut self,
    terminal: &mut Terminal<B>,
    events: &mut EventHandler,
  ) -> Result<()> {
    while !self.should_quit {
      terminal.draw(|frame| self.draw(frame))?;

      if let Some(event) = events.next().await {
        self.handle_event(event);
      }
    }
    Ok(())
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      // Redrawn on the next loop iteration
      Event::Resize => {}
      Event::Tick => self.tick(),
    }
  }

  /// Poll every view (covered ones too, so their subscriptions stay current),
  /// then drop cache entries nobody came back for
  fn tick(&mut self) {
    for view in self.view_stack.iter_mut() {
      view.tick();
    }

    let evicted = self.mutations.cache().collect_garbage();
    if evicted > 0 {
      debug!(evicted, "collected unobserved cache entries");
    }
  }

  fn handle_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    // Views typing text keep ':' for themselves
    let captures = self.current_view().is_some_and(|v| v.captures_input());
    if self.command.is_active() || !captures {
      match self.command.handle_key(key) {
        KeyResult::Event(CommandEvent::Submitted(line)) => {
          self.execute_command(&line);
          return;
        }
        result if result.is_consumed() => {
          self.message = None;
          return;
        }
        _ => {}
      }
    }

    self.message = None;
    if let Some(view) = self.view_stack.last_mut() {
      let action = view.handle_key(key);
      self.apply(action);
    }
  }

  fn execute_command(&mut self, line: &str) {
    match commands::parse(line) {
      Ok(CommandAction::Invoices) => {
        self.view_stack.clear();
        self
          .view_stack
          .push(Box::new(InvoiceListView::new(self.mutations.clone())));
      }
      Ok(CommandAction::NewInvoice) => {
        self
          .view_stack
          .push(Box::new(HeaderFormView::create(self.mutations.clone())));
      }
      Ok(CommandAction::Open(id)) => {
        self
          .view_stack
          .push(Box::new(InvoiceDetailView::new(id, self.mutations.clone())));
      }
      Ok(CommandAction::Quit) => self.should_quit = true,
      Err(message) => {
        warn!(line, %message, "command rejected");
        self.message = Some(message);
      }
    }
  }

  fn apply(&mut self, action: ViewAction) {
    match action {
      ViewAction::None => {}
      ViewAction::Push(view) => self.view_stack.push(view),
      ViewAction::Pop => {
        if self.view_stack.len() > 1 {
          self.view_stack.pop();
        } else {
          self.should_quit = true;
        }
      }
      ViewAction::Replace(view) => {
        self.view_stack.pop();
        self.view_stack.push(view);
      }
      ViewAction::Quit => self.should_quit = true,
    }
  }

  fn current_view(&self) -> Option<&dyn View> {
    self.view_stack.last().map(|v| v.as_ref())
  }

  fn breadcrumb(&self) -> Vec<String> {
    self
      .view_stack
      .iter()
      .map(|v| v.breadcrumb_label())
      .collect()
  }

  fn draw(&mut self, frame: &mut Frame) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(1), // Header
        Constraint::Min(1),    // Main content
        Constraint::Length(1), // Footer
      ])
      .split(frame.area());

    let shortcuts = self
      .current_view()
      .map(|v| v.shortcuts())
      .unwrap_or_default();
    draw_header(frame, chunks[0], &self.title, &self.host, &shortcuts);

    if let Some(view) = self.view_stack.last_mut() {
      view.render(frame, chunks[1]);
    }

    let breadcrumb = self.breadcrumb();
    draw_footer(frame, chunks[2], &breadcrumb, self.message.as_deref());

    self.command.render_overlay(frame, chunks[1]);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Stub(&'static str);

  impl View for Stub {
    fn handle_key(&mut self, _key: KeyEvent) -> ViewAction {
      ViewAction::None
    }

    fn render(&mut self, _frame: &mut Frame, _area: Rect) {}

    fn breadcrumb_label(&self) -> String {
      self.0.to_string()
    }
  }

  fn app() -> App {
    let mut config = Config::default();
    // Nothing listens here; the list view's first fetch just fails
    config.api.url = "http://127.0.0.1:9/".to_string();
    App::new(config).unwrap()
  }

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  #[tokio::test]
  async fn test_title_defaults_to_app_name() {
    assert_eq!(app().title, "invoicer");

    let mut config = Config::default();
    config.api.url = "http://127.0.0.1:9/".to_string();
    config.title = Some("Rubber Tree".to_string());
    assert_eq!(App::new(config).unwrap().title, "Rubber Tree");
  }

  #[tokio::test]
  async fn test_pop_at_root_quits() {
    let mut app = app();
    app.apply(ViewAction::Push(Box::new(Stub("a"))));
    app.apply(ViewAction::Pop);
    assert!(!app.should_quit);
    assert_eq!(app.breadcrumb(), vec!["Invoices"]);

    app.apply(ViewAction::Pop);
    assert!(app.should_quit);
  }

  #[tokio::test]
  async fn test_replace_swaps_top_view() {
    let mut app = app();
    app.apply(ViewAction::Push(Box::new(Stub("form"))));
    app.apply(ViewAction::Replace(Box::new(Stub("detail"))));
    assert_eq!(app.breadcrumb(), vec!["Invoices", "detail"]);
  }

  #[tokio::test]
  async fn test_commands_drive_the_stack() {
    let mut app = app();
    app.execute_command("open 7");
    app.execute_command("new");
    assert_eq!(app.breadcrumb(), vec!["Invoices", "Invoice 7", "New invoice"]);

    app.execute_command("invoices");
    assert_eq!(app.breadcrumb(), vec!["Invoices"]);

    app.execute_command("open x");
    assert_eq!(app.message.as_deref(), Some("Not an invoice id: x"));

    app.execute_command("quit");
    assert!(app.should_quit);
  }

  #[tokio::test]
  async fn test_command_overlay_typed_through_keys() {
    let mut app = app();
    for code in [
      KeyCode::Char(':'),
      KeyCode::Char('o'),
      KeyCode::Char('p'),
      KeyCode::Char(' '),
      KeyCode::Char('3'),
      KeyCode::Enter,
    ] {
      app.handle_key(key(code));
    }
    assert_eq!(app.breadcrumb(), vec!["Invoices", "Invoice 3"]);
  }

  #[tokio::test]
  async fn test_forms_keep_colon_for_text() {
    let mut app = app();
    app.execute_command("new");
    app.handle_key(key(KeyCode::Char(':')));
    assert!(!app.command.is_active());
  }
}
