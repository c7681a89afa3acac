use tracing::debug;

use super::draft::InvoiceLineDraft;
use super::status::MutationStatus;
use super::submission::Submission;
use crate::api::{ApiError, InvoiceLine};
use crate::invoices::Mutations;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
  Create { invoice_id: i64 },
  Edit { invoice_id: i64, line_number: i64 },
}

impl LineMode {
  pub fn invoice_id(&self) -> i64 {
    match *self {
      LineMode::Create { invoice_id } | LineMode::Edit { invoice_id, .. } => invoice_id,
    }
  }
}

/// Create or edit a single invoice line
#[derive(Debug)]
pub struct LineForm {
  mode: LineMode,
  pub draft: InvoiceLineDraft,
  status: MutationStatus,
  /// Resolves to the new line number on create, `None` on edit
  submission: Option<Submission<Option<i64>>>,
}

impl LineForm {
  pub fn create(invoice_id: i64) -> Self {
    Self::new(LineMode::Create { invoice_id })
  }

  /// Edit form for one line; call `seed` once the line is loaded
  pub fn edit(invoice_id: i64, line_number: i64) -> Self {
    Self::new(LineMode::Edit {
      invoice_id,
      line_number,
    })
  }

  fn new(mode: LineMode) -> Self {
    Self {
      mode,
      draft: InvoiceLineDraft::default(),
      status: MutationStatus::Idle,
      submission: None,
    }
  }

  pub fn seed(&mut self, line: &InvoiceLine) {
    self.draft = InvoiceLineDraft::from_line(line);
  }

  pub fn mode(&self) -> LineMode {
    self.mode
  }

  pub fn status(&self) -> &MutationStatus {
    &self.status
  }

  /// Validate and start the mutation. Returns false if nothing was sent.
  pub fn submit(&mut self, mutations: &Mutations) -> bool {
    if self.status.is_pending() {
      return false;
    }

    let body = match self.draft.validate() {
      Ok(body) => body,
      Err(e) => {
        self.status = MutationStatus::error(e.to_string());
        return false;
      }
    };

    debug!(mode = ?self.mode, "submitting invoice line");
    self.status = MutationStatus::saving();
    let mutations = mutations.clone();
    self.submission = Some(match self.mode {
      LineMode::Create { invoice_id } => Submission::spawn(async move {
        mutations.create_line(invoice_id, body).await.map(Some)
      }),
      LineMode::Edit {
        invoice_id,
        line_number,
      } => Submission::spawn(async move {
        mutations
          .update_line(invoice_id, line_number, body)
          .await
          .map(|()| None)
      }),
    });
    true
  }

  /// Pick up a finished submission. Returns true if the status changed.
  pub fn poll(&mut self) -> bool {
    let Some(result) = self.submission.as_mut().and_then(Submission::try_take) else {
      return false;
    };
    self.submission = None;
    self.finish(result);
    true
  }

  #[cfg(test)]
  pub async fn wait(&mut self) {
    if let Some(submission) = self.submission.take() {
      let result = submission.wait().await;
      self.finish(result);
    }
  }

  fn finish(&mut self, result: Result<Option<i64>, ApiError>) {
    self.status = match result {
      Ok(Some(line_number)) => MutationStatus::Success {
        message: format!("Created successfully with line number: {}", line_number),
        created_id: Some(line_number),
      },
      Ok(None) => MutationStatus::saved(),
      Err(e) => MutationStatus::error(e.to_string()),
    };
  }
}
