use tracing::debug;

use super::draft::InvoiceDraft;
use super::status::MutationStatus;
use super::submission::Submission;
use crate::api::Invoice;
use crate::invoices::Mutations;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
  Create,
  Edit { id: i64 },
}

/// Create or edit an invoice header
#[derive(Debug)]
pub struct HeaderForm {
  mode: HeaderMode,
  pub draft: InvoiceDraft,
  status: MutationStatus,
  /// Resolves to the new id on create, `None` on edit
  submission: Option<Submission<Option<i64>>>,
}

impl HeaderForm {
  pub fn create() -> Self {
    Self::new(HeaderMode::Create)
  }

  /// Edit form for `id`; call `seed` once the invoice is loaded
  pub fn edit(id: i64) -> Self {
    Self::new(HeaderMode::Edit { id })
  }

  fn new(mode: HeaderMode) -> Self {
    Self {
      mode,
      draft: InvoiceDraft::default(),
      status: MutationStatus::Idle,
      submission: None,
    }
  }

  pub fn seed(&mut self, invoice: &Invoice) {
    self.draft = InvoiceDraft::from_invoice(invoice);
  }

  pub fn mode(&self) -> HeaderMode {
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

    debug!(mode = ?self.mode, "submitting invoice header");
    self.status = MutationStatus::saving();
    let mutations = mutations.clone();
    self.submission = Some(match self.mode {
      HeaderMode::Create => {
        Submission::spawn(async move { mutations.create_invoice(body).await.map(Some) })
      }
      HeaderMode::Edit { id } => {
        Submission::spawn(async move { mutations.update_invoice(id, body).await.map(|()| None) })
      }
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

  /// Wait for the running submission, if any
  #[cfg(test)]
  pub async fn wait(&mut self) {
    if let Some(submission) = self.submission.take() {
      let result = submission.wait().await;
      self.finish(result);
    }
  }

  fn finish(&mut self, result: Result<Option<i64>, crate::api::ApiError>) {
    self.status = match result {
      Ok(Some(id)) => MutationStatus::Success {
        message: format!("Created successfully with id: {}", id),
        created_id: Some(id),
      },
      Ok(None) => MutationStatus::saved(),
      Err(e) => MutationStatus::error(e.to_string()),
    };
  }
}
