use tracing::{info, warn};

use super::keys::InvoiceCache;
use super::rules::Mutation;
use crate::api::{ApiError, InvoiceClient, InvoiceLineMutation, InvoiceMutation};

/// Write side of the app.
///
/// Every write goes through here so that a successful response always
/// invalidates the reads it affects before the caller sees the result.
#[derive(Clone)]
pub struct Mutations {
  client: InvoiceClient,
  cache: InvoiceCache,
}

impl Mutations {
  pub fn new(client: InvoiceClient, cache: InvoiceCache) -> Self {
    Self { client, cache }
  }

  pub fn client(&self) -> &InvoiceClient {
    &self.client
  }

  pub fn cache(&self) -> &InvoiceCache {
    &self.cache
  }

  /// Returns the id assigned by the server
  pub async fn create_invoice(&self, body: InvoiceMutation) -> Result<i64, ApiError> {
    let result = self.client.create_invoice(&body).await;
    self.settle(Mutation::CreateInvoice, result)
  }

  pub async fn update_invoice(&self, id: i64, body: InvoiceMutation) -> Result<(), ApiError> {
    let result = self.client.update_invoice(id, &body).await;
    self.settle(Mutation::UpdateInvoice { id }, result)
  }

  pub async fn delete_invoice(&self, id: i64) -> Result<(), ApiError> {
    let result = self.client.delete_invoice(id).await;
    self.settle(Mutation::DeleteInvoice { id }, result)
  }

  /// Returns the line number assigned by the server
  pub async fn create_line(
    &self,
    invoice_id: i64,
    body: InvoiceLineMutation,
  ) -> Result<i64, ApiError> {
    let result = self.client.create_line(invoice_id, &body).await;
    self.settle(Mutation::CreateLine { invoice_id }, result)
  }

  pub async fn update_line(
    &self,
    invoice_id: i64,
    line_number: i64,
    body: InvoiceLineMutation,
  ) -> Result<(), ApiError> {
    let result = self.client.update_line(invoice_id, line_number, &body).await;
    self.settle(
      Mutation::UpdateLine {
        invoice_id,
        line_number,
      },
      result,
    )
  }

  pub async fn delete_line(&self, invoice_id: i64, line_number: i64) -> Result<(), ApiError> {
    let result = self.client.delete_line(invoice_id, line_number).await;
    self.settle(
      Mutation::DeleteLine {
        invoice_id,
        line_number,
      },
      result,
    )
  }

  /// Invalidate on success, pass errors through untouched
  fn settle<T>(&self, mutation: Mutation, result: Result<T, ApiError>) -> Result<T, ApiError> {
    match &result {
      Ok(_) => {
        let keys = mutation.invalidates();
        let names: Vec<String> = keys.iter().map(ToString::to_string).collect();
        info!(?mutation, keys = ?names, "{} succeeded", mutation.label());
        self.cache.invalidate(&keys);
      }
      Err(e) => warn!(?mutation, error = %e, "{} failed", mutation.label()),
    }
    result
  }
}
