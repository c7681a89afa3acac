use futures::future::{BoxFuture, FutureExt};
use std::fmt;

use crate::api::{ApiError, Invoice, InvoiceClient};
use crate::cache::{QueryCache, QueryFn};

/// Cache key for an invoice read.
///
/// Lines have no key of their own: they are embedded in `Invoice`, so a line
/// write only ever touches its parent invoice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InvoiceKey {
  InvoiceList,
  Invoice { id: i64 },
}

impl InvoiceKey {
  pub fn invoice(id: i64) -> Self {
    InvoiceKey::Invoice { id }
  }
}

impl fmt::Display for InvoiceKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      InvoiceKey::InvoiceList => write!(f, "invoice-list"),
      InvoiceKey::Invoice { id } => write!(f, "invoice:{}", id),
    }
  }
}

/// Value stored under an `InvoiceKey`
#[derive(Debug, Clone, PartialEq)]
pub enum InvoiceData {
  Invoices(Vec<Invoice>),
  Invoice(Invoice),
}

impl InvoiceData {
  pub fn as_invoices(&self) -> Option<&[Invoice]> {
    match self {
      InvoiceData::Invoices(invoices) => Some(invoices),
      InvoiceData::Invoice(_) => None,
    }
  }

  pub fn as_invoice(&self) -> Option<&Invoice> {
    match self {
      InvoiceData::Invoice(invoice) => Some(invoice),
      InvoiceData::Invoices(_) => None,
    }
  }
}

/// Loads invoice keys through the REST client
#[derive(Clone)]
pub struct InvoiceQueries {
  client: InvoiceClient,
}

impl InvoiceQueries {
  pub fn new(client: InvoiceClient) -> Self {
    Self { client }
  }
}

impl QueryFn for InvoiceQueries {
  type Key = InvoiceKey;
  type Value = InvoiceData;
  type Error = ApiError;

  fn fetch(&self, key: &InvoiceKey) -> BoxFuture<'static, Result<InvoiceData, ApiError>> {
    let client = self.client.clone();
    match *key {
      InvoiceKey::InvoiceList => async move {
        client.list_invoices().await.map(InvoiceData::Invoices)
      }
      .boxed(),
      InvoiceKey::Invoice { id } => async move {
        client.get_invoice(id).await.map(InvoiceData::Invoice)
      }
      .boxed(),
    }
  }
}

pub type InvoiceCache = QueryCache<InvoiceQueries>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_key_display() {
    assert_eq!(InvoiceKey::InvoiceList.to_string(), "invoice-list");
    assert_eq!(InvoiceKey::invoice(7).to_string(), "invoice:7");
  }

  #[test]
  fn test_keys_are_deterministic() {
    assert_eq!(InvoiceKey::invoice(3), InvoiceKey::Invoice { id: 3 });
    assert_ne!(InvoiceKey::invoice(3), InvoiceKey::invoice(4));
    assert_ne!(InvoiceKey::invoice(3), InvoiceKey::InvoiceList);
  }

  #[test]
  fn test_data_accessors() {
    let list = InvoiceData::Invoices(vec![]);
    assert_eq!(list.as_invoices().map(<[Invoice]>::len), Some(0));
    assert!(list.as_invoice().is_none());

    let one = InvoiceData::Invoice(Invoice {
      id: 1,
      ..Default::default()
    });
    assert_eq!(one.as_invoice().map(|i| i.id), Some(1));
    assert!(one.as_invoices().is_none());
  }
}
