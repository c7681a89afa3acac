use super::keys::InvoiceKey;

/// A write against the API, with the parameters that decide which reads it
/// makes stale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
  CreateInvoice,
  UpdateInvoice { id: i64 },
  DeleteInvoice { id: i64 },
  CreateLine { invoice_id: i64 },
  UpdateLine { invoice_id: i64, line_number: i64 },
  DeleteLine { invoice_id: i64, line_number: i64 },
}

impl Mutation {
  /// Keys to invalidate once this mutation succeeds.
  ///
  /// Deleting an invoice leaves `invoice:<id>` alone: nothing can navigate to
  /// it anymore and an open detail view shows the 404 on its next read.
  pub fn invalidates(&self) -> Vec<InvoiceKey> {
    match *self {
      Mutation::CreateInvoice => vec![InvoiceKey::InvoiceList],
      Mutation::UpdateInvoice { id } => vec![InvoiceKey::InvoiceList, InvoiceKey::invoice(id)],
      Mutation::DeleteInvoice { .. } => vec![InvoiceKey::InvoiceList],
      Mutation::CreateLine { invoice_id }
      | Mutation::UpdateLine { invoice_id, .. }
      | Mutation::DeleteLine { invoice_id, .. } => vec![InvoiceKey::invoice(invoice_id)],
    }
  }

  /// Short label for logs
  pub fn label(&self) -> &'static str {
    match self {
      Mutation::CreateInvoice => "create invoice",
      Mutation::UpdateInvoice { .. } => "update invoice",
      Mutation::DeleteInvoice { .. } => "delete invoice",
      Mutation::CreateLine { .. } => "create line",
      Mutation::UpdateLine { .. } => "update line",
      Mutation::DeleteLine { .. } => "delete line",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_create_invoice_invalidates_list() {
    assert_eq!(Mutation::CreateInvoice.invalidates(), vec![InvoiceKey::InvoiceList]);
  }

  #[test]
  fn test_update_invoice_invalidates_list_and_detail() {
    assert_eq!(
      Mutation::UpdateInvoice { id: 3 }.invalidates(),
      vec![InvoiceKey::InvoiceList, InvoiceKey::invoice(3)]
    );
  }

  #[test]
  fn test_delete_invoice_leaves_detail_key() {
    let keys = Mutation::DeleteInvoice { id: 7 }.invalidates();
    assert_eq!(keys, vec![InvoiceKey::InvoiceList]);
    assert!(!keys.contains(&InvoiceKey::invoice(7)));
  }

  #[test]
  fn test_line_writes_invalidate_only_parent() {
    let expected = vec![InvoiceKey::invoice(3)];
    assert_eq!(Mutation::CreateLine { invoice_id: 3 }.invalidates(), expected);
    assert_eq!(
      Mutation::UpdateLine {
        invoice_id: 3,
        line_number: 2
      }
      .invalidates(),
      expected
    );
    assert_eq!(
      Mutation::DeleteLine {
        invoice_id: 3,
        line_number: 2
      }
      .invalidates(),
      expected
    );
  }
}
