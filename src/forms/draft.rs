//! Editable form state and local validation.

use thiserror::Error;

use crate::api::{Invoice, InvoiceLine, InvoiceLineMutation, InvoiceMutation};

/// Why a draft cannot be submitted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
  #[error("Please fill in all fields")]
  MissingFields,
  #[error("{field} must be a number")]
  InvalidNumber { field: &'static str },
}

/// Invoice header being created or edited
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceDraft {
  pub customer_name: String,
  pub customer_address: String,
}

impl InvoiceDraft {
  pub fn from_invoice(invoice: &Invoice) -> Self {
    Self {
      customer_name: invoice.customer_name.clone(),
      customer_address: invoice.customer_address.clone(),
    }
  }

  pub fn validate(&self) -> Result<InvoiceMutation, DraftError> {
    if self.customer_name.trim().is_empty() || self.customer_address.trim().is_empty() {
      return Err(DraftError::MissingFields);
    }

    Ok(InvoiceMutation {
      customer_name: self.customer_name.clone(),
      customer_address: self.customer_address.clone(),
    })
  }
}

/// Invoice line being created or edited. Numbers are kept as typed text
/// until submit.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLineDraft {
  pub item_number: String,
  pub description: String,
  pub unit_price: String,
  pub quantity: String,
}

impl Default for InvoiceLineDraft {
  fn default() -> Self {
    Self {
      item_number: String::new(),
      description: String::new(),
      unit_price: "0".to_string(),
      quantity: "0".to_string(),
    }
  }
}

impl InvoiceLineDraft {
  pub fn from_line(line: &InvoiceLine) -> Self {
    Self {
      item_number: line.item_number.clone(),
      description: line.description.clone().unwrap_or_default(),
      unit_price: line.unit_price.to_string(),
      quantity: line.quantity.to_string(),
    }
  }

  /// Zero price and quantity are accepted; an empty description is sent as
  /// null.
  pub fn validate(&self) -> Result<InvoiceLineMutation, DraftError> {
    if self.item_number.trim().is_empty() {
      return Err(DraftError::MissingFields);
    }

    let unit_price = self
      .unit_price
      .trim()
      .parse::<f64>()
      .ok()
      .filter(|p| p.is_finite())
      .ok_or(DraftError::InvalidNumber { field: "Unit price" })?;
    let quantity = self
      .quantity
      .trim()
      .parse::<i32>()
      .map_err(|_| DraftError::InvalidNumber { field: "Quantity" })?;

    let description = Some(self.description.clone()).filter(|d| !d.trim().is_empty());

    Ok(InvoiceLineMutation {
      item_number: self.item_number.clone(),
      description,
      unit_price,
      quantity,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_invoice_draft_requires_both_fields() {
    let draft = InvoiceDraft {
      customer_name: String::new(),
      customer_address: "1 Main St".to_string(),
    };
    assert_eq!(draft.validate(), Err(DraftError::MissingFields));
    assert_eq!(
      DraftError::MissingFields.to_string(),
      "Please fill in all fields"
    );

    let draft = InvoiceDraft {
      customer_name: "Acme".to_string(),
      customer_address: "   ".to_string(),
    };
    assert_eq!(draft.validate(), Err(DraftError::MissingFields));
  }

  #[test]
  fn test_invoice_draft_from_invoice() {
    let invoice = Invoice {
      id: 3,
      customer_name: "Acme".to_string(),
      customer_address: "1 Main St".to_string(),
      items: vec![],
    };
    let body = InvoiceDraft::from_invoice(&invoice).validate().unwrap();
    assert_eq!(body.customer_name, "Acme");
    assert_eq!(body.customer_address, "1 Main St");
  }

  #[test]
  fn test_empty_line_draft_needs_item_number() {
    let draft = InvoiceLineDraft::default();
    assert_eq!(draft.validate(), Err(DraftError::MissingFields));
  }

  #[test]
  fn test_zero_price_and_quantity_are_valid() {
    let draft = InvoiceLineDraft {
      item_number: "W-1".to_string(),
      ..Default::default()
    };
    let body = draft.validate().unwrap();
    assert_eq!(body.unit_price, 0.0);
    assert_eq!(body.quantity, 0);
    assert_eq!(body.description, None);
  }

  #[test]
  fn test_unparseable_numbers_name_the_field() {
    let draft = InvoiceLineDraft {
      item_number: "W-1".to_string(),
      unit_price: "abc".to_string(),
      ..Default::default()
    };
    let err = draft.validate().unwrap_err();
    assert_eq!(err.to_string(), "Unit price must be a number");

    let draft = InvoiceLineDraft {
      item_number: "W-1".to_string(),
      quantity: "1.5".to_string(),
      ..Default::default()
    };
    assert_eq!(
      draft.validate(),
      Err(DraftError::InvalidNumber { field: "Quantity" })
    );
  }

  #[test]
  fn test_line_draft_round_trips_existing_line() {
    let line = InvoiceLine {
      invoice_id: 3,
      line_number: 2,
      item_number: "W-1".to_string(),
      description: Some("Widget".to_string()),
      unit_price: 2.5,
      quantity: 4,
    };
    let draft = InvoiceLineDraft::from_line(&line);
    assert_eq!(draft.unit_price, "2.5");
    assert_eq!(draft.quantity, "4");

    let body = draft.validate().unwrap();
    assert_eq!(body.description.as_deref(), Some("Widget"));
    assert_eq!(body.unit_price, 2.5);
    assert_eq!(body.quantity, 4);
  }
}
