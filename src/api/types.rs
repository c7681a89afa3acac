//! Records exchanged with the invoicing API.
//!
//! The server speaks camelCase JSON and is loose about nulls: string fields and
//! the embedded line collection may arrive as `null`, so those decode to their
//! empty value instead of failing the whole response.

use serde::{Deserialize, Deserializer, Serialize};

/// Invoice header with its embedded lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
  pub id: i64,
  #[serde(default, deserialize_with = "null_as_default")]
  pub customer_name: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub customer_address: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub items: Vec<InvoiceLine>,
}

impl Invoice {
  /// Sum of all line totals
  pub fn total(&self) -> f64 {
    self.items.iter().map(InvoiceLine::total).sum()
  }

  /// Find an embedded line by its number
  pub fn line(&self, line_number: i64) -> Option<&InvoiceLine> {
    self.items.iter().find(|l| l.line_number == line_number)
  }
}

/// A single invoice line, identified by (invoice_id, line_number)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
  pub invoice_id: i64,
  pub line_number: i64,
  #[serde(default, deserialize_with = "null_as_default")]
  pub item_number: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub unit_price: f64,
  #[serde(default, deserialize_with = "null_as_default")]
  pub quantity: i32,
}

impl InvoiceLine {
  pub fn total(&self) -> f64 {
    self.unit_price * f64::from(self.quantity)
  }
}

/// Mutable header fields, sent on create and update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceMutation {
  pub customer_name: String,
  pub customer_address: String,
}

/// Mutable line fields, sent on create and update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineMutation {
  pub item_number: String,
  pub description: Option<String>,
  pub unit_price: f64,
  pub quantity: i32,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
