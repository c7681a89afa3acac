mod client;
mod error;
mod types;

pub use client::InvoiceClient;
pub use error::ApiError;
pub use types::{Invoice, InvoiceLine, InvoiceLineMutation, InvoiceMutation};
