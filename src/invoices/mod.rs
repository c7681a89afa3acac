//! Invoice reads and writes wired to the shared cache.

mod keys;
mod mutations;
mod rules;

pub use keys::{InvoiceCache, InvoiceKey, InvoiceQueries};
pub use mutations::Mutations;

#[cfg(test)]
pub(crate) use mutations::tests::setup as setup_mock;
