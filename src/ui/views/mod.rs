mod header_form;
mod invoice_detail;
mod invoice_list;
mod line_form;

pub use header_form::HeaderFormView;
pub use invoice_detail::InvoiceDetailView;
pub use invoice_list::InvoiceListView;
pub use line_form::LineFormView;
