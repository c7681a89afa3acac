//! Form state behind the edit views, independent of rendering.

mod draft;
mod header;
mod line;
mod status;
mod submission;

pub use header::{HeaderForm, HeaderMode};
pub use line::{LineForm, LineMode};
pub use status::MutationStatus;
pub use submission::Submission;
