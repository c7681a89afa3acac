mod command_input;
mod field_list;
mod filter_input;
mod input;
mod key_result;

pub use command_input::{CommandEvent, CommandInput};
pub use field_list::{FieldEvent, FieldList};
pub use filter_input::{FilterEvent, FilterInput};
pub use key_result::KeyResult;
