mod memory;
mod schema;
mod status;

pub use memory::MemorySheet;
pub use schema::Schema;
pub use status::Status;

use crate::config::Columns;

pub const FLAG_TRUE: &str = "TRUE";
pub const FLAG_FALSE: &str = "FALSE";

/// Row-oriented backing store for submissions. Rows and columns are 1-based
/// to match the sheet convention; row 1 is the header. The store is an
/// external collaborator with an assumed-reliable interface, so the
/// signatures are infallible.
pub trait RowStore: Send + Sync {
    fn header(&self) -> Vec<String>;
    /// Highest populated row number, header included.
    fn last_row(&self) -> u32;
    /// One row, padded to header width.
    fn read_row(&self, row: u32) -> Vec<String>;
    fn write_cell(&self, row: u32, col: u32, value: &str);
    /// Appends below the last row and returns the new row number.
    fn append_row(&self, values: Vec<String>) -> u32;
    fn master_prompt(&self) -> SettingsLookup;
    /// False when the settings record is absent; nothing is written then.
    fn set_master_prompt(&self, prompt: &str) -> bool;
}

/// Master-prompt lookup outcome. A missing settings record and an unset
/// prompt cell are different failures and stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsLookup {
    MissingRecord,
    Unset,
    Prompt(String),
}

pub fn flag_is_set(cell: &str) -> bool {
    let cell = cell.trim();
    cell.eq_ignore_ascii_case("true") || cell == "1"
}

/// Header row the submission form produces, in form order.
pub fn form_header(columns: &Columns) -> Vec<String> {
    vec![
        "Timestamp".to_string(),
        "Name".to_string(),
        columns.prompt.clone(),
        columns.email.clone(),
        columns.status.clone(),
        columns.response.clone(),
        columns.error_details.clone(),
        columns.send_flag.clone(),
    ]
}
