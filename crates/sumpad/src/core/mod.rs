//! Shared display constants and user-facing message strings.

pub mod history;
pub mod state;

pub use history::{History, HistoryEntry};
pub use state::DisplayState;

/// Glyph shown in place of the canonical multiply operator while editing.
pub const MULTIPLY_GLYPH: char = '×';

/// Canonical multiplication operator sent to the evaluation server.
pub const MULTIPLY_OP: char = '*';

/// Fallback message when the server rejects an expression without saying why.
pub const EVAL_FAILED_MSG: &str = "A calculation error occurred.";

/// Message shown when the evaluation server cannot be reached at all.
pub const CONNECTION_FAILED_MSG: &str = "Could not connect to the calculation server.";
