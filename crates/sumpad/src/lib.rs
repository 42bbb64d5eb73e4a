//! Terminal calculator front end for a remote evaluation service.
//!
//! The crate manages a calculator display: digits and operators are
//! appended locally, and `=` sends the accumulated expression to a server
//! (`POST /calculate`) that performs the arithmetic. The result or error
//! message is rendered back onto the display. No expression parsing or
//! evaluation happens on this side of the wire.
//!
//! While editing, multiplication is shown as the `×` glyph; the canonical
//! `*` operator only ever appears in the request body.
//!
//! # Example
//!
//! ```rust
//! use sumpad::prelude::*;
//!
//! let mut controller = DisplayController::new(TextSurface::new());
//! controller.append('1');
//! controller.append('×');
//! controller.append('2');
//!
//! assert_eq!(controller.surface().display_text(), "1×2");
//! assert_eq!(controller.expression(), "1*2");
//! ```

#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod client;
pub mod controller;
pub mod core;
pub mod surface;
pub mod tui;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::client::{
        EvalClient, EvalError, Evaluate, EvaluateRequest, EvaluateResponse, ResultValue,
        CALCULATE_PATH,
    };
    pub use crate::controller::DisplayController;
    pub use crate::core::{
        DisplayState, History, HistoryEntry, CONNECTION_FAILED_MSG, EVAL_FAILED_MSG,
        MULTIPLY_GLYPH, MULTIPLY_OP,
    };
    pub use crate::surface::{DisplaySurface, TextSurface};
    pub use crate::tui::{InputHandler, KeyAction, TuiApp};
}
