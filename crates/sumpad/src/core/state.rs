//! Display buffer state machine.

use crate::core::{MULTIPLY_GLYPH, MULTIPLY_OP};

/// The calculator display state: the literal text the user sees plus a
/// flag marking that the next keystroke starts a fresh expression.
///
/// The state machine has exactly two states. In *Accumulating*
/// (`reset_pending == false`) appends extend the buffer. In
/// *AwaitingFreshInput* (`reset_pending == true`, entered after a
/// successful evaluation) the next append replaces the shown result
/// instead of extending it. `clear` and `delete_last` always return to
/// Accumulating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    buffer: String,
    reset_pending: bool,
}

impl DisplayState {
    /// Creates an empty display in the Accumulating state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the literal display text.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Returns true if nothing has been entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns true if the next append starts a fresh expression.
    #[must_use]
    pub fn reset_pending(&self) -> bool {
        self.reset_pending
    }

    /// Appends a single token (digit, decimal point, or operator glyph).
    ///
    /// A pending reset clears the buffer first. A buffer holding exactly
    /// `"0"` is replaced rather than extended, unless the token is `'.'`,
    /// so leading-zero artifacts like `"05"` never appear.
    pub fn append(&mut self, token: char) {
        if self.reset_pending {
            self.buffer.clear();
            self.reset_pending = false;
        }

        if self.buffer == "0" && token != '.' {
            self.buffer.clear();
        }
        self.buffer.push(token);
    }

    /// Empties the buffer and returns to the Accumulating state.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.reset_pending = false;
    }

    /// Removes the final character. No-op on an empty buffer.
    pub fn delete_last(&mut self) {
        self.buffer.pop();
        self.reset_pending = false;
    }

    /// Replaces the buffer with an evaluation result and arms the reset
    /// flag so the next append starts a fresh expression.
    pub fn apply_result(&mut self, result: &str) {
        self.buffer = result.to_string();
        self.reset_pending = true;
    }

    /// Returns the buffer in canonical form for the evaluation server,
    /// with every display multiplication glyph substituted back.
    #[must_use]
    pub fn expression(&self) -> String {
        self.buffer.replace(MULTIPLY_GLYPH, &MULTIPLY_OP.to_string())
    }
}
