//! Display surface abstraction.
//!
//! The controller never talks to a concrete rendering layer. It writes
//! through this small capability trait, so the same controller drives the
//! terminal panels and plain in-memory text in tests.

/// Capability interface of the rendering surface: a display line and an
/// error-message line whose text the controller reads and writes.
pub trait DisplaySurface {
    /// Replaces the display text.
    fn set_display_text(&mut self, text: &str);

    /// Replaces the error-message text. Empty means no error shown.
    fn set_error_text(&mut self, text: &str);

    /// Returns the current display text.
    fn display_text(&self) -> &str;

    /// Returns the current error-message text.
    fn error_text(&self) -> &str;
}

/// Plain in-memory surface backing the TUI panels; doubles as the test
/// surface since all it holds is the two visible strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSurface {
    display: String,
    error: String,
}

impl TextSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplaySurface for TextSurface {
    fn set_display_text(&mut self, text: &str) {
        self.display = text.to_string();
    }

    fn set_error_text(&mut self, text: &str) {
        self.error = text.to_string();
    }

    fn display_text(&self) -> &str {
        &self.display
    }

    fn error_text(&self) -> &str {
        &self.error
    }
}
