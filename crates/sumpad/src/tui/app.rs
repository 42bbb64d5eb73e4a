//! TUI application state.

use crate::client::Evaluate;
use crate::controller::DisplayController;
use crate::core::History;
use crate::surface::{DisplaySurface, TextSurface};
use crate::tui::input::KeyAction;
use crate::tui::keypad::Keypad;

/// Calculator application: the display controller plus the terminal-only
/// concerns (keypad highlighting, busy indicator, quit flag).
#[derive(Debug)]
pub struct TuiApp<E> {
    controller: DisplayController<TextSurface>,
    evaluator: E,
    keypad: Keypad,
    busy: bool,
    should_quit: bool,
}

impl<E> TuiApp<E> {
    /// Creates an app that evaluates expressions with the given service.
    #[must_use]
    pub fn new(evaluator: E) -> Self {
        Self {
            controller: DisplayController::new(TextSurface::new()),
            evaluator,
            keypad: Keypad::new(),
            busy: false,
            should_quit: false,
        }
    }

    /// Returns the current display text.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.controller.surface().display_text()
    }

    /// Returns the current error-message text.
    #[must_use]
    pub fn error_text(&self) -> &str {
        self.controller.surface().error_text()
    }

    /// Returns the session history.
    #[must_use]
    pub fn history(&self) -> &History {
        self.controller.history()
    }

    /// Returns the keypad.
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the evaluation service.
    #[must_use]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Returns true while a request is in flight.
    #[must_use]
    pub fn busy(&self) -> bool {
        self.busy
    }

    /// Sets the busy indicator.
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Returns whether the app should quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Applies a non-suspending action and highlights its keypad button.
    /// Ignored input leaves the current highlight in place.
    /// [`KeyAction::Evaluate`] is ignored here; the event loop routes it
    /// through [`TuiApp::evaluate`] so it can draw a busy frame first.
    pub fn apply(&mut self, action: KeyAction) {
        if action != KeyAction::None {
            self.keypad.highlight_action(action);
        }
        match action {
            KeyAction::Append(token) => self.controller.append(token),
            KeyAction::Clear => self.controller.clear(),
            KeyAction::DeleteLast => self.controller.delete_last(),
            KeyAction::Quit => self.quit(),
            KeyAction::Evaluate | KeyAction::None => {}
        }
    }
}

impl<E: Evaluate> TuiApp<E> {
    /// Sends the current expression to the evaluation service. Holding
    /// `&mut self` across the await means no other input is processed
    /// while the request is outstanding.
    pub async fn evaluate(&mut self) {
        self.controller.evaluate(&self.evaluator).await;
    }

    /// Dispatches any action, including evaluation.
    pub async fn handle_action(&mut self, action: KeyAction) {
        if action == KeyAction::Evaluate {
            self.keypad.highlight_action(action);
            self.evaluate().await;
        } else {
            self.apply(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{EvalError, EvaluateResponse, ResultValue};
    use async_trait::async_trait;

    /// Evaluator that always replies with the same result text.
    #[derive(Debug)]
    struct FixedEvaluator(&'static str);

    #[async_trait]
    impl Evaluate for FixedEvaluator {
        async fn evaluate(&self, _expression: &str) -> Result<EvaluateResponse, EvalError> {
            Ok(EvaluateResponse {
                result: ResultValue::Text(self.0.to_string()),
            })
        }
    }

    #[test]
    fn test_app_starts_idle() {
        let app = TuiApp::new(FixedEvaluator("0"));
        assert_eq!(app.display_text(), "");
        assert_eq!(app.error_text(), "");
        assert!(!app.busy());
        assert!(!app.should_quit());
        assert!(app.history().is_empty());
    }

    #[test]
    fn test_apply_append() {
        let mut app = TuiApp::new(FixedEvaluator("0"));
        app.apply(KeyAction::Append('4'));
        app.apply(KeyAction::Append('2'));
        assert_eq!(app.display_text(), "42");
    }

    #[test]
    fn test_apply_highlights_keypad() {
        let mut app = TuiApp::new(FixedEvaluator("0"));
        app.apply(KeyAction::Append('4'));
        let idx = app.keypad().find_button_by_label('4').unwrap();
        assert!(app.keypad().get_button(idx).unwrap().pressed);
    }

    #[test]
    fn test_ignored_input_keeps_highlight() {
        let mut app = TuiApp::new(FixedEvaluator("0"));
        app.apply(KeyAction::Append('4'));
        app.apply(KeyAction::None);
        let idx = app.keypad().find_button_by_label('4').unwrap();
        assert!(app.keypad().get_button(idx).unwrap().pressed);
    }

    #[test]
    fn test_apply_clear_and_delete() {
        let mut app = TuiApp::new(FixedEvaluator("0"));
        app.apply(KeyAction::Append('1'));
        app.apply(KeyAction::Append('2'));
        app.apply(KeyAction::DeleteLast);
        assert_eq!(app.display_text(), "1");
        app.apply(KeyAction::Clear);
        assert_eq!(app.display_text(), "");
    }

    #[test]
    fn test_apply_quit() {
        let mut app = TuiApp::new(FixedEvaluator("0"));
        app.apply(KeyAction::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn test_apply_ignores_evaluate() {
        let mut app = TuiApp::new(FixedEvaluator("9"));
        app.apply(KeyAction::Append('1'));
        app.apply(KeyAction::Evaluate);
        assert_eq!(app.display_text(), "1");
    }

    #[tokio::test]
    async fn test_handle_action_evaluates() {
        let mut app = TuiApp::new(FixedEvaluator("3"));
        app.handle_action(KeyAction::Append('1')).await;
        app.handle_action(KeyAction::Append('+')).await;
        app.handle_action(KeyAction::Append('2')).await;
        app.handle_action(KeyAction::Evaluate).await;
        assert_eq!(app.display_text(), "3");
        assert_eq!(app.history().len(), 1);
    }

    #[test]
    fn test_busy_flag() {
        let mut app = TuiApp::new(FixedEvaluator("0"));
        app.set_busy(true);
        assert!(app.busy());
        app.set_busy(false);
        assert!(!app.busy());
    }
}
