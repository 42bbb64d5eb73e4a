//! Display controller: input mutations on one side, the evaluation
//! service on the other, with the surface kept in sync throughout.

use crate::client::{EvalError, Evaluate};
use crate::core::{DisplayState, History, CONNECTION_FAILED_MSG, EVAL_FAILED_MSG};
use crate::surface::DisplaySurface;

/// Owns the display state for one session and reconciles it with the
/// rendering surface and the evaluation service.
///
/// All operations run on the caller's single logical thread. `evaluate`
/// is the only suspending operation; since it holds `&mut self` across
/// the await, no other input can mutate the state while a request is in
/// flight, so overlapping evaluations cannot occur.
#[derive(Debug)]
pub struct DisplayController<S> {
    state: DisplayState,
    history: History,
    surface: S,
}

impl<S: DisplaySurface> DisplayController<S> {
    /// Creates a controller writing to the given surface.
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self {
            state: DisplayState::new(),
            history: History::new(),
            surface,
        }
    }

    /// Returns the rendering surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns the display state.
    #[must_use]
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Returns the session history of successful calculations.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns the buffer in canonical form for the server.
    #[must_use]
    pub fn expression(&self) -> String {
        self.state.expression()
    }

    /// Appends a token to the display and clears any shown error.
    pub fn append(&mut self, token: char) {
        self.state.append(token);
        self.surface.set_display_text(self.state.buffer());
        self.surface.set_error_text("");
    }

    /// Empties the display and clears any shown error.
    pub fn clear(&mut self) {
        self.state.clear();
        self.surface.set_display_text("");
        self.surface.set_error_text("");
    }

    /// Removes the final character of the display, if any.
    pub fn delete_last(&mut self) {
        self.state.delete_last();
        self.surface.set_display_text(self.state.buffer());
    }

    /// Sends the current expression to the evaluation service and
    /// reconciles the display with the response.
    ///
    /// No-op on an empty buffer. On success the result replaces the
    /// buffer and the next append starts a fresh expression. On failure
    /// the buffer is left untouched and only the error line changes:
    /// server-supplied text (or the fixed fallback) for a rejection, the
    /// fixed connection message for a transport failure.
    pub async fn evaluate<E: Evaluate>(&mut self, evaluator: &E) {
        if self.state.is_empty() {
            return;
        }

        let shown = self.state.buffer().to_string();
        let expression = self.state.expression();

        match evaluator.evaluate(&expression).await {
            Ok(response) => {
                let result = response.result.to_string();
                tracing::debug!(%expression, %result, "expression evaluated");
                self.history.record(&shown, &result);
                self.state.apply_result(&result);
                self.surface.set_display_text(self.state.buffer());
                self.surface.set_error_text("");
            }
            Err(EvalError::Rejected { status, message }) => {
                tracing::debug!(%expression, status, "server rejected expression");
                self.surface
                    .set_error_text(message.as_deref().unwrap_or(EVAL_FAILED_MSG));
            }
            Err(EvalError::Transport(err)) => {
                // Transport detail is for the log, never for the user.
                tracing::warn!(%expression, error = %err, "evaluation request failed");
                self.surface.set_error_text(CONNECTION_FAILED_MSG);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{EvaluateResponse, ResultValue};
    use crate::surface::TextSurface;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Evaluator that pops scripted outcomes and records every request.
    #[derive(Debug, Default)]
    struct ScriptedEvaluator {
        outcomes: Mutex<Vec<Result<EvaluateResponse, EvalError>>>,
        requests: Mutex<Vec<String>>,
    }

    impl ScriptedEvaluator {
        fn replying(result: ResultValue) -> Self {
            let this = Self::default();
            this.outcomes
                .lock()
                .unwrap()
                .push(Ok(EvaluateResponse { result }));
            this
        }

        fn rejecting(status: u16, message: Option<&str>) -> Self {
            let this = Self::default();
            this.outcomes.lock().unwrap().push(Err(EvalError::Rejected {
                status,
                message: message.map(str::to_string),
            }));
            this
        }

        fn unreachable_host() -> Self {
            let this = Self::default();
            let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
            this.outcomes
                .lock()
                .unwrap()
                .push(Err(EvalError::Transport(Box::new(io))));
            this
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Evaluate for ScriptedEvaluator {
        async fn evaluate(&self, expression: &str) -> Result<EvaluateResponse, EvalError> {
            self.requests.lock().unwrap().push(expression.to_string());
            self.outcomes.lock().unwrap().pop().unwrap()
        }
    }

    fn number(n: i64) -> ResultValue {
        ResultValue::Number(serde_json::Number::from(n))
    }

    // ===== Input mutation tests =====

    #[test]
    fn test_append_updates_surface() {
        let mut ctl = DisplayController::new(TextSurface::new());
        ctl.append('1');
        ctl.append('+');
        ctl.append('2');
        assert_eq!(ctl.surface().display_text(), "1+2");
    }

    #[test]
    fn test_append_clears_error() {
        let mut ctl = DisplayController::new(TextSurface::new());
        ctl.surface.set_error_text("stale error");
        ctl.append('7');
        assert_eq!(ctl.surface().error_text(), "");
    }

    #[test]
    fn test_clear_resets_surface() {
        let mut ctl = DisplayController::new(TextSurface::new());
        ctl.append('9');
        ctl.surface.set_error_text("oops");
        ctl.clear();
        assert_eq!(ctl.surface().display_text(), "");
        assert_eq!(ctl.surface().error_text(), "");
    }

    #[test]
    fn test_delete_last_keeps_error_line() {
        let mut ctl = DisplayController::new(TextSurface::new());
        ctl.append('1');
        ctl.append('2');
        ctl.surface.set_error_text("kept");
        ctl.delete_last();
        assert_eq!(ctl.surface().display_text(), "1");
        assert_eq!(ctl.surface().error_text(), "kept");
    }

    // ===== Evaluation tests =====

    #[tokio::test]
    async fn test_evaluate_empty_buffer_sends_nothing() {
        let evaluator = ScriptedEvaluator::default();
        let mut ctl = DisplayController::new(TextSurface::new());
        ctl.evaluate(&evaluator).await;
        assert!(evaluator.requests().is_empty());
        assert_eq!(ctl.surface().display_text(), "");
    }

    #[tokio::test]
    async fn test_evaluate_success_round_trip() {
        let evaluator = ScriptedEvaluator::replying(ResultValue::Text("2".to_string()));
        let mut ctl = DisplayController::new(TextSurface::new());
        ctl.append('1');
        ctl.append('×');
        ctl.append('2');
        ctl.evaluate(&evaluator).await;

        // The glyph was substituted on the wire.
        assert_eq!(evaluator.requests(), vec!["1*2"]);
        assert_eq!(ctl.surface().display_text(), "2");
        assert!(ctl.state().reset_pending());

        // The next digit starts a fresh expression.
        ctl.append('3');
        assert_eq!(ctl.surface().display_text(), "3");
    }

    #[tokio::test]
    async fn test_evaluate_success_records_history() {
        let evaluator = ScriptedEvaluator::replying(number(4));
        let mut ctl = DisplayController::new(TextSurface::new());
        for token in ['2', '+', '2'] {
            ctl.append(token);
        }
        ctl.evaluate(&evaluator).await;
        assert_eq!(ctl.history().len(), 1);
        assert_eq!(ctl.history().last().unwrap().display(), "2+2 = 4");
    }

    #[tokio::test]
    async fn test_evaluate_rejection_shows_server_message() {
        let evaluator = ScriptedEvaluator::rejecting(400, Some("Division by zero"));
        let mut ctl = DisplayController::new(TextSurface::new());
        for token in ['1', '/', '0'] {
            ctl.append(token);
        }
        ctl.evaluate(&evaluator).await;
        assert_eq!(ctl.surface().display_text(), "1/0");
        assert_eq!(ctl.surface().error_text(), "Division by zero");
        assert!(!ctl.state().reset_pending());
        assert!(ctl.history().is_empty());
    }

    #[tokio::test]
    async fn test_evaluate_rejection_without_message_uses_fallback() {
        let evaluator = ScriptedEvaluator::rejecting(500, None);
        let mut ctl = DisplayController::new(TextSurface::new());
        ctl.append('1');
        ctl.evaluate(&evaluator).await;
        assert_eq!(ctl.surface().error_text(), EVAL_FAILED_MSG);
    }

    #[tokio::test]
    async fn test_evaluate_transport_failure_shows_fixed_message() {
        let evaluator = ScriptedEvaluator::unreachable_host();
        let mut ctl = DisplayController::new(TextSurface::new());
        for token in ['4', '+', '4'] {
            ctl.append(token);
        }
        ctl.evaluate(&evaluator).await;
        assert_eq!(ctl.surface().display_text(), "4+4");
        assert_eq!(ctl.surface().error_text(), CONNECTION_FAILED_MSG);
    }

    #[tokio::test]
    async fn test_session_recovers_after_failure() {
        let evaluator = ScriptedEvaluator::unreachable_host();
        let mut ctl = DisplayController::new(TextSurface::new());
        ctl.append('5');
        ctl.evaluate(&evaluator).await;
        assert_eq!(ctl.surface().error_text(), CONNECTION_FAILED_MSG);

        // A fresh append keeps the display interactive and drops the error.
        ctl.append('1');
        assert_eq!(ctl.surface().display_text(), "51");
        assert_eq!(ctl.surface().error_text(), "");
    }

    #[tokio::test]
    async fn test_evaluate_numeric_result_rendered_verbatim() {
        let evaluator = ScriptedEvaluator::replying(ResultValue::Number(
            serde_json::Number::from_f64(3.5).unwrap(),
        ));
        let mut ctl = DisplayController::new(TextSurface::new());
        for token in ['7', '/', '2'] {
            ctl.append(token);
        }
        ctl.evaluate(&evaluator).await;
        assert_eq!(ctl.surface().display_text(), "3.5");
    }
}
