//! TUI rendering.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::tui::app::TuiApp;
use crate::tui::keypad::KeypadWidget;

/// Keyboard shortcuts shown in the help sidebar.
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9 .", "enter digits"),
    ("+ - * /", "operators"),
    ("Enter =", "evaluate"),
    ("Esc C", "clear"),
    ("Bksp", "delete last"),
    ("Ctrl+C", "quit"),
];

/// The screen regions of the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    /// Display line showing the buffer.
    pub display: Rect,
    /// Error-message line.
    pub message: Rect,
    /// Session history tape.
    pub history: Rect,
    /// On-screen keypad (mouse hit-testing uses this).
    pub keypad: Rect,
    /// Help sidebar.
    pub help: Rect,
}

/// Splits the terminal into the calculator regions. The event loop uses
/// the same split to hit-test mouse clicks against the keypad.
#[must_use]
pub fn layout(area: Rect) -> Areas {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([
            Constraint::Min(30),    // Main calculator column
            Constraint::Length(20), // Keypad
            Constraint::Length(24), // Help sidebar
        ])
        .split(area);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Display
            Constraint::Length(3), // Message
            Constraint::Min(5),    // History
        ])
        .split(columns[0]);

    Areas {
        display: main[0],
        message: main[1],
        history: main[2],
        keypad: columns[1],
        help: columns[2],
    }
}

/// Renders the calculator UI to the frame.
pub fn render<E>(app: &TuiApp<E>, frame: &mut Frame) {
    let areas = layout(frame.area());

    render_display(app, areas.display, frame);
    render_message(app, areas.message, frame);
    render_history(app, areas.history, frame);
    frame.render_widget(KeypadWidget::new(app.keypad()), areas.keypad);
    render_help(areas.help, frame);
}

fn render_display<E>(app: &TuiApp<E>, area: Rect, frame: &mut Frame) {
    let title = if app.busy() {
        " Display (evaluating…) "
    } else {
        " Display "
    };

    let display = Paragraph::new(Span::styled(
        app.display_text(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Right)
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(display, area);
}

fn render_message<E>(app: &TuiApp<E>, area: Rect, frame: &mut Frame) {
    let message = Paragraph::new(Span::styled(
        app.error_text(),
        Style::default().fg(Color::Red),
    ))
    .block(
        Block::default()
            .title(" Message ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(message, area);
}

fn render_history<E>(app: &TuiApp<E>, area: Rect, frame: &mut Frame) {
    let items: Vec<ListItem> = app
        .history()
        .iter_rev()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(entry.expression.clone(), Style::default().fg(Color::Gray)),
                Span::raw(" = "),
                Span::styled(entry.result.clone(), Style::default().fg(Color::Green)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" History ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(list, area);
}

fn render_help(area: Rect, frame: &mut Frame) {
    let items: Vec<ListItem> = HELP_SHORTCUTS
        .iter()
        .map(|(key, desc)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{key:>8}"), Style::default().fg(Color::Yellow)),
                Span::raw(" "),
                Span::styled(*desc, Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(list, area);
}
