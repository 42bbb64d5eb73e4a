//! On-screen keypad for mouse input.
//!
//! Every button maps to the same [`KeyAction`] its keyboard shortcut
//! produces, so clicking `[×]` and pressing `*` mutate the display
//! identically.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::core::MULTIPLY_GLYPH;
use crate::tui::input::KeyAction;

/// What a keypad button does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Append a digit (0-9).
    Digit(u8),
    /// Append the decimal point.
    Decimal,
    /// Append an operator glyph as shown on the button.
    Operator(char),
    /// Evaluate the expression.
    Equals,
    /// Clear the display.
    Clear,
    /// Delete the last character.
    Delete,
    /// Empty grid cell.
    Blank,
}

impl ButtonAction {
    /// Maps the button to the calculator action it triggers.
    #[must_use]
    pub fn to_key_action(self) -> KeyAction {
        match self {
            Self::Digit(d) => {
                char::from_digit(u32::from(d), 10).map_or(KeyAction::None, KeyAction::Append)
            }
            Self::Decimal => KeyAction::Append('.'),
            Self::Operator(op) => KeyAction::Append(op),
            Self::Equals => KeyAction::Evaluate,
            Self::Clear => KeyAction::Clear,
            Self::Delete => KeyAction::DeleteLast,
            Self::Blank => KeyAction::None,
        }
    }
}

/// A single keypad button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The character shown on the button.
    pub label: char,
    /// Whether the button is currently highlighted.
    pub pressed: bool,
    /// The action this button performs.
    pub action: ButtonAction,
}

impl KeypadButton {
    /// Creates a digit button.
    #[must_use]
    pub fn digit(d: u8) -> Self {
        Self {
            label: char::from_digit(u32::from(d), 10).unwrap_or('?'),
            pressed: false,
            action: ButtonAction::Digit(d),
        }
    }

    /// Creates an operator button; the label is what gets appended.
    #[must_use]
    pub fn operator(op: char) -> Self {
        Self {
            label: op,
            pressed: false,
            action: ButtonAction::Operator(op),
        }
    }

    /// Creates the decimal point button.
    #[must_use]
    pub fn decimal() -> Self {
        Self {
            label: '.',
            pressed: false,
            action: ButtonAction::Decimal,
        }
    }

    /// Creates the equals button.
    #[must_use]
    pub fn equals() -> Self {
        Self {
            label: '=',
            pressed: false,
            action: ButtonAction::Equals,
        }
    }

    /// Creates the clear button.
    #[must_use]
    pub fn clear() -> Self {
        Self {
            label: 'C',
            pressed: false,
            action: ButtonAction::Clear,
        }
    }

    /// Creates the delete-last button.
    #[must_use]
    pub fn delete() -> Self {
        Self {
            label: '⌫',
            pressed: false,
            action: ButtonAction::Delete,
        }
    }

    /// Creates an empty grid cell.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            label: ' ',
            pressed: false,
            action: ButtonAction::Blank,
        }
    }

    /// Sets the highlighted state.
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }
}

/// The keypad layout, a 5x4 grid:
/// ```text
/// [ C ] [ ⌫ ] [ × ] [ / ]
/// [ 7 ] [ 8 ] [ 9 ] [ - ]
/// [ 4 ] [ 5 ] [ 6 ] [ + ]
/// [ 1 ] [ 2 ] [ 3 ] [ = ]
/// [ 0 ] [ . ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Buttons in row-major order.
    buttons: Vec<KeypadButton>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad.
    #[must_use]
    pub fn new() -> Self {
        let buttons = vec![
            // Row 1: C ⌫ × /
            KeypadButton::clear(),
            KeypadButton::delete(),
            KeypadButton::operator(MULTIPLY_GLYPH),
            KeypadButton::operator('/'),
            // Row 2: 7 8 9 -
            KeypadButton::digit(7),
            KeypadButton::digit(8),
            KeypadButton::digit(9),
            KeypadButton::operator('-'),
            // Row 3: 4 5 6 +
            KeypadButton::digit(4),
            KeypadButton::digit(5),
            KeypadButton::digit(6),
            KeypadButton::operator('+'),
            // Row 4: 1 2 3 =
            KeypadButton::digit(1),
            KeypadButton::digit(2),
            KeypadButton::digit(3),
            KeypadButton::equals(),
            // Row 5: 0 .
            KeypadButton::digit(0),
            KeypadButton::decimal(),
            KeypadButton::blank(),
            KeypadButton::blank(),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of grid cells.
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols).
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets a button by index.
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Finds a button by its label character.
    #[must_use]
    pub fn find_button_by_label(&self, label: char) -> Option<usize> {
        self.buttons.iter().position(|b| b.label == label)
    }

    /// Highlights the button that a calculator action corresponds to,
    /// releasing all others.
    pub fn highlight_action(&mut self, action: KeyAction) {
        self.release_all();
        if let Some(idx) = self
            .buttons
            .iter()
            .position(|b| b.action != ButtonAction::Blank && b.action.to_key_action() == action)
        {
            if let Some(btn) = self.buttons.get_mut(idx) {
                btn.set_pressed(true);
            }
        }
    }

    /// Releases all buttons.
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.set_pressed(false);
        }
    }

    /// Returns an iterator over buttons with their (row, col) positions.
    pub fn buttons_with_positions(&self) -> impl Iterator<Item = ((usize, usize), &KeypadButton)> {
        self.buttons.iter().enumerate().map(move |(i, btn)| {
            let row = i / self.cols;
            let col = i % self.cols;
            ((row, col), btn)
        })
    }

    /// Converts a click position inside `area` to a button index.
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // Skip the border cells.
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        let btn_width = (area.width - 2) / self.cols as u16;
        let btn_height = (area.height - 2) / self.rows as u16;
        if btn_width == 0 || btn_height == 0 {
            return None;
        }

        let col = ((rel_x - 1) / btn_width) as usize;
        let row = ((rel_y - 1) / btn_height) as usize;

        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    /// Converts a click position to the calculator action of the button
    /// under it, if any.
    #[must_use]
    pub fn hit_test_action(&self, area: Rect, x: u16, y: u16) -> Option<KeyAction> {
        let idx = self.hit_test(area, x, y)?;
        let btn = self.buttons.get(idx)?;
        match btn.action {
            ButtonAction::Blank => None,
            action => Some(action.to_key_action()),
        }
    }
}

/// Keypad widget for rendering.
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget.
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self { keypad }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        if inner.width < 4 || inner.height < 5 {
            return; // Too small to render
        }

        let btn_width = inner.width / self.keypad.cols as u16;
        let btn_height = inner.height / self.keypad.rows as u16;

        for ((row, col), btn) in self.keypad.buttons_with_positions() {
            if btn.action == ButtonAction::Blank {
                continue;
            }

            let x = inner.x + (col as u16 * btn_width);
            let y = inner.y + (row as u16 * btn_height);

            let style = if btn.pressed {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                match btn.action {
                    ButtonAction::Digit(_) | ButtonAction::Decimal => {
                        Style::default().fg(Color::White)
                    }
                    ButtonAction::Operator(_) => Style::default().fg(Color::Yellow),
                    ButtonAction::Equals => Style::default().fg(Color::Green),
                    ButtonAction::Clear | ButtonAction::Delete => Style::default().fg(Color::Red),
                    ButtonAction::Blank => Style::default(),
                }
            };

            if btn_width >= 3 {
                let label = format!("[{}]", btn.label);
                let label_x = x + (btn_width.saturating_sub(3)) / 2;
                let label_y = y + btn_height / 2;

                if label_y < inner.y + inner.height && label_x < inner.x + inner.width {
                    buf.set_span(label_x, label_y, &Span::styled(label, style), btn_width);
                }
            }
        }
    }
}
