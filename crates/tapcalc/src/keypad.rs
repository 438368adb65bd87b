//! Keypad layout
//!
//! Button captions are the wire format between the presentation layer and
//! the engine: a caption pressed on screen is looked up here to get its
//! [`Key`].

use std::fmt::Write as _;

use crate::core::{BinaryOp, CalcError, CalcResult, EntryKey, Key, Operation};

/// A single keypad button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadButton {
    /// Caption shown on the button
    pub label: &'static str,
    /// Key sent when pressed
    pub key: Key,
    /// Grid row (0-indexed)
    pub row: usize,
    /// First grid column (0-indexed)
    pub col: usize,
    /// Number of columns covered
    pub span: usize,
}

impl KeypadButton {
    fn entry(key: EntryKey, label: &'static str, row: usize, col: usize) -> Self {
        Self {
            label,
            key: Key::Entry(key),
            row,
            col,
            span: 1,
        }
    }

    fn operation(op: Operation, row: usize, col: usize) -> Self {
        Self {
            label: op.symbol(),
            key: Key::Operation(op),
            row,
            col,
            span: 1,
        }
    }

    const fn wide(mut self, span: usize) -> Self {
        self.span = span;
        self
    }

    /// Returns true if the button covers the cell
    #[must_use]
    pub const fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && col >= self.col && col < self.col + self.span
    }

    /// Returns true for ÷ × - +
    #[must_use]
    pub const fn is_binary_operator(&self) -> bool {
        matches!(self.key, Key::Operation(Operation::Binary(_)))
    }
}

/// The keypad layout - a 5x4 grid of buttons
/// ```text
/// [AC ] [+/-] [ % ] [ ÷ ]
/// [ 7 ] [ 8 ] [ 9 ] [ × ]
/// [ 4 ] [ 5 ] [ 6 ] [ - ]
/// [ 1 ] [ 2 ] [ 3 ] [ + ]
/// [    0    ] [ . ] [ = ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Buttons in row-major order
    buttons: Vec<KeypadButton>,
    /// Number of columns
    cols: usize,
    /// Number of rows
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard calculator keypad
    #[must_use]
    pub fn new() -> Self {
        let d = |n: u8, row, col| {
            KeypadButton::entry(EntryKey::Digit(n), DIGITS[usize::from(n)], row, col)
        };
        let op = KeypadButton::operation;
        let bin = |b: BinaryOp, row, col| KeypadButton::operation(Operation::Binary(b), row, col);

        let buttons = vec![
            // Row 1: AC +/- % ÷
            op(Operation::AllClear, 0, 0),
            op(Operation::SignFlip, 0, 1),
            op(Operation::Percent, 0, 2),
            bin(BinaryOp::Divide, 0, 3),
            // Row 2: 7 8 9 ×
            d(7, 1, 0),
            d(8, 1, 1),
            d(9, 1, 2),
            bin(BinaryOp::Multiply, 1, 3),
            // Row 3: 4 5 6 -
            d(4, 2, 0),
            d(5, 2, 1),
            d(6, 2, 2),
            bin(BinaryOp::Subtract, 2, 3),
            // Row 4: 1 2 3 +
            d(1, 3, 0),
            d(2, 3, 1),
            d(3, 3, 2),
            bin(BinaryOp::Add, 3, 3),
            // Row 5: 0 (wide) . =
            d(0, 4, 0).wide(2),
            KeypadButton::entry(EntryKey::Decimal, ".", 4, 2),
            op(Operation::Equals, 4, 3),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets the button covering a grid cell
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < self.rows && col < self.cols {
            self.buttons.iter().find(|b| b.covers(row, col))
        } else {
            None
        }
    }

    /// Finds a button by its caption
    #[must_use]
    pub fn find_button_by_label(&self, label: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.label == label)
    }

    /// Finds the button that sends a key
    #[must_use]
    pub fn find_button_by_key(&self, key: Key) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.key == key)
    }

    /// Resolves a caption to its key
    pub fn key_for(&self, label: &str) -> CalcResult<Key> {
        self.find_button_by_label(label)
            .map(|b| b.key)
            .ok_or_else(|| CalcError::UnknownKey(label.to_string()))
    }

    /// Returns an iterator over all buttons
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Renders the grid as text, highlighting `selected` with `>` `<`
    #[must_use]
    pub fn render(&self, selected: Option<BinaryOp>) -> String {
        let mut out = String::new();
        for row in 0..self.rows {
            let mut cells = Vec::with_capacity(self.cols);
            for btn in self.buttons.iter().filter(|b| b.row == row) {
                let width = 5 * btn.span + (btn.span - 1);
                let is_selected = selected.is_some_and(|s| btn.key == Key::from(s));
                let (open, close) = if is_selected { ('>', '<') } else { ('[', ']') };
                cells.push(format!("{open}{:^w$}{close}", btn.label, w = width - 2));
            }
            let _ = writeln!(out, "{}", cells.join(" "));
        }
        out
    }
}

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

#[cfg(test)]
mod tests {
    use super::*;

    // ===== KeypadButton tests =====

    #[test]
    fn test_button_covers_span() {
        let keypad = Keypad::new();
        let zero = keypad.find_button_by_label("0").unwrap();
        assert_eq!(zero.span, 2);
        assert!(zero.covers(4, 0));
        assert!(zero.covers(4, 1));
        assert!(!zero.covers(4, 2));
    }

    #[test]
    fn test_button_is_binary_operator() {
        let keypad = Keypad::new();
        assert!(keypad.find_button_by_label("×").unwrap().is_binary_operator());
        assert!(!keypad.find_button_by_label("=").unwrap().is_binary_operator());
        assert!(!keypad.find_button_by_label("7").unwrap().is_binary_operator());
    }

    // ===== Keypad tests =====

    #[test]
    fn test_keypad_new() {
        let keypad = Keypad::new();
        assert_eq!(keypad.button_count(), 19);
        assert_eq!(keypad.dimensions(), (5, 4));
    }

    #[test]
    fn test_keypad_rows() {
        let keypad = Keypad::new();
        let row = |r| -> Vec<&'static str> {
            (0..4)
                .map(|c| keypad.get_button_at(r, c).unwrap().label)
                .collect()
        };
        assert_eq!(row(0), vec!["AC", "+/-", "%", "÷"]);
        assert_eq!(row(1), vec!["7", "8", "9", "×"]);
        assert_eq!(row(2), vec!["4", "5", "6", "-"]);
        assert_eq!(row(3), vec!["1", "2", "3", "+"]);
        assert_eq!(row(4), vec!["0", "0", ".", "="]);
    }

    #[test]
    fn test_keypad_get_button_at_out_of_bounds() {
        let keypad = Keypad::new();
        assert!(keypad.get_button_at(5, 0).is_none());
        assert!(keypad.get_button_at(0, 4).is_none());
    }

    #[test]
    fn test_keypad_every_operation_has_button() {
        let keypad = Keypad::new();
        for op in Operation::ALL {
            let btn = keypad.find_button_by_key(Key::Operation(op)).unwrap();
            assert_eq!(btn.label, op.symbol());
        }
    }

    #[test]
    fn test_keypad_every_digit_has_button() {
        let keypad = Keypad::new();
        for d in 0..=9 {
            let key = Key::Entry(EntryKey::Digit(d));
            assert_eq!(keypad.find_button_by_key(key).unwrap().label, key.caption());
        }
    }

    #[test]
    fn test_keypad_key_for() {
        let keypad = Keypad::new();
        assert_eq!(keypad.key_for("+/-"), Ok(Key::Operation(Operation::SignFlip)));
        assert_eq!(keypad.key_for("."), Ok(Key::Entry(EntryKey::Decimal)));
        assert_eq!(keypad.key_for("*"), Err(CalcError::UnknownKey("*".into())));
    }

    #[test]
    fn test_keypad_labels_unique() {
        let keypad = Keypad::new();
        let mut labels: Vec<_> = keypad.buttons().map(|b| b.label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), keypad.button_count());
    }

    #[test]
    fn test_keypad_render() {
        let keypad = Keypad::new();
        let text = keypad.render(None);
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().next().unwrap().contains("AC"));
        assert!(!text.contains('>'));
    }

    #[test]
    fn test_keypad_render_selected() {
        let keypad = Keypad::new();
        let text = keypad.render(Some(BinaryOp::Add));
        assert!(text.contains("> + <"));
        assert!(text.contains("[ - ]"));
    }
}
