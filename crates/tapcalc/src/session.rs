//! Headless display session
//!
//! Holds what a screen would hold: the display text and which binary
//! operator button is highlighted. Every press goes through the [`Engine`].

use tracing::debug;

use crate::core::{BinaryOp, CalcConfig, CalcResult, Engine, Key};
use crate::keypad::Keypad;

/// Calculator session: engine plus display
#[derive(Debug, Clone)]
pub struct Session {
    /// Arithmetic engine
    engine: Engine,
    /// Text currently on the display
    display: String,
    /// Highlighted binary operator button
    selected: Option<BinaryOp>,
    /// Caption lookup
    keypad: Keypad,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session showing `0`
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(Engine::new())
    }

    /// Creates a session from a configuration
    #[must_use]
    pub fn with_config(config: &CalcConfig) -> Self {
        Self::with_engine(Engine::with_config(config))
    }

    fn with_engine(engine: Engine) -> Self {
        Self {
            engine,
            display: "0".to_string(),
            selected: None,
            keypad: Keypad::new(),
        }
    }

    /// Returns the display text
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Returns the highlighted binary operator
    #[must_use]
    pub const fn selected_operator(&self) -> Option<BinaryOp> {
        self.selected
    }

    /// Returns the engine
    #[must_use]
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns the keypad layout
    #[must_use]
    pub const fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns true if the display shows the error token
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.display == self.engine.error_display()
    }

    /// Reads the display as a number; the error token reads as `0`
    #[must_use]
    pub fn display_value(&self) -> f64 {
        if self.is_error() {
            return 0.0;
        }
        self.engine
            .formatter()
            .parse_display(&self.display)
            .unwrap_or_else(|e| {
                debug!(error = %e, "unreadable display, using 0");
                0.0
            })
    }

    /// Shows a value, or the error token for `None` and out-of-range values
    pub fn set_display_value(&mut self, value: Option<f64>) {
        let formatted = value
            .filter(|v| self.engine.validator().is_valid(*v))
            .and_then(|v| self.engine.formatter().format_number(v).ok());

        self.display = formatted.unwrap_or_else(|| self.engine.error_display().to_string());
    }

    /// Presses a key
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Entry(entry) => {
                self.selected = None;
                self.display = self.engine.append(entry, &self.display);
            }
            Key::Operation(op) => {
                self.selected = op.binary();
                let value = self.display_value();
                let result = self.engine.make(op, value);
                self.set_display_value(result);
            }
        }
        debug!(key = %key.caption(), display = %self.display, "pressed");
    }

    /// Presses the button with the given caption
    pub fn press_caption(&mut self, caption: &str) -> CalcResult<()> {
        let key = self.keypad.key_for(caption)?;
        self.press(key);
        Ok(())
    }

    /// Presses each caption in order, returning the display after each press
    pub fn press_all<'a, I>(&mut self, captions: I) -> CalcResult<Vec<String>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        captions
            .into_iter()
            .map(|caption| -> CalcResult<String> {
                self.press_caption(caption)?;
                Ok(self.display.clone())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CalcError, EntryKey, Operation, ERROR_DISPLAY};

    fn session_after(captions: &[&str]) -> Session {
        let mut session = Session::new();
        session.press_all(captions.iter().copied()).unwrap();
        session
    }

    #[test]
    fn test_session_new() {
        let session = Session::new();
        assert_eq!(session.display(), "0");
        assert_eq!(session.selected_operator(), None);
        assert!(session.engine().state().is_initial());
    }

    #[test]
    fn test_session_typing() {
        let session = session_after(&["1", "2", "3", "4", ".", "5"]);
        assert_eq!(session.display(), "1,234.5");
        assert_eq!(session.display_value(), 1234.5);
    }

    #[test]
    fn test_session_repeated_equals_progression() {
        let mut session = Session::new();
        let shown = session.press_all(["5", "+", "3", "=", "="]).unwrap();
        assert_eq!(shown, vec!["5", "5", "3", "8", "11"]);
    }

    #[test]
    fn test_session_selection_follows_binary_operator() {
        let mut session = Session::new();
        session.press_caption("7").unwrap();
        session.press_caption("×").unwrap();
        assert_eq!(session.selected_operator(), Some(BinaryOp::Multiply));
        session.press_caption("-").unwrap();
        assert_eq!(session.selected_operator(), Some(BinaryOp::Subtract));
        session.press_caption("2").unwrap();
        assert_eq!(session.selected_operator(), None);
    }

    #[test]
    fn test_session_unary_operations_clear_selection() {
        let mut session = session_after(&["8", "÷"]);
        session.press_caption("+/-").unwrap();
        assert_eq!(session.selected_operator(), None);
        assert_eq!(session.display(), "-8");
    }

    #[test]
    fn test_session_sign_flip_on_zero_starts_negative_entry() {
        let mut session = Session::new();
        let shown = session.press_all(["+/-", "5", "."]).unwrap();
        assert_eq!(shown, vec!["-0", "-5", "-5."]);
        session.press_all(["2", "+", "1", "="]).unwrap();
        assert_eq!(session.display(), "-4.2");
    }

    #[test]
    fn test_session_fifth_fraction_digit_rounds_half_even() {
        let mut session = Session::new();
        let shown = session.press_all(["0", ".", "1", "2", "3", "4", "5"]).unwrap();
        assert_eq!(shown, vec!["0", "0.", "0.1", "0.12", "0.123", "0.1234", "0.1234"]);
    }

    #[test]
    fn test_session_percent() {
        let session = session_after(&["5", "0", "%"]);
        assert_eq!(session.display(), "0.5");
    }

    #[test]
    fn test_session_divide_by_zero_shows_error() {
        let session = session_after(&["9", "÷", "0", "="]);
        assert_eq!(session.display(), ERROR_DISPLAY);
        assert!(session.is_error());
        assert_eq!(session.display_value(), 0.0);
        assert!(session.engine().state().is_initial());
    }

    #[test]
    fn test_session_recovers_from_error() {
        let mut session = session_after(&["9", "÷", "0", "="]);
        session.press_all(["4", "+", "1", "="]).unwrap();
        assert_eq!(session.display(), "5");
    }

    #[test]
    fn test_session_all_clear() {
        let mut session = session_after(&["1", "2", "×", "3"]);
        session.press(Key::Operation(Operation::AllClear));
        assert_eq!(session.display(), "0");
        assert!(session.engine().state().is_initial());
    }

    #[test]
    fn test_set_display_value_out_of_range() {
        let mut session = Session::new();
        session.set_display_value(Some(1e12));
        assert_eq!(session.display(), ERROR_DISPLAY);
        session.set_display_value(Some(-2.5));
        assert_eq!(session.display(), "-2.5");
        session.set_display_value(None);
        assert_eq!(session.display(), ERROR_DISPLAY);
    }

    #[test]
    fn test_percent_rounds_tiny_values() {
        let session = session_after(&["1", "%", "%"]);
        assert_eq!(session.display(), "0.0001");
        let session = session_after(&["1", "%", "%", "%"]);
        assert_eq!(session.display(), "0");
    }

    #[test]
    fn test_press_unknown_caption() {
        let mut session = Session::new();
        assert_eq!(
            session.press_caption("sqrt"),
            Err(CalcError::UnknownKey("sqrt".into()))
        );
        assert_eq!(session.display(), "0");
    }

    #[test]
    fn test_press_entry_key_directly() {
        let mut session = Session::new();
        session.press(Key::Entry(EntryKey::Digit(4)));
        session.press(Key::Entry(EntryKey::Decimal));
        assert_eq!(session.display(), "4.");
    }

    #[test]
    fn test_session_custom_error_token() {
        let config = CalcConfig::new().with_error_display("E");
        let mut session = Session::with_config(&config);
        session.press_all(["1", "÷", "0", "="]).unwrap();
        assert_eq!(session.display(), "E");
        session.press_caption("6").unwrap();
        assert_eq!(session.display(), "6");
    }
}
