//! Calculator driver abstraction
//!
//! Keypad behaviour is specified once against [`CalculatorDriver`] and run
//! against every front end that implements it.

use crate::core::{BinaryOp, CalcResult, ERROR_DISPLAY};
use crate::session::Session;

/// Abstract driver trait for keypad interactions
///
/// # Example
///
/// ```rust
/// use tapcalc::driver::verify_repeated_equals;
/// use tapcalc::session::Session;
///
/// let mut driver = Session::new();
/// verify_repeated_equals(&mut driver);
/// ```
pub trait CalculatorDriver {
    /// Presses the button with the given caption
    fn press(&mut self, caption: &str) -> CalcResult<()>;

    /// Gets the current display text
    fn display(&self) -> String;

    /// Gets the highlighted binary operator
    fn selected_operator(&self) -> Option<BinaryOp>;

    /// Presses AC
    fn clear(&mut self) -> CalcResult<()> {
        self.press("AC")
    }

    /// Presses each caption in order
    fn press_sequence(&mut self, captions: &[&str]) -> CalcResult<()> {
        captions.iter().try_for_each(|c| self.press(c))
    }
}

impl CalculatorDriver for Session {
    fn press(&mut self, caption: &str) -> CalcResult<()> {
        self.press_caption(caption)
    }

    fn display(&self) -> String {
        Session::display(self).to_string()
    }

    fn selected_operator(&self) -> Option<BinaryOp> {
        Session::selected_operator(self)
    }
}

// ===== Reusable keypad specifications =====

/// Verifies the four binary operators
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    let cases: [(&[&str], &str); 4] = [
        (&["2", "+", "3", "="], "5"),
        (&["1", "0", "-", "4", "="], "6"),
        (&["6", "×", "7", "="], "42"),
        (&["2", "0", "÷", "8", "="], "2.5"),
    ];
    for (captions, expected) in cases {
        driver.clear().unwrap();
        driver.press_sequence(captions).unwrap();
        assert_eq!(driver.display(), expected, "after {captions:?}");
    }
    driver.clear().unwrap();
}

/// Verifies `5 + 3 = =` shows `8` then `11`
pub fn verify_repeated_equals<D: CalculatorDriver>(driver: &mut D) {
    driver.clear().unwrap();
    driver.press_sequence(&["5", "+", "3", "="]).unwrap();
    assert_eq!(driver.display(), "8");
    driver.press("=").unwrap();
    assert_eq!(driver.display(), "11");
    driver.clear().unwrap();
}

/// Verifies operators fold left to right without precedence
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) {
    driver.clear().unwrap();
    driver.press_sequence(&["2", "+", "3", "×"]).unwrap();
    assert_eq!(driver.display(), "5");
    driver.press_sequence(&["4", "="]).unwrap();
    assert_eq!(driver.display(), "20");
    driver.clear().unwrap();
}

/// Verifies grouping and the decimal point while typing
pub fn verify_entry_formatting<D: CalculatorDriver>(driver: &mut D) {
    driver.clear().unwrap();
    driver
        .press_sequence(&["1", "2", "3", "4", "5", "6", ".", ".", "7"])
        .unwrap();
    assert_eq!(driver.display(), "123,456.7");
    driver.clear().unwrap();
}

/// Verifies invalid results show the error token and recover
pub fn verify_error_handling<D: CalculatorDriver>(driver: &mut D) {
    driver.clear().unwrap();
    driver.press_sequence(&["7", "÷", "0", "="]).unwrap();
    assert_eq!(driver.display(), ERROR_DISPLAY);

    driver.press_sequence(&["2", "×", "3", "="]).unwrap();
    assert_eq!(driver.display(), "6");
    driver.clear().unwrap();
}

/// Verifies binary operator highlighting
pub fn verify_selection<D: CalculatorDriver>(driver: &mut D) {
    driver.clear().unwrap();
    driver.press_sequence(&["4", "+"]).unwrap();
    assert_eq!(driver.selected_operator(), Some(BinaryOp::Add));
    driver.press("1").unwrap();
    assert_eq!(driver.selected_operator(), None);
    driver.clear().unwrap();
}

/// Complete verification suite
pub fn run_full_specification<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_repeated_equals(driver);
    verify_chaining(driver);
    verify_entry_formatting(driver);
    verify_error_handling(driver);
    verify_selection(driver);
}
