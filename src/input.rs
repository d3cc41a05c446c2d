//! Input handling module
//!
//! Numeric text fields and the add-unit dialog. Fields only accept ASCII
//! digits, so anything the user types is either empty or a digit string.

use crossterm::event::{KeyCode, KeyEvent};

/// Digits in `u32::MAX`
const MAX_DIGITS: usize = 10;

/// A single-line numeric text field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field pre-filled with `value`
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Append a digit. Returns false if `c` was ignored.
    pub fn push(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() || self.value.len() >= MAX_DIGITS {
            return false;
        }
        self.value.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }
}

/// Result of feeding a key to a dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// User confirmed with the current text
    Confirm(String),
    /// User dismissed the dialog
    Cancel,
    /// Dialog is still open
    Continue,
}

/// Modal dialog collecting one number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDialog {
    pub title: String,
    pub instructions: String,
    pub input: TextInput,
    /// Why the last confirmation was rejected
    pub error: Option<String>,
}

impl InputDialog {
    /// Create a new input dialog
    pub fn new(title: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            instructions: instructions.into(),
            input: TextInput::new(),
            error: None,
        }
    }

    /// Dialog used to add a unit to the catalog
    pub fn add_unit() -> Self {
        Self::new("Add a New Ply", "Enter a new unit and press Enter")
    }

    /// Handle keyboard input for the dialog
    pub fn handle_input(&mut self, key_event: KeyEvent) -> InputResult {
        match key_event.code {
            KeyCode::Enter => return InputResult::Confirm(self.input.value().to_string()),
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Backspace => {
                self.input.backspace();
                self.error = None;
            }
            KeyCode::Char(c) => {
                if self.input.push(c) {
                    self.error = None;
                }
            }
            _ => {}
        }
        InputResult::Continue
    }

    /// Keep the dialog open and show why the value was refused
    pub fn reject(&mut self, reason: impl Into<String>) {
        self.error = Some(reason.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_text_input_digits_only() {
        let mut input = TextInput::new();
        assert!(input.push('1'));
        assert!(!input.push('a'));
        assert!(!input.push('-'));
        assert!(input.push('0'));
        assert_eq!(input.value(), "10");
        input.backspace();
        assert_eq!(input.value(), "1");
    }

    #[test]
    fn test_text_input_length_limit() {
        let mut input = TextInput::new();
        for _ in 0..20 {
            input.push('9');
        }
        assert_eq!(input.value().len(), MAX_DIGITS);
    }

    #[test]
    fn test_dialog_confirm_and_cancel() {
        let mut dialog = InputDialog::add_unit();
        assert_eq!(dialog.handle_input(key(KeyCode::Char('1'))), InputResult::Continue);
        assert_eq!(dialog.handle_input(key(KeyCode::Char('8'))), InputResult::Continue);
        assert_eq!(dialog.handle_input(key(KeyCode::Char('0'))), InputResult::Continue);
        assert_eq!(
            dialog.handle_input(key(KeyCode::Enter)),
            InputResult::Confirm("180".to_string())
        );
        assert_eq!(dialog.handle_input(key(KeyCode::Esc)), InputResult::Cancel);
    }

    #[test]
    fn test_dialog_error_clears_on_edit() {
        let mut dialog = InputDialog::add_unit();
        dialog.reject("230 is already in the catalog");
        assert!(dialog.error.is_some());
        dialog.handle_input(key(KeyCode::Backspace));
        assert!(dialog.error.is_none());
    }
}
