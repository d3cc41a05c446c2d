//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change based on the current application mode.
//! The same registry drives key dispatch, the navigation bar and the help overlay.

use crate::app::AppMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    Backspace,
    ToggleExclusion,
    Calculate,
    ClearResult,
    AddUnit,
    RemoveUnit,
    Confirm,
    Cancel,
    Help,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Whether `event` triggers this binding
    pub fn matches(&self, event: &KeyEvent) -> bool {
        // Shift is implied by the character for keys like '?'
        let modifiers = event.modifiers.difference(KeyModifiers::SHIFT);
        self.key == event.code && self.modifiers == modifiers
    }
}

/// A section of help content
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}

/// An item in the navigation bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<AppMode, Vec<Keybinding>>,
    /// Global keybindings (available while no dialog is open)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all modes
    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        // Calculator form
        self.mode_bindings.insert(
            AppMode::Calculator,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous field"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next field"),
                Keybinding::new(KeyCode::Tab, KeyAction::NavigateDown, "Tab", "Next field"),
                Keybinding::new(KeyCode::Backspace, KeyAction::Backspace, "Bksp", "Delete digit"),
                Keybinding::new(
                    KeyCode::Char(' '),
                    KeyAction::ToggleExclusion,
                    "Space",
                    "Exclude/include unit",
                ),
                Keybinding::new(KeyCode::Enter, KeyAction::Calculate, "Enter", "Calculate"),
                Keybinding::new(KeyCode::Char('c'), KeyAction::ClearResult, "C", "Clear result"),
                Keybinding::new(KeyCode::Char('a'), KeyAction::AddUnit, "A", "Add unit"),
                Keybinding::new(KeyCode::Char('d'), KeyAction::RemoveUnit, "D", "Remove unit"),
                Keybinding::new(KeyCode::Delete, KeyAction::RemoveUnit, "Del", "Remove unit"),
                Keybinding::new(KeyCode::Esc, KeyAction::Quit, "Esc", "Quit"),
            ],
        );

        // Add-unit dialog
        self.mode_bindings.insert(
            AppMode::AddUnit,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::Confirm, "Enter", "Add"),
                Keybinding::new(KeyCode::Esc, KeyAction::Cancel, "Esc", "Cancel"),
            ],
        );
    }

    /// Get keybindings for a specific mode (includes global bindings)
    pub fn get_bindings(&self, mode: &AppMode) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(mode_bindings) = self.mode_bindings.get(mode) {
            bindings.extend(mode_bindings.iter());
        }

        // Dialogs take all keys as text
        if *mode != AppMode::AddUnit {
            bindings.extend(self.global_bindings.iter());
        }

        bindings
    }

    /// Resolve a key event to an action in `mode`
    pub fn resolve(&self, mode: &AppMode, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(mode)
            .into_iter()
            .find(|b| b.matches(event))
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, mode: &AppMode) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(mode);

        let priority_actions = match mode {
            AppMode::Calculator => vec![
                KeyAction::NavigateUp,
                KeyAction::NavigateDown,
                KeyAction::Calculate,
                KeyAction::ToggleExclusion,
                KeyAction::AddUnit,
                KeyAction::RemoveUnit,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::AddUnit => vec![KeyAction::Confirm, KeyAction::Cancel],
        };

        let mut items: Vec<NavBarItem> = Vec::new();
        let mut has_nav = false;

        for action in priority_actions {
            let is_nav = matches!(action, KeyAction::NavigateUp | KeyAction::NavigateDown);
            if is_nav && has_nav {
                continue;
            }

            if let Some(binding) = bindings.iter().find(|b| b.action == action) {
                if is_nav {
                    items.push(NavBarItem {
                        key_display: "Up/Dn".to_string(),
                        action_label: "Navigate".to_string(),
                    });
                    has_nav = true;
                } else {
                    items.push(NavBarItem {
                        key_display: binding.display.clone(),
                        action_label: binding.description.clone(),
                    });
                }
            }
        }

        items
    }

    /// Build help sections for `mode`
    pub fn get_help_content(&self, mode: &AppMode) -> Vec<HelpSection> {
        let mut sections = Vec::new();

        if let Some(mode_bindings) = self.mode_bindings.get(mode) {
            sections.push(HelpSection {
                title: match mode {
                    AppMode::Calculator => "Calculator".to_string(),
                    AppMode::AddUnit => "Add Unit".to_string(),
                },
                items: mode_bindings
                    .iter()
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect(),
            });
        }

        if *mode == AppMode::Calculator {
            sections.push(HelpSection {
                title: "Fields".to_string(),
                items: vec![
                    ("0-9".to_string(), "Type into the target or the selected cap".to_string()),
                    ("Cap".to_string(), "Empty or 0 leaves the unit uncapped".to_string()),
                ],
            });
        }

        sections.push(HelpSection {
            title: "Global".to_string(),
            items: self
                .global_bindings
                .iter()
                .map(|b| (b.display.clone(), b.description.clone()))
                .collect(),
        });

        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_resolve_calculator_keys() {
        let ctx = KeybindingContext::new();
        let mode = AppMode::Calculator;
        assert_eq!(ctx.resolve(&mode, &key(KeyCode::Enter)), Some(KeyAction::Calculate));
        assert_eq!(
            ctx.resolve(&mode, &key(KeyCode::Char(' '))),
            Some(KeyAction::ToggleExclusion)
        );
        assert_eq!(ctx.resolve(&mode, &key(KeyCode::Char('q'))), Some(KeyAction::Quit));
        assert_eq!(ctx.resolve(&mode, &key(KeyCode::Char('5'))), None);
    }

    #[test]
    fn test_shifted_question_mark_is_help() {
        let ctx = KeybindingContext::new();
        let event = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(ctx.resolve(&AppMode::Calculator, &event), Some(KeyAction::Help));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctx = KeybindingContext::new();
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(ctx.resolve(&AppMode::Calculator, &event), Some(KeyAction::Quit));
        assert_eq!(
            ctx.resolve(&AppMode::Calculator, &key(KeyCode::Char('c'))),
            Some(KeyAction::ClearResult)
        );
    }

    #[test]
    fn test_dialog_has_no_globals() {
        let ctx = KeybindingContext::new();
        assert_eq!(ctx.resolve(&AppMode::AddUnit, &key(KeyCode::Char('q'))), None);
        assert_eq!(ctx.resolve(&AppMode::AddUnit, &key(KeyCode::Esc)), Some(KeyAction::Cancel));
    }

    #[test]
    fn test_nav_items_combine_navigation() {
        let ctx = KeybindingContext::new();
        let items = ctx.get_nav_items(&AppMode::Calculator);
        assert_eq!(items.iter().filter(|i| i.action_label == "Navigate").count(), 1);
        assert!(items.iter().any(|i| i.action_label == "Calculate"));
    }

    #[test]
    fn test_help_content_has_global_section() {
        let ctx = KeybindingContext::new();
        let sections = ctx.get_help_content(&AppMode::Calculator);
        assert!(sections.iter().any(|s| s.title == "Global"));
        assert!(sections.iter().any(|s| s.title == "Fields"));
    }
}
