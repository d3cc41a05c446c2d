//! Application state definitions
//!
//! Everything the calculator screen shows lives here as plain data. The solver
//! never sees this struct; [`AppState::request`] copies the relevant parts into
//! a [`CalculationRequest`] for every calculation.

use crate::catalog::{Catalog, CatalogError};
use crate::components::keybindings::KeyAction;
use crate::config_file::CalculatorConfig;
use crate::engine::{calculate, CalculationRequest, CalculationResponse, MaxMultipliers, Unit};
use crate::input::{InputDialog, TextInput};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Application operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Main form: target, exclusions, caps, results
    Calculator,
    /// Add-unit dialog is open
    AddUnit,
}

/// The form row under the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    Target,
    Unit(Unit),
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current application mode
    pub mode: AppMode,
    pub catalog: Catalog,
    /// Target value as typed
    pub target: TextInput,
    /// Units left out of the next calculation
    pub excluded: BTreeSet<Unit>,
    /// Per-unit cap fields; empty means uncapped
    pub cap_inputs: BTreeMap<Unit, TextInput>,
    /// 0 is the target row, `i + 1` is catalog unit `i`
    pub selected_row: usize,
    /// Result of the last calculation
    pub outcome: Option<CalculationResponse>,
    /// Status message for user feedback
    pub status_message: String,
    /// Whether help overlay is visible
    pub help_visible: bool,
    pub add_unit_dialog: Option<InputDialog>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&CalculatorConfig::default())
    }
}

impl AppState {
    /// Seed the form from a configuration
    pub fn from_config(config: &CalculatorConfig) -> Self {
        let cap_inputs = config
            .max_multipliers
            .iter()
            .filter(|(_, max)| **max > 0)
            .map(|(unit, max)| (*unit, TextInput::with_value(max.to_string())))
            .collect();

        Self {
            mode: AppMode::Calculator,
            catalog: config.catalog.clone(),
            target: TextInput::new(),
            excluded: config.excluded.clone(),
            cap_inputs,
            selected_row: 0,
            outcome: None,
            status_message: "Enter a ply GSM and press Enter".to_string(),
            help_visible: false,
            add_unit_dialog: None,
        }
    }

    /// Number of form rows (target + one per unit)
    pub fn row_count(&self) -> usize {
        self.catalog.len() + 1
    }

    /// The row under the cursor
    pub fn selected(&self) -> FormRow {
        match self.selected_row {
            0 => FormRow::Target,
            i => self
                .catalog
                .units()
                .get(i - 1)
                .map_or(FormRow::Target, |&unit| FormRow::Unit(unit)),
        }
    }

    pub fn move_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_row + 1 < self.row_count() {
            self.selected_row += 1;
        }
    }

    /// The field edited by digit keys on the current row
    fn focused_field(&mut self) -> &mut TextInput {
        match self.selected() {
            FormRow::Target => &mut self.target,
            FormRow::Unit(unit) => self.cap_inputs.entry(unit).or_default(),
        }
    }

    /// Type a character into the focused field
    pub fn type_char(&mut self, c: char) -> bool {
        self.focused_field().push(c)
    }

    pub fn backspace(&mut self) {
        self.focused_field().backspace();
    }

    /// Flip whether the selected unit takes part in calculations
    pub fn toggle_exclusion(&mut self) {
        let FormRow::Unit(unit) = self.selected() else {
            return;
        };
        if !self.excluded.remove(&unit) {
            self.excluded.insert(unit);
            self.status_message = format!("{unit} excluded");
        } else {
            self.status_message = format!("{unit} included");
        }
    }

    pub fn is_excluded(&self, unit: Unit) -> bool {
        self.excluded.contains(&unit)
    }

    /// Caps currently entered. Empty fields and 0 are left out.
    pub fn max_multipliers(&self) -> MaxMultipliers {
        self.cap_inputs
            .iter()
            .filter_map(|(unit, input)| {
                input
                    .value()
                    .parse::<u32>()
                    .ok()
                    .filter(|&max| max > 0)
                    .map(|max| (*unit, max))
            })
            .collect()
    }

    /// Snapshot of the form as a calculation request
    pub fn request(&self) -> CalculationRequest {
        CalculationRequest::new(self.target.value(), self.catalog.units().to_vec())
            .with_excluded(self.excluded.iter().copied())
            .with_max_multipliers(self.max_multipliers())
    }

    /// Run the solver on the current form
    pub fn calculate(&mut self) {
        let response = calculate(&self.request());
        self.status_message = match &response {
            CalculationResponse::Ok { .. } => {
                format!("Total {} for target {}", response.total(), self.target.value())
            }
            CalculationResponse::Err { message } => message.clone(),
        };
        self.outcome = Some(response);
    }

    pub fn clear_result(&mut self) {
        self.outcome = None;
        self.status_message = "Result cleared".to_string();
    }

    pub fn open_add_unit(&mut self) {
        self.add_unit_dialog = Some(InputDialog::add_unit());
        self.mode = AppMode::AddUnit;
    }

    pub fn cancel_add_unit(&mut self) {
        self.add_unit_dialog = None;
        self.mode = AppMode::Calculator;
    }

    /// Try to add `input` to the catalog.
    ///
    /// On success the dialog closes; on rejection it stays open with the reason.
    pub fn submit_add_unit(&mut self, input: &str) -> Result<Unit, CatalogError> {
        match self.catalog.add_from_input(input) {
            Ok(unit) => {
                self.cancel_add_unit();
                self.status_message = format!("Added {unit}");
                Ok(unit)
            }
            Err(e) => {
                debug!(input, error = %e, "Unit rejected");
                if let Some(dialog) = self.add_unit_dialog.as_mut() {
                    dialog.reject(e.to_string());
                }
                Err(e)
            }
        }
    }

    /// Remove the selected unit together with its exclusion and cap
    pub fn remove_selected_unit(&mut self) -> Option<Unit> {
        let FormRow::Unit(unit) = self.selected() else {
            return None;
        };
        self.catalog.remove(unit).ok()?;
        self.excluded.remove(&unit);
        self.cap_inputs.remove(&unit);
        self.selected_row = self.selected_row.min(self.row_count() - 1);
        self.status_message = format!("Removed {unit}");
        Some(unit)
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Apply a calculator-mode action. Returns true if the app should exit.
    pub fn apply(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::NavigateUp => self.move_up(),
            KeyAction::NavigateDown => self.move_down(),
            KeyAction::Backspace => self.backspace(),
            KeyAction::ToggleExclusion => self.toggle_exclusion(),
            KeyAction::Calculate => self.calculate(),
            KeyAction::ClearResult => self.clear_result(),
            KeyAction::AddUnit => self.open_add_unit(),
            KeyAction::RemoveUnit => {
                self.remove_selected_unit();
            }
            KeyAction::Help => self.toggle_help(),
            KeyAction::Quit => {
                info!("Quit requested");
                return true;
            }
            // Dialog actions are handled by the dialog itself
            KeyAction::Confirm | KeyAction::Cancel => {}
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_bounds() {
        let mut state = AppState::default();
        state.move_up();
        assert_eq!(state.selected(), FormRow::Target);
        for _ in 0..20 {
            state.move_down();
        }
        assert_eq!(state.selected(), FormRow::Unit(450));
    }

    #[test]
    fn test_zero_cap_is_dropped() {
        let mut state = AppState::default();
        state.cap_inputs.insert(200, TextInput::with_value("0"));
        state.cap_inputs.insert(230, TextInput::with_value("2"));
        state.cap_inputs.insert(250, TextInput::new());
        let caps = state.max_multipliers();
        assert_eq!(caps.len(), 1);
        assert_eq!(caps.get(&230), Some(&2));
    }

    #[test]
    fn test_remove_last_unit_clamps_selection() {
        let mut state = AppState::default();
        state.selected_row = state.row_count() - 1;
        assert_eq!(state.remove_selected_unit(), Some(450));
        assert_eq!(state.selected(), FormRow::Unit(350));
    }

    #[test]
    fn test_remove_on_target_row_is_noop() {
        let mut state = AppState::default();
        assert_eq!(state.remove_selected_unit(), None);
        assert_eq!(state.catalog.len(), 5);
    }
}
