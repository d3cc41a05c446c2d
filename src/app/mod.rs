//! Application module
//!
//! Contains the main application loop, state management, and event handling.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, AppMode, FormRow)
//! - Main module - App struct and event loop

mod state;

pub use state::{AppMode, AppState, FormRow};

use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::config_file::CalculatorConfig;
use crate::input::InputResult;
use crate::ui::UiRenderer;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tracing::{debug, info};

/// Main application struct
pub struct App {
    state: AppState,
    ui_renderer: UiRenderer,
    /// Keybinding context for dispatch, nav bar and help
    keybinding_context: KeybindingContext,
}

impl App {
    /// Create a new application instance seeded from `config`
    pub fn new(config: &CalculatorConfig) -> Self {
        info!(units = config.catalog.len(), "Creating new App instance");
        Self {
            state: AppState::from_config(config),
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Main event loop. Returns when the user quits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        info!("Starting main application loop");

        loop {
            terminal.draw(|f| {
                self.ui_renderer
                    .render(f, &self.state, &self.keybinding_context);
            })?;

            if crossterm::event::poll(Duration::from_millis(250))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    if self.handle_key_event(key_event) {
                        break;
                    }
                }
            }
        }

        info!("Main loop finished");
        Ok(())
    }

    /// Handle keyboard input events. Returns true if exit was requested.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        if key_event.kind != KeyEventKind::Press {
            return false;
        }

        // Help overlay swallows everything but its own close keys
        if self.state.help_visible {
            if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.state.toggle_help();
            }
            return false;
        }

        match self.state.mode {
            AppMode::AddUnit => {
                self.handle_dialog_key(key_event);
                false
            }
            AppMode::Calculator => self.handle_calculator_key(key_event),
        }
    }

    fn handle_calculator_key(&mut self, key_event: KeyEvent) -> bool {
        if let KeyCode::Char(c) = key_event.code {
            if c.is_ascii_digit() && key_event.modifiers.is_empty() {
                self.state.type_char(c);
                return false;
            }
        }

        match self
            .keybinding_context
            .resolve(&self.state.mode, &key_event)
        {
            Some(action) => {
                debug!(?action, "Key action");
                self.state.apply(action)
            }
            None => false,
        }
    }

    fn handle_dialog_key(&mut self, key_event: KeyEvent) {
        let Some(dialog) = self.state.add_unit_dialog.as_mut() else {
            self.state.mode = AppMode::Calculator;
            return;
        };

        match dialog.handle_input(key_event) {
            InputResult::Confirm(value) => {
                // Rejections keep the dialog open with the reason shown
                let _ = self.state.submit_add_unit(&value);
            }
            InputResult::Cancel => self.state.cancel_add_unit(),
            InputResult::Continue => {}
        }
    }

    /// Apply an action directly, bypassing key resolution
    pub fn dispatch(&mut self, action: KeyAction) -> bool {
        self.state.apply(action)
    }
}
