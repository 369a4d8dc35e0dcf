//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::artifact::{ArtifactBundle, KnnModel, StandardScaler};
use crate::application::InferenceService;
use crate::CardioscreenError;

use super::ui::{
    form::{render_patient_form, PatientFormState},
    render_disclaimer,
    result::{render_result_screen, ResultState},
};

/// Current screen/view in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    PatientForm,
    Result,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Inference service over the loaded artifacts
    inference_service: InferenceService<KnnModel, StandardScaler>,

    /// Patient form state
    form_state: PatientFormState,

    /// Result screen state
    result_state: ResultState,
}

impl App {
    /// Create a new application instance, loading artifacts from the
    /// configured directory.
    ///
    /// # Errors
    /// Returns error if the artifact directory is missing or any artifact
    /// fails to load: the application refuses to start without a usable
    /// model.
    pub fn new() -> Result<Self> {
        let artifact_dir = std::env::var("CARDIOSCREEN_ARTIFACT_DIR")
            .unwrap_or_else(|_| "artifacts".to_string());
        let artifact_dir = std::path::Path::new(&artifact_dir);

        if !artifact_dir.exists() {
            return Err(anyhow!(
                "Artifact path not found at {:?}. Set CARDIOSCREEN_ARTIFACT_DIR to a directory containing columns.json, scaler.json and model.json.",
                artifact_dir
            ));
        }

        let bundle = ArtifactBundle::load(artifact_dir)
            .map_err(|e| anyhow!("Failed to load artifacts from {:?}: {}", artifact_dir, e))?;
        let (schema, scaler, model) = bundle.into_parts();

        let service = InferenceService::new(
            Arc::new(model),
            Arc::new(scaler),
            Arc::new(schema),
        );

        Ok(Self::with_service(service))
    }

    /// Create application with an injected inference service (Composition
    /// Root pattern).
    #[must_use]
    pub fn with_service(inference_service: InferenceService<KnnModel, StandardScaler>) -> Self {
        Self {
            screen: Screen::PatientForm,
            should_quit: false,
            inference_service,
            form_state: PatientFormState::default(),
            result_state: ResultState::default(),
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            // Draw current screen
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::PatientForm => {
                        render_patient_form(f, content_area, &self.form_state)
                    }
                    Screen::Result => render_result_screen(f, content_area, &self.result_state),
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::PatientForm => self.handle_form_key(key),
            Screen::Result => self.handle_result_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => {
                self.form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_field();
            }
            KeyCode::Left => {
                self.form_state.cycle_prev();
            }
            KeyCode::Right => {
                self.form_state.cycle_next();
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.form_state.load_sample_data();
            }
            KeyCode::Char(c) => {
                self.form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.form_state.delete_char();
            }
            KeyCode::Delete => {
                self.form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_form();
            }
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match &self.result_state {
            ResultState::Complete { .. } => match key {
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Enter => {
                    self.form_state = PatientFormState::default();
                    self.screen = Screen::PatientForm;
                }
                KeyCode::Esc => {
                    self.should_quit = true;
                }
                _ => {}
            },
            ResultState::Error { .. } => match key {
                KeyCode::Enter => {
                    self.screen = Screen::PatientForm;
                }
                KeyCode::Esc => {
                    self.should_quit = true;
                }
                _ => {}
            },
            ResultState::Idle => {
                if matches!(key, KeyCode::Esc | KeyCode::Enter) {
                    self.screen = Screen::PatientForm;
                }
            }
        }
    }

    fn submit_form(&mut self) {
        let attrs = match self.form_state.to_attributes() {
            Ok(attrs) => attrs,
            Err(e) => {
                self.form_state.error_message = Some(e);
                return;
            }
        };

        // Prediction is a bounded in-memory computation; run it inline.
        match self.inference_service.predict(&attrs) {
            Ok(prediction) => {
                self.result_state = ResultState::Complete { prediction };
                self.screen = Screen::Result;
            }
            Err(CardioscreenError::InvalidAttribute(message)) => {
                // Recoverable: keep the form up and prompt for correction.
                self.form_state.error_message = Some(message);
            }
            Err(e) => {
                tracing::error!("Prediction failed: {}", e);
                self.result_state = ResultState::Error {
                    message: e.to_string(),
                };
                self.screen = Screen::Result;
            }
        }
    }
}
