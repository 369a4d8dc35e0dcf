//! Patient attribute input form.

use std::str::FromStr;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{
    ranges, AttributeError, ChestPainType, ExerciseAngina, PatientAttributes, RestingEcg, Sex,
    StSlope,
};
use crate::tui::styles::MedicalTheme;

// Field positions, matching the order built in `PatientFormState::default`.
const AGE: usize = 0;
const SEX: usize = 1;
const CHEST_PAIN: usize = 2;
const RESTING_BP: usize = 3;
const CHOLESTEROL: usize = 4;
const FASTING_BS: usize = 5;
const RESTING_ECG: usize = 6;
const MAX_HR: usize = 7;
const EXERCISE_ANGINA: usize = 8;
const OLDPEAK: usize = 9;
const ST_SLOPE: usize = 10;

/// Form field definition: free-text numeric entry or a cycled selection.
#[derive(Debug, Clone)]
pub enum FormField {
    Numeric {
        label: &'static str,
        hint: &'static str,
        value: String,
        min: f64,
        max: f64,
    },
    Choice {
        label: &'static str,
        options: Vec<&'static str>,
        selected: usize,
    },
}

impl FormField {
    fn numeric(label: &'static str, hint: &'static str, (min, max): (f64, f64)) -> Self {
        Self::Numeric {
            label,
            hint,
            value: String::new(),
            min,
            max,
        }
    }

    fn choice(label: &'static str, options: Vec<&'static str>) -> Self {
        Self::Choice {
            label,
            options,
            selected: 0,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Numeric { label, .. } | Self::Choice { label, .. } => *label,
        }
    }
}

/// Patient form state
pub struct PatientFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for PatientFormState {
    fn default() -> Self {
        Self {
            fields: vec![
                FormField::numeric("Age", "years (18-100)", ranges::AGE),
                FormField::choice("Sex", Sex::ALL.iter().map(Sex::as_str).collect()),
                FormField::choice(
                    "Chest Pain Type",
                    ChestPainType::ALL.iter().map(ChestPainType::as_str).collect(),
                ),
                FormField::numeric("Resting BP", "mm Hg (80-200)", ranges::RESTING_BP),
                FormField::numeric("Cholesterol", "mg/dL (100-600)", ranges::CHOLESTEROL),
                FormField::choice("Fasting BS > 120", vec!["0", "1"]),
                FormField::choice(
                    "Resting ECG",
                    RestingEcg::ALL.iter().map(RestingEcg::as_str).collect(),
                ),
                FormField::numeric("Max Heart Rate", "bpm (60-220)", ranges::MAX_HR),
                FormField::choice(
                    "Exercise Angina",
                    ExerciseAngina::ALL.iter().map(ExerciseAngina::as_str).collect(),
                ),
                FormField::numeric("Oldpeak", "ST depression (0.0-6.0)", ranges::OLDPEAK),
                FormField::choice(
                    "ST Slope",
                    StSlope::ALL.iter().map(StSlope::as_str).collect(),
                ),
            ],
            selected_field: 0,
            error_message: None,
        }
    }
}

impl PatientFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field (numeric fields only)
    pub fn input_char(&mut self, c: char) {
        if let FormField::Numeric { value, .. } = &mut self.fields[self.selected_field] {
            if c.is_ascii_digit() || c == '.' {
                value.push(c);
                self.error_message = None;
            }
        }
    }

    /// Delete the last character (numeric fields only)
    pub fn delete_char(&mut self) {
        if let FormField::Numeric { value, .. } = &mut self.fields[self.selected_field] {
            value.pop();
        }
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        match &mut self.fields[self.selected_field] {
            FormField::Numeric { value, .. } => value.clear(),
            FormField::Choice { selected, .. } => *selected = 0,
        }
    }

    /// Cycle the current selection field forward
    pub fn cycle_next(&mut self) {
        if let FormField::Choice {
            options, selected, ..
        } = &mut self.fields[self.selected_field]
        {
            *selected = (*selected + 1) % options.len();
            self.error_message = None;
        }
    }

    /// Cycle the current selection field backward
    pub fn cycle_prev(&mut self) {
        if let FormField::Choice {
            options, selected, ..
        } = &mut self.fields[self.selected_field]
        {
            *selected = (*selected + options.len() - 1) % options.len();
            self.error_message = None;
        }
    }

    fn parse_number(&self, idx: usize) -> Result<f64, String> {
        match &self.fields[idx] {
            FormField::Numeric {
                label,
                value,
                min,
                max,
                ..
            } => {
                let parsed: f64 = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("{label}: Invalid number"))?;

                if parsed < *min || parsed > *max {
                    return Err(format!(
                        "{label}: Value must be between {min} and {max}"
                    ));
                }

                Ok(parsed)
            }
            FormField::Choice { label, .. } => Err(format!("{label}: not a numeric field")),
        }
    }

    fn parse_integer(&self, idx: usize) -> Result<u32, String> {
        let value = self.parse_number(idx)?;
        if value.fract() != 0.0 {
            return Err(format!(
                "{}: Expected a whole number",
                self.fields[idx].label()
            ));
        }
        Ok(value as u32)
    }

    fn parse_choice<T>(&self, idx: usize) -> Result<T, String>
    where
        T: FromStr<Err = AttributeError>,
    {
        match &self.fields[idx] {
            FormField::Choice {
                options, selected, ..
            } => options[*selected].parse().map_err(|e: AttributeError| e.to_string()),
            FormField::Numeric { label, .. } => Err(format!("{label}: not a selection field")),
        }
    }

    fn choice_text(&self, idx: usize) -> Result<&'static str, String> {
        match &self.fields[idx] {
            FormField::Choice {
                options, selected, ..
            } => Ok(options[*selected]),
            FormField::Numeric { label, .. } => Err(format!("{label}: not a selection field")),
        }
    }

    /// Parse and range-check the form into a patient record.
    pub fn to_attributes(&self) -> Result<PatientAttributes, String> {
        Ok(PatientAttributes {
            age: self.parse_integer(AGE)?,
            sex: self.parse_choice(SEX)?,
            chest_pain_type: self.parse_choice(CHEST_PAIN)?,
            resting_bp: self.parse_integer(RESTING_BP)?,
            cholesterol: self.parse_integer(CHOLESTEROL)?,
            fasting_bs: self.choice_text(FASTING_BS)? == "1",
            resting_ecg: self.parse_choice(RESTING_ECG)?,
            max_hr: self.parse_integer(MAX_HR)?,
            exercise_angina: self.parse_choice(EXERCISE_ANGINA)?,
            oldpeak: self.parse_number(OLDPEAK)?,
            st_slope: self.parse_choice(ST_SLOPE)?,
        })
    }

    /// Load sample data for testing (a typical screening patient)
    pub fn load_sample_data(&mut self) {
        let numeric = [
            (AGE, "40"),
            (RESTING_BP, "120"),
            (CHOLESTEROL, "200"),
            (MAX_HR, "150"),
            (OLDPEAK, "1.0"),
        ];
        for (idx, text) in numeric {
            if let FormField::Numeric { value, .. } = &mut self.fields[idx] {
                *value = text.to_string();
            }
        }

        // M, ASY, 0, Normal, N, Up
        let selections = [
            (SEX, 0),
            (CHEST_PAIN, 3),
            (FASTING_BS, 0),
            (RESTING_ECG, 0),
            (EXERCISE_ANGINA, 1),
            (ST_SLOPE, 0),
        ];
        for (idx, choice) in selections {
            if let FormField::Choice { selected, .. } = &mut self.fields[idx] {
                *selected = choice;
            }
        }
    }
}

/// Render the patient attribute input form
pub fn render_patient_form(f: &mut Frame, area: Rect, state: &PatientFormState) {
    // Split into header and form
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Patient Screening", MedicalTheme::title()),
        Span::styled(
            " │ Heart Disease Risk Factors",
            MedicalTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PatientFormState) {
    // Create a two-column layout
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.fields.len() + 1) / 2;

    // Left column
    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);

    // Right column
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let border_style = if is_selected {
            MedicalTheme::border_focused()
        } else {
            MedicalTheme::border()
        };

        let title_style = if is_selected {
            MedicalTheme::focused()
        } else {
            MedicalTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label()), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let content = match field {
            FormField::Numeric { value, hint, .. } => {
                let value_display = if value.is_empty() {
                    Span::styled(*hint, MedicalTheme::text_muted())
                } else {
                    Span::styled(value.as_str(), MedicalTheme::text())
                };

                Line::from(vec![
                    Span::raw(" "),
                    value_display,
                    if is_selected {
                        Span::styled("▌", MedicalTheme::focused())
                    } else {
                        Span::raw("")
                    },
                ])
            }
            FormField::Choice {
                options, selected, ..
            } => {
                if is_selected {
                    Line::from(vec![
                        Span::styled(" ◀ ", MedicalTheme::key_hint()),
                        Span::styled(options[*selected], MedicalTheme::text()),
                        Span::styled(" ▶", MedicalTheme::key_hint()),
                    ])
                } else {
                    Line::from(vec![
                        Span::raw(" "),
                        Span::styled(options[*selected], MedicalTheme::text()),
                    ])
                }
            }
        };

        f.render_widget(Paragraph::new(content).block(block), chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
            Span::styled("[◀▶] ", MedicalTheme::key_hint()),
            Span::styled("Select ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Predict ", MedicalTheme::key_desc()),
            Span::styled("[S] ", MedicalTheme::key_hint()),
            Span::styled("Sample Data ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChestPainType, ExerciseAngina, Sex, StSlope};

    #[test]
    fn test_sample_data_parses() {
        let mut form = PatientFormState::default();
        form.load_sample_data();

        let attrs = form.to_attributes().expect("sample data is valid");
        assert_eq!(attrs.age, 40);
        assert_eq!(attrs.sex, Sex::Male);
        assert_eq!(attrs.chest_pain_type, ChestPainType::Asymptomatic);
        assert_eq!(attrs.exercise_angina, ExerciseAngina::No);
        assert_eq!(attrs.st_slope, StSlope::Up);
        assert!(!attrs.fasting_bs);
        assert!((attrs.oldpeak - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_numeric_field_rejected() {
        let form = PatientFormState::default();
        let err = form.to_attributes().expect_err("empty form");
        assert!(err.contains("Age"));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut form = PatientFormState::default();
        form.load_sample_data();
        if let FormField::Numeric { value, .. } = &mut form.fields[AGE] {
            *value = "17".to_string();
        }

        let err = form.to_attributes().expect_err("age below range");
        assert!(err.contains("Age"));
    }

    #[test]
    fn test_fractional_integer_rejected() {
        let mut form = PatientFormState::default();
        form.load_sample_data();
        if let FormField::Numeric { value, .. } = &mut form.fields[CHOLESTEROL] {
            *value = "200.5".to_string();
        }

        assert!(form.to_attributes().is_err());
    }

    #[test]
    fn test_choice_cycling_wraps() {
        let mut form = PatientFormState::default();
        form.selected_field = SEX;

        form.cycle_next();
        assert_eq!(form.choice_text(SEX).unwrap(), "F");
        form.cycle_next();
        assert_eq!(form.choice_text(SEX).unwrap(), "M");
        form.cycle_prev();
        assert_eq!(form.choice_text(SEX).unwrap(), "F");
    }
}
