//! Prediction result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::{Prediction, PredictionResult};
use crate::tui::styles::MedicalTheme;

/// Outcome of a submitted screening.
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    /// No screening submitted yet
    #[default]
    Idle,
    /// Completed with a prediction
    Complete { prediction: Prediction },
    /// Error occurred during inference
    Error { message: String },
}

/// Render the result screen
pub fn render_result_screen(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0]);
    match state {
        ResultState::Idle => render_idle(f, chunks[1]),
        ResultState::Complete { prediction } => render_prediction(f, chunks[1], prediction),
        ResultState::Error { message } => render_error(f, chunks[1], message),
    }
    render_result_footer(f, chunks[2], state);
}

fn render_result_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Prediction Result", MedicalTheme::title()),
        Span::styled(" │ Heart Disease Screening", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No screening submitted yet",
            MedicalTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter patient data to begin",
            MedicalTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_prediction(f: &mut Frame, area: Rect, prediction: &Prediction) {
    let block = Block::default()
        .title(Span::styled(" Screening Result ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Risk banner
            Constraint::Length(3), // Message
            Constraint::Length(2), // Timestamp
            Constraint::Min(0),    // Padding
        ])
        .margin(1)
        .split(inner);

    let risk_style = MedicalTheme::risk(prediction.result);
    let risk_icon = match prediction.result {
        PredictionResult::LowRisk => "OK",
        PredictionResult::HighRisk => "!",
    };

    let banner = Paragraph::new(Line::from(Span::styled(
        format!("{} {}", risk_icon, prediction.result),
        risk_style.add_modifier(ratatui::style::Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(banner, chunks[0]);

    let message = Paragraph::new(Line::from(Span::styled(
        prediction.result.message(),
        MedicalTheme::text(),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(message, chunks[1]);

    let timestamp = Paragraph::new(Line::from(vec![
        Span::styled("Screened at: ", MedicalTheme::text_secondary()),
        Span::styled(
            prediction
                .created_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            MedicalTheme::text_muted(),
        ),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(timestamp, chunks[2]);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Error", MedicalTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, MedicalTheme::text())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_result_footer(f: &mut Frame, area: Rect, state: &ResultState) {
    let content = match state {
        ResultState::Complete { .. } => Line::from(vec![
            Span::styled("[N] ", MedicalTheme::key_hint()),
            Span::styled("New Screening ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ]),
        ResultState::Error { .. } => Line::from(vec![
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Back to Form ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ]),
        ResultState::Idle => Line::from(vec![
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Back to Form", MedicalTheme::key_desc()),
        ]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
