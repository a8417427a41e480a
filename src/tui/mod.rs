//! Ratatui-based terminal UI.
//!
//! The TUI is the interactive front-end: a settings panel with the seven
//! customer detail controls, a live preview of the record they assemble,
//! and two independent prediction actions (eligibility and maximum EMI).
//!
//! Artifacts are loaded before the terminal is entered; if loading fails
//! the process halts with the load error and no input control is ever
//! rendered.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Terminal,
};

use crate::artifacts::{ArtifactBundle, ArtifactPaths, ArtifactState};
use crate::cli::FormArgs;
use crate::domain::FeatureField;
use crate::error::AppError;
use crate::form::FormState;

/// Start the TUI.
pub fn run(args: FormArgs) -> Result<(), AppError> {
    let paths = ArtifactPaths::resolve(args.models_dir.as_deref());
    let models_label = paths
        .classifier
        .parent()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "models".to_string());

    // Fatal gate: no prediction action is offered without artifacts.
    let bundle = ArtifactState::load(&paths).into_bundle()?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(bundle, models_label, args.form());
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!(
                "Failed to enter alternate screen: {e}"
            )));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Outcome of the last trigger of one prediction action.
enum Outcome {
    Success(String),
    Failure(String),
}

struct App {
    bundle: ArtifactBundle,
    models_label: String,
    form: FormState,
    selected_field: usize,
    editing_value: bool,
    value_input: String,
    status: String,
    eligibility: Option<Outcome>,
    emi: Option<Outcome>,
}

impl App {
    fn new(bundle: ArtifactBundle, models_label: String, form: FormState) -> Self {
        Self {
            bundle,
            models_label,
            form,
            selected_field: 0,
            editing_value: false,
            value_input: String::new(),
            status: "Enter customer details, then press e or p.".to_string(),
            eligibility: None,
            emi: None,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_value {
            self.handle_value_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FeatureField::ALL.len() - 1 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => {
                let field = self.selected();
                self.editing_value = true;
                self.value_input = self.form.value(field).to_string();
                self.status = format!(
                    "Editing {} (Enter to apply, Esc to cancel).",
                    field.label()
                );
            }
            KeyCode::Char('e') => self.run_eligibility(),
            KeyCode::Char('p') => self.run_emi(),
            KeyCode::Char('r') => {
                self.form.reset();
                self.eligibility = None;
                self.emi = None;
                self.status = "Form reset to defaults.".to_string();
            }
            _ => {}
        }

        false
    }

    fn handle_value_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_value = false;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_value = false;
                self.apply_value_input();
            }
            KeyCode::Backspace => {
                self.value_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() {
                    self.value_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn apply_value_input(&mut self) {
        let field = self.selected();
        let trimmed = self.value_input.trim();
        let parsed: i64 = match trimmed.parse() {
            Ok(v) => v,
            Err(e) => {
                self.status = format!("Invalid value '{trimmed}': {e}");
                return;
            }
        };

        self.form.set(field, parsed);
        let applied = self.form.value(field);
        self.status = if applied != parsed {
            format!(
                "{} clamped to {applied} (bounds {}..={}).",
                field.label(),
                field.spec().min,
                field.spec().max
            )
        } else {
            format!("{} set to {applied}.", field.label())
        };
    }

    fn adjust_field(&mut self, delta: i64) {
        let field = self.selected();
        self.form.step(field, delta);
        self.status = format!("{}: {}", field.label(), self.form.value(field));
    }

    fn selected(&self) -> FeatureField {
        FeatureField::ALL[self.selected_field]
    }

    fn run_eligibility(&mut self) {
        let record = self.form.record();
        match crate::predict::check_eligibility(&self.bundle, &record) {
            Ok(verdict) => {
                self.eligibility =
                    Some(Outcome::Success(format!("Prediction: {}", verdict.display_name())));
                self.status = "Eligibility check complete.".to_string();
            }
            Err(err) => {
                self.eligibility = Some(Outcome::Failure(format!("Error in prediction: {err}")));
                self.status = "Eligibility check failed.".to_string();
            }
        }
    }

    fn run_emi(&mut self) {
        let record = self.form.record();
        match crate::predict::predict_max_emi(&self.bundle, &record) {
            Ok(amount) => {
                self.emi = Some(Outcome::Success(format!(
                    "Predicted Maximum EMI: ₹ {}",
                    crate::report::format_currency(amount)
                )));
                self.status = "EMI prediction complete.".to_string();
            }
            Err(err) => {
                self.emi = Some(Outcome::Failure(format!("Error in prediction: {err}")));
                self.status = "EMI prediction failed.".to_string();
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled("emi", Style::default().fg(Color::Cyan)),
                Span::raw(" — EMI Eligibility & Prediction System"),
            ]),
            Line::from(Span::styled(
                format!("artifacts: {} | fields: {}", self.models_label, FeatureField::ALL.len()),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(44), Constraint::Percentage(56)])
            .split(area);

        self.draw_form(frame, chunks[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Min(0)])
            .split(chunks[1]);

        self.draw_preview(frame, right[0]);
        self.draw_results(frame, right[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items = Vec::with_capacity(FeatureField::ALL.len());
        for field in FeatureField::ALL {
            items.push(ListItem::new(format!(
                "{:<22} {}",
                field.label(),
                self.form.value(field)
            )));
        }

        let list = List::new(items)
            .block(Block::default().title("Customer Details").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);

        if self.editing_value {
            let hint = Paragraph::new(format!("> {}_", self.value_input))
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    /// Render the record exactly as it will be sent to the models,
    /// in the fixed positional order.
    fn draw_preview(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let record = self.form.record();
        let mut lines = Vec::with_capacity(FeatureField::ALL.len());
        for field in FeatureField::ALL {
            lines.push(Line::from(Span::styled(
                format!("{:<22} {:>12}", field.label(), record.get(field) as i64),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines))
            .block(Block::default().title("Input Data Preview").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_results(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines = Vec::new();

        lines.push(outcome_line("Eligibility", self.eligibility.as_ref()));
        lines.push(Line::raw(""));
        lines.push(outcome_line("Maximum EMI", self.emi.as_ref()));

        let p = Paragraph::new(Text::from(lines))
            .block(Block::default().title("Predictions").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter edit  e eligibility  p emi  r reset  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(self.status.as_str(), Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn outcome_line<'a>(label: &'a str, outcome: Option<&'a Outcome>) -> Line<'a> {
    match outcome {
        None => Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled("press the action key to run", Style::default().fg(Color::DarkGray)),
        ]),
        Some(Outcome::Success(text)) => Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(text.as_str(), Style::default().fg(Color::Green)),
        ]),
        Some(Outcome::Failure(text)) => Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(text.as_str(), Style::default().fg(Color::Red)),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{LinearClassifier, LinearRegressor, StandardScaler};
    use crate::domain::FEATURE_COUNT;

    fn test_bundle() -> ArtifactBundle {
        let identity = StandardScaler {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        };
        ArtifactBundle {
            classifier: LinearClassifier {
                weights: vec![0.0; FEATURE_COUNT],
                intercept: 50.0,
                threshold: 0.5,
            },
            regressor: LinearRegressor {
                weights: vec![0.0; FEATURE_COUNT],
                intercept: 12345.6,
            },
            classifier_scaler: identity.clone(),
            regressor_scaler: identity,
        }
    }

    fn test_app() -> App {
        App::new(test_bundle(), "models".to_string(), FormState::new())
    }

    #[test]
    fn arrow_keys_adjust_selected_field_within_bounds() {
        let mut app = test_app();
        assert_eq!(app.selected(), FeatureField::Age);

        app.handle_key(KeyCode::Right);
        assert_eq!(app.form.value(FeatureField::Age), 31);
        app.handle_key(KeyCode::Left);
        app.handle_key(KeyCode::Left);
        assert_eq!(app.form.value(FeatureField::Age), 29);

        // Selection stays in range at the ends.
        app.handle_key(KeyCode::Up);
        assert_eq!(app.selected(), FeatureField::Age);
        for _ in 0..20 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.selected(), FeatureField::EmploymentYears);
    }

    #[test]
    fn typed_value_is_clamped_to_bounds() {
        let mut app = test_app();
        app.handle_key(KeyCode::Enter);
        assert!(app.editing_value);

        app.value_input.clear();
        for c in "500".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);

        assert!(!app.editing_value);
        assert_eq!(app.form.value(FeatureField::Age), 70);
        assert!(app.status.contains("clamped"), "{}", app.status);
    }

    #[test]
    fn action_keys_fill_their_own_result_slot() {
        let mut app = test_app();
        app.handle_key(KeyCode::Char('e'));
        assert!(matches!(app.eligibility, Some(Outcome::Success(_))));
        assert!(app.emi.is_none());

        app.handle_key(KeyCode::Char('p'));
        let Some(Outcome::Success(text)) = &app.emi else {
            panic!("expected EMI success");
        };
        assert!(text.contains("12,345.60"), "{text}");
    }

    #[test]
    fn failed_action_leaves_other_action_usable() {
        let mut bundle = test_bundle();
        bundle.classifier_scaler.scale = vec![0.0; FEATURE_COUNT];
        let mut app = App::new(bundle, "models".to_string(), FormState::new());

        app.handle_key(KeyCode::Char('e'));
        let Some(Outcome::Failure(text)) = &app.eligibility else {
            panic!("expected eligibility failure");
        };
        assert!(text.starts_with("Error in prediction:"), "{text}");

        app.handle_key(KeyCode::Char('p'));
        assert!(matches!(app.emi, Some(Outcome::Success(_))));
    }

    #[test]
    fn reset_clears_results_and_form() {
        let mut app = test_app();
        app.handle_key(KeyCode::Char('e'));
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Char('r'));

        assert!(app.eligibility.is_none());
        assert!(app.emi.is_none());
        assert_eq!(app.form, FormState::new());
    }

    #[test]
    fn quit_keys_exit_outside_edit_mode() {
        let mut app = test_app();
        assert!(app.handle_key(KeyCode::Char('q')));

        let mut app = test_app();
        app.handle_key(KeyCode::Enter);
        // Esc while editing cancels the edit instead of quitting.
        assert!(!app.handle_key(KeyCode::Esc));
        assert!(!app.editing_value);
        assert!(app.handle_key(KeyCode::Esc));
    }
}
