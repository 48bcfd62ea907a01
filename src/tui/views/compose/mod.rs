//! Compose view: the draft-backed multi-step submission form.
//!
//! Owns the step state machine, the single error banner, the draft
//! persistence lifecycle, and the recovery negotiation. Mounting the view
//! (focus enter) runs the one-time recovery check and arms the save
//! timers; leaving it ([`ComposeState::suspend`]) stops them. A timer
//! firing after unmount is a defect, not an accepted race.

mod company;
mod reflection;
mod review;
mod rounds;

use std::time::Instant;

use chrono::{Local, TimeZone, Utc};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use ratatui_textarea::TextArea;

use crate::api::{CreatedExperience, ExperienceSubmission};
use crate::core::draft::{DraftManager, DraftRecord, FileDraftStore, CREATE_DRAFT_KEY};
use crate::core::experience::{
    prefill, step_requirement_message, validate_step, ExperienceForm, FormStep,
};
use crate::tui::app::centered_rect;
use crate::tui::events::{AppEvent, Notification, NotificationLevel};
use crate::tui::services::Services;
use crate::tui::theme;

use company::CompanyEditor;
use reflection::ReflectionEditor;
use rounds::RoundsEditor;

/// What a step editor did with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorResponse {
    /// Not interested; fall through to global bindings.
    Ignored,
    /// Consumed without touching the snapshot.
    Handled,
    /// Consumed and mutated the snapshot (schedules a debounced save).
    Edited,
}

/// Coarse summary shown by the recovery prompt; the user decides from
/// this, not from a field-by-field inspection.
struct RecoveryPrompt {
    company_name: Option<String>,
    role: Option<String>,
    round_count: usize,
    has_key_tips: bool,
    saved_at_ms: i64,
}

impl RecoveryPrompt {
    fn from_record(record: &DraftRecord) -> Self {
        let form = &record.form_data;
        let non_blank = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        Self {
            company_name: non_blank(&form.company.company_name),
            role: non_blank(&form.company.role),
            round_count: form.rounds.len(),
            has_key_tips: !form.key_tips.trim().is_empty(),
            saved_at_ms: record.timestamp,
        }
    }
}

pub struct ComposeState {
    form: ExperienceForm,
    step: FormStep,
    error: Option<String>,
    submitting: bool,
    drafts: DraftManager<FileDraftStore>,
    recovery: Option<RecoveryPrompt>,
    pending_restore: Option<ExperienceForm>,
    mounted: bool,
    company: CompanyEditor,
    rounds: RoundsEditor,
    reflection: ReflectionEditor,
}

impl ComposeState {
    pub fn new(store: FileDraftStore, prefill_payload: Option<&str>) -> Self {
        let mut form = ExperienceForm::default();
        if let Some(encoded) = prefill_payload {
            prefill::apply(&mut form, encoded);
        }
        let mut state = Self {
            form,
            step: FormStep::Company,
            error: None,
            submitting: false,
            drafts: DraftManager::new(store, CREATE_DRAFT_KEY),
            recovery: None,
            pending_restore: None,
            mounted: false,
            company: CompanyEditor::new(),
            rounds: RoundsEditor::new(),
            reflection: ReflectionEditor::new(),
        };
        state.sync_editors();
        state
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Mount: one-time recovery check, then arm the save timers. When an
    /// unexpired draft exists the timers stay off until the user resolves
    /// the restore-or-discard prompt, so the blocking decision cannot be
    /// clobbered by an autosave of the fresh form.
    pub fn load(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        let now_ms = Utc::now().timestamp_millis();
        if let Some(record) = self.drafts.saved_draft(now_ms) {
            self.recovery = Some(RecoveryPrompt::from_record(&record));
            self.pending_restore = Some(record.form_data);
        } else {
            self.drafts.start(Instant::now());
        }
    }

    /// Unmount: stop both save timers and drop any unresolved recovery
    /// prompt (the next mount re-negotiates from storage).
    pub fn suspend(&mut self) {
        self.drafts.stop();
        self.recovery = None;
        self.pending_restore = None;
        self.mounted = false;
    }

    /// Drive the save timers; called from the app tick.
    pub fn tick(&mut self) {
        if !self.mounted || self.recovery.is_some() {
            return;
        }
        let _ = self
            .drafts
            .poll(&self.form, Instant::now(), Utc::now().timestamp_millis());
    }

    fn sync_editors(&mut self) {
        self.company.sync_from(&self.form);
        self.rounds.sync_from(&self.form);
        self.reflection.sync_from(&self.form);
    }

    fn resolve_recovery(&mut self, restore: bool) {
        if restore {
            if let Some(saved) = self.pending_restore.take() {
                // Wholesale replacement; the stored record stays intact
                // until the next save overwrites it.
                self.form = saved;
                self.sync_editors();
            }
        } else {
            self.drafts.clear();
            self.pending_restore = None;
        }
        self.recovery = None;
        self.drafts.start(Instant::now());
    }

    fn blur_step(&mut self) {
        match self.step {
            FormStep::Company => self.company.blur(&mut self.form),
            FormStep::Rounds => {
                if self.rounds.blur(&mut self.form) {
                    self.drafts.note_mutation(Instant::now());
                }
            }
            FormStep::Reflection => {
                self.reflection.blur(&mut self.form);
                self.drafts.note_mutation(Instant::now());
            }
            FormStep::Review => {}
        }
    }

    /// Forward transition, gated by the validator. Blocked transitions set
    /// the single error banner and stay put.
    fn next_step(&mut self) {
        self.blur_step();
        if validate_step(&self.form, self.step) {
            if let Some(next) = self.step.next() {
                self.step = next;
            }
            self.error = None;
        } else {
            self.error = Some(step_requirement_message(self.step).to_string());
        }
    }

    /// Backward transition: unconditional, clamped at step 1, always clears
    /// the error banner.
    fn prev_step(&mut self) {
        self.blur_step();
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.error = None;
    }

    fn manual_save(&mut self, services: &Services) {
        let ok = self
            .drafts
            .manual_save(&self.form, Utc::now().timestamp_millis());
        let notification = if ok {
            Notification::new("Draft saved", NotificationLevel::Success)
        } else {
            Notification::new("Draft save failed", NotificationLevel::Warning)
        };
        let _ = services.event_tx.send(AppEvent::Notification(notification));
    }

    fn register_company(&mut self, services: &Services) {
        let name = self.form.company.company_name.trim().to_string();
        if name.is_empty() {
            self.error = Some("Enter a company name before registering it.".to_string());
            return;
        }
        let api = services.api.clone();
        let tx = services.event_tx.clone();
        tokio::spawn(async move {
            let result = api.create_company(&name).await.map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::CompanyRegistered(result));
        });
    }

    /// Terminal action: re-validate the composite, then fire the one
    /// allowed in-flight submission.
    fn submit(&mut self, services: &Services) {
        if self.submitting {
            return;
        }
        self.form.commit_list_fields();
        if !validate_step(&self.form, FormStep::Review) {
            self.error = Some(step_requirement_message(FormStep::Review).to_string());
            return;
        }
        self.error = None;
        self.submitting = true;

        let payload = ExperienceSubmission::from_form(&self.form);
        let api = services.api.clone();
        let tx = services.event_tx.clone();
        tokio::spawn(async move {
            let result = api
                .create_experience(&payload)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::ExperienceSubmitted(result));
        });
    }

    /// Submission result. Returns `true` when the app should navigate away
    /// (success); on failure the snapshot stays intact for a retry.
    pub fn on_submitted(&mut self, result: Result<CreatedExperience, String>) -> bool {
        self.submitting = false;
        match result {
            Ok(created) => {
                log::info!("experience submitted: id={}", created.id);
                self.drafts.clear();
                self.form = ExperienceForm::default();
                self.step = FormStep::Company;
                self.error = None;
                self.sync_editors();
                true
            }
            Err(message) => {
                self.error = Some(message);
                false
            }
        }
    }

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let key = match event {
            Event::Key(k) if k.kind == KeyEventKind::Press => *k,
            _ => return false,
        };

        // App-global chords (view switching, force quit) pass through even
        // though the form otherwise owns the keyboard.
        if key.modifiers == KeyModifiers::CONTROL
            && matches!(key.code, KeyCode::Char('g') | KeyCode::Char('c'))
        {
            return false;
        }

        // The recovery prompt blocks everything until resolved.
        if self.recovery.is_some() {
            match key.code {
                KeyCode::Char('r') | KeyCode::Enter => self.resolve_recovery(true),
                KeyCode::Char('d') => self.resolve_recovery(false),
                _ => {}
            }
            return true;
        }

        if key.modifiers == KeyModifiers::CONTROL {
            match key.code {
                KeyCode::Enter | KeyCode::Char('n') => {
                    self.next_step();
                    return true;
                }
                KeyCode::Char('s') => {
                    self.manual_save(services);
                    return true;
                }
                KeyCode::Char('r') if self.step == FormStep::Company => {
                    self.register_company(services);
                    return true;
                }
                _ => {}
            }
        }

        if self.step == FormStep::Review {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.submit(services);
                    true
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.prev_step();
                    true
                }
                _ => false,
            };
        }

        if key.code == KeyCode::Esc {
            self.prev_step();
            return true;
        }

        let response = match self.step {
            FormStep::Company => self.company.handle_input(key, &mut self.form),
            FormStep::Rounds => self.rounds.handle_input(key, &mut self.form),
            FormStep::Reflection => self.reflection.handle_input(key, &mut self.form),
            FormStep::Review => EditorResponse::Ignored,
        };
        match response {
            EditorResponse::Edited => {
                self.drafts.note_mutation(Instant::now());
                true
            }
            EditorResponse::Handled => true,
            EditorResponse::Ignored => false,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Share Your Experience ")
            .borders(Borders::ALL)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1), // step pips
            Constraint::Length(1), // draft status
            Constraint::Min(6),    // step content
            Constraint::Length(1), // error banner
        ])
        .split(inner);

        frame.render_widget(Paragraph::new(self.step_pips()), rows[0]);
        frame.render_widget(Paragraph::new(self.draft_status_line()), rows[1]);

        match self.step {
            FormStep::Company => self.company.render(frame, rows[2]),
            FormStep::Rounds => self.rounds.render(frame, rows[2], &self.form),
            FormStep::Reflection => self.reflection.render(frame, rows[2], &self.form),
            FormStep::Review => review::render(frame, rows[2], &self.form, self.submitting),
        }

        if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!(" {error}"),
                    theme::error_banner(),
                ))),
                rows[3],
            );
        }

        if let Some(prompt) = &self.recovery {
            self.render_recovery(frame, area, prompt);
        }
    }

    fn step_pips(&self) -> Line<'static> {
        let mut spans = vec![Span::raw(" ")];
        for (index, step) in FormStep::ALL.iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled(" ▸ ", Style::default().fg(theme::TEXT_DIM)));
            }
            let text = format!("{} {}", step.number(), step.label());
            let style = if *step == self.step {
                theme::highlight()
            } else {
                Style::default().fg(theme::TEXT_MUTED)
            };
            spans.push(Span::styled(text, style));
        }
        Line::from(spans)
    }

    fn draft_status_line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            " Draft: ",
            Style::default().fg(theme::TEXT_DIM),
        )];
        match self.drafts.last_saved() {
            Some(ms) => {
                spans.push(Span::styled(
                    format!("saved {}", format_clock(ms)),
                    Style::default().fg(theme::SUCCESS),
                ));
            }
            None => {
                spans.push(Span::styled(
                    "not saved yet".to_string(),
                    Style::default().fg(theme::TEXT_MUTED),
                ));
            }
        }
        if self.drafts.is_auto_saving() {
            spans.push(Span::styled(
                " · autosave on",
                Style::default().fg(theme::TEXT_DIM),
            ));
        }
        spans.push(Span::styled(
            "  Ctrl+S",
            theme::key_hint(),
        ));
        spans.push(Span::styled(
            ":save now  ",
            Style::default().fg(theme::TEXT_DIM),
        ));
        spans.push(Span::styled("Ctrl+N", theme::key_hint()));
        spans.push(Span::styled(
            ":next step  ",
            Style::default().fg(theme::TEXT_DIM),
        ));
        spans.push(Span::styled("Esc", theme::key_hint()));
        spans.push(Span::styled(
            ":previous step",
            Style::default().fg(theme::TEXT_DIM),
        ));
        Line::from(spans)
    }

    fn render_recovery(&self, frame: &mut Frame, area: Rect, prompt: &RecoveryPrompt) {
        let modal = centered_rect(50, 40, area);

        let title = match (&prompt.company_name, &prompt.role) {
            (Some(company), Some(role)) => format!("  {company} · {role}"),
            (Some(company), None) => format!("  {company}"),
            _ => "  (untitled draft)".to_string(),
        };

        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled("  Resume saved draft?", theme::title())),
            Line::raw(""),
            Line::from(Span::styled(title, Style::default().fg(theme::TEXT))),
            Line::from(format!(
                "  {} round{} · key tips {}",
                prompt.round_count,
                if prompt.round_count == 1 { "" } else { "s" },
                if prompt.has_key_tips {
                    "written"
                } else {
                    "not written"
                },
            )),
            Line::from(format!("  Last saved {}", format_clock(prompt.saved_at_ms))),
            Line::raw(""),
            Line::from(vec![
                Span::styled("  r/Enter", Style::default().fg(theme::SUCCESS)),
                Span::raw(" restore  "),
                Span::styled("d", Style::default().fg(theme::ERROR)),
                Span::raw(" discard"),
            ]),
        ];

        let block = Block::default()
            .title(" Draft Found ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

fn format_clock(epoch_ms: i64) -> String {
    Local
        .timestamp_millis_opt(epoch_ms)
        .single()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "—".to_string())
}

// ── Shared editor helpers ───────────────────────────────────────────────

/// Bordered single-line input in the house style.
pub(crate) fn make_field(title: &'static str) -> TextArea<'static> {
    let mut ta = TextArea::default();
    ta.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(theme::border_default()),
    );
    ta.set_cursor_line_style(Style::default());
    ta
}

/// Replace an input's content, keeping its block.
pub(crate) fn set_single_line(ta: &mut TextArea<'static>, text: &str) {
    let block = ta.block().cloned();
    let mut fresh = TextArea::default();
    if let Some(block) = block {
        fresh.set_block(block);
    }
    fresh.set_cursor_line_style(Style::default());
    fresh.insert_str(text);
    *ta = fresh;
}

/// Single-line text content of an input.
pub(crate) fn text_of(ta: &TextArea<'static>) -> String {
    ta.lines().join("")
}

/// Blank-to-`None` for optional string fields.
pub(crate) fn opt_text(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::experience::{CompanyInfo, FinalResult, RoundResult, RoundType};
    use tokio::sync::mpsc;

    fn compose_in(dir: &std::path::Path) -> ComposeState {
        ComposeState::new(FileDraftStore::new(dir.join("drafts")), None)
    }

    fn fill_form(form: &mut ExperienceForm) {
        form.company = CompanyInfo {
            company_name: "Acme".into(),
            role: "SDE Intern".into(),
            department: "Platform".into(),
            internship_type: "Summer".into(),
            duration: "8 weeks".into(),
            location: "Remote".into(),
            application_date: "2026-01-15".into(),
            city: None,
            stipend: None,
            currency: None,
        };
        form.rounds[0].round_type = Some(RoundType::Technical);
        form.rounds[0].duration_minutes = Some(60);
        form.rounds[0].round_result = Some(RoundResult::Selected);
        form.rounds[0].overall_experience = Some(4);
        form.overall_rating = Some(5);
        form.final_result = Some(FinalResult::Selected);
        form.would_recommend = Some(true);
        form.preparation_time_weeks = Some(6);
        form.key_tips = "Practice DP.".into();
        form.mistakes_to_avoid = "Skipping basics.".into();
    }

    #[test]
    fn test_next_blocked_sets_single_error_and_stays() {
        let dir = tempfile::tempdir().unwrap();
        let mut compose = compose_in(dir.path());
        compose.load();

        compose.next_step();
        assert_eq!(compose.step, FormStep::Company);
        assert_eq!(
            compose.error.as_deref(),
            Some(step_requirement_message(FormStep::Company))
        );
    }

    #[test]
    fn test_next_advances_exactly_one_step_when_valid() {
        let dir = tempfile::tempdir().unwrap();
        let mut compose = compose_in(dir.path());
        compose.load();
        fill_form(&mut compose.form);

        compose.next_step();
        assert_eq!(compose.step, FormStep::Rounds);
        assert!(compose.error.is_none());
    }

    #[test]
    fn test_next_clamps_at_review() {
        let dir = tempfile::tempdir().unwrap();
        let mut compose = compose_in(dir.path());
        compose.load();
        fill_form(&mut compose.form);

        for _ in 0..6 {
            compose.next_step();
        }
        assert_eq!(compose.step, FormStep::Review);
    }

    #[test]
    fn test_prev_is_unconditional_and_clears_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut compose = compose_in(dir.path());
        compose.load();

        compose.next_step(); // blocked, error set
        assert!(compose.error.is_some());
        compose.prev_step();
        assert_eq!(compose.step, FormStep::Company); // clamped at 1
        assert!(compose.error.is_none());
    }

    #[test]
    fn test_mount_without_draft_arms_timers() {
        let dir = tempfile::tempdir().unwrap();
        let mut compose = compose_in(dir.path());
        assert!(!compose.drafts.is_auto_saving());
        compose.load();
        assert!(compose.drafts.is_auto_saving());
        compose.suspend();
        assert!(!compose.drafts.is_auto_saving());
    }

    #[test]
    fn test_recovery_restore_replaces_snapshot_wholesale() {
        let dir = tempfile::tempdir().unwrap();

        // A previous session leaves a draft behind.
        let mut previous = compose_in(dir.path());
        previous.load();
        fill_form(&mut previous.form);
        assert!(previous
            .drafts
            .manual_save(&previous.form, Utc::now().timestamp_millis()));
        let saved = previous.form.clone();
        previous.suspend();

        // A fresh mount negotiates recovery before editing, timers off.
        let mut compose = compose_in(dir.path());
        compose.load();
        assert!(compose.recovery.is_some());
        assert!(!compose.drafts.is_auto_saving());

        compose.resolve_recovery(true);
        assert!(compose.recovery.is_none());
        assert_eq!(compose.form, saved);
        assert!(compose.drafts.is_auto_saving());
        // Restore leaves the record intact until the next save.
        assert!(compose
            .drafts
            .saved_draft(Utc::now().timestamp_millis())
            .is_some());
    }

    #[test]
    fn test_recovery_discard_deletes_record_and_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let mut previous = compose_in(dir.path());
        previous.load();
        fill_form(&mut previous.form);
        previous
            .drafts
            .manual_save(&previous.form, Utc::now().timestamp_millis());
        previous.suspend();

        let mut compose = compose_in(dir.path());
        compose.load();
        assert!(compose.recovery.is_some());

        compose.resolve_recovery(false);
        assert_eq!(compose.form, ExperienceForm::default());
        assert!(compose
            .drafts
            .saved_draft(Utc::now().timestamp_millis())
            .is_none());
    }

    #[tokio::test]
    async fn test_submit_is_gated_by_single_flight_flag() {
        let dir = tempfile::tempdir().unwrap();
        let mut compose = compose_in(dir.path());
        compose.load();
        fill_form(&mut compose.form);
        compose.step = FormStep::Review;

        let (tx, _rx) = mpsc::unbounded_channel();
        let services = Services::init(AppConfig::default(), tx).unwrap();

        compose.submit(&services);
        assert!(compose.is_submitting());
        // A second press while in flight is ignored.
        compose.submit(&services);
        assert!(compose.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_snapshot_intact() {
        let dir = tempfile::tempdir().unwrap();
        let mut compose = compose_in(dir.path());
        compose.load();
        fill_form(&mut compose.form);
        compose.step = FormStep::Review;
        let before = compose.form.clone();

        let navigate = compose.on_submitted(Err("backend down".into()));
        assert!(!navigate);
        assert!(!compose.is_submitting());
        assert_eq!(compose.error.as_deref(), Some("backend down"));
        assert_eq!(compose.form, before);
        assert_eq!(compose.step, FormStep::Review);
    }

    #[test]
    fn test_successful_submission_clears_draft_and_resets() {
        let dir = tempfile::tempdir().unwrap();
        let mut compose = compose_in(dir.path());
        compose.load();
        fill_form(&mut compose.form);
        compose
            .drafts
            .manual_save(&compose.form, Utc::now().timestamp_millis());

        let navigate = compose.on_submitted(Ok(CreatedExperience { id: "e1".into() }));
        assert!(navigate);
        assert_eq!(compose.form, ExperienceForm::default());
        assert_eq!(compose.step, FormStep::Company);
        assert!(compose
            .drafts
            .saved_draft(Utc::now().timestamp_millis())
            .is_none());
    }
}
