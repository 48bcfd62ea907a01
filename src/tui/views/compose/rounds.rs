//! Step 2 editor: the dynamic round and question collections.
//!
//! Navigation runs over a flattened list of editable targets for the
//! selected round (round fields, then the optional MCQ section, then each
//! technical and behavioral question). Text targets are edited through a
//! single shared input that is reloaded whenever the cursor moves;
//! selector targets (enums, ratings) cycle with the arrow keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui_textarea::TextArea;

use crate::core::experience::types::cycle;
use crate::core::experience::{
    Difficulty, ExperienceForm, McqSection, QuestionCategory, QuestionKind, Round, RoundResult,
    RoundType,
};
use crate::tui::theme;

use super::{make_field, opt_text, set_single_line, text_of, EditorResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundField {
    Type,
    Duration,
    Platform,
    Result,
    Experience,
    Tips,
    Feedback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechField {
    Question,
    Difficulty,
    Topics,
    Link,
    Solution,
    TimeGiven,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehavField {
    Question,
    Category,
    Answer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McqField {
    Total,
    TimeLimit,
    Topics,
    Difficulty,
    Cutoff,
}

/// One editable position within the selected round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundTarget {
    Meta(RoundField),
    Mcq(McqField),
    Technical(usize, TechField),
    Behavioral(usize, BehavField),
}

const META_ORDER: [RoundField; 7] = [
    RoundField::Type,
    RoundField::Duration,
    RoundField::Platform,
    RoundField::Result,
    RoundField::Experience,
    RoundField::Tips,
    RoundField::Feedback,
];

const MCQ_ORDER: [McqField; 5] = [
    McqField::Total,
    McqField::TimeLimit,
    McqField::Topics,
    McqField::Difficulty,
    McqField::Cutoff,
];

const TECH_ORDER: [TechField; 6] = [
    TechField::Question,
    TechField::Difficulty,
    TechField::Topics,
    TechField::Link,
    TechField::Solution,
    TechField::TimeGiven,
];

const BEHAV_ORDER: [BehavField; 3] = [
    BehavField::Question,
    BehavField::Category,
    BehavField::Answer,
];

const RATINGS: [u8; 5] = [1, 2, 3, 4, 5];

/// Flattened editable targets for one round, in display order.
fn targets(round: &Round) -> Vec<RoundTarget> {
    let mut list: Vec<RoundTarget> = META_ORDER.iter().map(|&f| RoundTarget::Meta(f)).collect();
    if round.mcq_section.is_some() {
        list.extend(MCQ_ORDER.iter().map(|&f| RoundTarget::Mcq(f)));
    }
    for (index, _) in round.technical_questions.iter().enumerate() {
        list.extend(TECH_ORDER.iter().map(move |&f| RoundTarget::Technical(index, f)));
    }
    for (index, _) in round.behavioral_questions.iter().enumerate() {
        list.extend(BEHAV_ORDER.iter().map(move |&f| RoundTarget::Behavioral(index, f)));
    }
    list
}

fn is_selector(target: RoundTarget) -> bool {
    matches!(
        target,
        RoundTarget::Meta(RoundField::Type)
            | RoundTarget::Meta(RoundField::Result)
            | RoundTarget::Meta(RoundField::Experience)
            | RoundTarget::Mcq(McqField::Difficulty)
            | RoundTarget::Technical(_, TechField::Difficulty)
            | RoundTarget::Behavioral(_, BehavField::Category)
    )
}

pub struct RoundsEditor {
    round_idx: usize,
    cursor: usize,
    active: TextArea<'static>,
}

impl RoundsEditor {
    pub fn new() -> Self {
        Self {
            round_idx: 0,
            cursor: 0,
            active: make_field(" Edit "),
        }
    }

    /// Reload cursor and active input from the snapshot (after restore,
    /// reset, or structural edits).
    pub fn sync_from(&mut self, form: &ExperienceForm) {
        self.round_idx = self.round_idx.min(form.rounds.len().saturating_sub(1));
        self.clamp_cursor(form);
        self.rebuild_active(form);
    }

    fn current_round<'f>(&self, form: &'f ExperienceForm) -> &'f Round {
        // round_idx is clamped on every structural change.
        &form.rounds[self.round_idx.min(form.rounds.len() - 1)]
    }

    fn current_target(&self, form: &ExperienceForm) -> RoundTarget {
        let list = targets(self.current_round(form));
        list[self.cursor.min(list.len() - 1)]
    }

    fn clamp_cursor(&mut self, form: &ExperienceForm) {
        let len = targets(self.current_round(form)).len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    fn rebuild_active(&mut self, form: &ExperienceForm) {
        let target = self.current_target(form);
        let value = self.value_of(form, target);
        set_single_line(&mut self.active, &value);
        let style = if is_selector(target) {
            theme::border_default()
        } else {
            theme::border_focused()
        };
        self.active.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(label_of(target))
                .border_style(style),
        );
    }

    fn value_of(&self, form: &ExperienceForm, target: RoundTarget) -> String {
        let round = self.current_round(form);
        let opt_string = |value: &Option<String>| value.clone().unwrap_or_default();
        let opt_num = |value: Option<u32>| value.map(|v| v.to_string()).unwrap_or_default();
        match target {
            RoundTarget::Meta(RoundField::Duration) => opt_num(round.duration_minutes),
            RoundTarget::Meta(RoundField::Platform) => opt_string(&round.platform),
            RoundTarget::Meta(RoundField::Tips) => round.tips.clone(),
            RoundTarget::Meta(RoundField::Feedback) => opt_string(&round.feedback),
            RoundTarget::Mcq(field) => match (&round.mcq_section, field) {
                (Some(mcq), McqField::Total) => opt_num(mcq.total_questions),
                (Some(mcq), McqField::TimeLimit) => opt_num(mcq.time_limit_minutes),
                (Some(mcq), McqField::Topics) => mcq.topics.draft_text.clone(),
                (Some(mcq), McqField::Cutoff) => opt_string(&mcq.cutoff),
                _ => String::new(),
            },
            RoundTarget::Technical(index, field) => {
                match (round.technical_questions.get(index), field) {
                    (Some(q), TechField::Question) => q.question.clone(),
                    (Some(q), TechField::Topics) => q.topics.draft_text.clone(),
                    (Some(q), TechField::Link) => opt_string(&q.leetcode_link),
                    (Some(q), TechField::Solution) => opt_string(&q.solution),
                    (Some(q), TechField::TimeGiven) => opt_num(q.time_given_minutes),
                    _ => String::new(),
                }
            }
            RoundTarget::Behavioral(index, field) => {
                match (round.behavioral_questions.get(index), field) {
                    (Some(q), BehavField::Question) => q.question.clone(),
                    (Some(q), BehavField::Answer) => opt_string(&q.your_answer),
                    _ => String::new(),
                }
            }
            // Selector targets have no text representation to edit.
            _ => String::new(),
        }
    }

    fn write_back(&mut self, form: &mut ExperienceForm) {
        let target = self.current_target(form);
        let text = text_of(&self.active);
        let round_idx = self.round_idx;
        match target {
            RoundTarget::Meta(field) => {
                form.update_round(round_idx, |round| match field {
                    RoundField::Duration => round.duration_minutes = text.trim().parse().ok(),
                    RoundField::Platform => round.platform = opt_text(text.clone()),
                    RoundField::Tips => round.tips = text.clone(),
                    RoundField::Feedback => round.feedback = opt_text(text.clone()),
                    _ => {}
                });
            }
            RoundTarget::Mcq(field) => {
                form.update_round(round_idx, |round| {
                    if let Some(mcq) = &mut round.mcq_section {
                        match field {
                            McqField::Total => mcq.total_questions = text.trim().parse().ok(),
                            McqField::TimeLimit => {
                                mcq.time_limit_minutes = text.trim().parse().ok()
                            }
                            McqField::Topics => mcq.topics.set_text(text.clone()),
                            McqField::Cutoff => mcq.cutoff = opt_text(text.clone()),
                            McqField::Difficulty => {}
                        }
                    }
                });
            }
            RoundTarget::Technical(index, field) => {
                form.update_technical_question(round_idx, index, |q| match field {
                    TechField::Question => q.question = text.clone(),
                    TechField::Topics => q.topics.set_text(text.clone()),
                    TechField::Link => q.leetcode_link = opt_text(text.clone()),
                    TechField::Solution => q.solution = opt_text(text.clone()),
                    TechField::TimeGiven => q.time_given_minutes = text.trim().parse().ok(),
                    TechField::Difficulty => {}
                });
            }
            RoundTarget::Behavioral(index, field) => {
                form.update_behavioral_question(round_idx, index, |q| match field {
                    BehavField::Question => q.question = text.clone(),
                    BehavField::Answer => q.your_answer = opt_text(text.clone()),
                    BehavField::Category => {}
                });
            }
        }
    }

    /// Commit any focused two-phase topics field. Fired when the cursor
    /// moves away or the step is left. Returns whether a commit happened.
    pub fn blur(&mut self, form: &mut ExperienceForm) -> bool {
        let target = self.current_target(form);
        let round_idx = self.round_idx;
        match target {
            RoundTarget::Mcq(McqField::Topics) => form.update_round(round_idx, |round| {
                if let Some(mcq) = &mut round.mcq_section {
                    mcq.topics.commit();
                }
            }),
            RoundTarget::Technical(index, TechField::Topics) => {
                form.update_technical_question(round_idx, index, |q| q.topics.commit())
            }
            _ => false,
        }
    }

    fn cycle_selector(&self, form: &mut ExperienceForm, forward: bool) -> bool {
        let target = self.current_target(form);
        let round_idx = self.round_idx;
        match target {
            RoundTarget::Meta(RoundField::Type) => form.update_round(round_idx, |round| {
                round.round_type = cycle(&RoundType::ALL, round.round_type, forward);
            }),
            RoundTarget::Meta(RoundField::Result) => form.update_round(round_idx, |round| {
                round.round_result = cycle(&RoundResult::ALL, round.round_result, forward);
            }),
            RoundTarget::Meta(RoundField::Experience) => form.update_round(round_idx, |round| {
                round.overall_experience = cycle(&RATINGS, round.overall_experience, forward);
            }),
            RoundTarget::Mcq(McqField::Difficulty) => form.update_round(round_idx, |round| {
                if let Some(mcq) = &mut round.mcq_section {
                    mcq.difficulty = cycle(&Difficulty::ALL, Some(mcq.difficulty), forward)
                        .unwrap_or(mcq.difficulty);
                }
            }),
            RoundTarget::Technical(index, TechField::Difficulty) => {
                form.update_technical_question(round_idx, index, |q| {
                    q.difficulty =
                        cycle(&Difficulty::ALL, Some(q.difficulty), forward).unwrap_or(q.difficulty);
                })
            }
            RoundTarget::Behavioral(index, BehavField::Category) => {
                form.update_behavioral_question(round_idx, index, |q| {
                    q.category = cycle(&QuestionCategory::ALL, Some(q.category), forward)
                        .unwrap_or(q.category);
                })
            }
            _ => false,
        }
    }

    fn move_cursor(&mut self, form: &mut ExperienceForm, forward: bool) -> bool {
        let committed = self.blur(form);
        let len = targets(self.current_round(form)).len();
        self.cursor = if forward {
            (self.cursor + 1) % len
        } else {
            (self.cursor + len - 1) % len
        };
        self.rebuild_active(form);
        committed
    }

    fn switch_round(&mut self, form: &mut ExperienceForm, forward: bool) {
        self.blur(form);
        let last = form.rounds.len() - 1;
        self.round_idx = if forward {
            (self.round_idx + 1).min(last)
        } else {
            self.round_idx.saturating_sub(1)
        };
        self.cursor = 0;
        self.rebuild_active(form);
    }

    /// Position the cursor on a freshly added question's first field.
    fn focus_question(&mut self, form: &ExperienceForm, kind: QuestionKind, index: usize) {
        let wanted = match kind {
            QuestionKind::Technical => RoundTarget::Technical(index, TechField::Question),
            QuestionKind::Behavioral => RoundTarget::Behavioral(index, BehavField::Question),
        };
        let list = targets(self.current_round(form));
        if let Some(position) = list.iter().position(|&t| t == wanted) {
            self.cursor = position;
        }
        self.rebuild_active(form);
    }

    pub fn handle_input(&mut self, key: KeyEvent, form: &mut ExperienceForm) -> EditorResponse {
        if key.modifiers == KeyModifiers::CONTROL {
            match key.code {
                KeyCode::Char('a') => {
                    self.blur(form);
                    self.round_idx = form.add_round();
                    self.cursor = 0;
                    self.rebuild_active(form);
                    return EditorResponse::Edited;
                }
                KeyCode::Char('x') => {
                    self.blur(form);
                    if form.remove_round(self.round_idx) {
                        self.round_idx = self.round_idx.min(form.rounds.len() - 1);
                        self.cursor = 0;
                        self.rebuild_active(form);
                        return EditorResponse::Edited;
                    }
                    return EditorResponse::Handled;
                }
                KeyCode::Char('t') => {
                    self.blur(form);
                    if let Some(index) = form.add_question(self.round_idx, QuestionKind::Technical)
                    {
                        self.focus_question(form, QuestionKind::Technical, index);
                        return EditorResponse::Edited;
                    }
                    return EditorResponse::Handled;
                }
                KeyCode::Char('b') => {
                    self.blur(form);
                    if let Some(index) =
                        form.add_question(self.round_idx, QuestionKind::Behavioral)
                    {
                        self.focus_question(form, QuestionKind::Behavioral, index);
                        return EditorResponse::Edited;
                    }
                    return EditorResponse::Handled;
                }
                KeyCode::Char('d') => {
                    let removed = match self.current_target(form) {
                        RoundTarget::Technical(index, _) => {
                            form.remove_question(self.round_idx, index, QuestionKind::Technical)
                        }
                        RoundTarget::Behavioral(index, _) => {
                            form.remove_question(self.round_idx, index, QuestionKind::Behavioral)
                        }
                        _ => false,
                    };
                    if removed {
                        self.clamp_cursor(form);
                        self.rebuild_active(form);
                        return EditorResponse::Edited;
                    }
                    return EditorResponse::Handled;
                }
                KeyCode::Char('q') => {
                    self.blur(form);
                    form.update_round(self.round_idx, |round| {
                        round.mcq_section = match round.mcq_section {
                            Some(_) => None,
                            None => Some(McqSection::default()),
                        };
                    });
                    self.clamp_cursor(form);
                    self.rebuild_active(form);
                    return EditorResponse::Edited;
                }
                KeyCode::Left => {
                    self.switch_round(form, false);
                    return EditorResponse::Handled;
                }
                KeyCode::Right => {
                    self.switch_round(form, true);
                    return EditorResponse::Handled;
                }
                _ => return EditorResponse::Ignored,
            }
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
                if self.move_cursor(form, true) {
                    EditorResponse::Edited
                } else {
                    EditorResponse::Handled
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if self.move_cursor(form, false) {
                    EditorResponse::Edited
                } else {
                    EditorResponse::Handled
                }
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                if is_selector(self.current_target(form)) =>
            {
                let forward = key.code != KeyCode::Left;
                if self.cycle_selector(form, forward) {
                    EditorResponse::Edited
                } else {
                    EditorResponse::Handled
                }
            }
            _ => {
                if is_selector(self.current_target(form)) {
                    return EditorResponse::Handled;
                }
                if self.active.input(key) {
                    self.write_back(form);
                    EditorResponse::Edited
                } else {
                    EditorResponse::Handled
                }
            }
        }
    }

    fn row_line(&self, form: &ExperienceForm, position: usize, target: RoundTarget) -> Line<'static> {
        let focused = position == self.cursor;
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            theme::highlight()
        } else {
            Style::default().fg(theme::TEXT_MUTED)
        };
        let display = self.display_value(form, target);
        Line::from(vec![
            Span::styled(marker.to_string(), label_style),
            Span::styled(format!("{:<30}", label_of(target)), label_style),
            Span::styled(display, Style::default().fg(theme::TEXT)),
        ])
    }

    fn display_value(&self, form: &ExperienceForm, target: RoundTarget) -> String {
        let round = self.current_round(form);
        match target {
            RoundTarget::Meta(RoundField::Type) => round
                .round_type
                .map(|t| t.label().to_string())
                .unwrap_or_else(|| "not set *".into()),
            RoundTarget::Meta(RoundField::Result) => round
                .round_result
                .map(|r| r.label().to_string())
                .unwrap_or_else(|| "not set *".into()),
            RoundTarget::Meta(RoundField::Experience) => round
                .overall_experience
                .map(|e| format!("{e}/5"))
                .unwrap_or_else(|| "not set *".into()),
            RoundTarget::Mcq(McqField::Difficulty) => round
                .mcq_section
                .as_ref()
                .map(|m| m.difficulty.label().to_string())
                .unwrap_or_default(),
            RoundTarget::Technical(index, TechField::Difficulty) => round
                .technical_questions
                .get(index)
                .map(|q| q.difficulty.label().to_string())
                .unwrap_or_default(),
            RoundTarget::Behavioral(index, BehavField::Category) => round
                .behavioral_questions
                .get(index)
                .map(|q| q.category.label().to_string())
                .unwrap_or_default(),
            other => {
                let text = self.value_of(form, other);
                if text.is_empty() {
                    "—".into()
                } else {
                    text
                }
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, form: &ExperienceForm) {
        let rows = Layout::vertical([
            Constraint::Length(1), // round header
            Constraint::Min(4),    // target rows
            Constraint::Length(3), // active editor
            Constraint::Length(2), // help
        ])
        .split(area);

        let round = self.current_round(form);
        let header = Line::from(vec![
            Span::styled(
                format!(" Round {} of {} ", round.round_number, form.rounds.len()),
                theme::heading(),
            ),
            Span::styled(
                format!(
                    " {} technical · {} behavioral{}",
                    round.technical_questions.len(),
                    round.behavioral_questions.len(),
                    if round.mcq_section.is_some() {
                        " · MCQ section"
                    } else {
                        ""
                    }
                ),
                Style::default().fg(theme::TEXT_MUTED),
            ),
        ]);
        frame.render_widget(Paragraph::new(header), rows[0]);

        // Windowed target list so long question lists stay visible.
        let list = targets(round);
        let visible = rows[1].height as usize;
        let start = if self.cursor >= visible {
            self.cursor + 1 - visible
        } else {
            0
        };
        let lines: Vec<Line> = list
            .iter()
            .enumerate()
            .skip(start)
            .take(visible)
            .map(|(position, &target)| self.row_line(form, position, target))
            .collect();
        frame.render_widget(Paragraph::new(lines), rows[1]);

        if is_selector(self.current_target(form)) {
            let hint = Paragraph::new(Line::from(vec![
                Span::styled("  ◂ ▸", theme::key_hint()),
                Span::raw(" change selection"),
            ]))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(label_of(self.current_target(form)))
                    .border_style(theme::border_focused()),
            );
            frame.render_widget(hint, rows[2]);
        } else {
            frame.render_widget(&self.active, rows[2]);
        }

        let help = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Tab/↑↓", theme::key_hint()),
                Span::raw(":field  "),
                Span::styled("Ctrl+←/→", theme::key_hint()),
                Span::raw(":round  "),
                Span::styled("Ctrl+A", theme::key_hint()),
                Span::raw(":add round  "),
                Span::styled("Ctrl+X", theme::key_hint()),
                Span::raw(":remove round"),
            ]),
            Line::from(vec![
                Span::styled("Ctrl+T", theme::key_hint()),
                Span::raw(":add technical  "),
                Span::styled("Ctrl+B", theme::key_hint()),
                Span::raw(":add behavioral  "),
                Span::styled("Ctrl+D", theme::key_hint()),
                Span::raw(":remove question  "),
                Span::styled("Ctrl+Q", theme::key_hint()),
                Span::raw(":toggle MCQ"),
            ]),
        ]);
        frame.render_widget(help, rows[3]);
    }

    #[cfg(test)]
    pub fn cursor_target(&self, form: &ExperienceForm) -> RoundTarget {
        self.current_target(form)
    }

    #[cfg(test)]
    pub fn selected_round(&self) -> usize {
        self.round_idx
    }
}

fn label_of(target: RoundTarget) -> String {
    match target {
        RoundTarget::Meta(RoundField::Type) => " Round Type * ".into(),
        RoundTarget::Meta(RoundField::Duration) => " Duration (minutes) * ".into(),
        RoundTarget::Meta(RoundField::Platform) => " Platform ".into(),
        RoundTarget::Meta(RoundField::Result) => " Round Result * ".into(),
        RoundTarget::Meta(RoundField::Experience) => " Round Experience (1-5) * ".into(),
        RoundTarget::Meta(RoundField::Tips) => " Round Tips ".into(),
        RoundTarget::Meta(RoundField::Feedback) => " Feedback ".into(),
        RoundTarget::Mcq(McqField::Total) => " MCQ Total Questions ".into(),
        RoundTarget::Mcq(McqField::TimeLimit) => " MCQ Time Limit (minutes) ".into(),
        RoundTarget::Mcq(McqField::Topics) => " MCQ Topics (comma separated) ".into(),
        RoundTarget::Mcq(McqField::Difficulty) => " MCQ Difficulty ".into(),
        RoundTarget::Mcq(McqField::Cutoff) => " MCQ Cutoff ".into(),
        RoundTarget::Technical(index, field) => {
            let name = match field {
                TechField::Question => "Question",
                TechField::Difficulty => "Difficulty",
                TechField::Topics => "Topics (comma separated)",
                TechField::Link => "LeetCode Link",
                TechField::Solution => "Solution Approach",
                TechField::TimeGiven => "Time Given (minutes)",
            };
            format!(" Tech Q{} {name} ", index + 1)
        }
        RoundTarget::Behavioral(index, field) => {
            let name = match field {
                BehavField::Question => "Question",
                BehavField::Category => "Category",
                BehavField::Answer => "Your Answer",
            };
            format!(" Behavioral Q{} {name} ", index + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn editor_with_form() -> (RoundsEditor, ExperienceForm) {
        let mut editor = RoundsEditor::new();
        let form = ExperienceForm::default();
        editor.sync_from(&form);
        (editor, form)
    }

    #[test]
    fn test_targets_grow_with_questions_and_mcq() {
        let mut round = Round::numbered(1);
        assert_eq!(targets(&round).len(), META_ORDER.len());

        round.mcq_section = Some(McqSection::default());
        round.technical_questions.push(Default::default());
        round.behavioral_questions.push(Default::default());
        assert_eq!(
            targets(&round).len(),
            META_ORDER.len() + MCQ_ORDER.len() + TECH_ORDER.len() + BEHAV_ORDER.len()
        );
    }

    #[test]
    fn test_add_round_selects_new_round() {
        let (mut editor, mut form) = editor_with_form();
        let response = editor.handle_input(ctrl('a'), &mut form);
        assert_eq!(response, EditorResponse::Edited);
        assert_eq!(form.rounds.len(), 2);
        assert_eq!(editor.selected_round(), 1);
        assert_eq!(form.rounds[1].round_number, 2);
    }

    #[test]
    fn test_remove_only_round_is_ignored() {
        let (mut editor, mut form) = editor_with_form();
        let response = editor.handle_input(ctrl('x'), &mut form);
        assert_eq!(response, EditorResponse::Handled);
        assert_eq!(form.rounds.len(), 1);
    }

    #[test]
    fn test_remove_round_renumbers_and_clamps_selection() {
        let (mut editor, mut form) = editor_with_form();
        editor.handle_input(ctrl('a'), &mut form);
        editor.handle_input(ctrl('a'), &mut form);
        assert_eq!(editor.selected_round(), 2);

        editor.handle_input(ctrl('x'), &mut form);
        assert_eq!(form.rounds.len(), 2);
        assert_eq!(editor.selected_round(), 1);
        assert_eq!(form.rounds[1].round_number, 2);
    }

    #[test]
    fn test_add_technical_question_focuses_its_question_field() {
        let (mut editor, mut form) = editor_with_form();
        editor.handle_input(ctrl('t'), &mut form);
        assert_eq!(form.rounds[0].technical_questions.len(), 1);
        assert_eq!(
            editor.cursor_target(&form),
            RoundTarget::Technical(0, TechField::Question)
        );

        // Typing lands in the new question.
        for c in "two sum".chars() {
            editor.handle_input(key(KeyCode::Char(c)), &mut form);
        }
        assert_eq!(form.rounds[0].technical_questions[0].question, "two sum");
    }

    #[test]
    fn test_selector_cycles_round_type() {
        let (mut editor, mut form) = editor_with_form();
        // Cursor starts on Round Type.
        assert_eq!(
            editor.cursor_target(&form),
            RoundTarget::Meta(RoundField::Type)
        );
        editor.handle_input(key(KeyCode::Right), &mut form);
        assert_eq!(form.rounds[0].round_type, Some(RoundType::OnlineAssessment));
        editor.handle_input(key(KeyCode::Right), &mut form);
        assert_eq!(form.rounds[0].round_type, Some(RoundType::Technical));
    }

    #[test]
    fn test_topics_commit_when_cursor_moves_away() {
        let (mut editor, mut form) = editor_with_form();
        editor.handle_input(ctrl('t'), &mut form);
        // Move from Question to Difficulty to Topics.
        editor.handle_input(key(KeyCode::Tab), &mut form);
        editor.handle_input(key(KeyCode::Tab), &mut form);
        assert_eq!(
            editor.cursor_target(&form),
            RoundTarget::Technical(0, TechField::Topics)
        );

        for c in "graphs, trees, ".chars() {
            editor.handle_input(key(KeyCode::Char(c)), &mut form);
        }
        assert!(form.rounds[0].technical_questions[0].topics.items().is_empty());

        editor.handle_input(key(KeyCode::Tab), &mut form);
        assert_eq!(
            form.rounds[0].technical_questions[0].topics.items(),
            ["graphs", "trees"]
        );
    }

    #[test]
    fn test_mcq_toggle_adds_and_removes_section() {
        let (mut editor, mut form) = editor_with_form();
        editor.handle_input(ctrl('q'), &mut form);
        assert!(form.rounds[0].mcq_section.is_some());
        editor.handle_input(ctrl('q'), &mut form);
        assert!(form.rounds[0].mcq_section.is_none());
    }

    #[test]
    fn test_duration_write_back_parses_numbers() {
        let (mut editor, mut form) = editor_with_form();
        editor.handle_input(key(KeyCode::Tab), &mut form); // Type -> Duration
        assert_eq!(
            editor.cursor_target(&form),
            RoundTarget::Meta(RoundField::Duration)
        );
        for c in "45".chars() {
            editor.handle_input(key(KeyCode::Char(c)), &mut form);
        }
        assert_eq!(form.rounds[0].duration_minutes, Some(45));
    }

    #[test]
    fn test_remove_question_clamps_cursor() {
        let (mut editor, mut form) = editor_with_form();
        editor.handle_input(ctrl('b'), &mut form);
        assert_eq!(
            editor.cursor_target(&form),
            RoundTarget::Behavioral(0, BehavField::Question)
        );
        editor.handle_input(ctrl('d'), &mut form);
        assert!(form.rounds[0].behavioral_questions.is_empty());
        // Cursor back on a valid meta target.
        assert!(matches!(editor.cursor_target(&form), RoundTarget::Meta(_)));
    }
}
