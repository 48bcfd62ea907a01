//! Step 3 editor: overall reflection and tips.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use ratatui_textarea::TextArea;

use crate::core::experience::types::cycle;
use crate::core::experience::{ExperienceForm, FinalResult};
use crate::tui::theme;

use super::{make_field, set_single_line, text_of, EditorResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectionField {
    Rating,
    FinalResult,
    Recommend,
    Anonymous,
    Narrative,
    PrepWeeks,
    Resources,
    KeyTips,
    Mistakes,
}

const ORDER: [ReflectionField; 9] = [
    ReflectionField::Rating,
    ReflectionField::FinalResult,
    ReflectionField::Recommend,
    ReflectionField::Anonymous,
    ReflectionField::Narrative,
    ReflectionField::PrepWeeks,
    ReflectionField::Resources,
    ReflectionField::KeyTips,
    ReflectionField::Mistakes,
];

const RATINGS: [u8; 5] = [1, 2, 3, 4, 5];

/// Mixed editor: selector rows for ratings/enums/toggles, text inputs for
/// the narrative fields. The resources input is a two-phase comma field,
/// committed when focus leaves it.
pub struct ReflectionEditor {
    focus: ReflectionField,
    narrative: TextArea<'static>,
    prep_weeks: TextArea<'static>,
    resources: TextArea<'static>,
    key_tips: TextArea<'static>,
    mistakes: TextArea<'static>,
}

impl ReflectionEditor {
    pub fn new() -> Self {
        let mut editor = Self {
            focus: ReflectionField::Rating,
            narrative: make_field(" Overall Experience (free text) "),
            prep_weeks: make_field(" Preparation Time (weeks) * "),
            resources: make_field(" Resources Used (comma separated) "),
            key_tips: make_field(" Key Tips * "),
            mistakes: make_field(" Mistakes To Avoid * "),
        };
        editor.apply_focus_styles();
        editor
    }

    pub fn sync_from(&mut self, form: &ExperienceForm) {
        set_single_line(&mut self.narrative, &form.overall_experience);
        let prep = form
            .preparation_time_weeks
            .map(|w| w.to_string())
            .unwrap_or_default();
        set_single_line(&mut self.prep_weeks, &prep);
        set_single_line(&mut self.resources, &form.resources_used.draft_text);
        set_single_line(&mut self.key_tips, &form.key_tips);
        set_single_line(&mut self.mistakes, &form.mistakes_to_avoid);
        self.apply_focus_styles();
    }

    fn is_selector(field: ReflectionField) -> bool {
        matches!(
            field,
            ReflectionField::Rating
                | ReflectionField::FinalResult
                | ReflectionField::Recommend
                | ReflectionField::Anonymous
        )
    }

    fn textarea_for(&mut self, field: ReflectionField) -> Option<&mut TextArea<'static>> {
        match field {
            ReflectionField::Narrative => Some(&mut self.narrative),
            ReflectionField::PrepWeeks => Some(&mut self.prep_weeks),
            ReflectionField::Resources => Some(&mut self.resources),
            ReflectionField::KeyTips => Some(&mut self.key_tips),
            ReflectionField::Mistakes => Some(&mut self.mistakes),
            _ => None,
        }
    }

    fn apply_focus_styles(&mut self) {
        let focus = self.focus;
        for field in [
            ReflectionField::Narrative,
            ReflectionField::PrepWeeks,
            ReflectionField::Resources,
            ReflectionField::KeyTips,
            ReflectionField::Mistakes,
        ] {
            let style = if field == focus {
                theme::border_focused()
            } else {
                theme::border_default()
            };
            if let Some(ta) = self.textarea_for(field) {
                if let Some(block) = ta.block() {
                    let block = block.clone().border_style(style);
                    ta.set_block(block);
                }
            }
        }
    }

    /// Commit the two-phase resources field; fired when focus leaves it or
    /// the step is left.
    pub fn blur(&mut self, form: &mut ExperienceForm) {
        form.resources_used.commit();
    }

    fn on_leave(&mut self, field: ReflectionField, form: &mut ExperienceForm) -> bool {
        if field == ReflectionField::Resources {
            form.resources_used.commit();
            return true;
        }
        false
    }

    fn focus_step(&mut self, forward: bool, form: &mut ExperienceForm) -> bool {
        let committed = self.on_leave(self.focus, form);
        let idx = ORDER.iter().position(|&f| f == self.focus).unwrap_or(0);
        let len = ORDER.len();
        self.focus = if forward {
            ORDER[(idx + 1) % len]
        } else {
            ORDER[(idx + len - 1) % len]
        };
        self.apply_focus_styles();
        committed
    }

    fn write_back(&mut self, form: &mut ExperienceForm) {
        match self.focus {
            ReflectionField::Narrative => form.overall_experience = text_of(&self.narrative),
            ReflectionField::PrepWeeks => {
                form.preparation_time_weeks = text_of(&self.prep_weeks).trim().parse().ok();
            }
            ReflectionField::Resources => {
                form.resources_used.set_text(text_of(&self.resources));
            }
            ReflectionField::KeyTips => form.key_tips = text_of(&self.key_tips),
            ReflectionField::Mistakes => form.mistakes_to_avoid = text_of(&self.mistakes),
            _ => {}
        }
    }

    fn cycle_selector(&self, form: &mut ExperienceForm, forward: bool) -> bool {
        match self.focus {
            ReflectionField::Rating => {
                form.overall_rating = cycle(&RATINGS, form.overall_rating, forward);
                true
            }
            ReflectionField::FinalResult => {
                form.final_result = cycle(&FinalResult::ALL, form.final_result, forward);
                true
            }
            ReflectionField::Recommend => {
                form.would_recommend = Some(match form.would_recommend {
                    Some(value) => !value,
                    None => forward,
                });
                true
            }
            ReflectionField::Anonymous => {
                form.is_anonymous = !form.is_anonymous;
                true
            }
            _ => false,
        }
    }

    pub fn handle_input(&mut self, key: KeyEvent, form: &mut ExperienceForm) -> EditorResponse {
        match key.code {
            KeyCode::Tab | KeyCode::Enter => {
                if self.focus_step(true, form) {
                    EditorResponse::Edited
                } else {
                    EditorResponse::Handled
                }
            }
            KeyCode::BackTab => {
                if self.focus_step(false, form) {
                    EditorResponse::Edited
                } else {
                    EditorResponse::Handled
                }
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                if Self::is_selector(self.focus) =>
            {
                let forward = key.code != KeyCode::Left;
                if self.cycle_selector(form, forward) {
                    EditorResponse::Edited
                } else {
                    EditorResponse::Handled
                }
            }
            _ => {
                if let Some(ta) = self.textarea_for(self.focus) {
                    if ta.input(key) {
                        self.write_back(form);
                        return EditorResponse::Edited;
                    }
                    return EditorResponse::Handled;
                }
                EditorResponse::Handled
            }
        }
    }

    fn selector_line(&self, field: ReflectionField, label: &str, value: String) -> Line<'static> {
        let focused = self.focus == field;
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            theme::highlight()
        } else {
            Style::default().fg(theme::TEXT_MUTED)
        };
        Line::from(vec![
            Span::styled(marker.to_string(), label_style),
            Span::styled(format!("{label:<22}"), label_style),
            Span::styled(value, Style::default().fg(theme::TEXT)),
            Span::styled(
                if focused { "  ◂ ▸" } else { "" }.to_string(),
                Style::default().fg(theme::TEXT_DIM),
            ),
        ])
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, form: &ExperienceForm) {
        let rows = Layout::vertical([
            Constraint::Length(4), // selector rows
            Constraint::Length(3), // narrative
            Constraint::Length(3), // prep + resources
            Constraint::Length(3), // tips + mistakes
            Constraint::Length(1), // help
        ])
        .split(area);

        let rating = form
            .overall_rating
            .map(|r| format!("{} ({r}/5)", "★".repeat(r.min(5) as usize)))
            .unwrap_or_else(|| "not set *".to_string());
        let final_result = form
            .final_result
            .map(|r| r.label().to_string())
            .unwrap_or_else(|| "not set *".to_string());
        let recommend = match form.would_recommend {
            Some(true) => "Yes".to_string(),
            Some(false) => "No".to_string(),
            None => "not set *".to_string(),
        };
        let anonymous = if form.is_anonymous { "Yes" } else { "No" }.to_string();

        let selectors = Paragraph::new(vec![
            self.selector_line(ReflectionField::Rating, "Overall Rating *", rating),
            self.selector_line(ReflectionField::FinalResult, "Final Result *", final_result),
            self.selector_line(ReflectionField::Recommend, "Would Recommend *", recommend),
            self.selector_line(ReflectionField::Anonymous, "Post Anonymously", anonymous),
        ]);
        frame.render_widget(selectors, rows[0]);

        frame.render_widget(&self.narrative, rows[1]);

        let mid = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[2]);
        frame.render_widget(&self.prep_weeks, mid[0]);
        frame.render_widget(&self.resources, mid[1]);

        let bottom =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[3]);
        frame.render_widget(&self.key_tips, bottom[0]);
        frame.render_widget(&self.mistakes, bottom[1]);

        let help = Paragraph::new(Line::from(vec![
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":next field  "),
            Span::styled("◂/▸", theme::key_hint()),
            Span::raw(":change selection  "),
            Span::styled("*", Style::default().fg(theme::WARNING)),
            Span::raw(" required"),
        ]));
        frame.render_widget(help, rows[4]);
    }

    #[cfg(test)]
    pub fn focus_field(&mut self, field: ReflectionField) {
        self.focus = field;
        self.apply_focus_styles();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(editor: &mut ReflectionEditor, form: &mut ExperienceForm, text: &str) {
        for c in text.chars() {
            editor.handle_input(key(KeyCode::Char(c)), form);
        }
    }

    #[test]
    fn test_resources_commit_on_blur_drops_trailing_entry() {
        let mut editor = ReflectionEditor::new();
        let mut form = ExperienceForm::default();
        editor.focus_field(ReflectionField::Resources);

        type_text(&mut editor, &mut form, "React, Node, ");
        // Still uncommitted: raw text only.
        assert_eq!(form.resources_used.draft_text, "React, Node, ");
        assert!(form.resources_used.items().is_empty());

        // Blur via Tab.
        let response = editor.handle_input(key(KeyCode::Tab), &mut form);
        assert_eq!(response, EditorResponse::Edited);
        assert_eq!(form.resources_used.items(), ["React", "Node"]);
    }

    #[test]
    fn test_rating_cycles_within_range() {
        let mut editor = ReflectionEditor::new();
        let mut form = ExperienceForm::default();
        editor.focus_field(ReflectionField::Rating);

        editor.handle_input(key(KeyCode::Right), &mut form);
        assert_eq!(form.overall_rating, Some(1));
        editor.handle_input(key(KeyCode::Left), &mut form);
        assert_eq!(form.overall_rating, Some(5));
    }

    #[test]
    fn test_prep_weeks_parses_zero_and_rejects_garbage() {
        let mut editor = ReflectionEditor::new();
        let mut form = ExperienceForm::default();
        editor.focus_field(ReflectionField::PrepWeeks);

        type_text(&mut editor, &mut form, "0");
        assert_eq!(form.preparation_time_weeks, Some(0));

        type_text(&mut editor, &mut form, "x");
        assert_eq!(form.preparation_time_weeks, None);
    }

    #[test]
    fn test_recommend_toggle_defines_boolean() {
        let mut editor = ReflectionEditor::new();
        let mut form = ExperienceForm::default();
        editor.focus_field(ReflectionField::Recommend);

        assert_eq!(form.would_recommend, None);
        editor.handle_input(key(KeyCode::Char(' ')), &mut form);
        assert_eq!(form.would_recommend, Some(true));
        editor.handle_input(key(KeyCode::Char(' ')), &mut form);
        assert_eq!(form.would_recommend, Some(false));
    }
}
