//! Step 1 editor: company and role details.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui_textarea::TextArea;

use crate::core::experience::ExperienceForm;
use crate::tui::theme;

use super::{make_field, opt_text, set_single_line, text_of, EditorResponse};

const LABELS: [&str; 10] = [
    " Company Name * ",
    " Role * ",
    " Department * ",
    " Internship Type * ",
    " Duration * ",
    " Location * ",
    " Application Date * ",
    " City ",
    " Stipend ",
    " Currency ",
];

/// Grid of single-line inputs over [`crate::core::experience::CompanyInfo`].
///
/// Every keystroke writes through to the snapshot so the draft timers always
/// serialize current state.
pub struct CompanyEditor {
    fields: Vec<TextArea<'static>>,
    focus: usize,
}

impl CompanyEditor {
    pub fn new() -> Self {
        let mut editor = Self {
            fields: LABELS.iter().map(|label| make_field(label)).collect(),
            focus: 0,
        };
        editor.apply_focus_styles();
        editor
    }

    /// Reload every input from the snapshot (after restore or reset).
    pub fn sync_from(&mut self, form: &ExperienceForm) {
        for index in 0..self.fields.len() {
            let value = Self::value_of(form, index);
            set_single_line(&mut self.fields[index], &value);
        }
        self.apply_focus_styles();
    }

    fn value_of(form: &ExperienceForm, index: usize) -> String {
        let company = &form.company;
        match index {
            0 => company.company_name.clone(),
            1 => company.role.clone(),
            2 => company.department.clone(),
            3 => company.internship_type.clone(),
            4 => company.duration.clone(),
            5 => company.location.clone(),
            6 => company.application_date.clone(),
            7 => company.city.clone().unwrap_or_default(),
            8 => company.stipend.clone().unwrap_or_default(),
            _ => company.currency.clone().unwrap_or_default(),
        }
    }

    fn write_back(&self, form: &mut ExperienceForm) {
        let text = text_of(&self.fields[self.focus]);
        let company = &mut form.company;
        match self.focus {
            0 => company.company_name = text,
            1 => company.role = text,
            2 => company.department = text,
            3 => company.internship_type = text,
            4 => company.duration = text,
            5 => company.location = text,
            6 => company.application_date = text,
            7 => company.city = opt_text(text),
            8 => company.stipend = opt_text(text),
            _ => company.currency = opt_text(text),
        }
    }

    fn apply_focus_styles(&mut self) {
        for (index, field) in self.fields.iter_mut().enumerate() {
            let style = if index == self.focus {
                theme::border_focused()
            } else {
                theme::border_default()
            };
            field.set_block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(LABELS[index])
                    .border_style(style),
            );
        }
    }

    fn focus_step(&mut self, forward: bool) {
        let len = self.fields.len();
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
        self.apply_focus_styles();
    }

    /// No two-phase fields on this step; nothing to commit on blur.
    pub fn blur(&mut self, _form: &mut ExperienceForm) {}

    pub fn handle_input(&mut self, key: KeyEvent, form: &mut ExperienceForm) -> EditorResponse {
        match key.code {
            KeyCode::Tab | KeyCode::Enter => {
                self.focus_step(true);
                EditorResponse::Handled
            }
            KeyCode::BackTab => {
                self.focus_step(false);
                EditorResponse::Handled
            }
            _ => {
                if self.fields[self.focus].input(key) {
                    self.write_back(form);
                    EditorResponse::Edited
                } else {
                    EditorResponse::Handled
                }
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

        for (row, pair) in self.fields.chunks(2).enumerate() {
            let cols =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(rows[row]);
            for (col, field) in pair.iter().enumerate() {
                frame.render_widget(field, cols[col]);
            }
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled("Tab/Enter", theme::key_hint()),
            Span::raw(":next field  "),
            Span::styled("Ctrl+R", theme::key_hint()),
            Span::raw(":register new company  "),
            Span::styled("*", Style::default().fg(theme::WARNING)),
            Span::raw(" required"),
        ]));
        frame.render_widget(help, rows[5]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn type_text(editor: &mut CompanyEditor, form: &mut ExperienceForm, text: &str) {
        for c in text.chars() {
            editor.handle_input(
                KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE),
                form,
            );
        }
    }

    #[test]
    fn test_typing_writes_through_to_snapshot() {
        let mut editor = CompanyEditor::new();
        let mut form = ExperienceForm::default();
        type_text(&mut editor, &mut form, "Acme");
        assert_eq!(form.company.company_name, "Acme");
    }

    #[test]
    fn test_enter_advances_and_wraps() {
        let mut editor = CompanyEditor::new();
        let mut form = ExperienceForm::default();
        for _ in 0..LABELS.len() {
            editor.handle_input(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &mut form);
        }
        assert_eq!(editor.focus, 0);
    }

    #[test]
    fn test_optional_field_blank_maps_to_none() {
        let mut editor = CompanyEditor::new();
        let mut form = ExperienceForm::default();
        // Focus the City field (index 7), type then erase.
        editor.focus = 7;
        editor.apply_focus_styles();
        type_text(&mut editor, &mut form, "Pune");
        assert_eq!(form.company.city.as_deref(), Some("Pune"));
        for _ in 0..4 {
            editor.handle_input(
                KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
                &mut form,
            );
        }
        assert_eq!(form.company.city, None);
    }

    #[test]
    fn test_sync_from_reloads_values() {
        let mut form = ExperienceForm::default();
        form.company.role = "SDE Intern".into();
        let mut editor = CompanyEditor::new();
        editor.sync_from(&form);
        assert_eq!(text_of(&editor.fields[1]), "SDE Intern");
    }
}
