//! Step 4: review summary and submission gate.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::experience::{validate_step, ExperienceForm, FormStep};
use crate::tui::theme;

fn check_line(label: &str, ok: bool) -> Line<'static> {
    let (mark, color) = if ok {
        ("✓", theme::SUCCESS)
    } else {
        ("✗", theme::ERROR)
    };
    Line::from(vec![
        Span::styled(format!("  {mark} "), Style::default().fg(color)),
        Span::styled(label.to_string(), Style::default().fg(theme::TEXT)),
    ])
}

pub fn render(frame: &mut Frame, area: Rect, form: &ExperienceForm, submitting: bool) {
    let company = &form.company;
    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled("  Ready to submit?", theme::title())),
        Line::raw(""),
        Line::from(format!(
            "  {} · {}",
            if company.company_name.is_empty() {
                "(no company)"
            } else {
                &company.company_name
            },
            if company.role.is_empty() {
                "(no role)"
            } else {
                &company.role
            }
        )),
        Line::from(format!(
            "  {} round{}, {} technical / {} behavioral questions",
            form.rounds.len(),
            if form.rounds.len() == 1 { "" } else { "s" },
            form.rounds
                .iter()
                .map(|r| r.technical_questions.len())
                .sum::<usize>(),
            form.rounds
                .iter()
                .map(|r| r.behavioral_questions.len())
                .sum::<usize>(),
        )),
        Line::from(format!(
            "  Overall rating: {}   Anonymous: {}",
            form.overall_rating
                .map(|r| format!("{r}/5"))
                .unwrap_or_else(|| "—".into()),
            if form.is_anonymous { "yes" } else { "no" },
        )),
        Line::raw(""),
    ];

    // Recomputed on every render, never cached.
    for step in [FormStep::Company, FormStep::Rounds, FormStep::Reflection] {
        lines.push(check_line(step.label(), validate_step(form, step)));
    }

    lines.push(Line::raw(""));
    if submitting {
        lines.push(Line::from(Span::styled(
            "  Submitting…",
            Style::default().fg(theme::WARNING),
        )));
    } else {
        lines.push(Line::from(vec![
            Span::styled("  y/Enter", Style::default().fg(theme::SUCCESS)),
            Span::raw(" to submit, "),
            Span::styled("n/Esc", Style::default().fg(theme::ERROR)),
            Span::raw(" to go back."),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
