//! Browse view: the shared feed of interview experiences.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::api::{ExperienceSummary, VoteDirection};
use crate::tui::events::{AppEvent, Notification, NotificationLevel};
use crate::tui::services::Services;
use crate::tui::theme;

pub struct BrowseState {
    experiences: Vec<ExperienceSummary>,
    list_state: ListState,
    loading: bool,
    error: Option<String>,
    show_detail: bool,
}

impl BrowseState {
    pub fn new() -> Self {
        Self {
            experiences: Vec::new(),
            list_state: ListState::default(),
            loading: false,
            error: None,
            show_detail: false,
        }
    }

    /// Kick off a list fetch; the result arrives as an `AppEvent`.
    pub fn load(&mut self, services: &Services) {
        if self.loading {
            return;
        }
        self.loading = true;
        self.error = None;

        let api = services.api.clone();
        let tx = services.event_tx.clone();
        tokio::spawn(async move {
            let result = api.list_experiences().await.map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::ExperiencesLoaded(result));
        });
    }

    pub fn poll(&mut self) {}

    pub fn on_loaded(&mut self, result: Result<Vec<ExperienceSummary>, String>) {
        self.loading = false;
        match result {
            Ok(experiences) => {
                self.experiences = experiences;
                if self.list_state.selected().is_none() && !self.experiences.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
    }

    fn selected(&self) -> Option<&ExperienceSummary> {
        self.list_state.selected().and_then(|i| self.experiences.get(i))
    }

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let key = match event {
            Event::Key(k @ KeyEvent { kind: KeyEventKind::Press, .. }) => k,
            _ => return false,
        };

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let i = match self.list_state.selected() {
                    Some(i) => (i + 1).min(self.experiences.len().saturating_sub(1)),
                    None => 0,
                };
                if !self.experiences.is_empty() {
                    self.list_state.select(Some(i));
                }
                true
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let i = self.list_state.selected().unwrap_or(0).saturating_sub(1);
                if !self.experiences.is_empty() {
                    self.list_state.select(Some(i));
                }
                true
            }
            KeyCode::Enter => {
                self.show_detail = !self.show_detail;
                true
            }
            KeyCode::Char('r') => {
                self.load(services);
                true
            }
            KeyCode::Char('v') => {
                self.send_vote(services, VoteDirection::Up);
                true
            }
            KeyCode::Char('V') => {
                self.send_vote(services, VoteDirection::Down);
                true
            }
            KeyCode::Char('b') => {
                if let Some(summary) = self.selected() {
                    let id = summary.id.clone();
                    let api = services.api.clone();
                    let tx = services.event_tx.clone();
                    tokio::spawn(async move {
                        let notification = match api.bookmark(&id).await {
                            Ok(()) => Notification::new("Bookmarked", NotificationLevel::Success),
                            Err(e) => Notification::new(e.to_string(), NotificationLevel::Error),
                        };
                        let _ = tx.send(AppEvent::Notification(notification));
                    });
                }
                true
            }
            KeyCode::Char('w') => {
                if let Some(summary) = self.selected() {
                    let id = summary.id.clone();
                    let api = services.api.clone();
                    let tx = services.event_tx.clone();
                    let target = services
                        .config
                        .data_dir()
                        .join("downloads")
                        .join(format!("{id}.pdf"));
                    tokio::spawn(async move {
                        let outcome = async {
                            let bytes = api.download(&id).await.map_err(|e| e.to_string())?;
                            if let Some(parent) = target.parent() {
                                tokio::fs::create_dir_all(parent)
                                    .await
                                    .map_err(|e| e.to_string())?;
                            }
                            tokio::fs::write(&target, bytes)
                                .await
                                .map_err(|e| e.to_string())?;
                            Ok::<_, String>(target.display().to_string())
                        }
                        .await;
                        let notification = match outcome {
                            Ok(path) => Notification::new(
                                format!("Saved to {path}"),
                                NotificationLevel::Success,
                            ),
                            Err(e) => Notification::new(e, NotificationLevel::Error),
                        };
                        let _ = tx.send(AppEvent::Notification(notification));
                    });
                }
                true
            }
            KeyCode::Char('x') => {
                if let Some(summary) = self.selected() {
                    let id = summary.id.clone();
                    let api = services.api.clone();
                    let tx = services.event_tx.clone();
                    tokio::spawn(async move {
                        let notification = match api.report(&id, "inappropriate content").await {
                            Ok(()) => Notification::new(
                                "Reported for moderation",
                                NotificationLevel::Info,
                            ),
                            Err(e) => Notification::new(e.to_string(), NotificationLevel::Error),
                        };
                        let _ = tx.send(AppEvent::Notification(notification));
                    });
                }
                true
            }
            _ => false,
        }
    }

    fn send_vote(&self, services: &Services, direction: VoteDirection) {
        let Some(summary) = self.selected() else {
            return;
        };
        let id = summary.id.clone();
        let api = services.api.clone();
        let tx = services.event_tx.clone();
        tokio::spawn(async move {
            let notification = match api.vote(&id, direction).await {
                Ok(()) => Notification::new("Vote recorded", NotificationLevel::Success),
                Err(e) => Notification::new(e.to_string(), NotificationLevel::Error),
            };
            let _ = tx.send(AppEvent::Notification(notification));
        });
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Interview Experiences ")
            .borders(Borders::ALL)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.loading && self.experiences.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "  Loading experiences…",
                    Style::default().fg(theme::TEXT_MUTED),
                ))),
                inner,
            );
            return;
        }

        if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(Span::styled(format!("  {error}"), theme::error_banner())),
                    Line::raw(""),
                    Line::from(Span::styled(
                        "  Press r to retry.",
                        Style::default().fg(theme::TEXT_MUTED),
                    )),
                ]),
                inner,
            );
            return;
        }

        if self.experiences.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "  No experiences yet. Press Tab to share yours.",
                    Style::default().fg(theme::TEXT_MUTED),
                ))),
                inner,
            );
            return;
        }

        let chunks = if self.show_detail {
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(inner)
        } else {
            Layout::horizontal([Constraint::Percentage(100)]).split(inner)
        };

        let items: Vec<ListItem> = self
            .experiences
            .iter()
            .map(|summary| {
                let rating = summary
                    .overall_rating
                    .map(|r| "★".repeat(r.min(5) as usize))
                    .unwrap_or_default();
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<20}", truncate(&summary.company_name, 19)),
                        Style::default().fg(theme::TEXT),
                    ),
                    Span::styled(
                        format!("{:<24}", truncate(&summary.role, 23)),
                        Style::default().fg(theme::TEXT_MUTED),
                    ),
                    Span::styled(rating, Style::default().fg(theme::ACCENT)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(theme::highlight())
            .highlight_symbol("▸ ");
        let mut render_state = self.list_state.clone();
        frame.render_stateful_widget(list, chunks[0], &mut render_state);

        if self.show_detail {
            self.render_detail(frame, chunks[1]);
        }
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Detail ")
            .borders(Borders::ALL)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(summary) = self.selected() else {
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(summary.company_name.clone(), theme::title())),
            Line::from(Span::styled(
                summary.role.clone(),
                Style::default().fg(theme::TEXT),
            )),
            Line::raw(""),
            Line::from(format!("  Rounds: {}", summary.round_count)),
        ];
        if let Some(result) = &summary.final_result {
            lines.push(Line::from(format!("  Result: {result}")));
        }
        if let Some(rating) = summary.overall_rating {
            lines.push(Line::from(format!("  Rating: {rating}/5")));
        }
        if let Some(tips) = &summary.key_tips {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled("  Key tips", theme::heading())));
            lines.push(Line::from(format!("  {}", truncate(tips, 120))));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("v/V", theme::key_hint()),
            Span::raw(":vote  "),
            Span::styled("b", theme::key_hint()),
            Span::raw(":bookmark  "),
            Span::styled("w", theme::key_hint()),
            Span::raw(":download  "),
            Span::styled("x", theme::key_hint()),
            Span::raw(":report"),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str) -> ExperienceSummary {
        ExperienceSummary {
            id: id.to_string(),
            company_name: "Acme".into(),
            role: "SDE Intern".into(),
            final_result: None,
            overall_rating: Some(4),
            round_count: 2,
            key_tips: None,
            created_at: None,
        }
    }

    #[test]
    fn test_on_loaded_selects_first_entry() {
        let mut browse = BrowseState::new();
        browse.loading = true;
        browse.on_loaded(Ok(vec![summary("a"), summary("b")]));
        assert_eq!(browse.list_state.selected(), Some(0));
        assert!(!browse.loading);
    }

    #[test]
    fn test_on_loaded_error_is_kept_for_render() {
        let mut browse = BrowseState::new();
        browse.loading = true;
        browse.on_loaded(Err("backend down".into()));
        assert_eq!(browse.error.as_deref(), Some("backend down"));
    }

    #[test]
    fn test_truncate_preserves_short_strings() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly-ten", 11), "exactly-ten");
        assert!(truncate("a very long company name", 10).ends_with('…'));
    }
}
