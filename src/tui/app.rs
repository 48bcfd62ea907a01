use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, Focus, Notification, NotificationLevel};
use super::services::Services;
use super::theme;
use super::views::browse::BrowseState;
use super::views::compose::ComposeState;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Currently focused top-level view.
    pub focus: Focus,
    /// Browse view state.
    pub browse: BrowseState,
    /// Compose (guided form) view state.
    pub compose: ComposeState,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Receiver for backend events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Sender for pushing events from within the app.
    #[allow(dead_code)]
    event_tx: mpsc::UnboundedSender<AppEvent>,
    /// Backend services handle.
    services: Services,
}

impl AppState {
    pub fn new(
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
        services: Services,
        prefill: Option<&str>,
    ) -> Self {
        let compose = ComposeState::new(services.draft_store(), prefill);
        Self {
            running: true,
            focus: Focus::Browse,
            browse: BrowseState::new(),
            compose,
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            event_rx,
            event_tx,
            services,
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        // Kick off the initial feed fetch.
        self.browse.load(&self.services);

        while self.running {
            // Render
            terminal.draw(|frame| self.render(frame))?;

            // Select next event
            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Priority 1: Help modal
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Priority 2: Focused view
                if self.dispatch_view_input(&crossterm_event) {
                    return;
                }

                // Priority 3: Global keybindings
                if let Some(action) = self.map_input_to_action(crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Tick => self.on_tick(),
            AppEvent::ExperiencesLoaded(result) => {
                self.browse.on_loaded(result);
            }
            AppEvent::ExperienceSubmitted(result) => {
                if self.compose.on_submitted(result) {
                    self.push_notification(
                        "Experience submitted. Thanks for sharing!".to_string(),
                        NotificationLevel::Success,
                    );
                    self.set_focus(Focus::Browse);
                    self.browse.load(&self.services);
                }
            }
            AppEvent::CompanyRegistered(result) => match result {
                Ok(company) => self.push_notification(
                    format!("Company \"{}\" submitted for review", company.name),
                    NotificationLevel::Success,
                ),
                Err(message) => self.push_notification(message, NotificationLevel::Error),
            },
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    /// Dispatch input to the currently focused view. Returns true if consumed.
    fn dispatch_view_input(&mut self, event: &Event) -> bool {
        match self.focus {
            Focus::Browse => self.browse.handle_input(event, &self.services),
            Focus::Compose => self.compose.handle_input(event, &self.services),
        }
    }

    // ── Input mapping ───────────────────────────────────────────────────

    /// Map help modal input to action.
    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (modifiers, code) {
            // Ctrl+C → quit from anywhere
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            // Ctrl+G → cycle views even while the form owns the keyboard
            (KeyModifiers::CONTROL, KeyCode::Char('g')) => Some(Action::TabNext),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Tab => Some(Action::TabNext),
                KeyCode::BackTab => Some(Action::TabPrev),
                KeyCode::Char('1') => Some(Action::FocusBrowse),
                KeyCode::Char('2') => Some(Action::FocusCompose),
                _ => None,
            },
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::FocusBrowse => self.set_focus(Focus::Browse),
            Action::FocusCompose => self.set_focus(Focus::Compose),
            Action::TabNext => {
                let next = self.focus.next();
                self.set_focus(next);
            }
            Action::TabPrev => {
                let prev = self.focus.prev();
                self.set_focus(prev);
            }
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
            Action::RefreshBrowse => self.browse.load(&self.services),
        }
    }

    /// Switch views, pairing the form's mount/unmount lifecycle with focus.
    fn set_focus(&mut self, focus: Focus) {
        if focus == self.focus {
            return;
        }
        if self.focus == Focus::Compose {
            self.compose.suspend();
        }
        self.focus = focus;
        match focus {
            Focus::Browse => self.browse.load(&self.services),
            Focus::Compose => self.compose.load(),
        }
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: 100,
        });

        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, drive view timers.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);

        self.browse.poll();
        self.compose.tick();
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

        match self.focus {
            Focus::Browse => self.browse.render(frame, chunks[0]),
            Focus::Compose => self.compose.render(frame, chunks[0]),
        }

        self.render_status_bar(frame, chunks[1]);
        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let step_indicator = if self.focus == Focus::Compose {
            let step = self.compose.step();
            if self.compose.is_submitting() {
                Span::styled(" submitting… ", Style::default().fg(theme::WARNING))
            } else {
                Span::styled(
                    format!(" step {}/4 ", step.number()),
                    Style::default().fg(theme::PRIMARY_LIGHT),
                )
            }
        } else {
            Span::raw("")
        };

        let status = Line::from(vec![
            Span::styled(" INTERVUE ", theme::brand_badge()),
            Span::raw(" "),
            Span::styled(
                self.focus.label(),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            step_indicator,
            Span::raw(" │ "),
            Span::styled("Tab/Ctrl+G", theme::key_hint()),
            Span::raw(":switch view "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit "),
            Span::styled("Ctrl+C", theme::key_hint()),
            Span::raw(":force quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1;

        let notification_area = Rect::new(x, y, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(format!(" {prefix} "), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    Span::raw(&n.message),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = vec![
            ("Global:", ""),
            ("q", "Quit (outside form fields)"),
            ("Ctrl+C", "Force quit"),
            ("?", "Toggle this help"),
            ("Tab / Ctrl+G", "Next view"),
            ("1 / 2", "Jump to Browse / Share"),
            ("", ""),
            ("Browse:", ""),
            ("j/k", "Navigate list"),
            ("Enter", "Toggle detail pane"),
            ("r", "Refresh feed"),
            ("v / V", "Upvote / downvote"),
            ("b", "Bookmark"),
            ("w", "Download write-up"),
            ("x", "Report for moderation"),
            ("", ""),
            ("Share form:", ""),
            ("Tab / Shift+Tab", "Next / previous field"),
            ("Ctrl+N", "Next step (validated)"),
            ("Esc", "Previous step"),
            ("Ctrl+S", "Save draft now"),
            ("Ctrl+R", "Register typed company"),
            ("", ""),
            ("Rounds step:", ""),
            ("Ctrl+A / Ctrl+X", "Add / remove round"),
            ("Ctrl+←/→", "Switch round"),
            ("Ctrl+T / Ctrl+B", "Add technical / behavioral question"),
            ("Ctrl+D", "Remove focused question"),
            ("Ctrl+Q", "Toggle MCQ section"),
            ("", ""),
            ("Review step:", ""),
            ("y / Enter", "Submit"),
            ("n / Esc", "Back to reflection"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Keybindings",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {key}"),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<22}", key),
                        Style::default().fg(theme::PRIMARY_LIGHT).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("?", Style::default().fg(theme::PRIMARY_LIGHT).add_modifier(Modifier::BOLD)),
            Span::raw(" or "),
            Span::styled("Esc", Style::default().fg(theme::PRIMARY_LIGHT).add_modifier(Modifier::BOLD)),
            Span::raw(" to close"),
        ]));

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Calculate a centered rect using percentage of parent area.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
