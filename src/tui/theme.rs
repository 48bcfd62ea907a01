//! Centralized Indigo & Amber color theme for the Intervue TUI.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Indigo — primary accent, active items, focused borders.
pub const PRIMARY: Color = Color::Rgb(0x5C, 0x6B, 0xC0);
/// Light indigo — highlights, hints, secondary focus.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x79, 0x86, 0xCB);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Amber — accent, calls to action, important items.
pub const ACCENT: Color = Color::Rgb(0xFF, 0xB3, 0x00);

// ── Text ────────────────────────────────────────────────────────────────────

/// Primary text.
pub const TEXT: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
/// Muted text — secondary labels, borders.
pub const TEXT_MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
/// Dim text — disabled items, faint hints.
pub const TEXT_DIM: Color = Color::Rgb(0x50, 0x50, 0x50);

// ── Semantic ────────────────────────────────────────────────────────────────

/// Error — destructive actions, failures, blocked navigation.
pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
/// Success — confirmations, accepted offers.
pub const SUCCESS: Color = Color::Rgb(0x66, 0xBB, 0x6A);
/// Warning — pending drafts, unsaved state.
pub const WARNING: Color = Color::Rgb(0xFF, 0xA7, 0x26);
/// Info — informational highlights.
pub const INFO: Color = Color::Rgb(0x42, 0xA5, 0xF5);

// ── Style helpers ───────────────────────────────────────────────────────────

/// Accent-colored bold text (titles, active items).
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Section header style.
pub fn heading() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

/// Focused border style.
pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

/// Unfocused border style.
pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Highlighted/selected item.
pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Keybinding hint in footers and the status bar.
pub fn key_hint() -> Style {
    Style::default().fg(PRIMARY_LIGHT)
}

/// Brand badge in the status bar.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(Color::Rgb(0x12, 0x12, 0x2A))
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Banner style for the single validation/submission error message.
pub fn error_banner() -> Style {
    Style::default().fg(ERROR).add_modifier(Modifier::BOLD)
}
