use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use intervue::config::AppConfig;
use intervue::tui::app::AppState;
use intervue::tui::services::Services;

/// Read the optional prefill payload: `--prefill <base64>` or the
/// `INTERVUE_PREFILL` environment variable. Undecodable payloads are
/// ignored downstream.
fn prefill_arg() -> Option<String> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--prefill" {
            return args.next();
        }
        if let Some(value) = arg.strip_prefix("--prefill=") {
            return Some(value.to_string());
        }
    }
    std::env::var("INTERVUE_PREFILL").ok()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let _log_guard = intervue::core::logging::init();
    log::info!("intervue v{} starting", intervue::VERSION);

    let config = AppConfig::load();
    let prefill = prefill_arg();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let result = match Services::init(config.clone(), event_tx.clone()) {
        Ok(services) => {
            let tick_rate = Duration::from_millis(config.tui.tick_rate_ms);
            let mut app = AppState::new(event_rx, event_tx, services, prefill.as_deref());
            app.run(&mut terminal, tick_rate).await.map_err(Into::into)
        }
        Err(e) => Err(e),
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
