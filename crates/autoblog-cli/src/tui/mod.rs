//! autoblog terminal viewer
//!
//! ## Screens
//!
//! - Home: keyword form for generating an article, or fetch the latest one
//! - Article: title, subtitle and the content typed out block by block
//!
//! ## Keys
//!
//! - g: Type a keyword (Enter generates, Esc cancels)
//! - f: Fetch the latest article
//! - r: Replay the reveal
//! - j/k or ↑/↓: Scroll the article
//! - q: Quit
//!
//! Any key closes an error popup.

mod app;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use autoblog_core::Config;

use crate::client::{self, StoreClient};
use app::{App, InputMode, Loading, RequestOutcome, Screen};

/// Redraw interval while nothing is animating
const IDLE_INTERVAL: Duration = Duration::from_millis(50);

/// Shared handles for starting requests from key handlers
struct Requests {
    store: StoreClient,
    webhook_url: Option<String>,
    tx: mpsc::UnboundedSender<RequestOutcome>,
}

/// Run the terminal viewer
pub async fn run(config: Config) -> Result<()> {
    // File-based, only if AUTOBLOG_LOG is set
    init_tui_logging(&config);

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new();
    let result = run_app(&mut terminal, &mut app, &config).await;

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config: &Config,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let requests = Requests {
        store: StoreClient::from_config(config),
        webhook_url: config.webhook_url.clone(),
        tx,
    };
    let tick_interval = Duration::from_millis(config.reveal_tick_ms.max(1));

    loop {
        app.check_status_timeout();

        terminal.draw(|frame| ui::draw(frame, app))?;

        let wait = if app.is_revealing() {
            tick_interval
        } else {
            IDLE_INTERVAL
        };

        tokio::select! {
            biased;

            Some(outcome) = rx.recv() => {
                debug!(?outcome, "request finished");
                app.finish_request(outcome);
            }

            _ = tokio::time::sleep(wait) => {
                app.tick();

                // Check for terminal events (non-blocking)
                if event::poll(Duration::from_millis(0))? {
                    if let Event::Key(key) = event::read()? {
                        // Only handle key press events (not release)
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }

                        // If error modal is showing, any key dismisses it
                        if app.has_error() {
                            app.clear_error();
                            continue;
                        }

                        match app.input_mode {
                            InputMode::Normal => {
                                handle_normal_mode(app, &requests, key.code, key.modifiers)
                            }
                            InputMode::Keyword => {
                                handle_keyword_mode(app, &requests, key.code, key.modifiers)
                            }
                        }
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle key events in normal mode
fn handle_normal_mode(
    app: &mut App,
    requests: &Requests,
    code: KeyCode,
    modifiers: KeyModifiers,
) {
    match code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        KeyCode::Char('f') => start_fetch(app, requests),
        KeyCode::Char('g') | KeyCode::Char('i') => app.enter_keyword_mode(),

        KeyCode::Char('r') if app.screen == Screen::Article => app.replay(),
        KeyCode::Char('j') | KeyCode::Down if app.screen == Screen::Article => app.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up if app.screen == Screen::Article => app.scroll_up(),

        // The keyword form lives on the home screen
        KeyCode::Esc if app.screen == Screen::Article => {
            app.screen = Screen::Home;
        }

        _ => {}
    }

    if app.input_mode == InputMode::Keyword {
        app.screen = Screen::Home;
    }
}

/// Handle key events while typing a keyword
fn handle_keyword_mode(
    app: &mut App,
    requests: &Requests,
    code: KeyCode,
    modifiers: KeyModifiers,
) {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Esc => {
            app.exit_keyword_mode();
            if app.article.is_some() {
                app.screen = Screen::Article;
            }
        }
        KeyCode::Enter => start_generation(app, requests),
        KeyCode::Char(c) => app.insert_char(c),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        _ => {}
    }
}

/// Kick off a fetch of the latest article
fn start_fetch(app: &mut App, requests: &Requests) {
    let seq = app.begin_request(Loading::Fetching);
    let store = requests.store.clone();
    let tx = requests.tx.clone();

    tokio::spawn(async move {
        let result = store.latest().await;
        // Receiver gone means the viewer is shutting down
        let _ = tx.send(RequestOutcome::Fetched(seq, result));
    });
}

/// Kick off a generation request for the typed keyword
///
/// Does nothing while an earlier generation is still outstanding.
fn start_generation(app: &mut App, requests: &Requests) {
    let Some((seq, keyword)) = app.submit_keyword(requests.webhook_url.is_some()) else {
        return;
    };
    let Some(webhook_url) = requests.webhook_url.clone() else {
        return;
    };
    let tx = requests.tx.clone();
    info!(keyword = %keyword.trim(), "requesting article");

    tokio::spawn(async move {
        let result = client::request_generation(&webhook_url, &keyword).await;
        let _ = tx.send(RequestOutcome::Generated(seq, result));
    });
}

/// Initialize logging for TUI mode
///
/// Only initializes if AUTOBLOG_LOG environment variable is set.
/// Logs to file (config.log_file or default {data_dir}/debug.log).
fn init_tui_logging(config: &Config) {
    let Ok(log_level) = std::env::var("AUTOBLOG_LOG") else {
        return;
    };

    let log_path = config.log_path();
    if let Err(e) = config.ensure_data_dir() {
        eprintln!("Warning: {}", e);
    }

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "autoblog_core={},autoblog_cli={}",
        log_level, log_level
    ));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requests(
        webhook_url: Option<&str>,
    ) -> (Requests, mpsc::UnboundedReceiver<RequestOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let requests = Requests {
            store: StoreClient::new("http://127.0.0.1:9/articles", None),
            webhook_url: webhook_url.map(str::to_string),
            tx,
        };
        (requests, rx)
    }

    fn type_keys(app: &mut App, requests: &Requests, text: &str) {
        for c in text.chars() {
            handle_keyword_mode(app, requests, KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    #[test]
    fn test_ctrl_c_quits_while_typing() {
        let (requests, _rx) = requests(None);
        let mut app = App::new();
        app.enter_keyword_mode();

        handle_keyword_mode(&mut app, &requests, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
        assert!(app.keyword.is_empty());
    }

    #[tokio::test]
    async fn test_second_enter_sends_nothing_while_generating() {
        let (requests, _rx) = requests(Some("http://127.0.0.1:9/hook"));
        let mut app = App::new();
        handle_normal_mode(&mut app, &requests, KeyCode::Char('g'), KeyModifiers::NONE);
        type_keys(&mut app, &requests, "rust");

        handle_keyword_mode(&mut app, &requests, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.loading, Some(Loading::Generating));
        let sent = app.request_seq;

        type_keys(&mut app, &requests, "x");
        handle_keyword_mode(&mut app, &requests, KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.keyword, "rust");
        assert_eq!(app.request_seq, sent);
    }

    #[test]
    fn test_enter_without_webhook_shows_error() {
        let (requests, _rx) = requests(None);
        let mut app = App::new();
        app.enter_keyword_mode();
        type_keys(&mut app, &requests, "rust");

        handle_keyword_mode(&mut app, &requests, KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.has_error());
        assert_eq!(app.request_seq, 0);
    }
}
