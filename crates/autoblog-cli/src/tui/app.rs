//! Application state and logic

use std::time::{Duration, Instant};

use autoblog_core::{Article, BlockView, RevealDriver};

use crate::client::ClientError;

/// How long a status message stays in the status bar
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Keyword form and fetch prompt
    Home,
    /// Article with the reveal animation
    Article,
}

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Single-key commands
    Normal,
    /// Typing a keyword
    Keyword,
}

/// Request currently in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loading {
    Generating,
    Fetching,
}

impl Loading {
    pub fn label(self) -> &'static str {
        match self {
            Loading::Generating => "Generating...",
            Loading::Fetching => "Loading...",
        }
    }
}

/// Result of a background request, tagged with the request number that
/// produced it
#[derive(Debug)]
pub enum RequestOutcome {
    Generated(u64, Result<(), ClientError>),
    Fetched(u64, Result<Option<Article>, ClientError>),
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    pub screen: Screen,
    pub input_mode: InputMode,
    /// Keyword input buffer
    pub keyword: String,
    /// Cursor position in the keyword, in characters
    pub keyword_cursor: usize,
    /// Article being shown
    pub article: Option<Article>,
    /// Reveal animation for `article`
    pub driver: RevealDriver,
    /// Scroll offset of the article view
    pub scroll: u16,
    pub loading: Option<Loading>,
    /// A webhook call is outstanding, even if a later fetch superseded it
    pub generation_in_flight: bool,
    /// Number of the most recent request; older outcomes are dropped
    pub request_seq: u64,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<Instant>,
    /// Error shown in a modal until any key is pressed
    pub error_message: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            screen: Screen::Home,
            input_mode: InputMode::Normal,
            keyword: String::new(),
            keyword_cursor: 0,
            article: None,
            driver: RevealDriver::new(),
            scroll: 0,
            loading: None,
            generation_in_flight: false,
            request_seq: 0,
            status_message: None,
            status_message_time: None,
            error_message: None,
        }
    }

    /// Set a status message (will auto-dismiss after 3 seconds)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Check and clear expired status message
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Whether the keyword form is locked by an outstanding generation
    pub fn is_generating(&self) -> bool {
        self.generation_in_flight
    }

    /// Start a request, returning its number
    ///
    /// Any request still in flight is superseded.
    pub fn begin_request(&mut self, loading: Loading) -> u64 {
        self.request_seq += 1;
        self.loading = Some(loading);
        self.error_message = None;
        self.request_seq
    }

    /// Start a generation for the typed keyword
    ///
    /// Returns the request number and keyword to send, or `None` when
    /// nothing should be sent: a generation is already outstanding, the
    /// keyword is blank, or no webhook is configured.
    pub fn submit_keyword(&mut self, webhook_configured: bool) -> Option<(u64, String)> {
        if self.generation_in_flight {
            return None;
        }
        if self.keyword.trim().is_empty() {
            self.set_error(ClientError::EmptyKeyword.to_string());
            return None;
        }
        if !webhook_configured {
            self.set_error(ClientError::WebhookNotConfigured.to_string());
            return None;
        }

        self.generation_in_flight = true;
        let seq = self.begin_request(Loading::Generating);
        Some((seq, self.keyword.clone()))
    }

    /// Apply a finished request
    ///
    /// Outcomes from superseded requests are ignored.
    pub fn finish_request(&mut self, outcome: RequestOutcome) {
        let seq = match &outcome {
            RequestOutcome::Generated(seq, _) => {
                self.generation_in_flight = false;
                *seq
            }
            RequestOutcome::Fetched(seq, _) => *seq,
        };
        if seq != self.request_seq {
            return;
        }
        self.loading = None;

        match outcome {
            RequestOutcome::Generated(_, Ok(())) => {
                self.keyword.clear();
                self.keyword_cursor = 0;
                self.input_mode = InputMode::Normal;
                self.set_status("Article requested. Press f to fetch it once it's ready.");
            }
            RequestOutcome::Fetched(_, Ok(Some(article))) => self.show_article(article),
            RequestOutcome::Fetched(_, Ok(None)) => self.set_error("No articles found."),
            RequestOutcome::Generated(_, Err(e)) | RequestOutcome::Fetched(_, Err(e)) => {
                self.set_error(e.to_string());
            }
        }
    }

    /// Show an article from the start of its reveal
    pub fn show_article(&mut self, article: Article) {
        self.article = Some(article);
        self.driver.reset();
        self.scroll = 0;
        self.screen = Screen::Article;
        self.input_mode = InputMode::Normal;
    }

    /// Restart the reveal of the current article
    pub fn replay(&mut self) {
        if self.article.is_some() {
            self.driver.reset();
            self.scroll = 0;
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Advance the reveal one step; true if anything changed
    pub fn tick(&mut self) -> bool {
        match &self.article {
            Some(article) => self.driver.tick(&article.content),
            None => false,
        }
    }

    pub fn is_revealing(&self) -> bool {
        self.article
            .as_ref()
            .is_some_and(|article| !self.driver.is_complete(&article.content))
    }

    /// Blocks visible at the current point of the reveal
    pub fn visible_blocks(&self) -> Vec<BlockView<'_>> {
        match &self.article {
            Some(article) => self.driver.view(&article.content),
            None => Vec::new(),
        }
    }

    pub fn enter_keyword_mode(&mut self) {
        self.input_mode = InputMode::Keyword;
        self.keyword_cursor = self.keyword.chars().count();
    }

    pub fn exit_keyword_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Byte offset of the keyword cursor
    fn cursor_byte(&self) -> usize {
        self.keyword
            .char_indices()
            .nth(self.keyword_cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.keyword.len())
    }

    /// Insert character at cursor position
    pub fn insert_char(&mut self, c: char) {
        if self.is_generating() {
            return;
        }
        let at = self.cursor_byte();
        self.keyword.insert(at, c);
        self.keyword_cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.keyword_cursor > 0 && !self.is_generating() {
            self.keyword_cursor -= 1;
            let at = self.cursor_byte();
            self.keyword.remove(at);
        }
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        self.keyword_cursor = self.keyword_cursor.saturating_sub(1);
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.keyword_cursor < self.keyword.chars().count() {
            self.keyword_cursor += 1;
        }
    }
}
