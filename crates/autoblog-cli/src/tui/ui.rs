//! UI rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use autoblog_core::{BlockKind, BlockView};

use super::app::{App, InputMode, Screen};

/// Marker drawn after the text that is still being typed
const CARET: &str = "▌";

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    match app.screen {
        Screen::Home => draw_home(frame, app, chunks[0]),
        Screen::Article => draw_article(frame, app, chunks[0]),
    }

    draw_status_bar(frame, app, chunks[1]);

    if let Some(message) = &app.error_message {
        draw_error_modal(frame, message);
    }
}

/// Keyword form plus the fetch hint
fn draw_home(frame: &mut Frame, app: &App, area: Rect) {
    let width = 60.min(area.width);
    let form_area = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + area.height.saturating_sub(9) / 2,
        width,
        9.min(area.height),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(form_area);

    let title = Paragraph::new(Span::styled(
        "AI AutoBlogger",
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let tagline = Paragraph::new("Generate an article from a keyword")
        .style(Style::default().add_modifier(Modifier::DIM))
        .alignment(Alignment::Center);
    frame.render_widget(tagline, chunks[1]);

    let editing = app.input_mode == InputMode::Keyword && !app.is_generating();
    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let input_title = if app.is_generating() {
        " Keyword (generating) "
    } else {
        " Keyword "
    };
    let input = Paragraph::new(app.keyword.as_str()).block(
        Block::default()
            .title(input_title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(input, chunks[3]);

    if editing {
        let cursor_x = chunks[3].x + 1 + app.keyword_cursor as u16;
        frame.set_cursor_position((cursor_x, chunks[3].y + 1));
    }

    let hint = Paragraph::new("Or press f to load the most recent article.")
        .style(Style::default().add_modifier(Modifier::DIM))
        .alignment(Alignment::Center);
    frame.render_widget(hint, chunks[5]);
}

/// Title, subtitle and the blocks revealed so far
fn draw_article(frame: &mut Frame, app: &App, area: Rect) {
    let Some(article) = &app.article else {
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            article.title.as_str(),
            Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(Span::styled(
            article.subtitle.as_str(),
            Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
        )),
    ];

    for view in app.visible_blocks() {
        lines.push(Line::from(""));
        lines.push(block_line(&view));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::DIM));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));

    frame.render_widget(paragraph, area);
}

/// One content block as a styled line
fn block_line<'a>(view: &BlockView<'a>) -> Line<'a> {
    let mut spans = Vec::new();

    match view.kind {
        BlockKind::Bullet => spans.push(Span::raw("  • ")),
        BlockKind::Numbered => {
            spans.push(Span::raw(format!("  {}. ", view.ordinal.unwrap_or(1))));
        }
        _ => {}
    }

    spans.push(Span::styled(view.text, block_style(view.kind)));

    if view.caret {
        spans.push(Span::styled(
            CARET,
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    Line::from(spans)
}

/// Text style for a block kind; headings get heavier as the level drops
fn block_style(kind: BlockKind) -> Style {
    match kind.heading_level() {
        Some(1) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        Some(2) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        Some(3) => Style::default().add_modifier(Modifier::BOLD),
        Some(_) => Style::default().add_modifier(Modifier::BOLD | Modifier::DIM),
        None => Style::default(),
    }
}

/// Draw the status bar at the bottom
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let content = if let Some(loading) = app.loading {
        loading.label().to_string()
    } else if let Some(msg) = &app.status_message {
        msg.clone()
    } else {
        match (app.screen, app.input_mode) {
            (_, InputMode::Keyword) => "Enter:generate  Esc:cancel".to_string(),
            (Screen::Home, InputMode::Normal) => "g:generate  f:fetch  q:quit".to_string(),
            (Screen::Article, InputMode::Normal) => {
                "r:replay  f:fetch  g:generate  j/k:scroll  q:quit".to_string()
            }
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Draw the error popup
fn draw_error_modal(frame: &mut Frame, message: &str) {
    let area = frame.area();

    let popup_width = 50.min(area.width.saturating_sub(4));
    let popup_height = 7.min(area.height.saturating_sub(2));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    use super::super::app::Loading;
    use autoblog_core::{Article, ContentBlock};
    use chrono::Utc;
    use uuid::Uuid;

    fn render(app: &App) -> String {
        let backend = TestBackend::new(60, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn sample() -> Article {
        Article {
            id: Uuid::new_v4(),
            title: "Learning Rust".to_string(),
            subtitle: "A field guide".to_string(),
            content: vec![
                ContentBlock::new(BlockKind::H2, "Basics"),
                ContentBlock::numbered("Install"),
                ContentBlock::numbered("Build"),
                ContentBlock::bullet("Tip"),
            ],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_block_line_prefixes() {
        let numbered = BlockView {
            index: 2,
            kind: BlockKind::Numbered,
            text: "Build",
            ordinal: Some(2),
            caret: false,
        };
        let line = block_line(&numbered);
        assert_eq!(line.spans[0].content, "  2. ");
        assert_eq!(line.spans.len(), 2);

        let bullet = BlockView {
            index: 3,
            kind: BlockKind::Bullet,
            text: "Ti",
            ordinal: None,
            caret: true,
        };
        let line = block_line(&bullet);
        assert_eq!(line.spans[0].content, "  • ");
        assert_eq!(line.spans[2].content, CARET);
    }

    #[test]
    fn test_home_screen() {
        let app = App::new();
        let screen = render(&app);
        assert!(screen.contains("AI AutoBlogger"));
        assert!(screen.contains("g:generate  f:fetch  q:quit"));
    }

    #[test]
    fn test_keyword_form_shows_pending_generation() {
        let mut app = App::new();
        app.enter_keyword_mode();
        app.insert_char('r');
        assert!(!render(&app).contains("(generating)"));

        app.submit_keyword(true);
        let screen = render(&app);
        assert!(screen.contains("Keyword (generating)"));
        assert!(screen.contains("Generating..."));
    }

    #[test]
    fn test_article_fully_revealed() {
        let mut app = App::new();
        app.show_article(sample());
        while app.tick() {}

        let screen = render(&app);
        assert!(screen.contains("Learning Rust"));
        assert!(screen.contains("Basics"));
        assert!(screen.contains("1. Install"));
        assert!(screen.contains("2. Build"));
        assert!(screen.contains("• Tip"));
        assert!(!screen.contains(CARET));
    }

    #[test]
    fn test_article_mid_reveal_hides_later_blocks() {
        let mut app = App::new();
        app.show_article(sample());
        // "Basics" plus its completion tick, then two characters of "Install"
        for _ in 0..9 {
            app.tick();
        }

        let screen = render(&app);
        assert!(screen.contains("1. In"));
        assert!(!screen.contains("Install"));
        assert!(!screen.contains("Build"));
        assert!(screen.contains(CARET));
    }

    #[test]
    fn test_error_modal_and_loading() {
        let mut app = App::new();
        app.set_error("Failed to fetch article");
        app.loading = Some(Loading::Fetching);

        let screen = render(&app);
        assert!(screen.contains("Failed to fetch article"));
        assert!(screen.contains("Press any key to close"));
        assert!(screen.contains("Loading..."));
    }
}
