//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use autoblog_core::reveal::numbered_ordinal;
use autoblog_core::{Article, BlockKind};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is JSON
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a full article, fully revealed
    pub fn print_article(&self, article: &Article) {
        match self.format {
            OutputFormat::Human => {
                for line in article_lines(article) {
                    println!("{}", line);
                }
            }
            OutputFormat::Json => match serde_json::to_string_pretty(article) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Failed to encode article: {}", e),
            },
            OutputFormat::Quiet => {
                println!("{}", article.id);
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Plain-text rendering of an article
///
/// Headings get a `#` prefix per level, bullets a `•`, numbered items
/// their ordinal among the article's numbered blocks.
fn article_lines(article: &Article) -> Vec<String> {
    let mut lines = vec![
        article.title.clone(),
        article.subtitle.clone(),
        format!("Published {}", article.created_at.format("%Y-%m-%d %H:%M")),
        String::new(),
    ];

    for (index, block) in article.content.iter().enumerate() {
        let line = match block.kind {
            BlockKind::Bullet => format!("  • {}", block.text),
            BlockKind::Numbered => {
                let n = numbered_ordinal(&article.content, index).unwrap_or(1);
                format!("  {}. {}", n, block.text)
            }
            BlockKind::Paragraph => block.text.clone(),
            heading => {
                let level = heading.heading_level().unwrap_or(1) as usize;
                format!("{} {}", "#".repeat(level), block.text)
            }
        };
        lines.push(line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoblog_core::ContentBlock;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_article_lines() {
        let article = Article {
            id: Uuid::new_v4(),
            title: "Title".to_string(),
            subtitle: "Sub".to_string(),
            content: vec![
                ContentBlock::new(BlockKind::H2, "Section"),
                ContentBlock::numbered("one"),
                ContentBlock::numbered("two"),
                ContentBlock::bullet("dot"),
                ContentBlock::numbered("again"),
            ],
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        };

        let lines = article_lines(&article);
        assert_eq!(
            lines,
            vec![
                "Title",
                "Sub",
                "Published 2024-03-01 09:30",
                "",
                "## Section",
                "  1. one",
                "  2. two",
                "  • dot",
                "  3. again",
            ]
        );
    }
}
