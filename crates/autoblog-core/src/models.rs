//! Data models for autoblog
//!
//! Defines the article and its content blocks, plus the write payload
//! accepted by the store and its validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Kind of a content block
///
/// Serialized as the lowercase names used on the wire:
/// `paragraph`, `bullet`, `numbered`, `h1` .. `h6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Paragraph,
    Bullet,
    Numbered,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl BlockKind {
    /// Heading level (1-6), or `None` for non-heading blocks
    pub fn heading_level(self) -> Option<u8> {
        match self {
            BlockKind::H1 => Some(1),
            BlockKind::H2 => Some(2),
            BlockKind::H3 => Some(3),
            BlockKind::H4 => Some(4),
            BlockKind::H5 => Some(5),
            BlockKind::H6 => Some(6),
            BlockKind::Paragraph | BlockKind::Bullet | BlockKind::Numbered => None,
        }
    }

    pub fn is_numbered(self) -> bool {
        self == BlockKind::Numbered
    }

    /// Wire name of the kind
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Bullet => "bullet",
            BlockKind::Numbered => "numbered",
            BlockKind::H1 => "h1",
            BlockKind::H2 => "h2",
            BlockKind::H3 => "h3",
            BlockKind::H4 => "h4",
            BlockKind::H5 => "h5",
            BlockKind::H6 => "h6",
        }
    }
}

/// One typed unit of article content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub text: String,
}

impl ContentBlock {
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Paragraph, text)
    }

    pub fn bullet(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Bullet, text)
    }

    pub fn numbered(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Numbered, text)
    }

    /// Length of the text in characters (the unit the reveal animation counts)
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A stored article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Identifier assigned by the store
    pub id: Uuid,
    pub title: String,
    pub subtitle: String,
    /// Ordered content; order is both reading and reveal order
    pub content: Vec<ContentBlock>,
    /// When the store persisted this article
    pub created_at: DateTime<Utc>,
}

/// A validated article ready to be persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub subtitle: String,
    pub content: Vec<ContentBlock>,
}

impl NewArticle {
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        content: Vec<ContentBlock>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            content,
        }
    }

    /// Parse and validate a raw write request body
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        let payload: ArticlePayload = serde_json::from_slice(body)
            .map_err(|e| ValidationError::Malformed(e.to_string()))?;
        payload.validate()
    }
}

/// Write payload as received, before validation
///
/// Every field is optional here so a missing field produces a
/// validation error rather than a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticlePayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub content: Option<Vec<ContentBlock>>,
}

impl ArticlePayload {
    /// Check that all required fields are present
    ///
    /// An empty title or subtitle counts as absent. An empty content list
    /// is present.
    pub fn validate(self) -> Result<NewArticle, ValidationError> {
        let mut missing = Vec::new();

        let title = self.title.filter(|t| !t.is_empty());
        let subtitle = self.subtitle.filter(|s| !s.is_empty());

        if title.is_none() {
            missing.push("title");
        }
        if subtitle.is_none() {
            missing.push("subtitle");
        }
        if self.content.is_none() {
            missing.push("content");
        }

        match (title, subtitle, self.content) {
            (Some(title), Some(subtitle), Some(content)) => Ok(NewArticle {
                title,
                subtitle,
                content,
            }),
            _ => Err(ValidationError::MissingFields { missing }),
        }
    }
}

/// Errors raised while validating a write payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields were absent
    #[error("Missing required fields: title, subtitle, content")]
    MissingFields { missing: Vec<&'static str> },

    /// Body was not a JSON object of the expected shape
    #[error("Invalid article payload: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_kind_wire_names() {
        let block: ContentBlock =
            serde_json::from_str(r#"{"type":"h3","text":"Setup"}"#).unwrap();
        assert_eq!(block.kind, BlockKind::H3);
        assert_eq!(block.kind.heading_level(), Some(3));

        let json = serde_json::to_string(&ContentBlock::numbered("one")).unwrap();
        assert_eq!(json, r#"{"type":"numbered","text":"one"}"#);
    }

    #[test]
    fn test_non_heading_kinds() {
        assert_eq!(BlockKind::Paragraph.heading_level(), None);
        assert_eq!(BlockKind::Bullet.heading_level(), None);
        assert!(BlockKind::Numbered.is_numbered());
        assert!(!BlockKind::Bullet.is_numbered());
    }

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(ContentBlock::paragraph("héllo").char_len(), 5);
        assert_eq!(ContentBlock::paragraph("").char_len(), 0);
    }

    #[test]
    fn test_payload_with_empty_content_is_valid() {
        let article =
            NewArticle::from_json(br#"{"title":"T","subtitle":"S","content":[]}"#).unwrap();
        assert_eq!(article.title, "T");
        assert_eq!(article.subtitle, "S");
        assert!(article.content.is_empty());
    }

    #[test]
    fn test_payload_missing_subtitle() {
        let err = NewArticle::from_json(br#"{"title":"T","content":[]}"#).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields {
                missing: vec!["subtitle"]
            }
        );
        assert_eq!(
            err.to_string(),
            "Missing required fields: title, subtitle, content"
        );
    }

    #[test]
    fn test_payload_null_and_empty_fields_count_as_missing() {
        let err =
            NewArticle::from_json(br#"{"title":"","subtitle":null,"content":null}"#).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields {
                missing: vec!["title", "subtitle", "content"]
            }
        );
    }

    #[test]
    fn test_payload_unknown_block_type_is_malformed() {
        let err = NewArticle::from_json(
            br#"{"title":"T","subtitle":"S","content":[{"type":"quote","text":"x"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));
    }

    #[test]
    fn test_payload_not_json() {
        let err = NewArticle::from_json(b"keyword=rust").unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));
    }

    #[test]
    fn test_article_roundtrip_keeps_block_order() {
        let article = Article {
            id: Uuid::new_v4(),
            title: "Title".to_string(),
            subtitle: "Sub".to_string(),
            content: vec![
                ContentBlock::new(BlockKind::H1, "Intro"),
                ContentBlock::paragraph("Body"),
                ContentBlock::bullet("Point"),
            ],
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&article).unwrap();
        let parsed: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, article);
    }
}
