//! autoblog core library
//!
//! Shared pieces of autoblog, a viewer for AI-generated articles:
//! the article model, the typewriter reveal animation, and the SQLite
//! article store behind the HTTP endpoint.
//!
//! # Quick Start
//!
//! ```text
//! let store = ArticleStore::open(&config)?;
//! store.create(&NewArticle::new("Title", "Subtitle", blocks))?;
//!
//! let article = store.latest()?.unwrap();
//! let mut driver = RevealDriver::new();
//! while driver.tick(&article.content) {
//!     draw(driver.view(&article.content));
//! }
//! ```
//!
//! # Modules
//!
//! - `models`: Articles, content blocks, write payload validation
//! - `reveal`: Typewriter reveal state machine
//! - `store`: SQLite article store (create, latest)
//! - `storage`: Schema and store errors
//! - `config`: Application configuration

pub mod config;
pub mod models;
pub mod reveal;
pub mod storage;
pub mod store;

pub use config::Config;
pub use models::{Article, ArticlePayload, BlockKind, ContentBlock, NewArticle, ValidationError};
pub use reveal::{BlockView, Cursor, RevealDriver};
pub use storage::{StoreError, StoreResult};
pub use store::ArticleStore;
