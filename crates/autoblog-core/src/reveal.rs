//! Typewriter reveal animation
//!
//! The reveal is a small state machine over an article's content blocks.
//! Each tick exposes one more character of the current block; once the
//! block is fully shown the next tick moves on to the following block.
//! After the last block the animation is complete.
//!
//! The state machine knows nothing about rendering or timing. A render
//! loop calls [`RevealDriver::tick`] on whatever schedule it likes and
//! draws the [`BlockView`]s returned by [`RevealDriver::view`].
//!
//! Numbered-list ordinals are never stored; they are recomputed from the
//! block sequence on every render.

use crate::models::{BlockKind, ContentBlock};

/// Position of the reveal within a block sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Block currently being typed
    pub block_index: usize,
    /// Number of characters of the current block that are visible
    pub char_index: usize,
    /// Whether the whole sequence has been revealed
    pub complete: bool,
}

impl Cursor {
    /// Cursor at the very beginning of a sequence
    pub fn start() -> Self {
        Self::default()
    }
}

/// Advance the cursor by one tick
///
/// Ticks on a completed cursor return it unchanged.
pub fn advance(blocks: &[ContentBlock], cursor: Cursor) -> Cursor {
    if cursor.complete {
        return cursor;
    }

    let Some(block) = blocks.get(cursor.block_index) else {
        // Nothing (left) to reveal
        return Cursor {
            complete: true,
            ..cursor
        };
    };

    if cursor.char_index < block.char_len() {
        Cursor {
            char_index: cursor.char_index + 1,
            ..cursor
        }
    } else if cursor.block_index + 1 >= blocks.len() {
        Cursor {
            complete: true,
            ..cursor
        }
    } else {
        Cursor {
            block_index: cursor.block_index + 1,
            char_index: 0,
            complete: false,
        }
    }
}

/// 1-based ordinal of a numbered block
///
/// Counts the numbered blocks strictly before `index`, plus one. Returns
/// `None` when the block at `index` is not numbered (or doesn't exist).
pub fn numbered_ordinal(blocks: &[ContentBlock], index: usize) -> Option<usize> {
    let block = blocks.get(index)?;
    if !block.kind.is_numbered() {
        return None;
    }

    let before = blocks[..index]
        .iter()
        .filter(|b| b.kind.is_numbered())
        .count();
    Some(before + 1)
}

/// A block as it should currently be drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockView<'a> {
    pub index: usize,
    pub kind: BlockKind,
    /// Visible portion of the text
    pub text: &'a str,
    /// Ordinal for numbered blocks
    pub ordinal: Option<usize>,
    /// Whether the typing caret follows the text
    pub caret: bool,
}

/// Visible blocks for a cursor position
///
/// Blocks before the cursor are whole, the cursor's block is cut at
/// `char_index`, and blocks after it are omitted.
pub fn render(blocks: &[ContentBlock], cursor: Cursor) -> Vec<BlockView<'_>> {
    blocks
        .iter()
        .enumerate()
        .take(cursor.block_index.saturating_add(1))
        .map(|(index, block)| {
            let is_current = index == cursor.block_index;
            let text = if is_current {
                char_prefix(&block.text, cursor.char_index)
            } else {
                block.text.as_str()
            };

            BlockView {
                index,
                kind: block.kind,
                text,
                ordinal: numbered_ordinal(blocks, index),
                caret: is_current && !cursor.complete,
            }
        })
        .collect()
}

/// First `n` characters of `text`
fn char_prefix(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Drives the reveal for whichever article is currently loaded
///
/// The driver holds only the cursor; the block sequence is passed in on
/// each call so the caller stays the owner of the article.
#[derive(Debug, Clone, Default)]
pub struct RevealDriver {
    cursor: Cursor,
}

impl RevealDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart from the first block, dropping any progress
    ///
    /// Used both when a new article is loaded and for replay.
    pub fn reset(&mut self) {
        self.cursor = Cursor::start();
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether everything has been revealed
    ///
    /// An empty sequence is complete from the start.
    pub fn is_complete(&self, blocks: &[ContentBlock]) -> bool {
        self.cursor.complete || blocks.is_empty()
    }

    /// Advance one tick; returns `true` if anything changed
    pub fn tick(&mut self, blocks: &[ContentBlock]) -> bool {
        let next = advance(blocks, self.cursor);
        let changed = next != self.cursor;
        self.cursor = next;
        changed
    }

    /// Blocks to draw at the current position
    pub fn view<'a>(&self, blocks: &'a [ContentBlock]) -> Vec<BlockView<'a>> {
        if blocks.is_empty() {
            return Vec::new();
        }
        render(blocks, self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(text: &str) -> ContentBlock {
        ContentBlock::new(BlockKind::H2, text)
    }

    /// Tick until complete, returning the number of ticks taken
    fn run_to_completion(blocks: &[ContentBlock]) -> usize {
        let mut driver = RevealDriver::new();
        let mut ticks = 0;
        let mut last_block = 0;

        while !driver.is_complete(blocks) {
            driver.tick(blocks);
            ticks += 1;

            let cursor = driver.cursor();
            assert!(cursor.block_index >= last_block, "revisited a finished block");
            last_block = cursor.block_index;

            assert!(ticks <= 10_000, "reveal never completed");
        }
        ticks
    }

    #[test]
    fn test_tick_count_is_chars_plus_blocks() {
        let documents = vec![
            vec![ContentBlock::paragraph("abc")],
            vec![heading("Intro"), ContentBlock::paragraph("Hello"), ContentBlock::bullet("x")],
            vec![ContentBlock::paragraph(""), ContentBlock::paragraph("")],
            vec![ContentBlock::numbered("naïve"), ContentBlock::numbered("日本語")],
        ];

        for blocks in documents {
            let chars: usize = blocks.iter().map(|b| b.char_len()).sum();
            assert_eq!(run_to_completion(&blocks), chars + blocks.len());
        }
    }

    #[test]
    fn test_empty_document_is_complete_immediately() {
        let blocks: Vec<ContentBlock> = Vec::new();
        let mut driver = RevealDriver::new();

        assert!(driver.is_complete(&blocks));
        assert!(driver.view(&blocks).is_empty());
        assert_eq!(run_to_completion(&blocks), 0);

        driver.tick(&blocks);
        assert!(driver.cursor().complete);
    }

    #[test]
    fn test_tick_reveals_then_advances() {
        let blocks = vec![ContentBlock::paragraph("ab"), ContentBlock::paragraph("c")];
        let mut cursor = Cursor::start();

        cursor = advance(&blocks, cursor);
        assert_eq!((cursor.block_index, cursor.char_index), (0, 1));
        cursor = advance(&blocks, cursor);
        assert_eq!((cursor.block_index, cursor.char_index), (0, 2));
        cursor = advance(&blocks, cursor);
        assert_eq!((cursor.block_index, cursor.char_index), (1, 0));
        cursor = advance(&blocks, cursor);
        assert_eq!((cursor.block_index, cursor.char_index), (1, 1));
        assert!(!cursor.complete);
        cursor = advance(&blocks, cursor);
        assert!(cursor.complete);
        assert_eq!(cursor.block_index, 1);
    }

    #[test]
    fn test_tick_after_complete_is_noop() {
        let blocks = vec![ContentBlock::paragraph("a")];
        let mut driver = RevealDriver::new();

        while driver.tick(&blocks) {}
        let done = driver.cursor();
        assert!(done.complete);
        assert!(!driver.tick(&blocks));
        assert_eq!(driver.cursor(), done);
    }

    #[test]
    fn test_reset_restarts_from_any_state() {
        let blocks = vec![heading("Title"), ContentBlock::paragraph("Body text")];
        let mut driver = RevealDriver::new();

        for _ in 0..8 {
            driver.tick(&blocks);
        }
        assert_ne!(driver.cursor(), Cursor::start());
        driver.reset();
        assert_eq!(
            driver.cursor(),
            Cursor {
                block_index: 0,
                char_index: 0,
                complete: false
            }
        );

        while driver.tick(&blocks) {}
        assert!(driver.is_complete(&blocks));
        driver.reset();
        assert_eq!(driver.cursor(), Cursor::start());
    }

    #[test]
    fn test_numbered_ordinals() {
        let blocks = vec![
            ContentBlock::numbered("a"),
            ContentBlock::numbered("b"),
            ContentBlock::paragraph("c"),
        ];

        assert_eq!(numbered_ordinal(&blocks, 0), Some(1));
        assert_eq!(numbered_ordinal(&blocks, 1), Some(2));
        assert_eq!(numbered_ordinal(&blocks, 2), None);
        assert_eq!(numbered_ordinal(&blocks, 3), None);
    }

    #[test]
    fn test_numbered_ordinal_counts_across_other_blocks() {
        let blocks = vec![
            ContentBlock::numbered("first"),
            ContentBlock::paragraph("aside"),
            ContentBlock::bullet("point"),
            ContentBlock::numbered("second"),
        ];
        assert_eq!(numbered_ordinal(&blocks, 3), Some(2));
    }

    #[test]
    fn test_render_hides_future_blocks() {
        let blocks = vec![
            ContentBlock::paragraph("done"),
            ContentBlock::paragraph("typing"),
            ContentBlock::paragraph("later"),
        ];
        let cursor = Cursor {
            block_index: 1,
            char_index: 3,
            complete: false,
        };

        let views = render(&blocks, cursor);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].text, "done");
        assert!(!views[0].caret);
        assert_eq!(views[1].text, "typ");
        assert!(views[1].caret);
    }

    #[test]
    fn test_render_caret_gone_when_complete() {
        let blocks = vec![ContentBlock::numbered("a"), ContentBlock::numbered("b")];
        let mut driver = RevealDriver::new();
        while driver.tick(&blocks) {}

        let views = driver.view(&blocks);
        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| !v.caret));
        assert_eq!(views[1].text, "b");
        assert_eq!(views[1].ordinal, Some(2));
    }

    #[test]
    fn test_render_never_splits_characters() {
        let blocks = vec![ContentBlock::paragraph("日本語")];
        let cursor = Cursor {
            block_index: 0,
            char_index: 2,
            complete: false,
        };
        assert_eq!(render(&blocks, cursor)[0].text, "日本");
    }
}
