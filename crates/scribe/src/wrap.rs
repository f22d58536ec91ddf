//! The word-wrapping target.
//!
//! [`WrappedTarget`] reflows text as it is written. Every source newline is
//! first treated as optional: when the line it ends is shorter than the wrap
//! column, the newline is tentatively replaced by a space so the line can
//! merge with whatever follows. Hard newlines are then re-inserted only where
//! the wrap column demands it, by turning the most recent space on an
//! overlong line into a newline.
//!
//! Merging never crosses blank lines, indented lines, hard line breaks
//! (a trailing `+`) or atomic blocks. A tentatively removed newline is
//! restored when the next write reveals it was meaningful: a second newline
//! (blank line), leading whitespace (indentation), or an explicit
//! [`ensure_newline`](Target::ensure_newline).
//!
//! # Example
//!
//! ```rust
//! use scribe::{Target, WrappedTarget};
//!
//! let mut target = WrappedTarget::new(20);
//! target.write_str("This is a fairly long line of text that needs wrapping.\n");
//! assert_eq!(
//!     target.finish(),
//!     "This is a fairly\nlong line of text\nthat needs wrapping.\n"
//! );
//! ```

use tracing::warn;
use unicode_width::UnicodeWidthStr;

use crate::target::{Target, UnwrappedTarget};

/// A line ending in this byte ends with a hard line break and never merges.
const HARD_BREAK: u8 = b'+';

/// A target that wraps text to a fixed column.
///
/// The buffer is only ever rewritten in place by swapping single ASCII
/// bytes (`' '` and `'\n'`), so it always holds valid UTF-8.
#[derive(Debug, Clone)]
pub struct WrappedTarget {
    buffer: Vec<u8>,
    wrap: usize,
    last_newline: Option<usize>,
    /// Split candidate on the current line.
    last_space: Option<usize>,
    /// A newline currently standing in the buffer as a space.
    last_removed_newline: Option<usize>,
    /// A newline inserted by a split.
    last_inserted_newline: Option<usize>,
    indented: bool,
    disabled: usize,
    blocks: Vec<String>,
}

impl WrappedTarget {
    /// Creates a target wrapping at `wrap` columns. `0` never wraps.
    #[must_use]
    pub fn new(wrap: usize) -> Self {
        Self {
            buffer: Vec::new(),
            wrap,
            last_newline: None,
            last_space: None,
            last_removed_newline: None,
            last_inserted_newline: None,
            indented: false,
            disabled: 0,
            blocks: Vec::new(),
        }
    }

    /// Returns the wrap column.
    #[must_use]
    pub fn wrap(&self) -> usize {
        self.wrap
    }

    /// Returns true if writes are currently being wrapped.
    #[must_use]
    pub fn is_wrapping(&self) -> bool {
        self.wrap > 0 && self.disabled == 0
    }

    /// Returns the number of open blocks.
    #[must_use]
    pub fn block_depth(&self) -> usize {
        self.blocks.len()
    }

    // ========================================================================
    // Line bookkeeping
    // ========================================================================

    fn line_start(&self) -> usize {
        self.last_newline.map_or(0, |index| index + 1)
    }

    fn line_width(&self) -> usize {
        display_width(&self.buffer[self.line_start()..])
    }

    fn previous_index(&self) -> Option<usize> {
        self.buffer.len().checked_sub(1)
    }

    /// Records a newline at `index` as the start of a fresh line.
    fn commit_newline(&mut self, index: usize) {
        self.last_newline = Some(index);
        self.last_space = None;
        self.last_removed_newline = None;
        self.last_inserted_newline = None;
        self.indented = false;
    }

    fn push_hard_newline(&mut self) {
        self.buffer.push(b'\n');
        self.commit_newline(self.buffer.len() - 1);
    }

    /// Turns the tentatively removed newline at `index` back into a newline.
    fn restore_newline(&mut self, index: usize) {
        self.buffer[index] = b'\n';
        self.commit_newline(index);
    }

    fn push_char(&mut self, c: char) {
        let mut encoded = [0u8; 4];
        self.buffer
            .extend_from_slice(c.encode_utf8(&mut encoded).as_bytes());
    }

    /// Appends text without any wrap decisions, then re-derives the line
    /// bookkeeping from the appended span.
    fn push_verbatim(&mut self, s: &str) {
        let start = self.buffer.len();
        self.buffer.extend_from_slice(s.as_bytes());
        if let Some(offset) = s.bytes().rposition(|b| b == b'\n') {
            self.commit_newline(start + offset);
        }
    }

    // ========================================================================
    // Wrapping
    // ========================================================================

    fn push_wrapped(&mut self, c: char) {
        match c {
            '\n' => self.push_newline(),
            ' ' | '\t' => self.push_space(c),
            _ => self.push_char(c),
        }
        self.split_if_needed();
    }

    fn push_newline(&mut self) {
        if let Some(index) = self.previous_index() {
            if self.last_inserted_newline == Some(index) {
                // The split already ended this line.
                self.commit_newline(index);
                return;
            }
            if self.last_removed_newline == Some(index) {
                // Blank line.
                self.restore_newline(index);
                self.push_hard_newline();
                return;
            }
        }

        let width = self.line_width();
        let mergeable = !self.indented
            && width > 1
            && width < self.wrap
            && self.buffer.last() != Some(&HARD_BREAK);
        if mergeable {
            let index = self.buffer.len();
            self.buffer.push(b' ');
            self.last_space = Some(index);
            self.last_removed_newline = Some(index);
        } else {
            self.push_hard_newline();
        }
    }

    fn push_space(&mut self, c: char) {
        let previous = self.previous_index();
        if previous.is_some() && previous == self.last_inserted_newline {
            return;
        }
        if let Some(index) = previous.filter(|&index| self.last_removed_newline == Some(index)) {
            self.restore_newline(index);
            self.indented = true;
        } else if self.buffer.len() == self.line_start() {
            self.indented = true;
        }
        self.last_space = Some(self.buffer.len());
        self.push_char(c);
    }

    /// Splits the current line at its last space if it is over the wrap column.
    fn split_if_needed(&mut self) {
        if self.indented || self.line_width() <= self.wrap {
            return;
        }
        let start = self.line_start();
        let Some(space) = self.last_space.filter(|&index| index > start) else {
            return;
        };
        self.buffer[space] = b'\n';
        self.last_newline = Some(space);
        self.last_inserted_newline = Some(space);
        self.last_space = None;
        if self.last_removed_newline == Some(space) {
            self.last_removed_newline = None;
        }
    }

    /// Appends a closed block to the main buffer as one unit.
    fn inject_block(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.is_wrapping() || self.indented {
            self.push_verbatim(text);
            return;
        }

        let current = self.line_width();
        let first_line = text.split('\n').next().unwrap_or_default();
        let start = self.line_start();
        let splittable = self.last_space.is_some_and(|index| index > start);
        // A block opening with whitespace (` +`) belongs to the text before it.
        let attached = text.starts_with([' ', '\t']);
        if current > 0 && current + first_line.width() > self.wrap && !splittable && !attached {
            self.push_hard_newline();
        }

        let start = self.buffer.len();
        self.buffer.extend_from_slice(text.as_bytes());
        if let Some(offset) = text.bytes().rposition(|b| b == b'\n') {
            self.commit_newline(start + offset);
        }
        self.split_if_needed();
    }

    fn ensure_buffer_newline(&mut self) {
        let Some(index) = self.previous_index() else {
            return;
        };
        if self.buffer[index] == b'\n' {
            if self.last_inserted_newline == Some(index) {
                self.commit_newline(index);
            }
        } else if self.last_removed_newline == Some(index) {
            self.restore_newline(index);
        } else {
            self.push_hard_newline();
        }
    }
}

impl Default for WrappedTarget {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Target for WrappedTarget {
    fn write_str(&mut self, s: &str) {
        if let Some(block) = self.blocks.last_mut() {
            block.push_str(s);
        } else if self.is_wrapping() {
            for c in s.chars() {
                self.push_wrapped(c);
            }
        } else {
            self.push_verbatim(s);
        }
    }

    fn write_char(&mut self, c: char) {
        if let Some(block) = self.blocks.last_mut() {
            block.push(c);
        } else if self.is_wrapping() {
            self.push_wrapped(c);
        } else {
            let mut encoded = [0u8; 4];
            self.push_verbatim(c.encode_utf8(&mut encoded));
        }
    }

    fn ensure_newline(&mut self) {
        if self.blocks.is_empty() {
            self.ensure_buffer_newline();
            return;
        }
        match self.blocks.iter().rev().find(|block| !block.is_empty()) {
            Some(block) if block.ends_with('\n') => {}
            Some(_) => {
                if let Some(top) = self.blocks.last_mut() {
                    top.push('\n');
                }
            }
            // Every open block is empty, so the main buffer is the tail.
            None => self.ensure_buffer_newline(),
        }
    }

    fn disable_wrap(&mut self) {
        self.disabled += 1;
    }

    fn enable_wrap(&mut self) {
        if self.disabled == 0 {
            warn!("enable_wrap called without a matching disable_wrap");
            return;
        }
        self.disabled -= 1;
    }

    fn flush_wrap(&mut self) {
        if !self.blocks.is_empty() {
            return;
        }
        if let Some(index) = self.previous_index() {
            if self.last_removed_newline == Some(index) {
                self.restore_newline(index);
            }
        }
    }

    fn start_block(&mut self) {
        self.blocks.push(String::new());
    }

    fn end_block(&mut self) {
        let Some(text) = self.blocks.pop() else {
            warn!("end_block called without a matching start_block");
            return;
        };
        match self.blocks.last_mut() {
            Some(parent) => parent.push_str(&text),
            None => self.inject_block(&text),
        }
    }

    fn subtarget(&self) -> UnwrappedTarget {
        UnwrappedTarget::new()
    }

    fn finish(mut self) -> String {
        if !self.blocks.is_empty() {
            warn!(open = self.blocks.len(), "finishing with unclosed blocks");
            let pending = std::mem::take(&mut self.blocks).concat();
            self.push_verbatim(&pending);
        }
        self.flush_wrap();
        String::from_utf8(self.buffer)
            .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
    }
}

/// Printed width of a buffer slice.
fn display_width(bytes: &[u8]) -> usize {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.width(),
        Err(_) => String::from_utf8_lossy(bytes).width(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapped(wrap: usize, text: &str) -> String {
        let mut target = WrappedTarget::new(wrap);
        target.write_str(text);
        target.finish()
    }

    #[test]
    fn test_wraps_long_line() {
        let out = wrapped(
            20,
            "This is a fairly long line of text that needs wrapping.\n",
        );
        assert_eq!(out, "This is a fairly\nlong line of text\nthat needs wrapping.\n");
        for line in out.lines() {
            assert!(line.len() <= 20, "line too long: {line:?}");
            assert_eq!(line, line.trim());
        }
    }

    #[test]
    fn test_merges_short_lines() {
        assert_eq!(
            wrapped(40, "Short line\nanother short line\n"),
            "Short line another short line\n"
        );
    }

    #[test]
    fn test_merge_then_split() {
        assert_eq!(
            wrapped(20, "one two three\nfour five six\n"),
            "one two three four\nfive six\n"
        );
    }

    #[test]
    fn test_blank_line_is_kept() {
        assert_eq!(wrapped(40, "aaa\n\nbbb\n"), "aaa\n\nbbb\n");
        assert_eq!(wrapped(40, "aaa\n\n\nbbb\n"), "aaa\n\n\nbbb\n");
    }

    #[test]
    fn test_indented_line_is_not_merged() {
        assert_eq!(wrapped(40, "para\n  indented\n"), "para\n  indented\n");
    }

    #[test]
    fn test_indented_line_is_not_split() {
        let text = "  an indented line that is much longer than ten\n";
        assert_eq!(wrapped(10, text), text);
    }

    #[test]
    fn test_hard_break_is_kept() {
        assert_eq!(wrapped(40, "line +\nnext\n"), "line +\nnext\n");
    }

    #[test]
    fn test_single_character_line_is_kept() {
        assert_eq!(wrapped(40, "a\nb\n"), "a\nb\n");
    }

    #[test]
    fn test_line_at_wrap_column_is_kept() {
        assert_eq!(wrapped(10, "0123456789\nnext\n"), "0123456789\nnext\n");
    }

    #[test]
    fn test_newline_after_split_is_not_doubled() {
        assert_eq!(wrapped(10, "aaaa bbbbb \nccc\n"), "aaaa bbbbb\nccc\n");
    }

    #[test]
    fn test_spaces_after_split_are_dropped() {
        assert_eq!(wrapped(10, "aaaa bbbbb   ccc"), "aaaa bbbbb\nccc");
    }

    #[test]
    fn test_unsplittable_word_overflows() {
        assert_eq!(
            wrapped(5, "abcdefghij klm\n"),
            "abcdefghij\nklm\n"
        );
    }

    #[test]
    fn test_zero_wrap_is_verbatim() {
        let text = "a line\nanother\n\n  indented and very very long\n";
        assert_eq!(wrapped(0, text), text);
    }

    #[test]
    fn test_disable_wrap_nests() {
        let mut target = WrappedTarget::new(10);
        target.disable_wrap();
        target.disable_wrap();
        target.enable_wrap();
        assert!(!target.is_wrapping());
        target.write_str("a long line that must stay whole\n");
        target.enable_wrap();
        assert!(target.is_wrapping());
        target.write_str("short words wrap here\n");
        assert_eq!(
            target.finish(),
            "a long line that must stay whole\nshort\nwords wrap\nhere\n"
        );
    }

    #[test]
    fn test_unbalanced_enable_is_ignored() {
        let mut target = WrappedTarget::new(10);
        target.enable_wrap();
        assert!(target.is_wrapping());
        target.disable_wrap();
        assert!(!target.is_wrapping());
    }

    #[test]
    fn test_ensure_newline_restores_removed_newline() {
        let mut target = WrappedTarget::new(40);
        target.write_str("abc\n");
        target.ensure_newline();
        target.write_str("def");
        assert_eq!(target.finish(), "abc\ndef");
    }

    #[test]
    fn test_ensure_newline_appends_once() {
        let mut target = WrappedTarget::new(40);
        target.ensure_newline();
        target.write_str("abc");
        target.ensure_newline();
        target.ensure_newline();
        assert_eq!(target.finish(), "abc\n");
    }

    #[test]
    fn test_block_moves_with_trailing_space() {
        let mut target = WrappedTarget::new(20);
        target.write_str("Nineteen chars here ");
        target.start_block();
        target.write_str("[[foo,Label Text]]");
        target.end_block();
        assert_eq!(target.finish(), "Nineteen chars here\n[[foo,Label Text]]");
    }

    #[test]
    fn test_block_takes_adjacent_word_along() {
        let mut target = WrappedTarget::new(20);
        target.write_str("Nineteen chars here");
        target.start_block();
        target.write_str("[[foo,Label Text]]");
        target.end_block();
        assert_eq!(target.finish(), "Nineteen chars\nhere[[foo,Label Text]]");
    }

    #[test]
    fn test_block_after_unsplittable_line_gets_newline() {
        let mut target = WrappedTarget::new(20);
        target.write_str("Nineteencharsxxxxxx");
        target.start_block();
        target.write_str("[[foo,Label Text]]");
        target.end_block();
        assert_eq!(target.finish(), "Nineteencharsxxxxxx\n[[foo,Label Text]]");
    }

    #[test]
    fn test_block_with_leading_space_stays_on_line() {
        let mut target = WrappedTarget::new(10);
        target.write_str("abcdefghij");
        target.start_block();
        target.write_str(" +");
        target.end_block();
        target.write_str("\nnext\n");
        assert_eq!(target.finish(), "abcdefghij +\nnext\n");
    }

    #[test]
    fn test_block_is_never_split() {
        let mut target = WrappedTarget::new(10);
        target.write_str("see ");
        target.start_block();
        target.write_str("<<ref,a label with spaces>>");
        target.end_block();
        target.write_str(" and more\n");
        assert_eq!(
            target.finish(),
            "see\n<<ref,a label with spaces>>\nand more\n"
        );
    }

    #[test]
    fn test_nested_blocks_flush_once() {
        let mut target = WrappedTarget::new(40);
        target.start_block();
        target.write_str("a");
        target.start_block();
        target.write_str("b c");
        target.end_block();
        target.write_char('d');
        assert_eq!(target.block_depth(), 1);
        target.end_block();
        assert_eq!(target.block_depth(), 0);
        assert_eq!(target.finish(), "ab cd");
    }

    #[test]
    fn test_unmatched_end_block_is_ignored() {
        let mut target = WrappedTarget::new(40);
        target.write_str("text");
        target.end_block();
        assert_eq!(target.finish(), "text");
    }

    #[test]
    fn test_ensure_newline_inside_empty_block_uses_buffer() {
        let mut target = WrappedTarget::new(40);
        target.write_str("abc");
        target.start_block();
        target.ensure_newline();
        target.write_str("def");
        target.end_block();
        assert_eq!(target.finish(), "abc\ndef");
    }

    #[test]
    fn test_unclosed_block_is_kept() {
        let mut target = WrappedTarget::new(40);
        target.write_str("abc ");
        target.start_block();
        target.write_str("def");
        assert_eq!(target.finish(), "abc def");
    }

    #[test]
    fn test_wide_characters_count_double() {
        // Each CJK character is two columns wide.
        assert_eq!(wrapped(10, "日本語 日本語\n"), "日本語\n日本語\n");
    }
}
