//! The write sink every renderer goes through.

/// A text sink that renderers write through.
///
/// Two implementations exist: [`UnwrappedTarget`] appends everything
/// verbatim, and [`WrappedTarget`](crate::WrappedTarget) reflows text to a
/// wrap column.
///
/// Callers must pair [`disable_wrap`](Self::disable_wrap) with
/// [`enable_wrap`](Self::enable_wrap) and
/// [`start_block`](Self::start_block) with [`end_block`](Self::end_block).
pub trait Target {
    /// Appends a string.
    fn write_str(&mut self, s: &str);

    /// Appends a single character.
    fn write_char(&mut self, c: char);

    /// Makes the stream end in a newline unless it is empty or already does.
    fn ensure_newline(&mut self);

    /// Suspends wrapping. Calls nest.
    fn disable_wrap(&mut self);

    /// Undoes one [`disable_wrap`](Self::disable_wrap).
    fn enable_wrap(&mut self);

    /// Commits any pending wrap decision at the end of the stream.
    fn flush_wrap(&mut self);

    /// Opens an atomic span that wrapping must not split.
    fn start_block(&mut self);

    /// Closes the innermost atomic span and emits it as one unit.
    fn end_block(&mut self);

    /// Returns a detached target for measuring content.
    fn subtarget(&self) -> UnwrappedTarget;

    /// Consumes the target and returns the accumulated text.
    fn finish(self) -> String
    where
        Self: Sized;
}

/// A target that appends every write verbatim.
#[derive(Debug, Clone, Default)]
pub struct UnwrappedTarget {
    buffer: String,
}

impl UnwrappedTarget {
    /// Creates an empty target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the text written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Target for UnwrappedTarget {
    fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    fn write_char(&mut self, c: char) {
        self.buffer.push(c);
    }

    fn ensure_newline(&mut self) {
        if !self.buffer.is_empty() && !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
    }

    fn disable_wrap(&mut self) {}

    fn enable_wrap(&mut self) {}

    fn flush_wrap(&mut self) {}

    fn start_block(&mut self) {}

    fn end_block(&mut self) {}

    fn subtarget(&self) -> UnwrappedTarget {
        Self::new()
    }

    fn finish(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrapped_appends_verbatim() {
        let mut target = UnwrappedTarget::new();
        target.disable_wrap();
        target.write_str("a very long line that nobody will ever wrap");
        target.start_block();
        target.write_char('!');
        target.end_block();
        target.enable_wrap();
        target.flush_wrap();
        assert_eq!(
            target.finish(),
            "a very long line that nobody will ever wrap!"
        );
    }

    #[test]
    fn test_ensure_newline_is_idempotent() {
        let mut target = UnwrappedTarget::new();
        target.ensure_newline();
        assert!(target.is_empty());

        target.write_str("line");
        target.ensure_newline();
        target.ensure_newline();
        assert_eq!(target.as_str(), "line\n");
    }

    #[test]
    fn test_subtarget_is_detached() {
        let mut target = UnwrappedTarget::new();
        target.write_str("parent");
        let mut sub = target.subtarget();
        sub.write_str("child");
        assert_eq!(sub.finish(), "child");
        assert_eq!(target.finish(), "parent");
    }
}
