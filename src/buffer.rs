//! Read-only text buffer with character offset mapping
//!
//! Spans are expressed in character offsets while the regex engine reports
//! byte offsets. `TextBuffer` indexes the character boundaries once so both
//! can be translated cheaply during a render.

/// One line of the buffer, located by character offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferLine<'a> {
    /// Line content without the trailing newline
    pub text: &'a str,
    /// Character offset of the first character
    pub start: usize,
    /// Character offset just past the content (before the newline)
    pub end: usize,
    /// Character offset of the next line (after the newline, if any)
    pub next: usize,
}

/// An immutable view of the text being highlighted
#[derive(Debug, Clone)]
pub struct TextBuffer<'a> {
    text: &'a str,
    /// Byte offset of every character, followed by the total byte length
    char_starts: Vec<usize>,
}

impl<'a> TextBuffer<'a> {
    /// Index a buffer
    pub fn new(text: &'a str) -> Self {
        let mut char_starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        char_starts.push(text.len());
        Self { text, char_starts }
    }

    /// Get the underlying text
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.char_starts.len() - 1
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Translate a byte offset on a character boundary to a character offset
    ///
    /// Offsets inside a multi-byte character round down to that character.
    pub fn char_offset(&self, byte: usize) -> usize {
        match self.char_starts.binary_search(&byte) {
            Ok(index) => index,
            Err(index) => index.saturating_sub(1),
        }
    }

    /// Translate a character offset to a byte offset (clamped to the end)
    pub fn byte_offset(&self, char_pos: usize) -> usize {
        self.char_starts
            .get(char_pos)
            .copied()
            .unwrap_or(self.text.len())
    }

    /// Split the buffer on `\n`, keeping character positions
    ///
    /// A trailing newline does not start an extra empty line.
    pub fn lines(&self) -> Vec<BufferLine<'a>> {
        let mut lines = Vec::new();
        let mut byte = 0;
        for raw in self.text.split_inclusive('\n') {
            let content = raw.strip_suffix('\n').unwrap_or(raw);
            let start = self.char_offset(byte);
            let end = self.char_offset(byte + content.len());
            let next = self.char_offset(byte + raw.len());
            lines.push(BufferLine {
                text: content,
                start,
                end,
                next,
            });
            byte += raw.len();
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_offsets() {
        let buffer = TextBuffer::new("abc");
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.char_offset(2), 2);
        assert_eq!(buffer.char_offset(3), 3);
        assert_eq!(buffer.byte_offset(1), 1);
    }

    #[test]
    fn test_multibyte_offsets() {
        // "é" is two bytes, "→" is three
        let buffer = TextBuffer::new("é→x");
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.char_offset(0), 0);
        assert_eq!(buffer.char_offset(2), 1);
        assert_eq!(buffer.char_offset(5), 2);
        assert_eq!(buffer.char_offset(6), 3);
        assert_eq!(buffer.byte_offset(2), 5);
        assert_eq!(buffer.byte_offset(10), 6);
    }

    #[test]
    fn test_lines() {
        let buffer = TextBuffer::new("ab\n\nc");
        let lines = buffer.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!((lines[0].start, lines[0].end, lines[0].next), (0, 2, 3));
        assert_eq!(lines[1].text, "");
        assert_eq!((lines[1].start, lines[1].end, lines[1].next), (3, 3, 4));
        assert_eq!((lines[2].start, lines[2].end, lines[2].next), (4, 5, 5));
    }

    #[test]
    fn test_trailing_newline() {
        let buffer = TextBuffer::new("x\n");
        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].next, 2);
        assert!(TextBuffer::new("").lines().is_empty());
    }
}
