//! Byte cursor over a Mork buffer.

/// Sequential reader over the bytes of one Mork buffer.
///
/// The format never contains NUL bytes, so [`next_char`](Self::next_char)
/// uses `0` as its end-of-input marker. [`next_byte`](Self::next_byte) is the
/// same read with an explicit [`Option`].
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the byte at the cursor and advances, or `0` at end of input.
    ///
    /// End of input is sticky: once reached, every further call returns `0`.
    pub fn next_char(&mut self) -> u8 {
        self.next_byte().unwrap_or(0)
    }

    /// Returns the byte at the cursor and advances, or `None` at end of input.
    pub fn next_byte(&mut self) -> Option<u8> {
        let cur = self.data.get(self.pos).copied()?;
        self.pos += 1;
        Some(cur)
    }

    /// Returns `true` when the unread input starts with `prefix`.
    #[must_use]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.remaining().starts_with(prefix)
    }

    /// Advances the cursor by up to `count` bytes.
    pub fn skip(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.data.len());
    }

    /// Offset of the next byte to be read.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns `true` once every byte has been read.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

/// Whitespace as the Mork grammar defines it.
#[must_use]
pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | 0x0c)
}
