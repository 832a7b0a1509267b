//! Whitespace and line-comment skipping.

use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Skips ASCII whitespace. Line and column accounting happen in the
    /// cursor's `advance`.
    pub(crate) fn skip_whitespace(&mut self) {
        while self.cursor.current_char().is_ascii_whitespace() && !self.cursor.is_at_end() {
            self.cursor.advance();
        }
    }

    /// Skips a `//` line comment by discarding bytes until `\n`, `\r`, or
    /// end of file. The terminating newline is left for `skip_whitespace`.
    pub(crate) fn skip_line_comment(&mut self) {
        while !self.cursor.is_at_end() {
            let c = self.cursor.current_char();
            if c == '\n' || c == '\r' {
                break;
            }
            self.cursor.advance();
        }
    }
}
