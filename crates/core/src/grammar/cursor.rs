use mccmd_diagnostics::Position;

/// Placeholder returned by [`Cursor::current`] and [`Cursor::peek`] past the
/// end of input. The same character may occur in the text, so exhaustion is
/// always checked with [`Cursor::at_eof`].
pub const EOF: char = '\u{4}';

/// Characters that end an unquoted word, identifier, or number.
const TERMINATORS: &str = " ,@~^/$&\"'!#%+*=[{]}\\|<>`\n";

/// True if `c` ends an unquoted argument. End of input terminates too; see
/// [`Cursor::char_at`].
pub fn is_terminating(c: char) -> bool {
    TERMINATORS.contains(c)
}

/// True if `c` can start a signed number.
pub fn is_number_start(c: char) -> bool {
    c == '-' || c == '+' || c.is_ascii_digit()
}

/// Character reader with line/column tracking.
#[derive(Debug, Clone)]
pub struct Cursor {
    chars: Vec<char>,
    index: usize,
    pos: Position,
}

impl Cursor {
    /// Start reading `src`, whose first character sits at `start`.
    pub fn new(src: &str, start: Position) -> Self {
        Self {
            chars: src.chars().collect(),
            index: 0,
            pos: start,
        }
    }

    /// True once every character has been consumed.
    pub fn at_eof(&self) -> bool {
        self.index >= self.chars.len()
    }

    /// The `k`-th character from the cursor (`char_at(0)` is the current
    /// one), or `None` past the end.
    pub fn char_at(&self, k: usize) -> Option<char> {
        self.chars.get(self.index + k).copied()
    }

    /// The character under the cursor, or [`EOF`].
    pub fn current(&self) -> char {
        self.char_at(0).unwrap_or(EOF)
    }

    /// The `k`-th character after the current one (`peek(0)` is the next).
    pub fn peek(&self, k: usize) -> char {
        self.char_at(k + 1).unwrap_or(EOF)
    }

    /// Position of the current character.
    pub fn pos(&self) -> Position {
        self.pos
    }

    /// Step past the current character. No-op at EOF.
    pub fn advance(&mut self) {
        let Some(&c) = self.chars.get(self.index) else {
            return;
        };
        self.index += 1;
        if c == '\n' {
            self.pos.line += 1;
            self.pos.column = 0;
        } else {
            self.pos.column += 1;
        }
    }

    /// Skip a run of ASCII spaces. Tabs and newlines are not whitespace here.
    pub fn skip_spaces(&mut self) {
        while self.current() == ' ' {
            self.advance();
        }
    }

    /// True while the current character is neither a newline nor EOF.
    pub fn line_not_end(&self) -> bool {
        !self.at_eof() && self.current() != '\n'
    }

    /// Consume up to (not including) the newline and return the text read,
    /// trailing whitespace trimmed.
    pub fn skip_line(&mut self) -> String {
        let mut text = String::new();
        while self.line_not_end() {
            text.push(self.current());
            self.advance();
        }
        text.truncate(text.trim_end().len());
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: usize, column: usize) -> Position {
        Position::new(line, column)
    }

    #[test]
    fn advances_columns_then_lines() {
        let mut c = Cursor::new("ab\nc", at(1, 0));
        assert_eq!(c.current(), 'a');
        c.advance();
        assert_eq!((c.current(), c.pos()), ('b', at(1, 1)));
        c.advance();
        assert_eq!((c.current(), c.pos()), ('\n', at(1, 2)));
        c.advance();
        assert_eq!((c.current(), c.pos()), ('c', at(2, 0)));
        c.advance();
        assert_eq!((c.current(), c.pos()), (EOF, at(2, 1)));
    }

    #[test]
    fn advance_at_eof_is_noop() {
        let mut c = Cursor::new("x", at(3, 5));
        c.advance();
        let end = c.pos();
        c.advance();
        c.advance();
        assert_eq!(c.pos(), end);
        assert_eq!(c.current(), EOF);
    }

    #[test]
    fn eof_is_tracked_by_index() {
        let mut c = Cursor::new("a\u{4}b", at(1, 0));
        c.advance();
        assert_eq!(c.current(), '\u{4}');
        assert!(!c.at_eof());
        assert!(c.line_not_end());
        c.advance();
        c.advance();
        assert!(c.at_eof());
        assert!(!c.line_not_end());
        assert_eq!(c.char_at(0), None);
    }

    #[test]
    fn peek_looks_past_current() {
        let c = Cursor::new("abc", at(1, 0));
        assert_eq!(c.peek(0), 'b');
        assert_eq!(c.peek(1), 'c');
        assert_eq!(c.peek(2), EOF);
    }

    #[test]
    fn skip_spaces_ignores_tabs() {
        let mut c = Cursor::new("  \tx", at(1, 0));
        c.skip_spaces();
        assert_eq!(c.current(), '\t');
        assert_eq!(c.pos(), at(1, 2));
    }

    #[test]
    fn skip_line_stops_at_newline_and_trims() {
        let mut c = Cursor::new("say hi   \nnext", at(1, 0));
        assert_eq!(c.skip_line(), "say hi");
        assert_eq!(c.current(), '\n');
        assert!(!c.line_not_end());
    }

    #[test]
    fn terminators() {
        for ch in [' ', '@', '~', '^', '=', '[', ']', '{', '}', ',', '\n', '"'] {
            assert!(is_terminating(ch), "{ch:?} should terminate");
        }
        for ch in ['a', 'Z', '0', '-', '.', ':', '_', '\t', '\u{4}'] {
            assert!(!is_terminating(ch), "{ch:?} should not terminate");
        }
    }
}
