//! notation/music-notation/src/lexer.rs
//! A byte-cursor lexer tracking 1-based line/column for error reporting, shared by the
//! notation parser's flat-element and polyphonic-block recursion.

/// A cursor over the notation source text. Cheap to snapshot for backtracking.
#[derive(Clone, Copy)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: u32,
    col: u32,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0, line: 1, col: 1 }
    }

    #[must_use]
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[must_use]
    pub fn col(&self) -> u32 {
        self.col
    }

    #[must_use]
    pub fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    #[must_use]
    pub fn starts_with(&self, needle: &str) -> bool {
        self.rest().starts_with(needle)
    }

    /// Advance the cursor by `byte_len` bytes, updating line/column as it crosses newlines.
    pub fn advance_by(&mut self, byte_len: usize) {
        for c in self.rest()[..byte_len].chars() {
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        self.pos += byte_len;
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance_by(c.len_utf8());
            } else {
                break;
            }
        }
    }

    /// Consume and return the longest prefix of `pred`-matching characters.
    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let s = self.rest();
        let len = s
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(s.len(), |(i, _)| i);
        let token = &s[..len];
        self.advance_by(len);
        token
    }

    /// Consume `literal` if the cursor starts with it. Returns whether it matched.
    pub fn eat(&mut self, literal: &str) -> bool {
        if self.starts_with(literal) {
            self.advance_by(literal.len());
            true
        } else {
            false
        }
    }
}
