use crate::token::{Token, TokenKind};

/// Pull-based scanner over an immutable source buffer.
///
/// The lexer never allocates and never fails: malformed input degrades to
/// `Unknown` tokens and an unterminated string literal runs to the end of
/// the buffer. Once the buffer is exhausted, `next_token` keeps returning
/// the `EndOfStream` token.
pub struct Lexer<'a> {
    source: &'a str,
    offset: usize,
    line:   usize,
}

fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | 0x0b | 0x0c | b'\r' | b'\n')
}

// `Unknown` tokens still have to land on a character boundary, so a
// non-ASCII lead byte consumes its whole character.
fn char_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        _ => 4,
    }
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer { source, offset: 0, line: 1 }
    }

    fn peek(&self, ahead: usize) -> u8 {
        self.source.as_bytes().get(self.offset + ahead).copied().unwrap_or(0)
    }

    /// Returns the next token, advancing the cursor past it.
    pub fn next_token(&mut self) -> Token<'a> {
        self.skip_whitespace();

        if self.offset >= self.source.len() {
            return Token { kind: TokenKind::EndOfStream, text: "", line: self.line };
        }

        let start = self.offset;
        let line = self.line;
        let c = self.peek(0);

        let kind = match c {
            b'(' => TokenKind::OpenParen,
            b')' => TokenKind::CloseParen,
            b':' => TokenKind::Colon,
            b';' => TokenKind::Semicolon,
            b'*' => TokenKind::Asterisk,
            b'[' => TokenKind::OpenBracket,
            b']' => TokenKind::CloseBracket,
            b'{' => TokenKind::OpenBrace,
            b'}' => TokenKind::CloseBrace,
            b'<' => TokenKind::OpenAngle,
            b'>' => TokenKind::CloseAngle,

            b'"' => return self.string_literal(),

            _ if c.is_ascii_alphabetic() => return self.identifier(),

            // Only the lead digit is consumed; the grammar has no use for
            // full numeric literals.
            _ if c.is_ascii_digit() => TokenKind::Number,

            _ => {
                self.offset += char_width(c);
                return Token { kind: TokenKind::Unknown, text: &self.source[start..self.offset], line };
            }
        };

        self.offset += 1;
        Token { kind, text: &self.source[start..self.offset], line }
    }

    /// Skips whitespace and both comment forms. The line counter advances
    /// on every newline seen, comments included.
    fn skip_whitespace(&mut self) {
        loop {
            let c = self.peek(0);

            if is_whitespace(c) {
                if c == b'\n' {
                    self.line += 1;
                }
                self.offset += 1;
            } else if c == b'/' && self.peek(1) == b'/' {
                self.offset += 2;
                while self.offset < self.source.len() && self.peek(0) != b'\n' {
                    self.offset += 1;
                }
            } else if c == b'/' && self.peek(1) == b'*' {
                self.offset += 2;
                while self.offset < self.source.len()
                    && !(self.peek(0) == b'*' && self.peek(1) == b'/')
                {
                    if self.peek(0) == b'\n' {
                        self.line += 1;
                    }
                    self.offset += 1;
                }
                if self.peek(0) == b'*' {
                    self.offset += 2;
                }
            } else {
                break;
            }
        }
    }

    /// Scans a `"`-delimited literal. `\` skips the following character
    /// without decoding it; the token text excludes the quotes. A missing
    /// closing quote consumes to the end of the buffer.
    fn string_literal(&mut self) -> Token<'a> {
        let line = self.line;
        self.offset += 1;
        let start = self.offset;

        while self.offset < self.source.len() && self.peek(0) != b'"' {
            if self.peek(0) == b'\\' && self.offset + 1 < self.source.len() {
                self.offset += 1;
            }
            if self.peek(0) == b'\n' {
                self.line += 1;
            }
            self.offset += 1;
        }

        let text = &self.source[start..self.offset];
        if self.peek(0) == b'"' {
            self.offset += 1;
        }

        Token { kind: TokenKind::String, text, line }
    }

    fn identifier(&mut self) -> Token<'a> {
        let start = self.offset;
        let line = self.line;

        self.offset += 1;
        loop {
            let c = self.peek(0);
            if c.is_ascii_alphanumeric() || c == b'_' {
                self.offset += 1;
            } else {
                break;
            }
        }

        Token { kind: TokenKind::Identifier, text: &self.source[start..self.offset], line }
    }
}
