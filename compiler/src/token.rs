/// Classification of a single lexical unit.
///
/// Keywords are not distinguished here; `struct`, `enum` and `command` come
/// out as plain identifiers and the parser matches their spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    OpenParen,
    CloseParen,
    Colon,
    Semicolon,
    Asterisk,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    OpenAngle,
    CloseAngle,

    String,
    Identifier,
    Number,

    Unknown,
    EndOfStream,
}

/// One token of the schema source. `text` borrows the input buffer, so
/// tokens are produced and consumed one at a time and never stored in bulk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub line: usize,
}

impl Token<'_> {
    /// Human-readable rendering used by parser error messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Identifier => format!("identifier \"{}\"", self.text),
            TokenKind::String => format!("string \"{}\"", self.text),
            TokenKind::EndOfStream => "end of input".to_string(),
            _ => format!("\"{}\"", self.text),
        }
    }
}
