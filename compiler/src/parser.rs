use crate::{
    error::IdlError,
    lexer::Lexer,
    token::{Token, TokenKind},
    types::{TypeCategory, TypeId, TypeRecord, TypeTable},
};

/// Parses a schema source buffer into a type table bounded to
/// `type_capacity` records (primitives included).
///
/// Parsing is single-pass: a member type has to resolve against a type
/// declared earlier in the buffer (or a primitive), so forward references
/// fail with [`IdlError::UnresolvedType`]. Any grammar violation aborts
/// the run at the first offending token.
pub fn parse(source: &str, type_capacity: usize) -> Result<TypeTable, IdlError> {
    let mut parser = Parser {
        lexer: Lexer::new(source),
        table: TypeTable::with_capacity(type_capacity)?,
    };
    parser.run()?;
    Ok(parser.table)
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    table: TypeTable,
}

impl<'a> Parser<'a> {
    fn run(&mut self) -> Result<(), IdlError> {
        loop {
            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::Identifier => match token.text {
                    "struct" => self.declaration_struct()?,
                    "enum" => self.declaration_enum()?,
                    "command" => self.declaration_command()?,
                    // Any other top-level identifier is skipped.
                    _ => {}
                },
                TokenKind::EndOfStream => return Ok(()),
                // Stray tokens at the top level are skipped as well.
                _ => {}
            }
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token<'a>, IdlError> {
        let token = self.lexer.next_token();
        if token.kind != kind {
            return Err(IdlError::UnexpectedToken {
                expected,
                found: token.describe(),
                line: token.line,
            });
        }
        Ok(token)
    }

    /// Appends a new record for `name`, rejecting names that are already
    /// taken by an earlier declaration or a primitive.
    fn declare(
        &mut self,
        name: &Token<'a>,
        category: TypeCategory,
        exportable: bool,
    ) -> Result<TypeId, IdlError> {
        if self.table.lookup(name.text).is_some() {
            return Err(IdlError::DuplicateType {
                name: name.text.to_string(),
                line: name.line,
            });
        }

        let mut record = TypeRecord::new(category, name.text);
        record.exportable = exportable;
        self.table.push(record)
    }

    /// `struct <name> { (<type> <name> ;)* }`
    fn declaration_struct(&mut self) -> Result<(), IdlError> {
        let name = self.expect(TokenKind::Identifier, "identifier")?;
        self.expect(TokenKind::OpenBrace, "\"{\"")?;

        let id = self.declare(&name, TypeCategory::Struct, true)?;
        self.member_block(id)
    }

    /// Scans a `{ (<type> <name> ;)* }` body, appending each member to
    /// `owner`. An identifier starts a member line; other tokens between
    /// members are skipped without diagnostic.
    fn member_block(&mut self, owner: TypeId) -> Result<(), IdlError> {
        loop {
            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::CloseBrace => return Ok(()),
                TokenKind::Identifier => self.declaration_variable(&token, owner)?,
                TokenKind::EndOfStream => return Err(unexpected_end(&token)),
                _ => {}
            }
        }
    }

    /// One `<type> <name> ;` member line. The type name resolves against
    /// everything declared so far, primitives included.
    fn declaration_variable(&mut self, type_name: &Token<'a>, owner: TypeId) -> Result<(), IdlError> {
        let member_type =
            self.table
                .lookup(type_name.text)
                .ok_or_else(|| IdlError::UnresolvedType {
                    name: type_name.text.to_string(),
                    line: type_name.line,
                })?;

        let name = self.expect(TokenKind::Identifier, "identifier")?;
        self.expect(TokenKind::Semicolon, "\";\"")?;

        let record = self.table.get_mut(owner);
        record.member_names.push(name.text.to_string());
        record.member_types.push(member_type);
        Ok(())
    }

    /// `enum <name> [ : <underlying> ] { <value>* }`
    fn declaration_enum(&mut self) -> Result<(), IdlError> {
        let name = self.expect(TokenKind::Identifier, "identifier")?;

        // Optional storage qualifier, consumed but not retained.
        let mut token = self.lexer.next_token();
        if token.kind == TokenKind::Colon {
            self.lexer.next_token();
            token = self.lexer.next_token();
        }
        if token.kind != TokenKind::OpenBrace {
            return Err(IdlError::UnexpectedToken {
                expected: "\"{\"",
                found: token.describe(),
                line: token.line,
            });
        }

        let id = self.declare(&name, TypeCategory::Enum, true)?;
        loop {
            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::CloseBrace => return Ok(()),
                TokenKind::Identifier => {
                    self.table.get_mut(id).member_names.push(token.text.to_string());
                }
                TokenKind::EndOfStream => return Err(unexpected_end(&token)),
                _ => {}
            }
        }
    }

    /// `command <name> { ( <name> { (<type> <name> ;)* } )* }`
    ///
    /// Every identifier inside the braces opens a nested struct that gets
    /// its own non-exportable table record and is registered by name on
    /// the owning command.
    fn declaration_command(&mut self) -> Result<(), IdlError> {
        let name = self.expect(TokenKind::Identifier, "identifier")?;
        self.expect(TokenKind::OpenBrace, "\"{\"")?;

        let command = self.declare(&name, TypeCategory::Command, true)?;
        loop {
            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::CloseBrace => return Ok(()),
                TokenKind::Identifier => {
                    self.expect(TokenKind::OpenBrace, "\"{\"")?;
                    let nested = self.declare(&token, TypeCategory::Struct, false)?;
                    self.member_block(nested)?;

                    let record = self.table.get_mut(command);
                    record.member_names.push(token.text.to_string());
                    record.member_types.push(nested);
                }
                TokenKind::EndOfStream => return Err(unexpected_end(&token)),
                _ => {}
            }
        }
    }
}

fn unexpected_end(token: &Token<'_>) -> IdlError {
    IdlError::UnexpectedToken {
        expected: "\"}\"",
        found: token.describe(),
        line: token.line,
    }
}
