//! Tokenizer for declaration-level Swift source.
//!
//! Keywords are not distinguished from identifiers here; the parser matches
//! them by text since most Swift keywords are contextual. Comments and
//! whitespace are dropped, line breaks collapse into a single `Newline`
//! token because they terminate declarations and expressions.

use crate::cursor::Cursor;
use crate::error::ParseError;

/// Token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    /// `` `name` `` including the backticks.
    Backticked,
    Integer,
    Float,
    /// Complete string literal including delimiters.
    String,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Semicolon,
    Dot,
    Question,
    Bang,
    Arrow,
    Eq,
    At,
    Hash,
    Amp,
    Lt,
    Gt,
    /// Any other operator character.
    Operator,
    /// One or more line breaks.
    Newline,
    Eof,
}

/// Byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start offset (inclusive).
    pub start: u32,
    /// End offset (exclusive).
    pub end: u32,
}

/// A lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Source range.
    pub span: Span,
}

impl Token {
    fn new(kind: TokenKind, start: u32, end: u32) -> Self {
        Self {
            kind,
            span: Span { start, end },
        }
    }

    /// Source text of the token.
    #[must_use]
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        &source[self.span.start as usize..self.span.end as usize]
    }
}

/// Converts a byte offset into a 1-based `(line, column)` pair.
#[must_use]
pub fn line_column(source: &str, offset: u32) -> (usize, usize) {
    let offset = (offset as usize).min(source.len());
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(idx) => before[idx + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, column)
}

/// The declaration lexer.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    source: &'src str,
    tokens: Vec<Token>,
}

impl<'src> Lexer<'src> {
    /// Create a lexer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            source,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source. The result always ends with `Eof`.
    ///
    /// # Errors
    /// Returns `ParseError` for unterminated strings or comments and for
    /// characters that cannot start a token.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
        Lexer::new(source).run()
    }

    fn run(mut self) -> Result<Vec<Token>, ParseError> {
        loop {
            let saw_newline = self.skip_trivia()?;
            let pos = self.cursor.pos();
            if saw_newline
                && self
                    .tokens
                    .last()
                    .is_some_and(|t| t.kind != TokenKind::Newline)
            {
                self.tokens.push(Token::new(TokenKind::Newline, pos, pos));
            }

            let Some(c) = self.cursor.peek() else {
                self.tokens.push(Token::new(TokenKind::Eof, pos, pos));
                return Ok(self.tokens);
            };

            let token = self.next_token(c, pos)?;
            self.tokens.push(token);
        }
    }

    fn next_token(&mut self, c: char, start: u32) -> Result<Token, ParseError> {
        let kind = match c {
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            ',' => self.single(TokenKind::Comma),
            ':' => self.single(TokenKind::Colon),
            ';' => self.single(TokenKind::Semicolon),
            '.' => self.single(TokenKind::Dot),
            '?' => self.single(TokenKind::Question),
            '!' => self.single(TokenKind::Bang),
            '=' => self.single(TokenKind::Eq),
            '@' => self.single(TokenKind::At),
            '&' => self.single(TokenKind::Amp),
            '<' => self.single(TokenKind::Lt),
            '>' => self.single(TokenKind::Gt),
            '-' if self.cursor.peek_next() == Some('>') => {
                self.cursor.advance_by(2);
                TokenKind::Arrow
            }
            '#' => {
                if matches!(self.cursor.peek_next(), Some('"' | '#')) {
                    self.lex_raw_string(start)?
                } else {
                    self.single(TokenKind::Hash)
                }
            }
            '"' => {
                self.lex_string(start, 0)?;
                TokenKind::String
            }
            '`' => self.lex_backticked(start)?,
            '0'..='9' => self.lex_number(),
            c if is_ident_start(c) => {
                self.cursor.eat_while(is_ident_continue);
                TokenKind::Identifier
            }
            '-' | '+' | '*' | '/' | '%' | '|' | '^' | '~' | '\\' => {
                self.single(TokenKind::Operator)
            }
            other => {
                let (line, column) = line_column(self.source, start);
                return Err(ParseError::InvalidCharacter {
                    character: other,
                    line,
                    column,
                });
            }
        };

        Ok(Token::new(kind, start, self.cursor.pos()))
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance();
        kind
    }

    /// Skips whitespace and comments. Returns whether a line break was seen.
    fn skip_trivia(&mut self) -> Result<bool, ParseError> {
        let mut saw_newline = false;
        loop {
            match self.cursor.peek() {
                Some(' ' | '\t' | '\r') => {
                    self.cursor.advance();
                }
                Some('\n') => {
                    saw_newline = true;
                    self.cursor.advance();
                }
                Some('/') if self.cursor.peek_next() == Some('/') => {
                    self.cursor.eat_while(|c| c != '\n');
                }
                Some('/') if self.cursor.peek_next() == Some('*') => {
                    if self.skip_block_comment()? {
                        saw_newline = true;
                    }
                }
                _ => return Ok(saw_newline),
            }
        }
    }

    /// Skips a possibly nested block comment.
    fn skip_block_comment(&mut self) -> Result<bool, ParseError> {
        let start = self.cursor.pos();
        self.cursor.advance_by(2);
        let mut depth = 1u32;
        let mut saw_newline = false;

        while depth > 0 {
            if self.cursor.starts_with("/*") {
                self.cursor.advance_by(2);
                depth += 1;
            } else if self.cursor.starts_with("*/") {
                self.cursor.advance_by(2);
                depth -= 1;
            } else {
                match self.cursor.advance() {
                    Some('\n') => saw_newline = true,
                    Some(_) => {}
                    None => {
                        let (line, column) = line_column(self.source, start);
                        return Err(ParseError::UnterminatedComment { line, column });
                    }
                }
            }
        }

        Ok(saw_newline)
    }

    fn lex_raw_string(&mut self, start: u32) -> Result<TokenKind, ParseError> {
        let mut hashes = 0usize;
        while self.cursor.peek() == Some('#') {
            self.cursor.advance();
            hashes += 1;
        }
        if self.cursor.peek() != Some('"') {
            // `##` outside a string literal
            return Ok(TokenKind::Hash);
        }
        self.lex_string(start, hashes)?;
        Ok(TokenKind::String)
    }

    /// Lexes a string literal starting at the opening quote.
    fn lex_string(&mut self, start: u32, hashes: usize) -> Result<(), ParseError> {
        let multiline = self.cursor.starts_with("\"\"\"");
        self.cursor.advance_by(if multiline { 3 } else { 1 });

        loop {
            let Some(c) = self.cursor.peek() else {
                return Err(self.unterminated(start));
            };

            match c {
                '\\' if hashes == 0 => {
                    self.cursor.advance();
                    if self.cursor.peek() == Some('(') {
                        self.cursor.advance();
                        self.lex_interpolation(start)?;
                    } else {
                        self.cursor.advance();
                    }
                }
                '"' if multiline => {
                    if self.cursor.starts_with("\"\"\"") {
                        self.cursor.advance_by(3);
                        if self.eat_closing_hashes(hashes) {
                            return Ok(());
                        }
                    } else {
                        self.cursor.advance();
                    }
                }
                '"' => {
                    self.cursor.advance();
                    if self.eat_closing_hashes(hashes) {
                        return Ok(());
                    }
                }
                '\n' if !multiline => return Err(self.unterminated(start)),
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }

    fn eat_closing_hashes(&mut self, hashes: usize) -> bool {
        if hashes == 0 {
            return true;
        }
        let closing = "#".repeat(hashes);
        if self.cursor.starts_with(&closing) {
            self.cursor.advance_by(hashes);
            true
        } else {
            false
        }
    }

    /// Skips an interpolated expression `\( ... )`, which may contain strings.
    fn lex_interpolation(&mut self, start: u32) -> Result<(), ParseError> {
        let mut depth = 1u32;
        loop {
            match self.cursor.peek() {
                None => return Err(self.unterminated(start)),
                Some('(') => {
                    self.cursor.advance();
                    depth += 1;
                }
                Some(')') => {
                    self.cursor.advance();
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some('"') => {
                    let nested = self.cursor.pos();
                    self.lex_string(nested, 0)?;
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    fn lex_backticked(&mut self, start: u32) -> Result<TokenKind, ParseError> {
        self.cursor.advance();
        self.cursor.eat_while(|c| c != '`' && c != '\n');
        if self.cursor.peek() != Some('`') {
            let (line, column) = line_column(self.source, start);
            return Err(ParseError::unexpected(
                "closing backtick",
                self.cursor.slice(start, self.cursor.pos()),
                line,
                column,
            ));
        }
        self.cursor.advance();
        Ok(TokenKind::Backticked)
    }

    fn lex_number(&mut self) -> TokenKind {
        self.cursor.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
        if self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.advance();
            self.cursor.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
            TokenKind::Float
        } else {
            TokenKind::Integer
        }
    }

    fn unterminated(&self, start: u32) -> ParseError {
        let (line, column) = line_column(self.source, start);
        ParseError::UnterminatedString { line, column }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
