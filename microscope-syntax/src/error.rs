//! Error types for declaration parsing.

use thiserror::Error;

/// Error type for parsing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Unexpected token.
    #[error("expected {expected}, found '{found}' at {line}:{column}")]
    Unexpected {
        /// What the parser was looking for.
        expected: String,
        /// Text of the offending token.
        found: String,
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
    },

    /// Input ended early.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// What the parser was looking for.
        expected: String,
    },

    /// String literal without a closing quote.
    #[error("unterminated string literal at {line}:{column}")]
    UnterminatedString {
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
    },

    /// Block comment without a closing `*/`.
    #[error("unterminated block comment at {line}:{column}")]
    UnterminatedComment {
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
    },

    /// Character that cannot start any token.
    #[error("invalid character '{character}' at {line}:{column}")]
    InvalidCharacter {
        /// Offending character.
        character: char,
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
    },
}

impl ParseError {
    /// Creates an unexpected token error.
    pub fn unexpected(
        expected: impl Into<String>,
        found: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self::Unexpected {
            expected: expected.into(),
            found: found.into(),
            line,
            column,
        }
    }

    /// Creates an unexpected end of input error.
    pub fn eof(expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            expected: expected.into(),
        }
    }
}
