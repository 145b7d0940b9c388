//! # Microscope Syntax
//!
//! Declaration-level lexer and parser for Swift source files.
//!
//! This crate provides:
//! - A tokenizer that understands comments, string literals and raw strings
//! - A recursive-descent parser producing a declaration tree
//! - The [`DeclarationParser`] trait for plugging in other parsers
//!
//! # Example
//!
//! ```rust
//! use microscope_syntax::{Declaration, parse_source};
//!
//! let file = parse_source("public struct Point { let x: Int; let y: Int }").unwrap();
//! assert!(matches!(file.declarations[0], Declaration::Composite(_)));
//! ```

pub mod ast;
mod cursor;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::*;
pub use error::ParseError;
pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::{DeclarationParser, SwiftParser, parse_source};
