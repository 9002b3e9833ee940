//! glyphc-lex - Lexical Analyzer (Lexer/Tokenizer)
//!
//! Turns source text into a stream of [`Token`]s. The implementation is
//! split one module per character class ([`lexer::identifier`],
//! [`lexer::number`], [`lexer::operator`], [`lexer::string`],
//! [`lexer::comment`]) driven by [`lexer::core::Lexer`], which owns a
//! [`cursor::Cursor`] over the source and a diagnostic [`glyphc_util::Handler`]
//! for error reporting.
//!
//! The lexer never fails outright: unrecognized input is reported through
//! the handler and surfaces as [`Token::Invalid`], letting the parser
//! decide how to recover.

pub mod cursor;
pub mod lexer;
pub mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{keyword_from_ident, Token};

#[cfg(test)]
mod edge_cases;
