//! Turns Makefile text into logical lines.
//!
//! The reader follows the classic "text file" conventions used by simple Makefile consumers:
//! comments are stripped, trailing whitespace is removed, blank lines are skipped and
//! backslash-continued lines are joined. Each resulting line is then classified so that callers
//! only have to look at plain text lines when searching for variable assignments.

pub mod lexer;
pub mod token;

#[cfg(test)]
mod tests;

pub use lexer::{tokenize, MakefileLexer};
pub use token::{Directive, Lexed, LexerError, LexerErrorKind, LineKind, LogicalLine};
