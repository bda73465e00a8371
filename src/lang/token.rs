// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Token and source-position types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a byte in the source text. Attached to every token and AST
/// node so diagnostics can point at the offending input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pos {
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 && self.col == 0 {
            write!(f, "offset {}", self.offset)
        } else {
            write!(f, "{}:{}", self.line, self.col)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    Eof,
    Ident,
    Number,
    Str,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBrack,
    RBrack,
    Comma,
    Semi,

    // Operators
    Assign, // =
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,

    Not, // !
    Eq,  // ==
    Neq, // !=
    Lt,
    Lte,
    Gt,
    Gte,
    And, // &&
    Or,  // ||

    Question,
    Colon,
}

/// A lexed token. `num` is only meaningful for `TokenKind::Number`; for
/// strings `lexeme` holds the raw contents between the quotes, escapes
/// included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub num: f64,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, pos: Pos) -> Self {
        Token { kind, lexeme: lexeme.into(), num: 0.0, pos }
    }

    pub fn number(lexeme: impl Into<String>, num: f64, pos: Pos) -> Self {
        Token { kind: TokenKind::Number, lexeme: lexeme.into(), num, pos }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_display() {
        assert_eq!(Pos { offset: 7, line: 2, col: 3 }.to_string(), "2:3");
        assert_eq!(Pos { offset: 7, line: 0, col: 0 }.to_string(), "offset 7");
    }
}
