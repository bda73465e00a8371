// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Byte-wise lexer.
//!
//! Numbers are scanned greedily over digits, `.`, `e`/`E`, `+`, `-` and then
//! validated by the strict float parser, so a lexeme like `1.2.3` is a lex
//! error at the token's start. An unterminated `/* */` comment silently
//! consumes to end of input; an unterminated string is an error.

use crate::error::{Error, Result};
use crate::lang::token::{Pos, Token, TokenKind};

pub struct Lexer<'a> {
    src: &'a [u8],
    i: usize,
    pos: Pos,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer { src: src.as_bytes(), i: 0, pos: Pos { offset: 0, line: 1, col: 1 } }
    }

    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_space_and_comments();

        if self.i >= self.src.len() {
            return Ok(Token::new(TokenKind::Eof, "", self.pos));
        }

        let start_pos = self.pos;
        let ch = self.peek();

        if is_ident_start(ch) {
            let start = self.i;
            self.advance();
            while self.i < self.src.len() && is_ident_continue(self.peek()) {
                self.advance();
            }
            let lex = self.slice(start);
            return Ok(Token::new(TokenKind::Ident, lex, start_pos));
        }

        if ch.is_ascii_digit()
            || (ch == b'.' && self.i + 1 < self.src.len() && self.src[self.i + 1].is_ascii_digit())
        {
            let start = self.i;
            self.advance();
            while self.i < self.src.len() {
                let c = self.peek();
                if c.is_ascii_digit() || matches!(c, b'.' | b'e' | b'E' | b'+' | b'-') {
                    // permissive; the float parser validates
                    self.advance();
                    continue;
                }
                break;
            }
            let txt = self.slice(start);
            let num: f64 = txt
                .parse()
                .map_err(|_| Error::lex(start_pos, format!("invalid number {txt:?}")))?;
            return Ok(Token::number(txt, num, start_pos));
        }

        if ch == b'"' {
            self.advance(); // opening quote
            let start = self.i;
            while self.i < self.src.len() && self.peek() != b'"' {
                if self.peek() == b'\\' && self.i + 1 < self.src.len() {
                    self.advance();
                }
                self.advance();
            }
            if self.i >= self.src.len() {
                return Err(Error::lex(start_pos, "unterminated string"));
            }
            let txt = self.slice(start);
            self.advance(); // closing quote
            return Ok(Token::new(TokenKind::Str, txt, start_pos));
        }

        // Two-char operators, matched greedily.
        for (text, kind) in [
            ("==", TokenKind::Eq),
            ("!=", TokenKind::Neq),
            ("<=", TokenKind::Lte),
            (">=", TokenKind::Gte),
            ("&&", TokenKind::And),
            ("||", TokenKind::Or),
        ] {
            if self.match_str(text) {
                return Ok(Token::new(kind, text, start_pos));
            }
        }

        self.advance();
        let kind = match ch {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'[' => TokenKind::LBrack,
            b']' => TokenKind::RBrack,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semi,
            b'=' => TokenKind::Assign,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'^' => TokenKind::Caret,
            b'!' => TokenKind::Not,
            b'<' => TokenKind::Lt,
            b'>' => TokenKind::Gt,
            b'?' => TokenKind::Question,
            b':' => TokenKind::Colon,
            _ => {
                return Err(Error::lex(
                    start_pos,
                    format!("unexpected character {:?}", ch as char),
                ))
            }
        };
        Ok(Token::new(kind, (ch as char).to_string(), start_pos))
    }

    fn skip_space_and_comments(&mut self) {
        loop {
            while self.i < self.src.len() {
                match self.peek() {
                    b' ' | b'\t' | b'\n' | b'\r' => self.advance(),
                    _ => break,
                }
            }
            if self.i + 1 < self.src.len() && self.peek() == b'/' && self.src[self.i + 1] == b'/' {
                while self.i < self.src.len() && self.peek() != b'\n' {
                    self.advance();
                }
                continue;
            }
            if self.i + 1 < self.src.len() && self.peek() == b'/' && self.src[self.i + 1] == b'*' {
                self.advance();
                self.advance();
                while self.i + 1 < self.src.len()
                    && !(self.peek() == b'*' && self.src[self.i + 1] == b'/')
                {
                    self.advance();
                }
                // unterminated block comment consumes to end of input
                if self.i + 1 < self.src.len() {
                    self.advance();
                    self.advance();
                } else {
                    self.i = self.src.len();
                }
                continue;
            }
            return;
        }
    }

    fn peek(&self) -> u8 {
        self.src[self.i]
    }

    fn advance(&mut self) {
        if self.i >= self.src.len() {
            return;
        }
        let ch = self.src[self.i];
        self.i += 1;
        self.pos.offset += 1;
        if ch == b'\n' {
            self.pos.line += 1;
            self.pos.col = 1;
        } else {
            self.pos.col += 1;
        }
    }

    fn match_str(&mut self, s: &str) -> bool {
        let bytes = s.as_bytes();
        if self.i + bytes.len() > self.src.len() {
            return false;
        }
        if &self.src[self.i..self.i + bytes.len()] != bytes {
            return false;
        }
        for _ in 0..bytes.len() {
            self.advance();
        }
        true
    }

    fn slice(&self, start: usize) -> String {
        String::from_utf8_lossy(&self.src[start..self.i]).into_owned()
    }
}

fn is_ident_start(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphabetic()
}

fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(src: &str) -> Result<Vec<Token>> {
        let mut lx = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            let t = lx.next_token()?;
            let done = t.kind == TokenKind::Eof;
            out.push(t);
            if done {
                return Ok(out);
            }
        }
    }

    fn kinds(src: &str) -> Vec<TokenKind> {
        lex_all(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_basic_tokens() {
        assert_eq!(
            kinds("cube(size=[1, 2, 3]);"),
            vec![
                TokenKind::Ident,
                TokenKind::LParen,
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::LBrack,
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::RBrack,
                TokenKind::RParen,
                TokenKind::Semi,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_number_values() {
        let toks = lex_all("1.5 2e3 .25").unwrap();
        assert_eq!(toks[0].num, 1.5);
        assert_eq!(toks[1].num, 2000.0);
        assert_eq!(toks[2].num, 0.25);
    }

    #[test]
    fn test_malformed_number_is_error() {
        let err = lex_all("1.2.3").unwrap_err();
        assert!(matches!(err, Error::Lex { .. }));
        assert!(err.to_string().contains("invalid number"));
    }

    #[test]
    fn test_two_char_operators_greedy() {
        assert_eq!(
            kinds("a <= b == c && d"),
            vec![
                TokenKind::Ident,
                TokenKind::Lte,
                TokenKind::Ident,
                TokenKind::Eq,
                TokenKind::Ident,
                TokenKind::And,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_skipped() {
        assert_eq!(
            kinds("// line\n/* block\nstill block */ x"),
            vec![TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_block_comment_consumes_input() {
        // documented quirk: not an error, just EOF
        assert_eq!(kinds("x /* never closed"), vec![TokenKind::Ident, TokenKind::Eof]);
    }

    #[test]
    fn test_string_escapes_opaque() {
        let toks = lex_all(r#""a\"b""#).unwrap();
        assert_eq!(toks[0].kind, TokenKind::Str);
        assert_eq!(toks[0].lexeme, "a\\\"b");
    }

    #[test]
    fn test_unterminated_string_is_error() {
        assert!(lex_all("\"abc").is_err());
    }

    #[test]
    fn test_unknown_character_is_error() {
        let err = lex_all("@").unwrap_err();
        assert!(err.to_string().contains("unexpected character"));
    }

    #[test]
    fn test_positions() {
        let toks = lex_all("a\n  b").unwrap();
        assert_eq!(toks[0].pos, Pos { offset: 0, line: 1, col: 1 });
        assert_eq!(toks[1].pos, Pos { offset: 4, line: 2, col: 3 });
    }
}
