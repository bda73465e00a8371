// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Error taxonomy for the whole pipeline.
//!
//! Every error carries the source position of the token or AST node that
//! triggered it. The first error aborts the enclosing parse/evaluation; there
//! is no recovery and no partial result.

use crate::lang::token::Pos;
use thiserror::Error;

/// Errors produced by lexing, parsing, argument binding, or evaluation.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Malformed token (bad number, unterminated string, unknown byte).
    #[error("{pos}: {msg}")]
    Lex { pos: Pos, msg: String },

    /// Grammar violation.
    #[error("{pos}: {msg}")]
    Parse { pos: Pos, msg: String },

    /// Argument binding failure (missing required parameter, too many
    /// positional arguments, type-mismatched argument).
    #[error("{pos}: {msg}")]
    Bind { pos: Pos, msg: String },

    /// Semantic failure during evaluation (undefined name, mixed shape
    /// representations, geometric precondition violated, ...).
    #[error("{pos}: {msg}")]
    Eval { pos: Pos, msg: String },
}

impl Error {
    pub fn lex(pos: Pos, msg: impl Into<String>) -> Self {
        Error::Lex { pos, msg: msg.into() }
    }

    pub fn parse(pos: Pos, msg: impl Into<String>) -> Self {
        Error::Parse { pos, msg: msg.into() }
    }

    pub fn bind(pos: Pos, msg: impl Into<String>) -> Self {
        Error::Bind { pos, msg: msg.into() }
    }

    pub fn eval(pos: Pos, msg: impl Into<String>) -> Self {
        Error::Eval { pos, msg: msg.into() }
    }

    /// Source position the error points at.
    pub fn pos(&self) -> Pos {
        match self {
            Error::Lex { pos, .. }
            | Error::Parse { pos, .. }
            | Error::Bind { pos, .. }
            | Error::Eval { pos, .. } => *pos,
        }
    }

    /// Error message without the position prefix.
    pub fn message(&self) -> &str {
        match self {
            Error::Lex { msg, .. }
            | Error::Parse { msg, .. }
            | Error::Bind { msg, .. }
            | Error::Eval { msg, .. } => msg,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
