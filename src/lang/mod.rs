// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Syntactic front end: tokens, lexer, AST, and the recursive-descent parser.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use parser::parse;
