// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Recursive-descent parser.
//!
//! LL(1) with a two-token buffer: the peek token disambiguates `ident '='`
//! (assignment) from `ident '('` (call). Expressions use precedence
//! climbing; `?:` and `^` are right-associative.

use crate::error::{Error, Result};
use crate::lang::ast::*;
use crate::lang::lexer::Lexer;
use crate::lang::token::{Pos, Token, TokenKind};

/// Parse a whole program.
pub fn parse(src: &str) -> Result<Program> {
    Parser::new(src)?.parse_program()
}

pub struct Parser<'a> {
    lx: Lexer<'a>,
    cur: Token,
    peek: Token,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str) -> Result<Self> {
        let mut lx = Lexer::new(src);
        let cur = lx.next_token()?;
        let peek = lx.next_token()?;
        Ok(Parser { lx, cur, peek })
    }

    pub fn parse_program(&mut self) -> Result<Program> {
        let mut stmts = Vec::new();
        while self.cur.kind != TokenKind::Eof {
            stmts.push(self.parse_stmt()?);
        }
        Ok(Program { stmts })
    }

    fn parse_stmt(&mut self) -> Result<Stmt> {
        if self.cur.kind == TokenKind::LBrace {
            let (stmts, pos) = self.parse_block()?;
            return Ok(Stmt::Block { stmts, pos });
        }

        // keywords are plain identifiers
        if self.cur.kind == TokenKind::Ident {
            match self.cur.lexeme.as_str() {
                "module" => return self.parse_module_def(),
                "function" => return self.parse_func_def(),
                "if" => return self.parse_if(),
                _ => {}
            }
        }

        // assignment: ident '=' expr ';'
        if self.cur.kind == TokenKind::Ident && self.peek.kind == TokenKind::Assign {
            let name = self.cur.lexeme.clone();
            let pos = self.cur.pos;
            self.advance()?; // ident
            self.advance()?; // =
            let expr = self.parse_expr()?;
            self.expect(TokenKind::Semi, "expected ';' after assignment")?;
            return Ok(Stmt::Assign { name, expr, pos });
        }

        // call statement, optionally with children
        if self.cur.kind == TokenKind::Ident && self.peek.kind == TokenKind::LParen {
            let call = self.parse_call()?;
            let pos = call.pos;

            // explicit children block
            if self.cur.kind == TokenKind::LBrace {
                let (children, _) = self.parse_block()?;
                return Ok(Stmt::Call(CallStmt { call, children, pos }));
            }

            // semicolon terminator: leaf call
            if self.cur.kind == TokenKind::Semi {
                self.advance()?;
                return Ok(Stmt::Call(CallStmt { call, children: Vec::new(), pos }));
            }

            // single-child shorthand: translate(v) cube(1);
            let child = self.parse_stmt()?;
            return Ok(Stmt::Call(CallStmt { call, children: vec![child], pos }));
        }

        Err(Error::parse(self.cur.pos, "expected statement"))
    }

    fn parse_block(&mut self) -> Result<(Vec<Stmt>, Pos)> {
        let pos = self.cur.pos;
        self.expect(TokenKind::LBrace, "expected '{'")?;
        let mut stmts = Vec::new();
        while self.cur.kind != TokenKind::RBrace && self.cur.kind != TokenKind::Eof {
            stmts.push(self.parse_stmt()?);
        }
        self.expect(TokenKind::RBrace, "expected '}'")?;
        Ok((stmts, pos))
    }

    fn parse_if(&mut self) -> Result<Stmt> {
        let pos = self.cur.pos;
        self.expect_ident("if")?;
        self.expect(TokenKind::LParen, "expected '(' after if")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "expected ')' after if condition")?;
        let then_branch = Box::new(self.parse_stmt()?);
        let else_branch = if self.cur.kind == TokenKind::Ident && self.cur.lexeme == "else" {
            self.advance()?;
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        Ok(Stmt::If { cond, then_branch, else_branch, pos })
    }

    fn parse_module_def(&mut self) -> Result<Stmt> {
        let pos = self.cur.pos;
        self.expect_ident("module")?;
        if self.cur.kind != TokenKind::Ident {
            return Err(Error::parse(self.cur.pos, "expected module name"));
        }
        let name = self.cur.lexeme.clone();
        self.advance()?;
        let params = self.parse_param_list()?;
        let (body, _) = self.parse_block()?;
        Ok(Stmt::ModuleDef { name, params, body, pos })
    }

    fn parse_func_def(&mut self) -> Result<Stmt> {
        let pos = self.cur.pos;
        self.expect_ident("function")?;
        if self.cur.kind != TokenKind::Ident {
            return Err(Error::parse(self.cur.pos, "expected function name"));
        }
        let name = self.cur.lexeme.clone();
        self.advance()?;
        let params = self.parse_param_list()?;
        self.expect(TokenKind::Assign, "expected '=' in function definition")?;
        let body = self.parse_expr()?;
        self.expect(TokenKind::Semi, "expected ';' after function definition")?;
        Ok(Stmt::FuncDef { name, params, body, pos })
    }

    fn parse_param_list(&mut self) -> Result<Vec<Param>> {
        self.expect(TokenKind::LParen, "expected '('")?;
        let mut params = Vec::new();
        if self.cur.kind != TokenKind::RParen {
            loop {
                if self.cur.kind != TokenKind::Ident {
                    return Err(Error::parse(self.cur.pos, "expected parameter name"));
                }
                let pos = self.cur.pos;
                let name = self.cur.lexeme.clone();
                self.advance()?;
                let default = if self.cur.kind == TokenKind::Assign {
                    self.advance()?;
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                params.push(Param { name, default, pos });
                if self.cur.kind == TokenKind::Comma {
                    self.advance()?;
                    continue;
                }
                break;
            }
        }
        self.expect(TokenKind::RParen, "expected ')'")?;
        Ok(params)
    }

    fn parse_call(&mut self) -> Result<Call> {
        let pos = self.cur.pos;
        let name = self.cur.lexeme.clone();
        self.advance()?; // ident
        self.expect(TokenKind::LParen, "expected '(' in call")?;
        let mut args = Vec::new();
        if self.cur.kind != TokenKind::RParen {
            loop {
                let arg_pos = self.cur.pos;
                if self.cur.kind == TokenKind::Ident && self.peek.kind == TokenKind::Assign {
                    let arg_name = self.cur.lexeme.clone();
                    self.advance()?; // ident
                    self.advance()?; // =
                    let expr = self.parse_expr()?;
                    args.push(Arg { name: Some(arg_name), expr, pos: arg_pos });
                } else {
                    let expr = self.parse_expr()?;
                    args.push(Arg { name: None, expr, pos: arg_pos });
                }
                if self.cur.kind == TokenKind::Comma {
                    self.advance()?;
                    if self.cur.kind == TokenKind::RParen {
                        break; // trailing comma
                    }
                    continue;
                }
                break;
            }
        }
        self.expect(TokenKind::RParen, "expected ')' after args")?;
        Ok(Call { name, args, pos })
    }

    // ---- expressions (descending precedence) ----

    fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_ternary()
    }

    fn parse_ternary(&mut self) -> Result<Expr> {
        let cond = self.parse_or()?;
        if self.cur.kind == TokenKind::Question {
            let pos = self.cur.pos;
            self.advance()?;
            let then_expr = self.parse_expr()?;
            self.expect(TokenKind::Colon, "expected ':' in ternary")?;
            let else_expr = self.parse_expr()?;
            return Ok(Expr::Ternary {
                cond: Box::new(cond),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
                pos,
            });
        }
        Ok(cond)
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let mut x = self.parse_and()?;
        while self.cur.kind == TokenKind::Or {
            let pos = self.cur.pos;
            self.advance()?;
            let r = self.parse_and()?;
            x = binary(BinaryOp::Or, x, r, pos);
        }
        Ok(x)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mut x = self.parse_eq()?;
        while self.cur.kind == TokenKind::And {
            let pos = self.cur.pos;
            self.advance()?;
            let r = self.parse_eq()?;
            x = binary(BinaryOp::And, x, r, pos);
        }
        Ok(x)
    }

    fn parse_eq(&mut self) -> Result<Expr> {
        let mut x = self.parse_cmp()?;
        loop {
            let op = match self.cur.kind {
                TokenKind::Eq => BinaryOp::Eq,
                TokenKind::Neq => BinaryOp::Neq,
                _ => return Ok(x),
            };
            let pos = self.cur.pos;
            self.advance()?;
            let r = self.parse_cmp()?;
            x = binary(op, x, r, pos);
        }
    }

    fn parse_cmp(&mut self) -> Result<Expr> {
        let mut x = self.parse_add()?;
        loop {
            let op = match self.cur.kind {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::Lte => BinaryOp::Lte,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::Gte => BinaryOp::Gte,
                _ => return Ok(x),
            };
            let pos = self.cur.pos;
            self.advance()?;
            let r = self.parse_add()?;
            x = binary(op, x, r, pos);
        }
    }

    fn parse_add(&mut self) -> Result<Expr> {
        let mut x = self.parse_mul()?;
        loop {
            let op = match self.cur.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(x),
            };
            let pos = self.cur.pos;
            self.advance()?;
            let r = self.parse_mul()?;
            x = binary(op, x, r, pos);
        }
    }

    fn parse_mul(&mut self) -> Result<Expr> {
        let mut x = self.parse_pow()?;
        loop {
            let op = match self.cur.kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => return Ok(x),
            };
            let pos = self.cur.pos;
            self.advance()?;
            let r = self.parse_pow()?;
            x = binary(op, x, r, pos);
        }
    }

    fn parse_pow(&mut self) -> Result<Expr> {
        let x = self.parse_unary()?;
        if self.cur.kind == TokenKind::Caret {
            let pos = self.cur.pos;
            self.advance()?;
            let r = self.parse_pow()?; // right-assoc
            return Ok(binary(BinaryOp::Pow, x, r, pos));
        }
        Ok(x)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let op = match self.cur.kind {
            TokenKind::Not => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            _ => return self.parse_primary(),
        };
        let pos = self.cur.pos;
        self.advance()?;
        let x = self.parse_unary()?;
        Ok(Expr::Unary { op, expr: Box::new(x), pos })
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.cur.kind {
            TokenKind::Number => {
                let e = Expr::Number { value: self.cur.num, pos: self.cur.pos };
                self.advance()?;
                Ok(e)
            }
            TokenKind::Str => {
                let e = Expr::Str { value: self.cur.lexeme.clone(), pos: self.cur.pos };
                self.advance()?;
                Ok(e)
            }
            TokenKind::Ident => {
                if self.cur.lexeme == "true" || self.cur.lexeme == "false" {
                    let e = Expr::Bool { value: self.cur.lexeme == "true", pos: self.cur.pos };
                    self.advance()?;
                    return Ok(e);
                }
                if self.peek.kind == TokenKind::LParen {
                    let call = self.parse_call()?;
                    return Ok(Expr::Call(call));
                }
                let e = Expr::Var { name: self.cur.lexeme.clone(), pos: self.cur.pos };
                self.advance()?;
                Ok(e)
            }
            TokenKind::LBrack => {
                let pos = self.cur.pos;
                self.advance()?;
                let mut elems = Vec::new();
                if self.cur.kind != TokenKind::RBrack {
                    loop {
                        elems.push(self.parse_expr()?);
                        if self.cur.kind == TokenKind::Comma {
                            self.advance()?;
                            if self.cur.kind == TokenKind::RBrack {
                                break; // trailing comma
                            }
                            continue;
                        }
                        break;
                    }
                }
                self.expect(TokenKind::RBrack, "expected ']'")?;
                Ok(Expr::Array { elems, pos })
            }
            TokenKind::LParen => {
                self.advance()?;
                let e = self.parse_expr()?;
                self.expect(TokenKind::RParen, "expected ')'")?;
                Ok(e)
            }
            _ => Err(Error::parse(self.cur.pos, "expected expression")),
        }
    }

    fn advance(&mut self) -> Result<()> {
        let next = self.lx.next_token()?;
        self.cur = std::mem::replace(&mut self.peek, next);
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind, msg: &str) -> Result<()> {
        if self.cur.kind != kind {
            return Err(Error::parse(self.cur.pos, msg));
        }
        self.advance()
    }

    fn expect_ident(&mut self, want: &str) -> Result<()> {
        if self.cur.kind != TokenKind::Ident || self.cur.lexeme != want {
            return Err(Error::parse(self.cur.pos, format!("expected {want:?}")));
        }
        self.advance()
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr, pos: Pos) -> Expr {
    Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs), pos }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leaf_call() {
        let prog = parse("cube([10, 10, 10]);").unwrap();
        assert_eq!(prog.stmts.len(), 1);
        match &prog.stmts[0] {
            Stmt::Call(c) => {
                assert_eq!(c.call.name, "cube");
                assert!(c.children.is_empty());
            }
            other => panic!("unexpected stmt: {other:?}"),
        }
    }

    #[test]
    fn test_parse_single_child_shorthand() {
        let prog = parse("translate([5, 0, 0]) cube(1);").unwrap();
        match &prog.stmts[0] {
            Stmt::Call(c) => {
                assert_eq!(c.call.name, "translate");
                assert_eq!(c.children.len(), 1);
            }
            other => panic!("unexpected stmt: {other:?}"),
        }
    }

    #[test]
    fn test_parse_children_block() {
        let prog = parse("difference() { cube(10); sphere(8); }").unwrap();
        match &prog.stmts[0] {
            Stmt::Call(c) => assert_eq!(c.children.len(), 2),
            other => panic!("unexpected stmt: {other:?}"),
        }
    }

    #[test]
    fn test_parse_module_and_function() {
        let prog = parse(
            "module ring(r, h=1) { cylinder(h=h, r=r); }\nfunction twice(x) = x * 2;",
        )
        .unwrap();
        match &prog.stmts[0] {
            Stmt::ModuleDef { name, params, body, .. } => {
                assert_eq!(name, "ring");
                assert_eq!(params.len(), 2);
                assert!(params[1].default.is_some());
                assert_eq!(body.len(), 1);
            }
            other => panic!("unexpected stmt: {other:?}"),
        }
        assert!(matches!(&prog.stmts[1], Stmt::FuncDef { name, .. } if name == "twice"));
    }

    #[test]
    fn test_parse_if_else() {
        let prog = parse("if (x > 1) sphere(1); else cube(1);").unwrap();
        match &prog.stmts[0] {
            Stmt::If { else_branch, .. } => assert!(else_branch.is_some()),
            other => panic!("unexpected stmt: {other:?}"),
        }
    }

    fn expr_of(src: &str) -> Expr {
        let prog = parse(&format!("x = {src};")).unwrap();
        match prog.stmts.into_iter().next().unwrap() {
            Stmt::Assign { expr, .. } => expr,
            other => panic!("unexpected stmt: {other:?}"),
        }
    }

    #[test]
    fn test_precedence_mul_over_add() {
        // 1 + 2 * 3 parses as 1 + (2 * 3)
        match expr_of("1 + 2 * 3") {
            Expr::Binary { op: BinaryOp::Add, rhs, .. } => {
                assert!(matches!(*rhs, Expr::Binary { op: BinaryOp::Mul, .. }));
            }
            other => panic!("unexpected expr: {other:?}"),
        }
    }

    #[test]
    fn test_power_right_associative() {
        // 2 ^ 3 ^ 2 parses as 2 ^ (3 ^ 2)
        match expr_of("2 ^ 3 ^ 2") {
            Expr::Binary { op: BinaryOp::Pow, rhs, .. } => {
                assert!(matches!(*rhs, Expr::Binary { op: BinaryOp::Pow, .. }));
            }
            other => panic!("unexpected expr: {other:?}"),
        }
    }

    #[test]
    fn test_ternary_lowest_precedence() {
        match expr_of("a > 1 ? 2 : 3") {
            Expr::Ternary { cond, .. } => {
                assert!(matches!(*cond, Expr::Binary { op: BinaryOp::Gt, .. }));
            }
            other => panic!("unexpected expr: {other:?}"),
        }
    }

    #[test]
    fn test_trailing_commas() {
        assert!(parse("x = [1, 2, 3,];").is_ok());
        assert!(parse("cube(1, );").is_ok());
    }

    #[test]
    fn test_named_and_positional_args() {
        let prog = parse("cylinder(2, r=1.5);").unwrap();
        match &prog.stmts[0] {
            Stmt::Call(c) => {
                assert_eq!(c.call.args[0].name, None);
                assert_eq!(c.call.args[1].name.as_deref(), Some("r"));
            }
            other => panic!("unexpected stmt: {other:?}"),
        }
    }

    #[test]
    fn test_error_carries_position() {
        let err = parse("x = ;").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert_eq!(err.pos().line, 1);
        assert_eq!(err.pos().col, 5);
    }

    #[test]
    fn test_ast_serde_round_trip() {
        let prog = parse("module m(a=1) { sphere(a); }\nm(2);").unwrap();
        let json = serde_json::to_string(&prog).unwrap();
        let back: Program = serde_json::from_str(&json).unwrap();
        assert_eq!(back.stmts.len(), prog.stmts.len());
    }
}
