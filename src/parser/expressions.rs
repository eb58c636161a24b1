//! 表达式解析
//!
//! 标准优先级：一元 > 乘除 > 加减 > 关系 > 相等 > 逻辑与 > 逻辑或，左结合。

use crate::ast::*;
use crate::error::ZhscResult;
use crate::lexer::Token;
use super::Parser;

/// 表达式入口
pub fn parse_expression(parser: &mut Parser) -> ZhscResult<Expr> {
    parse_or(parser)
}

fn parse_or(parser: &mut Parser) -> ZhscResult<Expr> {
    let mut left = parse_and(parser)?;

    loop {
        let loc = parser.current_loc();
        if !parser.match_token(&Token::OrOr) {
            break;
        }
        let right = parse_and(parser)?;
        left = Expr::Binary(BinaryExpr {
            left: Box::new(left),
            op: BinaryOp::Or,
            right: Box::new(right),
            loc,
        });
    }

    Ok(left)
}

fn parse_and(parser: &mut Parser) -> ZhscResult<Expr> {
    let mut left = parse_equality(parser)?;

    loop {
        let loc = parser.current_loc();
        if !parser.match_token(&Token::AndAnd) {
            break;
        }
        let right = parse_equality(parser)?;
        left = Expr::Binary(BinaryExpr {
            left: Box::new(left),
            op: BinaryOp::And,
            right: Box::new(right),
            loc,
        });
    }

    Ok(left)
}

fn parse_equality(parser: &mut Parser) -> ZhscResult<Expr> {
    let mut left = parse_comparison(parser)?;

    loop {
        let op = match parser.current_token() {
            Token::EqEq => BinaryOp::Eq,
            Token::NotEq => BinaryOp::Ne,
            _ => break,
        };
        let loc = parser.current_loc();
        parser.advance();
        let right = parse_comparison(parser)?;
        left = Expr::Binary(BinaryExpr {
            left: Box::new(left),
            op,
            right: Box::new(right),
            loc,
        });
    }

    Ok(left)
}

fn parse_comparison(parser: &mut Parser) -> ZhscResult<Expr> {
    let mut left = parse_term(parser)?;

    loop {
        let op = match parser.current_token() {
            Token::Lt => BinaryOp::Lt,
            Token::Le => BinaryOp::Le,
            Token::Gt => BinaryOp::Gt,
            Token::Ge => BinaryOp::Ge,
            _ => break,
        };
        let loc = parser.current_loc();
        parser.advance();
        let right = parse_term(parser)?;
        left = Expr::Binary(BinaryExpr {
            left: Box::new(left),
            op,
            right: Box::new(right),
            loc,
        });
    }

    Ok(left)
}

fn parse_term(parser: &mut Parser) -> ZhscResult<Expr> {
    let mut left = parse_factor(parser)?;

    loop {
        let op = match parser.current_token() {
            Token::Plus => BinaryOp::Add,
            Token::Minus => BinaryOp::Sub,
            _ => break,
        };
        let loc = parser.current_loc();
        parser.advance();
        let right = parse_factor(parser)?;
        left = Expr::Binary(BinaryExpr {
            left: Box::new(left),
            op,
            right: Box::new(right),
            loc,
        });
    }

    Ok(left)
}

fn parse_factor(parser: &mut Parser) -> ZhscResult<Expr> {
    let mut left = parse_unary(parser)?;

    loop {
        let op = match parser.current_token() {
            Token::Star => BinaryOp::Mul,
            Token::Slash => BinaryOp::Div,
            Token::Percent => BinaryOp::Mod,
            _ => break,
        };
        let loc = parser.current_loc();
        parser.advance();
        let right = parse_unary(parser)?;
        left = Expr::Binary(BinaryExpr {
            left: Box::new(left),
            op,
            right: Box::new(right),
            loc,
        });
    }

    Ok(left)
}

fn parse_unary(parser: &mut Parser) -> ZhscResult<Expr> {
    let loc = parser.current_loc();
    let op = match parser.current_token() {
        Token::Minus => Some(UnaryOp::Neg),
        Token::Bang => Some(UnaryOp::Not),
        _ => None,
    };

    if let Some(op) = op {
        parser.advance();
        let operand = parse_unary(parser)?;
        return Ok(Expr::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
            loc,
        }));
    }

    parse_postfix(parser)
}

/// 后缀：函数调用、下标访问、成员访问，可任意串联
fn parse_postfix(parser: &mut Parser) -> ZhscResult<Expr> {
    let mut expr = parse_primary(parser)?;

    loop {
        let loc = parser.current_loc();
        if parser.match_token(&Token::LParen) {
            let mut args = Vec::new();
            if !parser.check(&Token::RParen) {
                loop {
                    args.push(parse_expression(parser)?);
                    if !parser.match_token(&Token::Comma) {
                        break;
                    }
                }
            }
            parser.consume(&Token::RParen, "实参表后期望 ')'")?;
            expr = Expr::Call(CallExpr { callee: Box::new(expr), args, loc });
        } else if parser.match_token(&Token::LBracket) {
            let index = parse_expression(parser)?;
            parser.consume(&Token::RBracket, "下标后期望 ']'")?;
            expr = Expr::Index(IndexExpr {
                object: Box::new(expr),
                index: Box::new(index),
                loc,
            });
        } else if parser.match_token(&Token::Dot) {
            let member = parser.consume_identifier("'.' 后期望成员名")?;
            expr = Expr::Member(MemberExpr { object: Box::new(expr), member, loc });
        } else {
            break;
        }
    }

    Ok(expr)
}

fn parse_primary(parser: &mut Parser) -> ZhscResult<Expr> {
    let loc = parser.current_loc();

    let expr = match parser.current_token() {
        Token::Number(text) => {
            let text = text.clone();
            parser.advance();
            Expr::Literal(LiteralExpr { value: LiteralValue::Number(text), loc })
        }
        Token::Str(text) => {
            let text = text.clone();
            parser.advance();
            Expr::Literal(LiteralExpr { value: LiteralValue::Str(text), loc })
        }
        Token::True => {
            parser.advance();
            Expr::Literal(LiteralExpr { value: LiteralValue::Bool(true), loc })
        }
        Token::False => {
            parser.advance();
            Expr::Literal(LiteralExpr { value: LiteralValue::Bool(false), loc })
        }
        Token::Identifier(name) => {
            let name = name.clone();
            parser.advance();
            Expr::Identifier(IdentExpr { name, loc })
        }
        Token::LParen => {
            parser.advance();
            let inner = parse_expression(parser)?;
            parser.consume(&Token::RParen, "括号表达式后期望 ')'")?;
            inner
        }
        _ => return Err(parser.error("期望表达式")),
    };

    Ok(expr)
}
