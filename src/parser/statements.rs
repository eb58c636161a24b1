//! 语句解析

use crate::ast::*;
use crate::error::ZhscResult;
use crate::lexer::Token;
use super::Parser;
use super::contract::parse_type;
use super::expressions::parse_expression;

/// `{ 语句* }`
pub fn parse_block(parser: &mut Parser) -> ZhscResult<Block> {
    let loc = parser.current_loc();
    parser.consume(&Token::LBrace, "期望 '{'")?;

    let mut statements = Vec::new();
    while !parser.check(&Token::RBrace) {
        if parser.is_at_end() {
            return Err(parser.error("代码块未闭合，期望 '}'"));
        }
        statements.push(parse_statement(parser)?);
    }

    parser.consume(&Token::RBrace, "代码块后期望 '}'")?;
    Ok(Block { statements, loc })
}

pub fn parse_statement(parser: &mut Parser) -> ZhscResult<Stmt> {
    // 语句前的注释不挂载，直接丢弃
    let _ = parser.take_doc();

    match parser.current_token() {
        Token::LBrace => Ok(Stmt::Block(parse_block(parser)?)),
        Token::If => parse_if(parser),
        Token::While => parse_while(parser),
        Token::For => parse_for(parser),
        Token::Return => parse_return(parser),
        Token::Require => parse_require(parser),
        Token::Emit => parse_emit(parser),
        t if t.is_type() => {
            let stmt = parse_var_decl(parser)?;
            parser.consume(&Token::Semicolon, "变量声明后期望 ';'")?;
            Ok(stmt)
        }
        _ => {
            let stmt = parse_expr_or_assignment(parser)?;
            parser.consume(&Token::Semicolon, "语句后期望 ';'")?;
            Ok(stmt)
        }
    }
}

/// `如果 (条件) 块 (否则 (如果语句 | 块))?`
fn parse_if(parser: &mut Parser) -> ZhscResult<Stmt> {
    let loc = parser.current_loc();
    parser.advance(); // 如果
    parser.consume(&Token::LParen, "'如果' 后期望 '('")?;
    let condition = parse_expression(parser)?;
    parser.consume(&Token::RParen, "条件后期望 ')'")?;
    let then_block = parse_block(parser)?;

    let else_branch = if parser.match_token(&Token::Else) {
        if parser.check(&Token::If) {
            Some(Box::new(parse_if(parser)?))
        } else {
            Some(Box::new(Stmt::Block(parse_block(parser)?)))
        }
    } else {
        None
    };

    Ok(Stmt::If(IfStmt { condition, then_block, else_branch, loc }))
}

/// `当 (条件) 块`
fn parse_while(parser: &mut Parser) -> ZhscResult<Stmt> {
    let loc = parser.current_loc();
    parser.advance(); // 当
    parser.consume(&Token::LParen, "'当' 后期望 '('")?;
    let condition = parse_expression(parser)?;
    parser.consume(&Token::RParen, "条件后期望 ')'")?;
    let body = parse_block(parser)?;
    Ok(Stmt::While(WhileStmt { condition, body, loc }))
}

/// `循环 (初始化?; 条件?; 更新?) 块`
fn parse_for(parser: &mut Parser) -> ZhscResult<Stmt> {
    let loc = parser.current_loc();
    parser.advance(); // 循环
    parser.consume(&Token::LParen, "'循环' 后期望 '('")?;

    let init = if parser.check(&Token::Semicolon) {
        None
    } else if parser.current_token().is_type() {
        Some(Box::new(parse_var_decl(parser)?))
    } else {
        Some(Box::new(parse_expr_or_assignment(parser)?))
    };
    parser.consume(&Token::Semicolon, "循环初始化后期望 ';'")?;

    let condition = if parser.check(&Token::Semicolon) {
        None
    } else {
        Some(parse_expression(parser)?)
    };
    parser.consume(&Token::Semicolon, "循环条件后期望 ';'")?;

    let update = if parser.check(&Token::RParen) {
        None
    } else {
        Some(Box::new(parse_expr_or_assignment(parser)?))
    };
    parser.consume(&Token::RParen, "循环头后期望 ')'")?;

    let body = parse_block(parser)?;
    Ok(Stmt::For(ForStmt { init, condition, update, body, loc }))
}

/// `返回 表达式? ;`
fn parse_return(parser: &mut Parser) -> ZhscResult<Stmt> {
    parser.advance(); // 返回
    let value = if parser.check(&Token::Semicolon) {
        None
    } else {
        Some(parse_expression(parser)?)
    };
    parser.consume(&Token::Semicolon, "返回语句后期望 ';'")?;
    Ok(Stmt::Return(value))
}

/// `要求(条件 (, 消息)?) ;`
fn parse_require(parser: &mut Parser) -> ZhscResult<Stmt> {
    let loc = parser.current_loc();
    parser.advance(); // 要求
    parser.consume(&Token::LParen, "'要求' 后期望 '('")?;
    let condition = parse_expression(parser)?;
    let message = if parser.match_token(&Token::Comma) {
        Some(parse_expression(parser)?)
    } else {
        None
    };
    parser.consume(&Token::RParen, "'要求' 参数后期望 ')'")?;
    parser.consume(&Token::Semicolon, "'要求' 语句后期望 ';'")?;
    Ok(Stmt::Require(RequireStmt { condition, message, loc }))
}

/// `触发 事件名(实参表) ;`
fn parse_emit(parser: &mut Parser) -> ZhscResult<Stmt> {
    let loc = parser.current_loc();
    parser.advance(); // 触发
    let event = parser.consume_identifier("'触发' 后期望事件名")?;
    parser.consume(&Token::LParen, "事件名后期望 '('")?;
    let mut args = Vec::new();
    if !parser.check(&Token::RParen) {
        loop {
            args.push(parse_expression(parser)?);
            if !parser.match_token(&Token::Comma) {
                break;
            }
        }
    }
    parser.consume(&Token::RParen, "事件实参后期望 ')'")?;
    parser.consume(&Token::Semicolon, "'触发' 语句后期望 ';'")?;
    Ok(Stmt::Emit(EmitStmt { event, args, loc }))
}

/// `类型 名 (= 表达式)?`，不消费分号（供 for 初始化复用）
fn parse_var_decl(parser: &mut Parser) -> ZhscResult<Stmt> {
    let loc = parser.current_loc();
    let ty = parse_type(parser)?;
    let name = parser.consume_identifier("期望变量名")?;
    let initializer = if parser.match_token(&Token::Assign) {
        Some(parse_expression(parser)?)
    } else {
        None
    };
    Ok(Stmt::VarDecl(VarDecl { name, ty, initializer, loc }))
}

/// 表达式开头的语句：赋值或纯表达式，不消费分号
fn parse_expr_or_assignment(parser: &mut Parser) -> ZhscResult<Stmt> {
    let loc = parser.current_loc();
    let expr = parse_expression(parser)?;

    let op = match parser.current_token() {
        Token::Assign => Some(AssignOp::Assign),
        Token::PlusAssign => Some(AssignOp::AddAssign),
        Token::MinusAssign => Some(AssignOp::SubAssign),
        Token::StarAssign => Some(AssignOp::MulAssign),
        Token::SlashAssign => Some(AssignOp::DivAssign),
        _ => None,
    };

    if let Some(op) = op {
        parser.advance();
        let value = parse_expression(parser)?;
        return Ok(Stmt::Assignment(AssignStmt { target: expr, op, value, loc }));
    }

    Ok(Stmt::Expr(expr))
}
