//! 合约层级声明的解析

use crate::ast::*;
use crate::error::ZhscResult;
use crate::lexer::Token;
use super::Parser;
use super::statements::parse_block;
use super::expressions::parse_expression;

/// 解析整个合约块：恰好一个 `合约 名 { 成员* }`
pub fn parse_contract(parser: &mut Parser) -> ZhscResult<Contract> {
    let doc = parser.take_doc();
    let loc = parser.current_loc();

    parser.consume(&Token::Contract, "期望 '合约' 关键字")?;
    let name = parser.consume_identifier("期望合约名")?;
    parser.consume(&Token::LBrace, "合约名后期望 '{'")?;

    let mut members = Vec::new();
    let mut has_constructor = false;

    while !parser.check(&Token::RBrace) {
        if parser.is_at_end() {
            return Err(parser.error("合约体未闭合，期望 '}'"));
        }
        let member = parse_member(parser)?;
        if matches!(member, ContractMember::Constructor(_)) {
            if has_constructor {
                return Err(parser.error("一个合约只允许一个构造函数"));
            }
            has_constructor = true;
        }
        members.push(member);
    }

    parser.consume(&Token::RBrace, "合约体后期望 '}'")?;

    Ok(Contract { name, members, doc, loc })
}

/// 合约成员：状态变量、映射、事件、构造函数或函数
fn parse_member(parser: &mut Parser) -> ZhscResult<ContractMember> {
    let doc = parser.take_doc();

    match parser.current_token() {
        Token::Event => Ok(ContractMember::Event(parse_event(parser, doc)?)),
        Token::Constructor => Ok(ContractMember::Constructor(parse_constructor(parser, doc)?)),
        Token::Function => Ok(ContractMember::Function(parse_function(parser, doc)?)),
        Token::Mapping => Ok(ContractMember::StateVariable(parse_mapping_variable(parser, doc)?)),
        t if t.is_visibility() || t.is_type() => {
            Ok(ContractMember::StateVariable(parse_state_variable(parser, doc)?))
        }
        _ => Err(parser.error("期望合约成员声明")),
    }
}

/// `可见性? 类型 名 (= 表达式)? ;`
fn parse_state_variable(parser: &mut Parser, doc: Vec<String>) -> ZhscResult<StateVariable> {
    let loc = parser.current_loc();
    let visibility = parse_visibility_opt(parser);
    let ty = parse_type(parser)?;
    let name = parser.consume_identifier("期望状态变量名")?;

    let initializer = if parser.match_token(&Token::Assign) {
        Some(parse_expression(parser)?)
    } else {
        None
    };

    parser.consume(&Token::Semicolon, "状态变量声明后期望 ';'")?;

    Ok(StateVariable { name, ty, visibility, initializer, doc, loc })
}

/// `映射(键类型 => 值类型) 可见性? 名 ;`
fn parse_mapping_variable(parser: &mut Parser, doc: Vec<String>) -> ZhscResult<StateVariable> {
    let loc = parser.current_loc();
    let ty = parse_mapping_type(parser)?;
    let visibility = parse_visibility_opt(parser);
    let name = parser.consume_identifier("期望映射变量名")?;
    parser.consume(&Token::Semicolon, "映射声明后期望 ';'")?;

    // 映射不允许初始化表达式
    Ok(StateVariable { name, ty, visibility, initializer: None, doc, loc })
}

fn parse_mapping_type(parser: &mut Parser) -> ZhscResult<TypeName> {
    parser.consume(&Token::Mapping, "期望 '映射'")?;
    parser.consume(&Token::LParen, "'映射' 后期望 '('")?;
    let key = parse_type(parser)?;
    parser.consume(&Token::FatArrow, "映射键类型后期望 '=>'")?;
    let value = parse_type(parser)?;
    parser.consume(&Token::RParen, "映射值类型后期望 ')'")?;
    Ok(TypeName::Mapping { key: Box::new(key), value: Box::new(value) })
}

/// `事件 名(参数表);`
fn parse_event(parser: &mut Parser, doc: Vec<String>) -> ZhscResult<EventDecl> {
    let loc = parser.current_loc();
    parser.advance(); // 事件
    let name = parser.consume_identifier("期望事件名")?;
    parser.consume(&Token::LParen, "事件名后期望 '('")?;
    let params = parse_parameters(parser)?;
    parser.consume(&Token::RParen, "事件参数后期望 ')'")?;
    parser.consume(&Token::Semicolon, "事件声明后期望 ';'")?;
    Ok(EventDecl { name, params, doc, loc })
}

/// `构造函数(参数表) 块`
fn parse_constructor(parser: &mut Parser, doc: Vec<String>) -> ZhscResult<ConstructorDecl> {
    let loc = parser.current_loc();
    parser.advance(); // 构造函数
    parser.consume(&Token::LParen, "'构造函数' 后期望 '('")?;
    let params = parse_parameters(parser)?;
    parser.consume(&Token::RParen, "构造函数参数后期望 ')'")?;
    let body = parse_block(parser)?;
    Ok(ConstructorDecl { params, body, doc, loc })
}

/// `函数 名(参数表) 修饰符* (返回 类型)? 块`
fn parse_function(parser: &mut Parser, doc: Vec<String>) -> ZhscResult<FunctionDecl> {
    let loc = parser.current_loc();
    parser.advance(); // 函数
    let name = parser.consume_identifier("期望函数名")?;
    parser.consume(&Token::LParen, "函数名后期望 '('")?;
    let params = parse_parameters(parser)?;
    parser.consume(&Token::RParen, "函数参数后期望 ')'")?;

    let mut visibility = None;
    let mut mutability = None;
    loop {
        let token = parser.current_token().clone();
        if token.is_visibility() {
            if visibility.is_some() {
                return Err(parser.error("重复的可见性修饰符"));
            }
            visibility = parse_visibility_opt(parser);
        } else if token.is_mutability() {
            if mutability.is_some() {
                return Err(parser.error("重复的状态可变性修饰符"));
            }
            mutability = parse_mutability_opt(parser);
        } else {
            break;
        }
    }

    let return_type = if parser.match_token(&Token::Return) {
        Some(parse_type(parser)?)
    } else {
        None
    };

    let body = parse_block(parser)?;

    Ok(FunctionDecl { name, params, visibility, mutability, return_type, body, doc, loc })
}

/// `( (类型 名 (, 类型 名)*)? )` 的括号内部分
fn parse_parameters(parser: &mut Parser) -> ZhscResult<Vec<Parameter>> {
    let mut params = Vec::new();

    if !parser.check(&Token::RParen) {
        loop {
            let loc = parser.current_loc();
            let ty = parse_type(parser)?;
            let name = parser.consume_identifier("期望参数名")?;
            params.push(Parameter { name, ty, loc });

            if !parser.match_token(&Token::Comma) {
                break;
            }
        }
    }

    Ok(params)
}

/// 类型标注，必须出自类型表
pub(super) fn parse_type(parser: &mut Parser) -> ZhscResult<TypeName> {
    let ty = match parser.current_token() {
        Token::Uint => TypeName::Uint256,
        Token::Int => TypeName::Int256,
        Token::Address => TypeName::Address,
        Token::Bool => TypeName::Bool,
        Token::StringType => TypeName::String,
        Token::Bytes => TypeName::Bytes,
        Token::Identifier(name) => {
            let msg = format!("未知类型 '{}'", name);
            return Err(parser.error(&msg));
        }
        _ => return Err(parser.error("期望类型")),
    };
    parser.advance();
    Ok(ty)
}

fn parse_visibility_opt(parser: &mut Parser) -> Option<Visibility> {
    let vis = match parser.current_token() {
        Token::Public => Visibility::Public,
        Token::Private => Visibility::Private,
        Token::Internal => Visibility::Internal,
        Token::External => Visibility::External,
        _ => return None,
    };
    parser.advance();
    Some(vis)
}

fn parse_mutability_opt(parser: &mut Parser) -> Option<Mutability> {
    let m = match parser.current_token() {
        Token::View => Mutability::View,
        Token::Pure => Mutability::Pure,
        Token::Payable => Mutability::Payable,
        _ => return None,
    };
    parser.advance();
    Some(m)
}
