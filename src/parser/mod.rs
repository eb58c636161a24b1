//! 语法分析器
//!
//! 递归下降，一个记号前瞻即可覆盖本文法。
//! 只做语法层面校验；标识符是否声明过交由后续阶段自行决定。

mod contract;
mod statements;
mod expressions;

use crate::ast::Contract;
use crate::error::{SourceLocation, ZhscError, ZhscResult, parser_error};
use crate::lexer::{Token, TokenWithLocation};

pub struct Parser {
    /// 滤除注释后的记号流
    tokens: Vec<TokenWithLocation>,
    /// docs[i] = 紧挨在 tokens[i] 之前的注释文本
    docs: Vec<Vec<String>>,
    pos: usize,
}

impl Parser {
    /// 构造时把注释从流里摘出来，挂到各自后面第一个实记号上。
    /// 表达式中间的注释因此不会干扰文法。
    pub fn new(raw: Vec<TokenWithLocation>) -> Self {
        let mut tokens = Vec::with_capacity(raw.len());
        let mut docs = Vec::with_capacity(raw.len());
        let mut pending = Vec::new();

        for t in raw {
            match t.token {
                Token::Comment(text) => pending.push(text),
                _ => {
                    tokens.push(t);
                    docs.push(std::mem::take(&mut pending));
                }
            }
        }

        Self { tokens, docs, pos: 0 }
    }

    pub fn parse(&mut self) -> ZhscResult<Contract> {
        let contract = contract::parse_contract(self)?;
        if !self.check(&Token::Eof) {
            return Err(self.error("合约结束后存在多余内容"));
        }
        Ok(contract)
    }

    // ---- 辅助方法 ----

    pub(crate) fn current_token(&self) -> &Token {
        &self.tokens[self.pos].token
    }

    pub(crate) fn current_loc(&self) -> SourceLocation {
        self.tokens[self.pos].loc
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.current_token(), Token::Eof)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[self.pos.saturating_sub(1)].token
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        self.current_token() == token
    }

    pub(crate) fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn consume(&mut self, token: &Token, message: &str) -> ZhscResult<()> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    pub(crate) fn consume_identifier(&mut self, message: &str) -> ZhscResult<String> {
        match self.current_token() {
            Token::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error(message)),
        }
    }

    /// 取走挂在当前记号上的注释
    pub(crate) fn take_doc(&mut self) -> Vec<String> {
        std::mem::take(&mut self.docs[self.pos])
    }

    pub(crate) fn error(&self, message: &str) -> ZhscError {
        let loc = self.current_loc();
        parser_error(loc, format!("{}，遇到 {}", message, describe(self.current_token())))
    }
}

/// 错误信息里对记号的称呼
fn describe(token: &Token) -> String {
    match token {
        Token::Identifier(name) => format!("标识符 '{}'", name),
        Token::Number(n) => format!("数字 '{}'", n),
        Token::Str(_) => "字符串字面量".to_string(),
        Token::Eof => "文件结尾".to_string(),
        other => format!("{:?}", other),
    }
}

/// 解析记号流生成 AST
pub fn parse(tokens: Vec<TokenWithLocation>) -> ZhscResult<Contract> {
    Parser::new(tokens).parse()
}
