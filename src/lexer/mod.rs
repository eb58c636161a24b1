//! 词法分析器
//!
//! 基于 logos 的最大吞噬匹配天然满足关键字最长匹配要求：
//! "有符号整数" 永远不会被切成 "整数" 加散落标识符。
//! 注释不丢弃，作为 Comment 记号留在流里，由语法分析器挂到最近的后续声明上。

use logos::Logos;
use crate::error::{SourceLocation, ZhscResult, lexer_error};

/// 词法失败原因，由 tokenize 译成带行列的中文报错
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexError {
    #[default]
    UnexpectedChar,
    UnterminatedString,
    UnterminatedComment,
}

/// 从开引号之后扫到闭引号，\" 原样保留在内容里
fn lex_string(lex: &mut logos::Lexer<Token>) -> Result<String, LexError> {
    let rest = lex.remainder();
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => {
                lex.bump(i + 1);
                return Ok(rest[..i].to_string());
            }
            // 字符串不允许跨行
            '\n' => break,
            _ => {}
        }
    }
    Err(LexError::UnterminatedString)
}

fn lex_block_comment(lex: &mut logos::Lexer<Token>) -> Result<String, LexError> {
    let rest = lex.remainder();
    match rest.find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            Ok(rest[..end].trim().to_string())
        }
        None => Err(LexError::UnterminatedComment),
    }
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n\f\u{3000}]+")]
pub enum Token {
    // 关键字
    #[token("合约")]
    Contract,
    #[token("函数")]
    Function,
    #[token("构造函数")]
    Constructor,
    #[token("事件")]
    Event,
    #[token("返回")]
    Return,
    #[token("如果")]
    If,
    #[token("否则")]
    Else,
    #[token("循环")]
    For,
    #[token("当")]
    While,
    #[token("要求")]
    Require,
    #[token("触发")]
    Emit,
    #[token("映射")]
    Mapping,

    // 可见性
    #[token("公开")]
    Public,
    #[token("私有")]
    Private,
    #[token("内部")]
    Internal,
    #[token("外部")]
    External,

    // 状态可变性
    #[token("只读")]
    View,
    #[token("纯")]
    Pure,
    #[token("可支付")]
    Payable,

    // 类型
    #[token("整数")]
    Uint,
    #[token("有符号整数")]
    Int,
    #[token("地址")]
    Address,
    #[token("布尔")]
    Bool,
    #[token("字符串")]
    StringType,
    #[token("字节")]
    Bytes,

    // 布尔字面量
    #[token("真")]
    True,
    #[token("假")]
    False,

    // 标识符：汉字、ASCII 字母、数字、下划线的连续串
    #[regex(r"[\u{4e00}-\u{9fff}\u{3400}-\u{4dbf}a-zA-Z_][\u{4e00}-\u{9fff}\u{3400}-\u{4dbf}a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // 数字字面量，按原文保留
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().to_string())]
    Number(String),

    // 字符串字面量，仅支持 \" 转义，回调负责找闭引号
    #[token("\"", lex_string)]
    Str(String),

    // 注释保留文本
    #[regex(r"//[^\n]*", |lex| lex.slice()[2..].trim().to_string())]
    #[token("/*", lex_block_comment)]
    Comment(String),

    // 运算符
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("=>")]
    FatArrow,

    // 分隔符
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,

    // 由 tokenize 手工追加，不参与模式匹配
    Eof,
}

impl Token {
    /// 类型记号集合，语法分析器判定声明/类型起始时使用
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            Token::Uint | Token::Int | Token::Address | Token::Bool | Token::StringType | Token::Bytes
        )
    }

    pub fn is_visibility(&self) -> bool {
        matches!(
            self,
            Token::Public | Token::Private | Token::Internal | Token::External
        )
    }

    pub fn is_mutability(&self) -> bool {
        matches!(self, Token::View | Token::Pure | Token::Payable)
    }
}

#[derive(Debug, Clone)]
pub struct TokenWithLocation {
    pub token: Token,
    pub loc: SourceLocation,
}

pub struct Lexer<'a> {
    source: &'a str,
    inner: logos::Lexer<'a, Token>,
    line: usize,
    column: usize,
    offset: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            inner: Token::lexer(source),
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// 把行列推进到给定字节偏移，列按字符计数
    fn advance_to(&mut self, byte_offset: usize) {
        for c in self.source[self.offset..byte_offset].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = byte_offset;
    }

    pub fn tokenize(&mut self) -> ZhscResult<Vec<TokenWithLocation>> {
        let mut tokens = Vec::new();

        while let Some(token_result) = self.inner.next() {
            let span = self.inner.span();
            self.advance_to(span.start);
            let loc = SourceLocation::new(self.line, self.column);

            match token_result {
                Ok(token) => {
                    tokens.push(TokenWithLocation { token, loc });
                }
                Err(LexError::UnterminatedString) => {
                    return Err(lexer_error(loc.line, loc.column, "未闭合的字符串字面量"));
                }
                Err(LexError::UnterminatedComment) => {
                    return Err(lexer_error(loc.line, loc.column, "未闭合的块注释"));
                }
                Err(LexError::UnexpectedChar) => {
                    let bad = self.source[span.start..].chars().next().unwrap_or('?');
                    return Err(lexer_error(
                        loc.line,
                        loc.column,
                        format!("无法识别的字符: '{}'", bad),
                    ));
                }
            }
            self.advance_to(span.end);
        }

        self.advance_to(self.source.len());
        tokens.push(TokenWithLocation {
            token: Token::Eof,
            loc: SourceLocation::new(self.line, self.column),
        });

        Ok(tokens)
    }
}

/// 词法分析入口
pub fn lex(source: &str) -> ZhscResult<Vec<TokenWithLocation>> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        lex(source).unwrap().into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn test_keyword_longest_match() {
        // "有符号整数" 不允许被切成 "整数" 加散落标识符
        let toks = kinds("有符号整数 整数");
        assert_eq!(toks, vec![Token::Int, Token::Uint, Token::Eof]);
    }

    #[test]
    fn test_keyword_absorbed_by_longer_identifier() {
        // 关键字是更长标识符串的前缀时，整串按标识符处理
        let toks = kinds("整数值");
        assert_eq!(
            toks,
            vec![Token::Identifier("整数值".to_string()), Token::Eof]
        );
    }

    #[test]
    fn test_contract_header() {
        let toks = kinds("合约 测试 { }");
        assert_eq!(
            toks,
            vec![
                Token::Contract,
                Token::Identifier("测试".to_string()),
                Token::LBrace,
                Token::RBrace,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_mixed_identifier_and_literals() {
        let toks = kinds(r#"数值 = 100; 名称 = "我的代币";"#);
        assert_eq!(
            toks,
            vec![
                Token::Identifier("数值".to_string()),
                Token::Assign,
                Token::Number("100".to_string()),
                Token::Semicolon,
                Token::Identifier("名称".to_string()),
                Token::Assign,
                Token::Str("我的代币".to_string()),
                Token::Semicolon,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_comment_token_preserved() {
        let toks = kinds("// 余额表\n映射");
        assert_eq!(
            toks,
            vec![
                Token::Comment("余额表".to_string()),
                Token::Mapping,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_block_comment() {
        let toks = kinds("/* 说明 */ 真");
        assert_eq!(
            toks,
            vec![Token::Comment("说明".to_string()), Token::True, Token::Eof]
        );
    }

    #[test]
    fn test_block_comment_ascii() {
        let toks = kinds("/* abc */ 真");
        assert_eq!(
            toks,
            vec![Token::Comment("abc".to_string()), Token::True, Token::Eof]
        );
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let tokens = lex("/* 第一行\n   第二行 */\n合约").unwrap();
        assert!(matches!(tokens[0].token, Token::Comment(_)));
        assert_eq!(tokens[1].token, Token::Contract);
        // 块注释内的换行计入行号
        assert_eq!(tokens[1].loc, SourceLocation::new(3, 1));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = lex("/* 未闭合").unwrap_err();
        match err {
            crate::error::ZhscError::Lexer { message, .. } => {
                assert!(message.contains("未闭合的块注释"), "message: {}", message);
            }
            other => panic!("expected lexer error, got {:?}", other),
        }
    }

    #[test]
    fn test_string_may_not_span_lines() {
        let err = lex("\"abc\n\"").unwrap_err();
        match err {
            crate::error::ZhscError::Lexer { message, .. } => {
                assert!(message.contains("未闭合的字符串字面量"), "message: {}", message);
            }
            other => panic!("expected lexer error, got {:?}", other),
        }
    }

    #[test]
    fn test_positions_count_characters() {
        let tokens = lex("合约 测试").unwrap();
        assert_eq!(tokens[0].loc, SourceLocation::new(1, 1));
        // "合约" 两个字符加一个空格
        assert_eq!(tokens[1].loc, SourceLocation::new(1, 4));
    }

    #[test]
    fn test_line_tracking() {
        let tokens = lex("合约\n  测试").unwrap();
        assert_eq!(tokens[1].loc, SourceLocation::new(2, 3));
    }

    #[test]
    fn test_unterminated_string() {
        let err = lex("名称 = \"abc").unwrap_err();
        match err {
            crate::error::ZhscError::Lexer { message, .. } => {
                assert!(message.contains("未闭合"), "message: {}", message);
            }
            other => panic!("expected lexer error, got {:?}", other),
        }
    }

    #[test]
    fn test_unrecognized_character() {
        let err = lex("数值 @ 1").unwrap_err();
        match err {
            crate::error::ZhscError::Lexer { message, column, .. } => {
                assert!(message.contains('@'));
                assert_eq!(column, 4);
            }
            other => panic!("expected lexer error, got {:?}", other),
        }
    }

    #[test]
    fn test_escaped_quote_in_string() {
        let toks = kinds(r#""说 \" 好""#);
        assert_eq!(toks[0], Token::Str(r#"说 \" 好"#.to_string()));
    }

    #[test]
    fn test_compound_assign_operators() {
        let toks = kinds("+= -= *= /= =>");
        assert_eq!(
            toks,
            vec![
                Token::PlusAssign,
                Token::MinusAssign,
                Token::StarAssign,
                Token::SlashAssign,
                Token::FatArrow,
                Token::Eof,
            ]
        );
    }
}
