use thiserror::Error;
use std::fmt;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ZhscError {
    #[error("词法错误 (行 {line}, 列 {column}): {message}")]
    Lexer { line: usize, column: usize, message: String },

    #[error("语法错误 (行 {line}, 列 {column}): {message}")]
    Parser { line: usize, column: usize, message: String },

    #[error("代码生成错误: {0}")]
    CodeGen(String),

    #[error("IO 错误: {0}")]
    Io(String),
}

pub type ZhscResult<T> = Result<T, ZhscError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

pub fn lexer_error(line: usize, column: usize, message: impl Into<String>) -> ZhscError {
    ZhscError::Lexer {
        line,
        column,
        message: message.into(),
    }
}

pub fn parser_error(loc: SourceLocation, message: impl Into<String>) -> ZhscError {
    ZhscError::Parser {
        line: loc.line,
        column: loc.column,
        message: message.into(),
    }
}

impl ZhscError {
    /// 错误所在的源位置（如果有）
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            ZhscError::Lexer { line, column, .. } | ZhscError::Parser { line, column, .. } => {
                Some(SourceLocation::new(*line, *column))
            }
            _ => None,
        }
    }
}

/// 在标准错误输出中打印错误及其所在的源代码行
pub fn print_error_with_context(source: &str, err: &ZhscError) {
    eprintln!("{}", err);
    if let Some(loc) = err.location() {
        if let Some(line_text) = source.lines().nth(loc.line.saturating_sub(1)) {
            eprintln!("  | {}", line_text);
            // 列号按字符计数，CJK 字符在终端占两列，这里用全角空格近似对齐
            let pad: String = line_text
                .chars()
                .take(loc.column.saturating_sub(1))
                .map(|c| if c.is_ascii() { ' ' } else { '　' })
                .collect();
            eprintln!("  | {}^", pad);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_position() {
        let err = lexer_error(3, 7, "意外的字符: '@'");
        let text = err.to_string();
        assert!(text.contains("行 3"));
        assert!(text.contains("列 7"));
        assert!(text.contains("'@'"));
    }

    #[test]
    fn test_location_accessor() {
        let err = parser_error(SourceLocation::new(2, 5), "缺少 ';'");
        assert_eq!(err.location(), Some(SourceLocation::new(2, 5)));
        assert_eq!(ZhscError::CodeGen("x".into()).location(), None);
    }
}
