//! 中文智能合约编译器
//!
//! 把中文关键字书写的合约源码编译为 Solidity 源码，
//! 三段式流水线：词法分析、语法分析、代码生成。
//! 每次编译调用相互独立、无共享可变状态，可在多线程间并行。

pub mod error;
pub mod keywords;
pub mod pinyin;
pub mod ast;
pub mod lexer;
pub mod parser;
pub mod codegen;

use std::fs;
use std::path::Path;

use error::{ZhscError, ZhscResult};

pub struct Compiler;

impl Compiler {
    pub fn new() -> Self {
        Self
    }

    /// 编译中文合约源码，返回生成的 Solidity 源码。
    /// 任一阶段失败即终止，不返回部分输出。
    pub fn compile_text(&self, source: &str) -> ZhscResult<String> {
        // 1. 词法分析
        let tokens = lexer::lex(source)?;

        // 2. 语法分析
        let ast = parser::parse(tokens)?;

        // 3. 代码生成
        codegen::generate(&ast)
    }

    /// 编译文件。仅在编译成功时写出目标文件，失败时不触碰输出路径。
    pub fn compile_file(&self, input: &Path, output: &Path) -> ZhscResult<()> {
        let source = fs::read_to_string(input)
            .map_err(|e| ZhscError::Io(format!("读取 {} 失败: {}", input.display(), e)))?;

        let solidity = self.compile_text(&source)?;

        fs::write(output, solidity)
            .map_err(|e| ZhscError::Io(format!("写入 {} 失败: {}", output.display(), e)))?;
        Ok(())
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}
