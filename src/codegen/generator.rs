//! Solidity 代码生成
//!
//! 按声明顺序遍历 AST，固定记号查关键字/类型表，用户自定义名走标识符映射记录。
//! 带中文原名的声明在行尾回写原名注释；源注释回写在声明上方。
//! 除返回值外无任何副作用，失败时不产生部分输出。

use crate::ast::*;
use crate::error::{ZhscError, ZhscResult};
use crate::keywords;
use super::names::{NameKind, NameTable};

const INDENT: &str = "    ";

pub struct SolidityGenerator {
    names: NameTable,
    out: String,
}

impl SolidityGenerator {
    pub fn new() -> Self {
        Self {
            names: NameTable::new(),
            out: String::new(),
        }
    }

    pub fn generate(mut self, contract: &Contract) -> ZhscResult<String> {
        self.out.push_str("// SPDX-License-Identifier: MIT\n");
        self.out.push_str("pragma solidity ^0.8.0;\n\n");

        self.write_doc(&contract.doc, 0);
        let name = self.names.resolve(&contract.name, NameKind::Contract);
        self.out.push_str(&format!("contract {} {{", name));
        self.write_original_comment(&contract.name, &name);
        self.out.push('\n');

        for (i, member) in contract.members.iter().enumerate() {
            // 函数类成员之间空一行
            let needs_gap = i > 0
                && matches!(
                    member,
                    ContractMember::Function(_) | ContractMember::Constructor(_)
                );
            if needs_gap {
                self.out.push('\n');
            }
            match member {
                ContractMember::StateVariable(v) => self.write_state_variable(v)?,
                ContractMember::Event(e) => self.write_event(e)?,
                ContractMember::Constructor(c) => self.write_constructor(c)?,
                ContractMember::Function(f) => self.write_function(f)?,
            }
        }

        self.out.push_str("}\n");
        Ok(self.out)
    }

    // ---- 声明 ----

    fn write_state_variable(&mut self, v: &StateVariable) -> ZhscResult<()> {
        self.write_doc(&v.doc, 1);
        let name = self.names.resolve(&v.name, NameKind::Variable);

        self.out.push_str(INDENT);
        self.out.push_str(&v.ty.solidity());
        if let Some(vis) = v.visibility {
            self.out.push(' ');
            self.out.push_str(vis.solidity());
        }
        self.out.push(' ');
        self.out.push_str(&name);
        if let Some(init) = &v.initializer {
            let value = self.expr(init)?;
            self.out.push_str(" = ");
            self.out.push_str(&value);
        }
        self.out.push(';');
        self.write_original_comment(&v.name, &name);
        self.out.push('\n');
        Ok(())
    }

    fn write_event(&mut self, e: &EventDecl) -> ZhscResult<()> {
        self.write_doc(&e.doc, 1);
        let name = self.names.resolve(&e.name, NameKind::Event);
        let params = self.params(&e.params);

        self.out.push_str(INDENT);
        self.out.push_str(&format!("event {}({});", name, params));
        self.write_signature_comment(&e.name, &name, &e.params);
        self.out.push('\n');
        Ok(())
    }

    fn write_constructor(&mut self, c: &ConstructorDecl) -> ZhscResult<()> {
        self.write_doc(&c.doc, 1);
        let params = self.params(&c.params);

        self.out.push_str(INDENT);
        self.out.push_str(&format!("constructor({}) {{", params));
        if c.params.iter().any(|p| has_chinese(&p.name)) {
            let originals: Vec<&str> = c.params.iter().map(|p| p.name.as_str()).collect();
            self.out
                .push_str(&format!(" // 构造函数({})", originals.join(", ")));
        }
        self.out.push('\n');
        self.write_block_inner(&c.body, 2)?;
        self.out.push_str(INDENT);
        self.out.push_str("}\n");
        Ok(())
    }

    fn write_function(&mut self, f: &FunctionDecl) -> ZhscResult<()> {
        self.write_doc(&f.doc, 1);
        let name = self.names.resolve(&f.name, NameKind::Function);
        let params = self.params(&f.params);

        self.out.push_str(INDENT);
        self.out.push_str(&format!("function {}({})", name, params));
        // 目标语言要求函数显式可见性，缺省补 public
        self.out.push(' ');
        self.out
            .push_str(f.visibility.unwrap_or(Visibility::Public).solidity());
        if let Some(m) = f.mutability {
            self.out.push(' ');
            self.out.push_str(m.solidity());
        }
        if let Some(ret) = &f.return_type {
            self.out.push_str(&format!(" returns ({})", ret.solidity()));
        }
        self.out.push_str(" {");
        if has_chinese(&f.name) || f.params.iter().any(|p| has_chinese(&p.name)) {
            let originals: Vec<&str> = f.params.iter().map(|p| p.name.as_str()).collect();
            self.out
                .push_str(&format!(" // {}({})", f.name, originals.join(", ")));
        }
        self.out.push('\n');
        self.write_block_inner(&f.body, 2)?;
        self.out.push_str(INDENT);
        self.out.push_str("}\n");
        Ok(())
    }

    fn params(&mut self, params: &[Parameter]) -> String {
        let rendered: Vec<String> = params
            .iter()
            .map(|p| {
                let name = self.names.resolve(&p.name, NameKind::Variable);
                format!("{} {}", p.ty.solidity(), name)
            })
            .collect();
        rendered.join(", ")
    }

    // ---- 语句 ----

    fn write_block_inner(&mut self, block: &Block, level: usize) -> ZhscResult<()> {
        for stmt in &block.statements {
            self.write_statement(stmt, level)?;
        }
        Ok(())
    }

    fn write_statement(&mut self, stmt: &Stmt, level: usize) -> ZhscResult<()> {
        match stmt {
            Stmt::If(s) => {
                self.push_indent(level);
                self.write_if(s, level)?;
            }
            Stmt::While(s) => {
                let cond = self.expr(&s.condition)?;
                self.push_indent(level);
                self.out.push_str(&format!("while ({}) {{\n", cond));
                self.write_block_inner(&s.body, level + 1)?;
                self.push_indent(level);
                self.out.push_str("}\n");
            }
            Stmt::For(s) => {
                let init = match &s.init {
                    Some(stmt) => self.stmt_inline(stmt)?,
                    None => String::new(),
                };
                let cond = match &s.condition {
                    Some(e) => self.expr(e)?,
                    None => String::new(),
                };
                let update = match &s.update {
                    Some(stmt) => self.stmt_inline(stmt)?,
                    None => String::new(),
                };
                self.push_indent(level);
                self.out
                    .push_str(&format!("for ({}; {}; {}) {{\n", init, cond, update));
                self.write_block_inner(&s.body, level + 1)?;
                self.push_indent(level);
                self.out.push_str("}\n");
            }
            Stmt::Return(value) => {
                let rendered = match value {
                    Some(e) => format!("return {};", self.expr(e)?),
                    None => "return;".to_string(),
                };
                self.push_indent(level);
                self.out.push_str(&rendered);
                self.out.push('\n');
            }
            Stmt::Require(s) => {
                let cond = self.expr(&s.condition)?;
                let rendered = match &s.message {
                    Some(msg) => format!("require({}, {});", cond, self.expr(msg)?),
                    None => format!("require({});", cond),
                };
                self.push_indent(level);
                self.out.push_str(&rendered);
                self.out.push('\n');
            }
            Stmt::Emit(s) => {
                let name = self.names.resolve(&s.event, NameKind::Event);
                let args = self.args(&s.args)?;
                self.push_indent(level);
                self.out.push_str(&format!("emit {}({});", name, args));
                self.out.push('\n');
            }
            Stmt::VarDecl(v) => {
                let rendered = self.var_decl_inline(v)?;
                self.push_indent(level);
                self.out.push_str(&rendered);
                self.out.push(';');
                let emitted = self.names.resolve(&v.name, NameKind::Variable);
                self.write_original_comment(&v.name, &emitted);
                self.out.push('\n');
            }
            Stmt::Assignment(s) => {
                let rendered = self.assignment_inline(s)?;
                self.push_indent(level);
                self.out.push_str(&rendered);
                self.out.push_str(";\n");
            }
            Stmt::Expr(e) => {
                let rendered = self.expr(e)?;
                self.push_indent(level);
                self.out.push_str(&rendered);
                self.out.push_str(";\n");
            }
            Stmt::Block(b) => {
                self.push_indent(level);
                self.out.push_str("{\n");
                self.write_block_inner(b, level + 1)?;
                self.push_indent(level);
                self.out.push_str("}\n");
            }
        }
        Ok(())
    }

    /// 行首缩进已写好，从 `if` 关键字开始
    fn write_if(&mut self, s: &IfStmt, level: usize) -> ZhscResult<()> {
        let cond = self.expr(&s.condition)?;
        self.out.push_str(&format!("if ({}) {{\n", cond));
        self.write_block_inner(&s.then_block, level + 1)?;
        self.push_indent(level);
        self.out.push('}');

        match s.else_branch.as_deref() {
            None => self.out.push('\n'),
            Some(Stmt::If(elif)) => {
                self.out.push_str(" else ");
                self.write_if(elif, level)?;
            }
            Some(Stmt::Block(b)) => {
                self.out.push_str(" else {\n");
                self.write_block_inner(b, level + 1)?;
                self.push_indent(level);
                self.out.push_str("}\n");
            }
            Some(other) => {
                // 语法分析器只会产出 If 或 Block，出现其它节点说明树被破坏
                return Err(ZhscError::CodeGen(format!(
                    "非法的否则分支节点: {:?}",
                    std::mem::discriminant(other)
                )));
            }
        }
        Ok(())
    }

    /// for 头部等场合的单行语句，不带分号与注释
    fn stmt_inline(&mut self, stmt: &Stmt) -> ZhscResult<String> {
        match stmt {
            Stmt::VarDecl(v) => self.var_decl_inline(v),
            Stmt::Assignment(s) => self.assignment_inline(s),
            Stmt::Expr(e) => self.expr(e),
            other => Err(ZhscError::CodeGen(format!(
                "该语句不能出现在循环头中: {:?}",
                std::mem::discriminant(other)
            ))),
        }
    }

    fn var_decl_inline(&mut self, v: &VarDecl) -> ZhscResult<String> {
        let name = self.names.resolve(&v.name, NameKind::Variable);
        let mut rendered = format!("{} {}", v.ty.solidity(), name);
        if let Some(init) = &v.initializer {
            rendered.push_str(" = ");
            rendered.push_str(&self.expr(init)?);
        }
        Ok(rendered)
    }

    fn assignment_inline(&mut self, s: &AssignStmt) -> ZhscResult<String> {
        let target = self.expr(&s.target)?;
        let value = self.expr(&s.value)?;
        Ok(format!("{} {} {}", target, s.op.as_str(), value))
    }

    // ---- 表达式 ----

    fn expr(&mut self, e: &Expr) -> ZhscResult<String> {
        match e {
            Expr::Binary(b) => {
                let left = self.operand(&b.left, b.op.precedence(), false)?;
                let right = self.operand(&b.right, b.op.precedence(), true)?;
                Ok(format!("{} {} {}", left, b.op.as_str(), right))
            }
            Expr::Unary(u) => {
                let operand = self.expr(&u.operand)?;
                // 嵌套一元运算不加括号会拼出 "--" 这类完全不同的记号
                let rendered = if matches!(u.operand.as_ref(), Expr::Binary(_) | Expr::Unary(_)) {
                    format!("{}({})", u.op.as_str(), operand)
                } else {
                    format!("{}{}", u.op.as_str(), operand)
                };
                Ok(rendered)
            }
            Expr::Call(c) => {
                let callee = self.expr(&c.callee)?;
                let args = self.args(&c.args)?;
                Ok(format!("{}({})", callee, args))
            }
            Expr::Identifier(id) => {
                // 内置量优先于音译
                if let Some(builtin) = keywords::lookup_builtin(&id.name) {
                    return Ok(builtin.to_string());
                }
                Ok(self.names.resolve(&id.name, NameKind::Variable))
            }
            Expr::Literal(lit) => Ok(match &lit.value {
                LiteralValue::Number(text) => text.clone(),
                LiteralValue::Str(text) => format!("\"{}\"", text),
                LiteralValue::Bool(true) => "true".to_string(),
                LiteralValue::Bool(false) => "false".to_string(),
            }),
            Expr::Index(idx) => {
                let object = self.expr(&idx.object)?;
                let index = self.expr(&idx.index)?;
                Ok(format!("{}[{}]", object, index))
            }
            Expr::Member(m) => {
                let object = self.expr(&m.object)?;
                let member = self.names.resolve(&m.member, NameKind::Variable);
                Ok(format!("{}.{}", object, member))
            }
        }
    }

    /// 二元运算的子表达式，优先级不足时加括号；右子树同级也加，保持左结合语义
    fn operand(&mut self, e: &Expr, parent_prec: u8, is_right: bool) -> ZhscResult<String> {
        let rendered = self.expr(e)?;
        if let Expr::Binary(b) = e {
            let child = b.op.precedence();
            if child < parent_prec || (is_right && child == parent_prec) {
                return Ok(format!("({})", rendered));
            }
        }
        Ok(rendered)
    }

    fn args(&mut self, args: &[Expr]) -> ZhscResult<String> {
        let rendered: Vec<String> = args
            .iter()
            .map(|a| self.expr(a))
            .collect::<ZhscResult<_>>()?;
        Ok(rendered.join(", "))
    }

    // ---- 杂项 ----

    fn push_indent(&mut self, level: usize) {
        for _ in 0..level {
            self.out.push_str(INDENT);
        }
    }

    fn write_doc(&mut self, doc: &[String], level: usize) {
        for line in doc {
            self.push_indent(level);
            self.out.push_str("// ");
            self.out.push_str(line);
            self.out.push('\n');
        }
    }

    /// 发射名与原名不同（即原名含中文）时回写行尾原名注释
    fn write_original_comment(&mut self, original: &str, emitted: &str) {
        if original != emitted {
            self.out.push_str(&format!(" // {}", original));
        }
    }

    fn write_signature_comment(&mut self, original: &str, emitted: &str, params: &[Parameter]) {
        if original == emitted && !params.iter().any(|p| has_chinese(&p.name)) {
            return;
        }
        let originals: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        self.out
            .push_str(&format!(" // {}({})", original, originals.join(", ")));
    }
}

impl Default for SolidityGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn has_chinese(name: &str) -> bool {
    name.chars().any(|c| !c.is_ascii())
}
