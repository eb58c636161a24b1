//! 编译器集成测试
//!
//! 通过公开的 Compiler 接口驱动整条流水线，
//! 覆盖确定性、冲突消解、注释保留与各类错误路径。

use std::fs;
use zhsc::Compiler;
use zhsc::error::ZhscError;

fn compile(source: &str) -> String {
    Compiler::new()
        .compile_text(source)
        .expect("source should compile")
}

#[test]
fn test_compile_is_deterministic() {
    let source = include_str!("../demos/token.zhs");
    let first = compile(source);
    let second = compile(source);
    assert_eq!(first, second, "identical source must yield identical output");
}

#[test]
fn test_empty_contract_body() {
    let out = compile("合约 X { }");
    assert!(out.contains("// SPDX-License-Identifier: MIT"));
    assert!(out.contains("pragma solidity ^0.8.0;"));
    assert!(out.contains("contract X {"));
    // 无成员时壳体内不应有声明
    assert!(!out.contains("function"));
    assert!(!out.contains("uint256"));
}

#[test]
fn test_public_state_variable_example() {
    // 规约示例 1
    let out = compile("合约 测试 { 公开 整数 数值 = 100; }");
    assert!(out.contains("contract CeShi"), "output:\n{}", out);
    assert!(out.contains("uint256 public ShuZhi = 100;"), "output:\n{}", out);
    assert!(out.contains("// 数值"), "output:\n{}", out);
}

#[test]
fn test_require_arguments_example() {
    // 规约示例 2：第一个实参音译，第二个字符串原样通过
    let out = compile(r#"合约 测试 { 函数 f(布尔 条件) { 要求(条件, "消息"); } }"#);
    assert!(out.contains(r#"require(TiaoJian, "消息");"#), "output:\n{}", out);
}

#[test]
fn test_missing_brace_example() {
    // 规约示例 3：缺右花括号必须报带位置的语法错误，且不产生输出
    let result = Compiler::new().compile_text("合约 测试 { 公开 整数 数值 = 100;");
    match result {
        Err(ZhscError::Parser { line, message, .. }) => {
            assert!(line >= 1);
            assert!(message.contains("'}'") || message.contains("未闭合"), "message: {}", message);
        }
        other => panic!("expected parser error, got {:?}", other),
    }
}

#[test]
fn test_signed_integer_keyword_precedence() {
    let out = compile("合约 测试 { 公开 有符号整数 温度; }");
    assert!(out.contains("int256 public WenDu;"), "output:\n{}", out);
    // 绝不允许出现 uint256 加散落标识符的错切
    assert!(!out.contains("uint256 public WenDu"), "output:\n{}", out);
}

#[test]
fn test_original_names_preserved_as_comments() {
    let source = include_str!("../demos/token.zhs");
    let out = compile(source);
    for original in ["名称", "总供应量", "余额", "转账", "接收者", "金额", "查询余额", "账户"] {
        assert!(
            out.contains(original),
            "original name {} missing from output:\n{}",
            original,
            out
        );
    }
}

#[test]
fn test_collision_disambiguation_is_stable() {
    let source = "合约 测试 {
        公开 整数 数;
        公开 整数 树;
        函数 f() { 数 = 树; }
    }";
    let out = compile(source);
    assert!(out.contains("Shu; // 数"), "output:\n{}", out);
    assert!(out.contains("Shu2; // 树"), "output:\n{}", out);
    // 函数体内沿用同一映射
    assert!(out.contains("Shu = Shu2;"), "output:\n{}", out);
}

#[test]
fn test_token_demo_full_output() {
    let out = compile(include_str!("../demos/token.zhs"));
    assert!(out.contains("contract WoDeDaiBi {"), "output:\n{}", out);
    assert!(out.contains(r#"string public MingCheng = "我的代币";"#), "output:\n{}", out);
    assert!(out.contains("mapping(address => uint256) public YuE;"), "output:\n{}", out);
    assert!(out.contains("event ZhuanZhangWanCheng(address JieShouZhe, uint256 JinE);"), "output:\n{}", out);
    assert!(out.contains("constructor(uint256 ChuShiGongYingLiang) {"), "output:\n{}", out);
    assert!(out.contains(r#"require(YuE[msg.sender] >= JinE, "余额不足");"#), "output:\n{}", out);
    assert!(out.contains("emit ZhuanZhangWanCheng(JieShouZhe, JinE);"), "output:\n{}", out);
    assert!(out.contains("function ChaXunYuE(address ZhangHu) public view returns (uint256) {"), "output:\n{}", out);
}

#[test]
fn test_counter_demo_compiles() {
    let out = compile(include_str!("../demos/counter.zhs"));
    assert!(out.contains("contract JiShuQi {"), "output:\n{}", out);
    assert!(out.contains("for (uint256 Ji = 0; Ji < CiShu; Ji += 1) {"), "output:\n{}", out);
    assert!(out.contains("if (msg.sender == GuanLiYuan) {"), "output:\n{}", out);
}

#[test]
fn test_block_comment_attached_to_declaration() {
    let out = compile("合约 测试 {\n    /* 记录余额 */\n    公开 整数 余额;\n}");
    assert!(out.contains("// 记录余额"), "output:\n{}", out);
    assert!(out.contains("uint256 public YuE; // 余额"), "output:\n{}", out);
}

#[test]
fn test_unterminated_block_comment_is_lexer_error() {
    let result = Compiler::new().compile_text("合约 测试 { /* 说明");
    match result {
        Err(ZhscError::Lexer { message, .. }) => {
            assert!(message.contains("未闭合的块注释"), "message: {}", message);
        }
        other => panic!("expected lexer error, got {:?}", other),
    }
}

#[test]
fn test_lexer_error_surfaces_through_pipeline() {
    let result = Compiler::new().compile_text("合约 测试 { 公开 整数 数值 = \"未闭合; }");
    assert!(matches!(result, Err(ZhscError::Lexer { .. })));
}

#[test]
fn test_unknown_type_is_parser_error() {
    let result = Compiler::new().compile_text("合约 测试 { 公开 代币类型 数值; }");
    match result {
        Err(ZhscError::Parser { message, .. }) => {
            assert!(message.contains("未知类型"), "message: {}", message);
        }
        other => panic!("expected parser error, got {:?}", other),
    }
}

#[test]
fn test_compile_file_writes_only_on_success() {
    let dir = std::env::temp_dir();
    let input_ok = dir.join("zhsc_test_ok.zhs");
    let output_ok = dir.join("zhsc_test_ok.sol");
    let input_bad = dir.join("zhsc_test_bad.zhs");
    let output_bad = dir.join("zhsc_test_bad.sol");
    let _ = fs::remove_file(&output_ok);
    let _ = fs::remove_file(&output_bad);

    fs::write(&input_ok, "合约 测试 { }").unwrap();
    fs::write(&input_bad, "合约 测试 {").unwrap();

    let compiler = Compiler::new();
    compiler.compile_file(&input_ok, &output_ok).unwrap();
    assert!(output_ok.exists());
    let written = fs::read_to_string(&output_ok).unwrap();
    assert!(written.contains("contract CeShi"));

    assert!(compiler.compile_file(&input_bad, &output_bad).is_err());
    assert!(!output_bad.exists(), "failed compilation must not write output");

    let _ = fs::remove_file(&input_ok);
    let _ = fs::remove_file(&output_ok);
    let _ = fs::remove_file(&input_bad);
}

#[test]
fn test_error_is_positioned_at_offending_token() {
    // 第二行缺分号，位置应落在第二行之后首个意外记号上
    let source = "合约 测试 {\n    公开 整数 数值 = 1\n}";
    match Compiler::new().compile_text(source) {
        Err(ZhscError::Parser { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected parser error, got {:?}", other),
    }
}
