use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use zhsc::error::print_error_with_context;
use zhsc::{Compiler, lexer, parser};

fn print_usage() {
    println!("用法: zhsc <源文件.zhs> [输出文件.sol] [选项]");
    println!();
    println!("中文智能合约编译器，把 .zhs 源文件编译为 Solidity 源码");
    println!();
    println!("选项:");
    println!("  --check        仅做语法检查，不写输出文件");
    println!("  --show-tokens  打印记号流");
    println!("  --show-ast     打印抽象语法树");
}

struct Options {
    input: PathBuf,
    output: Option<PathBuf>,
    check_only: bool,
    show_tokens: bool,
    show_ast: bool,
}

fn parse_args() -> Option<Options> {
    let mut input = None;
    let mut output = None;
    let mut check_only = false;
    let mut show_tokens = false;
    let mut show_ast = false;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--check" => check_only = true,
            "--show-tokens" => show_tokens = true,
            "--show-ast" => show_ast = true,
            "-h" | "--help" => return None,
            _ if input.is_none() => input = Some(PathBuf::from(arg)),
            _ if output.is_none() => output = Some(PathBuf::from(arg)),
            _ => return None,
        }
    }

    input.map(|input| Options {
        input,
        output,
        check_only,
        show_tokens,
        show_ast,
    })
}

fn main() -> anyhow::Result<()> {
    let Some(options) = parse_args() else {
        print_usage();
        process::exit(1);
    };

    let source = fs::read_to_string(&options.input)
        .with_context(|| format!("读取源文件 {} 失败", options.input.display()))?;

    if options.show_tokens {
        match lexer::lex(&source) {
            Ok(tokens) => {
                println!("记号流:");
                for (i, t) in tokens.iter().enumerate() {
                    println!("  {}: {:?} at {}", i, t.token, t.loc);
                }
                println!();
            }
            Err(e) => {
                print_error_with_context(&source, &e);
                process::exit(1);
            }
        }
    }

    if options.show_ast {
        let ast = lexer::lex(&source).and_then(parser::parse);
        match ast {
            Ok(ast) => {
                println!("抽象语法树:");
                println!("{:#?}", ast);
                println!();
            }
            Err(e) => {
                print_error_with_context(&source, &e);
                process::exit(1);
            }
        }
    }

    let compiler = Compiler::new();
    let solidity = match compiler.compile_text(&source) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("编译失败:");
            print_error_with_context(&source, &e);
            process::exit(1);
        }
    };

    if options.check_only {
        println!("语法检查通过: {}", options.input.display());
        return Ok(());
    }

    let output = options
        .output
        .unwrap_or_else(|| default_output(&options.input));
    fs::write(&output, &solidity)
        .with_context(|| format!("写入输出文件 {} 失败", output.display()))?;

    println!("编译成功");
    println!("输入: {}", options.input.display());
    println!("输出: {}", output.display());
    Ok(())
}

/// 缺省输出路径：把 .zhs 换成 .sol
fn default_output(input: &Path) -> PathBuf {
    input.with_extension("sol")
}
