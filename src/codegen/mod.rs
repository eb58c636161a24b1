//! 代码生成阶段

mod names;
mod generator;

pub use names::{NameKind, NameRecord, NameTable};
pub use generator::SolidityGenerator;

use crate::ast::Contract;
use crate::error::ZhscResult;

/// 从 AST 生成 Solidity 源码
pub fn generate(contract: &Contract) -> ZhscResult<String> {
    SolidityGenerator::new().generate(contract)
}
