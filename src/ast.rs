//! 抽象语法树节点定义
//!
//! 所有节点为封闭的和类型，代码生成阶段做穷尽匹配，
//! 新增语句/表达式种类是编译期检查的改动。
//! 树形独占所有权，节点间不共享、不回引。

use crate::error::SourceLocation;

/// 编译单元的根：恰好一个合约
#[derive(Debug, Clone)]
pub struct Contract {
    pub name: String,
    pub members: Vec<ContractMember>,
    /// 声明前的源注释，代码生成时原样回写
    pub doc: Vec<String>,
    pub loc: SourceLocation,
}

/// 合约成员，按源码顺序保存
#[derive(Debug, Clone)]
pub enum ContractMember {
    StateVariable(StateVariable),
    Event(EventDecl),
    Constructor(ConstructorDecl),
    Function(FunctionDecl),
}

#[derive(Debug, Clone)]
pub struct StateVariable {
    pub name: String,
    pub ty: TypeName,
    pub visibility: Option<Visibility>,
    pub initializer: Option<Expr>,
    pub doc: Vec<String>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Parameter>,
    pub visibility: Option<Visibility>,
    pub mutability: Option<Mutability>,
    pub return_type: Option<TypeName>,
    pub body: Block,
    pub doc: Vec<String>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct ConstructorDecl {
    pub params: Vec<Parameter>,
    pub body: Block,
    pub doc: Vec<String>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct EventDecl {
    pub name: String,
    pub params: Vec<Parameter>,
    pub doc: Vec<String>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeName,
    pub loc: SourceLocation,
}

/// 类型标注，映射类型逐字保留键/值类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    Uint256,
    Int256,
    Address,
    Bool,
    String,
    Bytes,
    Mapping {
        key: Box<TypeName>,
        value: Box<TypeName>,
    },
}

impl TypeName {
    /// 目标语言中的类型写法
    pub fn solidity(&self) -> String {
        match self {
            TypeName::Uint256 => "uint256".to_string(),
            TypeName::Int256 => "int256".to_string(),
            TypeName::Address => "address".to_string(),
            TypeName::Bool => "bool".to_string(),
            TypeName::String => "string".to_string(),
            TypeName::Bytes => "bytes".to_string(),
            TypeName::Mapping { key, value } => {
                format!("mapping({} => {})", key.solidity(), value.solidity())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
    Internal,
    External,
}

impl Visibility {
    pub fn solidity(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Internal => "internal",
            Visibility::External => "external",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    View,
    Pure,
    Payable,
}

impl Mutability {
    pub fn solidity(self) -> &'static str {
        match self {
            Mutability::View => "view",
            Mutability::Pure => "pure",
            Mutability::Payable => "payable",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Return(Option<Expr>),
    Require(RequireStmt),
    Emit(EmitStmt),
    VarDecl(VarDecl),
    Assignment(AssignStmt),
    Expr(Expr),
    Block(Block),
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_block: Block,
    pub else_branch: Option<Box<Stmt>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Block,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct ForStmt {
    pub init: Option<Box<Stmt>>,
    pub condition: Option<Expr>,
    pub update: Option<Box<Stmt>>,
    pub body: Block,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct RequireStmt {
    pub condition: Expr,
    pub message: Option<Expr>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct EmitStmt {
    pub event: String,
    pub args: Vec<Expr>,
    pub loc: SourceLocation,
}

/// 函数体内的局部变量声明
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub name: String,
    pub ty: TypeName,
    pub initializer: Option<Expr>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct AssignStmt {
    pub target: Expr,
    pub op: AssignOp,
    pub value: Expr,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
}

impl AssignOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Expr {
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Call(CallExpr),
    Identifier(IdentExpr),
    Literal(LiteralExpr),
    Index(IndexExpr),
    Member(MemberExpr),
}

#[derive(Debug, Clone)]
pub struct IdentExpr {
    pub name: String,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: BinaryOp,
    pub right: Box<Expr>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    /// 优先级，数值越大绑定越紧
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Eq | BinaryOp::Ne => 3,
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => 4,
            BinaryOp::Add | BinaryOp::Sub => 5,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct IndexExpr {
    pub object: Box<Expr>,
    pub index: Box<Expr>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub member: String,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct LiteralExpr {
    pub value: LiteralValue,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// 数字按原文保留，含可选小数点
    Number(String),
    Str(String),
    Bool(bool),
}
