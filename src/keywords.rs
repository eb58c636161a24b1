//! 关键字/类型对照表
//!
//! 中文关键字、类型、可见性修饰符与内置量到 Solidity 记号的静态映射。
//! 表是封闭的，进程启动后只读，可在多线程间共享。
//! 查不到不算错误：调用方把未知文本当作用户自定义标识符处理。

/// 查询关键字对应的目标语言记号
pub fn lookup_keyword(text: &str) -> Option<&'static str> {
    match text {
        "合约" => Some("contract"),
        "函数" => Some("function"),
        "构造函数" => Some("constructor"),
        "事件" => Some("event"),
        "返回" => Some("return"),
        "如果" => Some("if"),
        "否则" => Some("else"),
        "循环" => Some("for"),
        "当" => Some("while"),
        "要求" => Some("require"),
        "触发" => Some("emit"),
        "映射" => Some("mapping"),
        "公开" => Some("public"),
        "私有" => Some("private"),
        "内部" => Some("internal"),
        "外部" => Some("external"),
        "只读" => Some("view"),
        "纯" => Some("pure"),
        "可支付" => Some("payable"),
        "真" => Some("true"),
        "假" => Some("false"),
        _ => None,
    }
}

/// 查询类型名对应的目标语言类型
pub fn lookup_type(text: &str) -> Option<&'static str> {
    match text {
        "整数" => Some("uint256"),
        "有符号整数" => Some("int256"),
        "地址" => Some("address"),
        "布尔" => Some("bool"),
        "字符串" => Some("string"),
        "字节" => Some("bytes"),
        _ => None,
    }
}

/// 查询内置量对应的目标语言表达式
///
/// 内置量在词法上是普通标识符，代码生成阶段先查本表再做音译。
pub fn lookup_builtin(text: &str) -> Option<&'static str> {
    match text {
        "消息发送者" => Some("msg.sender"),
        "消息金额" => Some("msg.value"),
        "区块号" => Some("block.number"),
        "区块时间" => Some("block.timestamp"),
        _ => None,
    }
}

pub fn is_keyword(text: &str) -> bool {
    lookup_keyword(text).is_some() || lookup_type(text).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(lookup_keyword("合约"), Some("contract"));
        assert_eq!(lookup_keyword("要求"), Some("require"));
        assert_eq!(lookup_keyword("触发"), Some("emit"));
        assert_eq!(lookup_keyword("数值"), None);
    }

    #[test]
    fn test_type_lookup() {
        assert_eq!(lookup_type("整数"), Some("uint256"));
        assert_eq!(lookup_type("有符号整数"), Some("int256"));
        assert_eq!(lookup_type("地址"), Some("address"));
        assert_eq!(lookup_type("合约"), None);
    }

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(lookup_builtin("消息发送者"), Some("msg.sender"));
        assert_eq!(lookup_builtin("区块时间"), Some("block.timestamp"));
        assert_eq!(lookup_builtin("余额"), None);
    }

    #[test]
    fn test_is_keyword_covers_types() {
        assert!(is_keyword("布尔"));
        assert!(is_keyword("如果"));
        assert!(!is_keyword("总供应量"));
    }
}
