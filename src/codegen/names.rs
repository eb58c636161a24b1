//! 标识符映射记录
//!
//! 一次编译调用内的原名到音译名缓存：同一原名处处得到同一个发射名，
//! 不同原名音译撞车时后来者追加数字后缀 2、3、…（先到者保留无后缀形式）。
//! 表随生成器一起构造、随本次调用一起丢弃，绝不跨调用复用。

use std::collections::{HashMap, HashSet};
use crate::pinyin::transliterate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Contract,
    Variable,
    Function,
    Event,
}

#[derive(Debug, Clone)]
pub struct NameRecord {
    pub original: String,
    pub emitted: String,
    pub kind: NameKind,
}

#[derive(Debug, Default)]
pub struct NameTable {
    map: HashMap<String, String>,
    used: HashSet<String>,
    records: Vec<NameRecord>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取原名对应的发射名，首次遇到时建立映射。
    /// 已有映射永不被改写，保证先声明者的名字不受后续冲突影响。
    pub fn resolve(&mut self, original: &str, kind: NameKind) -> String {
        if let Some(emitted) = self.map.get(original) {
            return emitted.clone();
        }

        let base = transliterate(original);
        let mut candidate = base.clone();
        let mut suffix = 2usize;
        while self.used.contains(&candidate) {
            candidate = format!("{}{}", base, suffix);
            suffix += 1;
        }

        self.used.insert(candidate.clone());
        self.map.insert(original.to_string(), candidate.clone());
        self.records.push(NameRecord {
            original: original.to_string(),
            emitted: candidate.clone(),
            kind,
        });
        candidate
    }

    /// 本次编译建立的全部映射，按首次遇到的顺序
    pub fn records(&self) -> &[NameRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_original_same_emitted() {
        let mut table = NameTable::new();
        let a = table.resolve("余额", NameKind::Variable);
        let b = table.resolve("余额", NameKind::Variable);
        assert_eq!(a, b);
        assert_eq!(table.records().len(), 1);
    }

    #[test]
    fn test_collision_gets_numeric_suffix() {
        let mut table = NameTable::new();
        // "数" 和 "树" 同音
        let first = table.resolve("数", NameKind::Variable);
        let second = table.resolve("树", NameKind::Variable);
        assert_eq!(first, "Shu");
        assert_eq!(second, "Shu2");
        // 先到者的名字不因后续冲突而变化
        assert_eq!(table.resolve("数", NameKind::Variable), "Shu");
    }

    #[test]
    fn test_triple_collision() {
        let mut table = NameTable::new();
        table.resolve("数", NameKind::Variable);
        table.resolve("树", NameKind::Variable);
        let third = table.resolve("输", NameKind::Variable);
        assert_eq!(third, "Shu3");
    }

    #[test]
    fn test_ascii_name_reserves_slot() {
        let mut table = NameTable::new();
        assert_eq!(table.resolve("Shu", NameKind::Variable), "Shu");
        assert_eq!(table.resolve("数", NameKind::Variable), "Shu2");
    }
}
