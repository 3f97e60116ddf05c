//! 规则数据模型定义
//! 仅存储规则数据，无任何业务逻辑，支持序列化

use std::collections::BTreeSet;
use std::fmt;
use serde::{Deserialize, Serialize};

/// 规则分类（规则表第一列）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleCategory {
    Main,
    Complex,
    Other(String),
}

impl RuleCategory {
    /// 从单元格解析（去空白、忽略大小写）
    pub fn parse(cell: &str) -> Self {
        let normalized = cell.trim().to_lowercase();
        match normalized.as_str() {
            "main" => RuleCategory::Main,
            "complex" => RuleCategory::Complex,
            _ => RuleCategory::Other(normalized),
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCategory::Main => write!(f, "main"),
            RuleCategory::Complex => write!(f, "complex"),
            RuleCategory::Other(s) => write!(f, "{}", s),
        }
    }
}

/// 规则表中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEntry {
    pub category: RuleCategory,
    pub condition: String,
    pub codes: Vec<String>,
}

impl RuleEntry {
    /// 条件描述是否标记为不稳定型（unstable / refractory）
    pub fn is_unstable(&self) -> bool {
        let condition = self.condition.to_lowercase();
        condition.contains("unstable") || condition.contains("refractory")
    }
}

/// 编码在各规则集合中的归属
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CodeClass {
    pub main: bool,
    pub unstable: bool,
    pub complex_secondary: bool,
}

/// 规则集合（启动时构建，之后只读）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleSets {
    pub main_codes: BTreeSet<String>,
    pub unstable_codes: BTreeSet<String>,
    pub complex_secondary_codes: BTreeSet<String>,
}

impl RuleSets {
    /// 合入一行规则；未知分类返回 false
    pub fn absorb(&mut self, entry: &RuleEntry) -> bool {
        match entry.category {
            RuleCategory::Main => {
                self.main_codes.extend(entry.codes.iter().cloned());
                if entry.is_unstable() {
                    self.unstable_codes.extend(entry.codes.iter().cloned());
                }
                true
            }
            RuleCategory::Complex => {
                self.complex_secondary_codes.extend(entry.codes.iter().cloned());
                true
            }
            RuleCategory::Other(_) => false,
        }
    }

    /// 按字典序返回主诊断码
    pub fn sorted_main_codes(&self) -> Vec<&str> {
        self.main_codes.iter().map(String::as_str).collect()
    }

    pub fn sorted_unstable_codes(&self) -> Vec<&str> {
        self.unstable_codes.iter().map(String::as_str).collect()
    }

    pub fn sorted_complex_secondary_codes(&self) -> Vec<&str> {
        self.complex_secondary_codes.iter().map(String::as_str).collect()
    }

    /// 供上游 Prompt 引用的主诊断码清单（逗号分隔，已排序）
    pub fn reference_code_clause(&self) -> String {
        self.sorted_main_codes().join(", ")
    }

    /// 查询编码归属（输入按规则表的存储形式：去空白、大写）
    pub fn classify(&self, code: &str) -> CodeClass {
        let code = code.trim().to_uppercase();
        CodeClass {
            main: self.main_codes.contains(&code),
            unstable: self.unstable_codes.contains(&code),
            complex_secondary: self.complex_secondary_codes.contains(&code),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.main_codes.is_empty() && self.complex_secondary_codes.is_empty()
    }
}

/// ICD 字典条目
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    pub english: String,
    pub chinese: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(category: &str, condition: &str, codes: &[&str]) -> RuleEntry {
        RuleEntry {
            category: RuleCategory::parse(category),
            condition: condition.to_string(),
            codes: codes.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(RuleCategory::parse(" MAIN "), RuleCategory::Main);
        assert_eq!(RuleCategory::parse("Complex"), RuleCategory::Complex);
        assert_eq!(RuleCategory::parse("Exclude"), RuleCategory::Other("exclude".to_string()));
    }

    #[test]
    fn test_absorb_unstable_main_row() {
        let mut sets = RuleSets::default();
        assert!(sets.absorb(&entry("main", "Refractory angina", &["I20.0", "I25.110"])));
        assert!(sets.main_codes.contains("I20.0"));
        assert!(sets.unstable_codes.contains("I25.110"));
        assert!(sets.complex_secondary_codes.is_empty());
    }

    #[test]
    fn test_code_may_belong_to_main_and_complex() {
        let mut sets = RuleSets::default();
        sets.absorb(&entry("main", "stable", &["I50.20"]));
        sets.absorb(&entry("complex", "heart failure", &["I50.20"]));
        let class = sets.classify("i50.20");
        assert!(class.main);
        assert!(class.complex_secondary);
        assert!(!class.unstable);
    }

    #[test]
    fn test_other_category_ignored() {
        let mut sets = RuleSets::default();
        assert!(!sets.absorb(&entry("exclude", "unstable", &["Z00.0"])));
        assert!(sets.is_empty());
    }

    #[test]
    fn test_reference_clause_sorted() {
        let mut sets = RuleSets::default();
        sets.absorb(&entry("main", "", &["I25.10", "I20.0", "I21.4"]));
        assert_eq!(sets.reference_code_clause(), "I20.0, I21.4, I25.10");
    }
}
