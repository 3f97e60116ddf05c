//! 规则模块：负责 CAD 规则表、ICD 字典的加载与数据模型定义
pub mod model;
pub mod loader;
pub mod dictionary;
pub mod knowledge;

// 导出核心接口
pub use self::model::{CodeClass, CodeEntry, RuleCategory, RuleEntry, RuleSets};
pub use self::loader::RuleLoader;
pub use self::dictionary::CodeDictionary;
pub use self::knowledge::KnowledgeBase;
