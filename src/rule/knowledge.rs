//! 编码知识库快照
//! 规则集合 + ICD 字典，构建后只读，通过 Arc 在请求间共享

use std::time::Instant;
use tracing::debug;

use super::dictionary::CodeDictionary;
use super::loader::RuleLoader;
use super::model::RuleSets;
use crate::config::GlobalConfig;
use crate::error::CoderResult;

/// 编码知识库（不可变快照）
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    pub rules: RuleSets,
    pub dictionary: CodeDictionary,
}

impl KnowledgeBase {
    pub fn new(rules: RuleSets, dictionary: CodeDictionary) -> Self {
        Self { rules, dictionary }
    }

    /// 按配置加载规则表与字典；任一失败则整体失败
    pub async fn load(config: &GlobalConfig) -> CoderResult<Self> {
        let start = Instant::now();
        let (rules, dictionary) = tokio::try_join!(
            RuleLoader::load(&config.rule_path),
            CodeDictionary::load(&config.dictionary_path, &config.dictionary_columns),
        )?;
        debug!("编码知识库加载完成，耗时{:?}", start.elapsed());

        Ok(Self::new(rules, dictionary))
    }
}
