//! 规则加载管理器
//! 负责从本地 CSV 规则表构建 CAD 规则集合

use std::io::Read;
use std::path::Path;
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use super::model::{RuleCategory, RuleEntry, RuleSets};
use crate::error::{CoderError, CoderResult};
use crate::utils::CellCleaner;

/// 规则加载管理器
pub struct RuleLoader;

impl RuleLoader {
    /// 从文件加载规则集合（文件缺失或不可读即为配置错误）
    pub async fn load(path: &Path) -> CoderResult<RuleSets> {
        let data = read_source(path, "CAD 规则表").await?;
        let rule_sets = Self::parse(data.as_slice()).map_err(|e| {
            CoderError::Configuration(format!("CAD 规则表解析失败 {}：{}", path.display(), e))
        })?;

        info!(
            "CAD 规则加载完成：主诊断码{}个，不稳定型{}个，复杂次诊断码{}个",
            rule_sets.main_codes.len(),
            rule_sets.unstable_codes.len(),
            rule_sets.complex_secondary_codes.len()
        );
        debug!("CAD 主诊断码（所有）：{:?}", rule_sets.sorted_main_codes());
        debug!("CAD 不稳定型码：{:?}", rule_sets.sorted_unstable_codes());
        debug!("复杂次诊断码：{:?}", rule_sets.sorted_complex_secondary_codes());

        Ok(rule_sets)
    }

    /// 解析规则表：按列位置读取 分类 / 条件 / 编码，不依赖表头名称
    pub fn parse<R: Read>(reader: R) -> CoderResult<RuleSets> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        debug!("规则表实际列名：{:?}", headers.iter().collect::<Vec<_>>());

        let mut rule_sets = RuleSets::default();
        let mut ignored_rows = 0usize;

        for record in csv_reader.records() {
            let record = record?;
            let Some(entry) = Self::parse_row(&record) else {
                continue;
            };

            if !rule_sets.absorb(&entry) {
                ignored_rows += 1;
                debug!("忽略未知规则分类：{}", entry.category);
            }
        }

        if ignored_rows > 0 {
            debug!("共忽略{}行未知分类规则", ignored_rows);
        }

        Ok(rule_sets)
    }

    /// 解析单行；编码列为空时返回 None
    pub fn parse_row(record: &StringRecord) -> Option<RuleEntry> {
        let codes_cell = record.get(2).unwrap_or_default();
        if CellCleaner::is_missing(codes_cell) {
            return None;
        }

        let codes: Vec<String> = codes_cell
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_uppercase)
            .collect();
        if codes.is_empty() {
            return None;
        }

        Some(RuleEntry {
            category: RuleCategory::parse(record.get(0).unwrap_or_default()),
            condition: record.get(1).unwrap_or_default().trim().to_string(),
            codes,
        })
    }
}

/// 读取配置源文件，统一转为配置错误
pub(crate) async fn read_source(path: &Path, label: &str) -> CoderResult<Vec<u8>> {
    if !path.exists() {
        return Err(CoderError::Configuration(format!(
            "找不到{}：{}",
            label,
            path.display()
        )));
    }

    tokio::fs::read(path).await.map_err(|e| {
        CoderError::Configuration(format!("读取{}失败 {}：{}", label, path.display(), e))
    })
}
