//! ICD 编码字典
//! 负责从 CSV 字典表构建 编码 -> 中英文名称 映射

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use csv::{ReaderBuilder, StringRecord};
use tracing::{info, warn};

use super::loader::read_source;
use super::model::CodeEntry;
use crate::config::DictionaryColumns;
use crate::error::{CoderError, CoderResult};
use crate::utils::CellCleaner;

/// ICD 编码字典（启动时构建，之后只读）
#[derive(Debug, Clone, Default)]
pub struct CodeDictionary {
    entries: HashMap<String, CodeEntry>,
    collisions: usize,
}

impl CodeDictionary {
    /// 从文件加载字典（文件缺失、不可读或缺少编码列即为配置错误）
    pub async fn load(path: &Path, columns: &DictionaryColumns) -> CoderResult<Self> {
        let data = read_source(path, "ICD 字典表").await?;
        let dictionary = Self::parse(data.as_slice(), columns).map_err(|e| match e {
            CoderError::Configuration(msg) => {
                CoderError::Configuration(format!("{}：{}", path.display(), msg))
            }
            other => CoderError::Configuration(format!(
                "ICD 字典表解析失败 {}：{}",
                path.display(),
                other
            )),
        })?;

        info!("ICD 字典载入完成，共 {} 笔", dictionary.len());
        if dictionary.collisions > 0 {
            warn!("ICD 字典存在 {} 个重复编码，已按后出现者覆盖", dictionary.collisions);
        }

        Ok(dictionary)
    }

    /// 解析字典表：按表头名称定位编码列与中英文名称列
    pub fn parse<R: Read>(reader: R, columns: &DictionaryColumns) -> CoderResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let code_idx = find_header_index(&headers, &columns.code).ok_or_else(|| {
            CoderError::Configuration(format!("ICD 字典表缺少编码列：{}", columns.code))
        })?;
        let english_idx = find_header_index(&headers, &columns.english);
        let chinese_idx = find_header_index(&headers, &columns.chinese);

        let mut dictionary = Self::default();
        for record in csv_reader.records() {
            let record = record?;
            let raw_code = record.get(code_idx).unwrap_or_default();
            if CellCleaner::is_missing(raw_code) {
                continue;
            }

            let entry = CodeEntry {
                english: field_at(&record, english_idx),
                chinese: field_at(&record, chinese_idx),
            };
            dictionary.insert(raw_code, entry);
        }

        Ok(dictionary)
    }

    /// 插入条目，重复编码后者覆盖前者并计数
    pub fn insert(&mut self, code: &str, entry: CodeEntry) {
        if self.entries.insert(CellCleaner::normalize_code(code), entry).is_some() {
            self.collisions += 1;
        }
    }

    /// 精确查询（输入会先规范化）；未收录返回 None
    pub fn lookup(&self, code: &str) -> Option<&CodeEntry> {
        self.entries.get(&CellCleaner::normalize_code(code))
    }

    /// 加载过程中的重复编码数量
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, CodeEntry)> for CodeDictionary {
    fn from_iter<I: IntoIterator<Item = (String, CodeEntry)>>(iter: I) -> Self {
        let mut dictionary = Self::default();
        for (code, entry) in iter {
            dictionary.insert(&code, entry);
        }
        dictionary
    }
}

fn find_header_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == name.trim())
}

fn field_at(record: &StringRecord, idx: Option<usize>) -> String {
    CellCleaner::optional_text(idx.and_then(|i| record.get(i)))
}
