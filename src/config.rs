//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;

/// 默认文档插入标记
pub const DEFAULT_MARKER: &str = "AI_SUMMARY_HERE";

/// ICD 字典表的列名（按表头名称定位）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryColumns {
    pub code: String,
    pub english: String,
    pub chinese: String,
}

impl Default for DictionaryColumns {
    fn default() -> Self {
        Self {
            code: "疾病代碼".to_string(),
            english: "CM 英文名稱(2023)".to_string(),
            chinese: "CM 中文名稱(2023)".to_string(),
        }
    }
}

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // CAD 规则表路径
    pub rule_path: PathBuf,
    // ICD 字典表路径
    pub dictionary_path: PathBuf,
    // 字典列名
    pub dictionary_columns: DictionaryColumns,
    // 文档插入标记
    pub marker_name: String,
    // 输出文档目录（None 时与源文档同目录）
    pub output_dir: Option<PathBuf>,
    // 是否启用详细日志
    pub verbose: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            rule_path: PathBuf::from("CAD_rule.csv"),
            dictionary_path: PathBuf::from("ICD_code.csv"),
            dictionary_columns: DictionaryColumns::default(),
            marker_name: DEFAULT_MARKER.to_string(),
            output_dir: None,
            verbose: false,
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }

    /// 默认配置 + 环境变量覆盖（CAD_RULE_PATH / ICD_CSV_PATH / SUMMARY_MARKER）
    pub fn from_env() -> GlobalConfig {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> GlobalConfig {
        let mut builder = CustomConfigBuilder::new();
        if let Some(path) = lookup("CAD_RULE_PATH").filter(|v| !v.trim().is_empty()) {
            builder = builder.rule_path(PathBuf::from(path));
        }
        if let Some(path) = lookup("ICD_CSV_PATH").filter(|v| !v.trim().is_empty()) {
            builder = builder.dictionary_path(PathBuf::from(path));
        }
        if let Some(marker) = lookup("SUMMARY_MARKER").filter(|v| !v.trim().is_empty()) {
            builder = builder.marker_name(marker);
        }
        builder.build()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl Default for CustomConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn rule_path(mut self, path: PathBuf) -> Self {
        self.config.rule_path = path;
        self
    }

    pub fn dictionary_path(mut self, path: PathBuf) -> Self {
        self.config.dictionary_path = path;
        self
    }

    pub fn dictionary_columns(mut self, columns: DictionaryColumns) -> Self {
        self.config.dictionary_columns = columns;
        self
    }

    pub fn marker_name(mut self, marker: String) -> Self {
        self.config.marker_name = marker;
        self
    }

    pub fn output_dir(mut self, dir: PathBuf) -> Self {
        self.config.output_dir = Some(dir);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_env_overrides_only_non_empty_values() {
        let vars: HashMap<&str, &str> = [
            ("CAD_RULE_PATH", "/data/rules.csv"),
            ("ICD_CSV_PATH", "   "),
            ("SUMMARY_MARKER", "REPORT_HERE"),
        ]
        .into_iter()
        .collect();

        let config = ConfigManager::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.rule_path, PathBuf::from("/data/rules.csv"));
        assert_eq!(config.dictionary_path, PathBuf::from("ICD_code.csv"));
        assert_eq!(config.marker_name, "REPORT_HERE");
    }

    #[test]
    fn test_builder_overrides_defaults() {
        let config = ConfigManager::custom()
            .output_dir(PathBuf::from("/tmp/out"))
            .verbose(true)
            .build();
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/out")));
        assert!(config.verbose);
        assert_eq!(config.marker_name, DEFAULT_MARKER);
        assert_eq!(config.dictionary_columns.code, "疾病代碼");
    }
}
