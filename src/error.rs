//! 全局错误类型定义

use thiserror::Error;
use csv::Error as CsvError;
use quick_xml::Error as XmlError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use zip::result::ZipError;

#[derive(Error, Debug)]
pub enum CoderError {
    // 配置相关错误（规则表/字典缺失或无法读取，启动即失败）
    #[error("配置加载失败：{0}")]
    Configuration(String),

    // 文档相关错误
    #[error("文档格式错误（标记：{marker}，是否尝试追加：{fallback_attempted}）：{reason}")]
    DocumentFormat {
        marker: String,
        fallback_attempted: bool,
        reason: String,
    },

    // 全局状态错误
    #[error("编码知识库未初始化")]
    NotInitialized,

    // 解析相关错误
    #[error("CSV解析失败：{0}")]
    CsvError(#[from] CsvError),
    #[error("XML解析失败：{0}")]
    XmlError(#[from] XmlError),
    #[error("ZIP读写失败：{0}")]
    ZipError(#[from] ZipError),
    #[error("JSON序列化失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

impl CoderError {
    /// 构造文档格式错误
    pub fn document(marker: &str, fallback_attempted: bool, reason: impl Into<String>) -> Self {
        CoderError::DocumentFormat {
            marker: marker.to_string(),
            fallback_attempted,
            reason: reason.into(),
        }
    }
}

// 全局Result类型
pub type CoderResult<T> = Result<T, CoderError>;
