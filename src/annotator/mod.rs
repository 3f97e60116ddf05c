//! 标注模块：编码替换、段落状态机、文本标注器
pub mod code_formatter;
pub mod section;
pub mod annotator;

// 导出核心接口
pub use self::code_formatter::CodeFormatter;
pub use self::section::{LineEvent, SectionState, CAD_RESULT_HEADER, GENERAL_ICD_HEADER, GENERAL_ICD_TITLE};
pub use self::annotator::TextAnnotator;
