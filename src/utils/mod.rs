//! 工具模块：单元格清洗、文字脚本检测
pub mod cell_cleaner;
pub mod script_detector;

// 导出核心接口
pub use self::cell_cleaner::{CellCleaner, MISSING_VALUE_MARKER};
pub use self::script_detector::ScriptDetector;
