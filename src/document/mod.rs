//! 文档模块：Word 文档包读写、正文段落扫描、摘要排版与组装
pub mod package;
pub mod paragraph;
pub mod style;
pub mod assembler;
pub mod reader;

// 导出核心接口
pub use self::package::{DocxPackage, DOCUMENT_PART};
pub use self::paragraph::{BodyLayout, ParagraphSpan};
pub use self::style::{style_run, FontSlots, ParagraphStyle, RunStyle, CJK_TYPEFACE, LATIN_TYPEFACE, SUMMARY_TITLE};
pub use self::assembler::{AssemblyOutcome, DocumentAssembler};
pub use self::reader::DocumentReader;
