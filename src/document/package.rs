//! Word 文档包读写
//! .docx 即 ZIP 包；仅重写 word/document.xml，其余部件原样复制

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{CoderError, CoderResult};

/// 正文部件路径
pub const DOCUMENT_PART: &str = "word/document.xml";

/// 已载入内存的 Word 文档包
pub struct DocxPackage {
    archive: ZipArchive<Cursor<Vec<u8>>>,
    document_xml: String,
}

impl DocxPackage {
    /// 读取文档包（整个文件读入内存，允许原位覆盖输出）
    pub fn open(path: &Path) -> CoderResult<Self> {
        let bytes = fs::read(path)?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> CoderResult<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut document_xml = String::new();
        {
            let mut part = archive.by_name(DOCUMENT_PART)?;
            part.read_to_string(&mut document_xml)?;
        }
        Ok(Self {
            archive,
            document_xml,
        })
    }

    pub fn document_xml(&self) -> &str {
        &self.document_xml
    }

    /// 以新的正文写出文档包：先写入目标目录下的临时文件，成功后原子替换
    pub fn save_with(&mut self, document_xml: &str, output: &Path) -> CoderResult<()> {
        let dir = output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        // 临时文件在任何错误路径上都会随 drop 删除
        let mut temp = NamedTempFile::new_in(dir)?;

        {
            let mut writer = ZipWriter::new(temp.as_file_mut());
            let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

            for index in 0..self.archive.len() {
                let entry = self.archive.by_index_raw(index)?;
                if entry.name() == DOCUMENT_PART {
                    drop(entry);
                    writer.start_file(DOCUMENT_PART, options)?;
                    writer.write_all(document_xml.as_bytes())?;
                } else {
                    writer.raw_copy_file(entry)?;
                }
            }
            writer.finish()?;
        }

        temp.as_file().sync_all()?;
        temp.persist(output)
            .map_err(|e| CoderError::IoError(e.error))?;
        debug!("文档包已写出：{}", output.display());
        Ok(())
    }
}
