use async_trait::async_trait;
use std::path::PathBuf;
use viewzenix_core::clipboard::error::ClipboardError;
use viewzenix_core::clipboard::port::ClipboardSink;

/// # Summary
/// 把复制的文本写入指定文件，每次复制整体覆盖。
///
/// # Invariants
/// - 父目录不存在时自动创建。
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl ClipboardSink for FileClipboard {
    /// # Logic
    /// 1. 确保父目录存在。
    /// 2. 以覆盖方式写入文本，末尾补一个换行。
    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, format!("{}\n", text)).await?;
        tracing::debug!(path = %self.path.display(), "Text written to clipboard file");
        Ok(())
    }
}
