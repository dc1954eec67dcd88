use async_trait::async_trait;
use tokio::sync::RwLock;
use viewzenix_core::clipboard::error::ClipboardError;
use viewzenix_core::clipboard::port::ClipboardSink;

/// # Summary
/// 进程内剪贴板，记录每一次复制的文本。
///
/// # Invariants
/// - 只保留文本历史，不与操作系统剪贴板交互。
#[derive(Default)]
pub struct MemoryClipboard {
    history: RwLock<Vec<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最近一次复制的文本
    pub async fn latest(&self) -> Option<String> {
        self.history.read().await.last().cloned()
    }

    /// 全部复制历史，按时间先后排列
    pub async fn history(&self) -> Vec<String> {
        self.history.read().await.clone()
    }
}

#[async_trait]
impl ClipboardSink for MemoryClipboard {
    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        self.history.write().await.push(text.to_string());
        Ok(())
    }
}
