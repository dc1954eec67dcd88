use crate::clipboard::error::ClipboardError;
use async_trait::async_trait;

/// # Summary
/// 接收待复制文本的外部接收端（剪贴板、文件、聊天机器人等）。
///
/// # Invariants
/// - 实现必须是 `Send` 和 `Sync`。
/// - `copy` 是异步的；调用方只根据结果更新通知，不依赖它保持自身状态一致。
#[async_trait]
pub trait ClipboardSink: Send + Sync {
    /// # Summary
    /// 复制一段文本。
    ///
    /// # Logic
    /// 1. 按目标平台要求包装文本。
    /// 2. 写入或发送到目标位置。
    /// 3. 返回成功或失败状态。
    ///
    /// # Arguments
    /// * `text` - 待复制的完整文本。
    ///
    /// # Returns
    /// * 成功返回 `Ok(())`。
    /// * 失败返回 `Err(ClipboardError)`。
    async fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}
