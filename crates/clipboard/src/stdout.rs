use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use viewzenix_core::clipboard::error::ClipboardError;
use viewzenix_core::clipboard::port::ClipboardSink;

/// 直接把文本打印到标准输出，供终端用户手动选取复制。
pub struct StdoutClipboard;

#[async_trait]
impl ClipboardSink for StdoutClipboard {
    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let mut out = tokio::io::stdout();
        out.write_all(text.as_bytes()).await?;
        out.write_all(b"\n").await?;
        out.flush().await?;
        Ok(())
    }
}
