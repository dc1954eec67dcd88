use thiserror::Error;

/// # Summary
/// 剪贴板写入错误枚举。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 任何变体都只影响通知提示，不影响表单或告警状态。
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// 本地文件或标准输出写入失败
    #[error("IO error: {0}")]
    Io(String),

    /// 网络连接或传输错误
    #[error("Network error: {0}")]
    Network(String),

    /// 配置错误 (如缺少 Token 或路径)
    #[error("Configuration error: {0}")]
    Config(String),

    /// 目标平台返回的错误 (如 Telegram API Error)
    #[error("Platform error: {0}")]
    Platform(String),
}

impl From<std::io::Error> for ClipboardError {
    fn from(err: std::io::Error) -> Self {
        ClipboardError::Io(err.to_string())
    }
}
