use crate::alert::entity::ValidationErrors;
use thiserror::Error;

/// # Summary
/// 告警生成失败的原因。
///
/// # Invariants
/// - 不存在致命错误：任何一种失败都不会丢失已录入的表单内容。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlertError {
    /// 表单存在未通过校验的字段，附带完整的错误集合
    #[error("Alert form is invalid: {0}")]
    Invalid(ValidationErrors),

    /// JSON 序列化失败
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for AlertError {
    fn from(err: serde_json::Error) -> Self {
        AlertError::Serialize(err.to_string())
    }
}
