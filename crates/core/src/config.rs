use crate::alert::entity::OrderAction;
use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub webhook: WebhookConfig,
    pub form: FormConfig,
    pub notification: NotificationConfig,
    pub clipboard: ClipboardConfig,
    pub log: LogConfig,
}

/// 展示给用户的 webhook 地址。只用于显示和复制，不会对其发起请求。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    pub base_url: String,
    pub api_key: String,
}

impl WebhookConfig {
    /// # Logic
    /// 拼接 `{base_url}/webhook/tv/{api_key}`，去掉 base_url 末尾多余的斜杠。
    pub fn url(&self) -> String {
        format!(
            "{}/webhook/tv/{}",
            self.base_url.trim_end_matches('/'),
            self.api_key
        )
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.viewzenix.com".to_string(),
            api_key: "your-api-key".to_string(),
        }
    }
}

/// 新建表单时的默认值
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub order_id: String,
    pub action: OrderAction,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            order_id: "long".to_string(),
            action: OrderAction::Buy,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// 通知自动消失前的显示时长 (毫秒)
    pub dismiss_after_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: 3000,
        }
    }
}

/// 复制操作的落地位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Stdout,
    File,
    Telegram,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    pub sink: SinkKind,
    /// `sink = "file"` 时写入的文件
    pub path: Option<String>,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// 未设置 RUST_LOG 时使用的过滤级别
    pub level: String,
    /// 设置后额外按天滚动写入该目录
    pub dir: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}
