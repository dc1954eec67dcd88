use crate::builder::{AlertMessageBuilder, GeneratedAlert};
use crate::notice::NotificationCenter;
use std::sync::Arc;
use tracing::{info, warn};
use viewzenix_core::alert::entity::{AlertFormState, FieldEdit, ValidationErrors};
use viewzenix_core::alert::error::AlertError;
use viewzenix_core::clipboard::port::ClipboardSink;
use viewzenix_core::common::TimeProvider;
use viewzenix_core::config::AppConfig;
use viewzenix_core::notify::entity::Notification;

pub const ALERT_COPIED: &str = "Alert message copied to clipboard!";
pub const URL_COPIED: &str = "Webhook URL copied to clipboard!";
pub const COPY_FAILED: &str = "Failed to copy to clipboard";
pub const NOTHING_TO_COPY: &str = "Generate an alert message first";

/// # Summary
/// 一个打开中的 webhook 设置页。
/// 组合告警构建器、通知中心与剪贴板接收端，页面关闭即整体丢弃。
///
/// # Invariants
/// - 剪贴板结果只影响通知，不影响表单与告警状态，失败不自动重试。
pub struct WebhookSetup {
    builder: AlertMessageBuilder,
    notices: NotificationCenter,
    clipboard: Arc<dyn ClipboardSink>,
    clock: Arc<dyn TimeProvider>,
    webhook_url: String,
}

impl WebhookSetup {
    pub fn new(config: &AppConfig, clock: Arc<dyn TimeProvider>, clipboard: Arc<dyn ClipboardSink>) -> Self {
        Self {
            builder: AlertMessageBuilder::new(clock.clone(), config.form.clone()),
            notices: NotificationCenter::new(config.notification.dismiss_after_ms),
            clipboard,
            clock,
            webhook_url: config.webhook.url(),
        }
    }

    /// 展示给用户、填入 TradingView 的 webhook 地址
    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    pub fn form(&self) -> &AlertFormState {
        self.builder.form()
    }

    pub fn errors(&self) -> &ValidationErrors {
        self.builder.errors()
    }

    pub fn last(&self) -> Option<&GeneratedAlert> {
        self.builder.last()
    }

    pub fn edit(&mut self, edit: FieldEdit) {
        self.builder.edit(edit);
    }

    pub fn submit(&mut self) -> Result<&GeneratedAlert, AlertError> {
        self.builder.submit()
    }

    pub fn reset(&mut self) {
        self.builder.reset();
        self.notices.dismiss();
    }

    /// # Summary
    /// 复制最近一次生成的告警文本。
    ///
    /// # Logic
    /// 1. 尚未生成任何告警时直接给出错误提示，不触碰剪贴板。
    /// 2. 否则写入剪贴板，并按结果显示成功或失败通知。
    pub async fn copy_alert(&mut self) -> Notification {
        let Some(text) = self.builder.last_message().map(str::to_owned) else {
            return self.notify(Notification::error(NOTHING_TO_COPY));
        };
        self.copy_text(&text, ALERT_COPIED).await
    }

    /// 复制 webhook 地址
    pub async fn copy_webhook_url(&mut self) -> Notification {
        let url = self.webhook_url.clone();
        self.copy_text(&url, URL_COPIED).await
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notices.current(self.clock.now())
    }

    pub fn dismiss_notification(&mut self) {
        self.notices.dismiss();
    }

    async fn copy_text(&mut self, text: &str, success_message: &str) -> Notification {
        match self.clipboard.copy(text).await {
            Ok(()) => {
                info!(bytes = text.len(), "Copied to clipboard");
                self.notify(Notification::success(success_message))
            }
            Err(e) => {
                warn!("Clipboard copy failed: {}", e);
                self.notify(Notification::error(COPY_FAILED))
            }
        }
    }

    fn notify(&mut self, notification: Notification) -> Notification {
        self.notices.show(notification.clone(), self.clock.now());
        notification
    }
}
