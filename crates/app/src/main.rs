use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use viewzenix_alert::session::WebhookSetup;
use viewzenix_clipboard::file::FileClipboard;
use viewzenix_clipboard::stdout::StdoutClipboard;
use viewzenix_clipboard::telegram::TelegramClipboard;
use viewzenix_core::clipboard::error::ClipboardError;
use viewzenix_core::clipboard::port::ClipboardSink;
use viewzenix_core::common::RealTimeProvider;
use viewzenix_core::config::{ClipboardConfig, LogConfig, SinkKind};

mod console;
mod settings;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
///
/// # Logic
/// 1. 加载配置（第一个命令行参数可指定配置文件）。
/// 2. 初始化全局日志，日志统一输出到 stderr，避免混入复制内容。
/// 3. 按配置实例化剪贴板接收端。
/// 4. 构造设置页会话并进入标准输入事件循环。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载配置
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = settings::load(config_path.as_deref())?;

    // 2. 初始化日志
    let _log_guard = init_logging(&config.log);
    info!("Viewzenix alert builder starting...");

    // 3. 实例化基础设施层
    let clipboard = build_clipboard(&config.clipboard)?;
    let clock = Arc::new(RealTimeProvider);

    // 4. 构造会话并运行
    let mut session = WebhookSetup::new(&config, clock, clipboard);
    println!("Webhook URL: {}", session.webhook_url());
    println!("{}", console::HELP);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    console::run(&mut session, stdin, tokio::io::stdout()).await?;

    info!("Input closed. Exiting...");
    Ok(())
}

/// # Logic
/// `RUST_LOG` 优先，其次为配置中的级别；配置了目录时额外按天滚动写文件。
/// 返回的 guard 必须存活到进程结束，否则文件日志会丢失尾部。
fn init_logging(log: &LogConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));

    let (file_layer, guard) = match &log.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "viewzenix.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

fn build_clipboard(config: &ClipboardConfig) -> Result<Arc<dyn ClipboardSink>, ClipboardError> {
    let sink: Arc<dyn ClipboardSink> = match config.sink {
        SinkKind::Stdout => Arc::new(StdoutClipboard),
        SinkKind::File => {
            let path = config
                .path
                .as_deref()
                .ok_or_else(|| ClipboardError::Config("clipboard.path is required for the file sink".into()))?;
            Arc::new(FileClipboard::new(path))
        }
        SinkKind::Telegram => {
            let token = config.telegram_bot_token.clone().ok_or_else(|| {
                ClipboardError::Config("clipboard.telegram_bot_token is required".into())
            })?;
            let chat_id = config.telegram_chat_id.clone().ok_or_else(|| {
                ClipboardError::Config("clipboard.telegram_chat_id is required".into())
            })?;
            Arc::new(TelegramClipboard::new(token, chat_id))
        }
    };
    info!(sink = ?config.sink, "Clipboard sink ready");
    Ok(sink)
}
