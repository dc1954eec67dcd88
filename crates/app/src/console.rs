//! # 控制台表单
//!
//! 从标准输入逐行读取事件，驱动 [`WebhookSetup`]。
//! `action` 只接受 buy / sell，其余取值在这里就被拒绝，不会进入构建器。

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;
use viewzenix_alert::session::WebhookSetup;
use viewzenix_core::alert::entity::{FieldEdit, OrderAction};
use viewzenix_core::alert::error::AlertError;
use viewzenix_core::notify::entity::NotificationKind;

pub const HELP: &str = "\
Commands:
  <field>=<value>   set a field (symbol, order_id, action, contracts, price, comment)
  submit            validate and generate the alert message
  copy              copy the generated alert message
  url               show the webhook URL
  copy-url          copy the webhook URL
  show              show the form, errors and notification
  dismiss           dismiss the current notification
  reset             clear the form
  help              show this help
  quit              exit";

/// 控制台输入解析出的单个事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Edit(FieldEdit),
    Submit,
    Copy,
    Url,
    CopyUrl,
    Show,
    Dismiss,
    Reset,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Action must be buy or sell, got: {0}")]
    InvalidAction(String),
}

/// # Summary
/// 解析一行输入。
///
/// # Logic
/// 1. 含 `=` 的行视为字段编辑，`=` 左侧为字段名（忽略大小写与首尾空白），
///    右侧原样保留作为字段值。
/// 2. 其余行按命令名匹配。
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Some((field, value)) = line.split_once('=') {
        let value = value.to_string();
        let edit = match field.trim().to_lowercase().as_str() {
            "symbol" => FieldEdit::Symbol(value),
            "order_id" | "orderid" => FieldEdit::OrderId(value),
            "action" => FieldEdit::Action(
                value
                    .parse::<OrderAction>()
                    .map_err(|_| CommandError::InvalidAction(value.trim().to_string()))?,
            ),
            "contracts" => FieldEdit::Contracts(value),
            "price" => FieldEdit::Price(value),
            "comment" => FieldEdit::Comment(value),
            other => return Err(CommandError::UnknownField(other.to_string())),
        };
        return Ok(Some(Command::Edit(edit)));
    }

    let command = match trimmed.to_lowercase().as_str() {
        "submit" | "generate" => Command::Submit,
        "copy" => Command::Copy,
        "url" => Command::Url,
        "copy-url" => Command::CopyUrl,
        "show" => Command::Show,
        "dismiss" => Command::Dismiss,
        "reset" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

/// # Summary
/// 事件循环：读取一行、解析、交给会话处理、输出结果，直到 `quit` 或输入结束。
pub async fn run<R, W>(session: &mut WebhookSetup, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                write_line(&mut output, &e.to_string()).await?;
                continue;
            }
        };
        debug!(?command, "Console command");

        if command == Command::Quit {
            break;
        }
        let reply = handle(session, command).await;
        if !reply.is_empty() {
            write_line(&mut output, &reply).await?;
        }
    }
    output.flush().await
}

async fn handle(session: &mut WebhookSetup, command: Command) -> String {
    match command {
        Command::Edit(edit) => {
            session.edit(edit);
            String::new()
        }
        Command::Submit => match session.submit() {
            Ok(generated) => generated.message.clone(),
            Err(AlertError::Invalid(errors)) => errors
                .iter()
                .map(|(field, error)| format!("  {}: {}", field, error))
                .collect::<Vec<_>>()
                .join("\n"),
            Err(e) => e.to_string(),
        },
        Command::Copy => render_notice(&session.copy_alert().await),
        Command::CopyUrl => render_notice(&session.copy_webhook_url().await),
        Command::Url => session.webhook_url().to_string(),
        Command::Show => show(session),
        Command::Dismiss => {
            session.dismiss_notification();
            String::new()
        }
        Command::Reset => {
            session.reset();
            String::new()
        }
        Command::Help => HELP.to_string(),
        Command::Quit => String::new(),
    }
}

fn render_notice(notice: &viewzenix_core::notify::entity::Notification) -> String {
    match notice.kind {
        NotificationKind::Success => format!("[ok] {}", notice.message),
        NotificationKind::Error => format!("[error] {}", notice.message),
    }
}

fn show(session: &WebhookSetup) -> String {
    let form = session.form();
    let mut lines = vec![
        format!("symbol    = {}", form.symbol),
        format!("order_id  = {}", form.order_id),
        format!("action    = {}", form.action),
        format!("contracts = {}", form.contracts),
        format!("price     = {}", form.price),
        format!("comment   = {}", form.comment),
    ];
    for (field, error) in session.errors().iter() {
        lines.push(format!("  {}: {}", field, error));
    }
    if let Some(notice) = session.notification() {
        lines.push(render_notice(notice));
    }
    lines.join("\n")
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> std::io::Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use viewzenix_clipboard::memory::MemoryClipboard;
    use viewzenix_core::common::FakeClockProvider;
    use viewzenix_core::config::AppConfig;

    #[test]
    fn test_parse_field_edits_keep_raw_value() {
        assert_eq!(
            parse("symbol= BTCUSD ").unwrap(),
            Some(Command::Edit(FieldEdit::Symbol(" BTCUSD ".to_string())))
        );
        assert_eq!(
            parse("comment=a=b").unwrap(),
            Some(Command::Edit(FieldEdit::Comment("a=b".to_string())))
        );
        assert_eq!(
            parse("Action=SELL").unwrap(),
            Some(Command::Edit(FieldEdit::Action(OrderAction::Sell)))
        );
        assert_eq!(
            parse("contracts=").unwrap(),
            Some(Command::Edit(FieldEdit::Contracts(String::new())))
        );
    }

    #[test]
    fn test_parse_rejects_at_surface() {
        assert_eq!(
            parse("action=hold"),
            Err(CommandError::InvalidAction("hold".to_string()))
        );
        assert_eq!(parse("size=1"), Err(CommandError::UnknownField("size".to_string())));
        assert_eq!(parse("launch"), Err(CommandError::UnknownCommand("launch".to_string())));
        assert_eq!(parse("   "), Ok(None));
        assert_eq!(parse(" Copy-URL "), Ok(Some(Command::CopyUrl)));
    }

    #[tokio::test]
    async fn test_run_session_script() -> anyhow::Result<()> {
        let clock = Arc::new(FakeClockProvider::from_millis(1_713_746_400_000));
        let clipboard = Arc::new(MemoryClipboard::new());
        let mut session = WebhookSetup::new(&AppConfig::default(), clock, clipboard.clone());

        let script = "\
symbol=ETH
price=10
submit
contracts=2
submit
copy
action=hold
quit
symbol=ignored
";
        let mut output = Vec::new();
        run(&mut session, script.as_bytes(), &mut output).await?;
        let output = String::from_utf8(output)?;

        assert!(output.contains("  contracts: Contracts/shares is required"));
        assert!(output.contains("\"strategy_order_contracts\": 2,"));
        assert!(output.contains("[ok] Alert message copied to clipboard!"));
        assert!(output.contains("Action must be buy or sell, got: hold"));
        assert_eq!(session.form().symbol, "ETH");

        let copied = clipboard.latest().await.unwrap_or_default();
        assert!(copied.contains("\"symbol\": \"ETH\""));
        Ok(())
    }
}
