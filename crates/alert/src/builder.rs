use crate::validate::{check, validate};
use std::sync::Arc;
use tracing::{debug, info, warn};
use viewzenix_core::alert::entity::{AlertFormState, AlertPayload, FieldEdit, ValidationErrors};
use viewzenix_core::alert::error::AlertError;
use viewzenix_core::common::TimeProvider;
use viewzenix_core::config::FormConfig;

/// # Summary
/// 由合法表单生成告警。
///
/// # Logic
/// 1. 经 [`check`] 校验并解析数值，存在任何错误即返回 `AlertError::Invalid`。
/// 2. 字符串字段原样拷贝（去空白只用于判空，不作用于最终值）。
/// 3. 数量与价格使用解析后的数值，`time` 使用调用方传入的毫秒时间戳。
pub fn generate(state: &AlertFormState, now_ms: i64) -> Result<AlertPayload, AlertError> {
    let numbers = check(state).map_err(AlertError::Invalid)?;

    Ok(AlertPayload {
        symbol: state.symbol.clone(),
        strategy_order_id: state.order_id.clone(),
        strategy_order_action: state.action,
        strategy_order_contracts: numbers.contracts,
        strategy_order_price: numbers.price,
        strategy_order_comment: state.comment.clone(),
        time: now_ms,
    })
}

/// # Summary
/// 以两空格缩进的多行 JSON 输出告警，键顺序固定。
pub fn render(payload: &AlertPayload) -> Result<String, AlertError> {
    Ok(serde_json::to_string_pretty(payload)?)
}

/// 一次成功提交的结果：告警本体及其序列化文本
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedAlert {
    pub payload: AlertPayload,
    pub message: String,
}

/// # Summary
/// 有状态的告警构建器，持有表单草稿、当前错误集合与最近一次生成的告警。
///
/// # Invariants
/// - 错误集合非空时绝不序列化。
/// - 提交失败不会改动上一次成功生成的告警。
/// - 同一构建器签发的 `time` 单调不减，即使外部时钟回拨。
pub struct AlertMessageBuilder {
    clock: Arc<dyn TimeProvider>,
    defaults: FormConfig,
    form: AlertFormState,
    errors: ValidationErrors,
    last: Option<GeneratedAlert>,
    last_time: i64,
}

impl AlertMessageBuilder {
    pub fn new(clock: Arc<dyn TimeProvider>, defaults: FormConfig) -> Self {
        let form = AlertFormState::with_defaults(defaults.order_id.clone(), defaults.action);
        Self {
            clock,
            defaults,
            form,
            errors: ValidationErrors::new(),
            last: None,
            last_time: i64::MIN,
        }
    }

    pub fn form(&self) -> &AlertFormState {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn last(&self) -> Option<&GeneratedAlert> {
        self.last.as_ref()
    }

    pub fn last_payload(&self) -> Option<&AlertPayload> {
        self.last.as_ref().map(|g| &g.payload)
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last.as_ref().map(|g| g.message.as_str())
    }

    /// # Summary
    /// 写入一次字段编辑。
    ///
    /// # Logic
    /// 若该字段当前带有错误，立即移除它（且只移除它），不论新值是否合法；
    /// 真正的重新校验留到下一次提交。
    pub fn edit(&mut self, edit: FieldEdit) {
        let field = edit.validated_field();
        debug!(field = edit.field_name(), "Alert form edited");

        self.form.apply(edit);

        if let Some(field) = field
            && self.errors.clear(field)
        {
            debug!(%field, "Cleared stale validation error");
        }
    }

    /// # Summary
    /// 提交表单。
    ///
    /// # Logic
    /// 1. 重新计算并整体替换错误集合。
    /// 2. 有错误时返回 `AlertError::Invalid`，保留上一次的告警。
    /// 3. 否则取当前时间（不早于上一次签发的时间）生成并序列化新告警。
    pub fn submit(&mut self) -> Result<&GeneratedAlert, AlertError> {
        self.errors = validate(&self.form);
        if !self.errors.is_empty() {
            warn!(errors = %self.errors, "Alert submission rejected");
            return Err(AlertError::Invalid(self.errors.clone()));
        }

        let now_ms = self.clock.now_ms().max(self.last_time);
        let payload = generate(&self.form, now_ms)?;
        let message = render(&payload)?;

        info!(
            symbol = %payload.symbol,
            action = %payload.strategy_order_action,
            time = payload.time,
            "Alert message generated"
        );

        self.last_time = now_ms;
        Ok(self.last.insert(GeneratedAlert { payload, message }))
    }

    /// 恢复到刚打开页面时的状态
    pub fn reset(&mut self) {
        self.form = AlertFormState::with_defaults(self.defaults.order_id.clone(), self.defaults.action);
        self.errors = ValidationErrors::new();
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewzenix_core::alert::entity::OrderAction;

    fn reference_form() -> AlertFormState {
        AlertFormState {
            symbol: "BTCUSD".to_string(),
            order_id: "long".to_string(),
            action: OrderAction::Buy,
            contracts: "0.05".to_string(),
            price: "64340.15".to_string(),
            comment: "Breakout".to_string(),
        }
    }

    #[test]
    fn test_generate_copies_strings_verbatim() {
        let mut state = reference_form();
        state.symbol = " BTCUSD ".to_string();
        state.comment = String::new();

        let payload = generate(&state, 42).unwrap();
        assert_eq!(payload.symbol, " BTCUSD ");
        assert_eq!(payload.strategy_order_comment, "");
        assert_eq!(payload.time, 42);
    }

    #[test]
    fn test_generate_uses_leading_number_prefix() {
        let mut state = reference_form();
        state.contracts = "2 lots".to_string();

        let payload = generate(&state, 0).unwrap();
        assert_eq!(payload.strategy_order_contracts, 2.0);
    }

    #[test]
    fn test_generate_rejects_invalid_state() {
        let mut state = reference_form();
        state.price = "0".to_string();

        match generate(&state, 0) {
            Err(AlertError::Invalid(errors)) => assert_eq!(errors.len(), 1),
            other => panic!("expected invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_render_keeps_key_order_and_empty_values() {
        let mut state = reference_form();
        state.comment = String::new();
        let text = render(&generate(&state, 7).unwrap()).unwrap();

        let keys: Vec<usize> = [
            "\"symbol\"",
            "\"strategy_order_id\"",
            "\"strategy_order_action\"",
            "\"strategy_order_contracts\"",
            "\"strategy_order_price\"",
            "\"strategy_order_comment\"",
            "\"time\"",
        ]
        .iter()
        .map(|k| text.find(k).unwrap())
        .collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        assert!(text.contains("\"strategy_order_comment\": \"\""));
    }
}
