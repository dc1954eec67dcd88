use crate::numeric::positive_number;
use viewzenix_core::alert::entity::{AlertFormState, FieldError, ValidatedField, ValidationErrors};

/// 校验通过后解析出的数值
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckedNumbers {
    pub contracts: f64,
    pub price: f64,
}

/// # Summary
/// 逐字段校验表单，返回完整的错误集合。
///
/// # Logic
/// 各字段相互独立，不存在跨字段规则：
/// 1. `symbol` 去除首尾空白后为空则报错。
/// 2. `contracts` / `price` 为空报 "必填"，否则交给 [`positive_number`] 判定。
/// 3. `order_id`、`action`、`comment` 从不报错。
///
/// # Returns
/// * 只包含无效字段的错误集合；为空表示校验通过。
pub fn validate(state: &AlertFormState) -> ValidationErrors {
    check(state).err().unwrap_or_default()
}

/// # Summary
/// 校验与解析的单一路径：[`validate`] 和告警生成都经由此函数，
/// 保证二者对同一输入的接受结果完全一致。
pub fn check(state: &AlertFormState) -> Result<CheckedNumbers, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if state.symbol.trim().is_empty() {
        errors.insert(ValidatedField::Symbol, FieldError::SymbolRequired);
    }

    let contracts = numeric_field(&state.contracts, FieldError::ContractsRequired);
    if let Err(e) = contracts {
        errors.insert(ValidatedField::Contracts, e);
    }

    let price = numeric_field(&state.price, FieldError::PriceRequired);
    if let Err(e) = price {
        errors.insert(ValidatedField::Price, e);
    }

    match (contracts, price) {
        (Ok(contracts), Ok(price)) if errors.is_empty() => Ok(CheckedNumbers { contracts, price }),
        _ => Err(errors),
    }
}

fn numeric_field(raw: &str, when_empty: FieldError) -> Result<f64, FieldError> {
    if raw.trim().is_empty() {
        return Err(when_empty);
    }
    positive_number(raw).ok_or(FieldError::NotPositive)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(symbol: &str, contracts: &str, price: &str) -> AlertFormState {
        AlertFormState {
            symbol: symbol.to_string(),
            contracts: contracts.to_string(),
            price: price.to_string(),
            ..AlertFormState::default()
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        let errors = validate(&form("BTCUSD", "0.05", "64340.15"));
        assert!(errors.is_empty());

        let numbers = check(&form("BTCUSD", "0.05", "64340.15")).unwrap();
        assert_eq!(numbers.contracts, 0.05);
        assert_eq!(numbers.price, 64340.15);
    }

    #[test]
    fn test_blank_fields_flag_only_themselves() {
        let errors = validate(&form("   ", "1", "2"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(ValidatedField::Symbol), Some(FieldError::SymbolRequired));

        let errors = validate(&form("ETH", "", "10"));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(ValidatedField::Contracts).map(|e| e.to_string()),
            Some("Contracts/shares is required".to_string())
        );

        let errors = validate(&form("ETH", "1", "\t"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(ValidatedField::Price), Some(FieldError::PriceRequired));
    }

    #[test]
    fn test_non_positive_numbers_rejected() {
        for bad in ["abc", "0", "-5"] {
            let errors = validate(&form("ETH", bad, bad));
            assert_eq!(errors.len(), 2, "input {bad:?}");
            assert_eq!(errors.get(ValidatedField::Contracts), Some(FieldError::NotPositive));
            assert_eq!(errors.get(ValidatedField::Price), Some(FieldError::NotPositive));
            assert_eq!(
                errors.get(ValidatedField::Price).map(|e| e.to_string()),
                Some("Must be a positive number".to_string())
            );
        }
    }

    #[test]
    fn test_all_three_invalid_at_once() {
        let errors = validate(&form("", "", "-1"));
        assert_eq!(errors.len(), 3);
        assert!(check(&form("", "", "-1")).is_err());
    }

    #[test]
    fn test_unvalidated_fields_never_error() {
        let mut state = form("ETH", "1", "1");
        state.order_id = String::new();
        state.comment = "   ".to_string();
        assert!(validate(&state).is_empty());
    }
}
