/// # Summary
/// 按 "解析前导浮点数" 的规则读取文本中的数值。
///
/// # Logic
/// 1. 跳过开头的空白字符。
/// 2. 可选的正负号之后，要么是 `Infinity`，要么是十进制字面量
///    (`digits[.digits]` 或 `.digits`)。
/// 3. 指数部分 `e[+-]digits` 只有在至少跟一个数字时才算入。
/// 4. 最长数值前缀之后的内容全部忽略。
///
/// # Returns
/// * 没有任何数值前缀时返回 `None`。
pub fn parse_leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let bytes = s.as_bytes();
    let mut i = 0;

    let negative = matches!(bytes.first(), Some(b'-'));
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i = 1;
    }

    if s[i..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = count_digits(&bytes[i + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    s[..i].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// # Summary
/// 校验与生成共用的数值原语：解析后必须是有限且严格大于零的数。
///
/// # Invariants
/// - 这是判断数量/价格是否合法的唯一入口，校验与生成不会出现不同的接受结果。
pub fn positive_number(raw: &str) -> Option<f64> {
    parse_leading_float(raw).filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_decimals() {
        assert_eq!(parse_leading_float("0.05"), Some(0.05));
        assert_eq!(parse_leading_float("64340.15"), Some(64340.15));
        assert_eq!(parse_leading_float("-5"), Some(-5.0));
        assert_eq!(parse_leading_float("+7"), Some(7.0));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("5."), Some(5.0));
    }

    #[test]
    fn test_leading_prefix_only() {
        assert_eq!(parse_leading_float("  12abc"), Some(12.0));
        assert_eq!(parse_leading_float("2.5.1"), Some(2.5));
        assert_eq!(parse_leading_float("1e3x"), Some(1000.0));
        assert_eq!(parse_leading_float("2e"), Some(2.0));
        assert_eq!(parse_leading_float("2e+"), Some(2.0));
        assert_eq!(parse_leading_float("1.5E-2"), Some(0.015));
    }

    #[test]
    fn test_no_numeric_prefix() {
        assert_eq!(parse_leading_float("abc"), None);
        assert_eq!(parse_leading_float(""), None);
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float("-"), None);
        assert_eq!(parse_leading_float("e5"), None);
        assert_eq!(parse_leading_float("inf"), None);
        assert_eq!(parse_leading_float("NaN"), None);
    }

    #[test]
    fn test_infinity_literal() {
        assert_eq!(parse_leading_float("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_leading_float("-Infinityx"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_positive_number() {
        assert_eq!(positive_number("0.05"), Some(0.05));
        assert_eq!(positive_number("10 shares"), Some(10.0));
        assert_eq!(positive_number("0"), None);
        assert_eq!(positive_number("-0"), None);
        assert_eq!(positive_number("-5"), None);
        assert_eq!(positive_number("abc"), None);
        assert_eq!(positive_number("Infinity"), None);
        assert_eq!(positive_number("1e400"), None);
    }
}
