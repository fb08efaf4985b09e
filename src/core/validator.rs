use crate::domain::model::Query;
use crate::utils::error::{Field, FieldError};
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_HOUSE_NUMBER: u32 = 1;
pub const MAX_HOUSE_NUMBER: u32 = 99_999;
pub const MAX_SUFFIX_CHARS: usize = 10;

static POSTCODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{4}[A-Z]{2}$").unwrap());
static STARTS_WITH_DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{4}").unwrap());
static ENDS_WITH_LETTERS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]{2}$").unwrap());

/// 驗證並正規化表單欄位。只回報第一個失敗的檢查。
///
/// 前端可先呼叫同一函式做即時提示，但伺服器端一定要重新驗證。
pub fn validate(
    postcode_raw: &str,
    house_number_raw: &str,
    suffix_raw: &str,
) -> Result<Query, FieldError> {
    let postcode = normalize_postcode(postcode_raw)?;
    let house_number = parse_house_number(house_number_raw)?;
    let suffix = normalize_suffix(suffix_raw);

    Ok(Query::new(postcode, house_number, suffix))
}

/// 去除所有空白並轉大寫。長度檢查一定在格式檢查之前。
pub fn normalize_postcode(raw: &str) -> Result<String, FieldError> {
    let clean: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    if clean.is_empty() {
        return Err(FieldError::EmptyField(Field::Postcode));
    }

    let len = clean.chars().count();
    if len < 6 {
        return Err(FieldError::TooShort);
    }
    if len > 6 {
        return Err(FieldError::TooLong);
    }

    if !POSTCODE_RE.is_match(&clean) {
        if !STARTS_WITH_DIGITS_RE.is_match(&clean) {
            return Err(FieldError::MustStartWithDigits);
        }
        if !ENDS_WITH_LETTERS_RE.is_match(&clean) {
            return Err(FieldError::MustEndWithLetters);
        }
        return Err(FieldError::InvalidFormat);
    }

    Ok(clean)
}

/// 檢查順序：必填 → 下限 → 上限 → 整數
pub fn parse_house_number(raw: &str) -> Result<u32, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::EmptyField(Field::HouseNumber));
    }

    // 無法解析的輸入當成非整數
    let value = match trimmed.parse::<f64>() {
        Ok(v) if !v.is_nan() => v,
        _ => return Err(FieldError::NotInteger),
    };

    if value < MIN_HOUSE_NUMBER as f64 {
        return Err(FieldError::TooSmall);
    }
    if value > MAX_HOUSE_NUMBER as f64 {
        return Err(FieldError::TooLarge);
    }
    if value.floor() != value {
        return Err(FieldError::NotInteger);
    }

    Ok(value as u32)
}

/// 選填；去除前後空白，最多 10 個字元
pub fn normalize_suffix(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_SUFFIX_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_postcodes() {
        let q = validate("1234AB", "10", "").unwrap();
        assert_eq!(q.postcode(), "1234AB");

        let q = validate("1234ab", "10", "").unwrap();
        assert_eq!(q.postcode(), "1234AB");

        let q = validate(" 1234 ab ", "10", "").unwrap();
        assert_eq!(q.postcode(), "1234AB");
    }

    #[test]
    fn test_postcode_length_checked_before_pattern() {
        assert_eq!(normalize_postcode("12A"), Err(FieldError::TooShort));
        assert_eq!(normalize_postcode("ABCDE"), Err(FieldError::TooShort));
        assert_eq!(normalize_postcode("1234ABC"), Err(FieldError::TooLong));
        assert_eq!(normalize_postcode("ABCDEFGH"), Err(FieldError::TooLong));
        assert_eq!(normalize_postcode("   "), Err(FieldError::EmptyField(Field::Postcode)));
        assert_eq!(normalize_postcode(""), Err(FieldError::EmptyField(Field::Postcode)));
    }

    #[test]
    fn test_postcode_pattern_diagnostics() {
        assert_eq!(normalize_postcode("12345B"), Err(FieldError::MustEndWithLetters));
        assert_eq!(normalize_postcode("AB1234"), Err(FieldError::MustStartWithDigits));
        // 兩者都錯時先報告數字
        assert_eq!(normalize_postcode("A234B5"), Err(FieldError::MustStartWithDigits));
        assert_eq!(normalize_postcode("1234A!"), Err(FieldError::MustEndWithLetters));
    }

    #[test]
    fn test_house_number_checks_in_order() {
        assert_eq!(
            parse_house_number(""),
            Err(FieldError::EmptyField(Field::HouseNumber))
        );
        assert_eq!(parse_house_number("0"), Err(FieldError::TooSmall));
        assert_eq!(parse_house_number("-3"), Err(FieldError::TooSmall));
        assert_eq!(parse_house_number("100000"), Err(FieldError::TooLarge));
        assert_eq!(parse_house_number("12.5"), Err(FieldError::NotInteger));
        assert_eq!(parse_house_number("abc"), Err(FieldError::NotInteger));
        // 小數且小於下限時只報告下限
        assert_eq!(parse_house_number("0.5"), Err(FieldError::TooSmall));
        // 小數且大於上限時只報告上限
        assert_eq!(parse_house_number("100000.5"), Err(FieldError::TooLarge));
        assert_eq!(parse_house_number("99999"), Ok(99_999));
        assert_eq!(parse_house_number(" 1 "), Ok(1));
        assert_eq!(parse_house_number("12.0"), Ok(12));
    }

    #[test]
    fn test_postcode_error_wins_over_house_number_error() {
        assert_eq!(validate("12", "", ""), Err(FieldError::TooShort));
    }

    #[test]
    fn test_suffix_trimmed_and_truncated() {
        assert_eq!(normalize_suffix("  "), None);
        assert_eq!(normalize_suffix(" hoog "), Some("hoog".to_string()));
        assert_eq!(
            normalize_suffix("ABCDEFGHIJKLMN"),
            Some("ABCDEFGHIJ".to_string())
        );

        let q = validate("1234AB", "5", " II ").unwrap();
        assert_eq!(q.suffix(), Some("II"));
        assert_eq!(q.to_string(), "1234AB 5 II");
    }
}
