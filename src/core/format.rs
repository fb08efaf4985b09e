//! Dutch display formatting: `.` groups thousands, `,` separates decimals.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const THOUSANDS_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';
pub const DATE_DISPLAY_FORMAT: &str = "%d-%m-%Y";

/// 四捨五入（遠離零）到固定小數位並加上千分位
pub fn format_number(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let scaled = pre_round(value.abs() * scale).round();
    let negative = value < 0.0 && scaled > 0.0;

    let digits = format!("{:.0}", scaled);
    let digits = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals - digits.len() + 1), digits)
    } else {
        digits
    };
    let (int_part, frac_part) = digits.split_at(digits.len() - decimals);

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(ch);
    }
    if decimals > 0 {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(frac_part);
    }
    out
}

// 先取 15 位有效數字，1.005 * 100 = 100.49999… 才會進位到 101
fn pre_round(value: f64) -> f64 {
    format!("{:.14e}", value).parse().unwrap_or(value)
}

pub fn format_with_unit(value: f64, decimals: usize, unit: &str) -> String {
    format!("{}{}", format_number(value, decimals), unit)
}

/// 解析 registry 日期；沒有時區的時間視為 UTC
pub fn parse_registry_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    for fmt in ["%Y-%m-%d", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|naive| Utc.from_utc_datetime(&naive));
        }
    }

    None
}

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format(DATE_DISPLAY_FORMAT).to_string()
}

/// 無法解析的日期直接省略
pub fn format_registry_date(raw: Option<&str>) -> Option<String> {
    raw.and_then(parse_registry_datetime).map(|dt| format_date(&dt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1000.0, 0), "1.000");
        assert_eq!(format_number(60000.0, 0), "60.000");
        assert_eq!(format_number(1234567.0, 0), "1.234.567");
    }

    #[test]
    fn test_format_number_decimals() {
        assert_eq!(format_number(1234.5, 2), "1.234,50");
        assert_eq!(format_number(0.25, 1), "0,3");
        assert_eq!(format_number(0.05, 2), "0,05");
        assert_eq!(format_number(1.25, 1), "1,3");
        assert_eq!(format_number(2.5, 0), "3");
        assert_eq!(format_number(87.0, 1), "87,0");
    }

    #[test]
    fn test_format_number_binary_halves_round_up() {
        assert_eq!(format_number(1.005, 2), "1,01");
        assert_eq!(format_number(0.285, 2), "0,29");
        assert_eq!(format_number(1234.565, 2), "1.234,57");
        assert_eq!(format_number(2345.678, 2), "2.345,68");
        assert_eq!(format_number(1.004, 2), "1,00");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-1500.4, 0), "-1.500");
        assert_eq!(format_number(-0.004, 2), "0,00");
    }

    #[test]
    fn test_parse_registry_datetime_variants() {
        let expected = Utc.with_ymd_and_hms(2031, 5, 12, 0, 0, 0).unwrap();
        assert_eq!(parse_registry_datetime("2031-05-12"), Some(expected));
        assert_eq!(parse_registry_datetime("2031-05-12T00:00:00"), Some(expected));
        assert_eq!(parse_registry_datetime("2031-05-12T00:00:00Z"), Some(expected));
        assert_eq!(parse_registry_datetime("2031-05-12T02:00:00+02:00"), Some(expected));
        assert_eq!(parse_registry_datetime("12-05-2031"), Some(expected));
        assert_eq!(parse_registry_datetime("not a date"), None);
        assert_eq!(parse_registry_datetime(""), None);
    }

    #[test]
    fn test_format_registry_date() {
        assert_eq!(
            format_registry_date(Some("2021-03-04T10:15:00")),
            Some("04-03-2021".to_string())
        );
        assert_eq!(format_registry_date(Some("garbage")), None);
        assert_eq!(format_registry_date(None), None);
    }
}
