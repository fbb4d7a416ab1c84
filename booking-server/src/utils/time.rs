//! 时间工具函数
//!
//! 日期解析统一在 API handler 层完成，repository 层只接收
//! `YYYY-MM-DD` 字符串和 `i64` Unix millis。

use chrono::NaiveDate;

use crate::utils::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 验证日期不在过去 (预订日期必须是今天或未来)
pub fn validate_not_past(date: NaiveDate) -> AppResult<()> {
    let today = chrono::Utc::now().date_naive();
    if date < today {
        return Err(AppError::validation(format!(
            "Date {} is in the past (today is {})",
            date, today
        )));
    }
    Ok(())
}

/// 规范化日期字符串：解析后重新格式化，消除 `2026-1-5` 之类的变体
pub fn canonical_date(date: &str) -> AppResult<String> {
    Ok(parse_date(date)?.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert!(parse_date("2026-09-01").is_ok());
        assert!(parse_date("01/09/2026").is_err());
        assert!(parse_date("2026-13-01").is_err());
    }

    #[test]
    fn canonicalizes_loose_dates() {
        assert_eq!(canonical_date("2026-9-1").unwrap(), "2026-09-01");
    }

    #[test]
    fn rejects_past_dates() {
        assert!(validate_not_past(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()).is_err());
        let future = chrono::Utc::now().date_naive() + chrono::Days::new(30);
        assert!(validate_not_past(future).is_ok());
    }
}
