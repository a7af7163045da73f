//! Time helpers

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current calendar year (UTC)
pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Utc::now().year()
}

/// Format a `YYYY-MM-DD` date as `DD/MM/YYYY` for badge display.
///
/// Unparseable input is returned unchanged so a bad stored value never
/// breaks rendering.
pub fn format_badge_date(date: &str) -> String {
    match chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%d/%m/%Y").to_string(),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_day_month_year() {
        assert_eq!(format_badge_date("2024-01-15"), "15/01/2024");
        assert_eq!(format_badge_date("1999-12-03"), "03/12/1999");
    }

    #[test]
    fn passes_through_unparseable_dates() {
        assert_eq!(format_badge_date("soon"), "soon");
    }
}
