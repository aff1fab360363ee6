use jiff::civil::Date;

/// Format an API date such as `"2024-01-05"` as `"January 05, 2024"`.
///
/// Only the leading `YYYY-MM-DD` is read, so `"2024-01-06 10:15:02"` formats the
/// same way. Anything unparseable is returned unchanged.
pub fn format_detail_date(input: &str) -> String {
    let head = input.trim().get(..10).unwrap_or(input);
    match Date::strptime("%Y-%m-%d", head) {
        Ok(date) => date.strftime("%B %d, %Y").to_string(),
        Err(_) => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::format_detail_date;

    #[test]
    fn formats_plain_date() {
        assert_eq!(format_detail_date("2024-01-05"), "January 05, 2024");
        assert_eq!(format_detail_date("2023-12-31"), "December 31, 2023");
    }

    #[test]
    fn ignores_trailing_time() {
        assert_eq!(format_detail_date("2024-01-06 10:15:02"), "January 06, 2024");
    }

    #[test]
    fn returns_input_when_unparseable() {
        assert_eq!(format_detail_date(""), "");
        assert_eq!(format_detail_date("yesterday"), "yesterday");
        assert_eq!(format_detail_date("2024-13-45"), "2024-13-45");
    }
}
