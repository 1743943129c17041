// src/services/date.rs

//! Date token normalization and range parsing.
//!
//! Calendar entries come as `02.20(금)` or `02.02(월) ~ 02.27(금)`. The
//! normalizer reduces them to `02.20` / `02.02~02.27`; the parser turns that
//! into a pair of dates under a caller-supplied year.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::DateParseError;

/// Canonical range separator produced by [`normalize_token`].
pub const RANGE_SEPARATOR: char = '~';

/// A parenthesized single-character day-of-week marker, e.g. `(금)`.
static DAY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*[\p{Hangul}\p{Han}]\s*\)").unwrap());

static DIGIT_DOT_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d\.\d").unwrap());

static MONTH_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})\.(\d{1,2})$").unwrap());

/// Strip day-of-week markers and whitespace, and unify the range separator.
///
/// Never fails; garbage in yields garbage out for the parser to reject.
pub fn normalize_token(raw: &str) -> String {
    DAY_MARKER
        .replace_all(raw, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '-' { RANGE_SEPARATOR } else { c })
        .collect()
}

/// Parse a normalized token into an inclusive `(start, end)` range.
///
/// The same `year` is applied to both halves; no rollover is inferred, so a
/// range crossing New Year is rejected as [`DateParseError::Inverted`].
pub fn parse_range(token: &str, year: i32) -> Result<(NaiveDate, NaiveDate), DateParseError> {
    if token.trim().is_empty() {
        return Err(DateParseError::Empty);
    }
    if !DIGIT_DOT_DIGIT.is_match(token) {
        return Err(DateParseError::NoDate(token.to_string()));
    }

    let halves: Vec<&str> = token.split(RANGE_SEPARATOR).collect();
    let (start, end) = match halves.as_slice() {
        [single] => {
            let date = parse_month_day(single, year)?;
            (date, date)
        }
        [left, right] => (parse_month_day(left, year)?, parse_month_day(right, year)?),
        _ => return Err(DateParseError::Malformed(token.to_string())),
    };

    if start > end {
        return Err(DateParseError::Inverted { start, end });
    }
    Ok((start, end))
}

/// Normalize then parse a raw date token.
pub fn parse_raw(raw: &str, year: i32) -> Result<(NaiveDate, NaiveDate), DateParseError> {
    parse_range(&normalize_token(raw), year)
}

fn parse_month_day(half: &str, year: i32) -> Result<NaiveDate, DateParseError> {
    let half = half.trim();
    if half.is_empty() {
        return Err(DateParseError::Empty);
    }
    let caps = MONTH_DAY
        .captures(half)
        .ok_or_else(|| DateParseError::Malformed(half.to_string()))?;

    // At most two digits each, so these cannot overflow.
    let month: u32 = caps[1].parse().unwrap_or(0);
    let day: u32 = caps[2].parse().unwrap_or(0);

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(DateParseError::OutOfRange { year, month, day })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_normalize_single() {
        assert_eq!(normalize_token("02.20(금)"), "02.20");
        assert_eq!(normalize_token("  02.20 ( 금 ) "), "02.20");
    }

    #[test]
    fn test_normalize_range() {
        assert_eq!(normalize_token("02.02(월) ~ 02.27(금)"), "02.02~02.27");
        assert_eq!(normalize_token("02.02(월)-02.27(금)"), "02.02~02.27");
    }

    #[test]
    fn test_normalize_keeps_other_parentheses() {
        // Only single-character day markers are stripped.
        assert_eq!(normalize_token("03.02(월요일)"), "03.02(월요일)");
    }

    #[test]
    fn test_parse_single_date() {
        assert_eq!(
            parse_raw("02.20(금)", 2026),
            Ok((date(2026, 2, 20), date(2026, 2, 20)))
        );
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(
            parse_raw("02.02(월) ~ 02.27(금)", 2026),
            Ok((date(2026, 2, 2), date(2026, 2, 27)))
        );
    }

    #[test]
    fn test_parse_single_digit_parts() {
        assert_eq!(
            parse_range("3.2~3.9", 2026),
            Ok((date(2026, 3, 2), date(2026, 3, 9)))
        );
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(parse_range("", 2026), Err(DateParseError::Empty));
        assert_eq!(parse_range("02.20~", 2026), Err(DateParseError::Empty));
        assert_eq!(parse_range("~02.20", 2026), Err(DateParseError::Empty));
    }

    #[test]
    fn test_parse_rejects_missing_date() {
        assert!(matches!(
            parse_range("개강", 2026),
            Err(DateParseError::NoDate(_))
        ));
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(
            parse_range("02.32", 2026),
            Err(DateParseError::OutOfRange {
                year: 2026,
                month: 2,
                day: 32
            })
        );
        assert!(matches!(
            parse_range("13.01", 2026),
            Err(DateParseError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_range("02.29", 2026),
            Err(DateParseError::OutOfRange { .. })
        ));
        assert!(parse_range("02.29", 2028).is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            parse_range("02.20~02.21~02.22", 2026),
            Err(DateParseError::Malformed(_))
        ));
        assert!(matches!(
            parse_range("2026.02.20", 2026),
            Err(DateParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_rejects_year_boundary_range() {
        assert!(matches!(
            parse_range("12.28~01.03", 2026),
            Err(DateParseError::Inverted { .. })
        ));
    }

    #[test]
    fn test_start_never_after_end() {
        for token in ["01.01", "01.01~01.01", "01.01~12.31", "06.15~06.16"] {
            let (start, end) = parse_range(token, 2026).unwrap();
            assert!(start <= end, "{token}");
        }
    }
}
