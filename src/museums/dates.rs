//! Sortable year extraction from free-text museum dates

use std::sync::LazyLock;

use regex::Regex;

/// First run of digits wins
static YEAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// "BC", "BCE", "B.C", "B.C.E." anywhere in the string, any case, including
/// directly after a digit ("300BC"). Not inside a word ("abc").
static BC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z])b\.?\s?c\.?(?:e\.?)?(?:$|[^a-z])").unwrap()
});

/// Extract a signed year from an unstructured date string.
///
/// The first integer token is the year; a BC marker anywhere in the string
/// negates it. Leading `-` characters are ignored ("1850-1800" is a range,
/// not a negative number).
///
/// ```text
/// "c. 1665"        -> Some(1665)
/// "1850-1800 bc"   -> Some(-1850)
/// "undated"        -> None
/// ```
pub fn extract_sortable_year(date: &str) -> Option<i32> {
    let token = YEAR_PATTERN.find(date)?;
    let year: i32 = token.as_str().parse().ok()?;
    if BC_PATTERN.is_match(date) {
        Some(-year)
    } else {
        Some(year)
    }
}

/// Sortable year for an optional date, falling back to a provider-supplied year.
pub(crate) fn sortable_year_or(date: Option<&str>, fallback: Option<i64>) -> Option<i32> {
    date.and_then(extract_sortable_year)
        .or_else(|| fallback.and_then(|y| i32::try_from(y).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_year() {
        assert_eq!(extract_sortable_year("1889"), Some(1889));
        assert_eq!(extract_sortable_year("c. 1665"), Some(1665));
        assert_eq!(extract_sortable_year("ca. 1500-1510"), Some(1500));
    }

    #[test]
    fn test_bc_range_negates_first_number() {
        assert_eq!(extract_sortable_year("1850-1800 bc"), Some(-1850));
        assert_eq!(extract_sortable_year("300 BC"), Some(-300));
        assert_eq!(extract_sortable_year("about 30 BCE"), Some(-30));
        assert_eq!(extract_sortable_year("664-332 B.C."), Some(-664));
    }

    #[test]
    fn test_bc_marker_attached_to_year() {
        assert_eq!(extract_sortable_year("300BC"), Some(-300));
        assert_eq!(extract_sortable_year("c.500bc"), Some(-500));
        assert_eq!(extract_sortable_year("300 B.C"), Some(-300));
        assert_eq!(extract_sortable_year("about 30 B.C.E."), Some(-30));
        assert_eq!(extract_sortable_year("44BCE"), Some(-44));
    }

    #[test]
    fn test_bc_inside_word_is_not_a_marker() {
        assert_eq!(extract_sortable_year("1920, abc studio"), Some(1920));
    }

    #[test]
    fn test_no_digits_is_absent() {
        assert_eq!(extract_sortable_year("undated"), None);
        assert_eq!(extract_sortable_year(""), None);
        assert_eq!(extract_sortable_year("Bronze Age BC"), None);
    }

    #[test]
    fn test_oversized_token_is_absent() {
        assert_eq!(extract_sortable_year("99999999999999"), None);
    }

    #[test]
    fn test_fallback_only_when_text_has_no_year() {
        assert_eq!(sortable_year_or(Some("1901"), Some(1800)), Some(1901));
        assert_eq!(sortable_year_or(Some("modern"), Some(1800)), Some(1800));
        assert_eq!(sortable_year_or(None, Some(-500)), Some(-500));
        assert_eq!(sortable_year_or(None, None), None);
    }
}
