//! Validation helpers for DTOs.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use validator::ValidationError;

/// `YYYY-MM-DD` format shared by daily seeds, record dates, and ranking queries.
const DAY_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Validates that a date string is a real calendar date in `YYYY-MM-DD` form.
///
/// # Examples
///
/// ```ignore
/// validate_day("2025-03-01") // Ok
/// validate_day("2025-3-1")   // Err - not zero padded
/// validate_day("2025-02-30") // Err - no such day
/// ```
pub fn validate_day(value: &str) -> Result<(), ValidationError> {
    if Date::parse(value, DAY_FORMAT).is_err() {
        let mut err = ValidationError::new("date_format");
        err.message = Some(format!("invalid date `{value}` (expected YYYY-MM-DD)").into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_day_valid() {
        assert!(validate_day("2025-03-01").is_ok());
        assert!(validate_day("2024-02-29").is_ok()); // leap day
        assert!(validate_day("1999-12-31").is_ok());
    }

    #[test]
    fn test_validate_day_invalid() {
        assert!(validate_day("2025-3-1").is_err()); // not padded
        assert!(validate_day("2025-02-30").is_err()); // no such day
        assert!(validate_day("03-01-2025").is_err()); // wrong order
        assert!(validate_day("yesterday").is_err());
        assert!(validate_day("").is_err());
    }
}
