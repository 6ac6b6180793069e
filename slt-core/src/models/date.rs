use super::ValidationError;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// The only accepted textual representation of a calendar date.
pub const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse a `YYYY-MM-DD` calendar date.
///
/// Anything else, including a date with a time-of-day component or an
/// impossible day such as `2023-02-30`, is rejected rather than defaulted.
pub fn parse_date(text: &str) -> Result<Date, ValidationError> {
    Date::parse(text, ISO_DATE).map_err(|_| ValidationError::Date(text.to_owned()))
}

/// The signed number of whole days from `reference_date` to `expiration_date`.
///
/// Positive means the product has not expired yet, zero means it expires on
/// the reference date, and negative means it has already expired.
pub fn days_remaining(expiration_date: Date, reference_date: Date) -> i64 {
    (expiration_date - reference_date).whole_days()
}

#[cfg(feature = "schemars")]
pub(crate) fn date_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": "string",
        "format": "date",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2024-02-29"), Ok(date!(2024 - 02 - 29)));
        assert_eq!(parse_date("1999-12-31"), Ok(date!(1999 - 12 - 31)));
    }

    #[test]
    fn rejects_everything_else() {
        for text in [
            "",
            "today",
            "2023-02-29",
            "2024-13-01",
            "31/12/2024",
            "2024-01-05T00:00:00Z",
            " 2024-01-05",
        ] {
            assert_eq!(
                parse_date(text),
                Err(ValidationError::Date(text.to_owned())),
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn days_remaining_is_signed() {
        let today = date!(2024 - 03 - 01);
        assert_eq!(days_remaining(date!(2024 - 03 - 11), today), 10);
        assert_eq!(days_remaining(today, today), 0);
        assert_eq!(days_remaining(date!(2024 - 02 - 25), today), -5);
        assert_eq!(days_remaining(date!(2025 - 03 - 01), today), 365);
    }
}
