//! Parsing for the month query parameter shared by the dashboard routes.

use time::Month;

use crate::Error;

/// Parse the `month` query parameter shared by the dashboard routes.
///
/// The parameter is required, a request without one is a client error rather
/// than an unfiltered query.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingMonth] if `value` is `None`,
/// - or [Error::InvalidMonth] if the value does not map to a calendar month.
pub fn parse_month_param(value: Option<&str>) -> Result<Month, Error> {
    match value {
        Some(month) => parse_month(month),
        None => Err(Error::MissingMonth),
    }
}

/// Parse a month query value into a calendar month.
///
/// Accepts full English month names in any casing (e.g. "March", "march") and
/// the numbers 1 to 12.
///
/// # Errors
/// This function will return an [Error::InvalidMonth] if `value` is anything
/// else.
pub fn parse_month(value: &str) -> Result<Month, Error> {
    let normalized = value.trim();

    if let Ok(number) = normalized.parse::<u8>() {
        return Month::try_from(number).map_err(|_| Error::InvalidMonth(value.to_string()));
    }

    match normalized.to_ascii_lowercase().as_str() {
        "january" => Ok(Month::January),
        "february" => Ok(Month::February),
        "march" => Ok(Month::March),
        "april" => Ok(Month::April),
        "may" => Ok(Month::May),
        "june" => Ok(Month::June),
        "july" => Ok(Month::July),
        "august" => Ok(Month::August),
        "september" => Ok(Month::September),
        "october" => Ok(Month::October),
        "november" => Ok(Month::November),
        "december" => Ok(Month::December),
        _ => Err(Error::InvalidMonth(value.to_string())),
    }
}

#[cfg(test)]
mod month_tests {
    use time::Month;

    use crate::Error;

    use super::{parse_month, parse_month_param};

    #[test]
    fn parses_full_month_names() {
        let cases = [
            ("January", Month::January),
            ("February", Month::February),
            ("March", Month::March),
            ("April", Month::April),
            ("May", Month::May),
            ("June", Month::June),
            ("July", Month::July),
            ("August", Month::August),
            ("September", Month::September),
            ("October", Month::October),
            ("November", Month::November),
            ("December", Month::December),
        ];

        for (name, want) in cases {
            assert_eq!(parse_month(name), Ok(want), "could not parse {name}");
        }
    }

    #[test]
    fn parsing_ignores_case_and_whitespace() {
        assert_eq!(parse_month("march"), Ok(Month::March));
        assert_eq!(parse_month("MARCH"), Ok(Month::March));
        assert_eq!(parse_month(" mArCh "), Ok(Month::March));
    }

    #[test]
    fn parses_month_numbers() {
        assert_eq!(parse_month("1"), Ok(Month::January));
        assert_eq!(parse_month("03"), Ok(Month::March));
        assert_eq!(parse_month("12"), Ok(Month::December));
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        assert_eq!(parse_month("0"), Err(Error::InvalidMonth("0".to_string())));
        assert_eq!(
            parse_month("13"),
            Err(Error::InvalidMonth("13".to_string()))
        );
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(parse_month("Marchember").is_err());
        assert!(parse_month("Mar").is_err());
        assert!(parse_month("").is_err());
    }

    #[test]
    fn missing_parameter_is_an_error() {
        assert_eq!(parse_month_param(None), Err(Error::MissingMonth));
        assert_eq!(parse_month_param(Some("June")), Ok(Month::June));
    }
}
