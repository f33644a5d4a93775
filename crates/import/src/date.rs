use chrono::NaiveDate;
use std::fmt::Write;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("Date '{text}' does not match format '{format}': {source}")]
    Mismatch {
        text: String,
        format: String,
        source: chrono::ParseError,
    },
    #[error("Invalid output date format: '{0}'")]
    InvalidFormat(String),
}

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Parses `text` with a strftime `format`.
///
/// With a `%b.` format the month word is matched loosely: the bank prints
/// "May", "June", "July" and "Sept." next to "Jan." and "Feb.", so any
/// prefix of a month name of at least three letters, with or without the
/// dot, is accepted.
pub fn parse_date(text: &str, format: &str) -> Result<NaiveDate, DateParseError> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, format).or_else(|source| {
        format
            .contains("%b.")
            .then(|| canonical_month(text))
            .flatten()
            .and_then(|canonical| NaiveDate::parse_from_str(&canonical, format).ok())
            .ok_or_else(|| DateParseError::Mismatch {
                text: text.to_string(),
                format: format.to_string(),
                source,
            })
    })
}

/// Rewrites a leading month word to its `%b.` spelling: "Sept. 5" → "Sep. 5",
/// "June 5" → "Jun. 5".
fn canonical_month(text: &str) -> Option<String> {
    let end = text
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(text.len());
    let (word, rest) = text.split_at(end);
    if word.len() < 3 {
        return None;
    }
    let month = MONTHS.iter().find(|m| {
        m.len() >= word.len() && m[..word.len()].eq_ignore_ascii_case(word)
    })?;
    let rest = rest.strip_prefix('.').unwrap_or(rest);
    Some(format!("{}.{rest}", &month[..3]))
}

/// Re-renders a date from `source_format` into `output_format` (both strftime).
pub fn normalize_date(
    text: &str,
    source_format: &str,
    output_format: &str,
) -> Result<String, DateParseError> {
    let date = parse_date(text, source_format)?;
    let mut out = String::new();
    write!(out, "{}", date.format(output_format))
        .map_err(|_| DateParseError::InvalidFormat(output_format.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerpull_core::{DEFAULT_SOURCE_DATE_FORMAT, LEDGER_DATE_FORMAT};

    fn normalize(text: &str) -> Result<String, DateParseError> {
        normalize_date(text, DEFAULT_SOURCE_DATE_FORMAT, LEDGER_DATE_FORMAT)
    }

    #[test]
    fn abbreviated_month_single_digit_day() {
        assert_eq!(normalize("Jan. 5, 2019").unwrap(), "2019/01/05");
    }

    #[test]
    fn abbreviated_month_two_digit_day() {
        assert_eq!(normalize("Dec. 25, 2018").unwrap(), "2018/12/25");
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(normalize("  Feb. 2, 2019\n").unwrap(), "2019/02/02");
    }

    #[test]
    fn every_month_as_the_bank_spells_it() {
        let dates = [
            ("Jan. 5, 2019", "2019/01/05"),
            ("Feb. 5, 2019", "2019/02/05"),
            ("March 5, 2019", "2019/03/05"),
            ("April 5, 2019", "2019/04/05"),
            ("May 5, 2019", "2019/05/05"),
            ("June 5, 2019", "2019/06/05"),
            ("July 5, 2019", "2019/07/05"),
            ("Aug. 5, 2019", "2019/08/05"),
            ("Sept. 5, 2019", "2019/09/05"),
            ("Oct. 5, 2019", "2019/10/05"),
            ("Nov. 5, 2019", "2019/11/05"),
            ("Dec. 5, 2019", "2019/12/05"),
        ];
        for (text, expected) in dates {
            assert_eq!(normalize(text).unwrap(), expected, "{text}");
        }
    }

    #[test]
    fn abbreviations_with_or_without_dot() {
        assert_eq!(normalize("Sep. 30, 2019").unwrap(), "2019/09/30");
        assert_eq!(normalize("Jun 1, 2019").unwrap(), "2019/06/01");
        assert_eq!(normalize("mar. 3, 2019").unwrap(), "2019/03/03");
    }

    #[test]
    fn unknown_month_word_keeps_original_error() {
        let err = normalize("Smarch 5, 2019").unwrap_err();
        assert!(matches!(err, DateParseError::Mismatch { ref text, .. } if text == "Smarch 5, 2019"));
        assert!(normalize("Ma 5, 2019").is_err());
    }

    #[test]
    fn numeric_date_does_not_match() {
        let err = normalize("13/45/2019").unwrap_err();
        assert!(matches!(err, DateParseError::Mismatch { ref text, .. } if text == "13/45/2019"));
    }

    #[test]
    fn impossible_day_does_not_match() {
        assert!(normalize("Feb. 30, 2019").is_err());
    }

    #[test]
    fn custom_formats() {
        assert_eq!(normalize_date("01/15/2024", "%m/%d/%Y", "%Y-%m-%d").unwrap(), "2024-01-15");
    }

    #[test]
    fn invalid_output_format() {
        let err = normalize_date("Jan. 5, 2019", DEFAULT_SOURCE_DATE_FORMAT, "%Q").unwrap_err();
        assert_eq!(err, DateParseError::InvalidFormat("%Q".to_string()));
    }
}
