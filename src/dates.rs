use crate::errors::{FormatError, NoValidDatesError};
use chrono::NaiveDate;
use log::debug;

const CANONICAL: &str = "%Y-%m-%d";

/// The date layouts the statement extractor is known to emit.
#[derive(Clone, Copy, Debug, PartialEq)]
enum DateFormat {
    /// `2024/01/05`, the layout the extractor is asked to produce.
    Slashed,

    /// `January 5, 2024`, copied verbatim from statement headers.
    MonthName,

    /// `2024-01-05`, already canonical.
    Canonical,
}

impl DateFormat {
    /// Formats in the order they are attempted; the first match wins.
    const PRIORITY: [DateFormat; 3] = [
        DateFormat::Slashed,
        DateFormat::MonthName,
        DateFormat::Canonical,
    ];

    fn pattern(self) -> &'static str {
        match self {
            DateFormat::Slashed => "%Y/%m/%d",
            DateFormat::MonthName => "%B %d, %Y",
            DateFormat::Canonical => CANONICAL,
        }
    }

    /// The part of `value` that has to be the year under this format.
    fn year_token(self, value: &str) -> Option<&str> {
        match self {
            DateFormat::Slashed => value.split('/').next(),
            DateFormat::MonthName => value.rsplit(' ').next(),
            DateFormat::Canonical => value.split('-').next(),
        }
    }

    fn parse(self, value: &str) -> Option<NaiveDate> {
        // chrono happily reads `24` as the year 24, short years must not match.
        let year = self.year_token(value)?;
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        // chrono skips spaces before numeric fields.
        if self != DateFormat::MonthName && value.contains(char::is_whitespace) {
            return None;
        }

        let date = NaiveDate::parse_from_str(value, self.pattern()).ok()?;

        // %B also reads abbreviations such as `Jan`, only full names count.
        if self == DateFormat::MonthName {
            let month = value.split(' ').next()?;
            if !month.eq_ignore_ascii_case(&date.format("%B").to_string()) {
                return None;
            }
        }

        Some(date)
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.trim() != value {
        return None;
    }

    DateFormat::PRIORITY
        .iter()
        .find_map(|format| format.parse(value))
}

/// Converts a date written in any of the recognized formats into its
/// canonical `YYYY-MM-DD` form.
///
/// The value is used exactly as given: surrounding whitespace is not
/// trimmed and makes the value unsupported.
pub fn canonicalize(value: &str) -> Result<String, FormatError> {
    parse_date(value)
        .map(|date| date.format(CANONICAL).to_string())
        .ok_or_else(|| FormatError::new(value))
}

/// Cleans a whole date column, where `None` marks a missing cell.
///
/// The earliest `YYYY/MM/DD` value in the column seeds a running "last good
/// date" that is carried forward through the rows:
///
/// * missing cells take the running date,
/// * recognized dates are canonicalized and become the running date,
/// * unrecognized values are kept untouched and leave the running date as is.
///
/// Fails only when no cell holds a `YYYY/MM/DD` date at all.
pub fn clean_date_column(
    column: &str,
    cells: Vec<Option<String>>,
) -> Result<Vec<String>, NoValidDatesError> {
    let earliest = cells
        .iter()
        .flatten()
        .filter_map(|value| DateFormat::Slashed.parse(value))
        .min()
        .ok_or_else(|| NoValidDatesError::new(column))?;

    let seed = earliest.format(CANONICAL).to_string();
    let capacity = cells.len();

    let (_, cleaned) = cells.into_iter().fold(
        (seed, Vec::with_capacity(capacity)),
        |(last_good, mut cleaned), cell| match cell {
            None => {
                cleaned.push(last_good.clone());
                (last_good, cleaned)
            }
            Some(value) => match canonicalize(&value) {
                Ok(date) => {
                    cleaned.push(date.clone());
                    (date, cleaned)
                }
                Err(err) => {
                    debug!("keeping value in column {}: {}", column, err);
                    cleaned.push(value);
                    (last_good, cleaned)
                }
            },
        },
    );

    Ok(cleaned)
}
