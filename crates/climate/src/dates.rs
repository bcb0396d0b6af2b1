use time::{format_description::BorrowedFormatItem, macros::format_description, Date, Duration};

/// Observation dates are stored as `YYYY-MM-DD` text.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Length of the trailing window served by the precipitation and tobs routes.
pub const YEAR_WINDOW_DAYS: i64 = 365;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid date '{value}', expected YYYY-MM-DD")]
    Parse {
        value: String,
        #[source]
        source: time::error::Parse,
    },
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    NotCanonical(String),
    #[error("failed to format date: {0}")]
    Format(#[from] time::error::Format),
    #[error("date {0} is out of the supported range")]
    OutOfRange(Date),
}

/// Parses a date that must be written exactly as `YYYY-MM-DD`
pub fn parse_date(value: &str) -> Result<Date, Error> {
    let date = Date::parse(value, DATE_FORMAT).map_err(|source| Error::Parse {
        value: value.to_owned(),
        source,
    })?;
    // `[year]` also accepts a leading sign, which must not reach the text comparisons
    if format_date(date)? != value {
        return Err(Error::NotCanonical(value.to_owned()));
    }
    Ok(date)
}

pub fn format_date(date: Date) -> Result<String, Error> {
    Ok(date.format(DATE_FORMAT)?)
}

/// The start of the year long window ending at `most_recent`, in calendar days.
pub fn year_before(most_recent: Date) -> Result<Date, Error> {
    most_recent
        .checked_sub(Duration::days(YEAR_WINDOW_DAYS))
        .ok_or(Error::OutOfRange(most_recent))
}
