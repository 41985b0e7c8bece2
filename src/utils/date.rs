use crate::errors::AppError;
use chrono::NaiveDate;

/// Today's date as the backend sees it (UTC).
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Parse `YYYY-MM-DD` (used as clap value parser).
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(s.to_string()).to_string())
}
