use crate::shared::error::AppStreamError;
use crate::shared::Result;
use chrono::NaiveDate;

/// Values vendors use in place of a date to say "no end date"
const NO_END_DATE_SENTINELS: &[&str] = &["n/a", "na", "none", "null", "tbd", "-"];

/// EndOfLifePolicy - date handling rules for lifecycle data
///
/// Two tiers: the reference date given by the operator is parsed
/// strictly (a typo must stop the run), while end dates coming from vendor
/// data are parsed leniently (anything unusable means "no end date").
pub struct EndOfLifePolicy;

impl EndOfLifePolicy {
    /// Parses an operator-supplied `YYYY-MM-DD` date.
    ///
    /// Month and day may omit the zero padding (`2026-2-1`).
    ///
    /// # Errors
    /// Returns `AppStreamError::InvalidDate` for anything else.
    pub fn parse_reference_date(value: &str) -> Result<NaiveDate> {
        parse_ymd(value).ok_or_else(|| {
            AppStreamError::InvalidDate {
                value: value.to_string(),
            }
            .into()
        })
    }

    /// Parses a vendor end date. Absent, empty, sentinel or unparseable
    /// values all become `None` (indefinite support).
    pub fn parse_end_of_life(value: Option<&str>) -> Option<NaiveDate> {
        let text = value?.trim();
        if text.is_empty() || NO_END_DATE_SENTINELS.contains(&text.to_ascii_lowercase().as_str())
        {
            return None;
        }
        parse_ymd(text)
    }

    /// An entry is past end-of-life when it has an end date on or before the
    /// reference date. Entries without an end date never expire.
    pub fn is_expired(end_of_life: Option<NaiveDate>, reference_date: NaiveDate) -> bool {
        matches!(end_of_life, Some(end) if end <= reference_date)
    }
}

fn parse_ymd(value: &str) -> Option<NaiveDate> {
    let text = value.trim();
    // API timestamps sometimes carry a time part: keep the date only
    let date_part = text.split(['T', ' ']).next().unwrap_or_default();

    let mut parts = date_part.split('-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if year.len() != 4 || !all_digits(year) || !all_digits(month) || !all_digits(day) {
        return None;
    }
    if month.len() > 2 || day.len() > 2 {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}
