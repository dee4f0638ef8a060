//! Calendar rule evaluation.
//!
//! Decides whether a service's validity periods or a segment's condition
//! apply on a given date. Dates are compared as `YYYY-MM-DD` strings; for
//! that format lexicographic order is chronological order, so bounds taken
//! straight from documents are compared without further parsing.

use chrono::{Datelike, Local, NaiveDate, Weekday};

use crate::catalog::{SegmentCondition, ServiceDefinition, ValidityPeriod};

/// Format used for dates in documents and query strings.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Day-type values that may appear in segment conditions.
///
/// `Weekday` stands for Monday to Friday. `Holiday` is accepted in
/// documents but no date is classified as a holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayType {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    Weekday,
    Holiday,
}

impl DayType {
    /// The value as written in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Monday => "monday",
            DayType::Tuesday => "tuesday",
            DayType::Wednesday => "wednesday",
            DayType::Thursday => "thursday",
            DayType::Friday => "friday",
            DayType::Saturday => "saturday",
            DayType::Sunday => "sunday",
            DayType::Weekday => "weekday",
            DayType::Holiday => "holiday",
        }
    }
}

/// Error returned when a query date is not a `YYYY-MM-DD` date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date {input:?}: expected YYYY-MM-DD")]
pub struct InvalidDate {
    input: String,
}

/// Format a date as `YYYY-MM-DD`.
pub fn iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Parse a strict `YYYY-MM-DD` date.
///
/// # Examples
///
/// ```
/// use timetable_server::calendar::parse_iso_date;
///
/// assert!(parse_iso_date("2024-06-10").is_ok());
/// assert!(parse_iso_date("2024-6-10").is_err());
/// assert!(parse_iso_date("2024-02-30").is_err());
/// ```
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, InvalidDate> {
    let invalid = || InvalidDate {
        input: s.to_string(),
    };

    let bytes = s.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(s, ISO_DATE_FORMAT).map_err(|_| invalid())
}

/// Resolve the date of a timetable query.
///
/// An absent or empty date means today on the local clock.
pub fn resolve_query_date(raw: Option<&str>) -> Result<NaiveDate, InvalidDate> {
    resolve_query_date_with(raw, || Local::now().date_naive())
}

/// Like [`resolve_query_date`], with an explicit source for "today".
pub fn resolve_query_date_with<F>(raw: Option<&str>, today: F) -> Result<NaiveDate, InvalidDate>
where
    F: FnOnce() -> NaiveDate,
{
    match raw {
        Some(s) if !s.is_empty() => parse_iso_date(s),
        _ => Ok(today()),
    }
}

/// The named day of the week for `date`.
pub fn day_type_of(date: NaiveDate) -> DayType {
    match date.weekday() {
        Weekday::Mon => DayType::Monday,
        Weekday::Tue => DayType::Tuesday,
        Weekday::Wed => DayType::Wednesday,
        Weekday::Thu => DayType::Thursday,
        Weekday::Fri => DayType::Friday,
        Weekday::Sat => DayType::Saturday,
        Weekday::Sun => DayType::Sunday,
    }
}

/// True for Monday to Friday.
pub fn is_weekday(day: DayType) -> bool {
    matches!(
        day,
        DayType::Monday | DayType::Tuesday | DayType::Wednesday | DayType::Thursday | DayType::Friday
    )
}

/// Whether `date` falls within `period`, bounds inclusive.
///
/// A period with no bounds contains every date.
pub fn period_contains(period: &ValidityPeriod, date: NaiveDate) -> bool {
    bounds_contain(period, &iso_date(date))
}

fn bounds_contain(period: &ValidityPeriod, date: &str) -> bool {
    let after_start = period.from.as_deref().is_none_or(|from| date >= from);
    let before_end = period.to.as_deref().is_none_or(|to| date <= to);
    after_start && before_end
}

/// Whether a service runs at all on `date`.
///
/// A service without validity periods runs on every date; otherwise any
/// one period containing the date is enough.
pub fn service_valid_on_date(service: &ServiceDefinition, date: NaiveDate) -> bool {
    if service.validity_periods.is_empty() {
        return true;
    }

    let date = iso_date(date);
    service
        .validity_periods
        .iter()
        .any(|period| bounds_contain(period, &date))
}

/// Whether a segment's condition holds on `date`.
pub fn segment_condition_matches(condition: &SegmentCondition, date: NaiveDate) -> bool {
    match condition {
        SegmentCondition::DayType(value) => day_type_matches(value, date),
        SegmentCondition::SpecificDate(value) => iso_date(date) == *value,
        SegmentCondition::SpecificPeriod(period) => period_contains(period, date),
        // Legacy documents: a bare value is a day type.
        SegmentCondition::Untyped(value) => day_type_matches(value, date),
        SegmentCondition::Unrestricted | SegmentCondition::Unrecognized(_) => true,
    }
}

fn day_type_matches(value: &str, date: NaiveDate) -> bool {
    let day = day_type_of(date);
    if value == DayType::Weekday.as_str() {
        is_weekday(day)
    } else {
        value == day.as_str()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (1970i32..2100, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    proptest! {
        /// `weekday` matches exactly Monday to Friday.
        #[test]
        fn weekday_condition_matches_iff_monday_to_friday(d in any_date()) {
            let condition = SegmentCondition::DayType("weekday".into());
            let expected = !matches!(d.weekday(), Weekday::Sat | Weekday::Sun);
            prop_assert_eq!(segment_condition_matches(&condition, d), expected);
        }

        /// String comparison of ISO dates agrees with chronological comparison.
        #[test]
        fn iso_order_is_chronological(a in any_date(), b in any_date()) {
            prop_assert_eq!(iso_date(a).cmp(&iso_date(b)), a.cmp(&b));
        }

        /// A period contains a date iff the date lies between its bounds.
        #[test]
        fn period_contains_matches_date_order(a in any_date(), b in any_date(), d in any_date()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let period = ValidityPeriod::new(Some(iso_date(lo).as_str()), Some(iso_date(hi).as_str()));
            prop_assert_eq!(period_contains(&period, d), lo <= d && d <= hi);
        }

        /// Formatting then parsing a date gives the same date back.
        #[test]
        fn parse_accepts_formatted_dates(d in any_date()) {
            prop_assert_eq!(parse_iso_date(&iso_date(d)), Ok(d));
        }
    }
}
