use chrono::{Datelike, NaiveDate, Weekday};

pub const DUTCH_MONTHS: [&str; 12] = [
    "januari",
    "februari",
    "maart",
    "april",
    "mei",
    "juni",
    "juli",
    "augustus",
    "september",
    "oktober",
    "november",
    "december",
];

pub const DUTCH_DAYS: [&str; 7] = [
    "maandag",
    "dinsdag",
    "woensdag",
    "donderdag",
    "vrijdag",
    "zaterdag",
    "zondag",
];

pub const ENGLISH_DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub const DUTCH_DAYS_SHORT: [&str; 7] = ["ma", "di", "wo", "do", "vr", "za", "zo"];
pub const ENGLISH_DAYS_SHORT: [&str; 7] = ["mo", "tu", "we", "th", "fr", "sa", "so"];

/// Index into the day tables, Monday being 0.
#[inline]
#[must_use]
pub const fn day_index(weekday: Weekday) -> usize {
    weekday.num_days_from_monday() as usize
}

#[must_use]
pub fn english_day(weekday: Weekday) -> &'static str {
    ENGLISH_DAYS[day_index(weekday)]
}

#[must_use]
pub fn dutch_month(date: NaiveDate) -> &'static str {
    DUTCH_MONTHS[date.month0() as usize]
}

/// Dutch long date as the suppliers print it, e.g. `donderdag 17 januari`.
#[must_use]
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        DUTCH_DAYS[day_index(date.weekday())],
        date.day(),
        dutch_month(date)
    )
}

/// Slug of the weekly menu pages on ru.nl, e.g. `14-18-januari`.
///
/// The week runs Monday to Friday; the month is the one the Friday falls in.
#[must_use]
pub fn week_slug(date: NaiveDate) -> String {
    let monday = date - chrono::Duration::days(i64::from(date.weekday().num_days_from_monday()));
    let friday = monday + chrono::Duration::days(4);
    format!("{}-{}-{}", monday.day(), friday.day(), dutch_month(friday))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_date() {
        let date = NaiveDate::from_ymd_opt(2019, 1, 17).unwrap();
        assert_eq!(long_date(date), "donderdag 17 januari");
        let date = NaiveDate::from_ymd_opt(2024, 3, 25).unwrap();
        assert_eq!(long_date(date), "maandag 25 maart");
    }

    #[test]
    fn test_week_slug() {
        // any day of the week maps to the same slug
        for day in 14..=20 {
            let date = NaiveDate::from_ymd_opt(2019, 1, day).unwrap();
            assert_eq!(week_slug(date), "14-18-januari");
        }
        let date = NaiveDate::from_ymd_opt(2024, 3, 27).unwrap();
        assert_eq!(week_slug(date), "25-29-maart");
    }

    #[test]
    fn test_english_day() {
        assert_eq!(english_day(Weekday::Mon), "Monday");
        assert_eq!(english_day(Weekday::Sun), "Sunday");
    }
}
