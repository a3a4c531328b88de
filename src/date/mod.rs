mod clock;
mod format;

use std::fmt::{self, Display, Formatter};

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};

pub use clock::now_in;
pub use format::{english_day, long_date, week_slug};
use format::{DUTCH_DAYS_SHORT, ENGLISH_DAYS_SHORT};

const TODAY: [&str; 5] = ["today", "vandaag", "nu", "vanmiddag", "vanavond"];
const TOMORROW: [&str; 2] = ["tomorrow", "morgen"];

/// What the user asked about: a point in time and whether that is "right now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeQuery {
    dt: NaiveDateTime,
    refers_to_now: bool,
}

impl TimeQuery {
    #[inline]
    #[must_use]
    pub const fn now(now: NaiveDateTime) -> Self {
        Self {
            dt: now,
            refers_to_now: true,
        }
    }

    #[inline]
    #[must_use]
    pub const fn dt(&self) -> NaiveDateTime {
        self.dt
    }

    #[inline]
    #[must_use]
    pub const fn refers_to_now(&self) -> bool {
        self.refers_to_now
    }

    /// `today` for the present, otherwise the English weekday name.
    #[must_use]
    pub fn day_label(&self) -> &'static str {
        if self.refers_to_now {
            "today"
        } else {
            english_day(self.dt.weekday())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedTimeToken(pub String);

impl Display for UnrecognizedTimeToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Unrecognized time token: {:?}", self.0)
    }
}

impl std::error::Error for UnrecognizedTimeToken {}

/// Turns the optional `when` argument of a command into a [`TimeQuery`].
pub fn resolve(now: NaiveDateTime, token: Option<&str>) -> Result<TimeQuery, UnrecognizedTimeToken> {
    let Some(raw) = token else {
        return Ok(TimeQuery::now(now));
    };
    let when = raw.to_lowercase();

    if TODAY.contains(&when.as_str()) {
        return Ok(TimeQuery::now(now));
    }

    if TOMORROW.contains(&when.as_str()) {
        return Ok(TimeQuery {
            dt: at_noon(now, 1),
            refers_to_now: false,
        });
    }

    let abbreviation: String = when.chars().take(2).collect();
    let target = DUTCH_DAYS_SHORT
        .iter()
        .position(|d| *d == abbreviation)
        .or_else(|| ENGLISH_DAYS_SHORT.iter().position(|d| *d == abbreviation))
        .ok_or_else(|| UnrecognizedTimeToken(raw.to_owned()))?;

    // never look back in time, only forward to the next occurrence
    let current = format::day_index(now.weekday());
    let offset = (target + 7 - current) % 7;
    log::debug!("Resolved {raw:?} to {offset} day(s) ahead");

    Ok(TimeQuery {
        dt: at_noon(now, offset as i64),
        refers_to_now: offset == 0,
    })
}

fn at_noon(now: NaiveDateTime, days_ahead: i64) -> NaiveDateTime {
    (now.date() + Duration::days(days_ahead)).and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default())
}
