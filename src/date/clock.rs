use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Current wall-clock time in `tz`, with the zone stripped off.
///
/// Opening hours are local times, so everything downstream works on naive values.
pub fn now_in(tz: Tz) -> NaiveDateTime {
    Utc::now().with_timezone(&tz).naive_local()
}
