use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

/// Minutes since midnight.
const fn hm(hour: u32, minute: u32) -> u32 {
    hour * 60 + minute
}

/// Half-open `[start, end)` window within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    start: u32,
    end: u32,
}

impl Window {
    const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    const fn contains(self, t: u32) -> bool {
        self.start <= t && t < self.end
    }

    const fn is_before(self, t: u32) -> bool {
        t < self.start
    }
}

fn minute_of_day(dt: &NaiveDateTime) -> u32 {
    hm(dt.hour(), dt.minute())
}

/// Weekly opening hours of a supplier.
///
/// Every predicate takes the instant to evaluate explicitly and matches all
/// seven weekdays; anything not listed as open is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    HetGerecht,
    RadboudUmc,
    Refter,
    Fnwi,
    DeFest,
    /// No longer serving; every question is answered with "no".
    Decommissioned,
}

impl Schedule {
    pub fn is_open(self, dt: &NaiveDateTime) -> bool {
        let t = minute_of_day(dt);
        match self {
            Self::HetGerecht => match dt.weekday() {
                Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu => {
                    Window::new(hm(11, 0), hm(19, 0)).contains(t)
                }
                Weekday::Fri => Window::new(hm(11, 0), hm(16, 0)).contains(t),
                Weekday::Sat | Weekday::Sun => false,
            },
            Self::RadboudUmc => umc_opening_hours(dt.weekday()).contains(t),
            Self::Refter => match dt.weekday() {
                Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri => {
                    Window::new(hm(7, 30), hm(20, 0)).contains(t)
                }
                Weekday::Sat | Weekday::Sun => false,
            },
            Self::Fnwi => self.is_open_for_lunch(dt),
            Self::DeFest => Window::new(hm(11, 0), hm(23, 0)).contains(t),
            Self::Decommissioned => false,
        }
    }

    /// Closed at `dt`, but opening later that same day.
    pub fn will_open(self, dt: &NaiveDateTime) -> bool {
        let t = minute_of_day(dt);
        match self {
            Self::HetGerecht => match dt.weekday() {
                Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri => {
                    t < hm(11, 0)
                }
                Weekday::Sat | Weekday::Sun => false,
            },
            Self::RadboudUmc => umc_opening_hours(dt.weekday()).is_before(t),
            Self::Refter => match dt.weekday() {
                Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri => {
                    t < hm(7, 30)
                }
                Weekday::Sat | Weekday::Sun => false,
            },
            Self::Fnwi => match dt.weekday() {
                Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri => {
                    t < hm(12, 0)
                }
                Weekday::Sat | Weekday::Sun => false,
            },
            Self::DeFest => t < hm(11, 0),
            Self::Decommissioned => false,
        }
    }

    pub fn is_open_for_lunch(self, dt: &NaiveDateTime) -> bool {
        let t = minute_of_day(dt);
        match self {
            Self::HetGerecht | Self::Fnwi => match dt.weekday() {
                Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri => {
                    Window::new(hm(12, 0), hm(13, 30)).contains(t)
                }
                Weekday::Sat | Weekday::Sun => false,
            },
            Self::RadboudUmc => Window::new(hm(11, 30), hm(14, 0)).contains(t),
            Self::Refter | Self::DeFest => self.is_open(dt),
            Self::Decommissioned => false,
        }
    }

    pub fn is_open_for_dinner(self, dt: &NaiveDateTime) -> bool {
        let t = minute_of_day(dt);
        match self {
            Self::HetGerecht => match dt.weekday() {
                Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu => {
                    Window::new(hm(17, 0), hm(19, 0)).contains(t)
                }
                Weekday::Fri | Weekday::Sat | Weekday::Sun => false,
            },
            Self::RadboudUmc => Window::new(hm(16, 30), hm(19, 30)).contains(t),
            Self::Refter | Self::DeFest => self.is_open(dt),
            Self::Fnwi | Self::Decommissioned => false,
        }
    }
}

const fn umc_opening_hours(weekday: Weekday) -> Window {
    match weekday {
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri => {
            Window::new(hm(8, 0), hm(20, 0))
        }
        Weekday::Sat | Weekday::Sun => Window::new(hm(11, 0), hm(20, 0)),
    }
}
