use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::InputError;

/// Output pattern for resolved values without a clock time.
pub const DATE_DISPLAY: &str = "%b %d %Y";
/// Output pattern for resolved values with a clock time.
pub const DATE_TIME_DISPLAY: &str = "%H:%M %b %d %Y";
/// The only accepted input for `schedule`.
pub const SCHEDULE_FORMAT: &str = "%Y-%m-%d";

/// Every date pattern paired with every clock pattern, date first and then
/// clock first, plus the ISO `T` forms.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %I%M %p",
    "%Y-%m-%d %I:%M %p",
    "%Y/%m/%d %H%M",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %I%M %p",
    "%Y/%m/%d %I:%M %p",
    "%d-%m-%Y %H%M",
    "%d-%m-%Y %H:%M",
    "%d-%m-%Y %I%M %p",
    "%d-%m-%Y %I:%M %p",
    "%d/%m/%Y %H%M",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %I%M %p",
    "%d/%m/%Y %I:%M %p",
    "%b %d %Y %H%M",
    "%b %d %Y %H:%M",
    "%b %d %Y %I%M %p",
    "%b %d %Y %I:%M %p",
    "%d %b %Y %H%M",
    "%d %b %Y %H:%M",
    "%d %b %Y %I%M %p",
    "%d %b %Y %I:%M %p",
    "%Y %b %d %H%M",
    "%Y %b %d %H:%M",
    "%Y %b %d %I%M %p",
    "%Y %b %d %I:%M %p",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%H%M %Y-%m-%d",
    "%H:%M %Y-%m-%d",
    "%I%M %p %Y-%m-%d",
    "%I:%M %p %Y-%m-%d",
    "%H%M %Y/%m/%d",
    "%H:%M %Y/%m/%d",
    "%I%M %p %Y/%m/%d",
    "%I:%M %p %Y/%m/%d",
    "%H%M %d-%m-%Y",
    "%H:%M %d-%m-%Y",
    "%I%M %p %d-%m-%Y",
    "%I:%M %p %d-%m-%Y",
    "%H%M %d/%m/%Y",
    "%H:%M %d/%m/%Y",
    "%I%M %p %d/%m/%Y",
    "%I:%M %p %d/%m/%Y",
    "%H%M %b %d %Y",
    "%H:%M %b %d %Y",
    "%I%M %p %b %d %Y",
    "%I:%M %p %b %d %Y",
    "%H%M %d %b %Y",
    "%H:%M %d %b %Y",
    "%I%M %p %d %b %Y",
    "%I:%M %p %d %b %Y",
    "%H%M %Y %b %d",
    "%H:%M %Y %b %d",
    "%I%M %p %Y %b %d",
    "%I:%M %p %Y %b %d",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%b %d %Y",
    "%d %b %Y",
    "%Y %b %d",
];

const TIME_FORMATS: &[&str] = &["%H%M", "%H:%M", "%I%M %p", "%I:%M %p"];

/// Ordered format candidates, one list per tier. Within a tier the first
/// pattern that consumes the whole input wins.
#[derive(Debug)]
pub struct FormatCatalog {
    pub date_time: &'static [&'static str],
    pub date: &'static [&'static str],
    pub time: &'static [&'static str],
}

pub static DEFAULT_FORMATS: FormatCatalog = FormatCatalog {
    date_time: DATE_TIME_FORMATS,
    date: DATE_FORMATS,
    time: TIME_FORMATS,
};

/// Outcome of resolving free-form text. `date_time == None` means the text is
/// opaque and should be shown verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub date_time: Option<NaiveDateTime>,
    pub has_time: bool,
}

impl Resolution {
    pub const UNRESOLVED: Resolution = Resolution {
        date_time: None,
        has_time: false,
    };

    pub fn date(&self) -> Option<NaiveDate> {
        self.date_time.map(|dt| dt.date())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DateTimeResolver {
    formats: &'static FormatCatalog,
    today: NaiveDate,
}

impl Default for DateTimeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DateTimeResolver {
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// Resolver whose time-only tier stamps `today` instead of the wall clock.
    pub fn with_today(today: NaiveDate) -> Self {
        Self::with_formats(&DEFAULT_FORMATS, today)
    }

    pub fn with_formats(formats: &'static FormatCatalog, today: NaiveDate) -> Self {
        Self { formats, today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Tries date+time, then date-only, then time-only candidates.
    pub fn resolve(&self, text: &str) -> Resolution {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Resolution::UNRESOLVED;
        }
        let normalized = normalize_meridiem(trimmed);

        for fmt in self.formats.date_time {
            if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, fmt) {
                return Resolution {
                    date_time: Some(dt),
                    has_time: true,
                };
            }
        }

        for fmt in self.formats.date {
            if let Ok(date) = NaiveDate::parse_from_str(&normalized, fmt) {
                return Resolution {
                    date_time: Some(date.and_time(NaiveTime::MIN)),
                    has_time: false,
                };
            }
        }

        for fmt in self.formats.time {
            if let Ok(time) = NaiveTime::parse_from_str(&normalized, fmt) {
                return Resolution {
                    date_time: Some(self.today.and_time(time)),
                    has_time: true,
                };
            }
        }

        Resolution::UNRESOLVED
    }
}

/// Upper-cases am/pm markers and zero-pads a compact three-digit clock that
/// carries one ("630pm" -> "0630PM", "630 am" -> "0630 AM") so the fixed-width
/// hour patterns can match. Works per whitespace-separated token, so the clock
/// may sit anywhere in a date-time string.
fn normalize_meridiem(input: &str) -> String {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            if is_marker(token) {
                return token.to_ascii_uppercase();
            }
            let (clock, marker) = split_marker(token);
            let numeric = !clock.is_empty() && clock.bytes().all(|b| b.is_ascii_digit());
            let followed_by_marker = tokens.get(i + 1).is_some_and(|next| is_marker(next));
            if numeric && clock.len() == 3 && (!marker.is_empty() || followed_by_marker) {
                format!("0{}{}", clock, marker.to_ascii_uppercase())
            } else if !marker.is_empty() && clock.ends_with(|c: char| c.is_ascii_digit()) {
                format!("{}{}", clock, marker.to_ascii_uppercase())
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_marker(token: &str) -> bool {
    token.eq_ignore_ascii_case("am") || token.eq_ignore_ascii_case("pm")
}

/// Splits "630pm" into ("630", "pm"); tokens without a marker come back whole.
fn split_marker(token: &str) -> (&str, &str) {
    let lower = token.to_ascii_lowercase();
    if token.len() > 2 && (lower.ends_with("am") || lower.ends_with("pm")) {
        token.split_at(token.len() - 2)
    } else {
        (token, "")
    }
}

pub fn format_resolved(dt: NaiveDateTime, has_time: bool) -> String {
    if has_time {
        dt.format(DATE_TIME_DISPLAY).to_string()
    } else {
        dt.format(DATE_DISPLAY).to_string()
    }
}

pub fn parse_schedule_date(input: &str) -> Result<NaiveDate, InputError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(InputError::MissingDate);
    }
    NaiveDate::parse_from_str(input, SCHEDULE_FORMAT)
        .map_err(|_| InputError::InvalidDate(input.to_string()))
}
