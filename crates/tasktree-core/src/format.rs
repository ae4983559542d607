//! Display formatting for task metadata: durations, estimates, timestamps
//! and category glyphs.
//!
//! Every function here is total. Bad input renders as an empty string (or
//! the default category) so a single odd record never aborts a render.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, TimeZone};

const SECONDS_PER_DAY: i64 = 24 * 3600;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_MINUTE: i64 = 60;

/// Epoch values above this are taken to be milliseconds.
pub const MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

/// Render a duration in seconds as `"1d 2h 3m"`, omitting zero components.
///
/// Returns `""` for `None`, zero and negative input. A positive duration under
/// one minute rounds up to `"1m"`.
pub fn format_duration(seconds: Option<i64>) -> String {
    let Some(seconds) = seconds.filter(|s| *s > 0) else {
        return String::new();
    };

    let days = seconds / SECONDS_PER_DAY;
    let hours = (seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;

    let parts: Vec<String> = [(days, 'd'), (hours, 'h'), (minutes, 'm')]
        .into_iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, unit)| format!("{n}{unit}"))
        .collect();

    if parts.is_empty() {
        "1m".to_owned()
    } else {
        parts.join(" ")
    }
}

/// Render an estimate as an inline suffix: `" (1h 30m)"`, or `""` when there
/// is nothing to show.
pub fn format_estimate(estimate: Option<i64>) -> String {
    let duration = format_duration(estimate);
    if duration.is_empty() {
        duration
    } else {
        format!(" ({duration})")
    }
}

/// Render an epoch timestamp (seconds or milliseconds) as local
/// `YYYY-MM-DD HH:MM`. Returns `""` for `None`, zero, or a value chrono cannot
/// represent.
pub fn format_timestamp(timestamp: Option<i64>) -> String {
    format_timestamp_in(timestamp, &Local)
}

/// [`format_timestamp`] against an explicit time zone.
pub fn format_timestamp_in<Tz>(timestamp: Option<i64>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let Some(raw) = timestamp.filter(|t| *t != 0) else {
        return String::new();
    };
    let seconds = if raw > MILLIS_THRESHOLD { raw / 1000 } else { raw };

    match DateTime::from_timestamp(seconds, 0) {
        Some(utc) => utc.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string(),
        None => {
            tracing::debug!(timestamp = raw, "timestamp out of range, omitting");
            String::new()
        }
    }
}

/// Return the category glyph for `code`, or the general glyph when the code
/// is absent or not one of the known categories.
pub fn category_emoji(code: Option<&str>) -> &'static str {
    code.and_then(|c| c.parse::<Category>().ok())
        .unwrap_or_default()
        .glyph()
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Magic ToDo task category. The wire value is the glyph itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    General,
    Technical,
    Planning,
    Creative,
    Business,
    Analytics,
    Social,
    Learning,
    Writing,
    Education,
    Communication,
    Documentation,
    Financial,
}

/// Every category with its glyph and label, in display order.
static CATEGORIES: [(Category, &str, &str); 13] = [
    (Category::General, "\u{2611}\u{fe0f}", "General"),
    (Category::Technical, "\u{1f6e0}", "Technical/Development"),
    (Category::Planning, "\u{1f4cb}", "Organization/Planning"),
    (Category::Creative, "\u{1f3a8}", "Creative/Design"),
    (Category::Business, "\u{1f3e2}", "Business/Corporate"),
    (Category::Analytics, "\u{1f4c8}", "Analytics/Growth"),
    (Category::Social, "\u{1f91d}", "Social/Collaboration"),
    (Category::Learning, "\u{1f4da}", "Learning/Research"),
    (Category::Writing, "\u{1f58a}", "Writing/Content"),
    (Category::Education, "\u{1f393}", "Education/Academic"),
    (Category::Communication, "\u{1f4ac}", "Communication/Discussion"),
    (Category::Documentation, "\u{1f4dd}", "Documentation/Notes"),
    (Category::Financial, "\u{1f4b5}", "Financial/Money"),
];

impl Category {
    pub fn all() -> impl Iterator<Item = Category> {
        CATEGORIES.iter().map(|(c, _, _)| *c)
    }

    fn entry(self) -> &'static (Category, &'static str, &'static str) {
        // The table covers every variant.
        &CATEGORIES[self as usize]
    }

    /// The glyph stored in the task's `category` field.
    pub fn glyph(self) -> &'static str {
        self.entry().1
    }

    pub fn label(self) -> &'static str {
        self.entry().2
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATEGORIES
            .iter()
            .find(|(_, glyph, _)| *glyph == s)
            .map(|(c, _, _)| *c)
            .ok_or_else(|| CategoryParseError(s.to_owned()))
    }
}

/// Error returned when parsing an unknown [`Category`] glyph.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown task category: {0:?}")]
pub struct CategoryParseError(pub String);
