//! Date-range detection for experience recency and total years.

use chrono::{Datelike, Utc};
use regex::Regex;

lazy_static::lazy_static! {
    static ref RANGE_RE: Regex = Regex::new(
        r"(?i)\b((?:19|20)\d{2})\s*(?:-|–|—|to)\s*((?:19|20)\d{2}|present|current|now|today)\b"
    )
    .unwrap();
    static ref YEAR_RE: Regex = Regex::new(r"\b(?:19|20)\d{2}\b").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
    pub ongoing: bool,
}

/// Employment timeline read from a block of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    pub ranges: Vec<YearRange>,
    /// Latest year mentioned anywhere, including outside ranges.
    pub latest_year: Option<i32>,
}

impl Timeline {
    pub fn has_current_role(&self) -> bool {
        self.ranges.iter().any(|r| r.ongoing)
    }

    /// Years covered by the union of all ranges. Overlapping roles are not
    /// double counted.
    pub fn total_years(&self) -> u32 {
        let mut ranges: Vec<(i32, i32)> = self.ranges.iter().map(|r| (r.start, r.end)).collect();
        ranges.sort_unstable();

        let mut total = 0;
        let mut cursor: Option<(i32, i32)> = None;
        for (start, end) in ranges {
            cursor = match cursor {
                Some((s, e)) if start <= e => Some((s, e.max(end))),
                Some((s, e)) => {
                    total += e - s;
                    Some((start, end))
                }
                None => Some((start, end)),
            };
        }
        if let Some((s, e)) = cursor {
            total += e - s;
        }
        total.max(0) as u32
    }

    /// True when the most recent activity is within `window` years of `current_year`.
    pub fn is_recent(&self, current_year: i32, window: i32) -> bool {
        self.has_current_role()
            || self
                .latest_year
                .map(|y| current_year - y <= window)
                .unwrap_or(false)
    }
}

pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Parses `YYYY - YYYY` / `YYYY - Present` ranges. Ongoing ranges end at
/// `current_year`; ranges that run backwards are dropped.
pub fn parse_timeline(text: &str, current_year: i32) -> Timeline {
    let ranges = RANGE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let start: i32 = caps.get(1)?.as_str().parse().ok()?;
            let end_raw = caps.get(2)?.as_str();
            let (end, ongoing) = match end_raw.parse::<i32>() {
                Ok(year) => (year, false),
                Err(_) => (current_year, true),
            };
            (start <= end).then_some(YearRange {
                start,
                end,
                ongoing,
            })
        })
        .collect::<Vec<_>>();

    let latest_year = YEAR_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<i32>().ok())
        .filter(|y| *y <= current_year)
        .chain(ranges.iter().map(|r| r.end))
        .max();

    Timeline {
        ranges,
        latest_year,
    }
}
