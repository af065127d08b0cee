//! Partial publication dates and their human-readable display form.
//!
//! Frontmatter dates are `YYYY`, `YYYY-MM`, or `YYYY-MM-DD`. Absent
//! components default to January / the 1st; the display string only ever
//! shows month and year, with a "last updated" suffix when the file's
//! modification time falls in a different month or year.

use anyhow::{Result, bail};
use chrono::{DateTime, Datelike, Local};
use std::time::SystemTime;

/// Full month names, 1-indexed via `MONTHS[month - 1]`.
const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar date with optional month and day, as written in frontmatter.
///
/// Missing components are kept as `None` rather than silently filled in;
/// display and comparison use January / the 1st as the fixed defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialDate {
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl PartialDate {
    /// Parse `YYYY[-MM[-DD]]` with range validation.
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.split('-');

        let year = match parts.next() {
            Some(y) if !y.is_empty() => y
                .parse::<i32>()
                .map_err(|_| anyhow::anyhow!("year is invalid: `{y}`"))?,
            _ => bail!("date is empty"),
        };

        let month = parts
            .next()
            .map(|m| {
                m.parse::<u32>()
                    .map_err(|_| anyhow::anyhow!("month is invalid: `{m}`"))
            })
            .transpose()?;
        let day = parts
            .next()
            .map(|d| {
                d.parse::<u32>()
                    .map_err(|_| anyhow::anyhow!("day is invalid: `{d}`"))
            })
            .transpose()?;

        if parts.next().is_some() {
            bail!("too many components in date `{s}`");
        }

        let date = Self { year, month, day };
        date.validate()?;
        Ok(date)
    }

    fn validate(&self) -> Result<()> {
        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                bail!("month is out of range: {month}");
            }
            if let Some(day) = self.day {
                let max_days = days_in_month(self.year, month);
                if day == 0 || day > max_days {
                    bail!("day is out of range: {day}");
                }
            }
        }
        Ok(())
    }

    /// Month used for display and comparison (January when unset).
    pub fn display_month(&self) -> u32 {
        self.month.unwrap_or(1)
    }

    /// Format as `"Month Year"`, appending `"; last updated Month Year"`
    /// when `modified` (year, month) differs from the displayed pair.
    pub fn display(&self, modified: (i32, u32)) -> String {
        let month = self.display_month();
        let mut out = format!("{} {}", month_name(month), self.year);

        let (mod_year, mod_month) = modified;
        if mod_year != self.year || mod_month != month {
            out.push_str(&format!(
                "; last updated {} {}",
                month_name(mod_month),
                mod_year
            ));
        }
        out
    }
}

/// Look up a full month name from a 1-indexed month number.
fn month_name(month: u32) -> &'static str {
    MONTHS[(month - 1) as usize]
}

#[inline]
fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[inline]
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Convert a filesystem mtime into a local-calendar (year, month) pair.
pub fn month_year(mtime: SystemTime) -> (i32, u32) {
    let local: DateTime<Local> = mtime.into();
    (local.year(), local.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let date = PartialDate::parse("2024-03-15").unwrap();
        assert_eq!(date.year, 2024);
        assert_eq!(date.month, Some(3));
        assert_eq!(date.day, Some(15));
    }

    #[test]
    fn test_parse_year_month() {
        let date = PartialDate::parse("2024-03").unwrap();
        assert_eq!(date.year, 2024);
        assert_eq!(date.month, Some(3));
        assert_eq!(date.day, None);
    }

    #[test]
    fn test_parse_year_only() {
        let date = PartialDate::parse("2024").unwrap();
        assert_eq!(date.year, 2024);
        assert_eq!(date.month, None);
        assert_eq!(date.day, None);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(PartialDate::parse("").is_err());
        assert!(PartialDate::parse("TODO").is_err());
        assert!(PartialDate::parse("2024-13").is_err());
        assert!(PartialDate::parse("2024-00").is_err());
        assert!(PartialDate::parse("2024-04-31").is_err());
        assert!(PartialDate::parse("2024-02-30").is_err());
        assert!(PartialDate::parse("2024-03-15-01").is_err());
        assert!(PartialDate::parse("2024-xx").is_err());
    }

    #[test]
    fn test_parse_leap_year() {
        assert!(PartialDate::parse("2024-02-29").is_ok());
        assert!(PartialDate::parse("2023-02-29").is_err());
        assert!(PartialDate::parse("2000-02-29").is_ok());
        assert!(PartialDate::parse("1900-02-29").is_err());
    }

    #[test]
    fn test_display_same_month() {
        let date = PartialDate::parse("2024-03").unwrap();
        assert_eq!(date.display((2024, 3)), "March 2024");
    }

    #[test]
    fn test_display_last_updated() {
        let date = PartialDate::parse("2024-03").unwrap();
        assert_eq!(
            date.display((2024, 6)),
            "March 2024; last updated June 2024"
        );
    }

    #[test]
    fn test_display_last_updated_different_year() {
        let date = PartialDate::parse("2023-12").unwrap();
        assert_eq!(
            date.display((2024, 12)),
            "December 2023; last updated December 2024"
        );
    }

    #[test]
    fn test_display_year_only_defaults_to_january() {
        let date = PartialDate::parse("2024").unwrap();
        // Modified in January 2024: months match, no suffix.
        assert_eq!(date.display((2024, 1)), "January 2024");
        assert_eq!(
            date.display((2024, 6)),
            "January 2024; last updated June 2024"
        );
    }

    #[test]
    fn test_display_ignores_day() {
        let date = PartialDate::parse("2024-03-01").unwrap();
        assert_eq!(date.display((2024, 3)), "March 2024");
    }
}
