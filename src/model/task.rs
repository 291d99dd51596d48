use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Priority> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

/// Repeat interval for recurring tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Repeat {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Repeat {
    pub fn label(self) -> &'static str {
        match self {
            Repeat::None => "none",
            Repeat::Daily => "daily",
            Repeat::Weekly => "weekly",
            Repeat::Monthly => "monthly",
            Repeat::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Repeat> {
        match s {
            "none" => Some(Repeat::None),
            "daily" => Some(Repeat::Daily),
            "weekly" => Some(Repeat::Weekly),
            "monthly" => Some(Repeat::Monthly),
            "yearly" => Some(Repeat::Yearly),
            _ => None,
        }
    }

    /// Advance a timestamp by one repeat interval.
    ///
    /// Monthly/yearly clamp the day-of-month (Jan 31 → Feb 28) rather than
    /// overflowing into the next month.
    pub fn advance(self, from: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Repeat::None => from,
            Repeat::Daily => from + Duration::days(1),
            Repeat::Weekly => from + Duration::weeks(1),
            Repeat::Monthly => add_months(from, 1),
            Repeat::Yearly => add_months(from, 12),
        }
    }
}

fn add_months(from: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    let total = from.year() * 12 + from.month0() as i32 + months as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = from.day().min(days_in_month(year, month));
    Utc.with_ymd_and_hms(year, month, day, from.hour(), from.minute(), from.second())
        .single()
        .unwrap_or(from)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

/// Scheduling metadata carried by task notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub repeat: Repeat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn priority_ordering() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn repeat_advance_daily_and_weekly() {
        let t = at(2025, 3, 10, 9, 0);
        assert_eq!(Repeat::Daily.advance(t), at(2025, 3, 11, 9, 0));
        assert_eq!(Repeat::Weekly.advance(t), at(2025, 3, 17, 9, 0));
    }

    #[test]
    fn repeat_advance_monthly_clamps_day() {
        // Jan 31 → Feb 28 (non-leap)
        let t = at(2025, 1, 31, 8, 30);
        assert_eq!(Repeat::Monthly.advance(t), at(2025, 2, 28, 8, 30));
        // Jan 31 → Feb 29 (leap)
        let t = at(2024, 1, 31, 8, 30);
        assert_eq!(Repeat::Monthly.advance(t), at(2024, 2, 29, 8, 30));
    }

    #[test]
    fn repeat_advance_monthly_rolls_year() {
        let t = at(2025, 12, 15, 12, 0);
        assert_eq!(Repeat::Monthly.advance(t), at(2026, 1, 15, 12, 0));
    }

    #[test]
    fn repeat_advance_yearly() {
        let t = at(2025, 6, 1, 0, 0);
        assert_eq!(Repeat::Yearly.advance(t), at(2026, 6, 1, 0, 0));
        // Feb 29 → Feb 28 in a non-leap year
        let t = at(2024, 2, 29, 7, 0);
        assert_eq!(Repeat::Yearly.advance(t), at(2025, 2, 28, 7, 0));
    }

    #[test]
    fn repeat_none_is_identity() {
        let t = at(2025, 5, 5, 5, 5);
        assert_eq!(Repeat::None.advance(t), t);
    }

    #[test]
    fn schedule_serde_defaults() {
        let s: Schedule = serde_json::from_str("{}").unwrap();
        assert!(s.due_at.is_none());
        assert_eq!(s.priority, Priority::Medium);
        assert_eq!(s.repeat, Repeat::None);
    }
}
