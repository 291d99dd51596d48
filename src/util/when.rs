use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Parse a user-supplied date or datetime into a UTC instant.
///
/// Accepted forms:
/// - `today`, `tomorrow` (midnight local time)
/// - `YYYY-MM-DD` (midnight local time)
/// - `YYYY-MM-DD HH:MM` / `YYYY-MM-DDTHH:MM` (local time)
/// - full RFC 3339 (`2025-06-01T09:00:00Z`)
pub fn parse_when(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    match s {
        "today" => return local_midnight(Local::now().date_naive()),
        "tomorrow" => return local_midnight(Local::now().date_naive() + Duration::days(1)),
        _ => {}
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
    {
        return local_to_utc(naive);
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return local_midnight(date);
    }

    None
}

fn local_midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    local_to_utc(date.and_time(NaiveTime::MIN))
}

fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    // `earliest` picks the first instant on DST-ambiguous wall times
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
