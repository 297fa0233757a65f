//! Time utilities: timezone-aware due dates and calendar days.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse an IANA timezone name like "America/Chicago".
pub fn parse_tz(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// Parse a due date like "2026-02-20 23:59" in an IANA tz, returning UTC.
/// A bare date like "2026-02-20" means end of that local day.
pub fn parse_local_due_to_utc(local: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let ndt = match NaiveDateTime::parse_from_str(local, "%Y-%m-%d %H:%M") {
        Ok(ndt) => ndt,
        Err(_) => NaiveDate::parse_from_str(local, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("invalid due date '{local}': {e}"))?
            .and_hms_opt(23, 59, 0)
            .ok_or_else(|| anyhow::anyhow!("invalid due date '{local}'"))?,
    };

    let local_dt = tz
        .from_local_datetime(&ndt)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous or invalid local time (DST?): {local} {tz}"))?;

    Ok(local_dt.with_timezone(&Utc))
}

/// Calendar day of `now` in the given timezone. Streaks and per-day counts
/// all run on this.
pub fn local_day(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chicago_due_date() {
        // Feb is CST (UTC-6)
        let tz = parse_tz("America/Chicago").unwrap();
        let utc = parse_local_due_to_utc("2026-02-20 23:59", tz).unwrap();
        assert_eq!(utc.to_rfc3339(), "2026-02-21T05:59:00+00:00");
    }

    #[test]
    fn test_bare_date_means_end_of_day() {
        let tz = parse_tz("UTC").unwrap();
        let utc = parse_local_due_to_utc("2026-02-20", tz).unwrap();
        assert_eq!(utc.to_rfc3339(), "2026-02-20T23:59:00+00:00");
    }

    #[test]
    fn test_local_day_crosses_midnight_before_utc() {
        // 03:00 UTC on the 21st is still the evening of the 20th in Chicago.
        let tz = parse_tz("America/Chicago").unwrap();
        let now = Utc.with_ymd_and_hms(2026, 2, 21, 3, 0, 0).unwrap();
        assert_eq!(local_day(now, tz), NaiveDate::from_ymd_opt(2026, 2, 20).unwrap());
        assert_eq!(
            local_day(now, parse_tz("UTC").unwrap()),
            NaiveDate::from_ymd_opt(2026, 2, 21).unwrap()
        );
    }

    #[test]
    fn test_bad_inputs_error() {
        assert!(parse_tz("Mars/Olympus").is_err());
        let tz = parse_tz("UTC").unwrap();
        assert!(parse_local_due_to_utc("tomorrow", tz).is_err());
    }
}
