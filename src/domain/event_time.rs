//! StatsBomb event-time math: timestamp parsing, minutes-played
//! estimation, and per-90 rate scaling.

/// Minutes assumed when no event timestamp parses.
pub const FALLBACK_MINUTES: u32 = 90;

/// Parses a StatsBomb `HH:MM:SS.mmm` timestamp into seconds from the
/// start of the period. Returns `None` for malformed input.
#[must_use]
pub fn timestamp_to_seconds(ts: &str) -> Option<f64> {
    let mut parts = ts.splitn(3, ':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    let seconds: f64 = parts.next()?.parse().ok()?;
    if minutes >= 60 || !(0.0..60.0).contains(&seconds) {
        return None;
    }
    Some(f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + seconds)
}

/// Estimates minutes played from a set of raw event timestamps.
///
/// Returns `max_minute + 1` over every timestamp that parses (a match with
/// an event at `00:47:13` ran at least 48 minutes), with a floor of one
/// minute. When nothing parses, assumes [`FALLBACK_MINUTES`].
#[must_use]
pub fn minutes_played<'a, I>(timestamps: I) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    let max_minute = timestamps
        .into_iter()
        .filter_map(timestamp_to_seconds)
        .map(|secs| (secs / 60.0) as u32)
        .max();
    match max_minute {
        Some(m) => m.saturating_add(1).max(1),
        None => FALLBACK_MINUTES,
    }
}

/// Scales an event count to a per-90-minutes rate.
#[must_use]
pub fn per_90(count: i64, minutes: u32) -> f64 {
    let minutes = minutes.max(1);
    count as f64 * 90.0 / f64::from(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_statsbomb_timestamp() {
        let Some(secs) = timestamp_to_seconds("00:47:13.457") else {
            unreachable!("timestamp should parse");
        };
        assert!((secs - 2833.457).abs() < 1e-9);
    }

    #[test]
    fn rejects_malformed_timestamps() {
        assert!(timestamp_to_seconds("").is_none());
        assert!(timestamp_to_seconds("47:13").is_none());
        assert!(timestamp_to_seconds("00:99:13.457").is_none());
        assert!(timestamp_to_seconds("abc:00:00").is_none());
    }

    #[test]
    fn minutes_from_latest_event() {
        let stamps = ["00:12:34.567", "00:47:13.457", "00:03:01.000"];
        assert_eq!(minutes_played(stamps), 48);
    }

    #[test]
    fn minutes_fall_back_to_ninety() {
        let stamps = ["not-a-timestamp", ""];
        assert_eq!(minutes_played(stamps), FALLBACK_MINUTES);
        assert_eq!(minutes_played([]), FALLBACK_MINUTES);
    }

    #[test]
    fn per_90_scales_by_minutes() {
        assert!((per_90(45, 90) - 45.0).abs() < 1e-9);
        assert!((per_90(10, 45) - 20.0).abs() < 1e-9);
        // zero-minute guard
        assert!((per_90(3, 0) - 270.0).abs() < 1e-9);
    }
}
