use chrono::NaiveDateTime;

const SECS_PER_DAY: i64 = 24 * 60 * 60;

/// Whole days between `now` and the trip start, rounded up.
///
/// This is the single source of truth for the cancellation window: a trip
/// starting in 1 second is "1 day away", one starting right now (or in the
/// past) is 0 or negative. Use this instead of subtracting dates directly so
/// every view applies the same rounding.
pub fn days_until_trip(start_date: NaiveDateTime, now: NaiveDateTime) -> i64 {
    let secs = (start_date - now).num_seconds();
    // Ceiling division that also behaves for past dates.
    (secs + SECS_PER_DAY - 1).div_euclid(SECS_PER_DAY)
}
