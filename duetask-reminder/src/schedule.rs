/// Wall-clock scheduling for the daily reminder run
///
/// The reminder fires at a fixed local time once per day (23:00 by default).
/// This module computes the next fire instant from "now", handling the two
/// daylight-saving edge cases:
///
/// - A wall-clock time that occurs twice (clocks fall back): the earlier
///   instant wins, so the run happens once and on time.
/// - A wall-clock time that does not occur (clocks spring forward): the run
///   shifts forward in whole hours until it lands on a real instant.
///
/// The service re-computes the next occurrence after every run, so a shifted
/// fire time affects one day only.

use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// Computes the next instant at which the daily run should fire
///
/// Returns the first occurrence of `hour:minute` local time strictly after
/// `now`. If today's occurrence has already passed (or is exactly now), the
/// result is tomorrow's.
///
/// Out-of-range `hour`/`minute` values fall back to midnight; the
/// configuration layer rejects them before they get here.
pub fn next_occurrence(now: DateTime<Local>, hour: u32, minute: u32) -> DateTime<Local> {
    let fire_time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);

    let today = now.date_naive();
    let mut candidate = today.and_time(fire_time);

    if candidate <= now.naive_local() {
        let tomorrow = today.succ_opt().unwrap_or(NaiveDate::MAX);
        candidate = tomorrow.and_time(fire_time);
    }

    resolve_local(candidate)
}

/// Maps a naive local datetime onto a real instant
///
/// Ambiguous times resolve to the earlier instant. Nonexistent times (the
/// spring-forward gap) shift forward an hour at a time until they resolve;
/// gaps are at most a few hours, so this terminates quickly.
fn resolve_local(naive: NaiveDateTime) -> DateTime<Local> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(instant) => instant,
        LocalResult::Ambiguous(earliest, _latest) => earliest,
        LocalResult::None => {
            let mut shifted = naive;
            loop {
                shifted += Duration::hours(1);
                match Local.from_local_datetime(&shifted) {
                    LocalResult::Single(instant) => break instant,
                    LocalResult::Ambiguous(earliest, _latest) => break earliest,
                    LocalResult::None => continue,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    /// Builds a local datetime for today at the given wall-clock time.
    ///
    /// Panics on ambiguous or nonexistent times, which only happens if the
    /// test runs during a DST transition at exactly that time.
    fn local_today_at(hour: u32, minute: u32) -> DateTime<Local> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap();
        let naive = Local::now().date_naive().and_time(time);
        Local
            .from_local_datetime(&naive)
            .single()
            .expect("test time should be unambiguous")
    }

    #[test]
    fn test_fires_later_today_when_time_not_yet_reached() {
        let now = local_today_at(10, 15);
        let next = next_occurrence(now, 23, 0);

        assert_eq!(next.date_naive(), now.date_naive());
        assert_eq!(next.hour(), 23);
        assert_eq!(next.minute(), 0);
    }

    #[test]
    fn test_fires_tomorrow_when_time_already_passed() {
        let now = local_today_at(23, 30);
        let next = next_occurrence(now, 23, 0);

        assert_eq!(next.date_naive(), now.date_naive().succ_opt().unwrap());
        assert_eq!(next.hour(), 23);
        assert_eq!(next.minute(), 0);
    }

    #[test]
    fn test_exact_fire_time_rolls_to_tomorrow() {
        let now = local_today_at(23, 0);
        let next = next_occurrence(now, 23, 0);

        assert!(next > now);
        assert_eq!(next.date_naive(), now.date_naive().succ_opt().unwrap());
    }

    #[test]
    fn test_result_is_always_strictly_in_the_future() {
        let now = Local::now();
        for hour in [0, 6, 12, 23] {
            let next = next_occurrence(now, hour, 0);
            assert!(next > now, "fire time {}:00 produced {}", hour, next);
            assert!(next - now <= Duration::hours(25));
        }
    }

    #[test]
    fn test_out_of_range_time_falls_back_to_midnight() {
        let now = local_today_at(12, 0);
        let next = next_occurrence(now, 99, 99);

        assert_eq!(next.hour(), 0);
        assert_eq!(next.minute(), 0);
        assert!(next > now);
    }
}
