use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::time::Resolution;

/// Fills in the date of an event endpoint that was given only as a clock time.
///
/// The time-only endpoint carries `today` as its date (stamped by the
/// resolver). When exactly one endpoint sits on `today` and both carry a
/// clock time, the other endpoint's date is borrowed:
///
/// - start inferred: same day if `from_time <= to_time`, else the day before.
/// - end inferred: same day if `to_time >= from_time`, else the day after.
///
/// Times are never changed. Anything else, including a borrowed date that
/// would fall outside the calendar range, returns the endpoints untouched.
pub fn infer_event_range(
    from: Resolution,
    to: Resolution,
    today: NaiveDate,
) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
    let (Some(start), Some(end)) = (from.date_time, to.date_time) else {
        return (from.date_time, to.date_time);
    };
    if !(from.has_time && to.has_time) {
        return (Some(start), Some(end));
    }

    let start_is_today = start.date() == today;
    let end_is_today = end.date() == today;

    match (start_is_today, end_is_today) {
        (true, false) => {
            let date = if start.time() <= end.time() {
                Some(end.date())
            } else {
                end.date().checked_sub_days(Days::new(1))
            };
            match date {
                Some(date) => (Some(date.and_time(start.time())), Some(end)),
                None => (Some(start), Some(end)),
            }
        }
        (false, true) => {
            let date = if end.time() < start.time() {
                start.date().checked_add_days(Days::new(1))
            } else {
                Some(start.date())
            };
            match date {
                Some(date) => (Some(start), Some(date.and_time(end.time()))),
                None => (Some(start), Some(end)),
            }
        }
        _ => (Some(start), Some(end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::DateTimeResolver;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
    }

    fn infer(from: &str, to: &str) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
        let resolver = DateTimeResolver::with_today(today());
        infer_event_range(resolver.resolve(from), resolver.resolve(to), today())
    }

    #[test]
    fn test_start_after_end_spills_to_previous_day() {
        let (from, to) = infer("1800", "2019-12-02 0600");
        assert_eq!(from, at(2019, 12, 1, 18, 0));
        assert_eq!(to, at(2019, 12, 2, 6, 0));
    }

    #[test]
    fn test_start_before_end_stays_on_same_day() {
        let (from, to) = infer("0600", "2019-12-02 1800");
        assert_eq!(from, at(2019, 12, 2, 6, 0));
        assert_eq!(to, at(2019, 12, 2, 18, 0));
    }

    #[test]
    fn test_equal_times_share_the_day() {
        let (from, _) = infer("1800", "2019-12-02 1800");
        assert_eq!(from, at(2019, 12, 2, 18, 0));
        let (_, to) = infer("2019-12-02 1800", "1800");
        assert_eq!(to, at(2019, 12, 2, 18, 0));
    }

    #[test]
    fn test_end_before_start_spills_to_next_day() {
        let (from, to) = infer("2019-12-02 2200", "0130");
        assert_eq!(from, at(2019, 12, 2, 22, 0));
        assert_eq!(to, at(2019, 12, 3, 1, 30));
    }

    #[test]
    fn test_end_after_start_stays_on_same_day() {
        let (from, to) = infer("2019-12-02 0900", "5:30 PM");
        assert_eq!(from, at(2019, 12, 2, 9, 0));
        assert_eq!(to, at(2019, 12, 2, 17, 30));
    }

    #[test]
    fn test_both_time_only_keep_today() {
        let (from, to) = infer("1800", "0600");
        assert_eq!(from, at(2024, 3, 15, 18, 0));
        assert_eq!(to, at(2024, 3, 15, 6, 0));
    }

    #[test]
    fn test_date_only_endpoint_disables_inference() {
        let (from, to) = infer("1800", "2019-12-02");
        assert_eq!(from, at(2024, 3, 15, 18, 0));
        assert_eq!(to, at(2019, 12, 2, 0, 0));
    }

    #[test]
    fn test_unresolved_endpoint_disables_inference() {
        let (from, to) = infer("1800", "after lunch");
        assert_eq!(from, at(2024, 3, 15, 18, 0));
        assert_eq!(to, None);
    }

    #[test]
    fn test_borrowed_date_at_calendar_edges_keeps_endpoints() {
        let timed = |dt: NaiveDateTime| Resolution {
            date_time: Some(dt),
            has_time: true,
        };

        let last = NaiveDate::MAX.and_hms_opt(22, 0, 0).unwrap();
        let early = today().and_hms_opt(1, 30, 0).unwrap();
        let (from, to) = infer_event_range(timed(last), timed(early), today());
        assert_eq!(from, Some(last));
        assert_eq!(to, Some(early));

        let late = today().and_hms_opt(18, 0, 0).unwrap();
        let first = NaiveDate::MIN.and_hms_opt(6, 0, 0).unwrap();
        let (from, to) = infer_event_range(timed(late), timed(first), today());
        assert_eq!(from, Some(late));
        assert_eq!(to, Some(first));
    }
}
