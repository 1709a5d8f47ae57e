//! Rental Windows

use jiff::civil::{Date, Time};

/// Parses a calendar date from a raw form value.
#[must_use]
pub fn parse_date(text: &str) -> Option<Date> {
    text.trim().parse().ok()
}

/// Parses a time of day from a raw form value.
#[must_use]
pub fn parse_time(text: &str) -> Option<Time> {
    text.trim().parse().ok()
}

/// Number of billable days for a start/end pair given as raw strings.
///
/// The count is inclusive of both endpoints and never less than one: a
/// same-day rental bills one day, and unparseable input falls back to one
/// day rather than failing.
#[must_use]
pub fn day_count(start: &str, end: &str) -> i64 {
    match (parse_date(start), parse_date(end)) {
        (Some(start), Some(end)) => days_inclusive(start, end),
        _ => 1,
    }
}

fn days_inclusive(start: Date, end: Date) -> i64 {
    (i64::from((end - start).get_days()) + 1).max(1)
}

/// A rental date range with optional receive and return times.
///
/// The window keeps `end >= start`: setting an end before the start pulls
/// the end forward instead of rejecting it, and setting a start after the
/// end drags the end along. Times are display-only and never affect the day
/// count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalWindow {
    start: Date,
    end: Date,
    receive_time: Option<Time>,
    return_time: Option<Time>,
}

impl RentalWindow {
    /// Creates a window, pulling `end` forward to `start` when inverted.
    #[must_use]
    pub fn new(start: Date, end: Date) -> Self {
        RentalWindow {
            start,
            end: end.max(start),
            receive_time: None,
            return_time: None,
        }
    }

    /// Default window for a given day: starts today, ends tomorrow.
    #[must_use]
    pub fn starting(today: Date) -> Self {
        Self::new(today, today.tomorrow().unwrap_or(today))
    }

    /// Rental start date.
    #[must_use]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Rental end date.
    #[must_use]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Time of day the rental is received, if chosen.
    #[must_use]
    pub fn receive_time(&self) -> Option<Time> {
        self.receive_time
    }

    /// Time of day the rental is returned, if chosen.
    #[must_use]
    pub fn return_time(&self) -> Option<Time> {
        self.return_time
    }

    /// Sets the start date, dragging the end forward if it would fall
    /// before the new start.
    pub fn set_start(&mut self, start: Date) {
        self.start = start;

        if self.end < start {
            self.end = start;
        }
    }

    /// Sets the end date, clamped to no earlier than the start.
    pub fn set_end(&mut self, end: Date) {
        self.end = end.max(self.start);
    }

    /// Sets the receive time.
    pub fn set_receive_time(&mut self, time: Option<Time>) {
        self.receive_time = time;
    }

    /// Sets the return time.
    pub fn set_return_time(&mut self, time: Option<Time>) {
        self.return_time = time;
    }

    /// Billable days, inclusive of both endpoints, never less than one.
    #[must_use]
    pub fn days(&self) -> i64 {
        days_inclusive(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn day_count_is_inclusive() {
        assert_eq!(day_count("2024-01-01", "2024-01-01"), 1);
        assert_eq!(day_count("2024-01-01", "2024-01-03"), 3);
    }

    #[test]
    fn unparseable_dates_bill_one_day() {
        assert_eq!(day_count("not a date", "2024-01-03"), 1);
        assert_eq!(day_count("2024-01-01", ""), 1);
    }

    #[test]
    fn inverted_range_never_goes_below_one() {
        assert_eq!(day_count("2024-01-05", "2024-01-01"), 1);
    }

    #[test]
    fn day_count_spans_month_boundaries() {
        assert_eq!(day_count("2024-01-30", "2024-02-02"), 4);
    }

    #[test]
    fn new_pulls_inverted_end_forward() {
        let window = RentalWindow::new(date(2024, 6, 5), date(2024, 6, 1));

        assert_eq!(window.end(), window.start());
        assert_eq!(window.days(), 1);
    }

    #[test]
    fn set_end_clamps_to_start() {
        let mut window = RentalWindow::new(date(2024, 6, 1), date(2024, 6, 3));

        window.set_end(date(2024, 5, 20));

        assert_eq!(window.end(), date(2024, 6, 1));
    }

    #[test]
    fn set_start_drags_end_along() {
        let mut window = RentalWindow::new(date(2024, 6, 1), date(2024, 6, 3));

        window.set_start(date(2024, 6, 10));

        assert_eq!(window.end(), date(2024, 6, 10));
        assert_eq!(window.days(), 1);
    }

    #[test]
    fn times_do_not_affect_day_math() {
        let mut window = RentalWindow::new(date(2024, 6, 1), date(2024, 6, 3));

        window.set_receive_time(parse_time("10:00"));
        window.set_return_time(parse_time("18:30"));

        assert_eq!(window.days(), 3);
    }

    #[test]
    fn starting_covers_today_and_tomorrow() {
        let window = RentalWindow::starting(date(2024, 6, 1));

        assert_eq!(window.start(), date(2024, 6, 1));
        assert_eq!(window.end(), date(2024, 6, 2));
        assert_eq!(window.days(), 2);
    }
}
