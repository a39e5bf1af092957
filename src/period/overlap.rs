use chrono::{Datelike, Months, NaiveDate};

/// one calendar month, first to last day inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthWindow {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

impl MonthWindow {
    /// the month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        // day 1 of an existing month always exists
        let first_day = date.with_day(1).unwrap_or(date);
        Self::starting_at(first_day)
    }

    fn starting_at(first_day: NaiveDate) -> Self {
        let last_day = first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        Self { first_day, last_day }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day.day()
    }

    /// english month name and year, e.g. "January 2025"
    pub fn label(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }

    /// the following calendar month, `None` past the end of the calendar
    pub fn next(&self) -> Option<Self> {
        self.last_day.succ_opt().map(Self::starting_at)
    }

    pub fn overlap_days(&self, start_date: NaiveDate, end_date: NaiveDate) -> u32 {
        occupied_days(self.first_day, self.last_day, start_date, end_date)
    }
}

/// inclusive day overlap between a month window and a date range
///
/// non-overlapping inputs yield 0
pub fn occupied_days(
    month_start: NaiveDate,
    month_end: NaiveDate,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> u32 {
    let from = month_start.max(start_date);
    let to = month_end.min(end_date);
    if to < from {
        return 0;
    }
    ((to - from).num_days() + 1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_bounds() {
        let jan = MonthWindow::containing(date(2025, 1, 15));
        assert_eq!(jan.first_day, date(2025, 1, 1));
        assert_eq!(jan.last_day, date(2025, 1, 31));
        assert_eq!(jan.days_in_month(), 31);
        assert_eq!(jan.label(), "January 2025");

        let feb = jan.next().unwrap();
        assert_eq!(feb.first_day, date(2025, 2, 1));
        assert_eq!(feb.days_in_month(), 28);
    }

    #[test]
    fn test_leap_february() {
        let feb = MonthWindow::containing(date(2024, 2, 29));
        assert_eq!(feb.days_in_month(), 29);
        assert_eq!(feb.label(), "February 2024");
    }

    #[test]
    fn test_year_rollover() {
        let dec = MonthWindow::containing(date(2024, 12, 31));
        let jan = dec.next().unwrap();
        assert_eq!(jan.year(), 2025);
        assert_eq!(jan.month(), 1);
    }

    #[test]
    fn test_occupied_days() {
        let (start, end) = (date(2025, 1, 1), date(2025, 1, 31));

        // partial overlap at both ends
        assert_eq!(occupied_days(start, end, date(2025, 1, 15), date(2025, 2, 10)), 17);
        assert_eq!(occupied_days(start, end, date(2024, 12, 20), date(2025, 1, 5)), 5);

        // fully covered
        assert_eq!(occupied_days(start, end, date(2024, 12, 1), date(2025, 3, 1)), 31);

        // single day
        assert_eq!(occupied_days(start, end, date(2025, 1, 31), date(2025, 1, 31)), 1);
    }

    #[test]
    fn test_no_overlap() {
        let (start, end) = (date(2025, 1, 1), date(2025, 1, 31));
        assert_eq!(occupied_days(start, end, date(2025, 2, 1), date(2025, 2, 10)), 0);
        assert_eq!(occupied_days(start, end, date(2024, 11, 1), date(2024, 12, 31)), 0);
        // reversed range never overlaps
        assert_eq!(occupied_days(start, end, date(2025, 1, 20), date(2025, 1, 10)), 0);
    }
}
