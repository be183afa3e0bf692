//! Month arithmetic and the calendar day grid.
//!
//! The grid for a month is a run of week rows. The first row is padded with
//! blank cells up to the weekday of the 1st, and the last row is padded with
//! blank cells to a full week.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};

use crate::db::TaskStore;
use crate::fields::WeekStart;

/// A calendar month, stored as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// `month` is 1-based. Returns `None` outside chrono's supported range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(YearMonth)
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        // Day 1 exists for every month chrono can represent.
        YearMonth(date - chrono::Duration::days(i64::from(date.day0())))
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn first_day(self) -> NaiveDate {
        self.0
    }

    /// The month before this one, rolling back into December of the
    /// previous year. Saturates at the earliest representable month.
    pub fn prev(self) -> Self {
        self.0
            .checked_sub_months(Months::new(1))
            .map(YearMonth)
            .unwrap_or(self)
    }

    /// The month after this one, rolling into January of the next year.
    /// Saturates at the latest representable month.
    pub fn next(self) -> Self {
        self.0
            .checked_add_months(Months::new(1))
            .map(YearMonth)
            .unwrap_or(self)
    }

    /// Number of days in the month, leap years included.
    pub fn days_in_month(self) -> u32 {
        match self.0.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.0).num_days() as u32,
            // Only December of chrono's final year lands here.
            None => 31,
        }
    }

    /// Day `day` (1-based) of this month.
    pub fn day(self, day: u32) -> Option<NaiveDate> {
        self.0.with_day(day)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Human label such as "March 2024".
    pub fn label(self) -> String {
        self.0.format("%B %Y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

impl FromStr for YearMonth {
    type Err = chrono::ParseError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let first = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")?;
        Ok(YearMonth(first))
    }
}

/// Number of days in `month` of `year`, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    YearMonth::new(year, month).map(YearMonth::days_in_month)
}

/// Number of blank cells before the 1st of `month` in a grid whose first
/// column is `week_start`.
pub fn first_weekday_offset(month: YearMonth, week_start: WeekStart) -> u32 {
    week_start.column_of(month.first_day().weekday())
}

/// One day of the displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day: u32,
    pub selected: bool,
    pub today: bool,
    pub has_tasks: bool,
}

/// The day grid for one month. `None` cells are padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub week_start: WeekStart,
    pub cells: Vec<Option<DayCell>>,
}

impl MonthGrid {
    /// Rows of seven cells each.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<DayCell>]> {
        self.cells.chunks(7)
    }

    /// Number of padding cells before the 1st.
    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_none()).count()
    }

    /// Day cells only, in date order.
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().flatten()
    }

    /// Row and column of `date`, if it is in this month.
    pub fn position_of(&self, date: NaiveDate) -> Option<(usize, usize)> {
        if !self.month.contains(date) {
            return None;
        }
        let idx = self.leading_blanks() + date.day0() as usize;
        Some((idx / 7, idx % 7))
    }
}

/// Build the grid for `month`, marking the selected day, today, and days
/// that hold tasks in `store`.
pub fn month_grid(
    month: YearMonth,
    selected: NaiveDate,
    today: NaiveDate,
    store: &TaskStore,
    week_start: WeekStart,
) -> MonthGrid {
    let offset = first_weekday_offset(month, week_start) as usize;
    let days = month.days_in_month() as usize;
    let total = (offset + days).div_ceil(7) * 7;

    let mut cells = Vec::with_capacity(total);
    cells.resize(offset, None);
    for day in 1..=days as u32 {
        if let Some(date) = month.day(day) {
            cells.push(Some(DayCell {
                date,
                day,
                selected: date == selected,
                today: date == today,
                has_tasks: store.has_tasks(date),
            }));
        }
    }
    cells.resize(total, None);

    MonthGrid {
        month,
        week_start,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    #[test]
    fn month_lengths_including_leap_years() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 13), None);
        assert_eq!(days_in_month(2024, 0), None);
    }

    #[test]
    fn offset_follows_week_start() {
        // 1 March 2024 was a Friday.
        assert_eq!(first_weekday_offset(ym(2024, 3), WeekStart::Sunday), 5);
        assert_eq!(first_weekday_offset(ym(2024, 3), WeekStart::Monday), 4);
        // 1 September 2024 was a Sunday.
        assert_eq!(first_weekday_offset(ym(2024, 9), WeekStart::Sunday), 0);
        assert_eq!(first_weekday_offset(ym(2024, 9), WeekStart::Monday), 6);
    }

    #[test]
    fn navigation_rolls_the_year() {
        assert_eq!(ym(2024, 12).next(), ym(2025, 1));
        assert_eq!(ym(2025, 1).prev(), ym(2024, 12));
        assert_eq!(ym(2024, 3).next().prev(), ym(2024, 3));
    }

    #[test]
    fn of_and_contains() {
        let month = YearMonth::of(d(2024, 2, 29));
        assert_eq!(month, ym(2024, 2));
        assert!(month.contains(d(2024, 2, 1)));
        assert!(!month.contains(d(2023, 2, 1)));
    }

    #[test]
    fn parses_and_displays_year_month() {
        let month: YearMonth = "2024-03".parse().unwrap();
        assert_eq!(month, ym(2024, 3));
        assert_eq!(month.to_string(), "2024-03");
        assert_eq!(month.label(), "March 2024");
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("march".parse::<YearMonth>().is_err());
    }

    #[test]
    fn cell_count_is_padded_to_whole_weeks_for_every_month() {
        let store = TaskStore::new();
        let today = d(2024, 1, 1);
        for year in [1900, 1999, 2000, 2023, 2024, 2100] {
            for month in 1..=12 {
                for week_start in [WeekStart::Sunday, WeekStart::Monday] {
                    let m = ym(year, month);
                    let grid = month_grid(m, today, today, &store, week_start);
                    let offset = first_weekday_offset(m, week_start) as usize;
                    let days = m.days_in_month() as usize;
                    assert_eq!(grid.cells.len(), (offset + days).div_ceil(7) * 7);
                    assert_eq!(grid.leading_blanks(), offset);
                    assert_eq!(grid.days().count(), days);
                    assert!(grid.cells.len() >= offset + days);
                    assert!(grid.cells.len() - (offset + days) < 7);
                }
            }
        }
    }

    #[test]
    fn marks_selected_today_and_task_days() {
        let mut store = TaskStore::new();
        store.add(d(2024, 3, 20), "Dentist", 1).unwrap();
        let grid = month_grid(
            ym(2024, 3),
            d(2024, 3, 15),
            d(2024, 3, 18),
            &store,
            WeekStart::Sunday,
        );

        let marked: Vec<_> = grid
            .days()
            .filter(|c| c.selected || c.today || c.has_tasks)
            .map(|c| (c.day, c.selected, c.today, c.has_tasks))
            .collect();
        assert_eq!(
            marked,
            vec![
                (15, true, false, false),
                (18, false, true, false),
                (20, false, false, true),
            ]
        );
    }

    #[test]
    fn february_2015_fits_four_rows() {
        // Starts on a Sunday and has 28 days.
        let today = d(2015, 2, 1);
        let grid = month_grid(ym(2015, 2), today, today, &TaskStore::new(), WeekStart::Sunday);
        assert_eq!(grid.weeks().count(), 4);
        assert_eq!(grid.position_of(d(2015, 2, 28)), Some((3, 6)));
        assert_eq!(grid.position_of(d(2015, 3, 1)), None);
    }
}
