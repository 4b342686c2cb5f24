//! Month grid arithmetic.
//!
//! The grid is laid out Monday-first. Everything here is pure except
//! [`is_today`] and [`today`], which read the local wall clock.

use crate::index::WorkoutIndex;
use crate::types::{ActivityType, Workout};
use chrono::{DateTime, Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, TimeZone};
use std::collections::BTreeSet;

/// Anything that falls on a calendar day.
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

impl CalendarDay for Workout {
    fn calendar_day(&self) -> NaiveDate {
        self.day()
    }
}

impl<T: CalendarDay + ?Sized> CalendarDay for &T {
    fn calendar_day(&self) -> NaiveDate {
        (**self).calendar_day()
    }
}

/// Today in the local calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn first_day_of_month(anchor: impl CalendarDay) -> NaiveDate {
    let d = anchor.calendar_day();
    d - Days::new(u64::from(d.day0()))
}

/// Every day of the month containing `anchor`, ascending.
pub fn dates_in_month(anchor: impl CalendarDay) -> Vec<NaiveDate> {
    let first = first_day_of_month(anchor);
    first
        .iter_days()
        .take_while(|d| d.month() == first.month())
        .collect()
}

/// Weekday of `date` numbered 1 = Sunday .. 7 = Saturday.
pub fn sunday_based_weekday(date: NaiveDate) -> u32 {
    date.weekday().number_from_sunday()
}

/// Blank cells before day 1 in a Monday-first week row. Always in `0..=6`.
pub fn weekday_offset(anchor: impl CalendarDay) -> u32 {
    (sunday_based_weekday(first_day_of_month(anchor)) + 5) % 7
}

pub fn is_same_day(a: impl CalendarDay, b: impl CalendarDay) -> bool {
    a.calendar_day() == b.calendar_day()
}

pub fn is_same_month(a: impl CalendarDay, anchor: impl CalendarDay) -> bool {
    let (a, m) = (a.calendar_day(), anchor.calendar_day());
    a.year() == m.year() && a.month() == m.month()
}

pub fn is_today(a: impl CalendarDay) -> bool {
    is_today_at(a, today())
}

pub fn is_today_at(a: impl CalendarDay, today: NaiveDate) -> bool {
    is_same_day(a, today)
}

/// Same day one month earlier, clamped to the shorter month's last day.
///
/// Stays put at the edge of the representable range.
pub fn previous_month(anchor: impl CalendarDay) -> NaiveDate {
    let d = anchor.calendar_day();
    d.checked_sub_months(Months::new(1)).unwrap_or(d)
}

pub fn next_month(anchor: impl CalendarDay) -> NaiveDate {
    let d = anchor.calendar_day();
    d.checked_add_months(Months::new(1)).unwrap_or(d)
}

/// e.g. `November 2025`
pub fn month_title(anchor: impl CalendarDay) -> String {
    anchor.calendar_day().format("%B %Y").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub has_workouts: bool,
    pub activity_types: BTreeSet<ActivityType>,
}

/// One month of the calendar with per-day workout markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub offset: u32,
    pub days: Vec<DayCell>,
}

impl MonthView {
    pub fn build(anchor: impl CalendarDay, index: &WorkoutIndex) -> Self {
        let first = first_day_of_month(anchor);
        let days = dates_in_month(first)
            .into_iter()
            .map(|date| {
                let activity_types = index.activity_types_on_day(date);
                DayCell {
                    date,
                    has_workouts: index.has_workouts_on_day(date),
                    activity_types,
                }
            })
            .collect();

        Self {
            year: first.year(),
            month: first.month(),
            offset: weekday_offset(first),
            days,
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.first().map(|c| c.date)
    }

    pub fn title(&self) -> String {
        self.first_day().map(month_title).unwrap_or_default()
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.days.iter().find(|c| c.date == date)
    }

    /// Week rows, Monday first. `None` marks a blank cell; the last row is
    /// filled out to seven cells.
    pub fn rows(&self) -> Vec<[Option<&DayCell>; 7]> {
        let leading = self.offset as usize;
        let mut cells: Vec<Option<&DayCell>> = std::iter::repeat_n(None, leading)
            .chain(self.days.iter().map(Some))
            .collect();
        let rem = cells.len() % 7;
        if rem != 0 {
            cells.extend(std::iter::repeat_n(None, 7 - rem));
        }

        cells
            .chunks_exact(7)
            .map(|row| {
                let mut out = [None; 7];
                out.copy_from_slice(row);
                out
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn gregorian_len(y: i32, m: u32) -> usize {
        match m {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ if (y % 4 == 0 && y % 100 != 0) || y % 400 == 0 => 29,
            _ => 28,
        }
    }

    #[test]
    fn test_dates_in_month_lengths_and_order() {
        for y in 1890..=2110 {
            for m in 1..=12 {
                let dates = dates_in_month(day(y, m, 15));
                assert_eq!(dates.len(), gregorian_len(y, m), "{y}-{m}");
                assert_eq!(dates[0], day(y, m, 1));
                for pair in dates.windows(2) {
                    assert_eq!(pair[1] - pair[0], chrono::Duration::days(1));
                }
            }
        }
    }

    #[test]
    fn test_february_leap_years() {
        assert_eq!(dates_in_month(day(2024, 2, 10)).len(), 29);
        assert_eq!(dates_in_month(day(2025, 2, 10)).len(), 28);
        assert_eq!(dates_in_month(day(2000, 2, 1)).len(), 29);
        assert_eq!(dates_in_month(day(1900, 2, 28)).len(), 28);
    }

    #[test]
    fn test_weekday_offset_range() {
        for y in 1990..=2040 {
            for m in 1..=12 {
                assert!(weekday_offset(day(y, m, 1)) <= 6);
            }
        }
    }

    #[test]
    fn test_weekday_offset_known_months() {
        // 2025-11-01 is a Saturday: (7 + 5) % 7
        assert_eq!(weekday_offset(day(2025, 11, 18)), 5);
        // 2025-09-01 is a Monday
        assert_eq!(weekday_offset(day(2025, 9, 30)), 0);
        // 2025-06-01 is a Sunday
        assert_eq!(weekday_offset(day(2025, 6, 1)), 6);
    }

    #[test]
    fn test_weekday_offset_matches_monday_index() {
        for y in 2000..=2030 {
            for m in 1..=12 {
                let first = day(y, m, 1);
                assert_eq!(
                    weekday_offset(first),
                    first.weekday().num_days_from_monday()
                );
            }
        }
    }

    #[test]
    fn test_same_day_ignores_time() {
        assert!(is_same_day(at("2025-11-25 00:00:00"), at("2025-11-25 23:59:59")));
        assert!(!is_same_day(at("2025-11-25 23:59:59"), at("2025-11-26 00:00:00")));
        assert!(is_same_day(at("2025-11-25 09:30:00"), day(2025, 11, 25)));
    }

    #[test]
    fn test_same_day_with_zoned_times() {
        let utc = Utc.with_ymd_and_hms(2025, 11, 25, 23, 30, 0).unwrap();
        let plus2 = utc.with_timezone(&FixedOffset::east_opt(2 * 3600).unwrap());
        assert!(is_same_day(utc, day(2025, 11, 25)));
        assert!(is_same_day(plus2, day(2025, 11, 26)));
    }

    #[test]
    fn test_same_month() {
        assert!(is_same_month(day(2025, 11, 1), day(2025, 11, 30)));
        assert!(!is_same_month(day(2025, 12, 1), day(2025, 11, 30)));
        assert!(!is_same_month(day(2024, 11, 1), day(2025, 11, 1)));
    }

    #[test]
    fn test_is_today_at() {
        let pinned = day(2025, 11, 25);
        assert!(is_today_at(at("2025-11-25 18:00:00"), pinned));
        assert!(!is_today_at(day(2025, 11, 24), pinned));
        assert!(is_today(today()));
    }

    #[test]
    fn test_month_navigation_clamps() {
        assert_eq!(previous_month(day(2025, 3, 31)), day(2025, 2, 28));
        assert_eq!(next_month(day(2024, 1, 31)), day(2024, 2, 29));
        assert_eq!(next_month(day(2025, 12, 15)), day(2026, 1, 15));
        assert_eq!(previous_month(day(2025, 1, 15)), day(2024, 12, 15));
    }

    #[test]
    fn test_month_title() {
        assert_eq!(month_title(day(2025, 11, 25)), "November 2025");
    }

    fn sample_index() -> WorkoutIndex {
        WorkoutIndex::new(vec![
            Workout::new("1", ActivityType::WalkingRunning, at("2025-11-25 09:30:00")),
            Workout::new("2", ActivityType::Yoga, at("2025-11-25 15:45:00")),
            Workout::new("3", ActivityType::Cycling, at("2025-11-26 10:00:00")),
            Workout::new("4", ActivityType::Strength, at("2025-12-01 10:00:00")),
        ])
    }

    #[test]
    fn test_month_view_markers() {
        let view = MonthView::build(day(2025, 11, 3), &sample_index());
        assert_eq!((view.year, view.month, view.offset), (2025, 11, 5));
        assert_eq!(view.days.len(), 30);
        assert_eq!(view.title(), "November 2025");

        let c25 = view.cell(day(2025, 11, 25)).unwrap();
        assert!(c25.has_workouts);
        assert_eq!(c25.activity_types.len(), 2);

        let c26 = view.cell(day(2025, 11, 26)).unwrap();
        assert!(c26.activity_types.contains(&ActivityType::Cycling));

        let c20 = view.cell(day(2025, 11, 20)).unwrap();
        assert!(!c20.has_workouts);
        assert!(c20.activity_types.is_empty());

        assert_eq!(view.days.iter().filter(|c| c.has_workouts).count(), 2);
    }

    #[test]
    fn test_month_view_rows() {
        let view = MonthView::build(day(2025, 11, 3), &sample_index());
        let rows = view.rows();
        // 5 blanks + 30 days = 35 cells
        assert_eq!(rows.len(), 5);
        assert!(rows[0][..5].iter().all(Option::is_none));
        assert_eq!(rows[0][5].map(|c| c.date), Some(day(2025, 11, 1)));
        assert_eq!(rows[4][6].map(|c| c.date), Some(day(2025, 11, 30)));

        // 2026-02 starts on a Sunday: 6 blanks + 28 days, padded to 35
        let feb = MonthView::build(day(2026, 2, 1), &WorkoutIndex::default());
        let rows = feb.rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0][6].map(|c| c.date), Some(day(2026, 2, 1)));
        assert!(rows[4][6].is_none());
    }
}
