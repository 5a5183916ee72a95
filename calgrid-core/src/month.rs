//! Month cursor and day-grid math.
//!
//! The grid is a flat sequence of cells padded to whole weeks: leading
//! blanks up to the weekday of day 1 (Sunday-first), then every day of the
//! month, then trailing blanks until the length is a multiple of 7. Day
//! lookups compare whole calendar dates so entries never bleed across month
//! or year boundaries.

use chrono::{Datelike, NaiveDate};

use crate::error::{StoreError, StoreResult};
use crate::event::CalendarEvent;

/// Cells per grid row.
pub const DAYS_PER_WEEK: usize = 7;

/// One cell of the month grid: a day number, or a leading/trailing blank.
pub type GridCell = Option<u32>;

/// The (year, month) pair currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> StoreResult<Self> {
        match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(_) => Ok(MonthCursor { year, month }),
            None => Err(StoreError::InvalidMonth { year, month }),
        }
    }

    /// The cursor for the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        MonthCursor {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Previous month, wrapping the year boundary.
    pub fn prev(self) -> Self {
        if self.month == 1 {
            MonthCursor {
                year: self.year - 1,
                month: 12,
            }
        } else {
            MonthCursor {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Next month, wrapping the year boundary.
    pub fn next(self) -> Self {
        if self.month == 12 {
            MonthCursor {
                year: self.year + 1,
                month: 1,
            }
        } else {
            MonthCursor {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // Construction only ever goes through `new` or `containing`, so the
        // (year, month) pair is representable.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    /// Number of days in the month.
    pub fn day_count(&self) -> u32 {
        self.next().first_day().pred_opt().unwrap().day()
    }

    /// The date of a given day number, if the month has one.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The month anchor in wire form (`YYYY-MM-01`).
    pub fn anchor(&self) -> String {
        self.first_day().format("%Y-%m-%d").to_string()
    }

    /// Human label, e.g. "March 2025".
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

/// Build the padded grid for a month.
pub fn month_grid(cursor: MonthCursor) -> Vec<GridCell> {
    let leading = cursor.first_day().weekday().num_days_from_sunday() as usize;

    let mut cells: Vec<GridCell> = Vec::with_capacity(DAYS_PER_WEEK * 6);
    cells.resize(leading, None);
    cells.extend((1..=cursor.day_count()).map(Some));
    while cells.len() % DAYS_PER_WEEK != 0 {
        cells.push(None);
    }
    cells
}

/// First cached event anchored to `date`, if any.
///
/// One date holds at most one entry as far as the UI is concerned; when the
/// store returns more, the first match wins.
pub fn event_on(events: &[CalendarEvent], date: NaiveDate) -> Option<&CalendarEvent> {
    events.iter().find(|e| e.date == date)
}

/// All cached events anchored to `date`.
pub fn events_on(events: &[CalendarEvent], date: NaiveDate) -> impl Iterator<Item = &CalendarEvent> {
    events.iter().filter(move |e| e.date == date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(year: i32, month: u32) -> MonthCursor {
        MonthCursor::new(year, month).unwrap()
    }

    fn event(id: i64, date: &str) -> CalendarEvent {
        CalendarEvent {
            id: Some(id),
            title: format!("event-{id}"),
            description: String::new(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    #[test]
    fn march_2025_grid_has_six_leading_blanks() {
        // March 1, 2025 is a Saturday (weekday index 6), so the 31 days plus
        // the leading blanks pad out to six whole weeks.
        let grid = month_grid(cursor(2025, 3));
        assert_eq!(grid.len(), 42);
        assert_eq!(grid.iter().take_while(|c| c.is_none()).count(), 6);
        assert_eq!(grid[6], Some(1));
        assert_eq!(grid[36], Some(31));
        assert!(grid[37..].iter().all(|c| c.is_none()));
    }

    #[test]
    fn grid_is_whole_weeks_and_covers_every_day_once() {
        for (year, month) in [(2024, 2), (2025, 2), (2025, 6), (2025, 12), (2026, 1)] {
            let c = cursor(year, month);
            let grid = month_grid(c);

            assert_eq!(grid.len() % DAYS_PER_WEEK, 0, "{year}-{month}");

            let days: Vec<u32> = grid.iter().flatten().copied().collect();
            let expected: Vec<u32> = (1..=c.day_count()).collect();
            assert_eq!(days, expected, "{year}-{month}");

            let leading = grid.iter().take_while(|cell| cell.is_none()).count();
            let weekday = c.first_day().weekday().num_days_from_sunday() as usize;
            assert_eq!(leading, weekday, "{year}-{month}");
        }
    }

    #[test]
    fn day_count_tracks_leap_years() {
        assert_eq!(cursor(2024, 2).day_count(), 29);
        assert_eq!(cursor(2025, 2).day_count(), 28);
        assert_eq!(cursor(2025, 12).day_count(), 31);
    }

    #[test]
    fn cursor_wraps_year_boundaries() {
        assert_eq!(cursor(2025, 1).prev(), cursor(2024, 12));
        assert_eq!(cursor(2024, 12).next(), cursor(2025, 1));
        assert_eq!(cursor(2025, 6).next().prev(), cursor(2025, 6));
    }

    #[test]
    fn out_of_range_month_is_rejected() {
        assert_eq!(
            MonthCursor::new(2025, 13),
            Err(StoreError::InvalidMonth {
                year: 2025,
                month: 13
            })
        );
        assert!(MonthCursor::new(2025, 0).is_err());
    }

    #[test]
    fn date_is_none_past_the_end_of_the_month() {
        assert_eq!(cursor(2025, 2).date(29), None);
        assert!(cursor(2024, 2).date(29).is_some());
    }

    #[test]
    fn event_lookup_matches_exact_dates_only() {
        let events = vec![
            event(1, "2025-01-31"),
            event(2, "2025-03-31"),
            event(3, "2024-03-10"),
        ];

        let jan = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(event_on(&events, jan).and_then(|e| e.id), Some(1));

        // Same day number, different month and different year.
        let mar = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert_eq!(event_on(&events, mar).and_then(|e| e.id), Some(2));
        let last_year = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(event_on(&events, last_year).and_then(|e| e.id), Some(3));

        let empty = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        assert_eq!(event_on(&events, empty), None);
    }

    #[test]
    fn first_event_wins_when_a_day_holds_several() {
        let day = "2025-03-10";
        let events = vec![event(1, day), event(2, day)];
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap();

        assert_eq!(event_on(&events, date).and_then(|e| e.id), Some(1));
        assert_eq!(events_on(&events, date).count(), 2);
    }

    #[test]
    fn anchor_and_label_render_the_month() {
        let c = cursor(2025, 3);
        assert_eq!(c.anchor(), "2025-03-01");
        assert_eq!(c.label(), "March 2025");
        assert!(c.contains(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()));
        assert!(!c.contains(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()));
    }
}
