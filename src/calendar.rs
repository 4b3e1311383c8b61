use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SPAN_DAYS: usize = 84;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub clean: bool,
}

/// Builds `span_days` cells ending at `today`, oldest first. A cell is clean
/// when its day is on or after `reset_date`.
pub fn build_calendar_cells(
    reset_date: NaiveDate,
    span_days: usize,
    today: NaiveDate,
) -> Vec<CalendarCell> {
    (0..span_days)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back as u64)))
        .map(|date| CalendarCell {
            date,
            clean: date >= reset_date,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_returns_exactly_span_cells_oldest_first() {
        let today = d("2024-03-01");
        let cells = build_calendar_cells(d("2024-02-20"), DEFAULT_SPAN_DAYS, today);
        assert_eq!(cells.len(), DEFAULT_SPAN_DAYS);
        assert_eq!(cells.last().unwrap().date, today);
        assert!(cells.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(cells[0].date, d("2023-12-09"));
    }

    #[test]
    fn test_clean_flips_once_at_reset_date() {
        let today = d("2024-03-01");
        let cells = build_calendar_cells(d("2024-02-26"), 10, today);
        let flips = cells.windows(2).filter(|w| w[0].clean != w[1].clean).count();
        assert_eq!(flips, 1);
        assert!(cells.windows(2).all(|w| !(w[0].clean && !w[1].clean)));
        let clean: Vec<_> = cells.iter().filter(|c| c.clean).map(|c| c.date).collect();
        assert_eq!(clean.first(), Some(&d("2024-02-26")));
        assert_eq!(clean.len(), 5);
    }

    #[test]
    fn test_reset_before_span_is_all_clean() {
        let cells = build_calendar_cells(d("2020-01-01"), 14, d("2024-03-01"));
        assert!(cells.iter().all(|c| c.clean));
    }

    #[test]
    fn test_future_reset_is_all_dirty() {
        let cells = build_calendar_cells(d("2024-03-02"), 14, d("2024-03-01"));
        assert!(cells.iter().all(|c| !c.clean));
    }

    #[test]
    fn test_zero_span() {
        assert!(build_calendar_cells(d("2024-03-02"), 0, d("2024-03-01")).is_empty());
    }
}
