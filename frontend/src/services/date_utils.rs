use chrono::NaiveDate;
use js_sys::Date;

use shared::{DateRange, PeriodFilter};

/// Today's date in the browser's local timezone.
pub fn today() -> NaiveDate {
    let now = Date::new_0();
    // js_sys months are 0-indexed.
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

/// "January 15, 2025"
pub fn format_date_for_display(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// "Monday, January 15, 2025" — used for date-group headers.
pub fn format_group_heading(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// "January 2025" — used for the month picker button.
pub fn format_month_for_display(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Heading for the dashboard describing the active period.
pub fn period_label(filter: PeriodFilter, range: Option<DateRange>) -> String {
    match (filter, range) {
        (PeriodFilter::All, _) => "All time".to_string(),
        (PeriodFilter::Day, Some(range)) => format_date_for_display(range.start),
        (PeriodFilter::Week, Some(range)) => format!(
            "Week of {} to {}",
            format_date_for_display(range.start),
            format_date_for_display(range.end)
        ),
        (PeriodFilter::Month, Some(range)) => format_month_for_display(range.start),
        // A non-All filter always resolves to a range.
        (_, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_dates_without_zero_padding() {
        assert_eq!(format_date_for_display(date(2025, 1, 5)), "January 5, 2025");
        assert_eq!(
            format_group_heading(date(2024, 6, 9)),
            "Sunday, June 9, 2024"
        );
        assert_eq!(format_month_for_display(date(2024, 2, 15)), "February 2024");
    }

    #[test]
    fn period_label_covers_all_modes() {
        let range = shared::resolve(PeriodFilter::Month, date(2024, 2, 15));
        assert_eq!(period_label(PeriodFilter::Month, range), "February 2024");
        assert_eq!(period_label(PeriodFilter::All, None), "All time");

        let week = shared::resolve(PeriodFilter::Week, date(2024, 6, 12));
        assert_eq!(
            period_label(PeriodFilter::Week, week),
            "Week of June 9, 2024 to June 15, 2024"
        );
    }
}
