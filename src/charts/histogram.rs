use chrono::{Datelike, NaiveDateTime, Timelike};
use tracing::debug;

use crate::charts::types::RegistrationHistogram;
use crate::roster::AttendeeRow;

/// Buckets every row's `regdate` by hour, weekday, day of month and month.
///
/// Rows whose timestamp is missing or does not match `timestamp_format` are
/// counted in [`RegistrationHistogram::skipped`] and otherwise ignored.
///
/// Weekdays are counted from Sunday and then rotated left by one, so slot 0
/// is Monday and slot 6 is Sunday.
pub fn build_histograms<'a, I>(rows: I, timestamp_format: &str) -> RegistrationHistogram
where
    I: IntoIterator<Item = &'a AttendeeRow>,
{
    let mut histogram = RegistrationHistogram::default();

    for row in rows {
        let Some(raw) = row.regdate.as_deref() else {
            histogram.skipped += 1;
            continue;
        };

        let datetime = match NaiveDateTime::parse_from_str(raw.trim(), timestamp_format) {
            Ok(datetime) => datetime,
            Err(e) => {
                debug!(id = %row.id, regdate = raw, error = %e, "Skipping unparseable regdate");
                histogram.skipped += 1;
                continue;
            }
        };

        histogram.hour.increment(datetime.hour() as usize);
        histogram
            .weekday
            .increment(datetime.weekday().num_days_from_sunday() as usize);
        histogram.day.increment(datetime.day() as usize);
        histogram.month.increment(datetime.month() as usize);
        histogram.parsed += 1;
    }

    histogram.weekday.buckets_mut().rotate_left(1);
    histogram.day.suppress_sentinels();
    histogram.month.suppress_sentinels();

    histogram
}
