use chrono::Month;

use crate::charts::types::TimeUnit;

/// Weekday names in bucket order after the Monday-first rotation.
const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Produces the label column for bucket `index` of a chart of `chart_len`
/// buckets.
///
/// | Length | Unit    | Example       |
/// |--------|---------|---------------|
/// | 24     | hour    | `" 9:00"`     |
/// | 7      | weekday | `"   Monday"` |
/// | 32     | day     | `"Day # 3"`   |
/// | 13     | month   | `"  January"` |
///
/// Any other length yields an empty label.
pub fn label_for_index(chart_len: usize, index: usize) -> String {
    match TimeUnit::from_len(chart_len) {
        Some(TimeUnit::Hour) => format!("{:>5}", format!("{index}:00")),
        Some(TimeUnit::Weekday) => {
            format!("{:>9}", WEEKDAY_NAMES.get(index).copied().unwrap_or(""))
        }
        Some(TimeUnit::Day) => format!("Day #{index:>2}"),
        Some(TimeUnit::Month) => format!("{:>9}", month_name(index)),
        None => String::new(),
    }
}

fn month_name(index: usize) -> &'static str {
    u8::try_from(index)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .map(|m| m.name())
        .unwrap_or("")
}
