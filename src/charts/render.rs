use std::io::Write;

use anyhow::Result;
use tracing::info;

use crate::charts::label::label_for_index;
use crate::charts::ratio::to_ratio_by_max;
use crate::charts::types::{RegistrationHistogram, TimeChart, TimeUnit};

/// Glyph a bar is built from.
pub const BAR_GLYPH: char = '\u{275A}';

/// Layout of the printed charts.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    /// Length of the longest bar.
    pub bar_width: usize,
    /// Estimated width of the label column, used to size the divider.
    pub label_width: usize,
    /// Print only this chart instead of all four.
    pub only: Option<TimeUnit>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            bar_width: 150,
            label_width: 10,
            only: None,
        }
    }
}

/// Writes one `"<label> <bar>"` line per rendered bucket of `chart`.
///
/// Bars are scaled so the fullest bucket is `bar_max_width` glyphs long.
/// Suppressed buckets produce no line at all.
pub fn render_bar_chart<W: Write>(
    out: &mut W,
    chart: &TimeChart,
    bar_max_width: usize,
) -> std::io::Result<()> {
    let unit = chart.unit();
    let ratios = to_ratio_by_max(chart.buckets(), bar_max_width as f64);

    for (idx, ratio) in ratios.iter().enumerate() {
        if unit.is_suppressed(idx) {
            continue;
        }

        let label = label_for_index(ratios.len(), idx);
        let bar: String = std::iter::repeat_n(BAR_GLYPH, ratio.floor() as usize).collect();
        writeln!(out, "{label} {bar}")?;
    }

    Ok(())
}

/// Prints hour, weekday, day and month charts in that order, each followed
/// by an underscore divider.
pub fn print_regtime_charts<W: Write>(
    out: &mut W,
    histogram: &RegistrationHistogram,
    options: &ChartOptions,
) -> Result<()> {
    let divider = "_".repeat(options.label_width + options.bar_width);

    for chart in histogram.charts() {
        if options.only.is_some_and(|unit| unit != chart.unit()) {
            continue;
        }

        render_bar_chart(out, chart, options.bar_width)?;
        writeln!(out, "{divider}")?;
    }

    out.flush()?;
    info!(
        parsed = histogram.parsed,
        skipped = histogram.skipped,
        "Registration charts printed"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::histogram::build_histograms;
    use crate::roster::{AttendeeRow, REGDATE_FORMAT};

    fn render(chart: &TimeChart, width: usize) -> Vec<String> {
        let mut buf = Vec::new();
        render_bar_chart(&mut buf, chart, width).unwrap();
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn sample_histogram() -> RegistrationHistogram {
        let rows: Vec<AttendeeRow> = ["11/12/08 10:47", "11/12/08 10:05", "11/13/08 13:23"]
            .into_iter()
            .map(|d| AttendeeRow {
                regdate: Some(d.to_string()),
                ..Default::default()
            })
            .collect();
        build_histograms(&rows, REGDATE_FORMAT)
    }

    #[test]
    fn test_hour_chart_has_every_bucket() {
        let h = sample_histogram();
        let lines = render(&h.hour, 10);

        assert_eq!(lines.len(), 24);
        assert_eq!(lines[10], format!("10:00 {}", BAR_GLYPH.to_string().repeat(10)));
        assert_eq!(lines[13], format!("13:00 {}", BAR_GLYPH.to_string().repeat(5)));
        assert_eq!(lines[0], " 0:00 ");
    }

    #[test]
    fn test_suppressed_buckets_are_skipped() {
        let h = sample_histogram();

        let days = render(&h.day, 4);
        assert_eq!(days.len(), 31);
        assert!(days[0].starts_with("Day # 1"));

        let months = render(&h.month, 4);
        assert_eq!(months.len(), 12);
        assert!(months[0].starts_with("  January"));
        assert_eq!(months[10], format!(" November {}", BAR_GLYPH.to_string().repeat(4)));
    }

    #[test]
    fn test_print_all_charts_with_dividers() {
        let h = sample_histogram();
        let options = ChartOptions {
            bar_width: 20,
            label_width: 5,
            only: None,
        };
        let mut buf = Vec::new();
        print_regtime_charts(&mut buf, &h, &options).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let dividers = text.lines().filter(|l| *l == "_".repeat(25)).count();
        assert_eq!(dividers, 4);
        assert_eq!(text.lines().count(), 24 + 7 + 31 + 12 + 4);
    }

    #[test]
    fn test_print_only_selected_chart() {
        let h = sample_histogram();
        let options = ChartOptions {
            only: Some(TimeUnit::Weekday),
            ..Default::default()
        };
        let mut buf = Vec::new();
        print_regtime_charts(&mut buf, &h, &options).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().count(), 7 + 1);
        assert!(text.lines().next().unwrap().starts_with("   Monday"));
    }
}
