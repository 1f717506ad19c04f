//! Registration-time histograms rendered as text bar charts.
//!
//! The roster's `regdate` column is bucketed by hour, weekday, day of month
//! and month, each bucket scaled against its chart's maximum, and printed as
//! one labelled bar per bucket.

pub mod histogram;
pub mod label;
pub mod ratio;
pub mod render;
pub mod types;

pub use histogram::build_histograms;
pub use label::label_for_index;
pub use ratio::to_ratio_by_max;
pub use render::{ChartOptions, print_regtime_charts, render_bar_chart};
pub use types::{RegistrationHistogram, TimeChart, TimeUnit};
