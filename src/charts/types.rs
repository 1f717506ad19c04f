//! Data types shared by the histogram builder and the renderer.

use clap::ValueEnum;

/// The unit a chart is bucketed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum TimeUnit {
    Hour,
    Weekday,
    Day,
    Month,
}

impl TimeUnit {
    /// Rendering order.
    pub const ALL: [TimeUnit; 4] = [
        TimeUnit::Hour,
        TimeUnit::Weekday,
        TimeUnit::Day,
        TimeUnit::Month,
    ];

    /// Number of buckets, including the unused slot 0 of day and month.
    pub fn len(self) -> usize {
        match self {
            TimeUnit::Hour => 24,
            TimeUnit::Weekday => 7,
            TimeUnit::Day => 32,
            TimeUnit::Month => 13,
        }
    }

    /// Recovers the unit from a chart length. Lengths are distinct per unit.
    pub fn from_len(len: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|unit| unit.len() == len)
    }

    /// Day 0 and month 0 do not exist and are never rendered.
    pub fn is_suppressed(self, index: usize) -> bool {
        matches!(self, TimeUnit::Day | TimeUnit::Month) && index == 0
    }
}

/// Fixed-length frequency array for one [`TimeUnit`].
///
/// Suppressed slots hold `None`; every other slot holds a count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeChart {
    unit: TimeUnit,
    buckets: Vec<Option<u32>>,
}

impl TimeChart {
    pub fn new(unit: TimeUnit) -> Self {
        let buckets = (0..unit.len())
            .map(|i| if unit.is_suppressed(i) { None } else { Some(0) })
            .collect();
        Self { unit, buckets }
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn buckets(&self) -> &[Option<u32>] {
        &self.buckets
    }

    pub(crate) fn buckets_mut(&mut self) -> &mut [Option<u32>] {
        &mut self.buckets
    }

    /// Sum of every counted bucket.
    pub fn total(&self) -> u64 {
        self.buckets.iter().flatten().map(|&n| u64::from(n)).sum()
    }

    pub(crate) fn increment(&mut self, index: usize) {
        if let Some(Some(count)) = self.buckets.get_mut(index) {
            *count += 1;
        }
    }

    /// Sets every suppressed slot back to `None`.
    pub(crate) fn suppress_sentinels(&mut self) {
        let unit = self.unit;
        for (i, bucket) in self.buckets.iter_mut().enumerate() {
            if unit.is_suppressed(i) {
                *bucket = None;
            }
        }
    }
}

/// The four registration-time charts of a roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationHistogram {
    pub hour: TimeChart,
    pub weekday: TimeChart,
    pub day: TimeChart,
    pub month: TimeChart,
    /// Rows whose timestamp was counted.
    pub parsed: usize,
    /// Rows whose timestamp was missing or unparseable.
    pub skipped: usize,
}

impl Default for RegistrationHistogram {
    fn default() -> Self {
        Self {
            hour: TimeChart::new(TimeUnit::Hour),
            weekday: TimeChart::new(TimeUnit::Weekday),
            day: TimeChart::new(TimeUnit::Day),
            month: TimeChart::new(TimeUnit::Month),
            parsed: 0,
            skipped: 0,
        }
    }
}

impl RegistrationHistogram {
    pub fn chart(&self, unit: TimeUnit) -> &TimeChart {
        match unit {
            TimeUnit::Hour => &self.hour,
            TimeUnit::Weekday => &self.weekday,
            TimeUnit::Day => &self.day,
            TimeUnit::Month => &self.month,
        }
    }

    /// Charts in rendering order.
    pub fn charts(&self) -> impl Iterator<Item = &TimeChart> {
        TimeUnit::ALL.into_iter().map(move |unit| self.chart(unit))
    }
}
