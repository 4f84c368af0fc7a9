use std::collections::VecDeque;

use chrono::{DateTime, Local};

use crate::processing::statistics::WindowStats;

/// Default number of points kept for the feedrate chart.
pub const DEFAULT_CAPACITY: usize = 50;

/// Fixed-capacity FIFO window of scalar values paired with their timestamps.
///
/// `values` and `timestamps` always have the same length, never above
/// `capacity`. Pushing into a full window evicts the oldest pair first.
#[derive(Debug, Clone)]
pub struct RollingSeries {
    capacity: usize,
    values: VecDeque<f64>,
    timestamps: VecDeque<DateTime<Local>>,
}

impl RollingSeries {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
            timestamps: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn push(&mut self, value: f64, timestamp: DateTime<Local>) {
        if self.capacity == 0 {
            return;
        }
        if self.values.len() == self.capacity {
            self.values.pop_front();
            self.timestamps.pop_front();
        }
        self.values.push_back(value);
        self.timestamps.push_back(timestamp);
    }

    /// Values oldest → newest.
    pub fn values(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Timestamps oldest → newest, aligned with [`Self::values`].
    pub fn timestamps(&self) -> impl ExactSizeIterator<Item = DateTime<Local>> + '_ {
        self.timestamps.iter().copied()
    }

    /// Newest value and its timestamp.
    pub fn latest(&self) -> Option<(f64, DateTime<Local>)> {
        Some((*self.values.back()?, *self.timestamps.back()?))
    }

    /// `None` while the window is empty.
    pub fn statistics(&self) -> Option<WindowStats> {
        WindowStats::compute(self.values())
    }
}

impl Default for RollingSeries {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn filled(capacity: usize, values: &[f64]) -> RollingSeries {
        let start = Local::now();
        let mut series = RollingSeries::new(capacity);
        for (i, &v) in values.iter().enumerate() {
            series.push(v, start + Duration::seconds(i as i64));
        }
        series
    }

    #[test]
    fn keeps_last_n_in_push_order() {
        let pushed: Vec<f64> = (0..120).map(|i| i as f64 * 1.5).collect();
        let series = filled(50, &pushed);
        assert_eq!(series.len(), 50);
        assert_eq!(series.values().collect::<Vec<_>>(), pushed[70..].to_vec());
        assert_eq!(series.timestamps().len(), 50);
    }

    #[test]
    fn timestamps_stay_paired_with_values() {
        let series = filled(3, &[1.0, 2.0, 3.0, 4.0, 5.0]);
        let stamps: Vec<_> = series.timestamps().collect();
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
        let (value, stamp) = series.latest().unwrap();
        assert_eq!(value, 5.0);
        assert_eq!(stamp, *stamps.last().unwrap());
    }

    #[test]
    fn eviction_with_capacity_two() {
        let series = filled(2, &[10.0, 20.0, 30.0]);
        assert_eq!(series.values().collect::<Vec<_>>(), vec![20.0, 30.0]);

        let stats = series.statistics().unwrap();
        assert_eq!(stats.current, 30.0);
        assert_eq!(stats.min, 20.0);
        assert_eq!(stats.max, 30.0);
        assert_eq!(stats.mean, 25.0);
    }

    #[test]
    fn empty_window_reports_no_statistics() {
        let series = RollingSeries::new(5);
        assert!(series.is_empty());
        assert!(series.statistics().is_none());
        assert!(series.latest().is_none());
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let series = filled(0, &[1.0, 2.0]);
        assert_eq!(series.len(), 0);
        assert_eq!(series.timestamps().len(), 0);
    }

    #[test]
    fn capacity_one_keeps_newest() {
        let series = filled(1, &[4.0, 8.0]);
        assert_eq!(series.values().collect::<Vec<_>>(), vec![8.0]);
    }
}
