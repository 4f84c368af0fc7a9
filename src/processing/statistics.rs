/// Summary of the values currently held in a rolling window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub count: usize,
    /// Most recently pushed value still in the window.
    pub current: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl WindowStats {
    /// Compute statistics over `values` in window order (oldest first).
    ///
    /// Everything is recomputed from scratch so evictions can never leave a
    /// stale running sum behind. Returns `None` for an empty window.
    pub fn compute<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut current = None;

        for v in values {
            count += 1;
            min = min.min(v);
            max = max.max(v);
            sum += v;
            current = Some(v);
        }

        let current = current?;
        // Clamp absorbs float rounding so min <= mean <= max always holds.
        let mean = (sum / count as f64).clamp(min, max);

        Some(WindowStats {
            count,
            current,
            min,
            max,
            mean,
        })
    }

    /// Format one statistic the way the chart header shows it.
    pub fn format_rate(value: f64) -> String {
        format!("{value:.1} mm/s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_has_no_stats() {
        assert!(WindowStats::compute(Vec::<f64>::new()).is_none());
    }

    #[test]
    fn stats_over_window() {
        let stats = WindowStats::compute([150.0, 160.0, 155.0]).unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.current, 155.0);
        assert_eq!(stats.min, 150.0);
        assert_eq!(stats.max, 160.0);
        assert_eq!(stats.mean, 155.0);
    }

    #[test]
    fn mean_is_bounded_by_extremes() {
        let values = [0.1, 0.2, 0.3, 1e9, -4.5, 7.25, 0.1 + 0.2];
        let stats = WindowStats::compute(values).unwrap();
        assert!(stats.min <= stats.mean && stats.mean <= stats.max);

        let flat = WindowStats::compute([0.1; 7]).unwrap();
        assert!(flat.min <= flat.mean && flat.mean <= flat.max);
    }

    #[test]
    fn rate_formatting() {
        assert_eq!(WindowStats::format_rate(155.0), "155.0 mm/s");
    }
}
