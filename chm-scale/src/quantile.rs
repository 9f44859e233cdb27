//! Quantile scale: a sorted sample domain split into equal-count buckets.
//!
//! With a range of `k` outputs the scale computes `k - 1` thresholds, the
//! R-7 sample quantiles at `1/k, 2/k, ..., (k-1)/k`. A value maps to the
//! output whose index is the number of thresholds less than or equal to it.
//! NaN samples are dropped from the domain.

#[derive(Debug, Clone, PartialEq)]
pub struct QuantileScale<T> {
    domain: Vec<f64>,
    range: Vec<T>,
    thresholds: Vec<f64>,
}

impl<T> QuantileScale<T> {
    /// Build a scale from raw samples (any order, NaN allowed) and an output range.
    pub fn new(samples: impl IntoIterator<Item = f64>, range: Vec<T>) -> Self {
        let mut domain: Vec<f64> = samples.into_iter().filter(|v| !v.is_nan()).collect();
        domain.sort_by(f64::total_cmp);
        let thresholds = compute_thresholds(&domain, range.len());
        Self {
            domain,
            range,
            thresholds,
        }
    }

    /// The sorted, NaN-free sample domain.
    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    pub fn range(&self) -> &[T] {
        &self.range
    }

    /// Bucket boundaries, non-decreasing, `range.len() - 1` of them
    /// (none when the domain is empty).
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Index of the bucket `value` falls into.
    pub fn bucket(&self, value: f64) -> usize {
        self.thresholds.partition_point(|t| *t <= value)
    }

    /// Output for `value`, or `None` when the range is empty.
    pub fn scale(&self, value: f64) -> Option<&T> {
        self.range.get(self.bucket(value))
    }
}

fn compute_thresholds(sorted: &[f64], buckets: usize) -> Vec<f64> {
    if sorted.is_empty() || buckets == 0 {
        return Vec::new();
    }
    (1..buckets)
        .map(|i| quantile_sorted(sorted, i as f64 / buckets as f64))
        .collect()
}

/// R-7 quantile of an ascending, non-empty sample.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p + 1.0;
    let whole = h.floor() as usize;
    let v = sorted[whole - 1];
    let e = h - whole as f64;
    if e > 0.0 {
        v + e * (sorted[whole] - v)
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five() -> Vec<&'static str> {
        vec!["a", "b", "c", "d", "e"]
    }

    #[test]
    fn domain_is_sorted_and_drops_nan() {
        let s = QuantileScale::new([30.0, f64::NAN, 10.0, 20.0], five());
        assert_eq!(s.domain(), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn thresholds_are_non_decreasing_and_count_range_minus_one() {
        let samples = [5.0, 1.0, 9.0, 3.0, 3.0, 7.0, 2.0, 8.0, 8.0, 4.0];
        let s = QuantileScale::new(samples, five());
        assert_eq!(s.thresholds().len(), 4);
        assert!(s.thresholds().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn ten_distinct_values_fill_five_equal_buckets() {
        let s = QuantileScale::new((1..=10).map(f64::from), five());
        let mut counts = [0usize; 5];
        for v in 1..=10 {
            counts[s.bucket(v as f64)] += 1;
        }
        assert_eq!(counts, [2, 2, 2, 2, 2]);
        assert_eq!(s.scale(1.0), Some(&"a"));
        assert_eq!(s.scale(10.0), Some(&"e"));
    }

    #[test]
    fn r7_quantile_interpolates() {
        let sorted = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(quantile_sorted(&sorted, 0.0), 10.0);
        assert_eq!(quantile_sorted(&sorted, 1.0), 40.0);
        assert!((quantile_sorted(&sorted, 0.5) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn single_sample_puts_everything_at_or_above_in_last_bucket() {
        let s = QuantileScale::new([7.0], five());
        assert_eq!(s.thresholds(), &[7.0, 7.0, 7.0, 7.0]);
        assert_eq!(s.scale(7.0), Some(&"e"));
        assert_eq!(s.scale(6.0), Some(&"a"));
    }

    #[test]
    fn empty_domain_maps_to_first_output() {
        let s = QuantileScale::new(std::iter::empty(), five());
        assert!(s.thresholds().is_empty());
        assert_eq!(s.scale(123.0), Some(&"a"));
    }
}
