use std::cmp::Ordering;

pub struct Percentiles;

impl Percentiles {
    /// Linear-interpolation quantile over an ascending-sorted slice.
    /// `q` is a fraction in [0, 1]. Callers must pass a non-empty slice.
    pub fn quantile(sorted: &[f64], q: f64) -> f64 {
        debug_assert!(!sorted.is_empty());
        let rank = q * (sorted.len() as f64 - 1.0);
        let lower = rank.floor() as usize;
        let upper = rank.ceil() as usize;
        if lower == upper {
            sorted[lower]
        } else {
            let f = rank - lower as f64;
            (1.0 - f) * sorted[lower] + f * sorted[upper]
        }
    }

    /// Percentage of values at or below `value`. Unrounded.
    pub fn rank_of(prices: &[f64], value: f64) -> f64 {
        if prices.is_empty() {
            return 0.0;
        }
        let at_or_below = prices.iter().filter(|&&p| p <= value).count();
        at_or_below as f64 / prices.len() as f64 * 100.0
    }

    /// Sorts a price slice ascending; incomparable pairs rank as equal.
    pub fn sort_ascending(prices: &mut [f64]) {
        prices.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    }
}

#[cfg(test)]
mod tests {
    use super::Percentiles;

    #[test]
    fn quantile_interpolates_between_neighbours() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        // rank 0.25 * 3 = 0.75 -> between 1.0 and 2.0
        assert!((Percentiles::quantile(&sorted, 0.25) - 1.75).abs() < 1e-12);
        assert!((Percentiles::quantile(&sorted, 0.5) - 2.5).abs() < 1e-12);
        assert!((Percentiles::quantile(&sorted, 0.75) - 3.25).abs() < 1e-12);
    }

    #[test]
    fn quantile_hits_exact_ranks_on_odd_lengths() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 100.0];
        assert_eq!(Percentiles::quantile(&sorted, 0.25), 2.0);
        assert_eq!(Percentiles::quantile(&sorted, 0.5), 3.0);
        assert_eq!(Percentiles::quantile(&sorted, 0.75), 4.0);
    }

    #[test]
    fn quantile_extremes_are_min_and_max() {
        let sorted = [1.0, 5.0, 9.0];
        assert_eq!(Percentiles::quantile(&sorted, 0.0), 1.0);
        assert_eq!(Percentiles::quantile(&sorted, 1.0), 9.0);
    }

    #[test]
    fn rank_counts_ties_as_at_or_below() {
        let prices = [1.0, 2.0, 2.0, 3.0];
        assert_eq!(Percentiles::rank_of(&prices, 2.0), 75.0);
        assert_eq!(Percentiles::rank_of(&prices, 3.0), 100.0);
    }
}
