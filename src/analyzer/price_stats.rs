use crate::analyzer::percentile::Percentiles;
use crate::model::{
    AnalyzeError, BandGroups, CountryAssessment, Direction, DistributionStats, PriceTable,
    QuartileBucket, RelativeToMean, StdDevBand,
};
use crate::utils::round_to;

/// Trait defining the interface for a price distribution analyzer.
///
/// Every method is a pure function of its inputs; the analyzer holds no
/// state and is safe to share across fuel pipelines.
pub trait Analyzer {
    fn compute_stats(&self, table: &PriceTable) -> Result<DistributionStats, AnalyzeError>;
    fn assess_country(
        &self,
        table: &PriceTable,
        stats: &DistributionStats,
        country: &str,
    ) -> Result<CountryAssessment, AnalyzeError>;
    /// Groups focus countries into std-dev bands for batched commentary.
    fn group_by_band(
        &self,
        table: &PriceTable,
        stats: &DistributionStats,
        countries: &[String],
    ) -> BandGroups;
}

/// Implementation of the price distribution analyzer.
pub struct AnalyzerImpl;

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self
    }

    fn band_of(price: f64, stats: &DistributionStats) -> StdDevBand {
        if price > stats.mean + stats.std_dev {
            StdDevBand::Above1Sd
        } else if price < stats.mean - stats.std_dev {
            StdDevBand::Below1Sd
        } else {
            StdDevBand::Within1Sd
        }
    }

    // Edge values land in the bucket above the edge: a price exactly at the
    // median is Q3, exactly at q3 is Q4.
    fn bucket_of(price: f64, stats: &DistributionStats) -> QuartileBucket {
        if price < stats.q1 {
            QuartileBucket::Q1
        } else if price < stats.median {
            QuartileBucket::Q2
        } else if price < stats.q3 {
            QuartileBucket::Q3
        } else {
            QuartileBucket::Q4
        }
    }
}

impl Analyzer for AnalyzerImpl {
    /// Calculates distribution statistics: mean, population standard
    /// deviation, quartiles and Tukey fences.
    fn compute_stats(&self, table: &PriceTable) -> Result<DistributionStats, AnalyzeError> {
        if table.is_empty() {
            return Err(AnalyzeError::EmptyTable);
        }

        let mut prices = table.prices();
        Percentiles::sort_ascending(&mut prices);

        let count = prices.len();
        let n = count as f64;
        let mean = prices.iter().sum::<f64>() / n;
        let std_dev = (prices.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / n).sqrt();

        let q1 = Percentiles::quantile(&prices, 0.25);
        let median = Percentiles::quantile(&prices, 0.5);
        let q3 = Percentiles::quantile(&prices, 0.75);
        let iqr = q3 - q1;

        Ok(DistributionStats {
            count,
            mean,
            std_dev,
            q1,
            median,
            q3,
            iqr,
            lower_fence: q1 - 1.5 * iqr,
            upper_fence: q3 + 1.5 * iqr,
        })
    }

    /// Classifies one country's position within the distribution.
    fn assess_country(
        &self,
        table: &PriceTable,
        stats: &DistributionStats,
        country: &str,
    ) -> Result<CountryAssessment, AnalyzeError> {
        let record = table
            .get(country)
            .ok_or_else(|| AnalyzeError::CountryNotFound(country.to_string()))?;
        let price = record.price;
        if !price.is_finite() || price <= 0.0 {
            return Err(AnalyzeError::InvalidPrice {
                country: country.to_string(),
                price,
            });
        }

        let prices = table.prices();
        let percentile_rank = round_to(Percentiles::rank_of(&prices, price), 1);

        let direction = if price > stats.mean {
            Direction::Higher
        } else {
            Direction::Lower
        };
        // Divisor is the focus price, not the mean: observed upstream
        // behavior, kept as-is. The metric is asymmetric.
        let percent_diff = (price - stats.mean).abs() / price * 100.0;

        Ok(CountryAssessment {
            country: country.to_string(),
            price,
            percentile_rank,
            std_dev_band: Self::band_of(price, stats),
            quartile_bucket: Self::bucket_of(price, stats),
            is_outlier: price < stats.lower_fence || price > stats.upper_fence,
            relative_to_mean: RelativeToMean {
                direction,
                percent_diff,
            },
        })
    }

    fn group_by_band(
        &self,
        table: &PriceTable,
        stats: &DistributionStats,
        countries: &[String],
    ) -> BandGroups {
        let mut groups = BandGroups::default();
        for name in countries {
            match table.get(name) {
                None => groups.missing.push(name.clone()),
                Some(record) => match Self::band_of(record.price, stats) {
                    StdDevBand::Above1Sd => groups.above_1sd.push(name.clone()),
                    StdDevBand::Within1Sd => groups.within_1sd.push(name.clone()),
                    StdDevBand::Below1Sd => groups.below_1sd.push(name.clone()),
                },
            }
        }
        groups
    }
}
