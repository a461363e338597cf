use crate::model::{
    BandGroups, CountryAssessment, Direction, DistributionStats, FuelSnapshot, QuartileBucket,
    StdDevBand,
};
use crate::utils::round_to;
use std::fmt::Write;

/// Immutable rendering options, passed explicitly per fuel.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Price unit label, e.g. "$/liter".
    pub unit: String,
}

pub fn render_summary(
    snapshot: &FuelSnapshot,
    stats: &DistributionStats,
    opts: &RenderOptions,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "=== {} — {} countries (as of {}) ===",
        snapshot.fuel, stats.count, snapshot.as_of
    );
    let _ = writeln!(
        out,
        "average {} {} | std dev {} | quartiles {} / {} / {} | IQR {}",
        round_to(stats.mean, 3),
        opts.unit,
        round_to(stats.std_dev, 3),
        round_to(stats.q1, 3),
        round_to(stats.median, 3),
        round_to(stats.q3, 3),
        round_to(stats.iqr, 3)
    );
    out
}

pub fn render_assessment(
    assessment: &CountryAssessment,
    stats: &DistributionStats,
    opts: &RenderOptions,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {} {}",
        assessment.country,
        round_to(assessment.price, 3),
        opts.unit
    );

    let direction = match assessment.relative_to_mean.direction {
        Direction::Higher => "higher",
        Direction::Lower => "lower",
    };
    let _ = writeln!(
        out,
        "  {}% {} than the world average of {} {}",
        round_to(assessment.relative_to_mean.percent_diff, 0),
        direction,
        round_to(stats.mean, 3),
        opts.unit
    );
    let _ = writeln!(
        out,
        "  {}% of countries pay this much or less ({})",
        assessment.percentile_rank,
        bucket_label(assessment.quartile_bucket)
    );
    let _ = writeln!(out, "  {}", band_label(assessment.std_dev_band));
    if assessment.is_outlier {
        let _ = writeln!(
            out,
            "  outlier by the IQR rule (outside {}..{})",
            round_to(stats.lower_fence, 3),
            round_to(stats.upper_fence, 3)
        );
    }
    out
}

pub fn render_band_groups(groups: &BandGroups) -> String {
    let mut out = String::from("Comparison by distance from the average:\n");
    let _ = writeln!(out, "  above +1 std dev: {}", join_or_dash(&groups.above_1sd));
    let _ = writeln!(out, "  within 1 std dev: {}", join_or_dash(&groups.within_1sd));
    let _ = writeln!(out, "  below -1 std dev: {}", join_or_dash(&groups.below_1sd));
    if !groups.missing.is_empty() {
        let _ = writeln!(out, "  not in table: {}", groups.missing.join(", "));
    }
    out
}

fn bucket_label(bucket: QuartileBucket) -> &'static str {
    match bucket {
        QuartileBucket::Q1 => "bottom quartile",
        QuartileBucket::Q2 => "second quartile",
        QuartileBucket::Q3 => "third quartile",
        QuartileBucket::Q4 => "top quartile",
    }
}

fn band_label(band: StdDevBand) -> &'static str {
    match band {
        StdDevBand::Above1Sd => "pays more than most: over one standard deviation above the average",
        StdDevBand::Within1Sd => {
            "pays what roughly 68% of countries pay: within one standard deviation of the average"
        }
        StdDevBand::Below1Sd => "pays less than most: over one standard deviation below the average",
    }
}

fn join_or_dash(names: &[String]) -> String {
    if names.is_empty() {
        "-".into()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{Analyzer, AnalyzerImpl};
    use crate::model::{PriceRecord, PriceTable};
    use chrono::Utc;

    fn snapshot() -> FuelSnapshot {
        let raw = [("A", 1.0), ("B", 2.0), ("C", 3.0), ("D", 4.0), ("E", 100.0)]
            .iter()
            .map(|(c, p)| PriceRecord {
                country: (*c).into(),
                price: *p,
            })
            .collect();
        FuelSnapshot {
            fuel: "Gasoline".into(),
            table: PriceTable::from_records(raw).0,
            as_of: "28-Jul-2026".into(),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn summary_carries_label_and_count() {
        let snap = snapshot();
        let stats = AnalyzerImpl::new().compute_stats(&snap.table).unwrap();
        let opts = RenderOptions { unit: "$/liter".into() };
        let text = render_summary(&snap, &stats, &opts);
        assert!(text.contains("Gasoline — 5 countries (as of 28-Jul-2026)"));
        assert!(text.contains("average 22 $/liter"));
    }

    #[test]
    fn outlier_assessment_mentions_fences() {
        let snap = snapshot();
        let analyzer = AnalyzerImpl::new();
        let stats = analyzer.compute_stats(&snap.table).unwrap();
        let assessment = analyzer.assess_country(&snap.table, &stats, "E").unwrap();
        let opts = RenderOptions { unit: "$/liter".into() };
        let text = render_assessment(&assessment, &stats, &opts);
        assert!(text.contains("E: 100 $/liter"));
        assert!(text.contains("78% higher than the world average"));
        assert!(text.contains("100% of countries pay this much or less (top quartile)"));
        assert!(text.contains("outlier by the IQR rule (outside -1..7)"));
    }

    #[test]
    fn band_groups_render_with_placeholder_for_empty_band() {
        let groups = BandGroups {
            above_1sd: vec!["E".into()],
            within_1sd: vec!["B".into(), "A".into()],
            below_1sd: Vec::new(),
            missing: vec!["Narnia".into()],
        };
        let text = render_band_groups(&groups);
        assert!(text.contains("above +1 std dev: E"));
        assert!(text.contains("within 1 std dev: B, A"));
        assert!(text.contains("below -1 std dev: -"));
        assert!(text.contains("not in table: Narnia"));
    }
}
