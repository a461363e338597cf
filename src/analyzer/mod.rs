// Analyzer module: distribution statistics and country positioning.

pub mod percentile;
pub mod price_stats;

// Re-export the main Analyzer implementation for ease of use.
pub use price_stats::{Analyzer, AnalyzerImpl};
