pub mod analyzer;
pub mod config;
pub mod features;
pub mod insights;
pub mod text;

use lazy_static::lazy_static;

pub use analyzer::{AnalysisInput, AnalysisResult, AnalysisSummary, EmailAnalyzer};
pub use config::{Catalog, Config};
pub use insights::{build_insights, InsightRecord, InsightsReport};

lazy_static! {
    static ref DEFAULT_ANALYZER: EmailAnalyzer = EmailAnalyzer::new();
}

/// Scores a cold email with the built-in catalog. Pure and synchronous; safe
/// to call from any number of threads.
pub fn analyze(subject: &str, body: &str) -> AnalysisResult {
    DEFAULT_ANALYZER.analyze(subject, body)
}
