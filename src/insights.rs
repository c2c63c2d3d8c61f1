//! Aggregates previously stored analyses into a per-user insights report.
//!
//! Everything here is a pure function of its inputs: the caller supplies the
//! records and the trend cutoff, so reports are reproducible in tests.

use crate::features::readability::round_to;
use serde::{Deserialize, Serialize};

const MAX_TREND_POINTS: usize = 30;
const MAX_RECOMMENDATIONS: usize = 5;
const NO_DATA_MESSAGE: &str = "Complete your first analysis to see insights";

/// The stored fields of one past analysis that insights read. Missing
/// fields count as zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightRecord {
    pub analysis_score: i32,
    pub estimated_response_rate: f64,
    pub email_word_count: usize,
    pub personalization_score: i32,
    pub cta_score: i32,
    /// ISO-8601 timestamp; compared as text.
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsSummary {
    pub total_analyses: usize,
    pub average_score: f64,
    pub best_score: i32,
    pub average_response_rate: f64,
    pub average_word_count: u64,
    pub avg_personalization_score: f64,
    pub avg_cta_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCountInsight {
    pub category: String,
    pub avg_score: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsReport {
    pub has_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<InsightsSummary>,
    pub word_count_insights: Vec<WordCountInsight>,
    pub trend_data: Vec<TrendPoint>,
    pub recommendations: Vec<String>,
}

struct WordCountBucket {
    category: &'static str,
    contains: fn(usize) -> bool,
}

static WORD_COUNT_BUCKETS: &[WordCountBucket] = &[
    WordCountBucket {
        category: "Short (0-50)",
        contains: |n| n < 50,
    },
    WordCountBucket {
        category: "Medium (50-100)",
        contains: |n| (50..100).contains(&n),
    },
    WordCountBucket {
        category: "Long (100+)",
        contains: |n| n >= 100,
    },
];

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Builds the report. Trend data only includes records created at or after
/// `cutoff`.
pub fn build_insights(records: &[InsightRecord], cutoff: &str) -> InsightsReport {
    if records.is_empty() {
        return InsightsReport {
            has_data: false,
            message: Some(NO_DATA_MESSAGE.to_string()),
            summary: None,
            word_count_insights: Vec::new(),
            trend_data: Vec::new(),
            recommendations: Vec::new(),
        };
    }

    let avg_score = mean(records.iter().map(|r| r.analysis_score as f64));
    let avg_word_count = mean(records.iter().map(|r| r.email_word_count as f64));
    let avg_personalization = mean(records.iter().map(|r| r.personalization_score as f64));
    let avg_cta = mean(records.iter().map(|r| r.cta_score as f64));

    let summary = InsightsSummary {
        total_analyses: records.len(),
        average_score: round_to(avg_score, 1),
        best_score: records.iter().map(|r| r.analysis_score).max().unwrap_or(0),
        average_response_rate: round_to(
            mean(records.iter().map(|r| r.estimated_response_rate)),
            1,
        ),
        average_word_count: avg_word_count.round_ties_even() as u64,
        avg_personalization_score: round_to(avg_personalization, 1),
        avg_cta_score: round_to(avg_cta, 1),
    };

    let word_count_insights = WORD_COUNT_BUCKETS
        .iter()
        .filter_map(|bucket| {
            let scores: Vec<f64> = records
                .iter()
                .filter(|r| (bucket.contains)(r.email_word_count))
                .map(|r| r.analysis_score as f64)
                .collect();
            (!scores.is_empty()).then(|| WordCountInsight {
                category: bucket.category.to_string(),
                avg_score: round_to(mean(scores.iter().copied()), 1),
                count: scores.len(),
            })
        })
        .collect();

    let mut recent: Vec<&InsightRecord> = records
        .iter()
        .filter(|r| r.created_at.as_str() >= cutoff)
        .collect();
    recent.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    let skip = recent.len().saturating_sub(MAX_TREND_POINTS);
    let trend_data: Vec<TrendPoint> = recent
        .into_iter()
        .skip(skip)
        .map(|r| TrendPoint {
            date: r.created_at.chars().take(10).collect(),
            score: r.analysis_score,
        })
        .collect();

    let mut recommendations = Vec::new();
    if avg_score < 60.0 {
        recommendations.push("Focus on improving your value proposition clarity");
    }
    if avg_word_count > 120.0 {
        recommendations.push("Try shorter emails - aim for 60-100 words");
    }
    if avg_word_count < 40.0 {
        recommendations.push("Add more context to your emails - aim for 60-100 words");
    }
    if avg_personalization < 5.0 {
        recommendations.push("Include more personalized elements in your emails");
    }
    if avg_cta < 5.0 {
        recommendations.push("Strengthen your call-to-action with specific next steps");
    }
    recommendations.truncate(MAX_RECOMMENDATIONS);

    log::debug!(
        "Insights over {} records: avg score {:.1}, {} trend points",
        records.len(),
        avg_score,
        trend_data.len()
    );

    InsightsReport {
        has_data: true,
        message: None,
        summary: Some(summary),
        word_count_insights,
        trend_data,
        recommendations: recommendations.into_iter().map(String::from).collect(),
    }
}
