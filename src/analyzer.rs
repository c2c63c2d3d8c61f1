use crate::config::catalog::Catalog;
use crate::features::{
    estimate_inbox_placement, generate_fix_suggestions, readability, CtaAnalysis, CtaAnalyzer,
    FixSuggestion, ReadabilityLevel, ReadabilityResult, SpamKeywordDetector, SpamResult,
    SubjectAnalysis, SubjectLineAnalyzer, SuggestionContext,
};
use crate::text;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One email to score. Merge tags such as `{{first_name}}` are left as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisInput {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

/// Deterministic metrics for one email. Identical input always produces an
/// identical result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub readability: ReadabilityResult,
    pub spam: SpamResult,
    pub subject_line: SubjectAnalysis,
    pub cta: CtaAnalysis,
    pub inbox_placement_score: u32,
    pub fix_suggestions: Vec<FixSuggestion>,
    /// Whitespace-delimited token count of the raw body.
    pub email_word_count: usize,
}

/// Flat view of a result, shaped for merging into an API response next to
/// model-generated fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub readability_score: u32,
    pub readability_level: ReadabilityLevel,
    pub sentence_count: usize,
    pub avg_words_per_sentence: f64,
    pub spam_keywords: Vec<String>,
    pub spam_risk_score: u32,
    pub subject_line_analysis: SubjectAnalysis,
    pub cta_analysis: CtaAnalysis,
    pub inbox_placement_score: u32,
    pub fix_suggestions: Vec<FixSuggestion>,
}

impl AnalysisResult {
    pub fn to_summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            readability_score: self.readability.score,
            readability_level: self.readability.level,
            sentence_count: self.readability.sentence_count,
            avg_words_per_sentence: self.readability.avg_words_per_sentence,
            spam_keywords: self.spam.keywords.clone(),
            spam_risk_score: self.spam.risk_score,
            subject_line_analysis: self.subject_line.clone(),
            cta_analysis: self.cta.clone(),
            inbox_placement_score: self.inbox_placement_score,
            fix_suggestions: self.fix_suggestions.clone(),
        }
    }
}

/// Runs every analyzer over a subject/body pair. Holds only compiled
/// catalog data, so one instance can be shared across threads.
pub struct EmailAnalyzer {
    spam: SpamKeywordDetector,
    subject: SubjectLineAnalyzer,
    cta: CtaAnalyzer,
}

impl Default for EmailAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailAnalyzer {
    pub fn new() -> Self {
        Self::from_catalog(&Catalog::default()).expect("built-in catalog patterns must compile")
    }

    pub fn from_catalog(catalog: &Catalog) -> Result<Self> {
        catalog.validate().context("Catalog validation failed")?;
        let analyzer = Self {
            spam: SpamKeywordDetector::new(&catalog.spam_keywords),
            subject: SubjectLineAnalyzer::new(&catalog.urgency_words, &catalog.curiosity_patterns),
            cta: CtaAnalyzer::new(&catalog.cta_groups)?,
        };
        log::debug!(
            "Built analyzer: {} spam keywords, {} CTA patterns",
            catalog.spam_keywords.len(),
            catalog.cta_pattern_count()
        );
        Ok(analyzer)
    }

    pub fn analyze(&self, subject: &str, body: &str) -> AnalysisResult {
        let full_text = format!("{}\n{}", subject, body);

        let readability = readability::calculate_readability(body);
        let spam = self.spam.detect(&full_text);
        let subject_line = self.subject.analyze(subject);
        let cta = self.cta.analyze(body);
        let inbox_placement_score =
            estimate_inbox_placement(spam.risk_score, readability.score, readability.word_count);

        let fix_suggestions = generate_fix_suggestions(&SuggestionContext {
            readability: &readability,
            spam: &spam,
            subject_analysis: &subject_line,
            cta: &cta,
        });

        log::debug!(
            "Analysis: readability={} spam_risk={} subject={} cta_clarity={} inbox={} suggestions={}",
            readability.score,
            spam.risk_score,
            subject_line.effectiveness,
            cta.cta_clarity,
            inbox_placement_score,
            fix_suggestions.len()
        );

        AnalysisResult {
            readability,
            spam,
            subject_line,
            cta,
            inbox_placement_score,
            fix_suggestions,
            email_word_count: text::whitespace_word_count(body),
        }
    }

    pub fn analyze_input(&self, input: &AnalysisInput) -> AnalysisResult {
        self.analyze(&input.subject, &input.body)
    }
}
