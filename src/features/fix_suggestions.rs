use super::cta::{CtaAnalysis, CtaPlacement, FrictionLevel};
use super::readability::ReadabilityResult;
use super::spam_keywords::SpamResult;
use super::subject_line::SubjectAnalysis;
use serde::{Deserialize, Serialize};

pub const MAX_SUGGESTIONS: usize = 6;
const KEYWORDS_IN_ISSUE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Subject,
    Spam,
    Readability,
    Length,
    Cta,
}

/// Declaration order is the sort order: high before medium before low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSuggestion {
    #[serde(rename = "type")]
    pub suggestion_type: SuggestionType,
    pub priority: Priority,
    pub issue: String,
    pub fix: String,
}

impl FixSuggestion {
    fn new(suggestion_type: SuggestionType, priority: Priority, issue: String, fix: &str) -> Self {
        Self {
            suggestion_type,
            priority,
            issue,
            fix: fix.to_string(),
        }
    }
}

/// Everything the rules may inspect.
pub struct SuggestionContext<'a> {
    pub readability: &'a ReadabilityResult,
    pub spam: &'a SpamResult,
    pub subject_analysis: &'a SubjectAnalysis,
    pub cta: &'a CtaAnalysis,
}

type SuggestionRule = fn(&SuggestionContext) -> Option<FixSuggestion>;

/// Evaluation order only matters for ties after the priority sort.
static RULES: &[SuggestionRule] = &[
    subject_length,
    subject_personalization,
    subject_urgency,
    spam_keywords,
    readability,
    body_length,
    cta_strength,
    cta_placement,
    cta_friction,
];

/// Runs every rule, stable-sorts by priority and keeps the first six.
pub fn generate_fix_suggestions(ctx: &SuggestionContext) -> Vec<FixSuggestion> {
    let mut suggestions: Vec<FixSuggestion> = RULES.iter().filter_map(|rule| rule(ctx)).collect();
    suggestions.sort_by_key(|s| s.priority);
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

fn subject_length(ctx: &SuggestionContext) -> Option<FixSuggestion> {
    let length = ctx.subject_analysis.length;
    if length < 20 {
        Some(FixSuggestion::new(
            SuggestionType::Subject,
            Priority::High,
            "Subject line too short".to_string(),
            "Add more context. Aim for 30-50 characters to improve open rates.",
        ))
    } else if length > 60 {
        Some(FixSuggestion::new(
            SuggestionType::Subject,
            Priority::Medium,
            "Subject line too long".to_string(),
            "Shorten to under 50 characters. Mobile shows ~30-40 chars.",
        ))
    } else {
        None
    }
}

fn subject_personalization(ctx: &SuggestionContext) -> Option<FixSuggestion> {
    (!ctx.subject_analysis.has_personalization).then(|| {
        FixSuggestion::new(
            SuggestionType::Subject,
            Priority::High,
            "No personalization in subject".to_string(),
            "Add {{first_name}} or reference their company. Personalized subjects get 26% more opens.",
        )
    })
}

fn subject_urgency(ctx: &SuggestionContext) -> Option<FixSuggestion> {
    ctx.subject_analysis.has_urgency.then(|| {
        FixSuggestion::new(
            SuggestionType::Subject,
            Priority::Medium,
            "Urgency language detected".to_string(),
            "Remove words like 'urgent' or 'ASAP'. They often trigger spam filters and feel pushy.",
        )
    })
}

fn spam_keywords(ctx: &SuggestionContext) -> Option<FixSuggestion> {
    if ctx.spam.risk_score <= 30 {
        return None;
    }

    let shown: Vec<&str> = ctx
        .spam
        .keywords
        .iter()
        .take(KEYWORDS_IN_ISSUE)
        .map(String::as_str)
        .collect();
    Some(FixSuggestion::new(
        SuggestionType::Spam,
        Priority::High,
        format!("Spam trigger words found: {}", shown.join(", ")),
        "Replace these words with more natural alternatives to avoid spam folders.",
    ))
}

fn readability(ctx: &SuggestionContext) -> Option<FixSuggestion> {
    if ctx.readability.score >= 50 {
        return None;
    }

    Some(FixSuggestion {
        suggestion_type: SuggestionType::Readability,
        priority: Priority::Medium,
        issue: "Email is hard to read".to_string(),
        fix: format!(
            "Simplify your language. Current avg: {} words/sentence. Aim for 15 or less.",
            format_average(ctx.readability)
        ),
    })
}

/// Measured averages always carry a decimal (`12.0`); the no-words result
/// reports a bare `0`.
fn format_average(readability: &ReadabilityResult) -> String {
    if readability.is_unknown() {
        "0".to_string()
    } else {
        format!("{:?}", readability.avg_words_per_sentence)
    }
}

fn body_length(ctx: &SuggestionContext) -> Option<FixSuggestion> {
    let word_count = ctx.readability.word_count;
    if word_count > 150 {
        Some(FixSuggestion::new(
            SuggestionType::Length,
            Priority::High,
            format!("Email too long ({} words)", word_count),
            "Cut to 50-100 words. Shorter cold emails get 2x more replies.",
        ))
    } else if word_count < 30 {
        Some(FixSuggestion::new(
            SuggestionType::Length,
            Priority::Medium,
            "Email too short".to_string(),
            "Add more context or value proposition. Aim for at least 50 words.",
        ))
    } else {
        None
    }
}

fn cta_strength(ctx: &SuggestionContext) -> Option<FixSuggestion> {
    if !ctx.cta.cta_present {
        Some(FixSuggestion::new(
            SuggestionType::Cta,
            Priority::High,
            "No clear call-to-action".to_string(),
            "Add a specific ask like 'Would you be open to a quick call?' or 'Reply with your thoughts?'",
        ))
    } else if ctx.cta.cta_clarity < 5 {
        Some(FixSuggestion::new(
            SuggestionType::Cta,
            Priority::Medium,
            "Weak call-to-action".to_string(),
            "Make your CTA clearer. Ask for one specific thing with low friction.",
        ))
    } else {
        None
    }
}

fn cta_placement(ctx: &SuggestionContext) -> Option<FixSuggestion> {
    (ctx.cta.cta_placement == Some(CtaPlacement::Beginning)).then(|| {
        FixSuggestion::new(
            SuggestionType::Cta,
            Priority::Low,
            "CTA too early in email".to_string(),
            "Move your ask to the end. Build context first, then make the request.",
        )
    })
}

fn cta_friction(ctx: &SuggestionContext) -> Option<FixSuggestion> {
    (ctx.cta.friction_level == Some(FrictionLevel::High)).then(|| {
        FixSuggestion::new(
            SuggestionType::Cta,
            Priority::Medium,
            "High-friction CTA".to_string(),
            "Lower the ask. Instead of links or demos, try 'Would you be interested?' first.",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::cta::CtaType;
    use crate::features::readability::ReadabilityLevel;

    fn readability(score: u32, word_count: usize) -> ReadabilityResult {
        ReadabilityResult {
            score,
            level: ReadabilityLevel::from_score(score),
            sentence_count: 5,
            word_count,
            avg_words_per_sentence: word_count as f64 / 5.0,
            avg_syllables_per_word: 1.4,
        }
    }

    fn subject(length: usize, personalized: bool, urgent: bool) -> SubjectAnalysis {
        SubjectAnalysis {
            length,
            has_personalization: personalized,
            has_urgency: urgent,
            has_curiosity: false,
            has_numbers: false,
            effectiveness: 5,
        }
    }

    fn good_cta() -> CtaAnalysis {
        CtaAnalysis {
            cta_present: true,
            cta_clarity: 10,
            cta_type: Some(CtaType::Reply),
            cta_placement: Some(CtaPlacement::End),
            friction_level: Some(FrictionLevel::Low),
        }
    }

    fn no_spam() -> SpamResult {
        SpamResult {
            keywords: Vec::new(),
            risk_score: 0,
        }
    }

    fn run(
        readability: &ReadabilityResult,
        spam: &SpamResult,
        subject_analysis: &SubjectAnalysis,
        cta: &CtaAnalysis,
    ) -> Vec<FixSuggestion> {
        generate_fix_suggestions(&SuggestionContext {
            readability,
            spam,
            subject_analysis,
            cta,
        })
    }

    #[test]
    fn test_clean_email_has_no_suggestions() {
        let result = run(&readability(70, 80), &no_spam(), &subject(40, true, false), &good_cta());
        assert!(result.is_empty());
    }

    #[test]
    fn test_subject_length_rules_are_exclusive() {
        let short = run(&readability(70, 80), &no_spam(), &subject(10, true, false), &good_cta());
        assert_eq!(short.len(), 1);
        assert_eq!(short[0].issue, "Subject line too short");
        assert_eq!(short[0].priority, Priority::High);

        let long = run(&readability(70, 80), &no_spam(), &subject(61, true, false), &good_cta());
        assert_eq!(long.len(), 1);
        assert_eq!(long[0].issue, "Subject line too long");
        assert_eq!(long[0].priority, Priority::Medium);
    }

    #[test]
    fn test_spam_issue_lists_first_three_keywords() {
        let spam = SpamResult {
            keywords: vec!["free".into(), "cash".into(), "discount".into(), "cheap".into()],
            risk_score: 50,
        };
        let result = run(&readability(70, 80), &spam, &subject(40, true, false), &good_cta());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].suggestion_type, SuggestionType::Spam);
        assert_eq!(result[0].issue, "Spam trigger words found: free, cash, discount");
    }

    #[test]
    fn test_spam_threshold() {
        let spam = SpamResult {
            keywords: vec!["free".into(), "cash".into()],
            risk_score: 30,
        };
        let result = run(&readability(70, 80), &spam, &subject(40, true, false), &good_cta());
        assert!(result.is_empty());
    }

    #[test]
    fn test_readability_cites_average() {
        let mut hard = readability(30, 80);
        hard.avg_words_per_sentence = 16.0;
        let result = run(&hard, &no_spam(), &subject(40, true, false), &good_cta());
        assert_eq!(result.len(), 1);
        assert_eq!(
            result[0].fix,
            "Simplify your language. Current avg: 16.0 words/sentence. Aim for 15 or less."
        );

        hard.avg_words_per_sentence = 22.4;
        let result = run(&hard, &no_spam(), &subject(40, true, false), &good_cta());
        assert!(result[0].fix.contains("Current avg: 22.4 words/sentence"));
    }

    #[test]
    fn test_body_length_rules() {
        let long = run(&readability(70, 200), &no_spam(), &subject(40, true, false), &good_cta());
        assert_eq!(long[0].issue, "Email too long (200 words)");
        assert_eq!(long[0].priority, Priority::High);

        let short = run(&readability(70, 12), &no_spam(), &subject(40, true, false), &good_cta());
        assert_eq!(short[0].issue, "Email too short");
        assert_eq!(short[0].priority, Priority::Medium);
    }

    #[test]
    fn test_missing_cta_rules() {
        let cta = CtaAnalysis {
            cta_present: false,
            cta_clarity: 2,
            cta_type: None,
            cta_placement: None,
            friction_level: Some(FrictionLevel::High),
        };
        let result = run(&readability(70, 80), &no_spam(), &subject(40, true, false), &cta);
        let issues: Vec<&str> = result.iter().map(|s| s.issue.as_str()).collect();
        assert_eq!(issues, vec!["No clear call-to-action", "High-friction CTA"]);
    }

    #[test]
    fn test_weak_early_link_cta() {
        let cta = CtaAnalysis {
            cta_present: true,
            cta_clarity: 3,
            cta_type: Some(CtaType::Link),
            cta_placement: Some(CtaPlacement::Beginning),
            friction_level: Some(FrictionLevel::High),
        };
        let result = run(&readability(70, 80), &no_spam(), &subject(40, true, false), &cta);
        let issues: Vec<&str> = result.iter().map(|s| s.issue.as_str()).collect();
        assert_eq!(
            issues,
            vec!["Weak call-to-action", "High-friction CTA", "CTA too early in email"]
        );
    }

    #[test]
    fn test_sorted_stably_and_capped() {
        let spam = SpamResult {
            keywords: vec!["free".into(), "cash".into(), "discount".into()],
            risk_score: 50,
        };
        let cta = CtaAnalysis {
            cta_present: true,
            cta_clarity: 3,
            cta_type: Some(CtaType::Link),
            cta_placement: Some(CtaPlacement::Beginning),
            friction_level: Some(FrictionLevel::High),
        };
        let result = run(&readability(20, 200), &spam, &subject(10, false, true), &cta);

        assert_eq!(result.len(), MAX_SUGGESTIONS);
        let issues: Vec<&str> = result.iter().map(|s| s.issue.as_str()).collect();
        assert_eq!(
            issues,
            vec![
                "Subject line too short",
                "No personalization in subject",
                "Spam trigger words found: free, cash, discount",
                "Email too long (200 words)",
                "Urgency language detected",
                "Email is hard to read",
            ]
        );
        for pair in result.windows(2) {
            assert!(pair[0].priority <= pair[1].priority);
        }
    }

    #[test]
    fn test_serialized_shape() {
        let suggestion = FixSuggestion::new(
            SuggestionType::Cta,
            Priority::Low,
            "CTA too early in email".to_string(),
            "Move it",
        );
        let json = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(json["type"], "cta");
        assert_eq!(json["priority"], "low");
    }
}
