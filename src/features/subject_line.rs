use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref MERGE_TAG_RE: Regex = Regex::new(r"\{\{.*?\}\}|\[\[.*?\]\]").unwrap();
    static ref DIGIT_RE: Regex = Regex::new(r"\d").unwrap();
}

const BASE_EFFECTIVENESS: i32 = 5;
const EMPTY_SUBJECT_EFFECTIVENESS: i32 = 3;
const MIN_EFFECTIVENESS: i32 = 1;
const MAX_EFFECTIVENESS: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectAnalysis {
    pub length: usize,
    pub has_personalization: bool,
    pub has_urgency: bool,
    pub has_curiosity: bool,
    pub has_numbers: bool,
    pub effectiveness: i32,
}

impl SubjectAnalysis {
    fn empty() -> Self {
        Self {
            length: 0,
            has_personalization: false,
            has_urgency: false,
            has_curiosity: false,
            has_numbers: false,
            effectiveness: EMPTY_SUBJECT_EFFECTIVENESS,
        }
    }
}

struct EffectivenessRule {
    applies: fn(&SubjectAnalysis) -> bool,
    delta: i32,
}

fn optimal_length(s: &SubjectAnalysis) -> bool {
    (30..=50).contains(&s.length)
}

fn poor_length(s: &SubjectAnalysis) -> bool {
    s.length < 20 || s.length > 70
}

fn personalized(s: &SubjectAnalysis) -> bool {
    s.has_personalization
}

fn curious(s: &SubjectAnalysis) -> bool {
    s.has_curiosity
}

fn numeric(s: &SubjectAnalysis) -> bool {
    s.has_numbers
}

fn urgent(s: &SubjectAnalysis) -> bool {
    s.has_urgency
}

/// Additive adjustments to the base effectiveness, applied in order and
/// clamped once at the end. Urgency is net-negative: it reads as salesy.
static EFFECTIVENESS_RULES: &[EffectivenessRule] = &[
    EffectivenessRule {
        applies: optimal_length,
        delta: 1,
    },
    EffectivenessRule {
        applies: poor_length,
        delta: -1,
    },
    EffectivenessRule {
        applies: personalized,
        delta: 2,
    },
    EffectivenessRule {
        applies: curious,
        delta: 1,
    },
    EffectivenessRule {
        applies: numeric,
        delta: 1,
    },
    EffectivenessRule {
        applies: urgent,
        delta: -1,
    },
];

pub struct SubjectLineAnalyzer {
    urgency_words: Vec<String>,
    curiosity_patterns: Vec<String>,
}

impl SubjectLineAnalyzer {
    pub fn new(urgency_words: &[String], curiosity_patterns: &[String]) -> Self {
        Self {
            urgency_words: urgency_words.iter().map(|w| w.to_lowercase()).collect(),
            curiosity_patterns: curiosity_patterns
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
        }
    }

    pub fn analyze(&self, subject: &str) -> SubjectAnalysis {
        if subject.is_empty() {
            return SubjectAnalysis::empty();
        }

        let subject_lower = subject.to_lowercase();
        let mut analysis = SubjectAnalysis {
            length: subject.chars().count(),
            has_personalization: MERGE_TAG_RE.is_match(subject),
            has_urgency: self
                .urgency_words
                .iter()
                .any(|word| subject_lower.contains(word.as_str())),
            has_curiosity: self
                .curiosity_patterns
                .iter()
                .any(|pattern| subject_lower.contains(pattern.as_str())),
            has_numbers: DIGIT_RE.is_match(subject),
            effectiveness: BASE_EFFECTIVENESS,
        };

        analysis.effectiveness = score_effectiveness(&analysis);
        analysis
    }
}

fn score_effectiveness(analysis: &SubjectAnalysis) -> i32 {
    let raw = EFFECTIVENESS_RULES
        .iter()
        .filter(|rule| (rule.applies)(analysis))
        .fold(BASE_EFFECTIVENESS, |score, rule| score + rule.delta);
    raw.clamp(MIN_EFFECTIVENESS, MAX_EFFECTIVENESS)
}
