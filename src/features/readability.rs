use crate::text::{self, TextStats};
use serde::{Deserialize, Serialize};

const FLESCH_BASE: f64 = 206.835;
const FLESCH_SENTENCE_WEIGHT: f64 = 1.015;
const FLESCH_SYLLABLE_WEIGHT: f64 = 84.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadabilityLevel {
    Easy,
    Medium,
    Moderate,
    Hard,
    Unknown,
}

impl ReadabilityLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 80 => ReadabilityLevel::Easy,
            s if s >= 60 => ReadabilityLevel::Medium,
            s if s >= 40 => ReadabilityLevel::Moderate,
            _ => ReadabilityLevel::Hard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadabilityLevel::Easy => "Easy",
            ReadabilityLevel::Medium => "Medium",
            ReadabilityLevel::Moderate => "Moderate",
            ReadabilityLevel::Hard => "Hard",
            ReadabilityLevel::Unknown => "Unknown",
        }
    }
}

/// Flesch Reading Ease of an email body. `score` is 0-100, higher is easier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityResult {
    pub score: u32,
    pub level: ReadabilityLevel,
    pub sentence_count: usize,
    pub word_count: usize,
    pub avg_words_per_sentence: f64,
    pub avg_syllables_per_word: f64,
}

impl ReadabilityResult {
    fn unknown(sentence_count: usize) -> Self {
        Self {
            score: 0,
            level: ReadabilityLevel::Unknown,
            sentence_count,
            word_count: 0,
            avg_words_per_sentence: 0.0,
            avg_syllables_per_word: 0.0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.level == ReadabilityLevel::Unknown
    }
}

pub fn calculate_readability(body: &str) -> ReadabilityResult {
    score_stats(&text::tokenize(body))
}

pub fn score_stats(stats: &TextStats) -> ReadabilityResult {
    let word_count = stats.word_count();
    // Covers blank text too: tokenize reports zero sentences there.
    if word_count == 0 {
        return ReadabilityResult::unknown(stats.sentence_count);
    }

    let sentence_count = stats.sentence_count.max(1);
    let avg_words_per_sentence = word_count as f64 / sentence_count as f64;
    let avg_syllables_per_word = stats.total_syllables() as f64 / word_count as f64;

    let raw = FLESCH_BASE
        - FLESCH_SENTENCE_WEIGHT * avg_words_per_sentence
        - FLESCH_SYLLABLE_WEIGHT * avg_syllables_per_word;
    let score = raw.clamp(0.0, 100.0).round_ties_even() as u32;

    ReadabilityResult {
        score,
        level: ReadabilityLevel::from_score(score),
        sentence_count,
        word_count,
        avg_words_per_sentence: round_to(avg_words_per_sentence, 1),
        avg_syllables_per_word: round_to(avg_syllables_per_word, 2),
    }
}

/// Rounds the stored binary value to `decimals` places, ties to even.
pub(crate) fn round_to(value: f64, decimals: usize) -> f64 {
    // A value sits exactly halfway between two decimal steps only when
    // scaling by 2^(decimals + 1) gives an odd integer.
    let doubled = value * 2f64.powi(decimals as i32 + 1);
    if doubled.fract() == 0.0 && doubled % 2.0 != 0.0 {
        let factor = 10f64.powi(decimals as i32);
        return (value * factor).round_ties_even() / factor;
    }
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}
