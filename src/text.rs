use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SENTENCE_SPLIT_RE: Regex = Regex::new(r"[.!?]+").unwrap();
    static ref WORD_RE: Regex = Regex::new(r"\b[a-zA-Z]+\b").unwrap();
    static ref VOWEL_GROUP_RE: Regex = Regex::new(r"[aeiouy]+").unwrap();
}

/// Sentence and word statistics for a block of body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStats {
    pub sentence_count: usize,
    pub words: Vec<String>,
}

impl TextStats {
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn total_syllables(&self) -> usize {
        self.words.iter().map(|w| count_syllables(w)).sum()
    }
}

/// Returns `true` when the text has no non-whitespace content.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Tokenizes text into sentences and lower-cased words.
///
/// Blank input yields zero sentences and no words. Anything else counts at
/// least one sentence, even without terminal punctuation.
pub fn tokenize(text: &str) -> TextStats {
    if is_blank(text) {
        return TextStats {
            sentence_count: 0,
            words: Vec::new(),
        };
    }

    let text = text.trim();
    TextStats {
        sentence_count: count_sentences(text),
        words: extract_words(text),
    }
}

pub fn count_sentences(text: &str) -> usize {
    let count = SENTENCE_SPLIT_RE
        .split(text)
        .filter(|fragment| !fragment.trim().is_empty())
        .count();
    count.max(1)
}

/// Extracts runs of ASCII letters that stand alone as words. Letters glued to
/// digits or underscores (`abc123`, `first_name`) are not words.
pub fn extract_words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Approximate syllable count: vowel groups minus a trailing silent `e`.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    if word.chars().count() <= 3 {
        return 1;
    }

    let mut syllables = VOWEL_GROUP_RE.find_iter(&word).count();
    if word.ends_with('e') {
        syllables = syllables.saturating_sub(1);
    }
    syllables.max(1)
}

/// Plain whitespace-delimited token count, as stored alongside analyses.
/// The ASCII file, group, record and unit separators also delimit.
pub fn whitespace_word_count(text: &str) -> usize {
    text.split(|c: char| c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c))
        .filter(|token| !token.is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_has_no_sentences() {
        let stats = tokenize("   \n\t ");
        assert_eq!(stats.sentence_count, 0);
        assert_eq!(stats.word_count(), 0);
    }

    #[test]
    fn test_sentence_counting() {
        assert_eq!(count_sentences("Hi there. How are you?! Great..."), 3);
        assert_eq!(count_sentences("no punctuation at all"), 1);
        assert_eq!(count_sentences("...!!!"), 1);
    }

    #[test]
    fn test_word_extraction() {
        let words = extract_words("Hi {{first_name}}, we cut costs 40% in 2023. Don't wait");
        assert_eq!(
            words,
            vec!["hi", "we", "cut", "costs", "in", "don", "t", "wait"]
        );
        assert!(extract_words("abc123 456").is_empty());
    }

    #[test]
    fn test_syllable_approximation() {
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("meeting"), 2);
        assert_eq!(count_syllables("beautiful"), 3);
        assert_eq!(count_syllables("rhythm"), 1);
        assert_eq!(count_syllables("opportunity"), 5);
    }

    #[test]
    fn test_whitespace_word_count() {
        assert_eq!(whitespace_word_count("  Hi {{first_name}},\n\nquick q  "), 4);
        assert_eq!(whitespace_word_count(""), 0);
        assert_eq!(whitespace_word_count(" \t\n "), 0);
        assert_eq!(whitespace_word_count("one\u{1f}two\u{1c}three\u{85}four"), 4);
    }
}
