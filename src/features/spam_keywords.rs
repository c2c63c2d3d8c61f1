use serde::{Deserialize, Serialize};

/// Matched phrases kept for display.
pub const MAX_REPORTED_KEYWORDS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpamResult {
    pub keywords: Vec<String>,
    pub risk_score: u32,
}

pub struct SpamKeywordDetector {
    keywords: Vec<String>,
}

impl SpamKeywordDetector {
    pub fn new(keywords: &[String]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Literal substring match against the lower-cased text, so `free`
    /// also fires inside `freedom`. Matches keep catalog order.
    pub fn detect(&self, text: &str) -> SpamResult {
        if text.is_empty() {
            return SpamResult {
                keywords: Vec::new(),
                risk_score: 0,
            };
        }

        let text_lower = text.to_lowercase();
        let mut found: Vec<String> = self
            .keywords
            .iter()
            .filter(|keyword| text_lower.contains(keyword.as_str()))
            .cloned()
            .collect();

        let risk_score = risk_bucket(found.len());
        found.truncate(MAX_REPORTED_KEYWORDS);

        SpamResult {
            keywords: found,
            risk_score,
        }
    }
}

/// Step function over the full match count, taken before truncation.
pub fn risk_bucket(match_count: usize) -> u32 {
    match match_count {
        0 => 0,
        1 => 15,
        2 => 30,
        3..=4 => 50,
        5..=6 => 70,
        _ => 85,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::catalog::Catalog;

    fn detector() -> SpamKeywordDetector {
        SpamKeywordDetector::new(&Catalog::default().spam_keywords)
    }

    #[test]
    fn test_clean_text() {
        let result = detector().detect("Hi Dana,\nLoved your talk on data pipelines.");
        assert!(result.keywords.is_empty());
        assert_eq!(result.risk_score, 0);
    }

    #[test]
    fn test_substring_matching() {
        let result = detector().detect("Freedom to choose");
        assert_eq!(result.keywords, vec!["free"]);
        assert_eq!(result.risk_score, 15);
    }

    #[test]
    fn test_obvious_spam_scenario() {
        let text = "ACT NOW - Limited time offer!\nFREE opportunity to earn money fast! \
                    Guaranteed results with no risk. Click here to get started today!";
        let result = detector().detect(text);
        assert_eq!(
            result.keywords,
            vec![
                "act now",
                "limited time",
                "free",
                "guarantee",
                "guaranteed",
                "no risk",
                "click here",
                "get started today",
                "earn money",
            ]
        );
        assert_eq!(result.risk_score, 85);
    }

    #[test]
    fn test_buckets() {
        let expected = [(0, 0), (1, 15), (2, 30), (3, 50), (4, 50), (5, 70), (6, 70), (7, 85), (40, 85)];
        for (count, score) in expected {
            assert_eq!(risk_bucket(count), score, "count {}", count);
        }
    }

    #[test]
    fn test_bucket_is_monotonic() {
        let catalog = Catalog::default();
        let detector = detector();
        let mut text = String::from("Hello.");
        let mut previous = 0;
        for keyword in &catalog.spam_keywords {
            text.push(' ');
            text.push_str(keyword);
            let score = detector.detect(&text).risk_score;
            assert!(score >= previous);
            previous = score;
        }
        assert_eq!(previous, 85);
    }

    #[test]
    fn test_truncation_keeps_bucket() {
        let text = "free cash discount cheap bargain best amazing incredible \
                    fantastic loan profit income winner";
        let result = detector().detect(text);
        assert_eq!(result.keywords.len(), MAX_REPORTED_KEYWORDS);
        assert_eq!(result.risk_score, 85);
        assert_eq!(result.keywords[0], "free");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(detector().detect("").risk_score, 0);
    }
}
