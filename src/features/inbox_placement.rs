const BASELINE: i32 = 80;

/// Heuristic deliverability estimate, 0-100. Combines the spam bucket,
/// readability score and tokenized body word count; does no scanning itself.
pub fn estimate_inbox_placement(spam_risk: u32, readability_score: u32, word_count: usize) -> u32 {
    let mut score = BASELINE;

    score += if spam_risk > 50 {
        -30
    } else if spam_risk > 30 {
        -15
    } else if spam_risk > 10 {
        -5
    } else {
        0
    };

    if readability_score < 40 {
        score -= 10;
    } else if readability_score >= 70 {
        score += 5;
    }

    // Too short looks spammy, too long gets filtered
    if word_count < 30 {
        score -= 10;
    } else if word_count > 300 {
        score -= 15;
    } else if (50..=150).contains(&word_count) {
        score += 5;
    }

    score.clamp(0, 100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ideal_email() {
        assert_eq!(estimate_inbox_placement(0, 75, 100), 90);
    }

    #[test]
    fn test_spam_penalties() {
        assert_eq!(estimate_inbox_placement(85, 50, 40), 50);
        assert_eq!(estimate_inbox_placement(70, 50, 40), 50);
        assert_eq!(estimate_inbox_placement(50, 50, 40), 65);
        assert_eq!(estimate_inbox_placement(30, 50, 40), 75);
        assert_eq!(estimate_inbox_placement(15, 50, 40), 75);
        assert_eq!(estimate_inbox_placement(0, 50, 40), 80);
    }

    #[test]
    fn test_length_bands_are_exclusive() {
        assert_eq!(estimate_inbox_placement(0, 50, 29), 70);
        assert_eq!(estimate_inbox_placement(0, 50, 30), 80);
        assert_eq!(estimate_inbox_placement(0, 50, 50), 85);
        assert_eq!(estimate_inbox_placement(0, 50, 150), 85);
        assert_eq!(estimate_inbox_placement(0, 50, 151), 80);
        assert_eq!(estimate_inbox_placement(0, 50, 301), 65);
    }

    #[test]
    fn test_worst_case() {
        assert_eq!(estimate_inbox_placement(85, 0, 0), 30);
        assert_eq!(estimate_inbox_placement(85, 10, 500), 25);
    }

    #[test]
    fn test_always_in_range() {
        for spam in [0, 15, 30, 50, 70, 85] {
            for readability in [0, 39, 40, 69, 70, 100] {
                for words in [0, 29, 30, 49, 50, 150, 151, 300, 301, 1000] {
                    assert!(estimate_inbox_placement(spam, readability, words) <= 100);
                }
            }
        }
    }
}
