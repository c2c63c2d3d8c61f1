use crate::features::cta::{CtaType, FrictionLevel};
use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Lookup tables the analyzers match against. The defaults are frozen; a
/// catalog loaded from YAML swaps content without touching the scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    pub spam_keywords: Vec<String>,
    pub urgency_words: Vec<String>,
    pub curiosity_patterns: Vec<String>,
    pub cta_groups: Vec<CtaPatternGroup>,
}

/// One typed group of call-to-action patterns. Groups are tried in catalog
/// order, so earlier groups win ties on the same line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CtaPatternGroup {
    pub cta_type: CtaType,
    pub friction: FrictionLevel,
    pub patterns: Vec<String>,
}

const SPAM_KEYWORDS: &[&str] = &[
    // Urgency/Scarcity
    "act now",
    "limited time",
    "urgent",
    "hurry",
    "don't miss",
    "last chance",
    "expires",
    "deadline",
    "only today",
    "immediate",
    // Money/Free
    "free",
    "no cost",
    "cash",
    "money back",
    "discount",
    "save big",
    "lowest price",
    "bargain",
    "cheap",
    "affordable",
    // Guarantees
    "guarantee",
    "guaranteed",
    "no risk",
    "risk-free",
    "100%",
    "promise",
    // Superlatives
    "best",
    "amazing",
    "incredible",
    "unbelievable",
    "fantastic",
    // Sales pressure
    "buy now",
    "order now",
    "click here",
    "call now",
    "subscribe",
    "sign up",
    "apply now",
    "get started today",
    // Financial
    "credit",
    "loan",
    "investment",
    "profit",
    "earn money",
    "income",
    // Too good to be true
    "winner",
    "congratulations",
    "selected",
    "exclusive deal",
    "special offer",
];

const URGENCY_WORDS: &[&str] = &[
    "urgent", "asap", "now", "today", "quick", "fast", "deadline", "limited",
];

const CURIOSITY_PATTERNS: &[&str] = &["?", "how", "why", "what if", "secret", "discover", "reveal"];

const MEETING_PATTERNS: &[&str] = &[
    r"call\b",
    r"chat\b",
    r"meet\b",
    r"zoom\b",
    r"demo\b",
    r"schedule\b",
    r"\d+\s*min",
];
const REPLY_PATTERNS: &[&str] = &[
    r"reply\b",
    r"respond\b",
    r"let me know",
    r"thoughts\?",
    r"interested\?",
];
const LINK_PATTERNS: &[&str] = &[r"click\b", r"check out", r"visit\b", r"see\b.*link", r"http"];
const QUESTION_PATTERNS: &[&str] = &[r"\?$", r"would you", r"could you", r"can you", r"open to"];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            spam_keywords: owned(SPAM_KEYWORDS),
            urgency_words: owned(URGENCY_WORDS),
            curiosity_patterns: owned(CURIOSITY_PATTERNS),
            cta_groups: vec![
                CtaPatternGroup {
                    cta_type: CtaType::Meeting,
                    friction: FrictionLevel::Medium,
                    patterns: owned(MEETING_PATTERNS),
                },
                CtaPatternGroup {
                    cta_type: CtaType::Reply,
                    friction: FrictionLevel::Low,
                    patterns: owned(REPLY_PATTERNS),
                },
                CtaPatternGroup {
                    cta_type: CtaType::Link,
                    friction: FrictionLevel::High,
                    patterns: owned(LINK_PATTERNS),
                },
                CtaPatternGroup {
                    cta_type: CtaType::Question,
                    friction: FrictionLevel::Low,
                    patterns: owned(QUESTION_PATTERNS),
                },
            ],
        }
    }
}

impl Catalog {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        let catalog: Catalog = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;
        catalog.validate()?;
        log::info!(
            "Loaded catalog from {} ({} spam keywords, {} CTA groups)",
            path.display(),
            catalog.spam_keywords.len(),
            catalog.cta_groups.len()
        );
        Ok(catalog)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self).context("Failed to serialize catalog")?;
        fs::write(path, yaml)
            .with_context(|| format!("Failed to write catalog file: {}", path.display()))?;
        Ok(())
    }

    /// Checks the catalog can drive the analyzers: a non-empty spam list,
    /// one group per CTA type and patterns that compile.
    pub fn validate(&self) -> Result<()> {
        if self.spam_keywords.is_empty() {
            bail!("Catalog has no spam keywords");
        }

        for (i, group) in self.cta_groups.iter().enumerate() {
            if self.cta_groups[..i]
                .iter()
                .any(|earlier| earlier.cta_type == group.cta_type)
            {
                bail!("Duplicate CTA group: {}", group.cta_type.as_str());
            }
            for pattern in &group.patterns {
                Regex::new(pattern).with_context(|| {
                    format!(
                        "Invalid {} CTA pattern: {}",
                        group.cta_type.as_str(),
                        pattern
                    )
                })?;
            }
        }

        Ok(())
    }

    pub fn cta_pattern_count(&self) -> usize {
        self.cta_groups.iter().map(|g| g.patterns.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = Catalog::default();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.spam_keywords.len(), 50);
        assert_eq!(catalog.spam_keywords[0], "act now");
        assert_eq!(catalog.spam_keywords[49], "special offer");
        assert_eq!(catalog.cta_pattern_count(), 22);
    }

    #[test]
    fn test_cta_group_order() {
        let order: Vec<CtaType> = Catalog::default()
            .cta_groups
            .iter()
            .map(|g| g.cta_type)
            .collect();
        assert_eq!(
            order,
            vec![CtaType::Meeting, CtaType::Reply, CtaType::Link, CtaType::Question]
        );
    }

    #[test]
    fn test_rejects_bad_pattern() {
        let mut catalog = Catalog::default();
        catalog.cta_groups[0].patterns.push("(unclosed".to_string());
        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("meeting"));
    }

    #[test]
    fn test_rejects_duplicate_group() {
        let mut catalog = Catalog::default();
        let dup = catalog.cta_groups[1].clone();
        catalog.cta_groups.push(dup);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_spam_list() {
        let mut catalog = Catalog::default();
        catalog.spam_keywords.clear();
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        Catalog::default().save_to_file(&path).unwrap();

        let loaded = Catalog::load_from_file(&path).unwrap();
        assert_eq!(loaded, Catalog::default());
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "spam_keywords: [free]\nurgency_words: []\ncuriosity_patterns: []\ncta_groups: []\nextra: 1"
        )
        .unwrap();
        assert!(Catalog::load_from_file(file.path()).is_err());
    }
}
