use crate::config::catalog::CtaPatternGroup;
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

const BASE_CLARITY: i32 = 5;
const MISSING_CTA_CLARITY: i32 = 2;
const MIN_CLARITY: i32 = 1;
const MAX_CLARITY: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtaType {
    Meeting,
    Reply,
    Link,
    Question,
}

impl CtaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CtaType::Meeting => "meeting",
            CtaType::Reply => "reply",
            CtaType::Link => "link",
            CtaType::Question => "question",
        }
    }

    fn clarity_bonus(&self) -> i32 {
        match self {
            CtaType::Reply => 2,
            CtaType::Question => 1,
            CtaType::Link => -1,
            CtaType::Meeting => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtaPlacement {
    Beginning,
    Middle,
    End,
}

impl CtaPlacement {
    /// Buckets a line index into thirds of the body.
    pub fn from_line(index: usize, total_lines: usize) -> Self {
        let index = index as f64;
        let total = total_lines as f64;
        if index < total * 0.33 {
            CtaPlacement::Beginning
        } else if index < total * 0.66 {
            CtaPlacement::Middle
        } else {
            CtaPlacement::End
        }
    }

    fn clarity_bonus(&self) -> i32 {
        match self {
            CtaPlacement::End => 2,
            CtaPlacement::Middle => 1,
            CtaPlacement::Beginning => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrictionLevel {
    Low,
    Medium,
    High,
}

impl FrictionLevel {
    fn clarity_bonus(&self) -> i32 {
        match self {
            FrictionLevel::Low => 1,
            FrictionLevel::Medium => 0,
            FrictionLevel::High => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtaAnalysis {
    pub cta_present: bool,
    pub cta_clarity: i32,
    pub cta_type: Option<CtaType>,
    pub cta_placement: Option<CtaPlacement>,
    pub friction_level: Option<FrictionLevel>,
}

impl CtaAnalysis {
    fn empty_body() -> Self {
        Self {
            cta_present: false,
            cta_clarity: 0,
            cta_type: None,
            cta_placement: None,
            friction_level: None,
        }
    }

    /// No ask at all is itself high friction.
    fn missing() -> Self {
        Self {
            cta_present: false,
            cta_clarity: MISSING_CTA_CLARITY,
            cta_type: None,
            cta_placement: None,
            friction_level: Some(FrictionLevel::High),
        }
    }
}

struct CompiledGroup {
    cta_type: CtaType,
    friction: FrictionLevel,
    patterns: Vec<Regex>,
}

pub struct CtaAnalyzer {
    groups: Vec<CompiledGroup>,
}

impl CtaAnalyzer {
    pub fn new(groups: &[CtaPatternGroup]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(groups.len());
        for group in groups {
            let patterns = group
                .patterns
                .iter()
                .map(|p| {
                    Regex::new(p).with_context(|| {
                        format!("Invalid {} CTA pattern: {}", group.cta_type.as_str(), p)
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            compiled.push(CompiledGroup {
                cta_type: group.cta_type,
                friction: group.friction,
                patterns,
            });
        }
        Ok(Self { groups: compiled })
    }

    pub fn analyze(&self, body: &str) -> CtaAnalysis {
        if body.is_empty() {
            return CtaAnalysis::empty_body();
        }

        let trimmed = body.trim();
        let lines: Vec<&str> = trimmed.split('\n').collect();

        let found = self.first_explicit_cta(&lines).or_else(|| {
            // A closing question is an implicit ask
            if trimmed.ends_with('?') {
                let friction = self
                    .groups
                    .iter()
                    .find(|g| g.cta_type == CtaType::Question)
                    .map_or(FrictionLevel::Low, |g| g.friction);
                Some((CtaType::Question, friction, lines.len() - 1))
            } else {
                None
            }
        });

        let Some((cta_type, friction, line_index)) = found else {
            return CtaAnalysis::missing();
        };

        let placement = CtaPlacement::from_line(line_index, lines.len());
        let clarity = BASE_CLARITY
            + placement.clarity_bonus()
            + cta_type.clarity_bonus()
            + friction.clarity_bonus();

        CtaAnalysis {
            cta_present: true,
            cta_clarity: clarity.clamp(MIN_CLARITY, MAX_CLARITY),
            cta_type: Some(cta_type),
            cta_placement: Some(placement),
            friction_level: Some(friction),
        }
    }

    /// First line, in document order, that any group matches. Within a
    /// line, groups are tried in catalog order.
    fn first_explicit_cta(&self, lines: &[&str]) -> Option<(CtaType, FrictionLevel, usize)> {
        lines.iter().enumerate().find_map(|(index, line)| {
            let line_lower = line.to_lowercase();
            self.groups
                .iter()
                .find(|group| group.patterns.iter().any(|p| p.is_match(&line_lower)))
                .map(|group| (group.cta_type, group.friction, index))
        })
    }
}
