pub mod cta;
pub mod fix_suggestions;
pub mod inbox_placement;
pub mod readability;
pub mod spam_keywords;
pub mod subject_line;

pub use cta::{CtaAnalysis, CtaAnalyzer, CtaPlacement, CtaType, FrictionLevel};
pub use fix_suggestions::{
    generate_fix_suggestions, FixSuggestion, Priority, SuggestionContext, SuggestionType,
};
pub use inbox_placement::estimate_inbox_placement;
pub use readability::{calculate_readability, ReadabilityLevel, ReadabilityResult};
pub use spam_keywords::{SpamKeywordDetector, SpamResult};
pub use subject_line::{SubjectAnalysis, SubjectLineAnalyzer};
