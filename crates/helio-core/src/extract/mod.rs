//! Transcript field extraction module.

mod fallback;
mod parser;
pub mod rules;
mod structured;

pub use fallback::PatternExtractor;
pub use parser::{ExtractionResult, ExtractionTier, SolarExtractor};
pub use rules::DiscardedValue;
pub use structured::StructuredBlockExtractor;

use crate::models::ExtractedFields;

/// Fields recovered by one extraction tier.
#[derive(Debug, Clone, Default)]
pub struct TierOutput {
    /// Values that passed the bounds check.
    pub fields: ExtractedFields,
    /// Values that were found but failed the bounds check.
    pub discarded: Vec<DiscardedValue>,
}

/// Trait for extraction tiers.
pub trait RecordExtractor {
    /// Extract whatever core fields the tier can recover from `text`.
    fn extract_fields(&self, text: &str) -> TierOutput;
}
