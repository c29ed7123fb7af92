//! Rule-based field extractors for ETS work orders.

pub mod fields;
pub mod inference;
pub mod patterns;
pub mod tasks;

pub use fields::{
    Candidate, CandidateChain, FieldKind, PatternExtractor, Refine, ADDRESS_NOT_FOUND,
    CONTRACTOR_TBD, DEFAULT_JOB_DESCRIPTION, PHONE_NOT_FOUND, SITE_CONTACT_NOT_FOUND,
};
pub use inference::{
    classify_work_type, determine_urgency, is_partner_document, requires_jsa, requires_swms,
    GENERAL_WORK_TYPE,
};
pub use tasks::{extract_tasks, TaskExtractor};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
