//! Work-order field extraction and normalization.

mod normalizer;
pub mod rules;

pub use normalizer::{NormalizationResult, WorkOrderNormalizer};
