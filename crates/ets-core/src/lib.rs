//! Core library for ETS work-order intake.
//!
//! This crate provides:
//! - PDF text extraction
//! - Rule-based extraction of work-order fields from free text
//! - Site address geocoding with failure absorption
//! - Mapping of work orders onto downstream job records

pub mod error;
pub mod geocode;
pub mod job;
pub mod models;
pub mod pdf;
pub mod workorder;

pub use error::{DocumentError, EtsError, GeocodeError, Result};
pub use geocode::{AddressLookup, GeoCandidate, Geocoder, NominatimLookup};
pub use job::{format_job_description, map_urgency_to_priority, map_work_type_to_category, JobMapper};
pub use models::{
    EntryChannel, EtsConfig, JobRecord, SiteLocation, Urgency, WorkOrder, WorkTask,
};
pub use pdf::{PdfProcessor, PdfTextExtractor};
pub use workorder::{NormalizationResult, WorkOrderNormalizer};
