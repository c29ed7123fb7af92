//! Downstream job-management record.

use serde::{Deserialize, Serialize};

/// Flat job record in the job-management system's field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_number: String,
    pub job_address: String,
    /// Site contact person, not the customer.
    pub job_contact_name: String,
    pub job_contact_phone: String,
    /// Formatted job description block.
    pub job_description: String,
    pub customer_name: String,
    pub job_latitude: f64,
    pub job_longitude: f64,
    pub geocoded: bool,

    // Classification
    pub category_name: String,
    pub job_priority: String,
    pub job_is_emergency: bool,

    // Financial
    pub generated_value: f64,

    // Compliance tracking
    pub ets_order_number: String,
    pub ets_work_type: String,
    pub requires_jsa: bool,
    pub requires_swms: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_limit: Option<String>,

    // Provenance
    pub source: String,
    pub created_by: String,
}

/// Channel a document entered the system through.
///
/// Each channel carries its own provenance tag on the job record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryChannel {
    /// Attachment picked up from the partner's mail.
    Email,
    /// File uploaded or processed directly.
    #[default]
    Upload,
}
