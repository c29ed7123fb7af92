//! Normalized work-order model.

use serde::{Deserialize, Serialize};

/// A partner work order after extraction and normalization.
///
/// Every field carries either an extracted value or a well-defined
/// default, so consumers can detect missing data by inspecting values.
/// Only `cost_limit` is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Partner order number, or a generated token when none was found.
    pub order_number: String,

    /// Order date as printed on the document.
    pub date: String,

    /// Contractor the order is addressed to.
    pub contractor: String,

    /// Person at the site. Not the billed customer.
    pub site_contact_name: String,

    /// Street address of the job.
    pub site_address: String,

    /// Site contact phone, digits and whitespace only.
    pub site_contact_phone: String,

    /// Geocoded location of `site_address`.
    pub site_location: SiteLocation,

    /// Billed customer. Always the partner's legal name.
    pub customer_name: String,

    /// Work type label.
    pub work_type: String,

    /// Client instructions.
    pub job_description: String,

    /// Estimated job value, 0 when no plausible amount was found.
    pub estimated_value: f64,

    /// Cost limit sentence, when the order sets one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_limit: Option<String>,

    /// Scope-of-works items in document order.
    pub tasks: Vec<WorkTask>,

    /// A job safety analysis must be completed.
    pub requires_jsa: bool,

    /// A safe work method statement must be completed.
    pub requires_swms: bool,

    /// Urgency classification.
    pub urgency: Urgency,

    /// Partner contact phone.
    pub ets_phone: String,

    /// Partner contact email.
    pub ets_email: String,
}

/// One numbered scope-of-works item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkTask {
    /// Dotted numeral, e.g. "1.1".
    pub task_number: String,
    pub description: String,
    /// Task only applies under a stated condition ("if you cannot ...").
    pub is_conditional: bool,
}

impl WorkTask {
    pub fn new(task_number: impl Into<String>, description: impl Into<String>, is_conditional: bool) -> Self {
        Self {
            task_number: task_number.into(),
            description: description.into(),
            is_conditional,
        }
    }
}

/// Coordinates of the job site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// False when the lookup was skipped or failed; coordinates are then (0, 0).
    pub geocoded: bool,
}

impl SiteLocation {
    /// Location for an address that could not be (or was not) geocoded.
    pub fn ungeocoded() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            geocoded: false,
        }
    }

    pub fn geocoded(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            geocoded: true,
        }
    }
}

impl Default for SiteLocation {
    fn default() -> Self {
        Self::ungeocoded()
    }
}

/// Urgency tier of a work order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Emergency,
    Urgent,
    Standard,
}

impl Urgency {
    /// Lowercase label, as used by the downstream priority table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Urgent => "urgent",
            Self::Standard => "standard",
        }
    }
}

impl Default for Urgency {
    fn default() -> Self {
        Self::Standard
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
