//! Data models: work orders, job records and configuration.

pub mod config;
pub mod job_record;
pub mod work_order;

pub use config::{EtsConfig, ExtractionConfig, GeocoderConfig, JobConfig, PartnerConfig};
pub use job_record::{EntryChannel, JobRecord};
pub use work_order::{SiteLocation, Urgency, WorkOrder, WorkTask};
