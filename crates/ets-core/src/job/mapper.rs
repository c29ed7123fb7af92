//! Mapping of work orders onto the job-management schema.

use tracing::debug;

use super::formatter::format_job_description;
use crate::models::config::JobConfig;
use crate::models::job_record::{EntryChannel, JobRecord};
use crate::models::work_order::{Urgency, WorkOrder};

/// Category used for work types without a mapping.
pub const DEFAULT_CATEGORY: &str = "General Electrical";

/// Priority used for unrecognized urgency labels.
pub const DEFAULT_PRIORITY: &str = "normal";

const CATEGORY_MAP: &[(&str, &str)] = &[
    ("Electrical MS", "Emergency Electrical"),
    ("Electrical Report", "Electrical Assessment"),
    ("HOME ASSIST elec", "Residential Electrical"),
    ("Installation Of Power Point", "Electrical Installation"),
    ("Emergency Electrical", "Emergency Electrical"),
    ("Electrical Maintenance", "Electrical Maintenance"),
];

const PRIORITY_MAP: &[(&str, &str)] = &[
    ("emergency", "urgent"),
    ("urgent", "high"),
    ("standard", "normal"),
];

/// Job category for a work type.
pub fn map_work_type_to_category(work_type: &str) -> &'static str {
    CATEGORY_MAP
        .iter()
        .find(|(label, _)| *label == work_type)
        .map(|(_, category)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}

/// Job priority for an urgency label.
pub fn map_urgency_to_priority(urgency: &str) -> &'static str {
    PRIORITY_MAP
        .iter()
        .find(|(label, _)| *label == urgency)
        .map(|(_, priority)| *priority)
        .unwrap_or(DEFAULT_PRIORITY)
}

/// Builds job records from work orders.
#[derive(Debug, Clone, Default)]
pub struct JobMapper {
    config: JobConfig,
    channel: EntryChannel,
}

impl JobMapper {
    pub fn new(config: JobConfig) -> Self {
        Self {
            config,
            channel: EntryChannel::default(),
        }
    }

    /// Set the channel documents arrive through.
    pub fn with_channel(mut self, channel: EntryChannel) -> Self {
        self.channel = channel;
        self
    }

    /// Map a work order to a job record.
    pub fn to_job_record(&self, order: &WorkOrder) -> JobRecord {
        let record = JobRecord {
            job_number: order.order_number.clone(),
            job_address: order.site_address.clone(),
            job_contact_name: order.site_contact_name.clone(),
            job_contact_phone: order.site_contact_phone.clone(),
            job_description: format_job_description(order),
            customer_name: order.customer_name.clone(),
            job_latitude: order.site_location.latitude,
            job_longitude: order.site_location.longitude,
            geocoded: order.site_location.geocoded,
            category_name: map_work_type_to_category(&order.work_type).to_string(),
            job_priority: map_urgency_to_priority(order.urgency.as_str()).to_string(),
            job_is_emergency: order.urgency == Urgency::Emergency,
            generated_value: order.estimated_value,
            ets_order_number: order.order_number.clone(),
            ets_work_type: order.work_type.clone(),
            requires_jsa: order.requires_jsa,
            requires_swms: order.requires_swms,
            cost_limit: order.cost_limit.clone(),
            source: self.config.source_for(self.channel).to_string(),
            created_by: self.config.created_by.clone(),
        };

        debug!(
            "Mapped {} to category {:?}, priority {:?}",
            record.job_number, record.category_name, record.job_priority
        );
        record
    }
}
