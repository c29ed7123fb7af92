//! Downstream job-management output: description formatting and record mapping.

mod formatter;
mod mapper;

pub use formatter::{
    format_job_description, COST_LIMIT_HEADER, JOB_DESCRIPTION_HEADER, SCOPE_OF_WORKS_HEADER,
    SITE_INFORMATION_HEADER,
};
pub use mapper::{
    map_urgency_to_priority, map_work_type_to_category, JobMapper, DEFAULT_CATEGORY,
    DEFAULT_PRIORITY,
};
