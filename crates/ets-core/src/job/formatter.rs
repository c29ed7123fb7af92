//! Job description block for the downstream job record.

use std::fmt::Write;

use crate::models::work_order::WorkOrder;

pub const SITE_INFORMATION_HEADER: &str = "=== SITE INFORMATION ===";
pub const JOB_DESCRIPTION_HEADER: &str = "=== JOB DESCRIPTION ===";
pub const SCOPE_OF_WORKS_HEADER: &str = "=== SCOPE OF WORKS ===";
pub const COST_LIMIT_HEADER: &str = "=== COST LIMIT ===";

/// Render a work order as the job description text.
///
/// Sections always appear in the same order; the only sections left out
/// are scope of works without tasks and cost limit without a limit. Text
/// is copied verbatim.
pub fn format_job_description(order: &WorkOrder) -> String {
    let mut out = String::new();

    out.push_str(SITE_INFORMATION_HEADER);
    out.push('\n');

    if !order.site_contact_name.is_empty() {
        let _ = writeln!(out, "Site Contact: {}", order.site_contact_name);
    }

    if !order.site_contact_phone.is_empty() {
        let _ = writeln!(out, "Site Phone: {}", order.site_contact_phone);
    }

    if order.site_location.geocoded {
        let _ = writeln!(
            out,
            "Site Location: {}, {}",
            order.site_location.latitude, order.site_location.longitude
        );
    } else if !order.site_address.is_empty() {
        let _ = writeln!(out, "Site Address: {}", order.site_address);
        out.push_str("Location: Coordinates not available\n");
    }

    out.push('\n');
    out.push_str(JOB_DESCRIPTION_HEADER);
    out.push('\n');
    out.push_str(&order.job_description);

    if !order.tasks.is_empty() {
        out.push_str("\n\n");
        out.push_str(SCOPE_OF_WORKS_HEADER);
        out.push('\n');
        for task in &order.tasks {
            let _ = writeln!(out, "{}. {}", task.task_number, task.description);
        }
    }

    if let Some(cost_limit) = &order.cost_limit {
        // Tasks already end with a newline
        out.push_str(if out.ends_with('\n') { "\n" } else { "\n\n" });
        out.push_str(COST_LIMIT_HEADER);
        out.push('\n');
        out.push_str(cost_limit);
    }

    out
}
