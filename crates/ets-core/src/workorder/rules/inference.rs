//! Keyword-based inference of urgency, compliance flags and work type.
//!
//! All checks are case-insensitive substring tests over the raw text with
//! whitespace runs folded, so phrases wrapped across lines still match.

use super::fields::collapse_whitespace;
use crate::models::config::PartnerConfig;
use crate::models::work_order::Urgency;

/// Emergency-tier keywords, besides the partner's trading name.
/// Checked before the urgent tier.
pub const EMERGENCY_KEYWORDS: &[&str] = &["safety hazards", "power outages"];

/// Urgent-tier keywords.
pub const URGENT_KEYWORDS: &[&str] = &["emergency", "urgent", "asap", "immediately", "critical"];

/// Phrases that require a job safety analysis.
pub const JSA_KEYWORDS: &[&str] = &[
    "job safety analysis",
    "risk assessment",
    "identified hazards",
    "hazard identification",
    "risks above low level",
];

/// Phrases that require a safe work method statement.
pub const SWMS_KEYWORDS: &[&str] = &[
    "swms",
    "safe work method",
    "high-risk",
    "jobs exceeding $1,000",
    "roof work",
    "excavation",
];

/// Known work types, in priority order.
pub const WORK_TYPES: &[&str] = &[
    "Electrical MS",
    "Electrical Report",
    "HOME ASSIST elec",
    "Installation Of Power Point",
    "Emergency Electrical",
    "Electrical Maintenance",
];

/// Work type used when none of [`WORK_TYPES`] appears.
pub const GENERAL_WORK_TYPE: &str = "General Electrical";

/// Lower-cased text with whitespace runs folded to single spaces.
fn searchable(text: &str) -> String {
    collapse_whitespace(text).to_lowercase()
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords
        .iter()
        .filter(|keyword| !keyword.is_empty())
        .any(|keyword| haystack.contains(&searchable(keyword)))
}

/// Classify urgency; emergency-tier keywords win over urgent ones.
///
/// The partner's trading name is an emergency-tier keyword, so every
/// document on the partner's letterhead classifies as an emergency.
pub fn determine_urgency(text: &str, partner: &PartnerConfig) -> Urgency {
    let haystack = searchable(text);

    if contains_any(&haystack, &[partner.trading_name.as_str()])
        || contains_any(&haystack, EMERGENCY_KEYWORDS)
    {
        Urgency::Emergency
    } else if contains_any(&haystack, URGENT_KEYWORDS) {
        Urgency::Urgent
    } else {
        Urgency::Standard
    }
}

pub fn requires_jsa(text: &str) -> bool {
    contains_any(&searchable(text), JSA_KEYWORDS)
}

pub fn requires_swms(text: &str) -> bool {
    contains_any(&searchable(text), SWMS_KEYWORDS)
}

/// First known work type mentioned in the text, as its canonical label.
pub fn classify_work_type(text: &str) -> String {
    let haystack = searchable(text);
    WORK_TYPES
        .iter()
        .find(|work_type| haystack.contains(&searchable(work_type)))
        .copied()
        .unwrap_or(GENERAL_WORK_TYPE)
        .to_string()
}

/// Whether the text carries the partner's identifying markers.
pub fn is_partner_document(text: &str, partner: &PartnerConfig) -> bool {
    contains_any(
        &searchable(text),
        &[partner.trading_name.as_str(), partner.email.as_str()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partner() -> PartnerConfig {
        PartnerConfig::default()
    }

    #[test]
    fn test_urgency_tiers() {
        let p = partner();
        assert_eq!(determine_urgency("Power outages across the street", &p), Urgency::Emergency);
        assert_eq!(determine_urgency("Report any safety hazards found", &p), Urgency::Emergency);
        assert_eq!(determine_urgency("Please attend ASAP", &p), Urgency::Urgent);
        assert_eq!(determine_urgency("Emergency callout", &p), Urgency::Urgent);
        assert_eq!(determine_urgency("Routine inspection", &p), Urgency::Standard);
    }

    #[test]
    fn test_emergency_tier_beats_urgent_regardless_of_order() {
        let p = partner();
        assert_eq!(determine_urgency("URGENT: power outages reported", &p), Urgency::Emergency);
        assert_eq!(determine_urgency("power outages reported, urgent", &p), Urgency::Emergency);
    }

    #[test]
    fn test_letterhead_is_emergency_tier() {
        let p = partner();
        let text = "EMERGENCY TRADE SERVICES Pty Ltd ATF The Emergency Trade Services Trust\nReplace globe";
        assert_eq!(determine_urgency(text, &p), Urgency::Emergency);

        let wrapped = "Emergency\nTrade Services Pty Ltd\nReplace globe";
        assert_eq!(determine_urgency(wrapped, &p), Urgency::Emergency);
    }

    #[test]
    fn test_wrapped_keywords_match() {
        assert!(requires_jsa("Complete a risk\n  assessment first"));
        assert_eq!(classify_work_type("Job type: Electrical\nMS"), "Electrical MS");
    }

    #[test]
    fn test_compliance_flags_are_independent() {
        assert!(requires_jsa("Complete a Risk Assessment before starting"));
        assert!(!requires_swms("Complete a Risk Assessment before starting"));
        assert!(requires_swms("SWMS must be completed for roof work"));
        assert!(!requires_jsa("SWMS must be completed for roof work"));
        assert!(requires_swms("Applies to jobs exceeding $1,000"));
    }

    #[test]
    fn test_work_type_classification() {
        assert_eq!(classify_work_type("Job type: ELECTRICAL MS"), "Electrical MS");
        assert_eq!(classify_work_type("home assist elec - smoke alarm"), "HOME ASSIST elec");
        assert_eq!(classify_work_type("Electrical Report and Electrical MS"), "Electrical MS");
        assert_eq!(classify_work_type("Plumbing"), GENERAL_WORK_TYPE);
    }

    #[test]
    fn test_partner_document_markers() {
        let p = partner();
        assert!(is_partner_document("Contact admin@etsaus.com.au", &p));
        assert!(is_partner_document("Emergency Trade Services Pty Ltd", &p));
        assert!(!is_partner_document("Some other company", &p));
    }
}
