//! Ordered candidate-pattern extraction of work-order fields.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{Local, Utc};
use regex::Regex;
use tracing::{debug, trace};

use super::FieldExtractor;
use super::patterns::*;
use crate::models::config::{ExtractionConfig, PartnerConfig};

/// Placeholder for a missing site contact name.
pub const SITE_CONTACT_NOT_FOUND: &str = "Site Contact Not Found";
/// Placeholder for a missing site address.
pub const ADDRESS_NOT_FOUND: &str = "Address Not Found";
/// Placeholder for a missing or too-short site phone.
pub const PHONE_NOT_FOUND: &str = "Phone Not Found";
/// Placeholder for a missing contractor.
pub const CONTRACTOR_TBD: &str = "CONTRACTOR TBD";
/// Boilerplate used when no job description is found.
pub const DEFAULT_JOB_DESCRIPTION: &str = "Please attend site as per work order requirements.";

/// Minimum number of digits in an accepted phone number.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Pattern-driven work-order fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    OrderNumber,
    Date,
    Contractor,
    SiteContactName,
    SiteAddress,
    SiteContactPhone,
    JobDescription,
    EstimatedValue,
}

impl FieldKind {
    pub const ALL: [FieldKind; 8] = [
        FieldKind::OrderNumber,
        FieldKind::Date,
        FieldKind::Contractor,
        FieldKind::SiteContactName,
        FieldKind::SiteAddress,
        FieldKind::SiteContactPhone,
        FieldKind::JobDescription,
        FieldKind::EstimatedValue,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::OrderNumber => "order_number",
            Self::Date => "date",
            Self::Contractor => "contractor",
            Self::SiteContactName => "site_contact_name",
            Self::SiteAddress => "site_address",
            Self::SiteContactPhone => "site_contact_phone",
            Self::JobDescription => "job_description",
            Self::EstimatedValue => "estimated_value",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Post-processing and validity check for a captured value.
///
/// Returns `None` when the value is not acceptable, which makes the chain
/// move on to the next match or candidate.
pub type Refine = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// A candidate pattern paired with its refinement.
#[derive(Clone)]
pub struct Candidate {
    pattern: Regex,
    refine: Refine,
}

impl Candidate {
    pub fn new(pattern: Regex, refine: Refine) -> Self {
        Self { pattern, refine }
    }

    /// Refined values of every match, in document order.
    fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        self.pattern.captures_iter(text).filter_map(move |caps| {
            let raw = caps.get(1).or_else(|| caps.get(0))?.as_str();
            if raw.trim().is_empty() {
                return None;
            }
            (self.refine)(raw)
        })
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

/// Ordered candidates for one field, most confident first.
#[derive(Clone)]
pub struct CandidateChain {
    kind: FieldKind,
    candidates: Vec<Candidate>,
    refine: Refine,
}

impl CandidateChain {
    /// Create an empty chain whose candidates share `refine`.
    pub fn new(kind: FieldKind, refine: Refine) -> Self {
        Self {
            kind,
            candidates: Vec::new(),
            refine,
        }
    }

    /// Append a candidate using the chain's refinement.
    pub fn with_candidate(mut self, pattern: &Regex) -> Self {
        self.push(pattern.clone());
        self
    }

    /// Append a candidate using the chain's refinement.
    pub fn push(&mut self, pattern: Regex) {
        self.candidates
            .push(Candidate::new(pattern, Arc::clone(&self.refine)));
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl fmt::Debug for CandidateChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateChain")
            .field("kind", &self.kind)
            .field("candidates", &self.candidates)
            .finish()
    }
}

impl FieldExtractor for CandidateChain {
    type Output = String;

    fn extract(&self, text: &str) -> Option<String> {
        for (index, candidate) in self.candidates.iter().enumerate() {
            if let Some(value) = candidate.matches(text).next() {
                debug!(field = %self.kind, candidate = index, "matched {:?}", value);
                return Some(value);
            }
            trace!(field = %self.kind, candidate = index, "no acceptable match");
        }
        None
    }

    fn extract_all(&self, text: &str) -> Vec<String> {
        self.candidates
            .iter()
            .flat_map(|candidate| candidate.matches(text))
            .collect()
    }
}

/// Trim and fold embedded line breaks into spaces.
pub fn clean_capture(raw: &str) -> String {
    raw.trim().replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Collapse runs of whitespace into single spaces.
pub fn collapse_whitespace(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw.trim(), " ").into_owned()
}

/// Strip a phone capture down to digits and whitespace.
///
/// Returns `None` when fewer than [`MIN_PHONE_DIGITS`] digits remain.
pub fn clean_phone(raw: &str) -> Option<String> {
    let phone: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || c.is_whitespace())
        .collect();
    let phone = phone.trim();
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    (digits >= MIN_PHONE_DIGITS).then(|| phone.to_string())
}

/// Parse a dollar amount like `1,250.50`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().replace(',', "").parse::<f64>().ok()
}

fn refine_plain() -> Refine {
    Arc::new(|raw: &str| {
        let value = clean_capture(raw);
        (!value.is_empty()).then_some(value)
    })
}

fn refine_contact_name() -> Refine {
    Arc::new(|raw: &str| {
        let name = clean_capture(raw);
        let name = PHONE_LABEL_TAIL.replace(&name, "");
        let name = ADDRESS_LABEL_TAIL.replace(name.trim(), "");
        let name = name.trim();
        (name.chars().count() > 2).then(|| name.to_string())
    })
}

fn refine_address(min_len: usize) -> Refine {
    Arc::new(move |raw: &str| {
        let address = clean_capture(raw);
        let address = PHONE_LABEL_TAIL.replace(&address, "");
        let address = CONTACT_LABEL_TAIL.replace(address.trim(), "");
        let address = address.trim();
        (address.chars().count() >= min_len).then(|| address.to_string())
    })
}

fn refine_phone() -> Refine {
    Arc::new(clean_phone)
}

fn refine_description() -> Refine {
    Arc::new(|raw: &str| {
        let description = collapse_whitespace(raw);
        (description.chars().count() > 10).then_some(description)
    })
}

fn refine_amount(max_value: f64) -> Refine {
    Arc::new(move |raw: &str| {
        let value = parse_amount(raw)?;
        (value > 0.0 && value < max_value).then(|| value.to_string())
    })
}

/// Extracts work-order fields with one candidate chain per field.
///
/// The cost-limit clause is optional and not a [`FieldKind`]: it has no
/// default and its absence is not reported as a missing field.
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    chains: HashMap<FieldKind, CandidateChain>,
    cost_limit: Candidate,
    order_prefix: String,
}

impl PatternExtractor {
    /// Build the standard chains for partner work orders.
    pub fn new(extraction: &ExtractionConfig, partner: &PartnerConfig) -> Self {
        let chains = [
            CandidateChain::new(FieldKind::OrderNumber, refine_plain())
                .with_candidate(&ORDER_NUMBER_LABELED)
                .with_candidate(&ORDER_NUMBER_PO)
                .with_candidate(&ORDER_NUMBER_WORK_ORDER),
            CandidateChain::new(FieldKind::Date, refine_plain())
                .with_candidate(&DATE_DAY_MONTH_NAME)
                .with_candidate(&DATE_SLASHED)
                .with_candidate(&DATE_ISO),
            CandidateChain::new(FieldKind::Contractor, refine_plain())
                .with_candidate(&CONTRACTOR_TO_BLOCK)
                .with_candidate(&CONTRACTOR_TO_LINE)
                .with_candidate(&CONTRACTOR_LABELED)
                .with_candidate(&CONTRACTOR_ASSIGNED),
            CandidateChain::new(FieldKind::SiteContactName, refine_contact_name())
                .with_candidate(&CONTACT_CUSTOMER_DETAILS)
                .with_candidate(&CONTACT_LABELED)
                .with_candidate(&CONTACT_CUSTOMER)
                .with_candidate(&CONTACT_SITE),
            CandidateChain::new(
                FieldKind::SiteAddress,
                refine_address(extraction.min_address_len),
            )
            .with_candidate(&ADDRESS_SITE)
            .with_candidate(&ADDRESS_LABELED)
            .with_candidate(&ADDRESS_LOCATION),
            CandidateChain::new(FieldKind::SiteContactPhone, refine_phone())
                .with_candidate(&PHONE_CUSTOMER)
                .with_candidate(&PHONE_LABELED)
                .with_candidate(&PHONE_MOBILE)
                .with_candidate(&PHONE_NEAR_CONTACT)
                .with_candidate(&PHONE_STANDALONE),
            CandidateChain::new(FieldKind::JobDescription, refine_description())
                .with_candidate(&DESCRIPTION_CLIENT_INSTRUCTIONS)
                .with_candidate(&DESCRIPTION_LABELED)
                .with_candidate(&DESCRIPTION_PLEASE_ATTEND)
                .with_candidate(&DESCRIPTION_WORK_REQUIRED),
            CandidateChain::new(
                FieldKind::EstimatedValue,
                refine_amount(extraction.max_estimated_value),
            )
            .with_candidate(&VALUE_TOTAL_AUD)
            .with_candidate(&VALUE_LABELED)
            .with_candidate(&VALUE_DOLLAR),
        ];

        Self {
            chains: chains.into_iter().map(|c| (c.kind(), c)).collect(),
            cost_limit: Candidate::new(COST_LIMIT.clone(), refine_plain()),
            order_prefix: partner.order_prefix.clone(),
        }
    }

    /// Append a candidate pattern to the end of a field's chain.
    pub fn with_candidate(mut self, kind: FieldKind, pattern: Regex) -> Self {
        if let Some(chain) = self.chains.get_mut(&kind) {
            chain.push(pattern);
        }
        self
    }

    /// The chain used for a field.
    pub fn chain(&self, kind: FieldKind) -> Option<&CandidateChain> {
        self.chains.get(&kind)
    }

    /// First acceptable value for a field, without falling back.
    pub fn extract(&self, kind: FieldKind, text: &str) -> Option<String> {
        self.chains.get(&kind)?.extract(text)
    }

    /// Value for a field, or its default when nothing acceptable matched.
    pub fn extract_field(&self, text: &str, kind: FieldKind) -> String {
        self.extract(kind, text)
            .unwrap_or_else(|| self.default_value(kind))
    }

    /// Default substituted for a field that could not be extracted.
    pub fn default_value(&self, kind: FieldKind) -> String {
        match kind {
            FieldKind::OrderNumber => {
                format!("{}-{}", self.order_prefix, Utc::now().timestamp_millis())
            }
            FieldKind::Date => Local::now().format("%d/%m/%Y").to_string(),
            FieldKind::Contractor => CONTRACTOR_TBD.to_string(),
            FieldKind::SiteContactName => SITE_CONTACT_NOT_FOUND.to_string(),
            FieldKind::SiteAddress => ADDRESS_NOT_FOUND.to_string(),
            FieldKind::SiteContactPhone => PHONE_NOT_FOUND.to_string(),
            FieldKind::JobDescription => DEFAULT_JOB_DESCRIPTION.to_string(),
            FieldKind::EstimatedValue => "0".to_string(),
        }
    }

    /// The "Cost limit ..." clause, if the order states one.
    pub fn extract_cost_limit(&self, text: &str) -> Option<String> {
        let limit = self.cost_limit.matches(text).next();
        trace!("cost limit: {:?}", limit);
        limit
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default(), &PartnerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extractor() -> PatternExtractor {
        PatternExtractor::default()
    }

    #[test]
    fn test_contact_name_strips_label_spillover() {
        let ex = extractor();
        assert_eq!(
            ex.extract_field("Contact: Jo Bloggs Phone: 0400 000 000", FieldKind::SiteContactName),
            "Jo Bloggs"
        );
        assert_eq!(
            ex.extract_field("Customer: Ann Lee Address: 1 Main St", FieldKind::SiteContactName),
            "Ann Lee"
        );
    }

    #[test]
    fn test_contact_name_too_short_falls_back() {
        let ex = extractor();
        assert_eq!(
            ex.extract_field("Contact: Al\n", FieldKind::SiteContactName),
            SITE_CONTACT_NOT_FOUND
        );
    }

    #[test]
    fn test_customer_details_preferred() {
        let text = "Customer Details: Lynda M Harraway\nSite Address: 105 Hunter St\nContact: Someone Else";
        assert_eq!(
            extractor().extract_field(text, FieldKind::SiteContactName),
            "Lynda M Harraway"
        );
    }

    #[test]
    fn test_address_minimum_length() {
        let ex = extractor();
        assert_eq!(ex.extract_field("Site Address: 1 St\n", FieldKind::SiteAddress), ADDRESS_NOT_FOUND);
        assert_eq!(
            ex.extract_field("Site Address: 105 Hunter St, Burringbar NSW 2483\n", FieldKind::SiteAddress),
            "105 Hunter St, Burringbar NSW 2483"
        );
    }

    #[test]
    fn test_address_falls_through_candidates() {
        let text = "Site Address: x\nLocation: 12 Beach Rd, Byron Bay\n";
        assert_eq!(
            extractor().extract_field(text, FieldKind::SiteAddress),
            "12 Beach Rd, Byron Bay"
        );
    }

    #[test]
    fn test_phone_cleaned_to_digits_and_spaces() {
        let phone = extractor().extract_field("Customer Phone: (0407) 840-570\n", FieldKind::SiteContactPhone);
        assert_eq!(phone, "0407 840570");
    }

    #[test]
    fn test_phone_rejects_short_numbers_in_every_candidate() {
        let ex = extractor();
        let text = "Customer Phone: 123 456\nPhone: 555-1234\nMobile: 04 12\n";
        assert_eq!(ex.extract_field(text, FieldKind::SiteContactPhone), PHONE_NOT_FOUND);
    }

    #[test]
    fn test_phone_falls_through_to_next_candidate() {
        let text = "Customer Phone: n/a\nMobile: 0412 345 678\n";
        assert_eq!(
            extractor().extract_field(text, FieldKind::SiteContactPhone),
            "0412 345 678"
        );
    }

    #[test]
    fn test_clean_phone() {
        assert_eq!(clean_phone(" +61 412 345 678 "), Some("61 412 345 678".to_string()));
        assert_eq!(clean_phone("12345"), None);
    }

    #[test]
    fn test_order_number_candidates() {
        let ex = extractor();
        assert_eq!(
            ex.extract_field("Order Number: PO1529-MS01-001", FieldKind::OrderNumber),
            "PO1529-MS01-001"
        );
        assert_eq!(
            ex.extract_field("Reference PO1529-MS01-002", FieldKind::OrderNumber),
            "PO1529-MS01-002"
        );
        assert_eq!(
            ex.extract_field("Work Order: WO-77", FieldKind::OrderNumber),
            "WO-77"
        );
    }

    #[test]
    fn test_order_number_generated_when_missing() {
        let number = extractor().extract_field("nothing here", FieldKind::OrderNumber);
        assert!(number.starts_with("ETS-"));
        assert!(number["ETS-".len()..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_date_formats() {
        let ex = extractor();
        assert_eq!(ex.extract_field("Date: 4 Jun 2024", FieldKind::Date), "4 Jun 2024");
        assert_eq!(ex.extract_field("Date 04/06/2024", FieldKind::Date), "04/06/2024");
        assert_eq!(ex.extract_field("issued 2024-06-04", FieldKind::Date), "2024-06-04");
        assert!(!ex.extract_field("undated", FieldKind::Date).is_empty());
    }

    #[test]
    fn test_contractor() {
        let ex = extractor();
        assert_eq!(
            ex.extract_field("To: SUSTAINE ELECTRICAL & SOLAR ETS Phone: 1300 755 455", FieldKind::Contractor),
            "SUSTAINE ELECTRICAL & SOLAR"
        );
        assert_eq!(
            ex.extract_field("To: SPARKY BROS\nCustomer Details: x", FieldKind::Contractor),
            "SPARKY BROS"
        );
        assert_eq!(
            ex.extract_field("Assigned to: Acme Electrical\n", FieldKind::Contractor),
            "Acme Electrical"
        );
        assert_eq!(ex.extract_field("", FieldKind::Contractor), CONTRACTOR_TBD);
    }

    #[test]
    fn test_job_description() {
        let ex = extractor();
        let text = "Client Instructions\nPlease attend to the\nfaulty smoke alarm.\n\nScope of Works";
        assert_eq!(
            ex.extract_field(text, FieldKind::JobDescription),
            "Please attend to the faulty smoke alarm."
        );
        assert_eq!(
            ex.extract_field("Job Description: short\n\n", FieldKind::JobDescription),
            DEFAULT_JOB_DESCRIPTION
        );
    }

    #[test]
    fn test_estimated_value_bounds() {
        let ex = extractor();
        assert_eq!(ex.extract(FieldKind::EstimatedValue, "Total AUD incl GST $1,250.50"), Some("1250.5".to_string()));
        assert_eq!(ex.extract(FieldKind::EstimatedValue, "Insured for $25,000"), None);
        assert_eq!(
            ex.extract(FieldKind::EstimatedValue, "Insured for $25,000 but limit $300"),
            Some("300".to_string())
        );
    }

    #[test]
    fn test_estimated_value_bound_is_configurable() {
        let config = ExtractionConfig {
            max_estimated_value: 100_000.0,
            ..ExtractionConfig::default()
        };
        let ex = PatternExtractor::new(&config, &PartnerConfig::default());
        assert_eq!(ex.extract(FieldKind::EstimatedValue, "Insured for $25,000"), Some("25000".to_string()));
    }

    #[test]
    fn test_cost_limit() {
        let ex = extractor();
        assert_eq!(
            ex.extract_cost_limit("Cost limit: strictly $250 + GST."),
            Some("Cost limit: strictly $250".to_string())
        );
        assert_eq!(
            ex.extract_cost_limit("All amounts in AUD.\nCost Limit strictly $300 + GST"),
            Some("Cost Limit strictly $300".to_string())
        );
        assert_eq!(ex.extract_cost_limit("no limits"), None);
    }

    #[test]
    fn test_custom_candidate_appended() {
        let ex = extractor().with_candidate(
            FieldKind::SiteContactName,
            Regex::new(r"Tenant is (\w+ \w+)").unwrap(),
        );
        assert_eq!(
            ex.extract_field("Tenant is Sam Hill", FieldKind::SiteContactName),
            "Sam Hill"
        );
        assert_eq!(ex.chain(FieldKind::SiteContactName).map(|c| c.len()), Some(5));
    }

    #[test]
    fn test_extract_all_lists_every_acceptable_value() {
        let chain = extractor();
        let values = chain
            .chain(FieldKind::SiteContactPhone)
            .unwrap()
            .extract_all("Customer Phone: 0407 840 570\nMobile: 0412 345 678\n");
        assert!(values.contains(&"0407 840 570".to_string()));
        assert!(values.contains(&"0412 345 678".to_string()));
    }

    #[test]
    fn test_defaults_are_never_empty() {
        let ex = extractor();
        for kind in FieldKind::ALL {
            assert!(!ex.default_value(kind).is_empty(), "{kind} default is empty");
        }
    }
}
