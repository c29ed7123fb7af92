//! Work-order normalizer: extraction, geocoding and inference in one pass.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::{DocumentError, Result};
use crate::geocode::{AddressLookup, Geocoder, NominatimLookup};
use crate::models::config::{EtsConfig, PartnerConfig};
use crate::models::work_order::WorkOrder;
use crate::pdf::PdfTextExtractor;

use super::rules::{
    classify_work_type, determine_urgency, fields::parse_amount, is_partner_document,
    patterns::{ETS_EMAIL, ETS_PHONE},
    requires_jsa, requires_swms, FieldExtractor, FieldKind, PatternExtractor, TaskExtractor,
};

/// Result of normalizing one document.
#[derive(Debug, Clone)]
pub struct NormalizationResult {
    /// Normalized work order.
    pub work_order: WorkOrder,
    /// Text the work order was extracted from.
    pub raw_text: String,
    /// Fields that fell back to their defaults.
    pub missing_fields: Vec<FieldKind>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Turns raw work-order text into a [`WorkOrder`].
pub struct WorkOrderNormalizer<L = NominatimLookup> {
    extractor: PatternExtractor,
    tasks: TaskExtractor,
    geocoder: Geocoder<L>,
    partner: PartnerConfig,
    require_partner_marker: bool,
}

impl WorkOrderNormalizer<NominatimLookup> {
    /// Create a normalizer from configuration, geocoding via Nominatim.
    pub fn from_config(config: &EtsConfig) -> Self {
        Self::with_geocoder(config, Geocoder::from_config(&config.geocoder))
    }
}

impl<L: AddressLookup> WorkOrderNormalizer<L> {
    /// Create a normalizer with an explicit geocoder.
    ///
    /// The geocoder takes its minimum address length from the extraction config.
    pub fn with_geocoder(config: &EtsConfig, geocoder: Geocoder<L>) -> Self {
        Self {
            extractor: PatternExtractor::new(&config.extraction, &config.partner),
            tasks: TaskExtractor::new(),
            geocoder: geocoder.with_min_address_len(config.extraction.min_address_len),
            partner: config.partner.clone(),
            require_partner_marker: config.extraction.require_partner_marker,
        }
    }

    /// Normalize work-order text.
    pub async fn normalize(&self, text: &str) -> Result<WorkOrder> {
        self.normalize_with_report(text).await.map(|r| r.work_order)
    }

    /// Extract text from PDF bytes and normalize it.
    pub async fn normalize_pdf(&self, data: &[u8]) -> Result<WorkOrder> {
        let text = PdfTextExtractor::text_from_bytes(data)?;
        self.normalize(&text).await
    }

    /// Normalize work-order text, reporting which fields were defaulted.
    pub async fn normalize_with_report(&self, text: &str) -> Result<NormalizationResult> {
        let start = Instant::now();

        self.check_document(text)?;
        info!("Normalizing work order from {} characters of text", text.len());

        let mut missing_fields = Vec::new();
        let mut field = |kind: FieldKind| -> Option<String> {
            let value = self.extractor.extract(kind, text);
            if value.is_none() {
                missing_fields.push(kind);
            }
            value
        };

        // The address goes first, geocoding depends on it
        let site_address = field(FieldKind::SiteAddress)
            .unwrap_or_else(|| self.extractor.default_value(FieldKind::SiteAddress));

        let order_number = field(FieldKind::OrderNumber)
            .unwrap_or_else(|| self.extractor.default_value(FieldKind::OrderNumber));
        let date = field(FieldKind::Date)
            .unwrap_or_else(|| self.extractor.default_value(FieldKind::Date));
        let contractor = field(FieldKind::Contractor)
            .unwrap_or_else(|| self.extractor.default_value(FieldKind::Contractor));
        let site_contact_name = field(FieldKind::SiteContactName)
            .unwrap_or_else(|| self.extractor.default_value(FieldKind::SiteContactName));
        let site_contact_phone = field(FieldKind::SiteContactPhone)
            .unwrap_or_else(|| self.extractor.default_value(FieldKind::SiteContactPhone));
        let job_description = field(FieldKind::JobDescription)
            .unwrap_or_else(|| self.extractor.default_value(FieldKind::JobDescription));
        let estimated_value = field(FieldKind::EstimatedValue)
            .and_then(|v| parse_amount(&v))
            .unwrap_or(0.0);

        for kind in &missing_fields {
            warn!("Field {} not found, using default", kind);
        }

        let tasks = self.tasks.extract_all(text);

        let site_location = self.geocoder.geocode(&site_address).await;

        let work_order = WorkOrder {
            order_number,
            date,
            contractor,
            site_contact_name,
            site_address,
            site_contact_phone,
            site_location,
            customer_name: self.partner.legal_name.clone(),
            work_type: classify_work_type(text),
            job_description,
            estimated_value,
            cost_limit: self.extractor.extract_cost_limit(text),
            tasks,
            requires_jsa: requires_jsa(text),
            requires_swms: requires_swms(text),
            urgency: determine_urgency(text, &self.partner),
            ets_phone: ETS_PHONE
                .find(text)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| self.partner.phone.clone()),
            ets_email: ETS_EMAIL
                .find(text)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| self.partner.email.clone()),
        };

        debug!(
            "Normalized work order {} ({} tasks, urgency {}, {} defaults)",
            work_order.order_number,
            work_order.tasks.len(),
            work_order.urgency,
            missing_fields.len()
        );

        Ok(NormalizationResult {
            work_order,
            raw_text: text.to_string(),
            missing_fields,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn check_document(&self, text: &str) -> std::result::Result<(), DocumentError> {
        if text.trim().is_empty() {
            return Err(DocumentError::Empty);
        }
        if self.require_partner_marker && !is_partner_document(text, &self.partner) {
            return Err(DocumentError::NotPartnerDocument);
        }
        Ok(())
    }
}
