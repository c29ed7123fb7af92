//! Configuration structures for the intake pipeline.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::job_record::EntryChannel;

/// Main configuration for the ets pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EtsConfig {
    /// Fixed details of the issuing partner.
    pub partner: PartnerConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Address geocoding configuration.
    pub geocoder: GeocoderConfig,

    /// Job record mapping configuration.
    pub job: JobConfig,
}

/// Issuing partner constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PartnerConfig {
    /// Legal name, always used as the billed customer.
    pub legal_name: String,

    /// Trading name as it appears in document letterheads.
    pub trading_name: String,

    /// Partner contact phone.
    pub phone: String,

    /// Partner contact email.
    pub email: String,

    /// Prefix of generated order numbers.
    pub order_prefix: String,
}

impl Default for PartnerConfig {
    fn default() -> Self {
        Self {
            legal_name: "EMERGENCY TRADE SERVICES Pty Ltd ATF The Emergency Trade Services Trust"
                .to_string(),
            trading_name: "Emergency Trade Services".to_string(),
            phone: "1300 755 455".to_string(),
            email: "admin@etsaus.com.au".to_string(),
            order_prefix: "ETS".to_string(),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Dollar amounts at or above this are treated as mismatches.
    pub max_estimated_value: f64,

    /// Shortest address considered valid.
    pub min_address_len: usize,

    /// Reject text that does not mention the partner.
    pub require_partner_marker: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_estimated_value: 10_000.0,
            min_address_len: 6,
            require_partner_marker: false,
        }
    }
}

/// Address lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Perform lookups at all.
    pub enabled: bool,

    /// Search endpoint (Nominatim-compatible).
    pub endpoint: String,

    /// ISO country code the search is restricted to.
    pub country_code: String,

    /// Country name appended to the query.
    pub country_name: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent sent with lookups.
    pub user_agent: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://nominatim.openstreetmap.org/search".to_string(),
            country_code: "au".to_string(),
            country_name: "Australia".to_string(),
            timeout_secs: 10,
            user_agent: concat!("ets-intake/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Job record mapping configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// `created_by` value on every record.
    pub created_by: String,

    /// `source` tag for documents received by email.
    pub email_source: String,

    /// `source` tag for uploaded documents.
    pub upload_source: String,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            created_by: "PDF Parser".to_string(),
            email_source: "ETS Email Integration".to_string(),
            upload_source: "ETS PDF Parser".to_string(),
        }
    }
}

impl JobConfig {
    /// Provenance tag for a channel.
    pub fn source_for(&self, channel: EntryChannel) -> &str {
        match channel {
            EntryChannel::Email => &self.email_source,
            EntryChannel::Upload => &self.upload_source,
        }
    }
}

impl EtsConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
