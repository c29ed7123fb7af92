//! OpenStreetMap Nominatim search client.

use std::time::Duration;

use tracing::debug;

use super::{AddressLookup, GeoCandidate, Result};
use crate::error::GeocodeError;
use crate::models::config::GeocoderConfig;

/// Nominatim-compatible lookup over HTTPS.
///
/// Searches are restricted to one country and ask for a single result.
pub struct NominatimLookup {
    client: reqwest::Client,
    endpoint: String,
    country_code: String,
    country_name: String,
}

impl NominatimLookup {
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            country_code: config.country_code.clone(),
            country_name: config.country_name.clone(),
        })
    }

    /// Free-text query sent to the service.
    fn query(&self, address: &str) -> String {
        if self.country_name.is_empty() {
            address.to_string()
        } else {
            format!("{}, {}", address, self.country_name)
        }
    }
}

impl AddressLookup for NominatimLookup {
    async fn lookup(&self, address: &str) -> Result<Vec<GeoCandidate>> {
        let query = self.query(address);
        debug!(endpoint = %self.endpoint, "geocoding query {:?}", query);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("format", "json"),
                ("q", query.as_str()),
                ("limit", "1"),
                ("countrycodes", self.country_code.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let candidates: Vec<GeoCandidate> = response.json().await?;
        debug!("geocoding returned {} rows", candidates.len());
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_appends_country() {
        let lookup = NominatimLookup::new(&GeocoderConfig::default()).unwrap();
        assert_eq!(
            lookup.query("105 Hunter St, Burringbar NSW 2483"),
            "105 Hunter St, Burringbar NSW 2483, Australia"
        );
    }

    #[test]
    fn test_response_rows_deserialize() {
        let body = r#"[{"place_id":1,"lat":"-28.4336","lon":"153.4706","display_name":"Hunter St"}]"#;
        let rows: Vec<GeoCandidate> = serde_json::from_str(body).unwrap();
        assert_eq!(rows, vec![GeoCandidate::new("-28.4336", "153.4706")]);
    }
}
