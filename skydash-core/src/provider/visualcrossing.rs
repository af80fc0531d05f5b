use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::model::{WeatherReport, WeatherRequest};

use super::{ProviderError, WeatherProvider};

/// Visual Crossing timeline endpoint. One GET returns current conditions,
/// the daily forecast (with today's hourly detail) and active alerts.
pub const DEFAULT_BASE_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline";

#[derive(Debug, Clone)]
pub struct VisualCrossingProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl VisualCrossingProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the provider at a different endpoint (mock servers in tests).
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self { api_key, base_url: base_url.into(), http: Client::new() }
    }

    /// Build the timeline URL with the city as a percent-encoded path
    /// segment, so free-form input cannot smuggle extra path or query parts.
    fn timeline_url(&self, city: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ProviderError::BadUrl(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|()| ProviderError::BadUrl("base URL cannot be a base".to_string()))?
            .push(city);

        Ok(url)
    }
}

#[async_trait]
impl WeatherProvider for VisualCrossingProvider {
    async fn fetch_report(&self, request: &WeatherRequest) -> Result<WeatherReport, ProviderError> {
        let url = self.timeline_url(&request.city)?;

        debug!(city = %request.city, units = %request.units, "fetching weather timeline");

        let res = self
            .http
            .get(url)
            .query(&[
                ("unitGroup", request.units.as_str()),
                ("key", self.api_key.as_str()),
                ("contentType", "json"),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            warn!(%status, city = %request.city, "weather request rejected");
            return Err(ProviderError::CityNotFound);
        }

        let body = res.text().await?;
        let report: WeatherReport = serde_json::from_str(&body)?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_url_appends_city_segment() {
        let provider = VisualCrossingProvider::new("KEY".into());
        let url = provider.timeline_url("london").unwrap();
        assert!(url.as_str().ends_with("/timeline/london"));
    }

    #[test]
    fn timeline_url_encodes_free_form_input() {
        let provider = VisualCrossingProvider::new("KEY".into());

        let url = provider.timeline_url("new york, ny").unwrap();
        assert!(url.as_str().ends_with("/timeline/new%20york,%20ny"));

        // A slash must not introduce an extra path segment.
        let url = provider.timeline_url("a/b?x=1").unwrap();
        assert!(url.path().ends_with("/timeline/a%2Fb%3Fx=1"));
        assert!(url.query().is_none());
    }
}
