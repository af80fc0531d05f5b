use crate::{Config, WeatherReport, WeatherRequest, provider::visualcrossing::VisualCrossingProvider};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod visualcrossing;

/// Errors from the weather data provider.
///
/// The dashboard surfaces all of these uniformly as "city not found"; the
/// variants exist so logs can tell a bad location apart from a transport or
/// decode problem.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("city not found")]
    CityNotFound,

    #[error("failed to reach weather provider: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid provider URL: {0}")]
    BadUrl(String),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_report(&self, request: &WeatherRequest) -> Result<WeatherReport, ProviderError>;
}

/// Construct the provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.require_api_key()?;
    Ok(Box::new(VisualCrossingProvider::new(api_key.to_owned())))
}
