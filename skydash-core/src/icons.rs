use futures::future::join_all;
use reqwest::Client;
use std::{collections::HashMap, sync::Mutex};
use tracing::warn;

/// Hosted icon set; the icon code from the report is the file stem.
pub const DEFAULT_ICON_BASE_URL: &str =
    "https://raw.githubusercontent.com/visualcrossing/WeatherIcons/main/PNG/2nd%20Set%20-%20Color";

/// Resolves icon codes to image URLs, verifying that the image actually
/// exists on the host.
///
/// Failures (transport errors, non-success statuses) resolve to `None` and
/// are logged, never propagated: a broken icon only costs that one image.
/// Outcomes are cached for the life of the resolver, including negative
/// ones, so duplicate codes within a render hit the host once.
#[derive(Debug)]
pub struct IconResolver {
    http: Client,
    base_url: String,
    cache: Mutex<HashMap<String, Option<String>>>,
}

impl Default for IconResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IconResolver {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_ICON_BASE_URL)
    }

    /// Point the resolver at a different icon host (mock servers in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { http: Client::new(), base_url: base_url.into(), cache: Mutex::new(HashMap::new()) }
    }

    fn icon_url(&self, icon_code: &str) -> String {
        format!("{}/{}.png", self.base_url, icon_code)
    }

    /// Resolve one icon code to its image URL, or `None` if the image is
    /// missing or unreachable.
    pub async fn resolve(&self, icon_code: &str) -> Option<String> {
        if let Some(cached) = self.cache.lock().expect("icon cache poisoned").get(icon_code) {
            return cached.clone();
        }

        let url = self.icon_url(icon_code);

        let outcome = match self.http.get(&url).send().await {
            Ok(res) if res.status().is_success() => Some(url),
            Ok(res) => {
                warn!(icon = icon_code, status = %res.status(), "icon not found on host");
                None
            }
            Err(err) => {
                warn!(icon = icon_code, error = %err, "icon fetch failed");
                None
            }
        };

        self.cache
            .lock()
            .expect("icon cache poisoned")
            .insert(icon_code.to_string(), outcome.clone());

        outcome
    }

    /// Resolve a batch of icon codes concurrently.
    ///
    /// Checks are issued fan-out and joined fan-in; the returned vector is
    /// in input order regardless of completion order.
    pub async fn resolve_all<I, S>(&self, icon_codes: I) -> Vec<Option<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        join_all(
            icon_codes
                .into_iter()
                .map(|code| async move { self.resolve(code.as_ref()).await }),
        )
        .await
    }
}
