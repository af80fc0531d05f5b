//! The request flow: fetch, transform, render, decorate.
//!
//! One [`Dashboard`] owns the page state. Submissions are tagged with a
//! monotonically increasing generation; only the response matching the
//! latest generation is applied, so a slow earlier request can never
//! overwrite a newer one.

use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::{
    classify::classify,
    effects::{EffectNode, EffectStage},
    forecast::select_window,
    icons::IconResolver,
    model::{UnitGroup, WeatherRequest},
    provider::{ProviderError, WeatherProvider},
    render::{self, FORECAST_DAYS, ResolvedIcons},
};

/// Every provider failure is surfaced to the page with this message.
pub const CITY_NOT_FOUND_MESSAGE: &str = "City not found";

/// Submission token. Compared against the latest issued token before a
/// response is applied; stale responses are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// The page regions the dashboard owns: the result fragment, the loading
/// indicator, the decorative overlay and the alerts toggle. An explicit
/// value passed around, never a global.
#[derive(Debug, Default)]
pub struct ViewState {
    pub result: String,
    pub loader_visible: bool,
    pub overlay: Vec<EffectNode>,
    pub alerts_expanded: bool,
}

impl ViewState {
    /// Wrap the current state into a standalone HTML document.
    pub fn render_page(&self) -> String {
        let loader_style = if self.loader_visible { "display:block" } else { "display:none" };

        format!(
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             <title>skydash</title>\n\
             <link rel=\"stylesheet\" href=\"style.css\">\n\
             </head>\n\
             <body>\n\
             {overlay}\
             <div id=\"loader\" style=\"{loader_style}\"></div>\n\
             <div id=\"weather-result\">\n{result}</div>\n\
             </body>\n\
             </html>\n",
            overlay = render::render_overlay(&self.overlay),
            result = self.result,
        )
    }
}

pub struct Dashboard {
    provider: Box<dyn WeatherProvider>,
    icons: IconResolver,
    effects: EffectStage<StdRng>,
    units: UnitGroup,
    state: ViewState,
    latest: u64,
}

impl Dashboard {
    pub fn new(provider: Box<dyn WeatherProvider>, units: UnitGroup) -> Self {
        Self::with_parts(provider, IconResolver::new(), EffectStage::new(), units)
    }

    /// Assemble a dashboard from explicit parts (tests swap in mock hosts
    /// and seeded effect stages).
    pub fn with_parts(
        provider: Box<dyn WeatherProvider>,
        icons: IconResolver,
        effects: EffectStage<StdRng>,
        units: UnitGroup,
    ) -> Self {
        Self { provider, icons, effects, units, state: ViewState::default(), latest: 0 }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Alerts expanded/collapsed is UI state, set before submitting.
    pub fn set_alerts_expanded(&mut self, expanded: bool) {
        self.state.alerts_expanded = expanded;
    }

    /// Run one submission end to end: show the loader, fetch and transform,
    /// then apply the outcome. The loader is hidden on every exit path.
    pub async fn submit(&mut self, city: &str, current_hour: u32) {
        let generation = self.begin();
        let outcome = self.run(city, current_hour).await;
        self.finish(generation, outcome);
    }

    fn begin(&mut self) -> Generation {
        self.latest += 1;
        self.state.loader_visible = true;
        self.state.result.clear();
        Generation(self.latest)
    }

    async fn run(
        &mut self,
        city: &str,
        current_hour: u32,
    ) -> Result<(String, Vec<EffectNode>), ProviderError> {
        let request = WeatherRequest { city: city.to_string(), units: self.units };
        let report = self.provider.fetch_report(&request).await?;

        debug!(
            location = report.location_label(),
            days = report.days.len(),
            alerts = report.alerts.len(),
            "weather report received"
        );

        let window = match report.days.first() {
            Some(today) => select_window(&today.hours, current_hour),
            None => &[],
        };

        // Icon failures degrade to missing images; they never abort the render.
        let current = self.icons.resolve(&report.current_conditions.icon).await;
        let hourly = self.icons.resolve_all(window.iter().map(|h| h.icon.as_str())).await;
        let daily = self
            .icons
            .resolve_all(report.days.iter().take(FORECAST_DAYS).map(|d| d.icon.as_str()))
            .await;
        let icons = ResolvedIcons { current, hourly, daily };

        let classification = classify(
            &report.current_conditions.conditions,
            &report.current_conditions.icon,
            report.current_conditions.wind_speed,
        );

        let fragment =
            render::render_report(&report, &icons, window, self.units, self.state.alerts_expanded);
        let overlay = self.effects.build(classification);

        Ok((fragment, overlay))
    }

    fn finish(
        &mut self,
        generation: Generation,
        outcome: Result<(String, Vec<EffectNode>), ProviderError>,
    ) {
        // Hidden regardless of outcome, stale responses included.
        self.state.loader_visible = false;

        if generation != Generation(self.latest) {
            debug!(?generation, latest = self.latest, "discarding stale response");
            return;
        }

        match outcome {
            Ok((fragment, overlay)) => {
                self.state.result = fragment;
                self.state.overlay = overlay;
            }
            Err(err) => {
                warn!(error = %err, "weather request failed");
                self.state.result = render::render_error(CITY_NOT_FOUND_MESSAGE);
                self.state.overlay.clear();
            }
        }
    }
}
