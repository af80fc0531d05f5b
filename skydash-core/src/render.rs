//! Turns a fetched report into the dashboard markup fragment.
//!
//! Pure string-building: no I/O here. The fragment mirrors the page the
//! dashboard serves: header, current conditions, hourly strip, five-day
//! forecast and the alerts block.

use chrono::NaiveDate;

use crate::{
    effects::EffectNode,
    model::{HourlyRecord, UnitGroup, WeatherReport},
};

/// A period this far into the description still counts as "first sentence".
pub const ALERT_PERIOD_SEARCH_LIMIT: usize = 120;
/// Hard cut applied when no period is found; an ellipsis is appended.
pub const ALERT_TRUNCATE_LEN: usize = 117;

/// How many forecast days the list shows, today included.
pub const FORECAST_DAYS: usize = 5;

/// Icon URLs resolved for one report, `None` where the image is missing.
#[derive(Debug, Clone, Default)]
pub struct ResolvedIcons {
    pub current: Option<String>,
    pub hourly: Vec<Option<String>>,
    pub daily: Vec<Option<String>>,
}

/// Capitalize a location label the way the dashboard always has: each
/// comma-separated part trimmed, each word uppercased on its first letter
/// and lowercased after. "NEW YORK, ny" becomes "New York, Ny"; the "Ny"
/// artifact is part of the expected output.
pub fn capitalize_location(raw: &str) -> String {
    raw.split(',')
        .map(|part| {
            part.split_whitespace().map(capitalize_word).collect::<Vec<_>>().join(" ")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Shorten an alert description to its first sentence.
///
/// Takes everything up to and including the first period when one occurs
/// within the first [`ALERT_PERIOD_SEARCH_LIMIT`] characters; otherwise
/// long descriptions are cut to [`ALERT_TRUNCATE_LEN`] characters plus an
/// ellipsis. The exact lengths are display parity requirements.
pub fn shorten_alert(description: &str) -> String {
    let chars: Vec<char> = description.chars().collect();

    let search_end = chars.len().min(ALERT_PERIOD_SEARCH_LIMIT);
    if let Some(idx) = chars[..search_end].iter().position(|&c| c == '.') {
        return chars[..=idx].iter().collect();
    }

    if chars.len() > ALERT_PERIOD_SEARCH_LIMIT {
        let mut shortened: String = chars[..ALERT_TRUNCATE_LEN].iter().collect();
        shortened.push_str("...");
        return shortened;
    }

    description.to_string()
}

/// Forecast date label, e.g. "Mon, Aug 24".
pub fn format_day(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// Hourly strip label, "HH:MM".
pub fn format_hour(hour: &HourlyRecord) -> String {
    hour.datetime.format("%H:%M").to_string()
}

/// Minimal HTML escaping for provider-supplied text.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// The unit suffix stays even when the value is missing ("N/A km", "N/A%"),
// matching how the page has always rendered these fields.
fn optional_metric(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{v}{suffix}"),
        None => format!("N/A{suffix}"),
    }
}

fn icon_img(url: Option<&String>, class: &str) -> String {
    match url {
        Some(url) => format!(r#"<img src="{}" alt="Icon" class="{class}">"#, escape(url)),
        // Icon resolution failed; the slot stays empty.
        None => String::new(),
    }
}

/// Render the error fragment that replaces the result area when the
/// provider request fails.
pub fn render_error(message: &str) -> String {
    format!("<p>Error: {}</p>", escape(message))
}

/// Assemble the full result fragment for one report.
pub fn render_report(
    report: &WeatherReport,
    icons: &ResolvedIcons,
    window: &[HourlyRecord],
    units: UnitGroup,
    alerts_expanded: bool,
) -> String {
    let cc = &report.current_conditions;
    let mut html = String::new();

    html.push_str(&format!(
        "<h2>Weather in {}</h2>\n",
        escape(&capitalize_location(report.location_label()))
    ));

    // The headline figure is feels-like; the raw temperature lives in the
    // hourly and daily entries.
    html.push_str(&format!(
        "<p><strong>Temperature:</strong> {} {}</p>\n",
        cc.feels_like,
        units.temperature()
    ));
    html.push_str(&format!(
        "<p><strong>Condition:</strong> {}</p>\n",
        escape(&cc.conditions)
    ));
    html.push_str(&icon_img(icons.current.as_ref(), "current-icon"));
    html.push('\n');

    html.push_str("<div class=\"current-details\">\n");
    html.push_str(&format!("<p><strong>Humidity:</strong> {}%</p>\n", cc.humidity));
    html.push_str(&format!(
        "<p><strong>Wind:</strong> {} {}</p>\n",
        cc.wind_speed,
        units.speed()
    ));
    html.push_str(&format!(
        "<p><strong>Pressure:</strong> {} {}</p>\n",
        cc.pressure,
        units.pressure()
    ));
    html.push_str(&format!(
        "<p><strong>UV Index:</strong> {}</p>\n",
        optional_metric(cc.uv_index, "")
    ));
    html.push_str(&format!(
        "<p><strong>Visibility:</strong> {}</p>\n",
        optional_metric(cc.visibility, &format!(" {}", units.distance()))
    ));
    html.push_str(&format!(
        "<p><strong>Cloud Cover:</strong> {}</p>\n",
        optional_metric(cc.cloud_cover, "%")
    ));
    html.push_str("</div>\n");

    html.push_str(&render_alerts(report, alerts_expanded));

    html.push_str("<div class=\"hourly-row\">\n");
    for (i, hour) in window.iter().enumerate() {
        html.push_str(&format!(
            "<div class=\"hourly-item\"><div>{}</div>{}<div>{} {}</div></div>\n",
            format_hour(hour),
            icon_img(icons.hourly.get(i).and_then(Option::as_ref), "forecast-icon"),
            hour.temp,
            units.temperature()
        ));
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"forecast\">\n<h3>Forecast</h3>\n<ul>\n");
    for (i, day) in report.days.iter().take(FORECAST_DAYS).enumerate() {
        html.push_str(&format!(
            "<li class=\"forecast-item\">{}<strong>{}</strong>: {} {}, {}</li>\n",
            icon_img(icons.daily.get(i).and_then(Option::as_ref), "forecast-icon"),
            format_day(day.datetime),
            day.temp,
            units.temperature(),
            escape(&day.conditions)
        ));
    }
    html.push_str("</ul>\n</div>\n");

    html
}

fn render_alerts(report: &WeatherReport, expanded: bool) -> String {
    if report.alerts.is_empty() {
        return "<p class=\"alert\">No alerts</p>\n".to_string();
    }

    let mut html = String::from("<div class=\"alerts\">\n");
    html.push_str(&format!(
        "<button class=\"alerts-toggle\">Alerts ({})</button>\n",
        report.alerts.len()
    ));

    // Expanded/collapsed is page state, not report data.
    if expanded {
        html.push_str("<ul class=\"alerts-list\">\n");
        for alert in &report.alerts {
            let link = match &alert.link {
                Some(link) => {
                    format!(r#" <a href="{}" target="_blank">Details</a>"#, escape(link))
                }
                None => String::new(),
            };
            html.push_str(&format!(
                "<li class=\"alert\"><strong>{}</strong>: {}{}</li>\n",
                escape(&alert.event),
                escape(&shorten_alert(&alert.description)),
                link
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</div>\n");
    html
}

/// Render the decorative overlay nodes.
pub fn render_overlay(nodes: &[EffectNode]) -> String {
    let mut html = String::from("<div class=\"weather-overlay\">\n");
    for node in nodes {
        if node.style.is_empty() {
            html.push_str(&format!("<div class=\"{}\"></div>\n", node.class));
        } else {
            html.push_str(&format!(
                "<div class=\"{}\" style=\"{}\"></div>\n",
                node.class, node.style
            ));
        }
    }
    html.push_str("</div>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alert, CurrentConditions, DailyRecord};
    use chrono::NaiveTime;

    fn sample_report() -> WeatherReport {
        WeatherReport {
            address: "new york, ny".to_string(),
            resolved_address: None,
            current_conditions: CurrentConditions {
                temp: 21.0,
                feels_like: 19.5,
                conditions: "Partially cloudy".to_string(),
                icon: "partly-cloudy-day".to_string(),
                humidity: 60.0,
                wind_speed: 12.0,
                pressure: 1015.0,
                uv_index: None,
                visibility: Some(16.0),
                cloud_cover: Some(40.0),
            },
            days: vec![DailyRecord {
                datetime: NaiveDate::from_ymd_opt(2026, 8, 24).unwrap(),
                temp: 22.0,
                temp_max: 26.0,
                temp_min: 17.0,
                conditions: "Partially cloudy".to_string(),
                icon: "partly-cloudy-day".to_string(),
                hours: vec![HourlyRecord {
                    datetime: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
                    temp: 23.0,
                    icon: "partly-cloudy-day".to_string(),
                }],
            }],
            alerts: vec![],
        }
    }

    #[test]
    fn capitalizes_each_word_per_comma_part() {
        assert_eq!(capitalize_location("NEW YORK, ny"), "New York, Ny");
        assert_eq!(capitalize_location("london"), "London");
        assert_eq!(capitalize_location("  paris ,  FRANCE "), "Paris, France");
    }

    #[test]
    fn shorten_alert_keeps_first_sentence() {
        assert_eq!(shorten_alert("Flood warning. Stay indoors."), "Flood warning.");
    }

    #[test]
    fn shorten_alert_truncates_when_no_period() {
        let description: String = "x".repeat(130);
        let shortened = shorten_alert(&description);
        assert_eq!(shortened.chars().count(), 120);
        assert!(shortened.ends_with("..."));
    }

    #[test]
    fn shorten_alert_leaves_short_text_alone() {
        assert_eq!(shorten_alert("Gusty winds expected"), "Gusty winds expected");
    }

    #[test]
    fn shorten_alert_ignores_period_past_search_limit() {
        let mut description = "y".repeat(125);
        description.push('.');
        let shortened = shorten_alert(&description);
        assert_eq!(shortened.chars().count(), 120);
        assert!(shortened.ends_with("..."));
    }

    #[test]
    fn day_and_hour_labels() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        assert_eq!(format_day(date), "Mon, Aug 24");

        let hour = HourlyRecord {
            datetime: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            temp: 20.0,
            icon: "clear-day".to_string(),
        };
        assert_eq!(format_hour(&hour), "09:00");
    }

    #[test]
    fn report_fragment_contains_expected_blocks() {
        let report = sample_report();
        let icons = ResolvedIcons {
            current: Some("http://icons/partly-cloudy-day.png".to_string()),
            hourly: vec![None],
            daily: vec![Some("http://icons/partly-cloudy-day.png".to_string())],
        };

        let html = render_report(
            &report,
            &icons,
            &report.days[0].hours,
            UnitGroup::Metric,
            false,
        );

        assert!(html.contains("<h2>Weather in New York, Ny</h2>"));
        assert!(html.contains("<strong>Temperature:</strong> 19.5 °C"));
        assert!(html.contains("<strong>UV Index:</strong> N/A"));
        assert!(html.contains("<strong>Visibility:</strong> 16 km"));
        assert!(html.contains("No alerts"));
        assert!(html.contains("14:00"));
        assert!(html.contains("Mon, Aug 24"));
        // Hourly icon failed to resolve, so that slot has no image.
        assert!(html.contains("<div class=\"hourly-item\"><div>14:00</div><div>"));
    }

    #[test]
    fn missing_details_keep_their_unit_suffix() {
        let mut report = sample_report();
        report.current_conditions.visibility = None;
        report.current_conditions.cloud_cover = None;

        let html =
            render_report(&report, &ResolvedIcons::default(), &[], UnitGroup::Metric, false);

        assert!(html.contains("<strong>UV Index:</strong> N/A"));
        assert!(html.contains("<strong>Visibility:</strong> N/A km"));
        assert!(html.contains("<strong>Cloud Cover:</strong> N/A%"));
    }

    #[test]
    fn us_units_switch_suffixes() {
        let report = sample_report();
        let html = render_report(
            &report,
            &ResolvedIcons::default(),
            &[],
            UnitGroup::Us,
            false,
        );
        assert!(html.contains("19.5 °F"));
        assert!(html.contains("12 mph"));
        assert!(html.contains("1015 mb"));
        assert!(html.contains("16 mi"));
    }

    #[test]
    fn alerts_toggle_controls_list_visibility() {
        let mut report = sample_report();
        report.alerts.push(Alert {
            event: "Flood Warning".to_string(),
            description: "Flood warning. Stay indoors.".to_string(),
            link: Some("https://example.org/alert".to_string()),
        });

        let collapsed =
            render_report(&report, &ResolvedIcons::default(), &[], UnitGroup::Metric, false);
        assert!(collapsed.contains("Alerts (1)"));
        assert!(!collapsed.contains("alerts-list"));

        let expanded =
            render_report(&report, &ResolvedIcons::default(), &[], UnitGroup::Metric, true);
        assert!(expanded.contains("alerts-list"));
        assert!(expanded.contains("<strong>Flood Warning</strong>: Flood warning."));
        assert!(expanded.contains("https://example.org/alert"));
    }

    #[test]
    fn provider_text_is_escaped() {
        let mut report = sample_report();
        report.current_conditions.conditions = "<script>alert(1)</script>".to_string();
        let html =
            render_report(&report, &ResolvedIcons::default(), &[], UnitGroup::Metric, false);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn error_fragment() {
        assert_eq!(render_error("City not found"), "<p>Error: City not found</p>");
    }

    #[test]
    fn overlay_markup_carries_class_and_style() {
        let nodes = vec![
            EffectNode { class: "rain-drop", style: "left:10.00%".to_string() },
            EffectNode { class: "sun-disc", style: String::new() },
        ];
        let html = render_overlay(&nodes);
        assert!(html.contains(r#"<div class="rain-drop" style="left:10.00%"></div>"#));
        assert!(html.contains(r#"<div class="sun-disc"></div>"#));
    }
}
