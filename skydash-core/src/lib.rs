//! Core library for the `skydash` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The Visual Crossing provider client
//! - Shared domain models (requests, reports)
//! - The dashboard pipeline: icon resolution, forecast window selection,
//!   condition classification, view rendering and the decorative overlay
//!
//! It is used by `skydash-cli`, but can also be reused by other binaries or services.

pub mod classify;
pub mod config;
pub mod dashboard;
pub mod effects;
pub mod forecast;
pub mod icons;
pub mod model;
pub mod provider;
pub mod render;

pub use classify::{Classification, EffectCategory, classify};
pub use config::Config;
pub use dashboard::{Dashboard, ViewState};
pub use effects::{EffectNode, EffectStage};
pub use forecast::select_window;
pub use icons::IconResolver;
pub use model::{UnitGroup, WeatherReport, WeatherRequest};
pub use provider::{ProviderError, WeatherProvider, provider_from_config};
