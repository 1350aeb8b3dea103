//! Core library for the `forecast` weather screen.
//!
//! This crate defines:
//! - Configuration & the injected API credentials
//! - The WeatherAPI.com façade and the HTTP client adapter under it
//! - Shared domain models (search parameters, locations, forecast payloads)
//! - A trailing-edge debouncer and the screen controller built on it
//! - Preference storage for the last selected city
//!
//! It is used by `forecast-cli`, but can also drive other front-ends.

pub mod api;
pub mod config;
pub mod debounce;
mod error;
pub mod http;
pub mod model;
pub mod screen;
pub mod store;

pub use api::{WeatherApi, WeatherService};
pub use config::{ApiConfig, Config};
pub use debounce::Debouncer;
pub use http::HttpClient;
pub use model::{LocationCandidate, SearchParams, WeatherPayload};
pub use screen::{ScreenController, ScreenState};
pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
