//! State behind the weather screen and the three events that change it.
//!
//! The controller reacts to mount, debounced search text and candidate
//! selection. Renderers read [`ScreenState`] snapshots and never mutate it.
//!
//! Responses are applied in the order they resolve. Two overlapping searches
//! (or two overlapping forecast fetches) can therefore land out of order and
//! the older one wins; there is no request sequencing.
//!
//! A pending debounced search only holds a weak handle to the controller.
//! Dropping the last [`ScreenController`] clone cancels an unfired search;
//! a search that already fired still runs to completion.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use crate::{
    api::WeatherService,
    debounce::{Debouncer, SEARCH_DEBOUNCE},
    model::{LocationCandidate, SearchParams, WeatherPayload},
    store::{CITY_KEY, PreferenceStore},
};

pub const DEFAULT_CITY: &str = "Paris";
pub const FORECAST_DAYS: &str = "7";
/// Queries shorter than this many characters are not sent.
pub const MIN_SEARCH_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenState {
    pub search_visible: bool,
    /// In upstream response order.
    pub candidates: Vec<LocationCandidate>,
    pub weather: Option<WeatherPayload>,
    pub loading: bool,
}

impl Default for ScreenState {
    fn default() -> Self {
        Self { search_visible: false, candidates: Vec::new(), weather: None, loading: true }
    }
}

/// Cheap to clone; clones share the same state.
#[derive(Debug, Clone)]
pub struct ScreenController {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    service: Arc<dyn WeatherService>,
    prefs: Arc<dyn PreferenceStore>,
    state: Mutex<ScreenState>,
    search_debounce: Debouncer,
}

impl ScreenController {
    pub fn new(service: Arc<dyn WeatherService>, prefs: Arc<dyn PreferenceStore>) -> Self {
        Self::with_debounce(service, prefs, SEARCH_DEBOUNCE)
    }

    pub fn with_debounce(
        service: Arc<dyn WeatherService>,
        prefs: Arc<dyn PreferenceStore>,
        delay: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                service,
                prefs,
                state: Mutex::new(ScreenState::default()),
                search_debounce: Debouncer::new(delay),
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ScreenState {
        self.lock().clone()
    }

    /// Load the forecast for the last selected city, or [`DEFAULT_CITY`].
    pub async fn on_mount(&self) {
        let city = self.inner.prefs.get(CITY_KEY).unwrap_or_else(|| DEFAULT_CITY.to_string());
        tracing::debug!(%city, "mounting screen");

        let params = SearchParams::forecast(city, FORECAST_DAYS);
        let weather = self.inner.service.fetch_forecast(&params).await;

        let mut state = self.lock();
        state.weather = weather;
        state.loading = false;
    }

    /// Debounced entry point for every keystroke in the search box.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn on_search_text_changed(&self, text: impl Into<String>) {
        let text = text.into();
        let inner: Weak<Inner> = Arc::downgrade(&self.inner);
        self.inner.search_debounce.schedule(async move {
            if let Some(inner) = inner.upgrade() {
                ScreenController { inner }.search(&text).await;
            }
        });
    }

    /// Query matching locations right away and replace the candidate list.
    ///
    /// Short queries are ignored and leave the current candidates in place.
    /// A failed lookup empties the list.
    pub async fn search(&self, text: &str) {
        if text.chars().count() < MIN_SEARCH_LEN {
            tracing::trace!(len = text.chars().count(), "query too short, not searching");
            return;
        }

        let found = self.inner.service.fetch_locations(&SearchParams::search(text)).await;
        let candidates = found.unwrap_or_default();
        tracing::debug!(query = text, matches = candidates.len(), "search resolved");

        self.lock().candidates = candidates;
    }

    /// Switch to `candidate`: hide search, load its forecast and remember it.
    pub async fn on_select_candidate(&self, candidate: &LocationCandidate) {
        {
            let mut state = self.lock();
            state.candidates.clear();
            state.search_visible = false;
            state.loading = true;
        }
        tracing::debug!(city = %candidate.name, "candidate selected");

        let params = SearchParams::forecast(candidate.name.clone(), FORECAST_DAYS);
        let weather = self.inner.service.fetch_forecast(&params).await;

        {
            let mut state = self.lock();
            state.weather = weather;
            state.loading = false;
        }

        if let Err(err) = self.inner.prefs.set(CITY_KEY, &candidate.name) {
            tracing::warn!(error = %err, city = %candidate.name, "failed to remember city");
        }
    }

    /// Show or hide the search box. Hiding drops the candidate list.
    pub fn toggle_search(&self) -> bool {
        let mut state = self.lock();
        state.search_visible = !state.search_visible;
        if !state.search_visible {
            state.candidates.clear();
        }
        state.search_visible
    }

    /// Wait until a pending debounced search has fired and resolved.
    pub async fn settle(&self) {
        self.inner.search_debounce.flush().await;
    }

    fn lock(&self) -> MutexGuard<'_, ScreenState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
