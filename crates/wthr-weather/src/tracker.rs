//! Ordering of overlapping fetches.
//!
//! Requests are never cancelled. Each one takes a [`FetchTicket`] when it
//! starts; when it completes, its result is applied only if no newer request
//! has started since. The most recently *started* request therefore wins,
//! regardless of completion order.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::WeatherError;
use crate::types::{CurrentConditions, Forecast};

/// Generation number handed out when a fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

#[derive(Debug, Default)]
pub struct FetchTracker {
    latest: AtomicU64,
}

impl FetchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch, superseding every earlier ticket.
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` belongs to the most recently started fetch.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Weather state shown by the UI.
///
/// `error` holds a user-facing message; when it is set, `current` and
/// `forecast` are cleared so the UI shows its empty state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherSnapshot {
    pub current: Option<CurrentConditions>,
    pub forecast: Option<Forecast>,
    pub error: Option<String>,
}

impl WeatherSnapshot {
    /// Returns false if the result was stale and discarded.
    pub fn apply_current(
        &mut self,
        tracker: &FetchTracker,
        ticket: FetchTicket,
        current: CurrentConditions,
    ) -> bool {
        if !Self::accept(tracker, ticket) {
            return false;
        }
        self.current = Some(current);
        self.error = None;
        true
    }

    pub fn apply_forecast(
        &mut self,
        tracker: &FetchTracker,
        ticket: FetchTicket,
        forecast: Forecast,
    ) -> bool {
        if !Self::accept(tracker, ticket) {
            return false;
        }
        self.forecast = Some(forecast);
        self.error = None;
        true
    }

    pub fn apply_error(
        &mut self,
        tracker: &FetchTracker,
        ticket: FetchTicket,
        error: &WeatherError,
    ) -> bool {
        if !Self::accept(tracker, ticket) {
            return false;
        }
        tracing::warn!("Weather fetch failed: {}", error);
        self.current = None;
        self.forecast = None;
        self.error = Some(error.user_message().to_string());
        true
    }

    /// Pretty-printed body of the current-conditions response, if any.
    pub fn raw_json(&self) -> Option<&str> {
        self.current
            .as_ref()
            .map(|c| c.raw_json.as_str())
            .filter(|raw| !raw.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.forecast.is_none()
    }

    fn accept(tracker: &FetchTracker, ticket: FetchTicket) -> bool {
        let current = tracker.is_current(ticket);
        if !current {
            tracing::debug!("Discarding stale fetch result {:?}", ticket);
        }
        current
    }
}
