//! Weather service for wthr
//!
//! Fetches current conditions and the 5-day / 3-hour forecast from the
//! OpenWeather API and decodes them into plain records.

pub mod client;
pub mod error;
pub mod tracker;
pub mod types;
pub mod units;

pub use client::WeatherClient;
pub use error::WeatherError;
pub use tracker::{FetchTicket, FetchTracker, WeatherSnapshot};
pub use types::*;
pub use units::{local_time_string, mps_to_kmh, visibility_km};
