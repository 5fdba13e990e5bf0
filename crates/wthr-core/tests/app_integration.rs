//! Integration tests for App against a mock weather API.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use chrono::DateTime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wthr_core::{App, Config};
use wthr_i18n::Language;
use wthr_prefs::keys;
use wthr_weather::LocationQuery;

fn current_body(name: &str, timezone: i32) -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": 139.69, "lat": 35.68},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04n"}],
        "main": {
            "temp": 14.2, "feels_like": 13.1, "temp_min": 12.0,
            "temp_max": 15.5, "pressure": 1008, "humidity": 77
        },
        "visibility": 9000,
        "wind": {"speed": 2.2, "deg": 45},
        "dt": 1712836800,
        "sys": {"country": "JP", "sunrise": 1712780000, "sunset": 1712826000},
        "timezone": timezone,
        "name": name
    })
}

fn forecast_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "list": [{
            "dt": 1712847600,
            "main": {
                "temp": 13.0, "feels_like": 12.0, "temp_min": 12.5,
                "temp_max": 13.5, "pressure": 1009, "humidity": 80
            },
            "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10n"}],
            "wind": {"speed": 3.0, "deg": 60},
            "dt_txt": "2024-04-11 15:00:00"
        }],
        "city": {"name": name, "country": "JP", "timezone": 32400}
    })
}

fn app_for(server: &MockServer) -> App {
    let mut config = Config::default();
    config.weather.api_key = "test-key".to_string();
    config.weather.base_url = server.uri();
    App::in_memory(config).unwrap()
}

#[tokio::test]
async fn test_refresh_fills_snapshot() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Tokyo", 32400)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("Tokyo")))
        .mount(&mock_server)
        .await;

    let app = app_for(&mock_server);
    app.favorites().add("Tokyo", 35.68, 139.69);
    let tokyo = app.favorites().list().remove(0);

    assert!(app.refresh(&app.query_for_favorite(&tokyo)).await);

    let snapshot = app.snapshot();
    assert!(snapshot.error.is_none());
    assert!(snapshot.raw_json().unwrap().contains("\"name\": \"Tokyo\""));
    assert_eq!(snapshot.current.unwrap().city_name, "Tokyo");
    assert_eq!(snapshot.forecast.unwrap().entries.len(), 1);
}

#[tokio::test]
async fn test_slow_older_refresh_is_discarded() {
    let mock_server = MockServer::start().await;
    let slow = Duration::from_millis(300);
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Paris"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_body("Paris", 7200))
                .set_delay(slow),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Paris"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body("Paris"))
                .set_delay(slow),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Tokyo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Tokyo", 32400)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Tokyo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("Tokyo")))
        .mount(&mock_server)
        .await;

    let app = app_for(&mock_server);
    let paris = LocationQuery::city("Paris");
    let tokyo = LocationQuery::city("Tokyo");

    // Paris starts first but finishes last.
    let (paris_applied, tokyo_applied) = tokio::join!(app.refresh(&paris), app.refresh(&tokyo));

    assert!(!paris_applied);
    assert!(tokyo_applied);
    let snapshot = app.snapshot();
    assert_eq!(snapshot.current.unwrap().city_name, "Tokyo");
    assert_eq!(snapshot.forecast.unwrap().city_name, "Tokyo");
}

#[tokio::test]
async fn test_forecast_day_labels_follow_language() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Tokyo", 32400)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("Tokyo")))
        .mount(&mock_server)
        .await;

    let app = app_for(&mock_server);
    assert!(app.refresh(&LocationQuery::city("Tokyo")).await);
    let forecast = app.snapshot().forecast.unwrap();
    let days = forecast.daily_summaries();
    assert_eq!(days.len(), 1);

    // The only entry is midnight 2024-04-12 in Tokyo.
    let same_day = DateTime::from_timestamp(1712847600, 0).unwrap();
    let day_before = DateTime::from_timestamp(1712847600 - 86_400, 0).unwrap();
    assert_eq!(app.day_label(&forecast, &days[0], same_day), "Danas");
    assert_eq!(app.day_label(&forecast, &days[0], day_before), "Sutra");

    app.localizer().set_language(Language::English);
    assert_eq!(app.day_label(&forecast, &days[0], same_day), "Today");
}

#[tokio::test]
async fn test_refresh_uses_unit_preference() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("London", 3600)))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("London")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = app_for(&mock_server);
    app.preferences().set(keys::USE_METRIC_UNITS, false);

    assert!(app.refresh(&app.default_query()).await);
    assert!(app.snapshot().current.is_some());
}

#[tokio::test]
async fn test_refresh_error_is_exposed_as_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("q", "Atlantis"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&mock_server)
        .await;

    let app = app_for(&mock_server);
    let query = LocationQuery::city("Atlantis");

    assert!(app.refresh(&query).await);

    let snapshot = app.snapshot();
    assert!(snapshot.is_empty());
    assert_eq!(
        snapshot.error.as_deref(),
        Some("City not found. Check and try again.")
    );
}
