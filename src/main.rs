use anyhow::Result;
use chrono::Utc;
use wthr_i18n::LocalizationKey;

#[tokio::main]
async fn main() -> Result<()> {
    wthr_core::init()?;

    let (config, _validation) = wthr_core::Config::load_validated()?;
    let mut app = wthr_core::App::new(config)?;

    let settings = app.settings();
    tracing::info!("wthr started");
    tracing::info!("  Config directory: {}", app.config().config_dir.display());
    tracing::info!("  Language: {}", settings.language.display_name());
    tracing::info!("  Theme: {}", settings.theme.id());
    tracing::info!("  Units: {}", app.units().as_param());
    for favorite in app.favorites().list() {
        tracing::info!(
            "  Favorite: {} ({:.4}, {:.4})",
            favorite.name,
            favorite.latitude,
            favorite.longitude
        );
    }

    if app.config().weather.is_configured() {
        let query = app
            .favorites()
            .list()
            .first()
            .map(|f| app.query_for_favorite(f))
            .unwrap_or_else(|| app.default_query());
        app.refresh(&query).await;

        let snapshot = app.snapshot();
        match (&snapshot.current, &snapshot.error) {
            (Some(current), _) => tracing::info!(
                "{}: {:.1}{}, {} ({} theme)",
                current.city_name,
                current.temperature,
                settings.unit_system().temperature_suffix(),
                current.description,
                if app.is_dark(Utc::now(), false) { "dark" } else { "light" }
            ),
            (None, Some(error)) => tracing::warn!("No weather data: {}", error),
            (None, None) => {}
        }
        if let Some(forecast) = &snapshot.forecast {
            let now = Utc::now();
            for day in forecast.daily_summaries() {
                tracing::info!(
                    "  {}: {:.0} / {:.0}, {}",
                    app.day_label(forecast, &day, now),
                    day.temp_min,
                    day.temp_max,
                    day.description
                );
            }
        }
        if let Some(raw) = snapshot.raw_json() {
            tracing::debug!("{}:\n{}", app.localizer().text(LocalizationKey::JsonData), raw);
        }
    }

    app.shutdown()?;

    Ok(())
}
