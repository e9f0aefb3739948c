use anyhow::Result;
use inquire::{InquireError, Select, Text};
use skycast_core::{
    ApiError, Config, GeoLocator, IpLocator, LocationQuery, OpenWeatherProvider, SnapshotStore,
    WeatherProvider, WeatherSnapshot,
};

use crate::render::{Renderer, Theme};

const SEARCH: &str = "Search for a city";
const USE_LOCATION: &str = "Use my location";
const TOGGLE_THEME: &str = "Toggle dark mode";
const QUIT: &str = "Quit";

/// Interactive session: load the default city, then loop on a menu until
/// the user quits or cancels.
pub async fn run(mut config: Config) -> Result<()> {
    let provider = OpenWeatherProvider::from_config(&config)?;
    let locator = IpLocator::from_config(&config)?;
    let store = SnapshotStore::new();
    let mut renderer = Renderer::new(Theme::from_config(&config));

    println!("{}\n", renderer.banner());

    let default_city = config.default_city.trim().to_owned();
    if default_city.is_empty() {
        println!("{}", renderer.hint("Search for a location to view weather data"));
    } else {
        refresh_and_render(&provider, &store, &renderer, LocationQuery::Name(default_city)).await;
    }

    loop {
        println!();
        let options = vec![SEARCH, USE_LOCATION, TOGGLE_THEME, QUIT];
        let choice = match Select::new("What would you like to do?", options).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        match choice {
            SEARCH => {
                let input = match Text::new("City:").prompt() {
                    Ok(input) => input,
                    Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                        continue;
                    }
                    Err(err) => return Err(err.into()),
                };

                let city = input.trim().to_owned();
                if city.is_empty() {
                    continue;
                }

                refresh_and_render(&provider, &store, &renderer, LocationQuery::Name(city)).await;
            }
            USE_LOCATION => match locator.current_position().await {
                Ok((lat, lon)) => {
                    let query = LocationQuery::Coordinates { lat, lon };
                    refresh_and_render(&provider, &store, &renderer, query).await;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "geolocation failed");
                    println!("{}", renderer.error_line(&err.to_string()));
                }
            },
            TOGGLE_THEME => {
                renderer = Renderer::new(renderer.theme().toggled());
                config.dark_mode = renderer.theme().is_dark();
                config.save()?;

                // Repaint the latest snapshot in the new palette.
                if let Some(snapshot) = store.latest() {
                    println!("{}", renderer.snapshot(&snapshot));
                }
            }
            _ => break,
        }
    }

    Ok(())
}

/// Fetch through the store and render the outcome. Errors are shown but the
/// last snapshot stays in place; overtaken results are dropped silently.
async fn refresh_and_render(
    provider: &impl WeatherProvider,
    store: &SnapshotStore,
    renderer: &Renderer,
    query: LocationQuery,
) {
    println!("{}", renderer.hint(&format!("Fetching weather for {query}...")));

    match refresh(provider, store, &query).await {
        Ok(Some(snapshot)) => println!("{}", renderer.snapshot(&snapshot)),
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(code = err.code(), status = ?err.status(), %query, "weather fetch failed");
            println!("{}", renderer.error_line(&err.to_string()));
        }
    }
}

/// Run one fetch under a store ticket. `Ok(None)` means a newer request's
/// result landed first and this one was discarded.
async fn refresh(
    provider: &impl WeatherProvider,
    store: &SnapshotStore,
    query: &LocationQuery,
) -> Result<Option<WeatherSnapshot>, ApiError> {
    let ticket = store.begin_request();
    let snapshot = provider.get_weather(query).await?;

    if store.store(ticket, snapshot.clone()) { Ok(Some(snapshot)) } else { Ok(None) }
}
