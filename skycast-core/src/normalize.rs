use chrono::{DateTime, NaiveDate};

use crate::{
    model::{CurrentConditions, ForecastDay, Location, WeatherSnapshot},
    provider::openweather::{OwCondition, OwCurrent, OwForecast, OwForecastEntry},
};

/// Forecast entries arrive in 3-hour steps, so eight of them span a day.
const INTERVALS_PER_DAY: usize = 8;
const MAX_FORECAST_DAYS: usize = 5;

const COMPASS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Collapse the two raw endpoint payloads into one snapshot.
///
/// This is a pure mapping: any payload that decoded successfully normalizes
/// without error, with "Unknown" standing in for a missing condition block.
pub fn normalize(current: &OwCurrent, forecast: &OwForecast) -> WeatherSnapshot {
    let (description, icon) = primary_condition(&current.weather);

    WeatherSnapshot {
        location: Location {
            name: current.name.clone(),
            country: current.sys.country.clone(),
            lat: current.coord.lat,
            lon: current.coord.lon,
        },
        current: CurrentConditions {
            temp_c: current.main.temp.round() as i32,
            feels_like_c: current.main.feels_like.round() as i32,
            description,
            icon,
            humidity_pct: current.main.humidity,
            pressure_hpa: current.main.pressure,
            wind_speed_mps: current.wind.speed,
            wind_direction: wind_direction(current.wind.deg).to_owned(),
            visibility_km: current.visibility / 1000.0,
            // The free endpoints carry no UV data; the slot always reads zero.
            uv_index: 0.0,
        },
        forecast: forecast
            .list
            .iter()
            .step_by(INTERVALS_PER_DAY)
            .take(MAX_FORECAST_DAYS)
            .map(daily_sample)
            .collect(),
    }
}

/// Nearest of the eight compass points for a wind bearing in degrees.
///
/// Bearings outside `0..360`, negative ones included, are folded into range
/// first, so 370 and -45 still land on a named point.
pub fn wind_direction(degrees: f64) -> &'static str {
    let folded = degrees.rem_euclid(360.0);
    let index = (folded / 45.0).round() as usize % COMPASS.len();
    COMPASS[index]
}

/// Project one 3-hour interval onto a whole forecast day.
fn daily_sample(entry: &OwForecastEntry) -> ForecastDay {
    let (description, icon) = primary_condition(&entry.weather);

    ForecastDay {
        date: date_of(entry.dt),
        temp_min_c: entry.main.temp_min.round() as i32,
        temp_max_c: entry.main.temp_max.round() as i32,
        description,
        icon,
        humidity_pct: entry.main.humidity,
        wind_speed_mps: entry.wind.speed,
        precipitation_pct: (entry.pop * 100.0).round() as u8,
    }
}

fn date_of(unix: i64) -> NaiveDate {
    DateTime::from_timestamp(unix, 0).map(|dt| dt.date_naive()).unwrap_or_default()
}

fn primary_condition(conditions: &[OwCondition]) -> (String, String) {
    conditions
        .first()
        .map(|c| (c.main.clone(), c.icon.clone()))
        .unwrap_or_else(|| ("Unknown".to_string(), String::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::openweather::{OwCoord, OwForecastMain, OwMain, OwSys, OwWind};

    fn current_fixture() -> OwCurrent {
        OwCurrent {
            name: "Kigali".to_string(),
            coord: OwCoord { lat: -1.9536, lon: 30.0606 },
            sys: OwSys { country: "RW".to_string() },
            main: OwMain { temp: 22.4, feels_like: 21.6, humidity: 65, pressure: 1013 },
            weather: vec![OwCondition { main: "Clouds".to_string(), icon: "02d".to_string() }],
            wind: OwWind { speed: 3.5, deg: 40.0 },
            visibility: 10000.0,
        }
    }

    /// Entries 3 hours apart starting 2024-01-15 00:00 UTC. `temp_min`
    /// encodes the list index so sampled positions are recognizable.
    fn forecast_fixture(len: usize) -> OwForecast {
        const BASE: i64 = 1_705_276_800;

        OwForecast {
            list: (0..len)
                .map(|i| OwForecastEntry {
                    dt: BASE + (i as i64) * 3 * 3600,
                    main: OwForecastMain {
                        temp_min: i as f64,
                        temp_max: i as f64 + 5.0,
                        humidity: 60,
                    },
                    weather: vec![OwCondition {
                        main: "Rain".to_string(),
                        icon: "10d".to_string(),
                    }],
                    wind: OwWind { speed: 4.0, deg: 180.0 },
                    pop: 0.6,
                })
                .collect(),
        }
    }

    #[test]
    fn cardinal_bearings_map_to_their_names() {
        for (degrees, expected) in [
            (0.0, "N"),
            (45.0, "NE"),
            (90.0, "E"),
            (135.0, "SE"),
            (180.0, "S"),
            (225.0, "SW"),
            (270.0, "W"),
            (315.0, "NW"),
        ] {
            assert_eq!(wind_direction(degrees), expected, "bearing {degrees}");
        }
    }

    #[test]
    fn bearings_fold_into_range() {
        assert_eq!(wind_direction(360.0), "N");
        assert_eq!(wind_direction(370.0), "N");
        assert_eq!(wind_direction(720.0), "N");
        assert_eq!(wind_direction(-45.0), "NW");
        assert_eq!(wind_direction(-90.0), "W");
    }

    #[test]
    fn bearings_round_to_the_nearest_point() {
        assert_eq!(wind_direction(22.0), "N");
        assert_eq!(wind_direction(23.0), "NE");
        assert_eq!(wind_direction(337.0), "NW");
        assert_eq!(wind_direction(338.0), "N");
    }

    #[test]
    fn wind_direction_is_periodic() {
        for degrees in [0.0, 10.0, 44.0, 45.0, 100.0, 222.5, 359.0] {
            assert_eq!(wind_direction(degrees), wind_direction(degrees + 360.0));
        }
    }

    #[test]
    fn every_bearing_has_a_direction() {
        for degrees in 0..360 {
            let dir = wind_direction(f64::from(degrees));
            assert!(COMPASS.contains(&dir));
        }
    }

    #[test]
    fn forecast_samples_every_eighth_interval() {
        let snapshot = normalize(&current_fixture(), &forecast_fixture(40));

        assert_eq!(snapshot.forecast.len(), 5);
        let sampled: Vec<i32> = snapshot.forecast.iter().map(|d| d.temp_min_c).collect();
        assert_eq!(sampled, vec![0, 8, 16, 24, 32]);

        let dates: Vec<NaiveDate> = snapshot.forecast.iter().map(|d| d.date).collect();
        let expected: Vec<NaiveDate> = (15..20)
            .map(|day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap())
            .collect();
        assert_eq!(dates, expected);
    }

    #[test]
    fn short_forecast_yields_fewer_days() {
        assert_eq!(normalize(&current_fixture(), &forecast_fixture(17)).forecast.len(), 3);
        assert_eq!(normalize(&current_fixture(), &forecast_fixture(9)).forecast.len(), 2);
        assert_eq!(normalize(&current_fixture(), &forecast_fixture(1)).forecast.len(), 1);
        assert_eq!(normalize(&current_fixture(), &forecast_fixture(0)).forecast.len(), 0);
    }

    #[test]
    fn forecast_never_exceeds_five_days() {
        let snapshot = normalize(&current_fixture(), &forecast_fixture(48));
        assert_eq!(snapshot.forecast.len(), 5);
    }

    #[test]
    fn temperatures_round_to_the_nearest_degree() {
        let snapshot = normalize(&current_fixture(), &forecast_fixture(8));

        assert_eq!(snapshot.current.temp_c, 22);
        assert_eq!(snapshot.current.feels_like_c, 22);

        let mut cold = current_fixture();
        cold.main.temp = -3.6;
        let snapshot = normalize(&cold, &forecast_fixture(0));
        assert_eq!(snapshot.current.temp_c, -4);
    }

    #[test]
    fn precipitation_probability_becomes_a_percentage() {
        let mut forecast = forecast_fixture(4);

        for (pop, pct) in [(0.05, 5), (0.6, 60), (1.0, 100), (0.0, 0)] {
            forecast.list[0].pop = pop;
            let snapshot = normalize(&current_fixture(), &forecast);
            assert_eq!(snapshot.forecast[0].precipitation_pct, pct, "pop {pop}");
        }
    }

    #[test]
    fn visibility_is_reported_in_km() {
        let snapshot = normalize(&current_fixture(), &forecast_fixture(0));
        assert_eq!(snapshot.current.visibility_km, 10.0);

        let mut hazy = current_fixture();
        hazy.visibility = 9500.0;
        let snapshot = normalize(&hazy, &forecast_fixture(0));
        assert_eq!(snapshot.current.visibility_km, 9.5);
    }

    #[test]
    fn missing_condition_block_degrades_gracefully() {
        let mut bare = current_fixture();
        bare.weather.clear();

        let snapshot = normalize(&bare, &forecast_fixture(0));
        assert_eq!(snapshot.current.description, "Unknown");
        assert_eq!(snapshot.current.icon, "");
    }

    #[test]
    fn condition_uses_the_group_not_the_sentence() {
        let snapshot = normalize(&current_fixture(), &forecast_fixture(0));
        assert_eq!(snapshot.current.description, "Clouds");
        assert_eq!(snapshot.current.icon, "02d");
    }

    #[test]
    fn uv_index_slot_stays_zero() {
        let snapshot = normalize(&current_fixture(), &forecast_fixture(0));
        assert_eq!(snapshot.current.uv_index, 0.0);
    }

    #[test]
    fn unrepresentable_timestamp_falls_back_to_the_epoch_date() {
        let mut forecast = forecast_fixture(1);
        forecast.list[0].dt = i64::MAX;

        let snapshot = normalize(&current_fixture(), &forecast);
        assert_eq!(snapshot.forecast[0].date, NaiveDate::default());
    }

    #[test]
    fn normalize_is_deterministic() {
        let current = current_fixture();
        let forecast = forecast_fixture(40);

        assert_eq!(normalize(&current, &forecast), normalize(&current, &forecast));
    }
}
