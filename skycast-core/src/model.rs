use std::fmt;

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// What the user asked for: a free-form place name or exact coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Name(String),
    Coordinates { lat: f64, lon: f64 },
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::Name(name) => f.write_str(name),
            LocationQuery::Coordinates { lat, lon } => write!(f, "{lat:.4},{lon:.4}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: i32,
    pub feels_like_c: i32,
    pub description: String,
    pub icon: String,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub wind_direction: String,
    pub visibility_km: f64,
    pub uv_index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temp_min_c: i32,
    pub temp_max_c: i32,
    pub description: String,
    pub icon: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub precipitation_pct: u8,
}

/// One fully normalized fetch result: where, what it is like right now, and
/// the daily outlook. This is the only weather shape the rest of the
/// application ever sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
}

impl WeatherSnapshot {
    /// Canned Kigali snapshot for offline rendering and tests.
    pub fn sample() -> Self {
        let today = Utc::now().date_naive();
        let day = |offset, min, max, desc: &str, icon: &str, hum, wind, precip| ForecastDay {
            date: today + Days::new(offset),
            temp_min_c: min,
            temp_max_c: max,
            description: desc.to_owned(),
            icon: icon.to_owned(),
            humidity_pct: hum,
            wind_speed_mps: wind,
            precipitation_pct: precip,
        };

        Self {
            location: Location {
                name: "Kigali".to_owned(),
                country: "RW".to_owned(),
                lat: -1.9536,
                lon: 30.0606,
            },
            current: CurrentConditions {
                temp_c: 22,
                feels_like_c: 21,
                description: "Partly Cloudy".to_owned(),
                icon: "02d".to_owned(),
                humidity_pct: 65,
                pressure_hpa: 1013,
                wind_speed_mps: 3.5,
                wind_direction: "NE".to_owned(),
                visibility_km: 10.0,
                uv_index: 6.0,
            },
            forecast: vec![
                day(1, 18, 25, "Sunny", "01d", 60, 4.0, 10),
                day(2, 17, 24, "Partly Cloudy", "02d", 70, 3.0, 20),
                day(3, 19, 26, "Light Rain", "10d", 75, 5.0, 60),
                day(4, 18, 23, "Cloudy", "03d", 68, 4.5, 30),
                day(5, 20, 27, "Sunny", "01d", 55, 3.0, 5),
            ],
        }
    }
}
