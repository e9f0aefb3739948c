use chrono::NaiveDate;
use skycast_core::{Config, ForecastDay, WeatherSnapshot};

const RESET: &str = "\u{1b}[0m";

/// Output palette. Chosen once at startup and replaced wholesale when the
/// user toggles it; nothing reads the config at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_config(config: &Config) -> Self {
        if config.dark_mode { Theme::Dark } else { Theme::Light }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    fn strong(self) -> &'static str {
        match self {
            Theme::Light => "\u{1b}[1m",
            Theme::Dark => "\u{1b}[1;97m",
        }
    }

    fn muted(self) -> &'static str {
        match self {
            Theme::Light => "\u{1b}[2m",
            Theme::Dark => "\u{1b}[38;5;245m",
        }
    }

    fn accent(self) -> &'static str {
        match self {
            Theme::Light => "\u{1b}[38;5;26m",
            Theme::Dark => "\u{1b}[38;5;117m",
        }
    }

    fn alert(self) -> &'static str {
        match self {
            Theme::Light => "\u{1b}[38;5;160m",
            Theme::Dark => "\u{1b}[38;5;203m",
        }
    }
}

/// Turns snapshots and messages into themed terminal text.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn banner(&self) -> String {
        format!(
            "{}\n{}",
            self.paint(self.theme.strong(), "Skycast"),
            self.paint(self.theme.muted(), "Real-time weather forecast"),
        )
    }

    /// Full dashboard block: current conditions plus the forecast strip.
    pub fn snapshot(&self, snapshot: &WeatherSnapshot) -> String {
        format!("{}\n{}", self.current(snapshot), self.forecast(&snapshot.forecast))
    }

    pub fn error_line(&self, message: &str) -> String {
        self.paint(self.theme.alert(), &format!("⚠ {message}"))
    }

    pub fn hint(&self, message: &str) -> String {
        self.paint(self.theme.muted(), message)
    }

    fn current(&self, snapshot: &WeatherSnapshot) -> String {
        let location = &snapshot.location;
        let now = &snapshot.current;

        let mut out = String::new();
        out.push_str(&self.paint(
            self.theme.strong(),
            &format!("{}, {}", location.name, location.country),
        ));
        out.push('\n');
        out.push_str(&format!(
            "{} {}  {}\n",
            self.paint(self.theme.accent(), icon_glyph(&now.icon)),
            self.paint(self.theme.strong(), &format!("{}°C", now.temp_c)),
            now.description,
        ));
        out.push_str(
            &self.paint(self.theme.muted(), &format!("Feels like {}°C", now.feels_like_c)),
        );
        out.push('\n');

        let details = [
            ("Humidity", format!("{}%", now.humidity_pct)),
            ("Wind", format!("{} m/s {}", now.wind_speed_mps, now.wind_direction)),
            ("Pressure", format!("{} hPa", now.pressure_hpa)),
            ("Visibility", format!("{} km", now.visibility_km)),
        ];
        let row = details
            .iter()
            .map(|(label, value)| format!("{} {}", self.paint(self.theme.muted(), label), value))
            .collect::<Vec<_>>()
            .join("   ");
        out.push_str(&row);
        out.push('\n');

        out
    }

    fn forecast(&self, days: &[ForecastDay]) -> String {
        let mut out = String::new();
        out.push_str(&self.paint(self.theme.strong(), "5-Day Forecast"));
        out.push('\n');

        for day in days {
            let date = format!("{:<12}", format_date(day.date));
            let temps = format!("{:>3}° / {:<3}°", day.temp_max_c, day.temp_min_c);
            out.push_str(&format!(
                "{} {} {:<14} {} {}\n",
                self.paint(self.theme.muted(), &date),
                self.paint(self.theme.accent(), icon_glyph(&day.icon)),
                day.description,
                temps,
                self.paint(self.theme.muted(), &format!("💧 {}%", day.precipitation_pct)),
            ));
        }

        out
    }

    fn paint(&self, style: &str, text: &str) -> String {
        format!("{style}{text}{RESET}")
    }
}

/// Condition glyph for an OpenWeather icon code family: `01` is clear, `02`
/// through `04` are cloud variants, `09` and `10` are rain, anything else
/// renders as showers.
fn icon_glyph(icon: &str) -> &'static str {
    if icon.starts_with("01") {
        "☀"
    } else if icon.starts_with("02") || icon.starts_with("03") || icon.starts_with("04") {
        "☁"
    } else if icon.starts_with("09") || icon.starts_with("10") {
        "🌧"
    } else {
        "🌦"
    }
}

/// "Mon, Jan 15" style date, without a padded day number.
fn format_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}
