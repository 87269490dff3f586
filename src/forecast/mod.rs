//! Synthetic hourly weather for the dashboard, and the solar and wind output
//! estimated from it.
//!
//! There is no weather feed behind this. Each series is a daily sine pattern
//! plus gaussian noise, clipped where a negative value makes no sense.

use std::f64::consts::PI;

use chrono::{DateTime, TimeDelta, Timelike, Utc};
use rand::Rng;
use rand_distr::StandardNormal;
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_DAYS: u32 = 7;
pub const MAX_DAYS: u32 = 30;

/// Nameplate capacity of one turbine, MW.
const RATED_POWER: f64 = 2.0;
const TURBINES: f64 = 5.0;
/// Wind speeds (m/s) between which turbine output ramps from zero to rated.
const CUT_IN_SPEED: f64 = 3.0;
const RATED_SPEED: f64 = 12.0;

const PANEL_EFFICIENCY: f64 = 0.2;
/// Output lost per degree above the 25 °C reference.
const TEMPERATURE_COEFFICIENT: f64 = 0.005;

#[derive(Error, Debug, PartialEq)]
pub enum ForecastError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),

    #[error("days {0} is outside [1, 30]")]
    Days(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSeries {
    /// °C
    pub temperature: Vec<f64>,
    /// m/s
    pub wind_speed: Vec<f64>,
    /// W/m²
    pub solar_irradiance: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSeries {
    pub timestamps: Vec<String>,
    pub solar_generation: Vec<f64>,
    pub wind_generation: Vec<f64>,
    pub weather: WeatherSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub location_name: String,
    pub timezone: String,
    pub forecast: ForecastSeries,
    pub total_generation: f64,
    pub average_solar: f64,
    pub average_wind: f64,
}

/// Builds a `24 * days` point hourly forecast starting at `start`.
pub fn build_forecast<R: Rng>(
    latitude: f64,
    longitude: f64,
    days: u32,
    start: DateTime<Utc>,
    rng: &mut R,
) -> Result<Forecast, ForecastError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ForecastError::Latitude(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ForecastError::Longitude(longitude));
    }
    if !(1..=MAX_DAYS).contains(&days) {
        return Err(ForecastError::Days(days));
    }

    let hours: Vec<DateTime<Utc>> = (0..i64::from(days) * 24)
        .map(|offset| start + TimeDelta::hours(offset))
        .collect();

    let weather = synthesize_weather(&hours, rng);

    let solar_generation: Vec<f64> = weather
        .solar_irradiance
        .iter()
        .zip(&weather.temperature)
        .map(|(&irradiance, &temperature)| solar_output(irradiance, temperature))
        .collect();
    let wind_generation: Vec<f64> = weather.wind_speed.iter().map(|&speed| wind_output(speed)).collect();

    let points = hours.len() as f64;
    let total_solar: f64 = solar_generation.iter().sum();
    let total_wind: f64 = wind_generation.iter().sum();

    Ok(Forecast {
        location_name: format!("Location ({latitude:.2}, {longitude:.2})"),
        timezone: "UTC".to_string(),
        total_generation: total_solar + total_wind,
        average_solar: total_solar / points,
        average_wind: total_wind / points,
        forecast: ForecastSeries {
            timestamps: hours
                .iter()
                .map(|hour| hour.format("%Y-%m-%d %H:%M:%S").to_string())
                .collect(),
            solar_generation,
            wind_generation,
            weather,
        },
    })
}

fn synthesize_weather<R: Rng>(hours: &[DateTime<Utc>], rng: &mut R) -> WeatherSeries {
    let mut series = WeatherSeries {
        temperature: Vec::with_capacity(hours.len()),
        wind_speed: Vec::with_capacity(hours.len()),
        solar_irradiance: Vec::with_capacity(hours.len()),
    };

    for hour in hours {
        let day_fraction = f64::from(hour.hour()) / 24.0;
        let mut noise = |std_dev: f64| std_dev * rng.sample::<f64, _>(StandardNormal);

        series
            .temperature
            .push(25.0 + 5.0 * (2.0 * PI * day_fraction).sin() + noise(1.0));
        series
            .wind_speed
            .push((5.0 + 2.0 * (2.0 * PI * day_fraction).sin() + noise(1.0)).max(0.0));
        series
            .solar_irradiance
            .push((800.0 * (PI * day_fraction).sin() + noise(50.0)).max(0.0));
    }

    series
}

fn solar_output(irradiance: f64, temperature: f64) -> f64 {
    (irradiance * PANEL_EFFICIENCY * (1.0 - TEMPERATURE_COEFFICIENT * (temperature - 25.0))).max(0.0)
}

fn wind_output(speed: f64) -> f64 {
    RATED_POWER * TURBINES * ((speed - CUT_IN_SPEED) / (RATED_SPEED - CUT_IN_SPEED)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::{SeedableRng, rngs::StdRng};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn seeded(days: u32) -> Forecast {
        build_forecast(28.61, 77.21, days, start(), &mut StdRng::seed_from_u64(42)).unwrap()
    }

    #[test]
    fn test_hourly_points_per_day() {
        for days in [1, 7, 30] {
            let forecast = seeded(days);
            let expected = days as usize * 24;

            assert_eq!(forecast.forecast.timestamps.len(), expected);
            assert_eq!(forecast.forecast.solar_generation.len(), expected);
            assert_eq!(forecast.forecast.wind_generation.len(), expected);
            assert_eq!(forecast.forecast.weather.temperature.len(), expected);
            assert_eq!(forecast.forecast.weather.wind_speed.len(), expected);
            assert_eq!(forecast.forecast.weather.solar_irradiance.len(), expected);
        }
    }

    #[test]
    fn test_timestamps_step_by_one_hour() {
        let forecast = seeded(2);
        let timestamps = &forecast.forecast.timestamps;

        assert_eq!(timestamps[0], "2025-06-01 00:00:00");
        assert_eq!(timestamps[1], "2025-06-01 01:00:00");
        assert_eq!(timestamps[24], "2025-06-02 00:00:00");
        assert_eq!(timestamps[47], "2025-06-02 23:00:00");
    }

    #[test]
    fn test_physical_series_are_never_negative() {
        let forecast = seeded(MAX_DAYS);
        let series = &forecast.forecast;

        assert!(series.weather.wind_speed.iter().all(|&v| v >= 0.0));
        assert!(series.weather.solar_irradiance.iter().all(|&v| v >= 0.0));
        assert!(series.solar_generation.iter().all(|&v| v >= 0.0));
        assert!(series.wind_generation.iter().all(|&v| (0.0..=10.0).contains(&v)));
    }

    #[test]
    fn test_temperature_follows_daily_pattern() {
        let forecast = seeded(MAX_DAYS);
        let temperature = &forecast.forecast.weather.temperature;
        let mean = temperature.iter().sum::<f64>() / temperature.len() as f64;

        assert!((mean - 25.0).abs() < 0.5, "mean temperature {mean}");
    }

    #[test]
    fn test_totals_match_series() {
        let forecast = seeded(3);
        let solar: f64 = forecast.forecast.solar_generation.iter().sum();
        let wind: f64 = forecast.forecast.wind_generation.iter().sum();

        assert!((forecast.total_generation - (solar + wind)).abs() < 1e-9);
        assert!((forecast.average_solar - solar / 72.0).abs() < 1e-9);
        assert!((forecast.average_wind - wind / 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_same_forecast() {
        assert_eq!(seeded(2), seeded(2));
    }

    #[test]
    fn test_location_fallback_name() {
        let forecast = seeded(1);
        assert_eq!(forecast.location_name, "Location (28.61, 77.21)");
        assert_eq!(forecast.timezone, "UTC");
    }

    #[test]
    fn test_generation_curves() {
        assert_eq!(wind_output(0.0), 0.0);
        assert_eq!(wind_output(3.0), 0.0);
        assert!((wind_output(7.5) - 5.0).abs() < 1e-9);
        assert_eq!(wind_output(12.0), 10.0);
        assert_eq!(wind_output(40.0), 10.0);

        assert!((solar_output(1000.0, 25.0) - 200.0).abs() < 1e-9);
        assert!(solar_output(1000.0, 35.0) < 200.0);
        assert_eq!(solar_output(0.0, 25.0), 0.0);
    }

    #[test]
    fn test_bounds() {
        let mut rng = StdRng::seed_from_u64(1);

        for (lat, lon, days) in [(-90.0, -180.0, 1), (90.0, 180.0, MAX_DAYS), (0.0, 0.0, DEFAULT_DAYS)] {
            assert!(build_forecast(lat, lon, days, start(), &mut rng).is_ok());
        }

        assert_eq!(
            build_forecast(90.5, 0.0, 1, start(), &mut rng),
            Err(ForecastError::Latitude(90.5))
        );
        assert_eq!(
            build_forecast(0.0, -180.5, 1, start(), &mut rng),
            Err(ForecastError::Longitude(-180.5))
        );
        assert_eq!(build_forecast(0.0, 0.0, 0, start(), &mut rng), Err(ForecastError::Days(0)));
        assert_eq!(build_forecast(0.0, 0.0, 31, start(), &mut rng), Err(ForecastError::Days(31)));
        assert!(build_forecast(f64::NAN, 0.0, 1, start(), &mut rng).is_err());
    }
}
