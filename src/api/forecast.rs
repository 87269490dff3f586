use axum::{
    extract::{rejection::QueryRejection, Query},
    Json,
};
use chrono::{DurationRound, TimeDelta, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::forecast::{build_forecast, Forecast, DEFAULT_DAYS};

#[derive(Deserialize)]
pub struct ForecastQuery {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    DEFAULT_DAYS
}

pub async fn get_forecast(
    query: Result<Query<ForecastQuery>, QueryRejection>,
) -> Result<Json<Forecast>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::InvalidQuery(rejection.body_text()))?;

    let now = Utc::now();
    let start = now.duration_trunc(TimeDelta::hours(1)).unwrap_or(now);

    let forecast = build_forecast(
        query.latitude,
        query.longitude,
        query.days,
        start,
        &mut rand::thread_rng(),
    )?;

    debug!(
        latitude = query.latitude,
        longitude = query.longitude,
        days = query.days,
        "Synthesized forecast"
    );

    Ok(Json(forecast))
}
