pub mod errors;

use std::time::Duration;
use chrono::NaiveDateTime;
use log::{debug, info};
use serde_json::Value;
use ureq::Agent;
use crate::config::BmkgParameters;
use crate::manager_bmkg::errors::BmkgError;
use crate::models::bmkg_forecast::{FullForecast, Slot};
use crate::models::forecast::ForecastPoint;

/// Format of the `local_datetime` item in BMKG forecast slots
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Anything that can deliver a flat list of forecast points
pub trait ForecastSource {
    fn get_forecast(&self) -> Result<Vec<ForecastPoint>, BmkgError>;
}

/// Struct for retrieving weather forecasts from the BMKG public forecast API
pub struct Bmkg {
    agent: Agent,
    url: String,
}

impl Bmkg {
    /// Returns a Bmkg struct ready for fetching forecasts
    ///
    /// # Arguments
    ///
    /// * 'params' - endpoint and timeout for the forecast request
    pub fn new(params: &BmkgParameters) -> Bmkg {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(params.timeout_secs)))
            .build();

        let agent = config.into();

        Self { agent, url: params.url.clone() }
    }

    /// Retrieves the forecast document from BMKG and flattens it into forecast points.
    /// A single attempt is made, a timeout, connection problem or non-success status
    /// is returned as an error.
    pub fn new_forecast(&self) -> Result<Vec<ForecastPoint>, BmkgError> {
        info!("Fetching forecast from BMKG: {}", self.url);

        let json = self.agent
            .get(self.url.as_str())
            .call()?
            .body_mut()
            .read_to_string()?;

        let forecast = parse_forecast(&json)?;
        info!("Fetched and parsed {} forecast points", forecast.len());

        Ok(forecast)
    }
}

impl ForecastSource for Bmkg {
    fn get_forecast(&self) -> Result<Vec<ForecastPoint>, BmkgError> {
        self.new_forecast()
    }
}

/// Parses a BMKG forecast document.
///
/// Only the first location in `data` is used, its `cuaca` is a list of days where each
/// day is a list of 3-hour slots. The two levels are flattened in delivery order.
/// A document without any slots is reported as `MissingForecast`.
///
/// # Arguments
///
/// * 'json' - the raw response body
pub fn parse_forecast(json: &str) -> Result<Vec<ForecastPoint>, BmkgError> {
    let forecast: FullForecast = serde_json::from_str(json)?;

    let location = forecast.data
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or(BmkgError::MissingForecast)?;

    if let Some(lokasi) = &location.lokasi {
        debug!("Forecast location: {}, {}, {}, {}",
               lokasi.desa.as_deref().unwrap_or("-"),
               lokasi.kecamatan.as_deref().unwrap_or("-"),
               lokasi.kotkab.as_deref().unwrap_or("-"),
               lokasi.provinsi.as_deref().unwrap_or("-"));
    }

    let points = location.cuaca
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .map(to_forecast_point)
        .collect::<Result<Vec<ForecastPoint>, BmkgError>>()?;

    if points.is_empty() {
        Err(BmkgError::MissingForecast)
    } else {
        Ok(points)
    }
}

/// Maps one slot to a forecast point, precipitation defaults to 0.0 when not reported
///
/// # Arguments
///
/// * 'slot' - the slot to map
fn to_forecast_point(slot: Slot) -> Result<ForecastPoint, BmkgError> {
    let raw_time = match slot.local_datetime {
        Some(Value::String(s)) => s,
        None | Some(Value::Null) => {
            return Err(BmkgError::TimeParse("slot without local_datetime".to_string()));
        },
        Some(other) => {
            return Err(BmkgError::TimeParse(format!("local_datetime is not a string: {}", other)));
        },
    };

    let local_time = NaiveDateTime::parse_from_str(&raw_time, LOCAL_DATETIME_FORMAT)
        .map_err(|e| BmkgError::TimeParse(format!("'{}': {}", raw_time, e)))?;

    Ok(ForecastPoint {
        local_time,
        temperature_c: to_number(slot.t, "temperature")?,
        humidity_pct: to_number(slot.hu, "humidity")?,
        precipitation_mm: to_number(slot.tp, "precipitation")?.unwrap_or(0.0),
        condition_text: to_text(slot.weather_desc),
    })
}

/// Converts a raw slot item to a number, numbers sent as strings are accepted
///
/// # Arguments
///
/// * 'value' - the raw item, if any
/// * 'field' - name of the item for error reporting
fn to_number(value: Option<Value>, field: &'static str) -> Result<Option<f64>, BmkgError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => {
            let parsed = s.trim().parse::<f64>();
            match parsed {
                Ok(n) => Ok(Some(n)),
                Err(_) => Err(BmkgError::InvalidNumber { field, value: s }),
            }
        },
        Some(other) => Err(BmkgError::InvalidNumber { field, value: other.to_string() }),
    }
}

fn to_text(value: Option<Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    }
}
