use chrono::NaiveDateTime;

/// A single forecast slot, flattened out of the BMKG document.
/// The local time is kept as delivered, no timezone conversion is done.
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastPoint {
    pub local_time: NaiveDateTime,
    pub temperature_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub precipitation_mm: f64,
    pub condition_text: Option<String>,
}

/// A forecast point as persisted, stamped with its batch fetch time
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastRecord {
    pub id: i64,
    pub fetched_at: NaiveDateTime,
    pub point: ForecastPoint,
}
