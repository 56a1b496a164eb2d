use serde::Deserialize;
use serde_json::Value;

/// One 3-hour slot as delivered by BMKG. Every item is optional since
/// the public feed is known to leave fields out, and items are kept as raw
/// values so a badly typed slot doesn't discard the whole document.
#[derive(Deserialize, Debug)]
pub struct Slot {
    pub local_datetime: Option<Value>,
    pub t: Option<Value>,
    pub hu: Option<Value>,
    pub weather_desc: Option<Value>,
    pub tp: Option<Value>,
}

#[derive(Deserialize, Debug)]
pub struct Lokasi {
    pub desa: Option<String>,
    pub kecamatan: Option<String>,
    pub kotkab: Option<String>,
    pub provinsi: Option<String>,
}

/// Forecast for one location, `cuaca` holds one list of slots per day
#[derive(Deserialize, Debug)]
pub struct LocationForecast {
    pub lokasi: Option<Lokasi>,
    pub cuaca: Option<Vec<Vec<Slot>>>,
}

#[derive(Deserialize, Debug)]
pub struct FullForecast {
    pub data: Option<Vec<LocationForecast>>,
}
