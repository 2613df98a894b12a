use chrono::NaiveDateTime;
use sqlx::FromRow;

/// One row of `iot_data`, newest-first in every listing. The table keeps
/// unit suffixes in their original casing, mapped onto snake_case fields.
#[derive(Clone, Debug, FromRow)]
pub struct SensorReading {
    pub timestamp: NaiveDateTime,
    #[sqlx(rename = "temperature_C")]
    pub temperature_c: Option<f64>,
    pub water_level_percent: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub light_lux: Option<f64>,
    pub co2_ppm: Option<f64>,
    #[sqlx(rename = "pressure_hPa")]
    pub pressure_hpa: Option<f64>,
    #[sqlx(rename = "noise_dB")]
    pub noise_db: Option<f64>,
}
