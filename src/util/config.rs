use anyhow::Result;
use config::{Config, Environment, FileFormat};

/// Process configuration, built once at startup and passed explicitly into
/// the server and the generator. Database settings come from the
/// conventional `DB_HOST` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`
/// environment variables, with an optional `iotview.toml` on top.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub db_host: String,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub gen_start: String,
    pub gen_end: String,
    pub gen_step_secs: i64,
}

pub fn load_config() -> Result<AppConfig> {
    let config = Config::builder()
        .set_default("http_addr", "0.0.0.0:5000")?
        .set_default("db_host", "127.0.0.1")?
        .set_default("db_user", "iot_user")?
        .set_default("db_password", "iot_password")?
        .set_default("db_name", "iot")?
        .set_default("gen_start", "2024-10-01T00:00:00")?
        .set_default("gen_end", "2025-04-01T00:00:00")?
        .set_default("gen_step_secs", 30)?
        .add_source(Environment::default())
        .add_source(config::File::new("iotview.toml", FileFormat::Toml).required(false))
        .build()?;

    Ok(AppConfig {
        http_addr: config.get_string("http_addr")?,
        db_host: config.get_string("db_host")?,
        db_user: config.get_string("db_user")?,
        db_password: config.get_string("db_password")?,
        db_name: config.get_string("db_name")?,
        gen_start: config.get_string("gen_start")?,
        gen_end: config.get_string("gen_end")?,
        gen_step_secs: config.get_int("gen_step_secs")?,
    })
}
