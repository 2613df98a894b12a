use crate::util::{self, config::AppConfig, DB};
use anyhow::{anyhow, Context};
use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use sqlx::{MySqlPool, QueryBuilder};
use tracing::info;

const BATCH_SIZE: usize = 1000;

/// Bounds and step size of one random-walk channel.
struct Channel {
    start: f64,
    min: f64,
    max: f64,
    delta: f64,
}

// Order matches the iot_data column order after timestamp.
const CHANNELS: [Channel; 7] = [
    Channel { start: 22.0, min: 15.0, max: 30.0, delta: 0.4 }, // temperature_C
    Channel { start: 50.0, min: 0.0, max: 100.0, delta: 0.5 }, // water_level_percent
    Channel { start: 60.0, min: 30.0, max: 90.0, delta: 0.5 }, // humidity_percent
    Channel { start: 500.0, min: 0.0, max: 1000.0, delta: 15.0 }, // light_lux
    Channel { start: 600.0, min: 400.0, max: 1000.0, delta: 10.0 }, // co2_ppm
    Channel { start: 1013.0, min: 980.0, max: 1050.0, delta: 1.0 }, // pressure_hPa
    Channel { start: 50.0, min: 30.0, max: 90.0, delta: 1.5 }, // noise_dB
];

#[derive(Debug, Clone)]
struct GeneratedReading {
    timestamp: NaiveDateTime,
    values: [f64; 7],
}

/// Random-walk step, clamped to the channel range.
fn smooth_random(rng: &mut impl Rng, prev: f64, channel: &Channel) -> f64 {
    let value = prev + rng.gen_range(-channel.delta..=channel.delta);
    value.clamp(channel.min, channel.max)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn parse_datetime(raw: &str) -> anyhow::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map_err(|err| anyhow!("invalid datetime {:?}: {}", raw, err))
}

/// Seed `iot_data` with one smooth random-walk series across the configured
/// time span, inserting in batches. Idempotence is not attempted; running
/// twice doubles the rows, like any bulk seeder.
pub async fn run(pool: MySqlPool, config: &AppConfig) -> anyhow::Result<()> {
    util::ensure_schema(&pool).await?;

    let start = parse_datetime(&config.gen_start).context("gen_start")?;
    let end = parse_datetime(&config.gen_end).context("gen_end")?;
    let step = Duration::seconds(config.gen_step_secs);
    if step <= Duration::zero() {
        return Err(anyhow!("gen_step_secs must be positive"));
    }

    info!(
        "Generating readings from {} to {} every {}s",
        start, end, config.gen_step_secs
    );

    let mut rng = rand::thread_rng();
    let mut values = CHANNELS.map(|channel| channel.start);
    let mut current = start;
    let mut batch: Vec<GeneratedReading> = Vec::with_capacity(BATCH_SIZE);
    let mut count: u64 = 0;

    while current <= end {
        for (value, channel) in values.iter_mut().zip(CHANNELS.iter()) {
            *value = smooth_random(&mut rng, *value, channel);
        }

        batch.push(GeneratedReading {
            timestamp: current,
            values: values.map(round2),
        });

        if batch.len() == BATCH_SIZE {
            insert_batch(&pool, &batch).await?;
            count += batch.len() as u64;
            batch.clear();
            info!("Inserted {} records...", count);
        }

        current += step;
    }

    if !batch.is_empty() {
        insert_batch(&pool, &batch).await?;
        count += batch.len() as u64;
    }

    info!("Done, {} records inserted", count);
    Ok(())
}

async fn insert_batch(pool: &MySqlPool, batch: &[GeneratedReading]) -> anyhow::Result<()> {
    let mut builder: QueryBuilder<DB> = QueryBuilder::new(
        "INSERT INTO iot_data (timestamp, temperature_C, water_level_percent, \
         humidity_percent, light_lux, co2_ppm, pressure_hPa, noise_dB) ",
    );

    builder.push_values(batch, |mut row, reading| {
        row.push_bind(reading.timestamp);
        for value in reading.values.iter() {
            row.push_bind(*value);
        }
    });

    builder.build().execute(pool).await?;
    Ok(())
}
