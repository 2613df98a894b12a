use crate::dto::SensorReading;
use crate::pagination::{Pagination, RECORDS_PER_PAGE};
use crate::query::DateRangeFilter;
use crate::util::FetchError;
use sqlx::MySqlPool;

const SELECT_COLUMNS: &str = "timestamp, temperature_C, water_level_percent, humidity_percent, \
                              light_lux, co2_ppm, pressure_hPa, noise_dB";

/// One page of readings plus the arithmetic that produced it.
#[derive(Debug, Clone)]
pub struct PageResult {
    pub rows: Vec<SensorReading>,
    pub pagination: Pagination,
}

fn count_sql(filter: &DateRangeFilter) -> String {
    format!("SELECT COUNT(*) FROM iot_data{}", filter.where_sql())
}

fn page_sql(filter: &DateRangeFilter) -> String {
    format!(
        "SELECT {SELECT_COLUMNS} FROM iot_data{} ORDER BY timestamp DESC LIMIT ? OFFSET ?",
        filter.where_sql()
    )
}

/// Count-then-fetch. Both statements bind the same filter parameters, so
/// the reported total can never drift from the rows a page shows.
pub async fn fetch_page(
    pool: &MySqlPool,
    filter: &DateRangeFilter,
    requested_page: u32,
) -> Result<PageResult, FetchError> {
    let sql = count_sql(filter);
    let mut count_query = sqlx::query_scalar::<_, i64>(&sql);
    for param in filter.params() {
        count_query = count_query.bind(param);
    }
    let total_records = count_query
        .fetch_one(pool)
        .await
        .map_err(FetchError::from_sqlx)?
        .max(0) as u64;

    let pagination = Pagination::new(requested_page, total_records);
    if total_records == 0 {
        return Ok(PageResult {
            rows: Vec::new(),
            pagination,
        });
    }

    let sql = page_sql(filter);
    let mut page_query = sqlx::query_as::<_, SensorReading>(&sql);
    for param in filter.params() {
        page_query = page_query.bind(param);
    }
    let rows = page_query
        .bind(RECORDS_PER_PAGE)
        .bind(pagination.offset())
        .fetch_all(pool)
        .await
        .map_err(FetchError::from_sqlx)?;

    Ok(PageResult { rows, pagination })
}
