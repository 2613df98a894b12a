use crate::{
    pagination::{page_window, Pagination},
    query::DateRangeFilter,
    store,
    template::IndexTemplate,
    util::{
        self,
        config::AppConfig,
        static_file::StaticFile,
        template::into_response,
    },
};
use axum::{
    extract::{FromRef, Query, State},
    http::{header, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tokio::net::TcpListener;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::{error, info, warn};

// Define your application shared state
#[derive(Clone, FromRef)]
struct AppState {
    pool: MySqlPool,
    config: AppConfig,
}

#[derive(Debug, Default, Deserialize)]
struct IndexParams {
    page: Option<String>,
    date_from: Option<String>,
    date_to: Option<String>,
}

/// A page value the form or a crawler mangled is not worth failing the
/// request over; anything unparseable means page 1.
fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|page| page.parse::<u32>().ok())
        .unwrap_or(1)
        .max(1)
}

async fn index(
    State(pool): State<MySqlPool>,
    State(config): State<AppConfig>,
    Query(params): Query<IndexParams>,
) -> Response {
    let requested_page = parse_page(params.page.as_deref());
    let date_from = params.date_from.filter(|value| !value.is_empty());
    let date_to = params.date_to.filter(|value| !value.is_empty());

    let mut rows = Vec::new();
    let mut pagination = Pagination::new(1, 0);
    let mut error = None;

    // Any failure ends up as an in-page message on a 200 response, never a
    // bare error page.
    match DateRangeFilter::new(date_from.as_deref(), date_to.as_deref()) {
        Ok(filter) => match store::fetch_page(&pool, &filter, requested_page).await {
            Ok(result) => {
                rows = result.rows;
                pagination = result.pagination;
            }
            Err(err) => {
                error!("Error occurred while fetching readings: {:?}", err);
                error = Some(err.user_message().to_string());
            }
        },
        Err(err) => error = Some(err.to_string()),
    }

    let window = page_window(pagination.page, pagination.total_pages);

    into_response(&IndexTemplate {
        rows,
        pagination,
        window,
        error,
        date_from,
        date_to,
        db_host: config.db_host,
        db_name: config.db_name,
    })
}

async fn health() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        json!({"status": "ok"}).to_string(),
    )
}

pub async fn start_server(pool: MySqlPool, config: AppConfig) -> anyhow::Result<()> {
    let http_addr = config.http_addr.clone();
    info!("Starting web server @ {}", http_addr);

    // Schema setup is best-effort here: a down database must not keep the
    // server from answering (requests render the failure in-page).
    if let Err(err) = util::ensure_schema(&pool).await {
        warn!("Skipping migrations, database not reachable: {:?}", err);
    }

    // build our application with a single route
    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/static/*file", get(static_handler))
        .fallback_service(get(not_found))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        // Create the application state
        .with_state(AppState { pool, config });

    let listener = TcpListener::bind(&http_addr).await?;
    info!("Listening on {}", &http_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn static_handler(uri: Uri) -> impl IntoResponse {
    let mut path = uri.path().trim_start_matches('/').to_string();

    if path.starts_with("static/") {
        path = path.replace("static/", "");
    }

    StaticFile(path)
}

// Finally, we use a fallback route for anything that didn't match.
async fn not_found() -> Html<&'static str> {
    Html("<h1>404</h1><p>Not Found</p>")
}
