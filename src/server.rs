//! HTTP API serving MarketWatch headlines per ticker.
//!
//! `GET /api/stock-news/{ticker}` scrapes the ticker's MarketWatch page
//! inside the request and answers:
//!
//! ```json
//! { "status": "success", "data": [ { "title": "...", "url": "..." } ] }
//! ```
//!
//! The response is always HTTP 200 with `"status": "success"`. A failed
//! fetch or parse is logged and shows up to the client as an empty `data`
//! list, indistinguishable from a ticker with no news. Clients that need
//! to tell the two apart have to check the server logs.

use crate::error::NewsError;
use crate::http::Fetch;
use crate::models::{ApiResponse, Headline};
use crate::sources::fetch_news;
use crate::sources::marketwatch::MarketWatch;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, instrument, warn};

/// Shared handler state.
#[derive(Debug)]
pub struct AppState<F> {
    pub fetcher: F,
    /// Headlines returned per request.
    pub count: usize,
}

/// Build the router with open CORS.
pub fn router<F>(state: Arc<AppState<F>>) -> Router
where
    F: Fetch + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/stock-news/{ticker}", get(stock_news::<F>))
        .layer(cors)
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve<F>(addr: SocketAddr, state: AppState<F>) -> Result<(), NewsError>
where
    F: Fetch + Send + Sync + 'static,
{
    let app = router(Arc::new(state));
    let listener = TcpListener::bind(addr).await?;
    info!("Serving stock news on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}

#[instrument(level = "info", skip(state))]
async fn stock_news<F>(
    State(state): State<Arc<AppState<F>>>,
    Path(ticker): Path<String>,
) -> Json<ApiResponse>
where
    F: Fetch + Send + Sync + 'static,
{
    let items = match fetch_news(&state.fetcher, &MarketWatch, &ticker, state.count).await {
        Ok(items) => items,
        Err(e) => {
            warn!(error = %e, "Error scraping news; answering with an empty list");
            Vec::new()
        }
    };

    Json(ApiResponse::success(
        items.into_iter().map(Headline::from).collect(),
    ))
}
