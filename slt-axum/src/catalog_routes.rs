//! REST API endpoint for the classified catalog.
//!
//! This is what a presentation layer renders: every product with its days
//! remaining and urgency bucket, plus the bucket counts and the warning list.

use crate::ApiApplication;
use aide::axum::{ApiRouter, routing::get};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use slt_core::{models::parse_date, ports::Report};
use tracing::{Level, event};

/// Query parameters for the classified catalog.
#[derive(serde::Deserialize, schemars::JsonSchema)]
struct CatalogQuery {
    /// The reference date as `YYYY-MM-DD`; defaults to today
    #[serde(default)]
    as_of: Option<String>,
}

/// Creates a router with the catalog endpoint.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new().api_route_with("/", get(get_catalog::<T>), |route| route.tag("catalog"))
}

/// Classify the whole catalog relative to a reference date.
///
/// Products keep the catalog order (soonest expiration first). Each carries
/// its days remaining, urgency bucket and warning, if any. The summary counts
/// the products in every bucket and lists the warnings in the same order.
///
/// # Returns
///
/// - `200 OK`: The classified catalog
/// - `400 Bad Request`: `as_of` is not a `YYYY-MM-DD` date
/// - `500 Internal Server Error`: Database query failed
async fn get_catalog<T: ApiApplication>(
    State(app): State<T>,
    Query(CatalogQuery { as_of }): Query<CatalogQuery>,
) -> Result<Json<Report<T>>, (StatusCode, String)> {
    let reference_date = match as_of {
        Some(text) => parse_date(&text).map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?,
        None => app.today(),
    };

    let report = app.report(reference_date).await.map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to read catalog".to_string(),
        )
    })?;

    event!(
        Level::DEBUG,
        reference_date = %reference_date,
        products = report.products.len(),
        warnings = report.summary.warnings.len(),
        "classified catalog"
    );
    Ok(Json(report))
}
