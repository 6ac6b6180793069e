//! REST API endpoints for product operations.
//!
//! This module provides CRUD operations on the product catalog. Products are
//! stored verbatim; see the catalog routes for their classification.

use crate::ApiApplication;
use aide::axum::{ApiRouter, routing::get};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use slt_core::{
    models::{ProductData, ProductRecord},
    ports::{CatalogRepository as _, Repository},
};
use std::fmt::Display;
use tracing::{Level, event};

/// Path parameter for product-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct Id<T> {
    /// The unique identifier of the product
    product_id: T,
}

type ProductId<T> = <<T as slt_core::ports::Application>::Repository as Repository>::ProductId;
type Record<T> = ProductRecord<ProductId<T>, ProductData>;

/// Creates a router with product-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get(list_products::<T>).post(create_product::<T>),
            |route| route.tag("product"),
        )
        .api_route_with(
            "/{product_id}",
            get(get_product::<T>)
                .put(update_product::<T>)
                .delete(delete_product::<T>),
            |route| route.tag("product"),
        )
}

/// Log a storage failure and turn it into a terse 500 response.
fn storage_failure(err: impl Display, message: String) -> (StatusCode, String) {
    event!(Level::ERROR, err = err.to_string());
    (StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// List every product in the catalog.
///
/// Products are ordered by expiration date, soonest first.
///
/// # Returns
///
/// - `200 OK`: The product records
/// - `500 Internal Server Error`: Database query failed
async fn list_products<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Json<Vec<Record<T>>>, (StatusCode, String)> {
    app.database()
        .list_products()
        .await
        .map(Json)
        .map_err(|err| storage_failure(err, "failed to list products".to_string()))
}

/// Add a product to the catalog.
///
/// # Request Body
///
/// The product data. The expiration date must be a `YYYY-MM-DD` calendar date
/// and the quantity must be non-negative; anything else is rejected before it
/// reaches the store.
///
/// # Returns
///
/// - `201 Created`: The created record, including its new id
/// - `422 Unprocessable Entity`: The body is not a valid product
/// - `500 Internal Server Error`: Database operation failed
async fn create_product<T: ApiApplication>(
    State(app): State<T>,
    Json(data): Json<ProductData>,
) -> Result<(StatusCode, Json<Record<T>>), (StatusCode, String)> {
    let product_id = app.generate_product_id(&data);

    let record = app
        .database()
        .create_product(product_id.clone(), data)
        .await
        .map_err(|err| storage_failure(err, "failed to create product".to_string()))?;

    event!(Level::INFO, product_id = %product_id, "created product");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Retrieve a single product.
///
/// # Returns
///
/// - `200 OK`: The product record
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database query failed
async fn get_product<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { product_id }): Path<Id<ProductId<T>>>,
) -> Result<Json<Record<T>>, (StatusCode, String)> {
    app.database()
        .get_product(product_id.clone())
        .await
        .map_err(|err| storage_failure(err, format!("failed to get product {}", product_id)))?
        .map(Json)
        .ok_or((
            StatusCode::NOT_FOUND,
            format!("unknown product {}", product_id),
        ))
}

/// Replace the data of an existing product.
///
/// The product keeps its id; every other field takes the value in the body.
///
/// # Returns
///
/// - `200 OK`: The updated record
/// - `404 Not Found`: Product does not exist
/// - `422 Unprocessable Entity`: The body is not a valid product
/// - `500 Internal Server Error`: Database operation failed
async fn update_product<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { product_id }): Path<Id<ProductId<T>>>,
    Json(data): Json<ProductData>,
) -> Result<Json<Record<T>>, (StatusCode, String)> {
    let record = app
        .database()
        .update_product(product_id.clone(), data)
        .await
        .map_err(|err| storage_failure(err, format!("failed to update product {}", product_id)))?
        .ok_or((
            StatusCode::NOT_FOUND,
            format!("unknown product {}", product_id),
        ))?;

    event!(Level::INFO, product_id = %product_id, "updated product");
    Ok(Json(record))
}

/// Remove a product from the catalog.
///
/// # Returns
///
/// - `200 OK`: The record as it was before deletion
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database operation failed
async fn delete_product<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { product_id }): Path<Id<ProductId<T>>>,
) -> Result<Json<Record<T>>, (StatusCode, String)> {
    let record = app
        .database()
        .delete_product(product_id.clone())
        .await
        .map_err(|err| storage_failure(err, format!("failed to delete product {}", product_id)))?
        .ok_or((
            StatusCode::NOT_FOUND,
            format!("unknown product {}", product_id),
        ))?;

    event!(Level::INFO, product_id = %product_id, "deleted product");
    Ok(Json(record))
}
