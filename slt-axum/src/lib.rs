#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the slt-axum crate.
//! [slt_core]: https://docs.rs/slt_core/latest/slt_core/index.html
//! [slt_axum]: https://docs.rs/slt_axum/latest/slt_axum/index.html
//! [slt_sqlite]: https://docs.rs/slt_sqlite/latest/slt_sqlite/index.html
#![doc = include_str!("../README.md")]

mod catalog_routes;
mod product_routes;

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
};
use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use slt_core::ports::{Application, Repository};
use std::{fmt::Display, sync::Arc};
use tower_http::cors::CorsLayer;

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Construct the API router together with the OpenAPI document describing it
pub fn build<T: ApiApplication>(state: T, config: AxumConfig) -> (axum::Router, Arc<OpenApi>) {
    let mut api = OpenApi::default();
    let permissive_cors = config.permissive_cors;

    let router = ApiRouter::new()
        .api_route("/health", get(health_check))
        .nest("/product", product_routes::router())
        .nest("/catalog", catalog_routes::router())
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs);

    let api = Arc::new(api);
    let router = router
        .layer(Extension(api.clone())) // Arc is very important here or you will face massive memory and performance issues
        .layer(Extension(Arc::new(config)))
        .with_state(state);

    if permissive_cors {
        (router.layer(CorsLayer::permissive()), api)
    } else {
        (router, api)
    }
}

/// Construct a full API router with the given state and config
pub fn router<T: ApiApplication>(state: T, config: AxumConfig) -> axum::Router {
    build(state, config).0
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening for requests on {}", listener.local_addr()?);

    let service = router(app, config);
    axum::serve(listener, service).await
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies it all upfront and
/// in one place. If a function takes a generic `T: ApiApplication`, then
/// everything one might reasonably want to do should work.
pub trait ApiApplication:
    Clone
    + Send
    + Sync
    + 'static
    + Application<
        Repository: Clone
                        + Send
                        + Sync
                        + 'static
                        + Repository<
            ProductId: Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
        >,
    >
{
}

// this is the blanket implementation
impl<T: Clone + Send + Sync + 'static> ApiApplication for T where
    T: Application<
            Repository: Clone
                            + Send
                            + Sync
                            + 'static
                            + Repository<
                ProductId: Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
            >,
        >
{
}
