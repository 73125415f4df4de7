//! Integration tests for the Nâu storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p nau-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart container backed by the file store
//! - `catalog_client` - Catalog client against a local mock API
//!
//! The mock catalog is a small axum app bound to an ephemeral port; tests
//! get a [`CatalogConfig`] pointing at it.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::time::Duration;

use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use nau_storefront::config::CatalogConfig;
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

pub const PRODUCTS_PATH: &str = "/api/v1/end_user/product/form";
pub const PRODUCT_VIEW_PATH: &str = "/api/v1/end_user/product/form/view";
pub const BANNERS_PATH: &str = "/api/v1/end_user/banner/form";

/// Serve `router` on an ephemeral local port.
///
/// The server runs on a background task for the rest of the test.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound.
pub async fn serve(router: Router) -> std::io::Result<CatalogConfig> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    let base_url = Url::parse(&format!("http://{addr}"))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    Ok(CatalogConfig {
        base_url,
        timeout: Duration::from_secs(5),
    })
}

/// A mock catalog serving the fixtures below.
#[must_use]
pub fn catalog_router() -> Router {
    Router::new()
        .route(PRODUCTS_PATH, get(|| async { axum::Json(products_response()) }))
        .route(PRODUCT_VIEW_PATH, get(product_view))
        .route(BANNERS_PATH, get(|| async { axum::Json(banners_response()) }))
}

/// A router answering every catalog path with `status` and `body`.
#[must_use]
pub fn failing_router(status: StatusCode, body: Value) -> Router {
    let respond = move || {
        let body = body.clone();
        async move { (status, axum::Json(body)).into_response() }
    };
    Router::new()
        .route(PRODUCTS_PATH, get(respond.clone()))
        .route(PRODUCT_VIEW_PATH, get(respond.clone()))
        .route(BANNERS_PATH, get(respond))
}

#[derive(Deserialize)]
struct ViewQuery {
    id: i64,
}

async fn product_view(Query(query): Query<ViewQuery>) -> Response {
    axum::Json(json!({
        "status": true,
        "data": product_detail(query.id),
    }))
    .into_response()
}

// =============================================================================
// Fixtures
// =============================================================================

/// Listing of four products; product 1 has variants in its detail view.
#[must_use]
pub fn products_response() -> Value {
    json!({
        "status": true,
        "data": {
            "items": [
                {
                    "id": 1,
                    "name": "Áo thun basic",
                    "thumbnail": "https://cdn.nau.vn/ao-thun.jpg",
                    "price": 150_000,
                    "stock": 20,
                    "category": { "id": 3, "name": "ao_thun_nam", "slug": "ao-thun-nam" }
                },
                {
                    "id": 2,
                    "name": "Quần jean",
                    "thumbnail": "https://cdn.nau.vn/quan-jean.jpg",
                    "price": "420000",
                    "stock": 5,
                    "category": "quan_nam"
                },
                {
                    "id": 3,
                    "name": "Nón lá",
                    "thumbnail": "https://cdn.nau.vn/non-la.jpg",
                    "price": 60_000
                },
                {
                    "id": 4,
                    "name": "Túi vải",
                    "thumbnail": "https://cdn.nau.vn/tui-vai.jpg",
                    "price": 90_000,
                    "stock": 0
                }
            ]
        }
    })
}

/// Detail payload for `id`, or `null` when the product does not exist.
#[must_use]
pub fn product_detail(id: i64) -> Value {
    match id {
        1 => json!({
            "id": 1,
            "name": "Áo thun basic",
            "thumbnail": "https://cdn.nau.vn/ao-thun.jpg",
            "price": 150_000,
            "stock": 20,
            "category": { "id": 3, "name": "ao_thun_nam", "slug": "ao-thun-nam" },
            "brand": { "id": 1, "name": "Nâu", "logo": null },
            "description": "Cotton 100%",
            "gallery": [
                { "url": "https://cdn.nau.vn/ao-thun-1.jpg" },
                { "url": "https://cdn.nau.vn/ao-thun-2.jpg" }
            ],
            "item_variant": [
                {
                    "id": 11,
                    "name": "Áo thun basic - Trắng - M",
                    "thumbnail": "https://cdn.nau.vn/ao-thun-trang.jpg",
                    "price": 150_000,
                    "stock": 4,
                    "attributes": [
                        { "name": "Màu", "value": "Trắng" },
                        { "name": "Size", "value": "M" }
                    ]
                },
                {
                    "id": 12,
                    "name": "Áo thun basic - Đen - L",
                    "thumbnail": null,
                    "price": 0,
                    "stock": 0,
                    "attributes": [
                        { "name": "Màu", "value": "Đen" },
                        { "name": "Size", "value": "L" }
                    ]
                }
            ]
        }),
        2 => json!({
            "id": 2,
            "name": "Quần jean",
            "thumbnail": "https://cdn.nau.vn/quan-jean.jpg",
            "price": 420_000,
            "stock": 5,
            "category": "quan_nam"
        }),
        _ => Value::Null,
    }
}

/// Three banners, out of display order.
#[must_use]
pub fn banners_response() -> Value {
    json!({
        "status": true,
        "data": {
            "items": [
                { "id": 1, "title": "Sale hè", "image": "https://cdn.nau.vn/he.jpg", "link": "/sale", "status": 1, "sort_order": 3 },
                { "id": 2, "title": "Bộ sưu tập mới", "image": "https://cdn.nau.vn/moi.jpg", "link": "/new", "status": 1, "sort_order": 1 },
                { "id": 3, "title": "Phụ kiện", "image": "https://cdn.nau.vn/pk.jpg", "link": "/pk", "status": 1, "sort_order": 2 }
            ]
        }
    })
}
