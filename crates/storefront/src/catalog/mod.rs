//! Admin catalog API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP via `reqwest`; the catalog is the source of truth
//!   and nothing is cached locally
//! - Responses are wrapped as `{ "status"?: bool, "data": ... }`
//! - [`conversions`] turns catalog products into cart lines
//!
//! # Endpoints
//!
//! ```text
//! GET /api/v1/end_user/product/form           - Product listing
//! GET /api/v1/end_user/product/form/view?id=  - Product detail with variants
//! GET /api/v1/end_user/banner/form            - Home-page banners
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use nau_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(config.catalog()?)?;
//! let product = client.get_product(ProductId::new(9)).await?;
//! let line = conversions::line_item(&product, product.default_variant(), 1);
//! ```

pub mod conversions;
pub mod types;

use std::sync::Arc;

use nau_core::ProductId;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogConfig;

pub use types::{
    ApiResponse, Banner, Brand, Category, CategoryRef, EnvelopeStatus, GalleryImage, ItemList,
    Product, Variant, VariantAttribute,
};

const PRODUCTS_PATH: &str = "api/v1/end_user/product/form";
const PRODUCT_VIEW_PATH: &str = "api/v1/end_user/product/form/view";
const BANNERS_PATH: &str = "api/v1/end_user/banner/form";

/// Longest slice of a response body kept in logs and errors.
const BODY_PREVIEW_CHARS: usize = 200;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Catalog API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The API answered `"status": false`.
    #[error("Catalog API rejected the request for {0}")]
    Rejected(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Endpoint URL could not be built.
    #[error("Invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the admin catalog API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        // Url::join drops the last path segment unless it ends in '/'
        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            inner: Arc::new(CatalogClientInner { client, base_url }),
        })
    }

    /// The base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// GET `path` and unwrap the response envelope.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>, CatalogError> {
        let mut url = self.inner.base_url.join(path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        let response = self
            .inner
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_string()));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %preview(&body),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        let envelope: EnvelopeStatus =
            serde_json::from_str(&body).map_err(|e| log_parse_error(e, &body))?;
        if envelope.is_rejected() {
            tracing::warn!(path, "Catalog API answered status false");
            return Err(CatalogError::Rejected(path.to_string()));
        }

        serde_json::from_str(&body).map_err(|e| log_parse_error(e, &body))
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get the product listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self.get::<ItemList<Product>>(PRODUCTS_PATH, &[]).await?;
        debug!(count = response.data.items.len(), "Fetched products");
        Ok(response.data.items)
    }

    /// Get one product with its gallery and variants.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product does not exist, or an error if the
    /// API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let response = self
            .get::<Option<Product>>(PRODUCT_VIEW_PATH, &[("id", id.to_string())])
            .await
            .map_err(|e| match e {
                CatalogError::NotFound(_) => CatalogError::NotFound(format!("product {id}")),
                other => other,
            })?;

        response
            .data
            .ok_or_else(|| CatalogError::NotFound(format!("product {id}")))
    }

    // =========================================================================
    // Banner Methods
    // =========================================================================

    /// Get the home-page banners in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or answers `status: false`.
    #[instrument(skip(self))]
    pub async fn get_banners(&self) -> Result<Vec<Banner>, CatalogError> {
        let response = self.get::<ItemList<Banner>>(BANNERS_PATH, &[]).await?;
        debug!(count = response.data.items.len(), "Fetched banners");
        Ok(conversions::sorted_banners(response.data.items))
    }
}

fn log_parse_error(e: serde_json::Error, body: &str) -> CatalogError {
    tracing::error!(
        error = %e,
        body = %preview(body),
        "Failed to parse catalog API response"
    );
    CatalogError::Parse(e)
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
