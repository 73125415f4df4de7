//! Catalog browsing commands.

use nau_core::ProductId;
use nau_storefront::catalog::CatalogClient;
use nau_storefront::error::Result;
use nau_storefront::view::{BannerListView, ProductDetailView, ProductListView};
use tracing::{info, instrument};

/// List every product in the catalog.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
pub async fn products(client: &CatalogClient) -> Result<String> {
    let products = client.get_products().await?;
    info!(count = products.len(), "Listed products");
    Ok(ProductListView::from(products.as_slice()).to_string())
}

/// Show one product with its default variant selected.
///
/// The similar-products row comes from the product listing.
///
/// # Errors
///
/// Returns an error if either catalog request fails.
#[instrument(skip(client))]
pub async fn product(client: &CatalogClient, id: ProductId) -> Result<String> {
    let (product, listing) = tokio::try_join!(client.get_product(id), client.get_products())?;
    let view = ProductDetailView::new(&product, product.default_variant(), &listing);
    Ok(view.to_string())
}

/// List banners in display order.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
pub async fn banners(client: &CatalogClient) -> Result<String> {
    let banners = client.get_banners().await?;
    Ok(BannerListView::from(banners.as_slice()).to_string())
}
