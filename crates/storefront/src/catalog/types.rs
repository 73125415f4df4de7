//! Catalog API payload types.
//!
//! These mirror the JSON served by the admin catalog API under
//! `/api/v1/end_user/...`. Fields the storefront does not always receive are
//! defaulted so that the listing and detail endpoints share one `Product`.

use nau_core::{BannerId, BrandId, CategoryId, Price, ProductId, VariantId};
use serde::{Deserialize, Serialize};

// =============================================================================
// Envelopes
// =============================================================================

/// Top-level response wrapper: `{ "status": bool, "data": ... }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// Only the banner endpoint sends it; absent means success.
    #[serde(default)]
    pub status: Option<bool>,
    pub data: T,
}

/// Just the `status` flag of an envelope, read before `data` is parsed so a
/// rejection with `"data": null` is still recognised.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct EnvelopeStatus {
    #[serde(default)]
    pub status: Option<bool>,
}

impl EnvelopeStatus {
    /// Whether the API explicitly answered `"status": false`.
    #[must_use]
    pub const fn is_rejected(self) -> bool {
        matches!(self.status, Some(false))
    }
}

/// A list payload: `{ "items": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemList<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

// =============================================================================
// Products
// =============================================================================

/// A product as returned by the listing and detail endpoints.
///
/// `gallery`, `description` and `item_variant` are only sent by the detail
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub thumbnail: String,
    pub price: Price,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub brand: Option<Brand>,
    #[serde(default)]
    pub gallery: Vec<GalleryImage>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "item_variant")]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Find a variant by id.
    #[must_use]
    pub fn variant(&self, id: VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }

    /// The variant selected when the shopper has not picked one.
    #[must_use]
    pub fn default_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }

    /// Thumbnail followed by every gallery image.
    pub fn images(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.thumbnail.as_str())
            .chain(self.gallery.iter().map(|g| g.url.as_str()))
            .filter(|url| !url.is_empty())
    }
}

/// A product category.
///
/// Older payloads send the category as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Named(Category),
    Name(String),
}

impl CategoryRef {
    /// The raw category name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Named(category) => &category.name,
            Self::Name(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: Option<CategoryId>,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    #[serde(default)]
    pub id: Option<BrandId>,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub url: String,
}

/// A purchasable variant of a product (size, colour, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub name: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub price: Price,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub attributes: Vec<VariantAttribute>,
}

impl Variant {
    /// First attribute whose name contains `needle`, case-insensitively.
    #[must_use]
    pub fn attribute(&self, needle: &str) -> Option<&VariantAttribute> {
        let needle = needle.to_lowercase();
        self.attributes
            .iter()
            .find(|a| a.name.to_lowercase().contains(&needle))
    }

    /// The size attribute, if any.
    #[must_use]
    pub fn size(&self) -> Option<&str> {
        self.attribute("size").map(|a| a.value.as_str())
    }

    /// The colour attribute ("màu"), if any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.attribute("màu").map(|a| a.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantAttribute {
    pub name: String,
    pub value: String,
}

// =============================================================================
// Banners
// =============================================================================

/// A home-page banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub id: BannerId,
    pub title: String,
    pub image: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub sort_order: i64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_listing_product_parses() {
        let product: Product = serde_json::from_value(json!({
            "id": 3,
            "name": "Áo khoác",
            "thumbnail": "https://cdn.example.vn/3.jpg",
            "price": 450000,
            "stock": 12,
            "category": {"id": 1, "name": "ao_khoac", "slug": "ao-khoac"},
            "brand": {"id": 2, "name": "Nâu", "logo": "logo.png"}
        }))
        .unwrap();

        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.price, Price::vnd(450_000));
        assert_eq!(product.category.unwrap().name(), "ao_khoac");
        assert!(product.variants.is_empty());
        assert!(product.gallery.is_empty());
    }

    #[test]
    fn test_category_as_bare_string() {
        let product: Product = serde_json::from_value(json!({
            "id": 1, "name": "x", "price": 1, "category": "phu_kien"
        }))
        .unwrap();
        assert_eq!(product.category.unwrap().name(), "phu_kien");
    }

    #[test]
    fn test_detail_product_parses_variants() {
        let product: Product = serde_json::from_value(json!({
            "id": 9,
            "name": "Áo thun",
            "thumbnail": "t.jpg",
            "gallery": [{"url": "g1.jpg"}, {"url": "g2.jpg"}],
            "price": 150000,
            "stock": 30,
            "description": "Cotton 100%",
            "category": {"name": "ao_thun"},
            "brand": {"name": "Nâu"},
            "item_variant": [
                {
                    "id": 91, "name": "Áo thun - Đỏ - M", "thumbnail": null,
                    "price": 160000, "stock": 4,
                    "attributes": [
                        {"name": "Màu sắc", "value": "Đỏ"},
                        {"name": "Size", "value": "M"}
                    ]
                }
            ]
        }))
        .unwrap();

        let variant = product.variant(VariantId::new(91)).unwrap();
        assert_eq!(variant.thumbnail, None);
        assert_eq!(variant.size(), Some("M"));
        assert_eq!(variant.color(), Some("Đỏ"));
        assert_eq!(product.default_variant().unwrap().id, VariantId::new(91));
        assert_eq!(
            product.images().collect::<Vec<_>>(),
            ["t.jpg", "g1.jpg", "g2.jpg"]
        );
    }

    #[test]
    fn test_banner_envelope_parses() {
        let response: ApiResponse<ItemList<Banner>> = serde_json::from_value(json!({
            "status": true,
            "data": {"items": [
                {"id": 1, "title": "Sale", "image": "b.jpg", "link": "/sale", "status": 1, "sort_order": 2}
            ]}
        }))
        .unwrap();

        assert_eq!(response.status, Some(true));
        assert_eq!(response.data.items.len(), 1);
    }

    #[test]
    fn test_envelope_status_ignores_data_shape() {
        let rejected: EnvelopeStatus =
            serde_json::from_value(json!({"status": false, "data": null})).unwrap();
        assert!(rejected.is_rejected());

        let ok: EnvelopeStatus =
            serde_json::from_value(json!({"status": true, "data": {"items": []}})).unwrap();
        assert!(!ok.is_rejected());

        let absent: EnvelopeStatus = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(!absent.is_rejected());

        // The typed parse alone cannot see the rejection
        assert!(serde_json::from_value::<ApiResponse<ItemList<Banner>>>(
            json!({"status": false, "data": null})
        )
        .is_err());
    }

    #[test]
    fn test_missing_items_defaults_to_empty() {
        let response: ApiResponse<ItemList<Product>> =
            serde_json::from_value(json!({"data": {}})).unwrap();
        assert!(response.data.items.is_empty());
        assert_eq!(response.status, None);
    }
}
