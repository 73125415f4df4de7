//! Display data for the terminal storefront.
//!
//! Each view is built from domain or catalog types and implements
//! `Display`, so the CLI only has to write it to stdout. Prices are rendered
//! as Vietnamese dong via `Price`'s `Display`.

use std::fmt;

use nau_core::{CartState, LineItem};

use crate::catalog::conversions::{category_display, featured_banner, similar_products};
use crate::catalog::{Banner, Product, Variant};

// =============================================================================
// Cart
// =============================================================================

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub quantity: i64,
    pub stock: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: i64,
}

impl From<&CartState> for CartView {
    fn from(cart: &CartState) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: cart.subtotal().to_string(),
            item_count: cart.item_count(),
        }
    }
}

impl From<&LineItem> for CartItemView {
    fn from(line: &LineItem) -> Self {
        Self {
            id: line.id.to_string(),
            title: line.title.clone(),
            category: line.category.clone(),
            quantity: line.quantity,
            stock: line.stock,
            price: line.price.to_string(),
            line_price: line.line_total().to_string(),
        }
    }
}

impl fmt::Display for CartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return writeln!(f, "Your cart is empty.");
        }

        for item in &self.items {
            writeln!(f, "[{}] {}", item.id, item.title)?;
            if !item.category.is_empty() {
                writeln!(f, "    {}", item.category)?;
            }
            writeln!(
                f,
                "    {} x {} = {}",
                item.quantity, item.price, item.line_price
            )?;
        }
        writeln!(f, "Items: {}", self.item_count)?;
        writeln!(f, "Subtotal: {}", self.subtotal)
    }
}

// =============================================================================
// Products
// =============================================================================

/// Product card in a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub price: String,
    pub stock: u32,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.name.clone(),
            category: category_display(product.category.as_ref()),
            price: product.price.to_string(),
            stock: product.stock,
        }
    }
}

impl fmt::Display for ProductCardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} | {}", self.id, self.title, self.price)?;
        if !self.category.is_empty() {
            write!(f, " | {}", self.category)?;
        }
        if self.stock == 0 {
            write!(f, " | out of stock")
        } else {
            write!(f, " | {} in stock", self.stock)
        }
    }
}

/// Product listing display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListView {
    pub products: Vec<ProductCardView>,
}

impl From<&[Product]> for ProductListView {
    fn from(products: &[Product]) -> Self {
        Self {
            products: products.iter().map(ProductCardView::from).collect(),
        }
    }
}

impl fmt::Display for ProductListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.products.is_empty() {
            return writeln!(f, "No products.");
        }
        for card in &self.products {
            writeln!(f, "{card}")?;
        }
        Ok(())
    }
}

/// Variant option on the product page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub stock: u32,
    pub size: Option<String>,
    pub color: Option<String>,
    pub selected: bool,
}

impl VariantView {
    fn new(variant: &Variant, product: &Product, selected: bool) -> Self {
        let price = if variant.price.is_zero() {
            product.price
        } else {
            variant.price
        };
        Self {
            id: variant.id.to_string(),
            name: variant.name.clone(),
            price: price.to_string(),
            stock: variant.stock,
            size: variant.size().map(str::to_string),
            color: variant.color().map(str::to_string),
            selected,
        }
    }
}

/// Single product page display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetailView {
    pub id: String,
    pub title: String,
    pub category: String,
    /// Price of the selected variant, or of the product
    pub price: String,
    pub variants: Vec<VariantView>,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub similar: Vec<ProductCardView>,
}

impl ProductDetailView {
    /// Build the page for `product` with `selected` highlighted.
    ///
    /// `listing` supplies the "Similar Products" row.
    #[must_use]
    pub fn new(product: &Product, selected: Option<&Variant>, listing: &[Product]) -> Self {
        let price = selected
            .map(|v| v.price)
            .filter(|p| !p.is_zero())
            .unwrap_or(product.price);

        Self {
            id: product.id.to_string(),
            title: product.name.clone(),
            category: category_display(product.category.as_ref()),
            price: price.to_string(),
            variants: product
                .variants
                .iter()
                .map(|v| VariantView::new(v, product, selected.is_some_and(|s| s.id == v.id)))
                .collect(),
            description: product.description.clone().filter(|d| !d.is_empty()),
            images: product.images().map(str::to_string).collect(),
            similar: similar_products(listing)
                .iter()
                .map(ProductCardView::from)
                .collect(),
        }
    }
}

impl fmt::Display for ProductDetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (#{})", self.title, self.id)?;
        if !self.category.is_empty() {
            writeln!(f, "{}", self.category)?;
        }
        writeln!(f, "{}", self.price)?;

        if !self.variants.is_empty() {
            writeln!(f)?;
            writeln!(f, "Variants:")?;
            for variant in &self.variants {
                let marker = if variant.selected { '*' } else { ' ' };
                write!(
                    f,
                    " {marker} [{}] {} | {} | {} in stock",
                    variant.id, variant.name, variant.price, variant.stock
                )?;
                if let Some(size) = &variant.size {
                    write!(f, " | size {size}")?;
                }
                if let Some(color) = &variant.color {
                    write!(f, " | màu {color}")?;
                }
                writeln!(f)?;
            }
        }

        if let Some(description) = &self.description {
            writeln!(f)?;
            writeln!(f, "Description:")?;
            writeln!(f, "{description}")?;
        }

        if !self.images.is_empty() {
            writeln!(f)?;
            writeln!(f, "Images:")?;
            for image in &self.images {
                writeln!(f, "  {image}")?;
            }
        }

        if !self.similar.is_empty() {
            writeln!(f)?;
            writeln!(f, "Similar Products:")?;
            for card in &self.similar {
                writeln!(f, "  {card}")?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Banners
// =============================================================================

/// One banner row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerView {
    pub title: String,
    pub image: String,
    pub link: String,
    pub featured: bool,
}

/// Banner carousel display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerListView {
    pub banners: Vec<BannerView>,
}

impl From<&[Banner]> for BannerListView {
    /// Banners keep their given order; the featured one is flagged.
    fn from(banners: &[Banner]) -> Self {
        let featured_id = featured_banner(banners).map(|b| b.id);
        Self {
            banners: banners
                .iter()
                .map(|b| BannerView {
                    title: b.title.clone(),
                    image: b.image.clone(),
                    link: b.link.clone(),
                    featured: Some(b.id) == featured_id,
                })
                .collect(),
        }
    }
}

impl fmt::Display for BannerListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.banners.is_empty() {
            return writeln!(f, "No banners.");
        }
        for banner in &self.banners {
            let marker = if banner.featured { '*' } else { ' ' };
            writeln!(f, "{marker} {} -> {}", banner.title, banner.link)?;
            writeln!(f, "    {}", banner.image)?;
        }
        Ok(())
    }
}
