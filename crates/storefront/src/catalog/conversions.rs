//! Normalization of catalog data into cart and display shapes.

use nau_core::{LineItem, LineItemId};

use super::types::{Banner, CategoryRef, Product, Variant};

/// Number of products shown under "Similar Products".
pub const SIMILAR_PRODUCT_COUNT: usize = 3;

/// Display form of a category slug: underscores become spaces.
#[must_use]
pub fn format_category_name(name: &str) -> String {
    name.replace('_', " ")
}

/// Display form of an optional category; missing categories render empty.
#[must_use]
pub fn category_display(category: Option<&CategoryRef>) -> String {
    category
        .map(|c| format_category_name(c.name()))
        .unwrap_or_default()
}

/// Build the cart line for `product`, or for `variant` of it when one is
/// selected.
///
/// The variant's id, name and thumbnail win when present. Its price and
/// stock win only when non-zero; a zero falls back to the product's value.
#[must_use]
pub fn line_item(product: &Product, variant: Option<&Variant>, quantity: i64) -> LineItem {
    let id = variant.map_or_else(|| LineItemId::from(product.id), |v| LineItemId::from(v.id));

    let image = variant
        .and_then(|v| v.thumbnail.as_deref())
        .filter(|thumb| !thumb.is_empty())
        .unwrap_or(product.thumbnail.as_str())
        .to_string();

    let title = variant.map_or_else(|| product.name.clone(), |v| v.name.clone());

    let price = variant
        .map(|v| v.price)
        .filter(|price| !price.is_zero())
        .unwrap_or(product.price);

    let stock = variant
        .map(|v| v.stock)
        .filter(|stock| *stock != 0)
        .unwrap_or(product.stock);

    LineItem {
        id,
        title,
        image,
        category: category_display(product.category.as_ref()),
        price,
        quantity,
        stock,
    }
}

/// Banners in display order (ascending `sort_order`, stable on ties).
#[must_use]
pub fn sorted_banners(mut banners: Vec<Banner>) -> Vec<Banner> {
    banners.sort_by_key(|b| b.sort_order);
    banners
}

/// The banner shown in the hero slot: smallest `sort_order`, first on ties.
#[must_use]
pub fn featured_banner(banners: &[Banner]) -> Option<&Banner> {
    banners.iter().min_by_key(|b| b.sort_order)
}

/// Products listed under "Similar Products" on a product page.
#[must_use]
pub fn similar_products(products: &[Product]) -> &[Product] {
    products
        .get(..SIMILAR_PRODUCT_COUNT)
        .unwrap_or(products)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nau_core::{BannerId, Price, ProductId, VariantId};

    use super::super::types::Category;
    use super::*;

    fn product() -> Product {
        Product {
            id: ProductId::new(10),
            name: "Áo thun basic".to_string(),
            thumbnail: "product.jpg".to_string(),
            price: Price::vnd(150_000),
            stock: 25,
            category: Some(CategoryRef::Named(Category {
                id: None,
                name: "ao_thun_nam".to_string(),
                slug: None,
            })),
            brand: None,
            gallery: Vec::new(),
            description: None,
            variants: Vec::new(),
        }
    }

    fn variant() -> Variant {
        Variant {
            id: VariantId::new(101),
            name: "Áo thun basic - Trắng - L".to_string(),
            thumbnail: Some("variant.jpg".to_string()),
            price: Price::vnd(170_000),
            stock: 3,
            attributes: Vec::new(),
        }
    }

    fn banner(id: i64, sort_order: i64) -> Banner {
        Banner {
            id: BannerId::new(id),
            title: format!("Banner {id}"),
            image: format!("{id}.jpg"),
            link: "/".to_string(),
            status: 1,
            sort_order,
        }
    }

    #[test]
    fn test_format_category_name() {
        assert_eq!(format_category_name("ao_thun_nam"), "ao thun nam");
        assert_eq!(format_category_name("phu kien"), "phu kien");
        assert_eq!(category_display(None), "");
        assert_eq!(
            category_display(Some(&CategoryRef::Name("giay_dep".to_string()))),
            "giay dep"
        );
    }

    #[test]
    fn test_line_item_without_variant() {
        let line = line_item(&product(), None, 2);
        assert_eq!(line.id, LineItemId::new("10"));
        assert_eq!(line.title, "Áo thun basic");
        assert_eq!(line.image, "product.jpg");
        assert_eq!(line.category, "ao thun nam");
        assert_eq!(line.price, Price::vnd(150_000));
        assert_eq!(line.quantity, 2);
        assert_eq!(line.stock, 25);
    }

    #[test]
    fn test_line_item_with_variant() {
        let line = line_item(&product(), Some(&variant()), 1);
        assert_eq!(line.id, LineItemId::new("101"));
        assert_eq!(line.title, "Áo thun basic - Trắng - L");
        assert_eq!(line.image, "variant.jpg");
        assert_eq!(line.category, "ao thun nam");
        assert_eq!(line.price, Price::vnd(170_000));
        assert_eq!(line.stock, 3);
    }

    #[test]
    fn test_line_item_variant_falls_back_on_empty_fields() {
        let mut v = variant();
        v.thumbnail = None;
        v.price = Price::ZERO;
        v.stock = 0;

        let line = line_item(&product(), Some(&v), 1);
        assert_eq!(line.id, LineItemId::new("101"));
        assert_eq!(line.image, "product.jpg");
        assert_eq!(line.price, Price::vnd(150_000));
        assert_eq!(line.stock, 25);

        v.thumbnail = Some(String::new());
        assert_eq!(line_item(&product(), Some(&v), 1).image, "product.jpg");
    }

    #[test]
    fn test_featured_banner_is_lowest_sort_order() {
        let banners = vec![banner(1, 5), banner(2, 1), banner(3, 1), banner(4, 9)];
        assert_eq!(featured_banner(&banners).unwrap().id, BannerId::new(2));
        assert!(featured_banner(&[]).is_none());
    }

    #[test]
    fn test_sorted_banners_is_stable() {
        let sorted = sorted_banners(vec![banner(1, 5), banner(2, 1), banner(3, 1)]);
        let ids: Vec<_> = sorted.iter().map(|b| b.id.as_i64()).collect();
        assert_eq!(ids, [2, 3, 1]);
    }

    #[test]
    fn test_similar_products_takes_first_three() {
        let products: Vec<_> = (1..=5)
            .map(|i| Product {
                id: ProductId::new(i),
                ..product()
            })
            .collect();
        let similar = similar_products(&products);
        assert_eq!(similar.len(), 3);
        assert_eq!(similar.first().unwrap().id, ProductId::new(1));

        assert_eq!(similar_products(products.get(..2).unwrap()).len(), 2);
        assert!(similar_products(&[]).is_empty());
    }
}
