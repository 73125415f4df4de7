//! Cart line items.

use serde::{Deserialize, Serialize};

use super::id::LineItemId;
use super::price::Price;

/// One product (or product variant) placed in the cart.
///
/// `title`, `image` and `category` are display-only. `stock` is the
/// availability reported by the catalog when the line was added; it is not
/// kept in sync afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub title: String,
    pub image: String,
    pub category: String,
    pub price: Price,
    /// Units in the cart. The cart itself does not reject zero or negative
    /// values; callers validate before dispatching.
    pub quantity: i64,
    pub stock: u32,
}

impl LineItem {
    /// `price × quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item = LineItem {
            id: LineItemId::new("1"),
            title: "Áo thun".to_string(),
            image: "https://cdn.example.vn/ao.jpg".to_string(),
            category: "ao thun".to_string(),
            price: Price::vnd(100_000),
            quantity: 3,
            stock: 10,
        };
        assert_eq!(item.line_total(), Price::vnd(300_000));
    }

    #[test]
    fn test_snapshot_field_names() {
        let json = serde_json::json!({
            "id": 12,
            "title": "Quần jean",
            "image": "q.jpg",
            "category": "quan",
            "price": 350000,
            "quantity": 1,
            "stock": 4
        });
        let item: LineItem = serde_json::from_value(json).unwrap();
        assert_eq!(item.id.as_str(), "12");
        assert_eq!(item.price, Price::vnd(350_000));

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["id"], "12");
        assert_eq!(back["quantity"], 1);
    }
}
