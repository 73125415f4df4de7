//! Cart commands.
//!
//! The cart container accepts any quantity; the checks a shopper expects
//! (at least one, no more than the stock snapshot) are applied here before
//! the container is touched.

use std::fmt::Write as _;

use nau_core::{LineItemId, ProductId, VariantId};
use nau_storefront::cart::{Cart, Persistence, SlotStore};
use nau_storefront::catalog::conversions::line_item;
use nau_storefront::catalog::{CatalogClient, Product};
use nau_storefront::error::{Result, StorefrontError};
use nau_storefront::view::CartView;
use tracing::{info, instrument};

const NOT_SAVED_NOTICE: &str = "Warning: the cart could not be saved and will be lost on exit.";

/// Check a requested quantity against the line's stock snapshot.
///
/// A stock of zero means the catalog did not report one, so only the lower
/// bound applies.
///
/// # Errors
///
/// Returns `InvalidInput` if `quantity` is below 1 or above `stock`.
pub fn validate_quantity(quantity: i64, stock: u32) -> Result<i64> {
    if quantity < 1 {
        return Err(StorefrontError::InvalidInput(format!(
            "quantity must be at least 1, got {quantity}"
        )));
    }
    if stock != 0 && quantity > i64::from(stock) {
        return Err(StorefrontError::InvalidInput(format!(
            "quantity {quantity} exceeds the {stock} in stock"
        )));
    }
    Ok(quantity)
}

/// Render the cart.
pub fn show<S: SlotStore>(cart: &Cart<S>) -> String {
    CartView::from(cart.state()).to_string()
}

/// Fetch a product and add it to the cart.
///
/// # Errors
///
/// Returns an error if the catalog request fails, the variant does not
/// belong to the product, or the quantity is invalid.
#[instrument(skip(cart, client))]
pub async fn add<S: SlotStore>(
    cart: &mut Cart<S>,
    client: &CatalogClient,
    product_id: ProductId,
    variant: Option<VariantId>,
    quantity: i64,
) -> Result<String> {
    let product = client.get_product(product_id).await?;
    add_product(cart, &product, variant, quantity)
}

/// Add `product` (or one of its variants) to the cart.
///
/// Without an explicit variant the product's first variant is used. The
/// quantity already in the cart counts towards the stock limit.
///
/// # Errors
///
/// Returns `NotFound` for an unknown variant and `InvalidInput` for an
/// invalid quantity.
pub fn add_product<S: SlotStore>(
    cart: &mut Cart<S>,
    product: &Product,
    variant: Option<VariantId>,
    quantity: i64,
) -> Result<String> {
    let selected = match variant {
        Some(id) => Some(product.variant(id).ok_or_else(|| {
            StorefrontError::NotFound(format!("variant {id} of product {}", product.id))
        })?),
        None => product.default_variant(),
    };

    let line = line_item(product, selected, quantity);
    validate_quantity(quantity, line.stock)?;

    let in_cart = cart.get(&line.id).map_or(0, |existing| existing.quantity);
    validate_quantity(in_cart.saturating_add(quantity), line.stock)?;

    let mut output = format!("Added {quantity} x {}\n", line.title);
    info!(line_id = %line.id, quantity, "Adding to cart");
    let persistence = cart.add_line_item(line);

    finish(&mut output, cart, &persistence);
    Ok(output)
}

/// Set the quantity of an existing cart line.
///
/// # Errors
///
/// Returns `NotFound` if the line is not in the cart and `InvalidInput` for
/// an invalid quantity.
pub fn update<S: SlotStore>(cart: &mut Cart<S>, id: &LineItemId, quantity: i64) -> Result<String> {
    let line = cart
        .get(id)
        .ok_or_else(|| StorefrontError::NotFound(format!("cart line {id}")))?;
    validate_quantity(quantity, line.stock)?;

    let mut output = format!("Updated {} to {quantity}\n", line.title);
    let persistence = cart.update_quantity(id, quantity);

    finish(&mut output, cart, &persistence);
    Ok(output)
}

/// Remove a cart line.
///
/// # Errors
///
/// Returns `NotFound` if the line is not in the cart.
pub fn remove<S: SlotStore>(cart: &mut Cart<S>, id: &LineItemId) -> Result<String> {
    let line = cart
        .get(id)
        .ok_or_else(|| StorefrontError::NotFound(format!("cart line {id}")))?;

    let mut output = format!("Removed {}\n", line.title);
    let persistence = cart.remove_line_item(id);

    finish(&mut output, cart, &persistence);
    Ok(output)
}

/// Empty the cart and its persistent slot.
pub fn clear<S: SlotStore>(cart: &mut Cart<S>) -> String {
    let mut output = String::from("Cart cleared\n");
    if !cart.clear().is_saved() {
        output.push_str(NOT_SAVED_NOTICE);
        output.push('\n');
    }
    output
}

fn finish<S: SlotStore>(output: &mut String, cart: &Cart<S>, persistence: &Persistence) {
    if !persistence.is_saved() {
        output.push_str(NOT_SAVED_NOTICE);
        output.push('\n');
    }
    let _ = write!(output, "\n{}", CartView::from(cart.state()));
}
