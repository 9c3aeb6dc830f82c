//! Cart commands.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use thiserror::Error;

use lumizo_core::{LineId, PriceSet, PriceType, ProductId};
use lumizo_storefront::models::cart::{CartLineDraft, CatalogSnapshot};
use lumizo_storefront::state::AppState;

/// Errors from cart command argument handling.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// A `--variant` flag was not of the form `axis=value`.
    #[error("invalid variant '{0}': expected axis=value")]
    InvalidVariant(String),
}

/// Arguments of `cart add`, collected from the command line.
pub struct AddRequest {
    pub product_id: String,
    pub name: String,
    pub qty: u32,
    pub variants: Vec<String>,
    pub price: Option<Decimal>,
    pub mrp: Option<Decimal>,
    pub discounted_price: Option<Decimal>,
    pub minimum_price: Option<Decimal>,
    pub price_type: String,
    pub brand: Option<String>,
    pub brand_image: Option<String>,
    pub category: Option<String>,
}

/// Add a product selection to the cart.
///
/// # Errors
///
/// Returns an error if a `--variant` flag is malformed.
#[allow(clippy::print_stdout)]
pub fn add(state: &mut AppState, request: AddRequest) -> Result<(), CartCommandError> {
    let selected_variants = parse_variants(&request.variants)?;

    let draft = CartLineDraft {
        product_id: ProductId::from(request.product_id),
        name: request.name,
        price_fields: PriceSet {
            price: request.price,
            mrp: request.mrp,
            discounted_price: request.discounted_price,
            minimum_price: request.minimum_price,
        },
        active_price_type: PriceType::from(request.price_type),
        quantity: request.qty,
        selected_variants,
        brand: request.brand.map(|name| CatalogSnapshot {
            name,
            image: request.brand_image,
        }),
        category: request.category.map(|name| CatalogSnapshot {
            name,
            image: None,
        }),
    };

    let id = state.cart_mut().add_line(draft);
    let cart = state.cart();
    println!("Added line {id}");
    println!(
        "{} item(s), total {}",
        cart.item_count(),
        format_total(cart.total())
    );
    Ok(())
}

/// Remove a line by its identity key.
#[allow(clippy::print_stdout)]
pub fn remove(state: &mut AppState, line_id: &str) {
    state
        .cart_mut()
        .remove_line(&LineId::from(line_id.to_owned()));
    println!("{} item(s) remaining", state.cart().item_count());
}

/// Replace a line's quantity; zero or less removes it.
#[allow(clippy::print_stdout)]
pub fn set_quantity(state: &mut AppState, line_id: &str, quantity: i64) {
    state
        .cart_mut()
        .set_quantity(&LineId::from(line_id.to_owned()), quantity);
    println!("{} item(s) in cart", state.cart().item_count());
}

/// List the cart lines.
#[allow(clippy::print_stdout)]
pub fn list(state: &AppState) {
    let cart = state.cart();
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }

    for line in cart.lines() {
        let unit = line.price_fields.display(line.active_price_type);
        println!(
            "{}  {} x{}  {} each  added {}",
            line.id,
            line.name,
            line.quantity,
            unit,
            line.added_at.format("%Y-%m-%d %H:%M"),
        );
    }
    println!(
        "{} item(s), total {}",
        cart.item_count(),
        format_total(cart.total())
    );
}

/// Print the cart total.
#[allow(clippy::print_stdout)]
pub fn total(state: &AppState) {
    println!("{}", format_total(state.cart().total()));
}

/// Empty the cart.
#[allow(clippy::print_stdout)]
pub fn clear(state: &mut AppState) {
    state.cart_mut().clear();
    println!("Cart cleared");
}

fn parse_variants(raw: &[String]) -> Result<BTreeMap<String, String>, CartCommandError> {
    let mut variants = BTreeMap::new();
    for entry in raw {
        let (axis, value) = entry
            .split_once('=')
            .ok_or_else(|| CartCommandError::InvalidVariant(entry.clone()))?;
        variants.insert(axis.to_owned(), value.to_owned());
    }
    Ok(variants)
}

fn format_total(total: Decimal) -> String {
    format!("${total:.2}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        let parsed = parse_variants(&["color=red".to_owned(), "size=m".to_owned()]).unwrap();
        assert_eq!(parsed.get("color").map(String::as_str), Some("red"));
        assert_eq!(parsed.get("size").map(String::as_str), Some("m"));
    }

    #[test]
    fn test_parse_variants_rejects_missing_separator() {
        assert!(parse_variants(&["colorred".to_owned()]).is_err());
    }

    #[test]
    fn test_format_total() {
        assert_eq!(format_total("300".parse().unwrap()), "$300.00");
    }
}
