//! Cart line types.
//!
//! A cart line denormalizes the catalog data it was added with: name,
//! price fields, and optional brand/category snapshots are captured at
//! add-time and intentionally NOT kept in sync with later catalog edits,
//! so historical cart entries survive brand or product changes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lumizo_core::{LineId, PriceSet, PriceType, ProductId};

/// Denormalized brand or category data captured when a line is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    /// Display name at add-time.
    pub name: String,
    /// Image URL at add-time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A line in the cart.
///
/// Identified by a [`LineId`] derived from the product and its selected
/// variants; at most one line exists per identity key. Serialized
/// camelCase with `addedAt` as an ISO-8601 string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Identity key (product + sorted variant selection).
    pub id: LineId,
    /// Catalog product this line was added from.
    pub product_id: ProductId,
    /// Product name at add-time.
    pub name: String,
    /// Price fields at add-time.
    pub price_fields: PriceSet,
    /// Which price field this line is sold at.
    pub active_price_type: PriceType,
    /// Number of units. Always positive; reduce-to-zero removes the line.
    pub quantity: u32,
    /// Selected variant values keyed by axis (e.g., `color` -> `red`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selected_variants: BTreeMap<String, String>,
    /// Brand snapshot at add-time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<CatalogSnapshot>,
    /// Category snapshot at add-time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CatalogSnapshot>,
    /// When the line was first added.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// The unit price this line is sold at, after fallback resolution.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.price_fields.resolve(self.active_price_type)
    }

    /// Line subtotal: effective unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.effective_price() * Decimal::from(self.quantity)
    }
}

/// A candidate cart line: everything the caller supplies when adding.
///
/// The store derives the identity key and stamps `added_at` itself.
#[derive(Debug, Clone)]
pub struct CartLineDraft {
    /// Catalog product being added.
    pub product_id: ProductId,
    /// Product name.
    pub name: String,
    /// Price fields.
    pub price_fields: PriceSet,
    /// Which price field the line is sold at.
    pub active_price_type: PriceType,
    /// Number of units to add.
    pub quantity: u32,
    /// Selected variant values keyed by axis.
    pub selected_variants: BTreeMap<String, String>,
    /// Brand snapshot.
    pub brand: Option<CatalogSnapshot>,
    /// Category snapshot.
    pub category: Option<CatalogSnapshot>,
}

impl CartLineDraft {
    /// The identity key this draft resolves to.
    #[must_use]
    pub fn line_id(&self) -> LineId {
        LineId::for_selection(&self.product_id, &self.selected_variants)
    }
}
