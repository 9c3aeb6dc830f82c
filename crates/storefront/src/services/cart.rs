//! Cart store.
//!
//! Holds the cart lines, derives totals and counts, and persists after
//! every mutation. Lines are keyed by the deterministic product+variant
//! identity key, so re-adding the same selection merges quantities
//! instead of duplicating lines.

use std::collections::BTreeMap;

use chrono::Utc;
use rust_decimal::Decimal;

use lumizo_core::{LineId, ProductId};

use crate::models::cart::{CartLine, CartLineDraft};
use crate::models::store_keys;
use crate::storage::KvStore;

/// Client-side cart state manager.
///
/// Lines keep insertion order for the process lifetime and across the
/// persistence round-trip.
#[derive(Debug)]
pub struct CartStore {
    storage: KvStore,
    lines: Vec<CartLine>,
}

impl CartStore {
    /// Create an empty cart.
    ///
    /// Call [`CartStore::restore`] once at process start to rehydrate
    /// persisted lines.
    #[must_use]
    pub const fn new(storage: KvStore) -> Self {
        Self {
            storage,
            lines: Vec::new(),
        }
    }

    /// Rehydrate the persisted cart, if any.
    ///
    /// A malformed payload abandons the whole restore: the adapter purges
    /// the entry and the cart starts empty.
    pub fn restore(&mut self) {
        self.lines = self.storage.load(store_keys::CART).unwrap_or_default();
        if !self.lines.is_empty() {
            tracing::debug!("Restored {} cart line(s)", self.lines.len());
        }
    }

    /// Add a candidate line, merging with an existing line on identity.
    ///
    /// If a line with the same identity key exists, only its quantity
    /// grows; name, prices, and snapshots keep their add-time values. A
    /// new selection is inserted with a freshly stamped `added_at`.
    /// Persists afterwards either way.
    pub fn add_line(&mut self, draft: CartLineDraft) -> LineId {
        let id = draft.line_id();

        if let Some(existing) = self.lines.iter_mut().find(|l| l.id == id) {
            existing.quantity = existing.quantity.saturating_add(draft.quantity);
        } else {
            self.lines.push(CartLine {
                id: id.clone(),
                product_id: draft.product_id,
                name: draft.name,
                price_fields: draft.price_fields,
                active_price_type: draft.active_price_type,
                // A line never exists with quantity zero
                quantity: draft.quantity.max(1),
                selected_variants: draft.selected_variants,
                brand: draft.brand,
                category: draft.category,
                added_at: Utc::now(),
            });
        }

        self.persist();
        id
    }

    /// Remove the line with the given identity key. No-op if absent.
    pub fn remove_line(&mut self, id: &LineId) {
        self.lines.retain(|l| &l.id != id);
        self.persist();
    }

    /// Replace a line's quantity, preserving every other field.
    ///
    /// A quantity of zero or less behaves as [`CartStore::remove_line`].
    pub fn set_quantity(&mut self, id: &LineId, quantity: i64) {
        if quantity <= 0 {
            self.remove_line(id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(line) = self.lines.iter_mut().find(|l| &l.id == id) {
            line.quantity = quantity;
        }
        self.persist();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    /// Sum of effective line prices times quantities.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Whether a line exists for this product and variant selection.
    #[must_use]
    pub fn has_line(&self, product: &ProductId, variants: &BTreeMap<String, String>) -> bool {
        self.get_line(product, variants).is_some()
    }

    /// Look up the line for this product and variant selection.
    ///
    /// Uses the same identity-key function as [`CartStore::add_line`]; an
    /// empty variant mapping is a valid key.
    #[must_use]
    pub fn get_line(
        &self,
        product: &ProductId,
        variants: &BTreeMap<String, String>,
    ) -> Option<&CartLine> {
        let id = LineId::for_selection(product, variants);
        self.lines.iter().find(|l| l.id == id)
    }

    /// All lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn persist(&self) {
        // Fire-and-forget: the in-memory lines stay authoritative even if
        // the write fails
        if let Err(e) = self.storage.save(store_keys::CART, &self.lines) {
            tracing::error!("Failed to persist cart: {e}");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use lumizo_core::{PriceSet, PriceType};

    use crate::models::cart::CatalogSnapshot;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn store() -> (tempfile::TempDir, CartStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CartStore::new(KvStore::new(dir.path()));
        (dir, store)
    }

    fn vase_draft(quantity: u32) -> CartLineDraft {
        CartLineDraft {
            product_id: ProductId::from("vase-1"),
            name: "Ceramic Vase".to_owned(),
            price_fields: PriceSet {
                price: Some(d("150")),
                discounted_price: Some(d("100")),
                ..PriceSet::default()
            },
            active_price_type: PriceType::DiscountedPrice,
            quantity,
            selected_variants: BTreeMap::from([("color".to_owned(), "red".to_owned())]),
            brand: Some(CatalogSnapshot {
                name: "Lumizo Home".to_owned(),
                image: Some("https://cdn.lumizo.shop/brands/home.jpg".to_owned()),
            }),
            category: None,
        }
    }

    #[test]
    fn test_add_line_id_matches_independent_computation() {
        let (_dir, mut store) = store();
        let draft = vase_draft(1);
        let expected = LineId::for_selection(&draft.product_id, &draft.selected_variants);

        let id = store.add_line(draft);
        assert_eq!(id, expected);
        assert_eq!(
            store
                .get_line(
                    &ProductId::from("vase-1"),
                    &BTreeMap::from([("color".to_owned(), "red".to_owned())]),
                )
                .unwrap()
                .id,
            expected
        );
    }

    #[test]
    fn test_double_add_merges_quantities_keeps_first_fields() {
        let (_dir, mut store) = store();
        store.add_line(vase_draft(2));

        // Second add carries different denormalized data; it must not win
        let mut second = vase_draft(3);
        second.name = "Renamed Vase".to_owned();
        second.price_fields.discounted_price = Some(d("90"));
        second.brand = None;
        store.add_line(second);

        assert_eq!(store.lines().len(), 1);
        let line = &store.lines()[0];
        assert_eq!(line.quantity, 5);
        assert_eq!(line.name, "Ceramic Vase");
        assert_eq!(line.price_fields.discounted_price, Some(d("100")));
        assert_eq!(line.brand.as_ref().unwrap().name, "Lumizo Home");
    }

    #[test]
    fn test_variant_selection_distinguishes_lines() {
        let (_dir, mut store) = store();
        store.add_line(vase_draft(1));

        let mut blue = vase_draft(1);
        blue.selected_variants = BTreeMap::from([("color".to_owned(), "blue".to_owned())]);
        store.add_line(blue);

        assert_eq!(store.lines().len(), 2);
        assert!(store.has_line(
            &ProductId::from("vase-1"),
            &BTreeMap::from([("color".to_owned(), "blue".to_owned())]),
        ));
    }

    #[test]
    fn test_empty_variant_mapping_is_valid_key() {
        let (_dir, mut store) = store();
        let mut plain = vase_draft(1);
        plain.selected_variants = BTreeMap::new();
        store.add_line(plain);

        assert!(store.has_line(&ProductId::from("vase-1"), &BTreeMap::new()));
        assert!(!store.has_line(&ProductId::from("vase-2"), &BTreeMap::new()));
    }

    #[test]
    fn test_set_quantity_replaces_and_preserves_fields() {
        let (_dir, mut store) = store();
        let id = store.add_line(vase_draft(2));

        store.set_quantity(&id, 7);
        let line = &store.lines()[0];
        assert_eq!(line.quantity, 7);
        assert_eq!(line.name, "Ceramic Vase");
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let (_dir, mut store) = store();
        let id = store.add_line(vase_draft(2));

        store.set_quantity(&id, 0);
        assert!(store.is_empty());
        assert_eq!(store.item_count(), 0);
    }

    #[test]
    fn test_set_quantity_negative_removes() {
        let (_dir, mut store) = store();
        let id = store.add_line(vase_draft(2));

        store.set_quantity(&id, -3);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_line_absent_is_noop() {
        let (_dir, mut store) = store();
        store.add_line(vase_draft(1));
        store.remove_line(&LineId::from("ghost".to_owned()));
        assert_eq!(store.lines().len(), 1);
    }

    #[test]
    fn test_total_empty_cart_is_zero() {
        let (_dir, store) = store();
        assert_eq!(store.total(), Decimal::ZERO);
    }

    #[test]
    fn test_total_uses_effective_price() {
        let (_dir, mut store) = store();
        // quantity 3 at discountedPrice 100, with price 150 present and ignored
        store.add_line(vase_draft(3));
        assert_eq!(store.total(), d("300"));
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let (_dir, mut store) = store();
        store.add_line(vase_draft(2));

        let mut blue = vase_draft(4);
        blue.selected_variants = BTreeMap::from([("color".to_owned(), "blue".to_owned())]);
        store.add_line(blue);

        assert_eq!(store.item_count(), 6);
    }

    #[test]
    fn test_clear_empties_cart() {
        let (dir, mut store) = store();
        store.add_line(vase_draft(2));
        store.clear();

        assert!(store.is_empty());
        // The persisted payload is an empty array, not an absent entry
        let raw = std::fs::read_to_string(dir.path().join("lumizo_cart.json")).unwrap();
        assert_eq!(raw, "[]");
    }

    #[test]
    fn test_persist_restore_roundtrip_preserves_added_at() {
        let dir = tempfile::tempdir().unwrap();
        let storage = KvStore::new(dir.path());

        let mut first = CartStore::new(storage.clone());
        first.add_line(vase_draft(2));
        let mut blue = vase_draft(1);
        blue.selected_variants = BTreeMap::from([("color".to_owned(), "blue".to_owned())]);
        first.add_line(blue);
        let added_ats: Vec<_> = first.lines().iter().map(|l| l.added_at).collect();

        let mut second = CartStore::new(storage);
        second.restore();

        assert_eq!(second.lines().len(), 2);
        let restored: Vec<_> = second.lines().iter().map(|l| l.added_at).collect();
        assert_eq!(restored, added_ats);
    }

    #[test]
    fn test_restore_malformed_payload_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lumizo_cart.json"), "[{\"id\": 42}]").unwrap();

        let mut store = CartStore::new(KvStore::new(dir.path()));
        store.restore();

        assert!(store.is_empty());
        // The adapter purged the corrupt entry
        assert!(!dir.path().join("lumizo_cart.json").exists());
    }
}
