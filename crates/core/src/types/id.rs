//! Newtype IDs for type-safe entity references.
//!
//! Catalog entities are addressed by opaque string identifiers handed out
//! by the upstream catalog API. Cart lines are addressed by a [`LineId`]
//! derived deterministically from the product and its selected variants,
//! so the same selection always resolves to the same line.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product ID.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Get the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the ID and return its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Identity key of a cart line.
///
/// A line ID is a pure function of the product ID and the selected variant
/// mapping: variant axes are sorted lexicographically and appended to the
/// product ID as `axis:value` segments joined with `|`. Two requests for
/// the same product-and-variant combination therefore always resolve to
/// the same line, which is what makes re-adds merge instead of duplicate.
///
/// An empty variant mapping is a valid key (an unvaried product).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    /// Compute the identity key for a product with selected variants.
    ///
    /// `BTreeMap` iteration order gives the lexicographic axis ordering.
    #[must_use]
    pub fn for_selection(product: &ProductId, variants: &BTreeMap<String, String>) -> Self {
        let mut key = product.as_str().to_owned();
        for (axis, value) in variants {
            key.push('|');
            key.push_str(axis);
            key.push(':');
            key.push_str(value);
        }
        Self(key)
    }

    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key and return its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for LineId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
