//! Catalog price model using decimal arithmetic.
//!
//! A catalog product carries up to four price fields; which one a line is
//! sold at is selected by a [`PriceType`]. Missing fields fall back in a
//! fixed precedence order. The fallback lives in exactly one place,
//! [`PriceSet::resolve`], shared by cart totals and display formatting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The price fields a catalog product may carry.
///
/// Amounts are in the currency's standard unit (e.g., dollars, not cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PriceSet {
    /// Regular selling price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Maximum retail price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrp: Option<Decimal>,
    /// Discounted selling price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<Decimal>,
    /// Minimum advertised price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_price: Option<Decimal>,
}

impl PriceSet {
    /// Resolve the effective amount for the given active price type.
    ///
    /// Fallback precedence:
    /// - `DiscountedPrice` -> discounted price, else price, else mrp, else 0
    /// - `MinimumPrice` -> minimum price, else price, else mrp, else 0
    /// - `Mrp` -> mrp, else price, else 0
    /// - `Price` -> price, else mrp, else 0
    #[must_use]
    pub fn resolve(&self, active: PriceType) -> Decimal {
        match active {
            PriceType::DiscountedPrice => self.discounted_price.or(self.price).or(self.mrp),
            PriceType::MinimumPrice => self.minimum_price.or(self.price).or(self.mrp),
            PriceType::Mrp => self.mrp.or(self.price),
            PriceType::Price => self.price.or(self.mrp),
        }
        .unwrap_or(Decimal::ZERO)
    }

    /// Format the effective amount for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self, active: PriceType) -> String {
        format!("${:.2}", self.resolve(active))
    }
}

/// Selector for the active price field of a [`PriceSet`].
///
/// Serialized values match the catalog wire format (`"price"`, `"mrp"`,
/// `"discountedPrice"`, `"minimumPrice"`). Any unrecognized value
/// deserializes to [`PriceType::Price`], the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum PriceType {
    /// Regular selling price (default).
    #[default]
    Price,
    /// Maximum retail price.
    Mrp,
    /// Discounted selling price.
    DiscountedPrice,
    /// Minimum advertised price.
    MinimumPrice,
}

impl PriceType {
    /// The wire-format name of this price type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Mrp => "mrp",
            Self::DiscountedPrice => "discountedPrice",
            Self::MinimumPrice => "minimumPrice",
        }
    }
}

impl From<String> for PriceType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<&str> for PriceType {
    fn from(s: &str) -> Self {
        match s {
            "mrp" => Self::Mrp,
            "discountedPrice" => Self::DiscountedPrice,
            "minimumPrice" => Self::MinimumPrice,
            // Unrecognized types resolve as the regular price
            _ => Self::Price,
        }
    }
}

impl std::fmt::Display for PriceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
