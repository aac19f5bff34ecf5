use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Order Value Objects
// ============================================================================

/// Upper bound on melons in a single order
pub const MAX_MELONS: i32 = 100;

/// Melon species, e.g. "Casaba" or "Christmas"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species(pub String);

impl Species {
    pub fn new(species: impl Into<String>) -> Self {
        Self(species.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Christmas melons are priced at a premium. Match is exact and case-sensitive.
    pub fn is_christmas(&self) -> bool {
        self.0 == "Christmas"
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Destination country of an international order. Stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCode(pub String);

impl CountryCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Order type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    #[serde(rename = "domestic")]
    Domestic,
    #[serde(rename = "international")]
    International,
    #[serde(rename = "Government")]
    Government,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Domestic => "domestic",
            Self::International => "international",
            Self::Government => "Government",
        }
    }

    /// Sales tax applied on top of the melon price
    pub fn tax_rate(&self) -> f64 {
        match self {
            Self::Domestic => 0.08,
            Self::International => 0.17,
            Self::Government => 0.0,
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific order state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "order_type")]
pub enum OrderKind {
    #[serde(rename = "domestic")]
    Domestic,
    #[serde(rename = "international")]
    International { country_code: CountryCode },
    #[serde(rename = "Government")]
    Government { passed_inspection: bool },
}

impl OrderKind {
    pub fn order_type(&self) -> OrderType {
        match self {
            Self::Domestic => OrderType::Domestic,
            Self::International { .. } => OrderType::International,
            Self::Government { .. } => OrderType::Government,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
