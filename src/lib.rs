//! Melon sales orders and their pricing.
//!
//! Orders come in three variants (domestic, international, Government) that
//! share one aggregate type. Prices are computed on demand from a random base
//! price, a rush hour surcharge, a species multiplier, tax and variant fees.

pub mod domain;
pub mod event_sourcing;
pub mod pricing;

pub use domain::order::{
    CountryCode, ErrorKind, MelonOrder, OrderCommand, OrderError, OrderEvent, OrderKind,
    OrderType, Species, MAX_MELONS,
};
pub use event_sourcing::{Aggregate, EventEnvelope};
pub use pricing::{PriceCalculator, PriceQuote, PricingConfig};
