// ============================================================================
// Pricing - Melon order price computation
// ============================================================================

pub mod calculator;
pub mod clock;
pub mod config;

pub use calculator::{PriceCalculator, PriceQuote};
pub use clock::{is_rush_hour, Clock, FixedClock, FixedUnitPrice, RandomUnitPrice, SystemClock, UnitPriceSource};
pub use config::PricingConfig;
