use serde::{Deserialize, Serialize};
use anyhow::Result;
use tracing::debug;

use crate::domain::order::{MelonOrder, OrderKind};
use super::clock::{is_rush_hour, Clock, RandomUnitPrice, SystemClock, UnitPriceSource};
use super::config::PricingConfig;

// ============================================================================
// Price Calculator
// ============================================================================
//
// total = (1 + tax_rate) * quantity * unit_price [+ international fee]
//
// The base price is drawn fresh and rush hour is re-evaluated on every
// quote, so two quotes for the same order may differ.
//
// ============================================================================

/// Breakdown of one price computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Drawn base price, including any rush hour surcharge
    pub base_price: u32,
    pub rush_hour: bool,
    /// Base price after the species multiplier
    pub unit_price: f64,
    pub tax_rate: f64,
    pub quantity: i32,
    /// Variant-specific flat fee, already included in `total`
    pub surcharge: f64,
    /// Unrounded amount due
    pub total: f64,
}

#[derive(Debug)]
pub struct PriceCalculator<C = SystemClock, S = RandomUnitPrice> {
    config: PricingConfig,
    clock: C,
    source: S,
}

impl PriceCalculator {
    /// Prices against the local wall clock and the thread RNG
    pub fn system() -> Self {
        // Default config always validates.
        Self {
            config: PricingConfig::default(),
            clock: SystemClock,
            source: RandomUnitPrice::new(),
        }
    }

    pub fn with_config(config: PricingConfig) -> Result<Self> {
        Self::new(config, SystemClock, RandomUnitPrice::new())
    }
}

impl<C: Clock, S: UnitPriceSource> PriceCalculator<C, S> {
    /// Fails if `config` does not pass [`PricingConfig::validate`]
    pub fn new(config: PricingConfig, clock: C, source: S) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, clock, source })
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Draw a base price in `[min_base_price, max_base_price]`, plus the rush
    /// hour surcharge when the clock reads rush hour.
    pub fn base_price(&mut self) -> u32 {
        self.draw_base_price().0
    }

    fn draw_base_price(&mut self) -> (u32, bool) {
        let drawn = self
            .source
            .draw(self.config.min_base_price..=self.config.max_base_price);
        let rush_hour = is_rush_hour(&self.clock.now(), &self.config);

        if rush_hour {
            (drawn.saturating_add(self.config.rush_hour_surcharge), true)
        } else {
            (drawn, false)
        }
    }

    pub fn quote(&mut self, order: &MelonOrder) -> PriceQuote {
        let (base_price, rush_hour) = self.draw_base_price();

        let unit_price = if order.species().is_christmas() {
            f64::from(base_price) * self.config.christmas_multiplier
        } else {
            f64::from(base_price)
        };

        let tax_rate = order.tax_rate();
        let quantity = order.quantity();
        let mut total = (1.0 + tax_rate) * f64::from(quantity) * unit_price;

        let surcharge = match order.kind() {
            OrderKind::International { .. }
                if quantity < self.config.international_small_order_threshold =>
            {
                self.config.international_small_order_fee
            }
            _ => 0.0,
        };
        total += surcharge;

        debug!(
            order_id = %order.id(),
            order_type = %order.order_type(),
            base_price,
            rush_hour,
            unit_price,
            surcharge,
            total,
            "Priced melon order"
        );

        PriceQuote {
            base_price,
            rush_hour,
            unit_price,
            tax_rate,
            quantity,
            surcharge,
            total,
        }
    }

    pub fn total(&mut self, order: &MelonOrder) -> f64 {
        self.quote(order).total
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{FixedClock, FixedUnitPrice};
    use chrono::{NaiveDate, NaiveDateTime};

    const EPSILON: f64 = 1e-9;

    fn monday_at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn saturday_at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 6)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn calculator(at: NaiveDateTime, price: u32) -> PriceCalculator<FixedClock, FixedUnitPrice> {
        PriceCalculator::new(PricingConfig::default(), FixedClock(at), FixedUnitPrice(price))
            .unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_base_price_rush_hour_surcharge() {
        assert_eq!(calculator(monday_at(9), 7).base_price(), 11);
        assert_eq!(calculator(saturday_at(9), 7).base_price(), 7);
        assert_eq!(calculator(monday_at(14), 7).base_price(), 7);
    }

    #[test]
    fn test_domestic_total() {
        let order = MelonOrder::domestic("muskmelon", 5).unwrap();
        let total = calculator(monday_at(14), 7).total(&order);
        assert_close(total, 37.8);
    }

    #[test]
    fn test_international_small_order_fee() {
        let order = MelonOrder::international("muskmelon", 5, "MX").unwrap();
        let quote = calculator(monday_at(14), 7).quote(&order);

        assert_close(quote.total, 44.95);
        assert_eq!(quote.surcharge, 3.0);
    }

    #[test]
    fn test_international_fee_matches_base_formula_plus_three() {
        let international = MelonOrder::international("Casaba", 9, "JP").unwrap();
        let domestic = MelonOrder::domestic("Casaba", 9).unwrap();

        let expected = (1.0 + 0.17) * 9.0 * 6.0 + 3.0;
        assert_close(calculator(saturday_at(9), 6).total(&international), expected);

        let without_fee = (1.0 + 0.08) * 9.0 * 6.0;
        assert_close(calculator(saturday_at(9), 6).total(&domestic), without_fee);
    }

    #[test]
    fn test_international_large_order_has_no_fee() {
        let order = MelonOrder::international("muskmelon", 10, "MX").unwrap();
        let quote = calculator(monday_at(14), 7).quote(&order);

        assert_eq!(quote.surcharge, 0.0);
        assert_close(quote.total, 1.17 * 10.0 * 7.0);
    }

    #[test]
    fn test_christmas_multiplier() {
        let order = MelonOrder::domestic("Christmas", 4).unwrap();
        let quote = calculator(saturday_at(10), 8).quote(&order);

        assert_eq!(quote.base_price, 8);
        assert_close(quote.unit_price, 12.0);
        assert_close(quote.total, 1.08 * 4.0 * 12.0);
    }

    #[test]
    fn test_christmas_multiplier_applies_after_rush_surcharge() {
        let order = MelonOrder::government("Christmas", 2).unwrap();
        let quote = calculator(monday_at(8), 6).quote(&order);

        assert!(quote.rush_hour);
        assert_eq!(quote.base_price, 10);
        assert_close(quote.total, 2.0 * 15.0);
    }

    #[test]
    fn test_government_total_is_untaxed() {
        let order = MelonOrder::government("Casaba", 3).unwrap();
        assert_close(calculator(saturday_at(9), 5).total(&order), 15.0);
    }

    #[test]
    fn test_custom_config_changes_fee() {
        let config = PricingConfig {
            international_small_order_fee: 5.0,
            international_small_order_threshold: 20,
            ..PricingConfig::default()
        };
        let mut calculator =
            PriceCalculator::new(config, FixedClock(saturday_at(9)), FixedUnitPrice(5)).unwrap();
        let order = MelonOrder::international("Casaba", 15, "FR").unwrap();

        assert_close(calculator.total(&order), 1.17 * 15.0 * 5.0 + 5.0);
    }

    #[test]
    fn test_system_calculator_stays_in_bounds() {
        let order = MelonOrder::domestic("Casaba", 1).unwrap();
        let mut calculator = PriceCalculator::system();

        for _ in 0..100 {
            let quote = calculator.quote(&order);
            assert!((5..=14).contains(&quote.base_price));
        }
    }

    #[test]
    fn test_empty_price_range_rejected_at_construction() {
        let config = PricingConfig {
            min_base_price: 11,
            max_base_price: 10,
            ..PricingConfig::default()
        };

        let result =
            PriceCalculator::new(config.clone(), FixedClock(saturday_at(9)), RandomUnitPrice::new());
        assert!(result.is_err());
        assert!(PriceCalculator::with_config(config).is_err());
    }

    #[test]
    fn test_overflowing_surcharge_rejected_at_construction() {
        let config = PricingConfig {
            rush_hour_surcharge: u32::MAX,
            ..PricingConfig::default()
        };

        assert!(PriceCalculator::new(config, FixedClock(monday_at(9)), FixedUnitPrice(7)).is_err());
    }

    #[test]
    fn test_rush_surcharge_saturates() {
        // The fixed source ignores the configured range.
        let mut calculator = calculator(monday_at(9), u32::MAX);
        assert_eq!(calculator.base_price(), u32::MAX);
    }

    #[test]
    fn test_calculator_debug_output() {
        let calculator = calculator(saturday_at(9), 7);
        let debug = format!("{calculator:?}");

        assert!(debug.contains("PriceCalculator"));
        assert!(debug.contains("FixedUnitPrice(7)"));
    }
}
