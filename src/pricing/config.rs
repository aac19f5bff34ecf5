use serde::{Deserialize, Serialize};
use anyhow::{bail, Result};

// ============================================================================
// Pricing Configuration
// ============================================================================
//
// Every constant the price calculation depends on. Defaults reproduce the
// standard melon price list; a JSON document can override any subset.
//
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Lowest base price drawn (inclusive)
    pub min_base_price: u32,
    /// Highest base price drawn (inclusive)
    pub max_base_price: u32,
    /// Flat amount added to the base price during rush hour
    pub rush_hour_surcharge: u32,
    /// First rush hour on a weekday (inclusive, 24h clock)
    pub rush_hour_start: u32,
    /// Last rush hour on a weekday (inclusive, 24h clock)
    pub rush_hour_end: u32,
    /// Base price multiplier for Christmas melons
    pub christmas_multiplier: f64,
    /// Flat fee added to small international orders
    pub international_small_order_fee: f64,
    /// International orders below this many melons pay the fee
    pub international_small_order_threshold: i32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            // Upper bound is 10, not 9.
            min_base_price: 5,
            max_base_price: 10,
            rush_hour_surcharge: 4,
            rush_hour_start: 8,
            rush_hour_end: 11,
            christmas_multiplier: 1.5,
            international_small_order_fee: 3.0,
            international_small_order_threshold: 10,
        }
    }
}

impl PricingConfig {
    /// Parse a JSON override document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_base_price > self.max_base_price {
            bail!(
                "Empty base price range: {}..={}",
                self.min_base_price,
                self.max_base_price
            );
        }
        if self.max_base_price.checked_add(self.rush_hour_surcharge).is_none() {
            bail!(
                "Rush hour surcharge {} overflows the highest base price {}",
                self.rush_hour_surcharge,
                self.max_base_price
            );
        }
        if self.rush_hour_start > self.rush_hour_end || self.rush_hour_end > 23 {
            bail!(
                "Invalid rush hour window: {}..={}",
                self.rush_hour_start,
                self.rush_hour_end
            );
        }
        if !self.christmas_multiplier.is_finite() || self.christmas_multiplier < 0.0 {
            bail!("Invalid Christmas multiplier: {}", self.christmas_multiplier);
        }
        if !self.international_small_order_fee.is_finite() {
            bail!("Invalid international fee: {}", self.international_small_order_fee);
        }
        Ok(())
    }
}
