//! Time and randomness sources used by the price calculator.
//!
//! Both are traits so callers can price against a pinned moment and a known
//! base price instead of the wall clock and the thread RNG.

use std::ops::RangeInclusive;

use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use rand::rngs::ThreadRng;
use rand::Rng;

use super::config::PricingConfig;

/// Source of the current local wall-clock moment
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the local system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same moment
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Source of the undiscounted per-melon base price
pub trait UnitPriceSource {
    fn draw(&mut self, range: RangeInclusive<u32>) -> u32;
}

/// Uniform draw over the inclusive range
#[derive(Debug, Clone, Default)]
pub struct RandomUnitPrice<R = ThreadRng> {
    rng: R,
}

impl RandomUnitPrice<ThreadRng> {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl<R: Rng> RandomUnitPrice<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> UnitPriceSource for RandomUnitPrice<R> {
    fn draw(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.rng.random_range(range)
    }
}

/// Always yields the same base price, ignoring the range
#[derive(Debug, Clone, Copy)]
pub struct FixedUnitPrice(pub u32);

impl UnitPriceSource for FixedUnitPrice {
    fn draw(&mut self, _range: RangeInclusive<u32>) -> u32 {
        self.0
    }
}

/// Rush hour is Monday through Friday within the configured hour window.
pub fn is_rush_hour(moment: &NaiveDateTime, config: &PricingConfig) -> bool {
    if moment.weekday().num_days_from_monday() >= 5 {
        return false;
    }

    (config.rush_hour_start..=config.rush_hour_end).contains(&moment.hour())
}
