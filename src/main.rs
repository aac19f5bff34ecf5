use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use melon_orders::event_sourcing::serialize_event;
use melon_orders::{Aggregate, MelonOrder, OrderError, PriceCalculator, PricingConfig};

const CONFIG_ENV: &str = "MELON_PRICING_CONFIG";

fn load_config() -> anyhow::Result<PricingConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read pricing config {path}"))?;
            let config = PricingConfig::from_json(&json)
                .with_context(|| format!("Invalid pricing config {path}"))?;
            tracing::info!(%path, "Loaded pricing config");
            Ok(config)
        }
        Err(_) => Ok(PricingConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,melon_orders=debug"))
        )
        .init();

    let mut calculator = PriceCalculator::with_config(load_config()?)?;

    // === 1. Place one order of each kind ===
    let mut domestic = MelonOrder::domestic("Casaba", 12)?;
    let mut international = MelonOrder::international("Christmas", 6, "MX")?;
    let mut government = MelonOrder::government("Crenshaw", 40)?;

    // === 2. Quote prices ===
    for order in [&domestic, &international, &government] {
        let quote = calculator.quote(order);
        tracing::info!(
            order_id = %order.id(),
            order_type = %order.order_type(),
            species = %order.species(),
            quantity = order.quantity(),
            rush_hour = quote.rush_hour,
            total = quote.total,
            "Quoted order"
        );
    }

    // === 3. Lifecycle ===
    government.mark_inspection(false)?;
    government.mark_inspection(true)?;
    for order in [&mut domestic, &mut international, &mut government] {
        order.mark_shipped()?;
    }

    let history = serialize_event(&government.events())?;
    tracing::debug!(%history, "Government order history");

    let replayed = MelonOrder::load_from_events(government.events().to_vec())?;
    tracing::info!(
        order_id = %replayed.id(),
        version = replayed.version(),
        passed_inspection = ?replayed.passed_inspection(),
        shipped = replayed.is_shipped(),
        "Replayed Government order from history"
    );

    // === 4. Oversized orders are refused ===
    match MelonOrder::domestic("Casaba", 101) {
        Err(OrderError::TooManyMelons) => tracing::info!("Oversized order refused as expected"),
        Err(e) => return Err(e.into()),
        Ok(order) => anyhow::bail!("Order {} should have been refused", order.id()),
    }

    Ok(())
}
