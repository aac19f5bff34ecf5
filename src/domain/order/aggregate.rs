use serde::Serialize;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use anyhow::Result;
use tracing::{debug, info, warn};

use crate::event_sourcing::{Aggregate, EventEnvelope};
use crate::pricing::{Clock, PriceCalculator, UnitPriceSource};
use super::value_objects::{CountryCode, OrderKind, OrderType, Species, MAX_MELONS};
use super::events::*;
use super::commands::OrderCommand;
use super::errors::OrderError;

// ============================================================================
// Melon Order Aggregate - Domain Logic
// ============================================================================
//
// One aggregate type covers every order variant. Variant-only state lives in
// `OrderKind`; tax rate and order type follow from it and never change.
//
// Orders are only created by the constructors or rebuilt from their event
// history, both of which enforce the placement rules. There is no
// `Deserialize` for the aggregate itself.
//
// Mutations are limited to shipping (one-way) and, for Government orders,
// passing inspection (one-way). Both flow through commands and events.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MelonOrder {
    // Identity
    id: Uuid,
    version: i64,

    // Current State (derived from events)
    species: Species,
    quantity: i32,
    kind: OrderKind,
    shipped: bool,

    // Audit Trail
    placed_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,

    #[serde(skip)]
    history: Vec<EventEnvelope<OrderEvent>>,
}

impl MelonOrder {
    /// A melon order within the USA
    pub fn domestic(species: impl Into<String>, quantity: i32) -> Result<Self, OrderError> {
        Self::place(Species::new(species), quantity, OrderKind::Domestic)
    }

    /// An order shipped outside the USA
    pub fn international(
        species: impl Into<String>,
        quantity: i32,
        country_code: impl Into<String>,
    ) -> Result<Self, OrderError> {
        Self::place(
            Species::new(species),
            quantity,
            OrderKind::International {
                country_code: CountryCode::new(country_code),
            },
        )
    }

    /// An untaxed order that must pass inspection
    pub fn government(species: impl Into<String>, quantity: i32) -> Result<Self, OrderError> {
        Self::place(
            Species::new(species),
            quantity,
            OrderKind::Government {
                passed_inspection: false,
            },
        )
    }

    fn place(species: Species, quantity: i32, kind: OrderKind) -> Result<Self, OrderError> {
        let event = OrderEvent::Placed(OrderPlaced {
            order_id: Uuid::new_v4(),
            species,
            quantity,
            kind,
            placed_at: Utc::now(),
        });

        let mut order = Self::apply_first_event(&event).inspect_err(|e| {
            warn!(quantity, error = %e, "Rejected melon order");
        })?;

        order.history.push(EventEnvelope::new(order.id, order.version, event));

        debug!(
            order_id = %order.id,
            order_type = %order.order_type(),
            species = %order.species,
            quantity,
            "Placed melon order"
        );

        Ok(order)
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Handle a command, apply the resulting events and append them to history
    pub fn execute(
        &mut self,
        command: &OrderCommand,
    ) -> Result<Vec<EventEnvelope<OrderEvent>>, OrderError> {
        let events = self.handle_command(command)?;
        let mut recorded = Vec::with_capacity(events.len());

        for event in events {
            self.apply_event(&event)?;
            let envelope = EventEnvelope::new(self.id, self.version, event);
            self.history.push(envelope.clone());
            recorded.push(envelope);
        }

        Ok(recorded)
    }

    /// Record that the order has shipped. Repeat calls are harmless.
    pub fn mark_shipped(&mut self) -> Result<(), OrderError> {
        self.execute(&OrderCommand::MarkShipped)?;
        info!(order_id = %self.id, "Order shipped");
        Ok(())
    }

    /// Record an inspection outcome on a Government order. A failed inspection
    /// never clears an earlier pass.
    pub fn mark_inspection(&mut self, passed: bool) -> Result<(), OrderError> {
        let recorded = self.execute(&OrderCommand::MarkInspection { passed })?;
        info!(
            order_id = %self.id,
            passed,
            changed = !recorded.is_empty(),
            "Inspection recorded"
        );
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Pricing
    // ------------------------------------------------------------------------

    /// Price the order against the wall clock and a random base price
    pub fn total(&self) -> f64 {
        PriceCalculator::system().total(self)
    }

    pub fn total_with<C: Clock, S: UnitPriceSource>(
        &self,
        calculator: &mut PriceCalculator<C, S>,
    ) -> f64 {
        calculator.total(self)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn species(&self) -> &Species {
        &self.species
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn kind(&self) -> &OrderKind {
        &self.kind
    }

    pub fn order_type(&self) -> OrderType {
        self.kind.order_type()
    }

    pub fn tax_rate(&self) -> f64 {
        self.order_type().tax_rate()
    }

    pub fn is_shipped(&self) -> bool {
        self.shipped
    }

    /// Some only for international orders
    pub fn country_code(&self) -> Option<&CountryCode> {
        match &self.kind {
            OrderKind::International { country_code } => Some(country_code),
            _ => None,
        }
    }

    /// Some only for Government orders
    pub fn passed_inspection(&self) -> Option<bool> {
        match self.kind {
            OrderKind::Government { passed_inspection } => Some(passed_inspection),
            _ => None,
        }
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Every event applied to this order, oldest first
    pub fn events(&self) -> &[EventEnvelope<OrderEvent>] {
        &self.history
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl Aggregate for MelonOrder {
    type Event = OrderEvent;
    type Command = OrderCommand;
    type Error = OrderError;

    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error> {
        match event {
            OrderEvent::Placed(e) => {
                // No lower bound: zero and negative quantities are accepted.
                if e.quantity > MAX_MELONS {
                    return Err(OrderError::TooManyMelons);
                }
                if let OrderKind::Government { passed_inspection: true } = e.kind {
                    return Err(OrderError::InspectedBeforePlacement);
                }

                Ok(Self {
                    id: e.order_id,
                    version: 1,
                    species: e.species.clone(),
                    quantity: e.quantity,
                    kind: e.kind.clone(),
                    shipped: false,
                    placed_at: e.placed_at,
                    updated_at: e.placed_at,
                    history: Vec::new(),
                })
            }
            _ => Err(OrderError::NotInitialized),
        }
    }

    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error> {
        match event {
            OrderEvent::Placed(_) => return Err(OrderError::AlreadyPlaced),
            OrderEvent::Shipped(e) => {
                self.shipped = true;
                self.updated_at = e.shipped_at;
            }
            OrderEvent::InspectionPassed(e) => {
                let order_type = self.order_type();
                match &mut self.kind {
                    OrderKind::Government { passed_inspection } => *passed_inspection = true,
                    _ => return Err(OrderError::InspectionNotApplicable(order_type)),
                }
                self.updated_at = e.inspected_at;
            }
        }

        self.version += 1;
        Ok(())
    }

    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            OrderCommand::MarkShipped => Ok(vec![OrderEvent::Shipped(OrderShipped {
                shipped_at: Utc::now(),
            })]),

            OrderCommand::MarkInspection { passed } => match self.kind {
                OrderKind::Government { .. } if *passed => {
                    Ok(vec![OrderEvent::InspectionPassed(InspectionPassed {
                        inspected_at: Utc::now(),
                    })])
                }
                OrderKind::Government { .. } => Ok(vec![]),
                _ => Err(OrderError::InspectionNotApplicable(self.order_type())),
            },
        }
    }

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn restore_history(&mut self, events: Vec<EventEnvelope<Self::Event>>) {
        self.history = events;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
