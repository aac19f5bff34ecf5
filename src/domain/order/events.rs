use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

use crate::event_sourcing::DomainEvent;
use super::value_objects::{OrderKind, Species};

// ============================================================================
// Order Events - Domain Events for Melon Orders
// ============================================================================

/// Order Event - Union type for all order events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    Placed(OrderPlaced),
    Shipped(OrderShipped),
    InspectionPassed(InspectionPassed),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::Placed(_) => "OrderPlaced",
            Self::Shipped(_) => "OrderShipped",
            Self::InspectionPassed(_) => "InspectionPassed",
        }
    }
}

// ============================================================================
// Individual Event Types
// ============================================================================

/// Order Placed - Initial event in order lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub order_id: Uuid,
    pub species: Species,
    pub quantity: i32,
    pub kind: OrderKind,
    pub placed_at: DateTime<Utc>,
}

/// Order Shipped - Melons have left the warehouse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderShipped {
    pub shipped_at: DateTime<Utc>,
}

/// Inspection Passed - Government order cleared inspection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionPassed {
    pub inspected_at: DateTime<Utc>,
}
