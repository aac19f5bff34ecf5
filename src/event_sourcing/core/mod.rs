// ============================================================================
// Event Sourcing Core - Generic Abstractions
// ============================================================================
//
// Generic, reusable pieces that work with any aggregate.
// No domain-specific code lives here.
//
// ============================================================================

pub mod aggregate;
pub mod event;

// Re-export core types for convenience
pub use aggregate::Aggregate;
pub use event::{DomainEvent, EventEnvelope, serialize_event, deserialize_event};
