// ============================================================================
// Event Sourcing Infrastructure
// ============================================================================
//
// Generic event sourcing abstractions.
// Domain-specific code is in src/domain/
//
// ============================================================================

mod core;

pub use self::core::*;
