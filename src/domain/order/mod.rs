// ============================================================================
// Order Domain - Melon Orders
// ============================================================================
//
// - Value objects (Species, CountryCode, OrderType, OrderKind)
// - Events (OrderPlaced, OrderShipped, InspectionPassed)
// - Commands (MarkShipped, MarkInspection)
// - Errors (OrderError enum)
// - Aggregate (MelonOrder with business logic)
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;

// Re-export for convenience
pub use value_objects::*;
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
