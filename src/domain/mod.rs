// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Domain aggregates, each in its own subdirectory with value objects,
// events, commands, errors and the aggregate implementation.
//
// ============================================================================

pub mod order;
