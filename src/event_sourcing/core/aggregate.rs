use uuid::Uuid;
use anyhow::Result;
use super::event::EventEnvelope;

// ============================================================================
// Aggregate Root Pattern - Event Sourcing Core
// ============================================================================
//
// Key Principles:
// 1. Commands are validated before emitting events
// 2. Events represent facts that have already happened
// 3. Aggregates enforce business invariants
// 4. Replaying the event history reproduces the aggregate exactly
//
// ============================================================================

/// Generic Aggregate trait - all event-sourced aggregates implement this
///
/// Type Parameters:
/// - `Event`: The domain event type for this aggregate
/// - `Command`: The command type for this aggregate
/// - `Error`: The error type for business rule violations
pub trait Aggregate: Sized {
    type Event;
    type Command;
    type Error;

    /// Create new aggregate from first event
    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error>;

    /// Apply subsequent events to update state
    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error>;

    /// Handle command and emit events (business logic)
    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    fn aggregate_id(&self) -> Uuid;

    /// Sequence number of the last applied event
    fn version(&self) -> i64;

    /// Hand the replayed envelopes to aggregates that keep their own history
    fn restore_history(&mut self, _events: Vec<EventEnvelope<Self::Event>>) {}

    /// Load aggregate from event history (reconstruct from events)
    ///
    /// Every envelope must belong to the same aggregate and carry the
    /// sequence number the aggregate reaches after applying it.
    fn load_from_events(events: Vec<EventEnvelope<Self::Event>>) -> Result<Self>
    where
        Self::Error: std::fmt::Display,
    {
        let Some(first) = events.first() else {
            anyhow::bail!("No events to load");
        };

        let mut aggregate = Self::apply_first_event(&first.event_data)
            .map_err(|e| anyhow::anyhow!("Failed to apply first event: {}", e))?;
        check_envelope(&aggregate, first)?;

        for envelope in events.iter().skip(1) {
            aggregate.apply_event(&envelope.event_data)
                .map_err(|e| anyhow::anyhow!("Failed to apply event: {}", e))?;
            check_envelope(&aggregate, envelope)?;
        }

        aggregate.restore_history(events);
        Ok(aggregate)
    }
}

fn check_envelope<A: Aggregate>(aggregate: &A, envelope: &EventEnvelope<A::Event>) -> Result<()> {
    if envelope.aggregate_id != aggregate.aggregate_id() {
        anyhow::bail!(
            "Event {} belongs to aggregate {}, not {}",
            envelope.event_id,
            envelope.aggregate_id,
            aggregate.aggregate_id()
        );
    }
    if envelope.sequence_number != aggregate.version() {
        anyhow::bail!(
            "Event {} has sequence number {}, expected {}",
            envelope.event_id,
            envelope.sequence_number,
            aggregate.version()
        );
    }
    Ok(())
}
