// ============================================================================
// Order Commands - Represent caller intent on a placed order
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum OrderCommand {
    MarkShipped,
    /// Only Government orders accept this. `passed: false` is a no-op.
    MarkInspection {
        passed: bool,
    },
}
