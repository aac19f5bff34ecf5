use super::value_objects::OrderType;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("No more than 100 melons!")]
    TooManyMelons,

    #[error("Inspection can only be recorded on Government orders, not {0} orders")]
    InspectionNotApplicable(OrderType),

    #[error("A Government order cannot be placed already inspected")]
    InspectedBeforePlacement,

    #[error("Order has already been placed")]
    AlreadyPlaced,

    #[error("Aggregate not initialized")]
    NotInitialized,
}

/// Coarse classification of an [`OrderError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A caller-supplied value is out of range
    InvalidValue,
    /// The operation does not fit the order's variant or lifecycle
    BusinessRule,
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TooManyMelons => ErrorKind::InvalidValue,
            Self::InspectionNotApplicable(_)
            | Self::InspectedBeforePlacement
            | Self::AlreadyPlaced
            | Self::NotInitialized => ErrorKind::BusinessRule,
        }
    }
}
