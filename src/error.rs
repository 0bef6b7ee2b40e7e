//! Error types shared across the planner.

use thiserror::Error;

/// Failure of a distance lookup.
///
/// Always fatal to the route being built: the sequencer never substitutes a
/// fallback value for a missing distance.
#[derive(Debug, Error)]
pub enum DistanceError {
    #[error("distance request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("distance service answered {status}: {message}")]
    Service { status: String, message: String },
    #[error("distance service returned no element for the requested pair")]
    MissingElement,
    #[error("distance service returned an invalid value: {0}")]
    InvalidValue(f64),
}

/// Failure of a whole routing request.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Lista de endereços vazia")]
    EmptyAddressList,
    #[error("Nenhum endereço válido")]
    NoValidAddress,
    #[error(transparent)]
    Distance(#[from] DistanceError),
}

impl PlanError {
    /// Whether the caller is at fault (as opposed to a collaborator).
    pub fn is_client_error(&self) -> bool {
        matches!(self, PlanError::EmptyAddressList | PlanError::NoValidAddress)
    }
}
