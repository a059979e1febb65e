//! Error types for board operations.

use thiserror::Error;

use crate::model::{Location, MIN_VOLUME, OfferId, OfferStatus};

/// Top-level error returned by [`Board::apply`](super::Board::apply) and
/// [`Board::decide`](super::Board::decide).
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("submit failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("accept failed: {0}")]
    Capacity(#[from] CapacityError),

    #[error("{0}")]
    State(#[from] StateError),
}

/// Malformed submission input. The board is left unchanged.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("name required")]
    NameRequired,
    #[error("volume {0} bpd is below the {MIN_VOLUME} bpd minimum")]
    VolumeBelowMinimum(u32),
    #[error("unrecognized location '{0}'")]
    UnknownLocation(String),
    #[error("unrecognized term '{0}'")]
    UnknownTerm(String),
}

/// An accept decision would push a location past its capacity ceiling.
/// The targeted offer remains Pending.
#[derive(Debug, Error)]
#[error(
    "location {location} has {accepted} of {ceiling} bpd accepted; \
     offer of {requested} bpd does not fit"
)]
pub struct CapacityError {
    pub location: Location,
    pub accepted: u32,
    pub requested: u32,
    pub ceiling: u32,
}

/// A decision targeted an offer that is not Pending. No mutation occurs.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("offer {0} not found")]
    NotFound(OfferId),

    #[error("offer {0} not pending (status {1})")]
    NotPending(OfferId, OfferStatus),
}
