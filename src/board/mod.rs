//! The auction board.
//!
//! The board holds every offer of a session, assigns identifiers, and applies
//! admin decisions atomically with respect to the capacity check.
//! Also supports an async stream of actions.

use tokio_stream::{Stream, StreamExt};
use tracing::info;

use crate::Price;
use crate::model::{Action, Decision, Location, MIN_VOLUME, Offer, OfferId, OfferStatus, Term};

pub mod capacity;
pub use capacity::CapacityState;

mod error;
pub use error::{BoardError, CapacityError, StateError, ValidationError};

/// Capacity ceiling per delivery point in the reference deployment, bpd.
pub const DEFAULT_CEILING: u32 = 30_000;

/// The offer store.
///
/// Offers are kept in submission order and never deleted; decided offers stay
/// on the board with their terminal status.
pub struct Board {
    offers: Vec<Offer>,
    next_id: OfferId,
    /// Maximum accepted volume per location, bpd.
    ceiling: u32,
}

/// Public API
impl Board {
    pub fn new() -> Self {
        Self::with_ceiling(DEFAULT_CEILING)
    }

    /// A board with a non-default per-location ceiling. The ceiling is startup
    /// configuration and fixed for the board's lifetime.
    pub fn with_ceiling(ceiling: u32) -> Self {
        Self {
            offers: Vec::new(),
            next_id: 1,
            ceiling,
        }
    }

    /// Run the board over the given action stream
    pub async fn run(&mut self, mut stream: impl Stream<Item = Action> + Unpin) {
        while let Some(action) = stream.next().await {
            // a failed action should not stop the board; the outcome is logged
            let _ = self.apply(action);
        }
    }

    /// Apply a single action on top of the current board state
    pub fn apply(&mut self, action: Action) -> Result<(), BoardError> {
        match action {
            Action::Submit {
                location,
                price,
                volume,
                term,
                seller,
            } => {
                let result = self.submit(location, price, volume, term, seller);
                match &result {
                    Ok(offer) => {
                        info!(id = offer.id, %location, %price, volume, "offer submitted");
                    }
                    Err(e) => {
                        info!(%location, %price, volume, reason = %e, "submit skipped");
                    }
                }
                result.map(|_| ())?;
            }
            Action::Decide { offer, decision } => {
                let result = self.decide(offer, decision);
                match &result {
                    Ok(decided) => {
                        info!(id = offer, status = %decided.status, "offer decided");
                    }
                    Err(e) => {
                        info!(id = offer, reason = %e, "decision skipped");
                    }
                }
                result.map(|_| ())?;
            }
        }
        Ok(())
    }

    /// Submit a new offer; it enters the board as Pending.
    ///
    /// The id counter advances only on success, so a failed submission leaves
    /// the board unchanged.
    pub fn submit(
        &mut self,
        location: Location,
        price: Price,
        volume: u32,
        term: Term,
        seller: String,
    ) -> Result<&Offer, ValidationError> {
        if seller.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if volume < MIN_VOLUME {
            return Err(ValidationError::VolumeBelowMinimum(volume));
        }

        let id = self.next_id;
        self.next_id += 1;

        self.offers.push(Offer {
            id,
            location,
            price,
            volume,
            term,
            seller,
            status: OfferStatus::Pending,
        });

        Ok(&self.offers[self.offers.len() - 1])
    }

    /// Decide a pending offer.
    ///
    /// Accept re-checks the location's capacity at the instant of decision:
    /// the accepted volume plus this offer's volume must fit under the
    /// ceiling, otherwise the offer stays Pending. Reject always succeeds for
    /// a Pending offer. Deciding a non-pending offer is an error and mutates
    /// nothing.
    pub fn decide(&mut self, id: OfferId, decision: Decision) -> Result<&Offer, BoardError> {
        let idx = self
            .find(id)
            .ok_or(StateError::NotFound(id))?;

        let offer = &self.offers[idx];
        if offer.status != OfferStatus::Pending {
            return Err(StateError::NotPending(id, offer.status).into());
        }

        match decision {
            Decision::Accept => {
                let location = offer.location;
                let volume = offer.volume;
                let accepted = capacity::accepted_volume(self.list_by_location(location));
                // compare in u64 so an extreme volume cannot wrap the guard
                if accepted as u64 + volume as u64 > self.ceiling as u64 {
                    return Err(CapacityError {
                        location,
                        accepted,
                        requested: volume,
                        ceiling: self.ceiling,
                    }
                    .into());
                }
                self.offers[idx].status = OfferStatus::Accepted;
            }
            Decision::Reject => {
                self.offers[idx].status = OfferStatus::Rejected;
            }
        }

        Ok(&self.offers[idx])
    }

    /// All offers at a location, submission order preserved.
    pub fn list_by_location(&self, location: Location) -> impl Iterator<Item = &Offer> + '_ {
        self.offers.iter().filter(move |o| o.location == location)
    }

    /// All offers on the board, submission order.
    pub fn offers(&self) -> impl Iterator<Item = &Offer> + '_ {
        self.offers.iter()
    }

    pub fn get_offer(&self, id: OfferId) -> Option<&Offer> {
        self.find(id).map(|idx| &self.offers[idx])
    }

    /// Accepted volume at a location, bpd.
    pub fn accepted_volume(&self, location: Location) -> u32 {
        capacity::accepted_volume(self.list_by_location(location))
    }

    /// Barrels per day still available under the location's ceiling.
    pub fn remaining(&self, location: Location) -> i64 {
        capacity::remaining(self.accepted_volume(location), self.ceiling)
    }

    pub fn capacity_state(&self, location: Location) -> CapacityState {
        capacity::capacity_state(self.accepted_volume(location), self.ceiling)
    }

    /// The public board for a location: Pending and Accepted offers, best
    /// price first.
    pub fn visible_board(&self, location: Location) -> Vec<&Offer> {
        capacity::visible_board(self.list_by_location(location))
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }
}

/// Private API
impl Board {
    /// Locate an offer by id. Ids are strictly increasing in submission
    /// order, so the offer list is sorted by id.
    fn find(&self, id: OfferId) -> Option<usize> {
        self.offers.binary_search_by_key(&id, |o| o.id).ok()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
