//! Core domain types for the auction board.

use std::fmt;
use std::str::FromStr;

use crate::Price;
use crate::board::ValidationError;

/// Offer identifier, assigned by the board in submission order.
pub type OfferId = u32;

/// Minimum offer size in barrels per day.
pub const MIN_VOLUME: u32 = 100;

/// A delivery point offers can be tagged to.
///
/// The set is closed: locations are startup configuration, not user data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Victoria,
    Stampede,
    Vernal,
    Pelican,
    PortMackenzie,
}

impl Location {
    /// All delivery points, in the order reports iterate them.
    pub const ALL: [Location; 5] = [
        Location::Victoria,
        Location::Stampede,
        Location::Vernal,
        Location::Pelican,
        Location::PortMackenzie,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Location::Victoria => "Victoria, Texas",
            Location::Stampede => "Stampede, North Dakota",
            Location::Vernal => "Vernal, Utah",
            Location::Pelican => "Pelican, Louisiana",
            Location::PortMackenzie => "Port Mackenzie",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Location {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .into_iter()
            .find(|loc| loc.name() == s)
            .ok_or_else(|| ValidationError::UnknownLocation(s.to_string()))
    }
}

/// Contract length of an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    OneMonth,
    ThreeMonths,
    SixMonths,
}

impl Term {
    pub fn as_str(&self) -> &'static str {
        match self {
            Term::OneMonth => "1mo",
            Term::ThreeMonths => "3mo",
            Term::SixMonths => "6mo",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Term {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1mo" => Ok(Term::OneMonth),
            "3mo" => Ok(Term::ThreeMonths),
            "6mo" => Ok(Term::SixMonths),
            other => Err(ValidationError::UnknownTerm(other.to_string())),
        }
    }
}

/// Lifecycle state of an offer.
///
/// The only transitions are Pending -> Accepted and Pending -> Rejected;
/// both end states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OfferStatus {
    /// Submitted, awaiting an admin decision.
    #[default]
    Pending,
    /// Counted against the location's capacity ceiling.
    Accepted,
    /// Off the board; never shown and never counted.
    Rejected,
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OfferStatus::Pending => "pending",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// An admin decision on a pending offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

/// One seller bid: a volume of crude at a price differential, for a term,
/// at a delivery point.
#[derive(Debug, Clone)]
pub struct Offer {
    pub id: OfferId,
    pub location: Location,
    /// Price differential against the benchmark; may be negative.
    pub price: Price,
    /// Barrels per day.
    pub volume: u32,
    pub term: Term,
    pub seller: String,
    pub status: OfferStatus,
}

/// An action representing the possible inputs of the board.
#[derive(Debug, Clone)]
pub enum Action {
    /// A seller submits a new offer; it enters the board as Pending.
    Submit {
        location: Location,
        price: Price,
        volume: u32,
        term: Term,
        seller: String,
    },
    /// The admin accepts or rejects a pending offer.
    Decide { offer: OfferId, decision: Decision },
}
