//! Capacity accounting for one delivery point.
//!
//! Pure functions over a snapshot of a location's offers. No IO, no state;
//! the board calls these with a fresh snapshot on every query.

use std::fmt;

use crate::model::{Offer, OfferStatus};

/// Fraction of the ceiling at which a location reads as near capacity.
const NEAR_CAPACITY_NUM: u64 = 4;
const NEAR_CAPACITY_DEN: u64 = 5;

/// How full a location is relative to its ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityState {
    /// Open for bids.
    Open,
    /// At or past 80% of the ceiling.
    NearCapacity,
    /// At or past the ceiling.
    Full,
}

impl fmt::Display for CapacityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CapacityState::Open => "open",
            CapacityState::NearCapacity => "near-capacity",
            CapacityState::Full => "full",
        };
        f.write_str(s)
    }
}

/// Sum of volumes over Accepted offers. Zero when none are accepted.
pub fn accepted_volume<'a>(offers: impl IntoIterator<Item = &'a Offer>) -> u32 {
    offers
        .into_iter()
        .filter(|offer| offer.status == OfferStatus::Accepted)
        .map(|offer| offer.volume)
        .sum()
}

/// Barrels per day still available under the ceiling.
///
/// Plain subtraction, no clamping: the accept guard keeps this non-negative,
/// and a negative result would mean over-acceptance worth surfacing.
pub fn remaining(accepted: u32, ceiling: u32) -> i64 {
    ceiling as i64 - accepted as i64
}

/// Classify a location's fill level against its ceiling.
pub fn capacity_state(accepted: u32, ceiling: u32) -> CapacityState {
    if accepted >= ceiling {
        CapacityState::Full
    } else if accepted as u64 * NEAR_CAPACITY_DEN >= ceiling as u64 * NEAR_CAPACITY_NUM {
        CapacityState::NearCapacity
    } else {
        CapacityState::Open
    }
}

/// The public auction board for one location: Pending and Accepted offers,
/// best (lowest) price differential first. Ties keep submission order;
/// Rejected offers never appear.
pub fn visible_board<'a>(offers: impl IntoIterator<Item = &'a Offer>) -> Vec<&'a Offer> {
    let mut board: Vec<&Offer> = offers
        .into_iter()
        .filter(|offer| offer.status != OfferStatus::Rejected)
        .collect();
    // sort_by_key is stable, so insertion order breaks price ties
    board.sort_by_key(|offer| offer.price);
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Price;
    use crate::model::{Location, OfferId, Term};

    fn offer(id: OfferId, price: i64, volume: u32, status: OfferStatus) -> Offer {
        Offer {
            id,
            location: Location::Victoria,
            price: Price::from_cents(price),
            volume,
            term: Term::OneMonth,
            seller: format!("seller {id}"),
            status,
        }
    }

    #[test]
    fn accepted_volume_is_zero_without_accepted_offers() {
        let offers = [
            offer(1, 250, 5000, OfferStatus::Pending),
            offer(2, -400, 2000, OfferStatus::Rejected),
        ];
        assert_eq!(accepted_volume(&offers), 0);
    }

    #[test]
    fn accepted_volume_sums_only_accepted() {
        let offers = [
            offer(1, 250, 5000, OfferStatus::Accepted),
            offer(2, 210, 3600, OfferStatus::Accepted),
            offer(3, -400, 2000, OfferStatus::Pending),
        ];
        assert_eq!(accepted_volume(&offers), 8600);
    }

    #[test]
    fn remaining_is_plain_subtraction() {
        assert_eq!(remaining(0, 30_000), 30_000);
        assert_eq!(remaining(5000, 30_000), 25_000);
        assert_eq!(remaining(30_000, 30_000), 0);
    }

    #[test]
    fn remaining_goes_negative_on_over_acceptance() {
        // unreachable through decide(), but the function does not clamp
        assert_eq!(remaining(31_000, 30_000), -1000);
    }

    #[test]
    fn capacity_state_thresholds() {
        assert_eq!(capacity_state(0, 30_000), CapacityState::Open);
        assert_eq!(capacity_state(23_999, 30_000), CapacityState::Open);
        assert_eq!(capacity_state(24_000, 30_000), CapacityState::NearCapacity);
        assert_eq!(capacity_state(29_999, 30_000), CapacityState::NearCapacity);
        assert_eq!(capacity_state(30_000, 30_000), CapacityState::Full);
        assert_eq!(capacity_state(31_000, 30_000), CapacityState::Full);
    }

    #[test]
    fn capacity_state_display() {
        assert_eq!(CapacityState::Open.to_string(), "open");
        assert_eq!(CapacityState::NearCapacity.to_string(), "near-capacity");
        assert_eq!(CapacityState::Full.to_string(), "full");
    }

    #[test]
    fn visible_board_excludes_rejected() {
        let offers = [
            offer(1, 250, 5000, OfferStatus::Pending),
            offer(2, -400, 2000, OfferStatus::Rejected),
            offer(3, 210, 3600, OfferStatus::Accepted),
        ];
        let board = visible_board(&offers);
        let ids: Vec<OfferId> = board.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn visible_board_sorts_by_price_ascending() {
        let offers = [
            offer(1, 250, 5000, OfferStatus::Pending),
            offer(2, -400, 2000, OfferStatus::Pending),
            offer(3, 0, 3600, OfferStatus::Accepted),
        ];
        let board = visible_board(&offers);
        let ids: Vec<OfferId> = board.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn visible_board_breaks_price_ties_by_submission_order() {
        let offers = [
            offer(7, 100, 1000, OfferStatus::Pending),
            offer(8, 100, 2000, OfferStatus::Pending),
            offer(9, 100, 3000, OfferStatus::Accepted),
        ];
        let board = visible_board(&offers);
        let ids: Vec<OfferId> = board.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![7, 8, 9]);
    }
}
