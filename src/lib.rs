pub mod board;
pub mod csv;
pub mod model;
pub mod price;

pub use board::Board;
pub use model::{Action, Decision, Location, Offer, OfferId, OfferStatus, Term};
pub use price::Price;
