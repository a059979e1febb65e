use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::board::{Board, ValidationError};
use crate::model::{Action, Decision, Location, OfferId, Term};
use crate::Price;

/// Errors that can occur when parsing csv rows
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized action '{action}'")]
    UnrecognizedAction { line: usize, action: String },

    #[error("line {line}: {action} missing {field}")]
    MissingField {
        line: usize,
        action: String,
        field: &'static str,
    },

    #[error("line {line}: {source}")]
    Invalid {
        line: usize,
        source: ValidationError,
    },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    action: String,
    offer: Option<OfferId>,
    location: Option<String>,
    price: Option<f64>,
    volume: Option<u32>,
    term: Option<String>,
    seller: Option<String>,
}

#[derive(Debug, Serialize)]
struct SummaryRow {
    location: String,
    accepted: u32,
    remaining: i64,
    state: String,
}

#[derive(Debug, Serialize)]
struct BoardRow {
    id: OfferId,
    location: String,
    seller: String,
    price: String,
    volume: u32,
    term: String,
    status: String,
}

/// Read board actions from a csv file
pub fn read_actions(path: impl AsRef<Path>) -> impl Iterator<Item = Result<Action, CsvError>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .expect("failed to open csv file");

    reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;

            let require = |field: &'static str| CsvError::MissingField {
                line,
                action: row.action.clone(),
                field,
            };

            match row.action.as_str() {
                "submit" => {
                    let location = row.location.as_deref().ok_or_else(|| require("location"))?;
                    let location: Location = location
                        .parse()
                        .map_err(|source| CsvError::Invalid { line, source })?;
                    let price = row.price.ok_or_else(|| require("price"))?;
                    let volume = row.volume.ok_or_else(|| require("volume"))?;
                    let term = row.term.as_deref().ok_or_else(|| require("term"))?;
                    let term: Term = term
                        .parse()
                        .map_err(|source| CsvError::Invalid { line, source })?;
                    let seller = row.seller.clone().ok_or_else(|| require("seller"))?;

                    Ok(Action::Submit {
                        location,
                        price: Price::from_float(price),
                        volume,
                        term,
                        seller,
                    })
                }
                "accept" => {
                    let offer = row.offer.ok_or_else(|| require("offer"))?;
                    Ok(Action::Decide {
                        offer,
                        decision: Decision::Accept,
                    })
                }
                "reject" => {
                    let offer = row.offer.ok_or_else(|| require("offer"))?;
                    Ok(Action::Decide {
                        offer,
                        decision: Decision::Reject,
                    })
                }
                other => Err(CsvError::UnrecognizedAction {
                    line,
                    action: other.to_string(),
                }),
            }
        })
}

/// Write the per-location capacity summary to stdout in csv format
pub fn write_summary(board: &Board) {
    let stdout = io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    for location in Location::ALL {
        let accepted = board.accepted_volume(location);
        let row = SummaryRow {
            location: location.to_string(),
            accepted,
            remaining: board.remaining(location),
            state: board.capacity_state(location).to_string(),
        };
        writer.serialize(&row).expect("failed to write csv row");
    }

    writer.flush().expect("failed to flush csv writer");
}

/// Write the visible auction board to stdout in csv format, per location in
/// report order, best price first within each location
pub fn write_board(board: &Board) {
    let stdout = io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    for location in Location::ALL {
        for offer in board.visible_board(location) {
            let row = BoardRow {
                id: offer.id,
                location: offer.location.to_string(),
                seller: offer.seller.clone(),
                price: offer.price.to_string(),
                volume: offer.volume,
                term: offer.term.to_string(),
                status: offer.status.to_string(),
            };
            writer.serialize(&row).expect("failed to write csv row");
        }
    }

    writer.flush().expect("failed to flush csv writer");
}
