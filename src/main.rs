use std::env;

use auction_block::Board;
use auction_block::csv::{read_actions, write_board, write_summary};
use tokio_stream::wrappers::ReceiverStream;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let path = env::args()
        .nth(1)
        .expect("usage: auction-block <actions.csv>");

    if !path.ends_with(".csv") {
        warn!(path, "input file seems to not be a csv file");
    }

    let mut board = Board::new();
    let (action_sender, action_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in read_actions(&path) {
            match result {
                Ok(action) => {
                    action_sender.send(action).await.unwrap();
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    board.run(ReceiverStream::new(action_receiver)).await;

    write_summary(&board);
    println!();
    write_board(&board);
}
