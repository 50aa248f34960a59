//! Command-line interface for chess-place-web

use clap::{Parser, Subcommand};

use chess_place_core::DEFAULT_CHANNEL;

/// Chess Place - non-attacking piece placement service
#[derive(Parser, Debug)]
#[command(name = "chess-place")]
#[command(about = "Enumerates mutually non-attacking chess piece placements", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service and the channel subscriber
    Serve {
        /// Address to listen on
        #[arg(long, env = "CHESS_PLACE_BIND", default_value = "127.0.0.1:3000")]
        bind: String,

        /// Channel the background subscriber listens on
        #[arg(long, env = "CHESS_PLACE_CHANNEL", default_value = DEFAULT_CHANNEL)]
        channel: String,

        /// Refuse searches whose board set grows past this size
        #[arg(long, env = "CHESS_PLACE_BOARD_LIMIT", default_value = "1000000")]
        board_limit: Option<usize>,

        /// Largest board side a request may ask for
        #[arg(long, env = "CHESS_PLACE_MAX_SIDE", default_value_t = 64)]
        max_side: i32,
    },

    /// Compute placements once and print them as JSON
    Place {
        /// Piece types in placement order, e.g. `knight pawn king`
        #[arg(required = true)]
        pieces: Vec<String>,

        #[arg(long, default_value_t = 8)]
        columns: i32,

        #[arg(long, default_value_t = 8)]
        rows: i32,

        #[arg(long, env = "CHESS_PLACE_BOARD_LIMIT")]
        board_limit: Option<usize>,
    },
}
