use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chess_place_core::channel::encode_boards;
use chess_place_core::{BoardSet, Broker, Dimensions, PlacementSearch};

mod cli;
mod error;
mod routes;
mod subscriber;

use cli::{Cli, Command};

pub struct AppState {
    pub broker: Arc<Broker>,
    pub channel: String,
    pub board_limit: Option<usize>,
    /// Largest accepted board side for HTTP requests
    pub max_side: i32,
    latest: Mutex<Option<BoardSet>>,
}

impl AppState {
    pub fn new(broker: Arc<Broker>, channel: String, board_limit: Option<usize>, max_side: i32) -> Self {
        Self {
            broker,
            channel,
            board_limit,
            max_side,
            latest: Mutex::new(None),
        }
    }

    pub fn latest(&self) -> Option<BoardSet> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set_latest(&self, boards: BoardSet) {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(boards);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            bind,
            channel,
            board_limit,
            max_side,
        } => serve(bind, channel, board_limit, max_side).await,
        Command::Place {
            pieces,
            columns,
            rows,
            board_limit,
        } => place(pieces, columns, rows, board_limit),
    }
}

async fn serve(bind: String, channel: String, board_limit: Option<usize>, max_side: i32) -> Result<()> {
    let broker = Arc::new(Broker::default());
    let state = Arc::new(AppState::new(broker.clone(), channel, board_limit, max_side));

    let sub = broker.subscribe(&state.channel);
    tokio::spawn(subscriber::run(state.clone(), sub));

    let channel = state.channel.clone();
    let app = routes::router(state);
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;

    info!(%bind, %channel, "server running");
    axum::serve(listener, app).await?;
    Ok(())
}

fn place(pieces: Vec<String>, columns: i32, rows: i32, board_limit: Option<usize>) -> Result<()> {
    let dims = Dimensions::new(columns, rows)?;
    let mut search = PlacementSearch::from_names(&pieces, dims)?;
    if let Some(limit) = board_limit {
        search = search.with_board_limit(limit);
    }

    let boards = search.run()?;
    println!("{}", encode_boards(&boards)?);
    Ok(())
}
