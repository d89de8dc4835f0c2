mod config;
mod session;

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use clap::Parser;
use floor_canvas::engine::EngineCore;
use floor_store::{HttpStore, Synchronizer};
use tracing::{debug, info, warn};

use config::{Cli, CliError, Command};
use session::Session;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Load `.env` before parsing so its values feed clap's env fallbacks.
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_writer(io::stderr).with_max_level(cli.log_level).init();
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "ignoring unreadable .env"),
    }

    match &cli.command {
        Command::Search { query } => run_search(&cli, query).await,
        Command::Replay { input, offline } => run_replay(&cli, input, *offline).await,
    }
}

async fn run_search(cli: &Cli, query: &str) -> Result<(), CliError> {
    let sync = Synchronizer::new(HttpStore::new(cli.store_config()?)?);
    let mut session = Session::new(EngineCore::with_config(cli.editor_config()), Some(&sync));
    for notice in session.open(cli.floor_plan()).await {
        session::write_json_line(&mut io::stderr(), &notice)?;
    }

    let hits = session.search(query);
    info!(query, hits = hits.len(), "search complete");
    let rendered = serde_json::to_string_pretty(&hits)?;
    println!("{rendered}");
    Ok(())
}

async fn run_replay(cli: &Cli, input: &str, offline: bool) -> Result<(), CliError> {
    let reader: Box<dyn BufRead> = if input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(input).map_err(|source| CliError::OpenScript { path: input.to_owned(), source })?;
        Box::new(BufReader::new(file))
    };

    let sync = if offline { None } else { Some(Synchronizer::new(HttpStore::new(cli.store_config()?)?)) };
    let mut session = Session::new(EngineCore::with_config(cli.editor_config()), sync.as_ref());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for notice in session.open(cli.floor_plan()).await {
        session::write_json_line(&mut out, &notice)?;
    }
    let events = session::run_script(&mut session, reader, &mut out).await?;
    info!(events, elements = session.core().element_count(), "replay finished");
    Ok(())
}
