mod api;
mod config;
mod session;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use deck::error::DeckError;
use deck::layout::Point;
use deck::model::{ItemId, NewItem};
use deck::svg::SvgSurface;
use tracing::info;

use crate::api::{ApiError, HttpApi};
use crate::config::{Config, ConfigError};
use crate::session::{AssumeYes, Confirm, DeckSession, SessionError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("failed to write {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

#[derive(Parser, Debug)]
#[command(name = "ferrydeck", about = "Ferry deck load planner client")]
struct Cli {
    /// Optimizer API root; overrides FERRYDECK_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Overrides FERRYDECK_CONNECT_TIMEOUT_SECS.
    #[arg(long)]
    connect_timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Optimize, print load statistics, and optionally render the deck.
    Load {
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Add an item at the next free slot.
    Add {
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
        #[arg(long)]
        length: f64,
        #[arg(long)]
        weight: f64,
        #[arg(long, default_value = "Container")]
        kind: String,
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    Delete {
        id: ItemId,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Click the rendered deck at surface coordinates.
    Click {
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
        #[arg(long)]
        yes: bool,
        #[arg(long)]
        svg: Option<PathBuf>,
    },
}

/// Confirmation read from stdin; anything but `y`/`yes` declines.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        eprint!("{prompt} [y/N] ");
        if io::stderr().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

type Session = DeckSession<HttpApi, SvgSurface>;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = Config::from_env()?.with_overrides(cli.base_url.as_deref(), cli.connect_timeout_secs)?;
    info!(base_url = %config.base_url, "using optimizer");
    let api = HttpApi::new(&config)?;
    let mut session = Session::new(api, SvgSurface::new());

    match cli.command {
        Command::Load { svg } => {
            // The surface shows a failed load too, so export before reporting it.
            let loaded = session.reload().await;
            if loaded.is_ok() {
                print_stats(&session)?;
            }
            write_svg(session, svg.as_deref())?;
            loaded?;
        }
        Command::Add { width, height, length, weight, kind, svg } => {
            session.reload().await?;
            let item = NewItem { kind, ..NewItem::container(width, height, length, weight) };
            let created = session.add_item(item).await?;
            println!("added item #{} at x={}m z={}m", created.id, created.position_x, created.position_z);
            print_stats(&session)?;
            write_svg(session, svg.as_deref())?;
        }
        Command::Delete { id, yes } => {
            session.reload().await?;
            if yes {
                session.delete_item(id, &mut AssumeYes).await?;
            } else {
                session.delete_item(id, &mut StdinConfirm).await?;
            }
            println!("deleted item #{id}");
            print_stats(&session)?;
        }
        Command::Click { x, y, yes, svg } => {
            session.reload().await?;
            let at = Point::new(x, y);
            let deleted = if yes {
                session.click(at, &mut AssumeYes).await?
            } else {
                session.click(at, &mut StdinConfirm).await?
            };
            match deleted {
                Some(id) => println!("deleted item #{id}"),
                None => println!("no delete control at ({x}, {y})"),
            }
            print_stats(&session)?;
            write_svg(session, svg.as_deref())?;
        }
    }
    Ok(())
}

fn print_stats(session: &Session) -> Result<(), CliError> {
    let stats = session.core().stats()?;
    print!("{stats}");
    Ok(())
}

/// Write the rendered deck to `svg`, when requested.
fn write_svg(session: Session, svg: Option<&Path>) -> Result<(), CliError> {
    if let Some(path) = svg {
        let doc = session.into_surface().finish();
        std::fs::write(path, doc).map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
        info!(path = %path.display(), "deck rendered");
    }
    Ok(())
}
