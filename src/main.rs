use billed::args::{Args, Command};
use billed::view::TerminalSurface;
use billed::{commands, Config, Error, ErrorType, Mode, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().billed_home().path();

    // When BILLED_IN_TEST_MODE is set and non-empty the bills are served from memory instead of
    // the bills API.
    let mode = Mode::from_env();

    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.api_url()).await?.print(),

        Command::Login(login_args) => {
            let config = load_config(home).await?;
            commands::login(config, login_args).await?.print()
        }

        Command::Bills(_) => {
            let config = load_config(home).await?;
            let surface = Box::new(TerminalSurface::stdout());
            commands::bills(config, mode, surface).await?.print()
        }

        Command::NewBill(new_bill_args) => {
            let config = load_config(home).await?;
            let surface = Box::new(TerminalSurface::stdout());
            commands::new_bill(config, mode, *new_bill_args.clone(), surface)
                .await?
                .print()
        }

        Command::Proof(proof_args) => {
            let config = load_config(home).await?;
            let surface = Box::new(TerminalSurface::stdout());
            commands::proof(config, mode, proof_args, surface)
                .await?
                .print()
        }
    };
    Ok(())
}

async fn load_config(home: &Path) -> Result<Config> {
    Config::load(home)
        .await
        .map_err(|e| Error::new(ErrorType::Config, e))
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
