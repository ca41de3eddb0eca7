// src/main.rs
//
// Startup:
// 1. Configuration
// 2. Logging
// 3. Load collections (corrupt file = stop)
// 4. Bootstrap sets when none are stored (source failure = stop)
// 5. Run one command

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use log::info;
use tracing_subscriber::EnvFilter;

use cardcollection::{AppConfig, AppError, AppState, Card, EntityId, ErrorResponse, RefreshOutcome};

const CONFIG_ENV: &str = "CARDCOLLECTION_CONFIG";

const USAGE: &str = "usage: cardcollection <command>

commands:
  list [query]                 list cards by name, optionally filtered
  sets                         list all known sets
  add <name> [set code]        add one card
  delete <id>                  delete a card and its images
  preview <id>                 show the official image URL of a card
  update-sets                  compare sets with the online source
  export-json <path>           write all cards as JSON
  export-csv <path>            write all cards as a table";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(e);
            ExitCode::FAILURE
        }
    }
}

/// Print a failed run once, on stderr
fn report(e: anyhow::Error) {
    if e.chain().count() > 1 {
        eprintln!("error: {:#}", e);
        return;
    }

    match e.downcast::<AppError>() {
        Ok(app_error) => {
            let response = ErrorResponse::from_app_error(app_error);
            let label = if response.fatal { "fatal error" } else { "error" };
            match response.details {
                Some(details) => eprintln!("{}: {}: {}", label, response.message, details),
                None => eprintln!("{}: {}", label, response.message),
            }
        }
        Err(other) => eprintln!("error: {:#}", other),
    }
}

fn run() -> anyhow::Result<()> {
    // 1. CONFIGURATION
    let config_path = match env::var_os(CONFIG_ENV) {
        Some(path) => PathBuf::from(path),
        None => AppConfig::default_path()?,
    };
    let config = AppConfig::load(&config_path)
        .with_context(|| format!("failed to load configuration from {:?}", config_path))?;

    // 2. LOGGING
    init_logging(&config.log_level);
    info!("Starting with data directory {:?}", config.data_dir);

    // 3. COLLECTIONS
    let state = AppState::build(config)?;

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    // 4. SETS
    runtime
        .block_on(state.set_service.initialize())
        .context("FATAL: no set data available")?;

    // 5. COMMAND
    let args: Vec<String> = env::args().skip(1).collect();
    let command: Vec<&str> = args.iter().map(String::as_str).collect();

    match command.as_slice() {
        [] | ["list"] => {
            for card in state.card_service.list_cards_sorted_by_name() {
                println!("{}", card);
            }
        }
        ["list", words @ ..] => {
            for card in state.card_service.search_cards(&words.join(" ")) {
                println!("{}", card);
            }
        }
        ["sets"] => {
            for set in state.set_service.list_sets() {
                let released = set
                    .release_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{:<8} {:<12} {}", set.code, released, set.name);
            }
        }
        ["add", name] => add_card(&state, name, None)?,
        ["add", name, code] => add_card(&state, name, Some(*code))?,
        ["delete", id] => {
            let id = parse_id(id)?;
            if state.card_service.delete_card(id)? {
                println!("Card {} deleted", id);
            } else {
                println!("No card with id {}", id);
            }
        }
        ["preview", id] => {
            let id = parse_id(id)?;
            let url = runtime.block_on(
                state
                    .card_service
                    .preview_image_url(id, state.image_source.as_ref()),
            )?;
            match url {
                Some(url) => println!("{}", url),
                None => println!("No image available for card {}", id),
            }
        }
        ["update-sets"] => match runtime.block_on(state.set_service.update_from_source()) {
            Ok(RefreshOutcome::UpToDate { latest }) => {
                println!("Sets are up to date, latest is {}", latest);
            }
            Ok(RefreshOutcome::Replaced { latest, count }) => {
                println!("{} sets stored, latest is {}", count, latest);
            }
            Err(e) => {
                // Recoverable: the stored sets are still in place
                println!("Set update failed ({}), stored sets were kept", e);
            }
        },
        ["export-json", path] => {
            let count = state.export_service.export_json(Path::new(path))?;
            println!("{} cards exported to {}", count, path);
        }
        ["export-csv", path] => {
            let count = state.export_service.export_csv(Path::new(path))?;
            println!("{} cards exported to {}", count, path);
        }
        _ => bail!("unknown command\n\n{}", USAGE),
    }

    Ok(())
}

fn parse_id(raw: &str) -> anyhow::Result<EntityId> {
    raw.parse()
        .with_context(|| format!("invalid card id {:?}", raw))
}

fn add_card(state: &AppState, name: &str, set_code: Option<&str>) -> anyhow::Result<()> {
    let mut card = Card::new(name);
    if let Some(code) = set_code {
        let set = state
            .set_service
            .get_set(code)
            .with_context(|| format!("unknown set code {:?}", code))?;
        card = card.with_set(set);
    }

    let id = state.card_service.add_card(card)?;
    println!("Card {} added", id);
    Ok(())
}

/// `RUST_LOG` wins over the configured level
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
