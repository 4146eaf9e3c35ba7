use anyhow::Context;
use clap::{Parser, Subcommand};
use compute::summarize;
use data::{Config, DEFAULT_STORE_PATH};
use read::parse_input;
use std::{io::Write, path::PathBuf, process::ExitCode};
use store::Store;
use thiserror::Error;
use write::format_record;

mod compute;
mod data;
mod read;
mod store;
mod write;

/// Append day/condition/high/low records to a flat file, list them back, and
/// summarize them.
#[derive(Parser, Debug)]
#[command(name = "recstore", version, about)]
struct Cli {
    /// Path of the store file
    #[arg(long, global = true, env = "RECSTORE_PATH", default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Reset the store to empty
    Init,
    /// Validate and append one record
    Add {
        /// Fields as key=value (day, condition, high, low)
        items: Vec<String>,
    },
    /// Print every stored record
    List,
    /// Print the record count and the total of the numeric field
    Summary,
}

/// Rejected input leaves the store untouched and exits with 2; anything that
/// went wrong reading or writing exits with 1.
#[derive(Error, Debug)]
enum CommandError {
    #[error(transparent)]
    Rejected(#[from] data::Error),
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl CommandError {
    fn exit_code(&self) -> u8 {
        match self {
            CommandError::Rejected(_) => 2,
            CommandError::Failed(_) => 1,
        }
    }
}

fn run<W: Write>(command: Command, store: &Store, out: &mut W) -> Result<(), CommandError> {
    match command {
        Command::Init => store.initialize()?,
        Command::Add { items } => {
            let record = parse_input(&items, store.schema())?;
            store.append(&record)?;
        }
        Command::List => {
            for record in store.load_all()? {
                writeln!(out, "{}", format_record(&record, store.schema()))
                    .context("cannot write output")?;
            }
        }
        Command::Summary => {
            let summary = summarize(store.load_all()?, store.schema());
            writeln!(out, "{summary}").context("cannot write output")?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let store = Store::new(Config {
        store_path: cli.store,
        ..Config::default()
    });
    match run(cli.command, &store, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::from(e.exit_code())
        }
    }
}
