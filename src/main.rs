use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing::{debug, error, info};

use caltodo::cli::Cli;
use caltodo::cmd::*;
use caltodo::config::{resolve_data_dir, Config};
use caltodo::db::TaskStore;
use caltodo::fields::WeekStart;
use caltodo::logging::{default_level, init_tracing, LogTarget};
use caltodo::storage::FileStorage;

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Resolved config, logging and storage for one invocation.
struct Session {
    storage: FileStorage,
    week_start: WeekStart,
    log_path: Option<PathBuf>,
}

impl Session {
    /// Interactive sessions log to a file in the data directory, everything
    /// else to stderr.
    fn open(cli: &Cli, interactive: bool) -> anyhow::Result<Self> {
        let mut cfg = Config::load(cli.config.as_deref())?;
        cfg.apply_overrides(cli.data_dir.as_deref(), cli.week_start);
        let data_dir = resolve_data_dir(&cfg).context("failed to resolve data directory")?;

        let target = if interactive {
            LogTarget::file_in(&data_dir)
        } else {
            LogTarget::Stderr
        };
        init_tracing(
            &default_level(cli.verbose, cli.quiet, cfg.log_level.as_deref()),
            &target,
        )?;
        info!(data_dir = %data_dir.display(), week_start = ?cfg.week_start, "starting caltodo");
        if let Some(path) = cfg.loaded_from.as_deref() {
            debug!(config = %path.display(), "loaded config file");
        }

        Ok(Session {
            storage: FileStorage::new(&data_dir),
            week_start: cfg.week_start,
            log_path: match target {
                LogTarget::File(path) => Some(path),
                LogTarget::Stderr => None,
            },
        })
    }

    fn load(cli: &Cli) -> anyhow::Result<(Self, TaskStore)> {
        let session = Session::open(cli, false)?;
        let store = TaskStore::load(&session.storage);
        Ok((session, store))
    }
}

fn run(mut cli: Cli) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let mut out = io::stdout().lock();

    match cli.command.take().unwrap_or(Commands::Ui) {
        // Completions need neither config nor storage.
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
        Commands::Ui => {
            let session = Session::open(&cli, true)?;
            cmd_ui(Box::new(session.storage), session.week_start, session.log_path.as_deref())
        }
        Commands::Add { text, date } => {
            let (mut session, mut store) = Session::load(&cli)?;
            let date = resolve_date(date.as_deref(), today)?;
            cmd_add(&mut store, &mut session.storage, &mut out, date, &text)
        }
        Commands::List { date, all } => {
            let (_, store) = Session::load(&cli)?;
            let date = resolve_date(date.as_deref(), today)?;
            cmd_list(&store, &mut out, date, all)
        }
        Commands::Toggle { id, date } => {
            let (mut session, mut store) = Session::load(&cli)?;
            let date = resolve_date(date.as_deref(), today)?;
            cmd_toggle(&mut store, &mut session.storage, &mut out, date, id)
        }
        Commands::Delete { id, date } => {
            let (mut session, mut store) = Session::load(&cli)?;
            let date = resolve_date(date.as_deref(), today)?;
            cmd_delete(&mut store, &mut session.storage, &mut out, date, id)
        }
        Commands::Cal { month } => {
            let (session, store) = Session::load(&cli)?;
            cmd_cal(store, &mut out, month, today, session.week_start)
        }
    }
}
