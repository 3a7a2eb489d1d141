//! ReachInbox - A line-oriented shell over the onebox client
//!
//! This is the main entry point for the ReachInbox application.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{error, info, warn};
use mail::api::mock::mock_threads;
use mail::{
    ClientConfig, FileStorage, InMemoryMailApi, LocalStorage, MailApi, MemoryStorage,
    ReachInboxClient, Session,
};

mod app;
mod input;
mod views;

use app::{Flow, ReachInboxApp};
use input::Command;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Bootstrap config directory
    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    let offline = std::env::args().skip(1).any(|arg| arg == "--offline");

    let config = match ClientConfig::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Using default settings: {:#}", e);
            if let Some(path) = ClientConfig::default_settings_path() {
                warn!("Settings are read from {}", path.display());
            }
            ClientConfig::default()
        }
    };

    let storage: Arc<dyn LocalStorage> = match FileStorage::open_default() {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
            warn!("Session will not be saved: {:#}", e);
            Arc::new(MemoryStorage::new())
        }
    };
    let session = Session::init(storage).context("Failed to restore session")?;

    let api: Arc<dyn MailApi> = if offline {
        info!("Offline mode: serving demo emails");
        Arc::new(InMemoryMailApi::with_threads(mock_threads()))
    } else {
        Arc::new(ReachInboxClient::new(&config, session.token_handle())?)
    };

    let mut app = ReachInboxApp::new(config, session, api);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = app.start(&mut out) {
        error!("{:#}", e);
        writeln!(out, "Error: {}", e)?;
    }
    info!("ReachInbox started successfully");

    let stdin = io::stdin();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        match app.handle(command, &mut out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                error!("{:#}", e);
                writeln!(out, "Error: {}", e)?;
            }
        }
    }

    Ok(())
}
