//! `alerta-febre`: register, list, edit and delete fever records from the
//! command line.

mod cli;
mod commands;

use anyhow::Context;
use clap::Parser;

use alerta_febre_core::config::{get_config, load_config};
use alerta_febre_core::telemetry::{get_subscriber, init_subscriber};

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => load_config(path),
        None => get_config(),
    }
    .context("Failed to read the config")?;

    if let Some(url) = &cli.api_url {
        settings.api.base_url = url.clone();
    }

    let subscriber = get_subscriber(&settings.log_level, std::io::stderr);
    if init_subscriber(subscriber).is_err() {
        eprintln!("logging already initialised");
    }

    commands::run(cli.command, &settings).await
}
