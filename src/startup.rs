/// # Wiring of the Song List Screen
///
/// Builds the fetcher, the terminal table and the spinner, hands them to a
/// [`SongListController`] and drives it.
///
/// # Steps:
/// 1. Loads the configuration (built-in defaults when no file exists)
/// 2. Builds the HTTP fetcher for the configured endpoint
/// 3. Runs either the interactive loop or a single refresh
///
use crate::configuration::{self, ConfigFolder, Settings};
use crate::controller::{FetchResult, RefreshOutcome, SongListController, SpinnerIndicator};
use crate::render::SongTable;
use crate::song_client::HttpSongFetcher;
use anyhow::{bail, Context};
use std::io::{self, Stdout};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

type TerminalController = SongListController<SongTable<Stdout>, SpinnerIndicator>;

/// Loads settings from the config folder, or defaults if it was never created
/// or there is no home directory. `url_override` wins over both.
pub fn load_settings(
    cfg_folder: Option<&ConfigFolder>,
    url_override: Option<&str>,
) -> anyhow::Result<Settings> {
    let config_path = cfg_folder
        .map(|folder| folder.config_file.as_path())
        .filter(|path| path.exists());

    let mut settings = if let Some(config_path) = config_path {
        let config_file = config_path
            .to_str()
            .context("Configuration path is not valid UTF-8")?;
        info!(config_file, "Loading configuration");
        configuration::get_configuration(Some(config_file))
            .context("Unable to parse configuration file")?
    } else {
        info!("No configuration file found, using the built-in endpoint");
        configuration::get_configuration(None).context("Unable to read configuration")?
    };

    if let Some(url) = url_override {
        settings.endpoint_url = url.to_string();
    }

    Ok(settings)
}

fn build_controller(
    settings: &Settings,
) -> anyhow::Result<(TerminalController, UnboundedReceiver<FetchResult>)> {
    let fetcher = HttpSongFetcher::new(&settings.endpoint_url, settings.request_timeout())
        .context("Failed to build the HTTP client")?;
    info!(url = fetcher.url(), "Using song feed");

    let table = SongTable::new(io::stdout(), &settings.date_format);
    Ok(SongListController::new(
        Arc::new(fetcher),
        table,
        SpinnerIndicator::new(),
    ))
}

/// Interactive screen: Enter refreshes, `q` quits.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let (mut controller, mut results) = build_controller(&settings)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_controls();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(input) = line.context("Failed to read from stdin")? else {
                    debug!("stdin closed, leaving");
                    break;
                };

                match input.trim() {
                    "q" | "quit" => break,
                    "" | "r" | "refresh" => {
                        controller.request_refresh();
                    }
                    other => println!("\x1b[33mUnknown command '{}'.\x1b[0m", other),
                }
            }
            Some(result) = results.recv() => {
                controller.complete_refresh(result);
                print_controls();
            }
        }
    }

    Ok(())
}

/// Performs one refresh cycle and exits; fails if the refresh fails.
pub async fn fetch_once(settings: Settings) -> anyhow::Result<()> {
    let (mut controller, mut results) = build_controller(&settings)?;

    match controller.refresh(&mut results).await {
        RefreshOutcome::Failed(message) => bail!("Refresh failed: {}", message),
        RefreshOutcome::Replaced { .. } | RefreshOutcome::Ignored => Ok(()),
    }
}

fn print_controls() {
    println!("\x1b[1m\x1b[34mPress Enter to refresh the song list, or type 'q' to quit.\x1b[0m");
}
