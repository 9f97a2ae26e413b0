use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use songlist::configuration::{create_config, ConfigFolder};
use songlist::startup::{fetch_once, load_settings, run};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the song table.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Command::new("songlist")
        .about("🎵 Browse a remote JSON song feed from your terminal 🎵")
        .subcommand(
            Command::new("run")
                .about("🚀 Open the song list; press Enter to refresh")
                .arg(url_arg()),
        )
        .subcommand(
            Command::new("fetch")
                .about("📥 Load the song list once and print it")
                .arg(url_arg()),
        )
        .subcommand(
            Command::new("config").about("🛠️ Create or update configuration file for songlist"),
        )
        .get_matches();

    // Only `config` needs a home directory; the others fall back to defaults.
    let cfg_folder = ConfigFolder::new().ok();

    match args.subcommand() {
        Some(("run", sub_args)) => {
            println!("\x1b[1m\x1b[34mStarting songlist...\x1b[0m");
            let settings = load_settings(cfg_folder.as_ref(), url_override(sub_args))?;
            run(settings).await
        }
        Some(("fetch", sub_args)) => {
            let settings = load_settings(cfg_folder.as_ref(), url_override(sub_args))?;
            fetch_once(settings).await
        }
        Some(("config", _)) => {
            println!("\x1b[1m\x1b[34mConfiguring songlist...\x1b[0m");
            let cfg_folder =
                cfg_folder.context("HOME is not set, cannot locate the configuration folder")?;
            Ok(create_config(&cfg_folder)?)
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn url_arg() -> Arg {
    Arg::new("url")
        .long("url")
        .value_name("URL")
        .help("Song feed to load instead of the configured endpoint")
}

fn url_override(args: &ArgMatches) -> Option<&str> {
    args.get_one::<String>("url").map(String::as_str)
}

fn print_usage() {
    println!("\x1b[1m\x1b[31mInvalid command!\x1b[0m\n");
    println!("📖 Available Commands:");
    println!("  \x1b[1m\x1b[32msonglist run\x1b[0m    - 🚀 Open the song list");
    println!("  \x1b[1m\x1b[32msonglist fetch\x1b[0m  - 📥 Load the song list once");
    println!("  \x1b[1m\x1b[32msonglist config\x1b[0m - 🛠️  Create or update configuration file");
    println!("\x1b[33mAdd --url <URL> to run or fetch to try another feed.\x1b[0m\n");
}
