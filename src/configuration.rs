use config::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

/// The feed shown when no other endpoint is configured.
pub const DEFAULT_ENDPOINT_URL: &str =
    "https://raw.githubusercontent.com/anaselhajjaji/xamarin-samples/master/TestData/songs.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,
    /// `0` disables the timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            request_timeout_secs: default_request_timeout_secs(),
            date_format: default_date_format(),
        }
    }
}

fn default_endpoint_url() -> String {
    DEFAULT_ENDPOINT_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

/// Loads settings from an optional YAML file, then applies `SONGLIST_*`
/// environment overrides (for example `SONGLIST_ENDPOINT_URL`).
pub fn get_configuration(cfg_file: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(cfg_file) = cfg_file {
        builder = builder.add_source(config::File::new(cfg_file, config::FileFormat::Yaml));
    }

    let settings = builder
        .add_source(config::Environment::with_prefix("SONGLIST"))
        .build()?;

    settings.try_deserialize::<Settings>()
}

pub struct ConfigFolder {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl ConfigFolder {
    pub fn new() -> Result<Self, env::VarError> {
        let home_dir = env::var("HOME")?;
        Ok(Self::in_home(Path::new(&home_dir)))
    }

    pub fn in_home(home_dir: &Path) -> Self {
        Self {
            config_dir: get_config_dir_name(home_dir),
            config_file: get_config_file_name(home_dir),
        }
    }
}

fn get_config_dir_name(home_dir: &Path) -> PathBuf {
    home_dir.join(".songlist")
}

fn get_config_file_name(home_dir: &Path) -> PathBuf {
    home_dir.join(".songlist").join("config.yaml")
}

pub fn create_config(cfg_folder: &ConfigFolder) -> io::Result<()> {
    println!("\x1b[1m\x1b[32mCreating configuration...\x1b[0m");

    if cfg_folder.config_dir.exists() && !confirm_overwrite()? {
        println!("\x1b[33mOperation cancelled.\x1b[0m");
        return Ok(());
    }

    write_config_template(cfg_folder)?;

    println!("\x1b[32mConfiguration file created at:");
    println!("  -> {}", cfg_folder.config_file.display());
    println!("\x1b[0mEdit it to point songlist at another feed.");

    Ok(())
}

fn write_config_template(cfg_folder: &ConfigFolder) -> io::Result<()> {
    fs::create_dir_all(&cfg_folder.config_dir)?;

    let config_content = include_str!("config_template.yaml");
    fs::write(&cfg_folder.config_file, config_content)
}

fn confirm_overwrite() -> Result<bool, io::Error> {
    println!("\x1b[31mThe configuration folder already exists.");
    println!("Do you want to overwrite the configuration file? (y/N)\x1b[0m");

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}
