//! Command line flags and the optional TOML configuration file.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use reqwest::Client;
use sawm_core::{CalendarSettings, LocalityCatalog};
use sawm_provider_aladhan::DEFAULT_BASE_URL;
use serde::Deserialize;

const DEFAULT_USER_AGENT: &str = "sawm/0.1";

#[derive(Debug, Parser)]
#[command(name = "sawm")]
#[command(about = "Ramadan Sehri & Iftar timetable in the terminal")]
pub(crate) struct Cli {
    /// TOML file overriding calendar, provider, and catalog settings
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Print the timetable to stdout instead of starting the terminal UI
    #[arg(long)]
    pub print: bool,

    /// City to query (preselected in the terminal UI)
    #[arg(long)]
    pub city: Option<String>,

    /// Country to query (preselected in the terminal UI)
    #[arg(long)]
    pub country: Option<String>,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Write logs to this file (the terminal UI logs nowhere otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ProviderConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout_secs: None,
        }
    }
}

impl ProviderConfig {
    /// HTTP client shared by every request of the session.
    pub(crate) fn client(&self) -> Result<Client> {
        let mut builder = Client::builder().user_agent(self.user_agent.as_str());
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder.build()?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub calendar: CalendarSettings,
    pub provider: ProviderConfig,
    pub catalog: LocalityCatalog,
}

impl FileConfig {
    /// Load the file if one was given, otherwise use the built-in defaults.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub(crate) fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.calendar.validate()?;
        if !self.catalog.is_usable() {
            bail!("catalog needs at least one city and one country");
        }
        if self.provider.base_url.trim().is_empty() {
            bail!("provider.base_url must not be empty");
        }
        Ok(())
    }
}
