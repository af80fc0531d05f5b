use anyhow::Context;
use chrono::{Local, Timelike};
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use std::path::PathBuf;

use skydash_core::{Config, Dashboard, UnitGroup, provider_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skydash", version, about = "Weather dashboard generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the Visual Crossing API key and default unit group.
    Configure,

    /// Fetch weather for a city and render the dashboard page.
    Show {
        /// City or location name, free form.
        city: String,

        /// Unit group, "metric" or "us"; defaults to the configured one.
        #[arg(long)]
        units: Option<String>,

        /// Write the page to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Render the alerts list expanded.
        #[arg(long)]
        expand_alerts: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, units, out, expand_alerts } => {
                show(city, units, out, expand_alerts).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("Visual Crossing API key:")
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let units = Select::new("Default unit group:", vec!["metric", "us"])
        .prompt()
        .context("Failed to read unit group")?;
    config.set_default_units(UnitGroup::try_from(units)?);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(
    city: String,
    units: Option<String>,
    out: Option<PathBuf>,
    expand_alerts: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let units = match units {
        Some(s) => UnitGroup::try_from(s.as_str())?,
        None => config.default_unit_group()?,
    };

    let provider = provider_from_config(&config)?;
    let mut dashboard = Dashboard::new(provider, units);
    dashboard.set_alerts_expanded(expand_alerts);

    let current_hour = Local::now().hour();
    dashboard.submit(&city, current_hour).await;

    let page = dashboard.state().render_page();
    match out {
        Some(path) => {
            std::fs::write(&path, page)
                .with_context(|| format!("Failed to write page to {}", path.display()))?;
            println!("Wrote dashboard to {}", path.display());
        }
        None => print!("{page}"),
    }

    Ok(())
}
