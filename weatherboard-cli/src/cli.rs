use std::fmt;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};

use weatherboard_core::config::Config;
use weatherboard_core::provider::provider_from_config;
use weatherboard_core::state::Dashboard;

use crate::render::{self, Theme};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherboard", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and a default place.
    Configure,

    /// Show the dashboard for a place.
    Show {
        /// Place name; falls back to the configured default.
        place: Option<String>,

        /// Latitude to resolve into a place.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude to resolve into a place.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Output palette.
        #[arg(long, value_enum, default_value_t = Theme::Light)]
        theme: Theme,

        /// Keep a menu running after the first render.
        #[arg(short, long)]
        interactive: bool,
    },

    /// List places matching a partial name.
    Search {
        /// Partial place name, at least three characters.
        query: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                place,
                lat,
                lon,
                theme,
                interactive,
            } => show(place, lat.zip(lon), theme, interactive).await,
            Command::Search { query } => search(&query).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read the API key")?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let default_place = Text::new("Default place:")
        .with_default(config.place_or_default())
        .prompt()
        .context("Failed to read the default place")?;
    if !default_place.trim().is_empty() {
        config.default_place = Some(default_place.trim().to_string());
    }

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

async fn show(
    place: Option<String>,
    coords: Option<(f64, f64)>,
    theme: Theme,
    interactive: bool,
) -> Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let start_place = place.unwrap_or_else(|| config.place_or_default().to_string());
    let mut dashboard = Dashboard::new(Box::new(provider), start_place);

    println!("{}", render::LOADING);
    let data = match coords {
        Some((lat, lon)) => dashboard.locate(lat, lon).await?,
        None => dashboard.current().await?,
    };
    tracing::debug!(place = dashboard.place(), samples = data.cnt, "dashboard ready");
    println!("{}", render::render_dashboard(&data, theme));

    if interactive {
        menu_loop(&mut dashboard, theme).await?;
    }

    Ok(())
}

async fn search(query: &str) -> Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let dashboard = Dashboard::new(Box::new(provider), config.place_or_default());

    let hits = dashboard.suggestions(query).await?;
    if hits.is_empty() {
        println!("{}", render::LOCATION_NOT_FOUND);
        return Ok(());
    }

    for hit in &hits {
        println!("{hit}  ({:.4}, {:.4})", hit.coord.lat, hit.coord.lon);
    }

    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum MenuAction {
    Search,
    Coordinates,
    Refresh,
    ToggleTheme,
    Quit,
}

const MENU: [MenuAction; 5] = [
    MenuAction::Search,
    MenuAction::Coordinates,
    MenuAction::Refresh,
    MenuAction::ToggleTheme,
    MenuAction::Quit,
];

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Search => "Search for a place",
            Self::Coordinates => "Use coordinates",
            Self::Refresh => "Refresh",
            Self::ToggleTheme => "Toggle theme",
            Self::Quit => "Quit",
        };
        f.write_str(label)
    }
}

async fn menu_loop(dashboard: &mut Dashboard, mut theme: Theme) -> Result<()> {
    loop {
        let Some(action) = prompt_select("Dashboard:", MENU.to_vec())? else {
            return Ok(());
        };

        if matches!(action, MenuAction::Quit) {
            return Ok(());
        }

        if let Err(err) = apply(dashboard, &mut theme, action).await {
            eprintln!("Error: {err:#}");
        }
    }
}

async fn apply(dashboard: &mut Dashboard, theme: &mut Theme, action: MenuAction) -> Result<()> {
    match action {
        MenuAction::Search => {
            let Some(query) = prompt_text("Place:")? else {
                return Ok(());
            };

            let hits = dashboard.suggestions(&query).await?;
            if hits.is_empty() {
                println!("{}", render::LOCATION_NOT_FOUND);
                return Ok(());
            }

            let Some(pick) = prompt_select("Did you mean:", hits)? else {
                return Ok(());
            };
            println!("{}", render::LOADING);
            let data = dashboard.set_place(&pick.name).await?;
            println!("{}", render::render_dashboard(&data, *theme));
        }
        MenuAction::Coordinates => {
            let Some(lat) = prompt_text("Latitude:")? else {
                return Ok(());
            };
            let lat: f64 = lat.trim().parse().context("Latitude must be a number")?;

            let Some(lon) = prompt_text("Longitude:")? else {
                return Ok(());
            };
            let lon: f64 = lon.trim().parse().context("Longitude must be a number")?;

            println!("{}", render::LOADING);
            let data = dashboard.locate(lat, lon).await?;
            println!("{}", render::render_dashboard(&data, *theme));
        }
        MenuAction::Refresh => {
            println!("{}", render::LOADING);
            let data = dashboard.refresh().await?;
            println!("{}", render::render_dashboard(&data, *theme));
        }
        MenuAction::ToggleTheme => {
            *theme = theme.toggle();
            let data = dashboard.current().await?;
            println!("{}", render::render_dashboard(&data, *theme));
        }
        MenuAction::Quit => {}
    }

    Ok(())
}

fn cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

fn prompt_text(message: &str) -> Result<Option<String>> {
    match Text::new(message).prompt() {
        Ok(value) => Ok(Some(value)),
        Err(err) if cancelled(&err) => Ok(None),
        Err(err) => Err(err).context("Failed to read input"),
    }
}

fn prompt_select<T: fmt::Display>(message: &str, options: Vec<T>) -> Result<Option<T>> {
    match Select::new(message, options).prompt() {
        Ok(value) => Ok(Some(value)),
        Err(err) if cancelled(&err) => Ok(None),
        Err(err) => Err(err).context("Failed to read the selection"),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn show_parses_place_theme_and_interactive() {
        let cli = Cli::parse_from(["weatherboard", "show", "London", "--theme", "dark", "-i"]);

        match cli.command {
            Command::Show {
                place,
                theme,
                interactive,
                lat,
                lon,
            } => {
                assert_eq!(place.as_deref(), Some("London"));
                assert_eq!(theme, Theme::Dark);
                assert!(interactive);
                assert!(lat.is_none());
                assert!(lon.is_none());
            }
            other => panic!("expected show, got {other:?}"),
        }
    }

    #[test]
    fn show_defaults_to_the_light_theme() {
        let cli = Cli::parse_from(["weatherboard", "show"]);

        match cli.command {
            Command::Show { place, theme, .. } => {
                assert!(place.is_none());
                assert_eq!(theme, Theme::Light);
            }
            other => panic!("expected show, got {other:?}"),
        }
    }

    #[test]
    fn coordinates_must_come_in_pairs() {
        let lat_only = Cli::try_parse_from(["weatherboard", "show", "--lat", "-6.2146"]);
        assert!(lat_only.is_err());

        let both = Cli::try_parse_from([
            "weatherboard",
            "show",
            "--lat",
            "-6.2146",
            "--lon",
            "106.8451",
        ]);
        assert!(both.is_ok());
    }

    #[test]
    fn search_takes_a_query() {
        let cli = Cli::parse_from(["weatherboard", "search", "Lon"]);

        match cli.command {
            Command::Search { query } => assert_eq!(query, "Lon"),
            other => panic!("expected search, got {other:?}"),
        }
    }
}
