use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{CustomUserError, Password, Select, Text, autocompletion::Replacement};
use tempyst_core::{
    Autocomplete, Config, Coordinates, FixedGeolocator, Orchestrator, SessionProvider,
    StoredSession, UserIdentity, View, ViewState, config::DEFAULT_FALLBACK_LOCATION, session,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "tempyst", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the WeatherAPI.com key, fallback location and home coordinates.
    Configure,

    /// Store the identity the dashboard greets.
    SignIn {
        /// Display name; prompted for when absent.
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        avatar: Option<String>,
    },

    /// Forget the stored identity.
    SignOut,

    /// Show the dashboard for a location.
    Show {
        /// Free text or "lat,lon". Defaults to home coordinates, then the fallback location.
        location: Option<String>,

        /// Forecast day to expand hour by hour (0 = today).
        #[arg(long, default_value_t = 0)]
        day: usize,
    },

    /// Search for a location as you type, then show its dashboard.
    Search {
        #[arg(long, default_value_t = 0)]
        day: usize,
    },

    /// Print location suggestions for a partial name.
    Suggest {
        text: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::SignIn { name, avatar } => sign_in(name, avatar),
            Command::SignOut => {
                let mut cfg = Config::load_file()?;
                cfg.sign_out();
                cfg.save()?;
                println!("Signed out.");
                Ok(())
            }
            Command::Show { location, day } => show(location, day).await,
            Command::Search { day } => search(day).await,
            Command::Suggest { text } => suggest(&text).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load_file()?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        cfg.set_api_key(api_key.trim().to_string());
    }

    let fallback = Text::new("Fallback location:")
        .with_default(cfg.fallback_location.as_deref().unwrap_or(DEFAULT_FALLBACK_LOCATION))
        .prompt()
        .context("Failed to read fallback location")?;
    cfg.fallback_location = Some(fallback.trim().to_string()).filter(|f| !f.is_empty());

    let home = Text::new("Home coordinates as lat,lon (empty for none):")
        .prompt()
        .context("Failed to read home coordinates")?;
    cfg.home = parse_coordinates(&home)?;

    cfg.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn parse_coordinates(input: &str) -> anyhow::Result<Option<Coordinates>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let (lat, lon) = input
        .split_once(',')
        .ok_or_else(|| anyhow!("Expected coordinates as lat,lon, got '{input}'"))?;
    let lat: f64 = lat.trim().parse().with_context(|| format!("Invalid latitude '{lat}'"))?;
    let lon: f64 = lon.trim().parse().with_context(|| format!("Invalid longitude '{lon}'"))?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(anyhow!("Coordinates out of range: {lat},{lon}"));
    }

    Ok(Some(Coordinates { lat, lon }))
}

fn sign_in(name: Option<String>, avatar: Option<String>) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Text::new("Your name:").prompt().context("Failed to read name")?,
    };
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(anyhow!("Name must not be empty"));
    }

    let user = UserIdentity { name, avatar_url: avatar };
    let mut cfg = Config::load_file()?;
    cfg.sign_in(user.clone());
    cfg.save()?;

    println!("{}", session::greeting(Some(&user)));
    Ok(())
}

/// Runs the session gate; returns the config only when the dashboard should mount.
async fn gate() -> anyhow::Result<Option<Config>> {
    let cfg = Config::load()?;
    let user = StoredSession::new(cfg.user.clone()).current_session().await;

    render::header(user.as_ref());
    match session::select_view(user.as_ref()) {
        View::Landing => {
            render::landing();
            Ok(None)
        }
        View::Dashboard => Ok(Some(cfg)),
    }
}

fn select_day(orch: &Orchestrator, day: usize) {
    if day != 0 && !orch.select_day(day) {
        tracing::warn!(day, "no such forecast day, keeping today");
    }
}

async fn show(location: Option<String>, day: usize) -> anyhow::Result<()> {
    let Some(cfg) = gate().await? else {
        return Ok(());
    };

    let orch = Orchestrator::from_config(&cfg);
    match location.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        Some(query) => orch.fetch_weather(query).await,
        None => orch.initialize(&FixedGeolocator::new(cfg.home)).await,
    };

    select_day(&orch, day);
    finish(&orch.state())
}

async fn search(day: usize) -> anyhow::Result<()> {
    let Some(cfg) = gate().await? else {
        return Ok(());
    };

    let autocomplete = match Autocomplete::from_config(&cfg) {
        Ok(ac) => Arc::new(ac),
        Err(err) => return finish(&ViewState::Error(err)),
    };
    let orch = Orchestrator::from_config(&cfg);

    // inquire blocks its thread, so prompts run off the runtime's workers.
    let completer = LocationCompleter {
        autocomplete: autocomplete.clone(),
        runtime: tokio::runtime::Handle::current(),
    };
    let text = tokio::task::spawn_blocking(move || {
        Text::new("Location:")
            .with_autocomplete(completer)
            .with_help_message("type at least 2 characters")
            .prompt()
    })
    .await
    .context("Location prompt did not complete")?
    .context("Failed to read location")?;

    let name = match autocomplete.matching(&text) {
        Some(completed) => completed.label(),
        None => {
            let suggestions = autocomplete.suggestions_for(&text).await;
            if suggestions.is_empty() {
                println!("No locations match '{}'.", text.trim());
                return Ok(());
            }

            let labels: Vec<String> = suggestions.iter().map(|s| s.label()).collect();
            tokio::task::spawn_blocking(move || Select::new("Pick a location:", labels).raw_prompt())
                .await
                .context("Selection prompt did not complete")?
                .context("Failed to read selection")?
                .value
        }
    };

    autocomplete.select_suggestion(&name, &orch).await;
    select_day(&orch, day);
    finish(&orch.state())
}

/// Render the final view; an error view makes the command fail.
fn finish(state: &ViewState) -> anyhow::Result<()> {
    render::view_state(state);
    match state.error() {
        Some(err) => Err(anyhow!("Failed to load weather: {err}")),
        None => Ok(()),
    }
}

async fn suggest(text: &str) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let autocomplete = Autocomplete::from_config(&cfg)?;

    for suggestion in autocomplete.suggestions_for(text).await {
        println!("{}", suggestion.label());
    }
    Ok(())
}

/// Feeds inquire's prompt from the debounced autocomplete. Suggestions lag by
/// the debounce window: each keystroke shows the last settled result.
#[derive(Clone)]
struct LocationCompleter {
    autocomplete: Arc<Autocomplete>,
    runtime: tokio::runtime::Handle,
}

impl inquire::autocompletion::Autocomplete for LocationCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        // An accepted completion is one of the listed labels; keep the list.
        if self.autocomplete.matching(input).is_none() {
            let _guard = self.runtime.enter();
            self.autocomplete.set_query(input);
        }

        Ok(self.autocomplete.suggestions().iter().map(|s| s.label()).collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}
