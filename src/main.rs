use std::path::PathBuf;

use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use mangawatch::{cli, config, types::GroupPreference, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check followed series for fresh chapters
    Check(CheckOptions),

    /// Handle the watchlist of followed series
    List(ListOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CheckOptions {
    /// Series links to check instead of the watchlist
    pub urls: Vec<String>,

    #[command(flatten)]
    pub preference: PreferenceArgs,

    /// Store the given links as the new watchlist
    #[clap(long, requires = "urls")]
    pub save: bool,

    /// Do not offer to retry failed series
    #[clap(long)]
    pub no_prompt: bool,
}

#[derive(Args, Debug, Clone)]
#[group(multiple = false)]
pub struct PreferenceArgs {
    /// Scan group expected to upload the newest chapter (substring, case-insensitive)
    #[clap(long, value_parser = clap::value_parser!(GroupPreference))]
    pub group: Option<GroupPreference>,

    /// Accept uploads from any group
    #[clap(long)]
    pub any_group: bool,
}

impl PreferenceArgs {
    fn resolve(self) -> Option<GroupPreference> {
        if self.any_group {
            return Some(GroupPreference::Any);
        }
        self.group
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Handle the watchlist of followed series",
    args_conflicts_with_subcommands = true
)]
pub struct ListOptions {
    /// Subcommands under `list` (e.g., `add`)
    #[command(subcommand)]
    pub command: Option<ListSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ListSubcommand {
    /// Follow one or more series
    Add { urls: Vec<String> },

    /// Stop following a series
    Remove { url: String },

    /// Replace the watchlist with the links of a text file, one per line
    Import { file: PathBuf },

    /// Remove every series from the watchlist
    Clear,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Check(opt) => {
            cli::check(opt.urls, opt.preference.resolve(), opt.save, !opt.no_prompt).await
        }
        Command::List(opt) => match opt.command {
            Some(ListSubcommand::Add { urls }) => cli::add_to_watchlist(urls).await,
            Some(ListSubcommand::Remove { url }) => cli::remove_from_watchlist(url).await,
            Some(ListSubcommand::Import { file }) => cli::import_watchlist(file).await,
            Some(ListSubcommand::Clear) => cli::clear_watchlist().await,
            None => cli::list_watchlist().await,
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
