use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use museum_curator::commands::{self, SearchRequest, SettingsPatch};
use museum_curator::sorting::{SortKey, SortOrder};
use museum_curator::{logging, proxy, AppError, AppState};

/// Search and curate artworks across museum collections
#[derive(Parser, Debug)]
#[command(name = "curator", author, version, about)]
struct Cli {
    /// Log to stderr only
    #[arg(long, global = true)]
    no_log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search one or more museums and print one combined page as JSON
    Search {
        #[arg(default_value = "")]
        query: String,

        #[arg(long, default_value_t = 1)]
        page: u32,

        /// cleveland, science, rijksmuseum or va; repeatable. Defaults come from settings
        #[arg(long = "museum", short = 'm')]
        museums: Vec<String>,

        #[arg(long)]
        sort: Option<SortKey>,

        #[arg(long, default_value = "asc")]
        order: SortOrder,

        /// Keep only this object type
        #[arg(long = "type")]
        kind: Option<String>,
    },

    /// Print a single artwork
    Show { museum: String, id: String },

    #[command(subcommand)]
    Favourites(FavouritesCommand),

    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Run the credential-injecting proxy
    Proxy,
}

#[derive(Subcommand, Debug)]
enum FavouritesCommand {
    List {
        #[arg(long)]
        sort: Option<SortKey>,

        #[arg(long, default_value = "asc")]
        order: SortOrder,
    },

    /// Add the artwork if absent, remove it if present
    Toggle { museum: String, id: String },
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    Show,

    /// Change individual settings; unspecified ones keep their value
    Set {
        /// Empty string clears the stored key
        #[arg(long)]
        rijksmuseum_api_key: Option<String>,

        #[arg(long)]
        user_agent: Option<String>,

        /// Museums searched when none are given; repeatable
        #[arg(long = "default-museum")]
        default_museums: Vec<String>,

        #[arg(long)]
        bind_address: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let logs_dir = if cli.no_log_file { None } else { logging::logs_dir() };
    logging::init(logs_dir.as_deref());

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), AppError> {
    let state = AppState::initialize()?;

    match command {
        Command::Search {
            query,
            page,
            museums,
            sort,
            order,
            kind,
        } => {
            let sources = museums
                .iter()
                .map(|name| commands::parse_museum(name))
                .collect::<Result<Vec<_>, _>>()?;
            let results = commands::search(
                &state,
                SearchRequest {
                    query,
                    page,
                    sources,
                    sort_by: sort,
                    sort_order: order,
                    kind,
                },
            )
            .await?;
            print_json(&results)
        }
        Command::Show { museum, id } => {
            let museum = commands::parse_museum(&museum)?;
            print_json(&commands::show_artwork(&state, museum, &id).await?)
        }
        Command::Favourites(FavouritesCommand::List { sort, order }) => {
            print_json(&commands::list_favourites(&state, sort.map(|key| (key, order))))
        }
        Command::Favourites(FavouritesCommand::Toggle { museum, id }) => {
            let museum = commands::parse_museum(&museum)?;
            print_json(&commands::toggle_favourite_by_id(&state, museum, &id).await?)
        }
        Command::Settings(SettingsCommand::Show) => print_json(&commands::get_settings(&state)),
        Command::Settings(SettingsCommand::Set {
            rijksmuseum_api_key,
            user_agent,
            default_museums,
            bind_address,
        }) => {
            let default_sources = default_museums
                .iter()
                .map(|name| commands::parse_museum(name))
                .collect::<Result<Vec<_>, _>>()?;
            let settings = commands::patch_settings(
                &state,
                SettingsPatch {
                    rijksmuseum_api_key,
                    user_agent,
                    default_sources,
                    bind_address,
                },
            )?;
            print_json(&settings)
        }
        Command::Proxy => proxy::serve(&state.settings.get().proxy).await,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
