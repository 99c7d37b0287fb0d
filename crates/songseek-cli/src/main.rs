use anyhow::Result;
use clap::Parser;
use songseek_client::Config;

mod commands;
mod logging;

#[derive(Debug, Parser)]
#[command(name = "songseek", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level regardless of the configured level
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Search for songs
    ///
    /// Sends the query to the song search endpoint and prints the matching
    /// songs. Results come from the best-match, song and lyric sections, in
    /// that order; artist, album and other hits are dropped.
    ///
    /// Without --limit (and without default_limit in the config) matching
    /// songs are withheld unless --all is given or missing_limit is set to
    /// "return_all".
    Search {
        /// Search terms
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Maximum number of results
        #[arg(long, short, value_parser = clap::value_parser!(u64).range(1..))]
        limit: Option<u64>,

        /// Return every match when no limit is given
        #[arg(long)]
        all: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print one value, or the whole config file when no key is given
    Get {
        key: Option<String>,
    },
    /// Set a value in the config file
    Set {
        key: String,
        value: String,
    },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    logging::init(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Search {
            query,
            limit,
            all,
            json,
        } => {
            let limit = limit.map(usize::try_from).transpose()?;
            let query = query.join(" ");
            commands::run_search(&config, &query, limit, all, json).await?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config)?,
            ConfigAction::Get { key } => commands::config::get_config(&config, key)?,
            ConfigAction::Set { key, value } => commands::config::set_config(&key, &value)?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Example => commands::config::show_example()?,
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
