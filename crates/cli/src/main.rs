use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use leetcode_adapter::{HttpArtifactReader, HttpRankSource};
use rank_core::application::{ArtifactService, PresentationUpdater, RankResolver};
use rank_core::config::{
    PresentationConfig, ResolverConfig, DEFAULT_ARTIFACT_PATH, DEFAULT_GRAPHQL_URL,
    DEFAULT_PROFILE_URL_TEMPLATE, DEFAULT_USERNAME,
};
use rank_core::domain::PresentationOutcome;
use rank_core::ports::{ArtifactReader, RankDisplay, Result};
use rank_core::utils::{format_rank, format_timestamp_to_local};
use static_site_adapter::{HtmlRankDisplay, JsonArtifactStore};

/// Keeps the LeetCode rank on the portfolio contact card up to date
#[derive(Parser, Debug)]
#[command(name = "rank-cli")]
#[command(about = "Resolves a LeetCode rank and publishes it to the portfolio site")]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    /// Log at debug level (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Profile whose rank is looked up
    #[arg(long, env = "RANK_USERNAME", default_value = DEFAULT_USERNAME, global = true)]
    username: String,

    /// Profile page URL; `{username}` is substituted
    #[arg(long, env = "RANK_PROFILE_URL", default_value = DEFAULT_PROFILE_URL_TEMPLATE, global = true)]
    profile_url: String,

    /// Structured query endpoint
    #[arg(long, env = "RANK_GRAPHQL_URL", default_value = DEFAULT_GRAPHQL_URL, global = true)]
    graphql_url: String,
}

impl SourceArgs {
    fn config(&self) -> ResolverConfig {
        ResolverConfig {
            username: self.username.clone(),
            profile_url_template: self.profile_url.clone(),
            graphql_url: self.graphql_url.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve the rank and overwrite the JSON artifact
    Update {
        /// Where the artifact is written
        #[arg(short, long, env = "RANK_ARTIFACT", default_value = DEFAULT_ARTIFACT_PATH)]
        output: PathBuf,
    },
    /// Show the rank, reading the artifact first and resolving live on a miss
    Show {
        /// Local artifact file
        #[arg(long, env = "RANK_ARTIFACT", default_value = DEFAULT_ARTIFACT_PATH)]
        artifact: PathBuf,

        /// Published artifact URL; takes precedence over --artifact
        #[arg(long)]
        artifact_url: Option<String>,

        /// HTML page whose LeetCode contact link is rewritten instead of printing
        #[arg(long)]
        page: Option<PathBuf>,
    },
    /// Run only the resolver chain and print what it finds
    Resolve,
    /// Print an existing artifact
    Inspect {
        #[arg(long, env = "RANK_ARTIFACT", default_value = DEFAULT_ARTIFACT_PATH)]
        artifact: PathBuf,
    },
}

/// Prints the rank line to stdout
struct ConsoleDisplay;

impl RankDisplay for ConsoleDisplay {
    fn show(&self, text: &str) -> Result<()> {
        println!("{}", text);
        Ok(())
    }
}

fn resolver(config: ResolverConfig) -> RankResolver {
    let source = Box::new(HttpRankSource::new(&config));
    RankResolver::new(config, source)
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.source.config();

    match cli.command {
        Command::Update { output } => {
            let service = ArtifactService::new(
                resolver(config),
                Box::new(JsonArtifactStore::new(output.clone())),
            );
            let record = service.refresh(Utc::now())?;
            println!(
                "Wrote {} (rank: {})",
                output.display(),
                record.formatted.as_deref().unwrap_or("null")
            );
        }
        Command::Show {
            artifact,
            artifact_url,
            page,
        } => {
            let reader: Box<dyn ArtifactReader> = match artifact_url {
                Some(url) => Box::new(HttpArtifactReader::new(url)),
                None => Box::new(JsonArtifactStore::new(artifact)),
            };
            let display: Box<dyn RankDisplay> = match page {
                Some(page) => Box::new(HtmlRankDisplay::new(page)),
                None => Box::new(ConsoleDisplay),
            };

            let updater =
                PresentationUpdater::new(PresentationConfig::default(), reader, resolver(config), display);
            match updater.update()? {
                PresentationOutcome::Artifact(_) => log::info!("Rank served from artifact"),
                PresentationOutcome::Resolved(_) => log::info!("Rank resolved live"),
                PresentationOutcome::Unavailable => log::info!("Rank unavailable"),
            }
        }
        Command::Resolve => match resolver(config).resolve() {
            Some(raw) => println!("{} ({})", format_rank(&raw), raw),
            None => println!("unavailable"),
        },
        Command::Inspect { artifact } => {
            let record = JsonArtifactStore::new(artifact).read()?;
            let updated = record.updated.to_rfc3339_opts(SecondsFormat::Millis, true);
            println!("rank:      {}", record.rank.as_deref().unwrap_or("null"));
            println!("formatted: {}", record.formatted.as_deref().unwrap_or("null"));
            println!("updated:   {}", format_timestamp_to_local(&updated));
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
