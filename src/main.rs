use anyhow::{Context, Result};
use clap::builder::TypedValueParser;
use clap::{Parser, Subcommand};
use jobfinder::common_search::{run_search_with_options, OutputFormat, SearchOptions};
use jobfinder::config::SearchConfig;
use jobfinder::http_fetcher::HttpFetcher;
use jobfinder::{build_provider, debug};
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Jobfinder - Job listing search across multiple queries")]
struct Args {
    /// Enable debug output
    #[clap(short, long, global = true)]
    debug: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search listings for one or more queries
    Search {
        /// Free-text queries, searched one after another
        #[clap(required = true)]
        queries: Vec<String>,

        /// Only listings matching this location
        #[clap(short, long, default_value = "")]
        location: String,

        /// Maximum number of results per query (1-10)
        #[clap(short = 'n', long, value_parser = clap::value_parser!(u16).range(1..=10).map(usize::from))]
        limit: Option<usize>,

        /// Write results to this file instead of printing them
        #[clap(short, long)]
        output: Option<String>,

        /// Output file format
        #[clap(short, long, value_enum, default_value = "csv")]
        format: OutputFormat,

        /// Use the built-in mock catalog instead of the live site
        #[clap(long)]
        mock: bool,

        /// Run the fallback browser without a window
        #[clap(long)]
        headless: bool,

        /// Pause between queries in milliseconds
        #[clap(long)]
        pacing_ms: Option<u64>,
    },

    /// Print the description of a single job listing
    Describe {
        /// Listing URL as returned by `search`
        url: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    debug::set_debug(args.debug);

    let config = SearchConfig::from_env()?;

    match args.command {
        Command::Search {
            queries,
            location,
            limit,
            output,
            format,
            mock,
            headless,
            pacing_ms,
        } => {
            // Flags can only switch things on; the environment supplies the rest.
            let config = SearchConfig {
                use_mock: mock || config.use_mock,
                headless: headless || config.headless,
                per_query_limit: limit.unwrap_or(config.per_query_limit),
                pacing: pacing_ms.map(Duration::from_millis).unwrap_or(config.pacing),
                ..config
            };
            let provider = build_provider(&config).context("Failed to set up job search")?;

            let options = SearchOptions {
                queries,
                location,
                per_query_limit: config.per_query_limit,
                output,
                format,
            };
            run_search_with_options(provider.as_ref(), &options)?;
        }
        Command::Describe { url } => {
            let fetcher = HttpFetcher::new(config.http_timeout)?;
            let description = fetcher
                .fetch_description(&url)
                .with_context(|| format!("Failed to fetch job description from {}", url))?;
            println!("{}", description);
        }
    }

    Ok(())
}
