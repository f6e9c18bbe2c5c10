use anyhow::Result;
use clap::Parser;
use jobfinder::common_search::{run_search_with_options, OutputFormat, SearchOptions};
use jobfinder::config::DEFAULT_RESULTS_PER_QUERY;
use jobfinder::debug;
use jobfinder::mock::MockProvider;

/// Searches the built-in sample catalog, for when the live site is unavailable.
#[derive(Parser, Debug)]
#[clap(author, version, about = "Jobfinder mock search (offline sample catalog)")]
struct Args {
    /// Free-text queries
    #[clap(required = true)]
    queries: Vec<String>,

    /// Only listings matching this location
    #[clap(short, long, default_value = "")]
    location: String,

    /// Maximum number of results per query
    #[clap(short = 'n', long, default_value_t = DEFAULT_RESULTS_PER_QUERY)]
    limit: usize,

    /// Write results as CSV to this file instead of printing them
    #[clap(short, long)]
    output: Option<String>,

    /// Enable debug output
    #[clap(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    debug::set_debug(args.debug);

    let options = SearchOptions {
        queries: args.queries,
        location: args.location,
        per_query_limit: args.limit,
        output: args.output,
        format: OutputFormat::Csv,
    };

    run_search_with_options(&MockProvider::new(), &options)?;
    Ok(())
}
