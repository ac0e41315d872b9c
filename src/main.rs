//! Solr-Miner: a retrying Solr search adapter
//!
//! This is the command-line entry point. It owns the decision to stop the
//! process when the search backend cannot be reached.

use anyhow::Result;
use solr_miner::{config, Search, SearchAdapter, SearchError, SearchRequest};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

struct Args {
    config: Option<PathBuf>,
    rows: Option<u32>,
    queries: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            return ExitCode::from(2);
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            match e.downcast_ref::<SearchError>() {
                Some(SearchError::Exhausted { .. }) => ExitCode::from(1),
                _ => ExitCode::from(2),
            }
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let source = config::locate(args.config.as_deref());
    let settings = config::load(source.as_deref())?;

    // Initialize logging
    let default_level = if settings.general.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Solr-Miner v{}", solr_miner::VERSION);
    config::log_source(source.as_deref());

    config::init(settings)?;
    let adapter = SearchAdapter::from_config()?;
    info!("Searching {} ({})", adapter.endpoint(), adapter.engine_name());

    let requests: Vec<SearchRequest> = args
        .queries
        .into_iter()
        .map(|query| {
            let request = SearchRequest::new(query);
            match args.rows {
                Some(rows) => request.with_max_results(rows),
                None => request,
            }
        })
        .collect();

    let results = Search::new(adapter).execute(&requests).await?;

    for result in results {
        println!("{}", serde_json::to_string(&result)?);
    }

    Ok(())
}

/// Parse command-line arguments; `None` means help or version was printed
fn parse_args() -> Result<Option<Args>> {
    let mut args = Args {
        config: None,
        rows: None,
        queries: Vec::new(),
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return Ok(None);
            }
            "-V" | "--version" => {
                println!("solr-miner {}", solr_miner::VERSION);
                return Ok(None);
            }
            "-c" | "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{} needs a file argument", arg))?;
                args.config = Some(PathBuf::from(path));
            }
            "-n" | "--rows" => {
                let rows = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{} needs a number", arg))?;
                args.rows = Some(rows.parse()?);
            }
            _ => args.queries.push(arg),
        }
    }

    if args.queries.is_empty() {
        return Err(anyhow::anyhow!("no query given"));
    }

    Ok(Some(args))
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
Solr-Miner v{}
A retrying Solr search adapter

USAGE:
    solr-miner [OPTIONS] <QUERY>...

OPTIONS:
    -c, --config <FILE>    Path to configuration file
    -n, --rows <N>         Results per query (1-100, capped by settings)
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    SOLR_ENDPOINT               Solr core URL, e.g. http://localhost:8983/solr/core
    SOLR_MINER_SETTINGS_PATH    Path to settings.yml
    SOLR_MINER_RETRIES          Retries after a failed search
    SOLR_MINER_RETRY_DELAY_MS   Delay between attempts
    SOLR_MINER_DEBUG            Enable debug logging (true/false, 1/0, yes/no)
"#,
        solr_miner::VERSION
    );
}
