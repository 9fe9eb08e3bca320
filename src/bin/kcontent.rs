//! kcontent command-line lookup
//!
//! Runs a content query against a directory of collection exports and
//! prints localized display cards as JSON.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use kcontent::{
    ContentQuery, DisplayCard, JsonDirStore, Locale, LogoMapper, LookupConfig, NameResolver,
};

/// Command-line overrides on top of [`LookupConfig`].
#[derive(Default)]
struct Args {
    category: Option<String>,
    name: Option<String>,
    locale: Option<String>,
    data_dir: Option<PathBuf>,
}

fn print_help() {
    println!("kcontent - localized content lookup");
    println!();
    println!("USAGE:");
    println!("    kcontent [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --category <CATEGORY>   kpop, kbeauty, kfood, kfestival, poi, package");
    println!("    -n, --name <NAME>           Exact name to look up (case-insensitive)");
    println!("    -l, --locale <LOCALE>       en or ko [default: $KCONTENT_LOCALE or en]");
    println!("    -d, --data-dir <DIR>        Collection exports [default: $KCONTENT_DATA_DIR or ./data]");
    println!("    -h, --help                  Print help information");
}

fn parse_args() -> Result<Option<Args>, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut parsed = Args::default();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        if matches!(flag, "--help" | "-h") {
            print_help();
            return Ok(None);
        }

        let value = args
            .get(i + 1)
            .cloned()
            .ok_or_else(|| format!("{flag} requires a value"))?;
        match flag {
            "--category" | "-c" => parsed.category = Some(value),
            "--name" | "-n" => parsed.name = Some(value),
            "--locale" | "-l" => parsed.locale = Some(value),
            "--data-dir" | "-d" => parsed.data_dir = Some(PathBuf::from(value)),
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 2;
    }

    Ok(Some(parsed))
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = LookupConfig::from_env()?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    let locale = match args.locale.as_deref() {
        Some(tag) => tag.parse::<Locale>()?,
        None => config.default_locale,
    };

    let table = config.load_logo_table()?;
    let logos = LogoMapper::new(&table).with_asset_base(config.asset_base.clone());

    info!(data_dir = %config.data_dir.display(), %locale, "Running query");
    let resolver = NameResolver::new(Arc::new(JsonDirStore::new(&config.data_dir)));
    let outcome = ContentQuery {
        category: args.category,
        name: args.name,
    }
    .execute(&resolver)?;

    let cards: Vec<DisplayCard> = outcome
        .into_records()
        .iter()
        .map(|record| DisplayCard::build(record, locale, &logos))
        .collect();
    info!(count = cards.len(), "Query complete");

    println!("{}", serde_json::to_string_pretty(&cards)?);
    Ok(())
}

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
