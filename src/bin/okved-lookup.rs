use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Parser;
use okved_match::{
    AutoTaxonomyLoader, Classification, Classifier, ClassifierError, ExpiryPolicy,
    FileTaxonomyLoader, MatchMode, NormalizedPhone, NumberingPlanValidator, TaxonomyLoader,
};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(
    name = "okved-lookup",
    version,
    about = "Find OKVED codes hidden in a phone number"
)]
struct Cli {
    /// Phone number in any format; prompted for when omitted
    phone: Option<String>,
    /// Directory holding the downloaded taxonomy cache
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Taxonomy download URL
    #[arg(long)]
    url: Option<String>,
    /// Use a local taxonomy JSON file instead of downloading
    #[arg(long, conflicts_with_all = ["data_dir", "url", "max_age_hours"])]
    taxonomy: Option<PathBuf>,
    /// Refresh the cache after this many hours instead of once per day
    #[arg(long)]
    max_age_hours: Option<u64>,
    #[arg(long)]
    json: bool,
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    phone: &'a NormalizedPhone,
    #[serde(flatten)]
    classification: &'a Classification,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let raw = match cli.phone.clone() {
        Some(phone) => phone,
        None => prompt("Input phone number: ")?,
    };

    let classifier = Classifier::new(build_loader(&cli), NumberingPlanValidator);

    let phone = match classifier.parse_phone(&raw) {
        Ok(phone) => phone,
        Err(ClassifierError::InvalidPhone(_)) => {
            println!("Please enter a valid phone number");
            return Ok(ExitCode::FAILURE);
        }
        Err(ClassifierError::UnrecognizedNumber(_)) => {
            println!("Incorrect phone number");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err.into()),
    };
    if !cli.json {
        println!("Correct phone number");
    }

    let result = classifier
        .classify_phone(&phone)
        .with_context(|| "classify phone number")?;
    debug!(mode = %result.mode, count = result.matches.len(), "classification finished");
    print_result(&phone, &result, cli.json)?;
    Ok(ExitCode::SUCCESS)
}

fn build_loader(cli: &Cli) -> Box<dyn TaxonomyLoader> {
    if let Some(ref path) = cli.taxonomy {
        return Box::new(FileTaxonomyLoader::new(path));
    }

    let mut loader = AutoTaxonomyLoader::new();
    if let Some(ref dir) = cli.data_dir {
        loader = loader.with_data_dir(dir);
    }
    if let Some(ref url) = cli.url {
        loader = loader.with_url(url.clone());
    }
    if let Some(hours) = cli.max_age_hours {
        loader = loader.with_expiry(ExpiryPolicy::Interval(max_age(hours)));
    }
    Box::new(loader)
}

fn max_age(hours: u64) -> Duration {
    Duration::from_secs(hours.saturating_mul(3600))
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .with_context(|| "read phone number")?;
    Ok(line.trim().to_string())
}

fn print_result(phone: &NormalizedPhone, result: &Classification, json: bool) -> Result<()> {
    if json {
        let output = JsonOutput {
            phone,
            classification: result,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if result.mode == MatchMode::Fallback {
        println!("No exact suffix matches found, doing fallback search");
    }
    if result.is_empty() {
        println!("No classification found");
        return Ok(());
    }
    let width = result.matches.iter().map(|(code, _)| code.len()).max().unwrap_or(0);
    for (code, name) in result.matches.iter() {
        println!("{:<width$}  {}", code, name, width = width);
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .try_init();
}
