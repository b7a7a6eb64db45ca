use shuttleplan::config::AlgoParams;
use shuttleplan::models::Submission;
use std::env;
use std::fs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        "\
Usage: shuttleplan [OPTIONS] <submissions.json>

Reads a JSON array of rider submissions ({{\"id\", \"lat\", \"lng\"}}),
computes the optimal shuttle route, and prints it as JSON on stdout.
Diagnostics go to stderr.

Options:
  --seed=N     Override the clustering seed for this run
  --pretty     Pretty-print the output JSON
  --help       Show this help message

Algorithm parameters are read from SHUTTLE_* environment variables with
.env support; unset variables fall back to the tuned defaults."
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shuttleplan=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help") {
        print_help();
        return Ok(());
    }

    let seed_override: Option<u64> = match args.iter().find_map(|a| a.strip_prefix("--seed=")) {
        Some(raw) => Some(raw.parse().map_err(|_| format!("Invalid --seed={}", raw))?),
        None => None,
    };
    let pretty = args.iter().any(|a| a == "--pretty");
    let input = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .ok_or("Missing submissions file (see --help)")?;

    let mut params = AlgoParams::from_env().map_err(|e| format!("Config error: {}", e))?;
    if let Some(seed) = seed_override {
        params.seed = seed;
    }

    let raw = fs::read_to_string(input)?;
    let submissions: Vec<Submission> = serde_json::from_str(&raw)?;

    tracing::info!(count = submissions.len(), input = %input, "Loaded submissions");

    let route = shuttleplan::compute_optimal_route(&submissions, &params);

    let output = if pretty {
        serde_json::to_string_pretty(&route)?
    } else {
        serde_json::to_string(&route)?
    };
    println!("{}", output);

    Ok(())
}
