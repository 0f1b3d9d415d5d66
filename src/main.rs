use std::env;
use std::io::Write;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use fees_eng::{FeeSchedule, run};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let path = env::args()
        .nth(1)
        .expect("usage: fees-eng <transactions.json>");

    if !path.ends_with(".json") {
        warn!(path, "input file seems to not be a json file");
    }

    let schedule = match load_schedule().await {
        Ok(schedule) => schedule,
        Err(e) => {
            eprintln!("invalid fee schedule: {e}");
            std::process::exit(1);
        }
    };

    match run(&path, schedule).await {
        Ok(fees) => {
            let mut stdout = std::io::stdout().lock();
            for fee in fees {
                writeln!(stdout, "{fee}").expect("failed to write fee line");
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Load the fee schedule from the JSON document named by the
/// `FEE_SCHEDULE` environment variable, or fall back to the built-in
/// defaults.
async fn load_schedule() -> Result<FeeSchedule, Box<dyn std::error::Error>> {
    match env::var_os("FEE_SCHEDULE") {
        Some(path) => {
            let payload = tokio::fs::read(&path).await?;
            Ok(serde_json::from_slice(&payload)?)
        }
        None => Ok(FeeSchedule::default()),
    }
}
