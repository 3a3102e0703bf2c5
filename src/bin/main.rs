//! Command-line analyzer
//!
//! `emotionsense I had a wonderful day` or `echo "..." | emotionsense`.
//! When reading stdin the read itself is timed, so piped input reports
//! no meaningful typing speed but typed input does.

use chrono::Utc;
use emotion_sense::{AnalysisInput, Config, Orchestrator};
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (text, typing_start, typing_end) = if args.is_empty() {
        let start = Utc::now();
        let mut buffer = String::new();
        tokio::io::stdin().read_to_string(&mut buffer).await?;
        (buffer, Some(start), Some(Utc::now()))
    } else {
        (args.join(" "), None, None)
    };

    let input = match AnalysisInput::new(text, typing_start, typing_end) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let orchestrator = Orchestrator::from_config(&config);
    let outcome = orchestrator.analyze(&input).await;

    info!(request_id = %outcome.request_id, source = %outcome.source, "Analysis finished");
    if let Some(notice) = &outcome.notice {
        eprintln!("note: {}", notice);
    }

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
