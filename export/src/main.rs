//! Roster Export - writes the printable report and spreadsheet for one event.

use roster_export::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster_export=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Exporting roster from {}", config.input.display());

    match roster_export::run(&config) {
        Ok(report) => {
            tracing::info!("Export complete: {} rows", report.rows);
            println!("{}", serde_json::to_string(&report)?);
            Ok(())
        }
        Err(err) => {
            tracing::error!("Export failed: {}", err);
            Err(err.into())
        }
    }
}
