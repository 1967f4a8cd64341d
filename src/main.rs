use clap::Parser;
use milo::core::config::{self, CliOverrides, MiloConfig};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "milo", about = "Terminal chat widget for the MILO assistant")]
struct Args {
    /// Prediction endpoint URL (overrides config and MILO_ENDPOINT)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Request timeout in seconds; 0 disables it
    #[arg(short, long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to milo.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("milo.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        MiloConfig::default()
    });
    let cli = CliOverrides {
        endpoint: args.endpoint,
        timeout_secs: args.timeout_secs,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("MILO starting up with endpoint: {}", resolved.endpoint);

    milo::tui::run(resolved)
}
