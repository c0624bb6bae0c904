use tracing::error;
use tracing_subscriber::EnvFilter;

use ticketing_forecast::config::Config;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    match ticketing_forecast::run(cfg).await {
        Ok(written) => println!("Forecast rows written: {written}"),
        Err(e) => {
            error!("Fatal error: {e}");
            std::process::exit(1);
        }
    }
}
