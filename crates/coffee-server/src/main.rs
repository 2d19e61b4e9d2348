use clap::Parser;
use coffee_server::{app, config::AppConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = AppConfig::load(&args.config)?;

    app::init_tracing(&config.logging);
    tracing::info!("Starting coffee server with config: {}", args.config);

    app::run(config).await
}
