use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "moviefinder-server")]
#[command(about = "Movie search and favorites web application", long_about = None)]
struct Args {
    #[arg(short, long)]
    config: Option<String>,
    #[arg(short, long)]
    debug: bool,
    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let default_filter = if args.debug {
        "moviefinder=debug,tower_http=debug"
    } else {
        "moviefinder=info,tower_http=info"
    };

    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| default_filter.into()),
    );

    if args.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    if let Err(e) = moviefinder::run(args.config.as_deref(), args.debug).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
