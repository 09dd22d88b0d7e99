use clap::Parser;

use greenleaf::cli::{self, Cli};
use greenleaf::config::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match Config::load_or_default(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.logging.init();

    if let Err(e) = cli::run(cli, config).await {
        cli::output::error(e);
        std::process::exit(1);
    }
}
