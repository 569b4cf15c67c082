use b3_screener::adapter::inbound::cli::{self, Cli};
use clap::Parser;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(report) = cli::run(cli).await {
        eprintln!("{report:?}");
        std::process::exit(1);
    }
}
