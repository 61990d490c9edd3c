use clap::Parser;
use colored::Colorize;
use prefix_blocklist::commands::{run_cli, Cli};

#[tokio::main]
async fn main() {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    if let Err(e) = log4rs::init_file("log4rs.yml", Default::default()) {
        eprintln!("log4rs.yml not loaded ({e}), logging disabled");
    }
    log::info!("#Start main()");

    let cli = Cli::parse();
    if let Err(e) = run_cli(cli).await {
        log::error!("{e}");
        eprintln!("{} {e}", "error:".red());
        std::process::exit(1);
    }
}
