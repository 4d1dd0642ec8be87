use std::process::ExitCode;

use log::{LevelFilter, error};
use pslib_harvester::{ScrapingContext, run};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let context = match ScrapingContext::from_env() {
        Ok(context) => context,
        Err(e) => {
            error!("failed to set up harvester: {e:#}");
            return ExitCode::from(2);
        }
    };

    let summary = run(&context).await;
    if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        eprintln!("{}", summary.report());
        ExitCode::FAILURE
    }
}
