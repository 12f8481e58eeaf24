use clap::Parser;
use picstory::config::setup_logging;
use tracing::error;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = picstory::cli::CliOptions::parse();

    if setup_logging(cli.debug).is_err() {
        return;
    }

    if let Err(err) = picstory::web::setup_server(cli).await {
        error!("Application error: {}", err);
    }
}
