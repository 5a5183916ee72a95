use anyhow::Result;
use clap::Parser;

use calgrid_tui::app::App;
use calgrid_tui::client::{DEFAULT_BASE_URL, StoreClient};

#[derive(Parser)]
#[command(name = "calgrid")]
#[command(about = "Browse and edit single-day events from a remote store, one month at a time")]
struct Cli {
    /// Base URL of the event store service
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let client = StoreClient::new(cli.base_url.trim_end_matches('/'));
    let (mut app, rx) = App::new(client);
    app.run(rx).await
}
