use anyhow::Result;
use nws_alerts::cli::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli().await
}
