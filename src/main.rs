use anyhow::Result;
use slotbook::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
