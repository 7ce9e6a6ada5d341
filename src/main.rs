use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    tcpdial::cli::run().await
}
