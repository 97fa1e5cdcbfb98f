use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    voicecart_cli::cli::app::run().await
}
