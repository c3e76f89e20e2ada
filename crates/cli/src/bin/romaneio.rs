use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    romaneio_cli::main_entry().await
}
