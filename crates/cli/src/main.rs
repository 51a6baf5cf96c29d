use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = storefront_cli::Cli::parse();
    storefront_cli::run(cli).await
}
