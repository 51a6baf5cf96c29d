//! `storefront-cli`
//!
//! Terminal front end over the storefront crates: featured carousel, search
//! listing, checkout links and the category tree.

pub mod render;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use storefront_catalog::{
    search_listing, HttpCatalog, ImageProxy, ProductCard, SearchOutcome, SearchQuery,
    CATEGORY_TREE,
};
use storefront_checkout::{start_card_checkout, start_wallet_checkout, WalletLinkBuilder};
use storefront_core::StorefrontConfig;
use storefront_featured::{FeaturedCache, FeaturedWidget, KeyValueStore, MemoryStore, SqliteStore};

pub use render::TerminalRenderer;

/// How often the featured command checks whether the carousel finished.
const SETTLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "storefront", version, about = "Storefront catalog client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
#[command(rename_all = "kebab-case")]
pub enum Command {
    /// Load the featured products and rotate through them once
    Featured {
        /// Keep the featured cache in memory instead of the SQLite file
        #[arg(long, default_value_t = false)]
        no_persist: bool,
    },
    /// Search the catalog and print the listing
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Start checkout for a listed product and print the URL to open
    Buy {
        query: String,
        /// Position in the listing, starting at 1
        #[arg(long, default_value_t = 1)]
        index: usize,
        /// Pay with the wallet token instead of a card
        #[arg(long, default_value_t = false)]
        wallet: bool,
    },
    /// Print the category tree
    Categories,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = StorefrontConfig::from_env().context("invalid storefront configuration")?;
    storefront_observability::init_with(config.log_format);

    match cli.command {
        Command::Featured { no_persist } => featured(&config, no_persist).await,
        Command::Search { query } => search(&config, &query.join(" ")).await,
        Command::Buy {
            query,
            index,
            wallet,
        } => buy(&config, &query, index, wallet).await,
        Command::Categories => {
            print!("{}", category_tree());
            Ok(())
        }
    }
}

async fn featured(config: &StorefrontConfig, no_persist: bool) -> anyhow::Result<()> {
    let api = HttpCatalog::from_config(config).context("failed to build catalog client")?;
    let store: Arc<dyn KeyValueStore> = if no_persist {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(SqliteStore::from_config(config)?)
    };
    let widget = FeaturedWidget::new(api, FeaturedCache::new(store), config);

    let Some(handle) = widget.init(TerminalRenderer::stdout()).await else {
        return Ok(());
    };

    tokio::select! {
        settled = handle.wait_until_settled(SETTLE_POLL) => {
            settled?;
            // Let the last scheduled card swap land before tearing down.
            tokio::time::sleep(config.fade_delay).await;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, stopping carousel");
        }
    }

    let snapshot = handle.shutdown().await?;
    tracing::info!(
        "carousel finished at {} of {}",
        snapshot.index,
        snapshot.len
    );
    Ok(())
}

async fn listing(api: &HttpCatalog, query: &str) -> anyhow::Result<(SearchOutcome, ImageProxy)> {
    let query = SearchQuery::parse(query).map_err(|e| anyhow::anyhow!("{}", e.user_message()))?;
    let proxy = ImageProxy::new(api.api_base());
    let outcome = search_listing(api, &query, &proxy)
        .await
        .context("search failed")?;
    Ok((outcome, proxy))
}

async fn search(config: &StorefrontConfig, query: &str) -> anyhow::Result<()> {
    let api = HttpCatalog::from_config(config).context("failed to build catalog client")?;
    let (outcome, _) = listing(&api, query).await?;

    match outcome {
        SearchOutcome::Listing(cards) => {
            for (position, card) in cards.iter().enumerate() {
                print!("{}", format_card(position + 1, card));
            }
        }
        empty => println!("{}", empty.empty_message().unwrap_or_default()),
    }
    Ok(())
}

async fn buy(
    config: &StorefrontConfig,
    query: &str,
    index: usize,
    wallet: bool,
) -> anyhow::Result<()> {
    let api = HttpCatalog::from_config(config).context("failed to build catalog client")?;
    let (outcome, proxy) = listing(&api, query).await?;

    let cards = match outcome {
        SearchOutcome::Listing(cards) => cards,
        empty => bail!("{}", empty.empty_message().unwrap_or_default()),
    };
    let Some(card) = index.checked_sub(1).and_then(|i| cards.get(i)) else {
        bail!("no product at position {} ({} listed)", index, cards.len());
    };

    let url = if wallet {
        let links = WalletLinkBuilder::from_config(config);
        start_wallet_checkout(&api, &card.product, &proxy, &links).await?
    } else {
        start_card_checkout(&api, card).await?
    };

    println!("{url}");
    Ok(())
}

fn format_card(position: usize, card: &ProductCard) -> String {
    format!(
        "{}. {}\n   Price: ${}  Shipping: ${}  Total: ${}\n   A-CASH price: {}\n   Delivery: {}\n   {}\n",
        position,
        card.title,
        card.price,
        card.shipping,
        card.total,
        card.wallet_price,
        card.delivery,
        card.image
    )
}

fn category_tree() -> String {
    let mut out = String::new();
    for category in CATEGORY_TREE {
        out.push_str(category.name);
        out.push('\n');
        for child in category.children {
            out.push_str("  - ");
            out.push_str(child);
            out.push('\n');
        }
    }
    out
}
