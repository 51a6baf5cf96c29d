//! Wallet (crypto token) checkout via a wallet-app deep link.

use storefront_catalog::{CartRequest, CatalogApi, ImageProxy, WalletCart};
use storefront_core::{Product, StorefrontConfig};

use crate::CheckoutError;

const TOKEN: &str = "A-CASH";
const DEFAULT_COLOR: &str = "Default";

/// Body for the wallet cart endpoint: the product's own fields, unproxied.
pub fn wallet_request(product: &Product) -> CartRequest {
    CartRequest {
        title: product.title.clone(),
        price: product.price,
        shipping_fee: product.shipping_or_zero(),
        image: product.image.clone().unwrap_or_default(),
        product_id: product.id.clone(),
        sku_id: product.sku_id.clone(),
    }
}

/// Builds deep links into the wallet dapp's cart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletLinkBuilder {
    dapp_url: String,
}

impl WalletLinkBuilder {
    pub fn new(dapp_url: impl Into<String>) -> Self {
        Self {
            dapp_url: dapp_url.into(),
        }
    }

    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self::new(config.wallet_dapp_url.clone())
    }

    /// Deep link for `cart`. The cart image is passed through as-is (it is
    /// already a proxy URL); every other value is component-encoded.
    /// `span1` carries the discount total without padding to two decimals.
    pub fn build(&self, cart: &WalletCart, delivery: &str) -> String {
        let enc = |s: &str| urlencoding::encode(s).into_owned();
        let color = cart
            .color
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COLOR);

        let autoresponse = format!(
            "Thank you for shopping with us. Your order ({} {TOKEN} plus {} {TOKEN} shipping cost) \
             has been received and will be processed shortly.",
            cart.price, cart.shipping
        );
        let subject = format!(
            "{TOKEN} Marketplace order confirmation ({}) - transactionHash",
            cart.title
        );

        format!(
            "{}?_autoresponse={}&_subject={}&cartTitle={}&cartProductId={}&cartColor={}\
             &cartImage={}&span1={}&span2={}&span3={}&span4={}&total={}",
            self.dapp_url,
            enc(&autoresponse),
            enc(&subject),
            enc(&cart.title),
            enc(cart.product_id.as_str()),
            enc(color),
            cart.image,
            enc(&format!("{} {TOKEN}", cart.discount_total.to_plain_string())),
            enc(&format!("{} {TOKEN}", cart.shipping)),
            enc(delivery),
            enc(&format!("{} {TOKEN}", cart.total)),
            enc(&cart.total.to_string()),
        )
    }
}

/// Price a wallet cart for `product` and return the deep link to open.
pub async fn start_wallet_checkout<A>(
    api: &A,
    product: &Product,
    proxy: &ImageProxy,
    links: &WalletLinkBuilder,
) -> Result<String, CheckoutError>
where
    A: CatalogApi + ?Sized,
{
    let cart = api
        .wallet_cart(&wallet_request(product))
        .await
        .map_err(|e| {
            tracing::error!("wallet checkout for product {} failed: {}", product.id, e);
            e
        })?
        .ok_or_else(|| {
            tracing::warn!("backend returned no wallet cart for product {}", product.id);
            CheckoutError::NoWalletCart
        })?;

    let cart = WalletCart {
        image: proxy.proxy(&cart.image),
        color: Some(
            cart.color
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        ),
        ..cart
    };

    tracing::info!("wallet checkout link built for product {}", product.id);
    Ok(links.build(&cart, &product.delivery().label()))
}
