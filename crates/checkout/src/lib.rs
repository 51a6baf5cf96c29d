//! `storefront-checkout`
//!
//! Two ways to pay for a listed product:
//! - card: the backend creates a hosted payment session and returns its URL
//! - wallet: the backend prices a discounted cart and the client builds a
//!   wallet-app deep link from it

pub mod card;
pub mod wallet;

pub use card::start_card_checkout;
pub use wallet::{start_wallet_checkout, wallet_request, WalletLinkBuilder};

use storefront_catalog::CatalogError;

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Failed to start checkout session.")]
    NoSession,
    #[error("Failed to create MetaMask cart")]
    NoWalletCart,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
