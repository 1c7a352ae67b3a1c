//! Application context
//!
//! Owns the HTTP client, local storage and the cart, and lends them to the
//! checkout, tracker and admin flows.

use shared::catalog::{self, Product};
use shared::models::StoreInfo;
use shared::whatsapp::DEFAULT_MERCHANT_NUMBER;

use crate::admin::AdminConsole;
use crate::cart::CartStore;
use crate::checkout::{self, CheckoutForm, ConfirmedOrder, LastOrder};
use crate::http::HttpClient;
use crate::storage::{LAST_ORDER_KEY, LocalStorage};
use crate::tracker::OrderTracker;
use crate::{ClientConfig, ClientResult};

pub struct Storefront {
    config: ClientConfig,
    client: HttpClient,
    storage: LocalStorage,
    cart: CartStore,
    store_info: Option<StoreInfo>,
}

impl Storefront {
    /// Build the context and restore the persisted cart
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = HttpClient::new(&config)?;
        let storage = LocalStorage::new(&config.data_dir);
        let cart = CartStore::load(storage.clone());
        tracing::debug!(
            base_url = %config.base_url,
            cart_items = cart.total_items(),
            "Storefront initialized"
        );
        Ok(Self {
            config,
            client,
            storage,
            cart,
            store_info: None,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// The catalog is static; no request needed
    pub fn products(&self) -> &'static [Product] {
        catalog::all()
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Merchant details, fetched once
    pub async fn store_info(&mut self) -> ClientResult<&StoreInfo> {
        let info = match self.store_info.take() {
            Some(info) => info,
            None => self.client.store_info().await?,
        };
        Ok(&*self.store_info.insert(info))
    }

    /// Merchant WhatsApp number, falling back to the default when the server is unreachable
    pub async fn merchant_number(&mut self) -> String {
        match self.store_info().await {
            Ok(info) => info.whatsapp_number.clone(),
            Err(e) => {
                tracing::warn!(error = %e, "Store info unavailable, using default merchant number");
                DEFAULT_MERCHANT_NUMBER.to_string()
            }
        }
    }

    pub async fn checkout(&mut self, form: &CheckoutForm) -> ClientResult<ConfirmedOrder> {
        let merchant = self.merchant_number().await;
        checkout::submit(&self.client, &mut self.cart, form, &self.storage, &merchant).await
    }

    /// Confirmation of the most recent order, if one was placed
    pub async fn last_order(&mut self) -> Option<ConfirmedOrder> {
        let last = match self.storage.load::<LastOrder>(LAST_ORDER_KEY) {
            Ok(last) => last?,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable last order");
                return None;
            }
        };
        let merchant = self.merchant_number().await;
        Some(ConfirmedOrder::from_last_order(&last, &merchant))
    }

    pub fn tracker(&self) -> OrderTracker {
        OrderTracker::new(self.client.clone())
    }

    pub async fn admin_login(&self, username: &str, password: &str) -> ClientResult<AdminConsole> {
        AdminConsole::login(&self.client, self.storage.clone(), username, password).await
    }

    /// Previously saved admin session, if still valid
    pub fn admin_console(&self) -> Option<AdminConsole> {
        AdminConsole::restore(&self.client, self.storage.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ClientConfig::new("http://127.0.0.1:9", tmp.path()).with_timeout(2);
        let mut app = Storefront::new(config).unwrap();

        assert_eq!(app.products().len(), 3);
        assert!(app.cart().is_empty());
        assert_eq!(app.merchant_number().await, DEFAULT_MERCHANT_NUMBER);
        assert!(app.last_order().await.is_none());
        assert!(app.admin_console().is_none());
    }

    #[test]
    fn test_cart_survives_restart() {
        let tmp = tempfile::tempdir().unwrap();
        {
            let mut app = Storefront::new(ClientConfig::new("http://127.0.0.1:9", tmp.path())).unwrap();
            let popcorn = catalog::find("visionary-popcorn").unwrap();
            app.cart_mut().add(popcorn, 2);
        }
        let app = Storefront::new(ClientConfig::new("http://127.0.0.1:9", tmp.path())).unwrap();
        assert_eq!(app.cart().total_price(), 1200.0);
    }
}
