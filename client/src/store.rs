//! In-memory data store for the current session
//!
//! Holds the companies, products, stock balances, stock transactions and
//! sales fetched from the backend. Every mutation is one API call followed by
//! a full refresh; failures are logged and never touch local state.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use shared::{
    sort_companies_by_name, validate_new_sale, validate_sale_update, validate_stock_inward,
    Company, NewProduct, NewSale, Product, ProductUpdate, Sale, SaleUpdate, Stock, StockInward,
    StockTransaction,
};

use crate::api::ApiClient;
use crate::auth::AuthState;
use crate::error::{ClientError, ClientResult};

/// One consistent set of collections as returned by a single refresh
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub companies: Vec<Company>,
    pub products: Vec<Product>,
    pub stocks: Vec<Stock>,
    pub stock_transactions: Vec<StockTransaction>,
    pub sales: Vec<Sale>,
}

struct StoreState {
    data: Snapshot,
    loading: bool,
}

/// Session data aggregator
#[derive(Clone)]
pub struct DataStore {
    api: ApiClient,
    auth: AuthState,
    state: Arc<RwLock<StoreState>>,
}

impl DataStore {
    pub fn new(api: ApiClient, auth: AuthState) -> Self {
        Self {
            api,
            auth,
            state: Arc::new(RwLock::new(StoreState {
                data: Snapshot::default(),
                // Nothing has been fetched yet
                loading: true,
            })),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    // ========================================================================
    // Refresh
    // ========================================================================

    /// Refetch all collections concurrently and replace them together.
    ///
    /// Does nothing when logged out. On any failure the previous collections
    /// are kept as they were. Overlapping refreshes are not serialized: the
    /// last one to finish wins and the first to finish clears `loading`.
    pub async fn refresh(&self) {
        if !self.auth.is_logged_in() {
            return;
        }

        self.state.write().await.loading = true;
        let result = self.fetch_snapshot().await;

        let mut state = self.state.write().await;
        match result {
            Ok(data) => {
                tracing::debug!(
                    "Refreshed {} products, {} sales, {} companies",
                    data.products.len(),
                    data.sales.len(),
                    data.companies.len()
                );
                state.data = data;
            }
            Err(e) => tracing::error!("Failed to refresh data: {}", e),
        }
        state.loading = false;
    }

    async fn fetch_snapshot(&self) -> ClientResult<Snapshot> {
        let ((products, stocks), stock_transactions, sales, mut companies) = tokio::try_join!(
            self.api.list_products(),
            self.api.list_transactions(),
            self.api.list_sales(),
            self.api.list_companies()
        )?;
        sort_companies_by_name(&mut companies);

        Ok(Snapshot {
            companies,
            products,
            stocks,
            stock_transactions,
            sales,
        })
    }

    /// Refresh after a successful call; log a failed one
    async fn complete<T>(&self, action: &str, result: ClientResult<T>) -> bool {
        match result {
            Ok(_) => {
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::error!("Failed to {}: {}", action, e);
                false
            }
        }
    }

    // ========================================================================
    // Companies
    // ========================================================================

    pub async fn add_company(&self, name: &str) {
        let result = self.api.create_company(name.trim()).await;
        self.complete("add company", result).await;
    }

    pub async fn update_company(&self, id: Uuid, name: &str) {
        let result = self.api.update_company(id, name.trim()).await;
        self.complete("update company", result).await;
    }

    /// `false` when the backend refuses, e.g. the company still has products
    pub async fn delete_company(&self, id: Uuid) -> bool {
        let result = self.api.delete_company(id).await;
        self.complete("delete company", result).await
    }

    // ========================================================================
    // Products
    // ========================================================================

    pub async fn add_product(&self, product: &NewProduct) {
        let result = self.api.create_product(product).await;
        self.complete("add product", result).await;
    }

    pub async fn update_product(&self, id: Uuid, update: &ProductUpdate) {
        let result = self.api.update_product(id, update).await;
        self.complete("update product", result).await;
    }

    pub async fn delete_product(&self, id: Uuid) {
        let result = self.api.delete_product(id).await;
        self.complete("delete product", result).await;
    }

    // ========================================================================
    // Stock
    // ========================================================================

    /// Record a stock inward. A blank party is recorded as "Direct Supply".
    pub async fn add_stock(
        &self,
        product_id: Uuid,
        quantity: i32,
        party_name: &str,
        purchase_price: Decimal,
    ) {
        let inward = StockInward::new(product_id, quantity, party_name, purchase_price);
        let result = match validate_stock_inward(&inward) {
            Ok(()) => self.api.create_stock_inward(&inward).await,
            Err(message) => Err(ClientError::from(message)),
        };
        self.complete("add stock", result).await;
    }

    pub async fn delete_stock_transaction(&self, id: Uuid) {
        let result = self.api.delete_transaction(id).await;
        self.complete("delete stock transaction", result).await;
    }

    // ========================================================================
    // Sales
    // ========================================================================

    pub async fn add_sale(&self, sale: &NewSale) -> bool {
        let result = match validate_new_sale(sale) {
            Ok(()) => self.api.create_sale(sale).await,
            Err(message) => Err(ClientError::from(message)),
        };
        self.complete("add sale", result).await
    }

    /// Only the fields set on `update` are sent
    pub async fn update_sale(&self, id: Uuid, update: &SaleUpdate) -> bool {
        let result = match validate_sale_update(update) {
            Ok(()) => self.api.update_sale(id, update).await,
            Err(message) => Err(ClientError::from(message)),
        };
        self.complete("update sale", result).await
    }

    pub async fn delete_sale(&self, id: Uuid) {
        let result = self.api.delete_sale(id).await;
        self.complete("delete sale", result).await;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub async fn snapshot(&self) -> Snapshot {
        self.state.read().await.data.clone()
    }

    pub async fn companies(&self) -> Vec<Company> {
        self.state.read().await.data.companies.clone()
    }

    pub async fn products(&self) -> Vec<Product> {
        self.state.read().await.data.products.clone()
    }

    pub async fn stocks(&self) -> Vec<Stock> {
        self.state.read().await.data.stocks.clone()
    }

    pub async fn stock_transactions(&self) -> Vec<StockTransaction> {
        self.state.read().await.data.stock_transactions.clone()
    }

    pub async fn sales(&self) -> Vec<Sale> {
        self.state.read().await.data.sales.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }
}
