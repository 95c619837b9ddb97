//! HTTP client for the AgriManage backend
//!
//! Every request carries the bearer token from the configured
//! [`TokenStore`]. Failures are returned as [`ClientError`]; callers decide
//! whether to log and swallow them.

pub mod dto;

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use shared::{
    Company, DailyExpenseTotal, DailyTotal, DashboardReport, DateRange, Expense, ExpenseForm,
    NewProduct, NewSale, PeriodSummary, Product, ProductUpdate, Sale, SaleUpdate, Stock,
    StockInward, StockTransaction,
};

use crate::auth::TokenStore;
use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use dto::{
    CompanyPayload, ExpensePayload, LoginForm, LoginResponse, ProductCreatePayload,
    ProductRecord, SaleCreatePayload, SaleRecord, SaleUpdatePayload, StockInPayload,
    TransactionRecord,
};

/// Backend API client
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a client from configuration
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenStore>) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Create a client against a custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.tokens.get() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, resource: &str) -> ClientResult<Response> {
        tracing::debug!("Sending request for {}", resource);
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_response(status.as_u16(), &body));
        }
        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        resource: &str,
    ) -> ClientResult<T> {
        let response = self.send(builder, resource).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode {
            resource: resource.to_string(),
            message: e.to_string(),
        })
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Exchange credentials for an access token (form-encoded, OAuth2 style)
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<String> {
        let builder = self
            .client
            .post(self.url("/login/access-token"))
            .form(&LoginForm { username, password });

        match self.fetch::<LoginResponse>(builder, "login").await {
            Ok(response) => Ok(response.access_token),
            Err(ClientError::NotAuthenticated) => Err(ClientError::InvalidCredentials),
            Err(ClientError::Api { status: 400, .. }) => Err(ClientError::InvalidCredentials),
            Err(e) => Err(e),
        }
    }

    // ========================================================================
    // Companies
    // ========================================================================

    pub async fn list_companies(&self) -> ClientResult<Vec<Company>> {
        self.fetch(self.request(Method::GET, "/companies/"), "companies")
            .await
    }

    pub async fn create_company(&self, name: &str) -> ClientResult<Company> {
        let builder = self
            .request(Method::POST, "/companies/")
            .json(&CompanyPayload { name });
        self.fetch(builder, "company").await
    }

    pub async fn update_company(&self, id: Uuid, name: &str) -> ClientResult<Company> {
        let builder = self
            .request(Method::PUT, &format!("/companies/{}", id))
            .json(&CompanyPayload { name });
        self.fetch(builder, "company").await
    }

    pub async fn delete_company(&self, id: Uuid) -> ClientResult<()> {
        self.send(
            self.request(Method::DELETE, &format!("/companies/{}", id)),
            "company",
        )
        .await?;
        Ok(())
    }

    // ========================================================================
    // Products
    // ========================================================================

    /// Products together with the stock balance reported for each
    pub async fn list_products(&self) -> ClientResult<(Vec<Product>, Vec<Stock>)> {
        let records: Vec<ProductRecord> = self
            .fetch(self.request(Method::GET, "/products/"), "products")
            .await?;
        Ok(records.into_iter().map(ProductRecord::into_parts).unzip())
    }

    pub async fn create_product(&self, product: &NewProduct) -> ClientResult<Product> {
        let builder = self
            .request(Method::POST, "/products/")
            .json(&ProductCreatePayload::from(product));
        let record: ProductRecord = self.fetch(builder, "product").await?;
        Ok(record.into_parts().0)
    }

    pub async fn update_product(&self, id: Uuid, update: &ProductUpdate) -> ClientResult<Product> {
        let builder = self
            .request(Method::PUT, &format!("/products/{}", id))
            .json(update);
        let record: ProductRecord = self.fetch(builder, "product").await?;
        Ok(record.into_parts().0)
    }

    pub async fn delete_product(&self, id: Uuid) -> ClientResult<()> {
        self.send(
            self.request(Method::DELETE, &format!("/products/{}", id)),
            "product",
        )
        .await?;
        Ok(())
    }

    // ========================================================================
    // Stock transactions
    // ========================================================================

    pub async fn list_transactions(&self) -> ClientResult<Vec<StockTransaction>> {
        let records: Vec<TransactionRecord> = self
            .fetch(self.request(Method::GET, "/transactions"), "transactions")
            .await?;
        Ok(records.into_iter().map(StockTransaction::from).collect())
    }

    pub async fn create_stock_inward(&self, inward: &StockInward) -> ClientResult<StockTransaction> {
        let builder = self
            .request(Method::POST, "/transactions")
            .json(&StockInPayload::from(inward));
        let record: TransactionRecord = self.fetch(builder, "transaction").await?;
        Ok(record.into())
    }

    pub async fn delete_transaction(&self, id: Uuid) -> ClientResult<()> {
        self.send(
            self.request(Method::DELETE, &format!("/transactions/{}", id)),
            "transaction",
        )
        .await?;
        Ok(())
    }

    // ========================================================================
    // Sales
    // ========================================================================

    pub async fn list_sales(&self) -> ClientResult<Vec<Sale>> {
        let records: Vec<SaleRecord> = self
            .fetch(self.request(Method::GET, "/sales"), "sales")
            .await?;
        Ok(records.into_iter().map(Sale::from).collect())
    }

    pub async fn create_sale(&self, sale: &NewSale) -> ClientResult<Sale> {
        let builder = self
            .request(Method::POST, "/sales")
            .json(&SaleCreatePayload::from(sale));
        let record: SaleRecord = self.fetch(builder, "sale").await?;
        Ok(record.into())
    }

    pub async fn update_sale(&self, id: Uuid, update: &SaleUpdate) -> ClientResult<Sale> {
        let builder = self
            .request(Method::PUT, &format!("/sales/{}", id))
            .json(&SaleUpdatePayload::from(update));
        let record: SaleRecord = self.fetch(builder, "sale").await?;
        Ok(record.into())
    }

    pub async fn delete_sale(&self, id: Uuid) -> ClientResult<()> {
        self.send(
            self.request(Method::DELETE, &format!("/sales/{}", id)),
            "sale",
        )
        .await?;
        Ok(())
    }

    // ========================================================================
    // Expenses
    // ========================================================================

    /// Entries for one day, or every entry when `expense_date` is `None`
    pub async fn list_expenses(&self, expense_date: Option<NaiveDate>) -> ClientResult<Vec<Expense>> {
        let mut builder = self.request(Method::GET, "/expenses/");
        if let Some(date) = expense_date {
            builder = builder.query(&[("expense_date", date.to_string())]);
        }
        self.fetch(builder, "expenses").await
    }

    pub async fn get_expense(&self, id: Uuid) -> ClientResult<Expense> {
        self.fetch(
            self.request(Method::GET, &format!("/expenses/{}", id)),
            "expense",
        )
        .await
    }

    pub async fn create_expense(
        &self,
        form: &ExpenseForm,
        expense_date: Option<NaiveDate>,
    ) -> ClientResult<Expense> {
        let builder = self
            .request(Method::POST, "/expenses/")
            .json(&ExpensePayload::from_form(form, expense_date));
        self.fetch(builder, "expense").await
    }

    pub async fn update_expense(&self, id: Uuid, form: &ExpenseForm) -> ClientResult<Expense> {
        let builder = self
            .request(Method::PUT, &format!("/expenses/{}", id))
            .json(&ExpensePayload::from_form(form, None));
        self.fetch(builder, "expense").await
    }

    /// Soft delete; the backend answers with the deleted record
    pub async fn delete_expense(&self, id: Uuid) -> ClientResult<Expense> {
        self.fetch(
            self.request(Method::DELETE, &format!("/expenses/{}", id)),
            "expense",
        )
        .await
    }

    pub async fn expense_daily_total(&self, date: NaiveDate) -> ClientResult<DailyTotal> {
        let builder = self
            .request(Method::GET, "/expenses/daily-total")
            .query(&[("expense_date", date.to_string())]);
        self.fetch(builder, "expense daily total").await
    }

    pub async fn expenses_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ClientResult<Vec<DailyExpenseTotal>> {
        let builder = self.request(Method::GET, "/expenses/date-range").query(&[
            ("start_date", start.to_string()),
            ("end_date", end.to_string()),
        ]);
        self.fetch(builder, "expense date range").await
    }

    // ========================================================================
    // Reports
    // ========================================================================

    pub async fn dashboard_report(&self) -> ClientResult<DashboardReport> {
        self.fetch(self.request(Method::GET, "/reports/"), "dashboard report")
            .await
    }

    pub async fn period_summary(&self, range: DateRange) -> ClientResult<PeriodSummary> {
        let builder = self.request(Method::GET, "/reports/period-summary").query(&[
            ("start_date", range.start.to_string()),
            ("end_date", range.end.to_string()),
        ]);
        self.fetch(builder, "period summary").await
    }
}
