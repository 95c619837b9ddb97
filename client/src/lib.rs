//! AgriManage client
//!
//! Session layer for the AgriManage agricultural retail backend: an HTTP API
//! client, login state, the in-memory data store, and the payments, expense
//! and reporting views built on top of it.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod expenses;
pub mod payments;
pub mod poller;
pub mod reports;
pub mod store;

use std::sync::Arc;

pub use crate::api::ApiClient;
pub use crate::auth::{AuthState, FileTokenStore, MemoryTokenStore, TokenStore};
pub use crate::config::Config;
pub use crate::error::{ClientError, ClientResult};
pub use crate::expenses::ExpenseLedger;
pub use crate::payments::{PaymentsOverview, PaymentsView};
pub use crate::poller::{DashboardPoller, PollerHandle};
pub use crate::reports::{DashboardSnapshot, ReportsService};
pub use crate::store::{DataStore, Snapshot};

/// Everything a logged-in session needs, wired from one configuration
#[derive(Clone)]
pub struct Session {
    pub api: ApiClient,
    pub auth: AuthState,
    pub store: DataStore,
    pub reports: ReportsService,
}

impl Session {
    /// Build the session. Uses a file token store when `auth.token_path` is set.
    pub fn connect(config: &Config) -> ClientResult<Self> {
        let tokens: Arc<dyn TokenStore> = match &config.auth.token_path {
            Some(path) => Arc::new(FileTokenStore::open(path)?),
            None => Arc::new(MemoryTokenStore::new()),
        };
        let api = ApiClient::new(&config.api, tokens)?;
        Ok(Self::from_api(api, config.display.utc_offset_minutes))
    }

    pub fn from_api(api: ApiClient, utc_offset_minutes: i32) -> Self {
        let auth = AuthState::new(api.clone());
        let store = DataStore::new(api.clone(), auth.clone());
        let reports = ReportsService::new(api.clone(), utc_offset_minutes);
        Self {
            api,
            auth,
            store,
            reports,
        }
    }

    pub fn payments(&self) -> PaymentsView {
        PaymentsView::new(self.store.clone())
    }

    /// Expense ledger opened on today's date
    pub fn expenses(&self) -> ExpenseLedger {
        ExpenseLedger::new(self.api.clone(), self.reports.today())
    }
}
