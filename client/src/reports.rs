//! Reporting: period summaries and the dashboard

use chrono::{FixedOffset, NaiveDate, Offset, Utc};

use shared::{
    company_distribution, daily_trend, low_stock_products, product_performance,
    today_credit_debit, CompanyShare, CreditDebitTotals, DailyTrendPoint, DashboardReport,
    DateRange, PeriodSelection, PeriodSummary, Product, ProductPerformance, DAILY_TREND_DAYS,
};

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::store::DataStore;

/// Everything the dashboard shows at once
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    /// Zeroed when the report could not be fetched
    pub report: DashboardReport,
    pub today: CreditDebitTotals,
    pub low_stock: Vec<Product>,
    pub daily_trend: Vec<DailyTrendPoint>,
    pub top_products: Vec<ProductPerformance>,
    pub company_revenue: Vec<CompanyShare>,
}

/// Reporting service
#[derive(Clone)]
pub struct ReportsService {
    api: ApiClient,
    utc_offset_minutes: i32,
}

impl ReportsService {
    pub fn new(api: ApiClient, utc_offset_minutes: i32) -> Self {
        Self {
            api,
            utc_offset_minutes,
        }
    }

    /// Today's calendar date in the display offset
    pub fn today(&self) -> NaiveDate {
        let offset =
            FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix());
        Utc::now().with_timezone(&offset).date_naive()
    }

    /// Backend summary for a preset or custom period ending today
    pub async fn fetch_period_summary(
        &self,
        selection: &PeriodSelection,
    ) -> ClientResult<PeriodSummary> {
        self.period_summary_for(selection.date_range(self.today()))
            .await
    }

    pub async fn period_summary_for(&self, range: DateRange) -> ClientResult<PeriodSummary> {
        tracing::debug!("Fetching period summary {} to {}", range.start, range.end);
        self.api.period_summary(range).await
    }

    pub async fn fetch_dashboard(&self) -> ClientResult<DashboardReport> {
        self.api.dashboard_report().await
    }

    /// Dashboard report plus the figures computed locally from the store
    pub async fn dashboard_snapshot(&self, store: &DataStore) -> DashboardSnapshot {
        let report = match self.fetch_dashboard().await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("Failed to fetch dashboard report: {}", e);
                DashboardReport::default()
            }
        };

        let data = store.snapshot().await;
        let low_stock = low_stock_products(&data.products, &data.stocks)
            .into_iter()
            .cloned()
            .collect();

        DashboardSnapshot {
            report,
            today: today_credit_debit(&data.sales, self.today()),
            low_stock,
            daily_trend: daily_trend(&data.sales, DAILY_TREND_DAYS),
            top_products: product_performance(&data.sales, &data.products),
            company_revenue: company_distribution(&data.sales, &data.products, &data.companies),
        }
    }
}
