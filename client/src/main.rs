//! AgriManage - command-line session runner
//!
//! Logs in, loads the shop data, prints a summary of stock, customer
//! balances and the current month, and optionally keeps the dashboard
//! report fresh until interrupted.

use std::time::Duration;

use agrimanage_client::{Config, DashboardPoller, Session};
use shared::{CustomerFilter, PeriodSelection};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Customers listed in the outstanding balance summary
const TOP_DEBTORS: usize = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing; JSON lines in production
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "agrimanage=info,agrimanage_client=info".into());
    let production = std::env::var("AGRI_ENVIRONMENT").map_or(false, |env| env == "production");
    if production {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // Load configuration
    let config = Config::load()?;

    tracing::info!("Starting AgriManage session");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Backend: {}", config.api.base_url);

    let session = Session::connect(&config)?;

    if !session.auth.is_logged_in() {
        match (&config.auth.username, &config.auth.password) {
            (Some(username), Some(password)) => {
                if !session.auth.login(username, password).await {
                    anyhow::bail!("Login failed for {}", username);
                }
            }
            _ => anyhow::bail!(
                "No stored token; set AGRI__AUTH__USERNAME and AGRI__AUTH__PASSWORD to log in"
            ),
        }
    }

    session.store.refresh().await;
    log_summary(&session).await;

    if config.poller.enabled {
        let poller = DashboardPoller::new(
            session.reports.clone(),
            Duration::from_secs(config.poller.interval_secs),
        );
        let handle = poller.start();

        tokio::signal::ctrl_c().await?;
        tracing::info!("Shutting down");
        handle.shutdown().await;
    }

    Ok(())
}

async fn log_summary(session: &Session) {
    let data = session.store.snapshot().await;
    tracing::info!(
        "Loaded {} companies, {} products, {} stock entries, {} sales",
        data.companies.len(),
        data.products.len(),
        data.stock_transactions.len(),
        data.sales.len()
    );

    let dashboard = session.reports.dashboard_snapshot(&session.store).await;
    for product in &dashboard.low_stock {
        let remaining = shared::remaining_stock(&data.stocks, product.id);
        tracing::info!(
            "Low stock: {} ({} {} left, minimum {})",
            product.name,
            remaining,
            product.unit,
            product.min_stock
        );
    }
    tracing::info!(
        "Today: Rs. {} on credit, Rs. {} received",
        dashboard.today.credit,
        dashboard.today.debit
    );

    let payments = session.payments().overview("", CustomerFilter::Outstanding).await;
    tracing::info!(
        "Outstanding: Rs. {} across {} of {} customers",
        payments.totals.total_outstanding,
        payments.totals.customers_with_debt,
        payments.totals.customer_count
    );
    for customer in payments.customers.iter().take(TOP_DEBTORS) {
        tracing::info!(
            "  {} owes Rs. {} ({} sales)",
            customer.customer_name,
            customer.outstanding,
            customer.sales_count
        );
    }

    match session
        .reports
        .fetch_period_summary(&PeriodSelection::OneMonth)
        .await
    {
        Ok(summary) => tracing::info!(
            "Last month ({} to {}): revenue Rs. {}, gross profit Rs. {}, net profit Rs. {}",
            summary.period.start_date,
            summary.period.end_date,
            summary.sales_summary.total_revenue,
            summary.sales_summary.gross_profit,
            summary.overall.net_profit
        ),
        Err(e) => tracing::error!("Failed to fetch period summary: {}", e),
    }
}
