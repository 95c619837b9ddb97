//! In-process fake of the AgriManage backend for integration tests
//!
//! Serves the same routes (trailing slashes included) on an ephemeral port.
//! Decimals are sent as strings or floats and timestamps without a zone, as
//! the real backend does.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use agrimanage_client::{ApiClient, MemoryTokenStore, Session};
use axum::{
    extract::{Form, Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

pub const TOKEN: &str = "test-token";
pub const USERNAME: &str = "admin@agrimanage.pk";
pub const PASSWORD: &str = "secret";

/// Display offset used by test sessions (Asia/Karachi)
pub const OFFSET_MINUTES: i32 = 300;

#[derive(Default)]
pub struct BackendState {
    pub companies: Vec<Value>,
    pub products: Vec<Value>,
    pub transactions: Vec<Value>,
    pub sales: Vec<Value>,
    pub expenses: Vec<Value>,
    pub fail_products: bool,
    pub fail_reports: bool,
    pub fail_daily_total: bool,
    pub report_calls: usize,
    /// Last request body per resource
    pub bodies: HashMap<&'static str, Value>,
    /// Last query string per resource
    pub queries: HashMap<&'static str, HashMap<String, String>>,
}

pub type Shared = Arc<Mutex<BackendState>>;

pub struct FakeBackend {
    pub base_url: String,
    pub state: Shared,
}

impl FakeBackend {
    pub async fn spawn() -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState::default()));
        let app = Router::new().nest("/api/v1", api_routes(state.clone()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api/v1", addr),
            state,
        }
    }

    /// Session that already holds a valid token
    pub fn session(&self) -> Session {
        let api = ApiClient::with_base_url(
            self.base_url.clone(),
            Arc::new(MemoryTokenStore::with_token(TOKEN)),
        );
        Session::from_api(api, OFFSET_MINUTES)
    }

    /// Session with no token
    pub fn anonymous_session(&self) -> Session {
        let api = ApiClient::with_base_url(self.base_url.clone(), Arc::new(MemoryTokenStore::new()));
        Session::from_api(api, OFFSET_MINUTES)
    }

    pub fn with_state<T>(&self, f: impl FnOnce(&mut BackendState) -> T) -> T {
        f(&mut self.state.lock().unwrap())
    }

    pub fn body(&self, resource: &'static str) -> Option<Value> {
        self.with_state(|s| s.bodies.get(resource).cloned())
    }

    pub fn query(&self, resource: &'static str) -> Option<HashMap<String, String>> {
        self.with_state(|s| s.queries.get(resource).cloned())
    }

    // ========================================================================
    // Seeding
    // ========================================================================

    pub fn seed_company(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.with_state(|s| {
            s.companies.push(json!({
                "id": id,
                "name": name,
                "created_at": "2024-04-01T09:30:00.123456",
            }))
        });
        id
    }

    pub fn seed_product(&self, name: &str, company_id: Option<Uuid>, current_stock: Option<i64>) -> Uuid {
        let id = Uuid::new_v4();
        let mut product = json!({
            "id": id,
            "name": name,
            "category": "Fertilizer",
            "unit": "bag",
            "purchase_price": "2800.00",
            "min_stock": 5,
            "company_id": company_id,
        });
        if let Some(stock) = current_stock {
            product["current_stock"] = json!(stock);
        }
        self.with_state(|s| s.products.push(product));
        id
    }

    pub fn seed_transaction(&self, product_id: Uuid, quantity: i64, party: Option<&str>, created_at: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.with_state(|s| {
            s.transactions.push(json!({
                "id": id,
                "product_id": product_id,
                "quantity": quantity,
                "party_name": party,
                "purchase_price": "2800.00",
                "type": "IN",
                "created_at": created_at,
            }))
        });
        id
    }

    pub fn seed_sale(
        &self,
        product_id: Uuid,
        customer: &str,
        quantity: i64,
        selling_price: &str,
        payment_type: &str,
        created_at: &str,
    ) -> Uuid {
        let id = Uuid::new_v4();
        let total = decimal(&json!(selling_price)) * Decimal::from(quantity);
        self.with_state(|s| {
            s.sales.push(json!({
                "id": id,
                "product_id": product_id,
                "customer_name": customer,
                "customer_phone": null,
                "quantity": quantity,
                "selling_price": selling_price,
                "payment_type": payment_type,
                "purchase_price": "2800.00",
                "total_amount": total.to_string(),
                "created_at": created_at,
            }))
        });
        id
    }

    pub fn seed_expense(&self, name: &str, amount: &str, expense_date: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.with_state(|s| {
            s.expenses.push(json!({
                "id": id,
                "name": name,
                "amount": amount,
                "quantity": 1,
                "details": null,
                "expense_date": format!("{}T00:00:00", expense_date),
                "created_at": now(),
                "is_deleted": false,
                "deleted_at": null,
            }))
        });
        id
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => s.parse().unwrap_or_default(),
        Value::Number(n) => n.to_string().parse().unwrap_or_default(),
        _ => Decimal::ZERO,
    }
}

fn now() -> String {
    chrono::Utc::now()
        .naive_utc()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn not_found() -> Response {
    detail(StatusCode::NOT_FOUND, "Not found")
}

fn position(records: &[Value], id: Uuid) -> Option<usize> {
    let id = id.to_string();
    records.iter().position(|r| r["id"] == json!(id))
}

fn merge(record: &mut Value, update: &Value) {
    if let (Some(record), Some(update)) = (record.as_object_mut(), update.as_object()) {
        for (key, value) in update {
            record.insert(key.clone(), value.clone());
        }
    }
}

// ============================================================================
// Routes
// ============================================================================

fn api_routes(state: Shared) -> Router {
    let protected = Router::new()
        .route("/companies/", get(list_companies).post(create_company))
        .route("/companies/:id", put(update_company).delete(delete_company))
        .route("/products/", get(list_products).post(create_product))
        .route("/products/:id", put(update_product).delete(delete_product))
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route("/transactions/:id", axum::routing::delete(delete_transaction))
        .route("/sales", get(list_sales).post(create_sale))
        .route("/sales/:id", put(update_sale).delete(delete_sale))
        .route("/expenses/", get(list_expenses).post(create_expense))
        .route("/expenses/daily-total", get(expense_daily_total))
        .route("/expenses/date-range", get(expenses_by_date_range))
        .route(
            "/expenses/:id",
            get(read_expense).put(update_expense).delete(delete_expense),
        )
        .route("/reports/", get(dashboard_report))
        .route("/reports/period-summary", get(period_summary))
        .route_layer(middleware::from_fn(require_token));

    Router::new()
        .route("/login/access-token", post(login))
        .merge(protected)
        .with_state(state)
}

async fn require_token(request: Request, next: Next) -> Response {
    let expected = format!("Bearer {}", TOKEN);
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v == expected);

    if authorized {
        next.run(request).await
    } else {
        detail(StatusCode::UNAUTHORIZED, "Not authenticated")
    }
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(Form(form): Form<LoginForm>) -> Response {
    if form.username == USERNAME && form.password == PASSWORD {
        Json(json!({ "access_token": TOKEN, "token_type": "bearer" })).into_response()
    } else {
        detail(StatusCode::BAD_REQUEST, "Incorrect email or password")
    }
}

// Companies

async fn list_companies(State(state): State<Shared>) -> Response {
    Json(state.lock().unwrap().companies.clone()).into_response()
}

async fn create_company(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut s = state.lock().unwrap();
    let company = json!({ "id": Uuid::new_v4(), "name": body["name"], "created_at": now() });
    s.companies.push(company.clone());
    s.bodies.insert("company", body);
    (StatusCode::CREATED, Json(company)).into_response()
}

async fn update_company(
    State(state): State<Shared>,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = state.lock().unwrap();
    let Some(i) = position(&s.companies, id) else {
        return not_found();
    };
    merge(&mut s.companies[i], &body);
    Json(s.companies[i].clone()).into_response()
}

async fn delete_company(State(state): State<Shared>, Path(id): Path<Uuid>) -> Response {
    let mut s = state.lock().unwrap();
    let Some(i) = position(&s.companies, id) else {
        return not_found();
    };
    if s.products.iter().any(|p| p["company_id"] == json!(id.to_string())) {
        return detail(
            StatusCode::BAD_REQUEST,
            "Cannot delete company with existing products",
        );
    }
    s.companies.remove(i);
    StatusCode::NO_CONTENT.into_response()
}

// Products

async fn list_products(State(state): State<Shared>) -> Response {
    let s = state.lock().unwrap();
    if s.fail_products {
        return detail(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable");
    }
    Json(s.products.clone()).into_response()
}

async fn create_product(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut s = state.lock().unwrap();
    let mut product = body.clone();
    merge(
        &mut product,
        &json!({ "id": Uuid::new_v4(), "purchase_price": "0.00", "current_stock": 0 }),
    );
    s.products.push(product.clone());
    s.bodies.insert("product", body);
    (StatusCode::CREATED, Json(product)).into_response()
}

async fn update_product(
    State(state): State<Shared>,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = state.lock().unwrap();
    let Some(i) = position(&s.products, id) else {
        return not_found();
    };
    merge(&mut s.products[i], &body);
    s.bodies.insert("product_update", body);
    Json(s.products[i].clone()).into_response()
}

async fn delete_product(State(state): State<Shared>, Path(id): Path<Uuid>) -> Response {
    let mut s = state.lock().unwrap();
    let Some(i) = position(&s.products, id) else {
        return not_found();
    };
    s.products.remove(i);
    StatusCode::NO_CONTENT.into_response()
}

// Stock transactions

async fn list_transactions(State(state): State<Shared>) -> Response {
    Json(state.lock().unwrap().transactions.clone()).into_response()
}

async fn create_transaction(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut s = state.lock().unwrap();
    let product_id: Uuid = match serde_json::from_value(body["product_id"].clone()) {
        Ok(id) => id,
        Err(_) => return detail(StatusCode::UNPROCESSABLE_ENTITY, "product_id required"),
    };
    let Some(p) = position(&s.products, product_id) else {
        return detail(StatusCode::NOT_FOUND, "Product not found");
    };

    let quantity = body["quantity"].as_i64().unwrap_or(0);
    let stock = s.products[p]["current_stock"].as_i64().unwrap_or(0);
    s.products[p]["current_stock"] = json!(stock + quantity);
    s.products[p]["purchase_price"] = body["purchase_price"].clone();

    let mut record = body.clone();
    merge(&mut record, &json!({ "id": Uuid::new_v4(), "created_at": now() }));
    s.transactions.push(record.clone());
    s.bodies.insert("transaction", body);
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn delete_transaction(State(state): State<Shared>, Path(id): Path<Uuid>) -> Response {
    let mut s = state.lock().unwrap();
    let Some(i) = position(&s.transactions, id) else {
        return not_found();
    };
    s.transactions.remove(i);
    StatusCode::NO_CONTENT.into_response()
}

// Sales

async fn list_sales(State(state): State<Shared>) -> Response {
    Json(state.lock().unwrap().sales.clone()).into_response()
}

async fn create_sale(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut s = state.lock().unwrap();
    let product_id: Uuid = match serde_json::from_value(body["product_id"].clone()) {
        Ok(id) => id,
        Err(_) => return detail(StatusCode::UNPROCESSABLE_ENTITY, "product_id required"),
    };
    let Some(p) = position(&s.products, product_id) else {
        return detail(StatusCode::NOT_FOUND, "Product not found");
    };

    let quantity = body["quantity"].as_i64().unwrap_or(0);
    let stock = s.products[p]["current_stock"].as_i64().unwrap_or(0);
    if quantity > stock {
        return detail(StatusCode::BAD_REQUEST, "Insufficient stock");
    }
    s.products[p]["current_stock"] = json!(stock - quantity);

    let total = decimal(&body["selling_price"]) * Decimal::from(quantity);
    let created_at = match &body["created_at"] {
        Value::String(at) => at.clone(),
        _ => now(),
    };
    let mut record = body.clone();
    merge(
        &mut record,
        &json!({
            "id": Uuid::new_v4(),
            "customer_phone": body.get("customer_phone").cloned().unwrap_or(Value::Null),
            "purchase_price": s.products[p]["purchase_price"].clone(),
            "total_amount": total.to_string(),
            "created_at": created_at,
        }),
    );
    s.sales.push(record.clone());
    s.bodies.insert("sale", body);
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn update_sale(
    State(state): State<Shared>,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = state.lock().unwrap();
    let Some(i) = position(&s.sales, id) else {
        return not_found();
    };
    merge(&mut s.sales[i], &body);
    let total = decimal(&s.sales[i]["selling_price"])
        * Decimal::from(s.sales[i]["quantity"].as_i64().unwrap_or(0));
    s.sales[i]["total_amount"] = json!(total.to_string());
    s.bodies.insert("sale_update", body);
    Json(s.sales[i].clone()).into_response()
}

async fn delete_sale(State(state): State<Shared>, Path(id): Path<Uuid>) -> Response {
    let mut s = state.lock().unwrap();
    let Some(i) = position(&s.sales, id) else {
        return not_found();
    };
    s.sales.remove(i);
    StatusCode::NO_CONTENT.into_response()
}

// Expenses

fn on_day(expense: &Value, day: &str) -> bool {
    expense["expense_date"]
        .as_str()
        .map_or(false, |d| d.starts_with(day))
        && expense["is_deleted"] != json!(true)
}

async fn list_expenses(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut s = state.lock().unwrap();
    let expenses: Vec<Value> = match query.get("expense_date") {
        Some(day) => s.expenses.iter().filter(|e| on_day(e, day)).cloned().collect(),
        None => s
            .expenses
            .iter()
            .filter(|e| e["is_deleted"] != json!(true))
            .cloned()
            .collect(),
    };
    s.queries.insert("expenses", query);
    Json(expenses).into_response()
}

async fn read_expense(State(state): State<Shared>, Path(id): Path<Uuid>) -> Response {
    let s = state.lock().unwrap();
    match position(&s.expenses, id) {
        Some(i) => Json(s.expenses[i].clone()).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Expense not found"),
    }
}

async fn create_expense(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut s = state.lock().unwrap();
    let expense_date = match &body["expense_date"] {
        Value::String(day) => format!("{}T00:00:00", day),
        _ => now(),
    };
    let mut record = body.clone();
    merge(
        &mut record,
        &json!({
            "id": Uuid::new_v4(),
            "expense_date": expense_date,
            "created_at": now(),
            "is_deleted": false,
            "deleted_at": null,
        }),
    );
    s.expenses.push(record.clone());
    s.bodies.insert("expense", body);
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn update_expense(
    State(state): State<Shared>,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = state.lock().unwrap();
    let Some(i) = position(&s.expenses, id) else {
        return detail(StatusCode::NOT_FOUND, "Expense not found");
    };
    merge(&mut s.expenses[i], &body);
    s.bodies.insert("expense_update", body);
    Json(s.expenses[i].clone()).into_response()
}

async fn delete_expense(State(state): State<Shared>, Path(id): Path<Uuid>) -> Response {
    let mut s = state.lock().unwrap();
    let Some(i) = position(&s.expenses, id) else {
        return detail(StatusCode::NOT_FOUND, "Expense not found");
    };
    s.expenses[i]["is_deleted"] = json!(true);
    s.expenses[i]["deleted_at"] = json!(now());
    Json(s.expenses[i].clone()).into_response()
}

async fn expense_daily_total(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let s = state.lock().unwrap();
    if s.fail_daily_total {
        return detail(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable");
    }
    let Some(day) = query.get("expense_date") else {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "expense_date required");
    };
    let total: Decimal = s
        .expenses
        .iter()
        .filter(|e| on_day(e, day))
        .map(|e| decimal(&e["amount"]))
        .sum();
    let total: f64 = total.to_string().parse().unwrap_or_default();
    Json(json!({ "date": day, "total": total })).into_response()
}

async fn expenses_by_date_range(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut s = state.lock().unwrap();
    let (Some(start), Some(end)) = (query.get("start_date"), query.get("end_date")) else {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "start_date and end_date required");
    };

    let mut days: std::collections::BTreeMap<String, (Decimal, i64)> = Default::default();
    for expense in s.expenses.iter().filter(|e| e["is_deleted"] != json!(true)) {
        let day = expense["expense_date"].as_str().unwrap_or_default()[..10].to_string();
        if day.as_str() >= start.as_str() && day.as_str() <= end.as_str() {
            let entry = days.entry(day).or_insert((Decimal::ZERO, 0));
            entry.0 += decimal(&expense["amount"]);
            entry.1 += 1;
        }
    }
    let rows: Vec<Value> = days
        .into_iter()
        .map(|(date, (total, count))| {
            let total: f64 = total.to_string().parse().unwrap_or_default();
            json!({ "date": date, "total": total, "count": count })
        })
        .collect();
    s.queries.insert("expense_range", query);
    Json(rows).into_response()
}

// Reports

async fn dashboard_report(State(state): State<Shared>) -> Response {
    let mut s = state.lock().unwrap();
    s.report_calls += 1;
    if s.fail_reports {
        return detail(StatusCode::INTERNAL_SERVER_ERROR, "Report failed");
    }
    Json(json!({
        "stats": {
            "total_inventory_value": "125000.00",
            "total_products": s.products.len(),
            "low_stock_count": 1,
            "today_sales_revenue": 7000.0,
            "today_sales_profit": 1400.5,
            "total_expense": 500.0,
            "net_profit": 900.5,
        },
        "weekly_sales": [
            { "date": "Mon", "sales": 3500.0 },
            { "date": "Tue", "sales": 0 },
        ],
    }))
    .into_response()
}

async fn period_summary(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut s = state.lock().unwrap();
    let (Some(start), Some(end)) = (query.get("start_date").cloned(), query.get("end_date").cloned())
    else {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "start_date and end_date required");
    };

    let revenue: Decimal = s.sales.iter().map(|x| decimal(&x["total_amount"])).sum();
    let quantity: i64 = s.sales.iter().map(|x| x["quantity"].as_i64().unwrap_or(0)).sum();
    s.queries.insert("period_summary", query);

    Json(json!({
        "period": { "start_date": start, "end_date": end, "days": 30 },
        "sales_summary": {
            "total_sales_count": s.sales.len(),
            "total_quantity_sold": quantity as f64,
            "total_revenue": revenue.to_string(),
            "total_cost": "0",
            "gross_profit": revenue.to_string(),
            "profit_margin": 100.0,
        },
        "expense_summary": {
            "total_expenses": 500.0,
            "total_income": 100.0,
            "net_expense": 400.0,
            "expense_count": 2,
        },
        "credit_debit": {
            "total_credit": 0.0,
            "total_cash": revenue.to_string(),
            "credit_count": 0,
            "cash_count": s.sales.len(),
            "credit_percentage": 0.0,
        },
        "overall": { "net_profit": 1234.5, "total_transactions": s.sales.len() + 2 },
        "daily_breakdown": [
            { "date": start, "revenue": 100.0, "profit": 20.0, "expenses": 5.0 },
            { "date": end, "revenue": 200.0, "profit": 40.0, "expenses": 0.0 },
        ],
    }))
    .into_response()
}
