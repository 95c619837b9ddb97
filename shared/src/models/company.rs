//! Company models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A supplier company that owns products
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    #[serde(deserialize_with = "crate::types::flexible_datetime::deserialize")]
    pub created_at: NaiveDateTime,
}

/// Sort companies by name, ignoring case
pub fn sort_companies_by_name(companies: &mut [Company]) {
    companies.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
}
