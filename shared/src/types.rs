//! Common types used across the platform

use chrono::{Months, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a sale was settled
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaymentType {
    /// Unpaid; the amount is owed by the customer
    Credit,
    /// Paid in cash or otherwise settled
    Debit,
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentType::Credit => write!(f, "Credit"),
            PaymentType::Debit => write!(f, "Debit"),
        }
    }
}

/// Direction of a stock ledger entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Inbound supply (stock inward)
    In,
    /// Outbound, implied by a sale
    Out,
}

/// Whether a ledger entry takes money out or brings it in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Expense,
    Income,
}

impl EntryKind {
    /// Apply the sign convention: expenses are negative, income is positive.
    /// The sign of `magnitude` itself is ignored.
    pub fn signed(&self, magnitude: Decimal) -> Decimal {
        match self {
            EntryKind::Expense => -magnitude.abs(),
            EntryKind::Income => magnitude.abs(),
        }
    }

    /// Recover the kind from a persisted signed amount
    pub fn from_amount(amount: Decimal) -> Self {
        if amount < Decimal::ZERO {
            EntryKind::Expense
        } else {
            EntryKind::Income
        }
    }
}

/// Date range for queries (both bounds inclusive)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Reporting window picked on the reports screen
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case", tag = "period")]
pub enum PeriodSelection {
    #[default]
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl PeriodSelection {
    /// Resolve the selection to a concrete window ending `today`.
    ///
    /// A custom window with either bound unset falls back to the last month.
    /// Month arithmetic clamps to the last day of shorter months.
    pub fn date_range(&self, today: NaiveDate) -> DateRange {
        let months = match self {
            PeriodSelection::OneMonth => 1,
            PeriodSelection::ThreeMonths => 3,
            PeriodSelection::SixMonths => 6,
            PeriodSelection::OneYear => 12,
            PeriodSelection::Custom {
                start: Some(start),
                end: Some(end),
            } => {
                return DateRange {
                    start: *start,
                    end: *end,
                }
            }
            PeriodSelection::Custom { .. } => 1,
        };

        DateRange {
            start: today.checked_sub_months(Months::new(months)).unwrap_or(today),
            end: today,
        }
    }
}

/// Calendar day of a timestamp. Day filters compare these, never times.
pub fn calendar_day(timestamp: &NaiveDateTime) -> NaiveDate {
    timestamp.date()
}

/// Lenient timestamp parsing for backend payloads.
///
/// Accepts RFC 3339 with an offset (normalized to UTC), naive ISO 8601 with
/// `T` or space separator, and bare dates (midnight).
pub mod flexible_datetime {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer};

    pub fn parse(value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(dt.naive_utc());
        }
        if let Ok(dt) = value.parse::<NaiveDateTime>() {
            return Some(dt);
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
            return Some(dt);
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub mod option {
        use super::*;

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw))),
                None => Ok(None),
            }
        }
    }
}
