//! Shared types and models for AgriManage
//!
//! This crate contains the domain shapes and the pure aggregation logic shared
//! between the API client, the command-line runner, and the browser (via WASM).

pub mod calculations;
pub mod filters;
pub mod ledger;
pub mod models;
pub mod types;
pub mod validation;

pub use calculations::*;
pub use filters::*;
pub use ledger::*;
pub use models::*;
pub use types::*;
pub use validation::*;
