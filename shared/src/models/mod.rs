//! Domain models for AgriManage

mod company;
mod expense;
mod product;
mod report;
mod sale;
mod stock;

pub use company::*;
pub use expense::*;
pub use product::*;
pub use report::*;
pub use sale::*;
pub use stock::*;
