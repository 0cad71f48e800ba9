//! Financial report assembly.
//!
//! Pure computations that turn aggregated ledger figures into the five
//! report shapes:
//! - Trial Balance
//! - Profit & Loss
//! - Balance Sheet
//! - Cash Flow
//! - Aging Analysis

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::ReportService;
pub use types::*;
