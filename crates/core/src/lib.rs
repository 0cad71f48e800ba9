//! Core accounting logic for Rxledger.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and report calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Account types and journal entry validation
//! - `classify` - Account classification (by type and by code range)
//! - `reports` - Financial report assembly from aggregated ledger figures

pub mod classify;
pub mod ledger;
pub mod reports;
