//! Double-entry ledger domain logic.
//!
//! This module implements the core ledger functionality:
//! - Account type classification and normal-balance rules
//! - Journal line inputs and entry totals
//! - Balanced-entry validation

pub mod types;
pub mod validation;

pub use types::{AccountType, EntryTotals, JournalLineInput};
pub use validation::{JournalValidationError, validate_lines};
