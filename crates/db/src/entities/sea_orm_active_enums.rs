//! `SeaORM` active enums backed by Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account type enum (`account_type` in Postgres).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability account.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity account.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Income account.
    #[sea_orm(string_value = "income")]
    Income,
    /// Expense account.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl AccountType {
    /// Converts to the core domain account type.
    #[must_use]
    pub const fn to_core(&self) -> rxledger_core::ledger::AccountType {
        match self {
            Self::Asset => rxledger_core::ledger::AccountType::Asset,
            Self::Liability => rxledger_core::ledger::AccountType::Liability,
            Self::Equity => rxledger_core::ledger::AccountType::Equity,
            Self::Income => rxledger_core::ledger::AccountType::Income,
            Self::Expense => rxledger_core::ledger::AccountType::Expense,
        }
    }

    /// Converts from the core domain account type.
    #[must_use]
    pub const fn from_core(account_type: rxledger_core::ledger::AccountType) -> Self {
        match account_type {
            rxledger_core::ledger::AccountType::Asset => Self::Asset,
            rxledger_core::ledger::AccountType::Liability => Self::Liability,
            rxledger_core::ledger::AccountType::Equity => Self::Equity,
            rxledger_core::ledger::AccountType::Income => Self::Income,
            rxledger_core::ledger::AccountType::Expense => Self::Expense,
        }
    }
}

/// Journal entry status enum (`entry_status` in Postgres).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_status")]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is a draft and excluded from reports.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Entry is posted to the ledger.
    #[sea_orm(string_value = "posted")]
    Posted,
}

impl EntryStatus {
    /// Lowercase wire name for the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Posted => "posted",
        }
    }
}
