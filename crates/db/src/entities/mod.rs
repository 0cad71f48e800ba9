//! `SeaORM` entity definitions.

pub mod accounts;
pub mod expenses;
pub mod journal_entries;
pub mod journal_lines;
pub mod sales;
pub mod sea_orm_active_enums;
