//! Core traits for the database collaborator.
//!
//! - [`CatalogReader`]: Reads schema metadata from the system tables
//! - [`ScriptExecutor`]: Runs SQL batches inside explicit transactions
//!
//! The Firebird implementation lives in `drivers::firebird`. Tests drive the
//! runner and exporter through in-memory implementations.

use crate::error::Result;

use super::schema::{ColumnDescriptor, DomainDescriptor, ProcedureDescriptor};

/// Read schema metadata from a database catalog.
///
/// Every method returns a fresh snapshot ordered deterministically, so two
/// exports of an unchanged database produce identical output.
pub trait CatalogReader {
    /// User domains (non-system, not `RDB$`-prefixed), ordered by name.
    fn list_domains(&mut self) -> Result<Vec<DomainDescriptor>>;

    /// User table names (non-system, non-view), ordered by name.
    fn list_tables(&mut self) -> Result<Vec<String>>;

    /// Columns of one table, ordered by declared field position.
    fn load_columns(&mut self, table: &str) -> Result<Vec<ColumnDescriptor>>;

    /// Non-system procedures, ordered by name.
    ///
    /// Procedures without stored source are included with an empty
    /// `source_text`; the exporter decides what to skip.
    fn list_procedures(&mut self) -> Result<Vec<ProcedureDescriptor>>;
}

/// Execute SQL batches under explicit transaction control.
///
/// Only one transaction is open at a time. Callers pair every successful
/// [`begin_transaction`](Self::begin_transaction) with exactly one
/// [`commit`](Self::commit) or [`rollback`](Self::rollback).
pub trait ScriptExecutor {
    /// Start a new transaction.
    fn begin_transaction(&mut self) -> Result<()>;

    /// Execute the whole text as a single statement batch in the open transaction.
    fn execute_batch(&mut self, sql: &str) -> Result<()>;

    /// Commit the open transaction.
    fn commit(&mut self) -> Result<()>;

    /// Roll back the open transaction.
    fn rollback(&mut self) -> Result<()>;
}
