//! Core abstractions shared by the runner, the exporter and the drivers.
//!
//! - [`schema`]: Domain, table, column and procedure metadata types
//! - [`traits`]: Catalog reader and script executor seams

pub mod schema;
pub mod traits;

pub use schema::{
    ColumnDescriptor, DomainDescriptor, FieldSpec, ProcedureDescriptor, TableDescriptor,
};
pub use traits::{CatalogReader, ScriptExecutor};
