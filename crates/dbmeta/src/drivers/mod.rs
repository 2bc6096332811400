//! Database driver implementations.
//!
//! - [`firebird`]: Firebird driver over `rsfbclient`
//!
//! Each driver implements `CatalogReader` and `ScriptExecutor` from
//! [`crate::core::traits`] for its connection type.

pub mod firebird;

pub use firebird::FbDatabase;
