//! Firebird driver.
//!
//! [`FbDatabase`] wraps one `rsfbclient` connection (pure-Rust wire protocol)
//! and implements both core seams:
//!
//! - `CatalogReader` in `reader.rs`: system-table queries for the exporter
//! - `ScriptExecutor` in `executor.rs`: explicit transactions for the runner

mod executor;
mod reader;

use rsfbclient::{Charset, Connection, Dialect};
use rsfbclient_core::FirebirdClient;
use tracing::info;

use crate::connection::ConnectionSpec;
use crate::error::{MetaError, Result};

/// An open Firebird connection.
///
/// The connection is closed when the value is dropped.
pub struct FbDatabase<C: FirebirdClient> {
    conn: Connection<C>,
}

impl<C: FirebirdClient> FbDatabase<C> {
    /// Wrap an already open connection.
    pub fn from_connection(conn: Connection<C>) -> Self {
        Self { conn }
    }
}

/// Open a connection to an existing database.
pub fn connect(spec: &ConnectionSpec) -> Result<FbDatabase<impl FirebirdClient>> {
    let mut builder = rsfbclient::builder_pure_rust();
    builder
        .host(spec.host.as_str())
        .port(spec.port)
        .db_name(spec.database.as_str())
        .user(spec.user.as_str())
        .pass(spec.password.as_str())
        .dialect(dialect_for(spec.dialect)?);
    if let Some(charset) = charset_for(spec)? {
        builder.charset(charset);
    }

    let conn = builder.connect()?;

    info!("Connected to Firebird database: {}", spec.display_target());
    Ok(FbDatabase::from_connection(conn))
}

/// Create a new, empty database and return a connection to it.
pub fn create_database(
    spec: &ConnectionSpec,
    page_size: u32,
) -> Result<FbDatabase<impl FirebirdClient>> {
    let mut builder = rsfbclient::builder_pure_rust();
    builder
        .host(spec.host.as_str())
        .port(spec.port)
        .db_name(spec.database.as_str())
        .user(spec.user.as_str())
        .pass(spec.password.as_str())
        .dialect(dialect_for(spec.dialect)?)
        .page_size(page_size);
    if let Some(charset) = charset_for(spec)? {
        builder.charset(charset);
    }

    let conn = builder.create_database()?;

    info!(
        "Created Firebird database: {} (page size {})",
        spec.display_target(),
        page_size
    );
    Ok(FbDatabase::from_connection(conn))
}

fn charset_for(spec: &ConnectionSpec) -> Result<Option<Charset>> {
    spec.charset
        .as_deref()
        .map(|name| {
            name.parse::<Charset>()
                .map_err(|_| MetaError::Config(format!("unsupported charset '{}'", name)))
        })
        .transpose()
}

fn dialect_for(dialect: u16) -> Result<Dialect> {
    match dialect {
        1 => Ok(Dialect::D1),
        3 => Ok(Dialect::D3),
        other => Err(MetaError::Config(format!(
            "unsupported SQL dialect {}",
            other
        ))),
    }
}
