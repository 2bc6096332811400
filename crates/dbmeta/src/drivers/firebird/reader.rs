//! Firebird catalog reader implementation.
//!
//! Queries `RDB$FIELDS`, `RDB$RELATIONS`, `RDB$RELATION_FIELDS` and
//! `RDB$PROCEDURES`. Names are `CHAR` columns in the catalog, so every name is
//! trimmed server-side.

use rsfbclient::Queryable;
use rsfbclient_core::FirebirdClient;
use tracing::debug;

use super::FbDatabase;
use crate::core::schema::{ColumnDescriptor, DomainDescriptor, FieldSpec, ProcedureDescriptor};
use crate::core::traits::CatalogReader;
use crate::error::Result;

const DOMAINS_SQL: &str = r#"
    SELECT
        TRIM(f.RDB$FIELD_NAME),
        f.RDB$FIELD_TYPE,
        f.RDB$FIELD_SUB_TYPE,
        f.RDB$FIELD_SCALE,
        f.RDB$CHARACTER_LENGTH,
        f.RDB$NULL_FLAG
    FROM RDB$FIELDS f
    WHERE COALESCE(f.RDB$SYSTEM_FLAG, 0) = 0
      AND NOT (f.RDB$FIELD_NAME STARTING WITH 'RDB$')
    ORDER BY f.RDB$FIELD_NAME
"#;

const TABLES_SQL: &str = r#"
    SELECT TRIM(r.RDB$RELATION_NAME)
    FROM RDB$RELATIONS r
    WHERE COALESCE(r.RDB$SYSTEM_FLAG, 0) = 0
      AND r.RDB$VIEW_BLR IS NULL
    ORDER BY r.RDB$RELATION_NAME
"#;

const COLUMNS_SQL: &str = r#"
    SELECT
        TRIM(rf.RDB$FIELD_NAME),
        f.RDB$FIELD_TYPE,
        f.RDB$FIELD_SUB_TYPE,
        f.RDB$FIELD_SCALE,
        f.RDB$CHARACTER_LENGTH,
        rf.RDB$NULL_FLAG,
        rf.RDB$DEFAULT_SOURCE,
        f.RDB$DEFAULT_SOURCE
    FROM RDB$RELATION_FIELDS rf
    JOIN RDB$FIELDS f ON f.RDB$FIELD_NAME = rf.RDB$FIELD_SOURCE
    WHERE rf.RDB$RELATION_NAME = ?
    ORDER BY rf.RDB$FIELD_POSITION
"#;

const PROCEDURES_SQL: &str = r#"
    SELECT
        TRIM(p.RDB$PROCEDURE_NAME),
        p.RDB$PROCEDURE_SOURCE
    FROM RDB$PROCEDURES p
    WHERE COALESCE(p.RDB$SYSTEM_FLAG, 0) = 0
    ORDER BY p.RDB$PROCEDURE_NAME
"#;

type DomainRow = (
    String,
    i16,
    Option<i16>,
    Option<i16>,
    Option<i32>,
    Option<i16>,
);

type ColumnRow = (
    String,
    i16,
    Option<i16>,
    Option<i16>,
    Option<i32>,
    Option<i16>,
    Option<String>,
    Option<String>,
);

fn field_spec(
    field_type: i16,
    sub_type: Option<i16>,
    scale: Option<i16>,
    character_length: Option<i32>,
) -> FieldSpec {
    FieldSpec {
        field_type,
        sub_type: sub_type.unwrap_or(0),
        scale: scale.unwrap_or(0),
        character_length: character_length.unwrap_or(0),
    }
}

fn is_not_null(null_flag: Option<i16>) -> bool {
    null_flag == Some(1)
}

impl<C: FirebirdClient> CatalogReader for FbDatabase<C> {
    fn list_domains(&mut self) -> Result<Vec<DomainDescriptor>> {
        let rows: Vec<DomainRow> = self.conn.query(DOMAINS_SQL, ())?;

        let domains: Vec<DomainDescriptor> = rows
            .into_iter()
            .map(
                |(name, field_type, sub_type, scale, char_len, null_flag)| DomainDescriptor {
                    name,
                    field: field_spec(field_type, sub_type, scale, char_len),
                    not_null: is_not_null(null_flag),
                },
            )
            .collect();

        debug!("Loaded {} domains", domains.len());
        Ok(domains)
    }

    fn list_tables(&mut self) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = self.conn.query(TABLES_SQL, ())?;
        let tables: Vec<String> = rows.into_iter().map(|(name,)| name).collect();

        debug!("Loaded {} tables", tables.len());
        Ok(tables)
    }

    fn load_columns(&mut self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let rows: Vec<ColumnRow> = self.conn.query(COLUMNS_SQL, (table,))?;

        let columns: Vec<ColumnDescriptor> = rows
            .into_iter()
            .map(
                |(
                    name,
                    field_type,
                    sub_type,
                    scale,
                    char_len,
                    null_flag,
                    column_default,
                    domain_default,
                )| ColumnDescriptor {
                    name,
                    field: field_spec(field_type, sub_type, scale, char_len),
                    not_null: is_not_null(null_flag),
                    default_source: ColumnDescriptor::resolve_default(
                        column_default,
                        domain_default,
                    ),
                },
            )
            .collect();

        debug!("Loaded {} columns for {}", columns.len(), table);
        Ok(columns)
    }

    fn list_procedures(&mut self) -> Result<Vec<ProcedureDescriptor>> {
        let rows: Vec<(String, Option<String>)> = self.conn.query(PROCEDURES_SQL, ())?;

        let procedures: Vec<ProcedureDescriptor> = rows
            .into_iter()
            .map(|(name, source)| ProcedureDescriptor {
                name,
                source_text: source.unwrap_or_default(),
            })
            .collect();

        debug!("Loaded {} procedures", procedures.len());
        Ok(procedures)
    }
}
