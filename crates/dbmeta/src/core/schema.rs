//! Schema metadata types for domains, tables, columns and procedures.
//!
//! These are read-only snapshots of the Firebird system tables taken at query
//! time. Each type knows how to render itself as a DDL statement.

use crate::typemap::map_field_type;

/// Type attributes shared by domains and table columns.
///
/// Mirrors the `RDB$FIELDS` columns the type mapper needs. Catalog `NULL`s
/// are read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSpec {
    /// `RDB$FIELD_TYPE` code.
    pub field_type: i16,

    /// `RDB$FIELD_SUB_TYPE`.
    pub sub_type: i16,

    /// `RDB$FIELD_SCALE` (negative for scaled numerics).
    pub scale: i16,

    /// `RDB$CHARACTER_LENGTH` for CHAR/VARCHAR.
    pub character_length: i32,
}

impl FieldSpec {
    /// Render the DDL type name.
    pub fn type_sql(&self) -> String {
        map_field_type(
            self.field_type,
            self.sub_type,
            self.scale,
            self.character_length,
        )
    }
}

/// Domain metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainDescriptor {
    /// Domain name.
    pub name: String,

    /// Type attributes.
    pub field: FieldSpec,

    /// Whether the domain is declared NOT NULL.
    pub not_null: bool,
}

impl DomainDescriptor {
    /// Render `CREATE DOMAIN <name> AS <type>[ NOT NULL]`.
    pub fn to_ddl(&self) -> String {
        let mut ddl = format!("CREATE DOMAIN {} AS {}", self.name, self.field.type_sql());
        if self.not_null {
            ddl.push_str(" NOT NULL");
        }
        ddl
    }
}

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,

    /// Type attributes of the column's underlying field.
    pub field: FieldSpec,

    /// Whether the column is declared NOT NULL.
    pub not_null: bool,

    /// Resolved default clause (e.g. `DEFAULT 0`), already trimmed.
    pub default_source: Option<String>,
}

impl ColumnDescriptor {
    /// Pick the effective default clause.
    ///
    /// The column's own default wins; the domain default applies only when the
    /// column has none. Blank sources count as absent.
    pub fn resolve_default(
        column_default: Option<String>,
        domain_default: Option<String>,
    ) -> Option<String> {
        let column_default = column_default.map(|s| s.trim().to_string());
        let picked = match column_default {
            Some(s) => Some(s),
            None => domain_default.map(|s| s.trim().to_string()),
        };
        picked.filter(|s| !s.is_empty())
    }

    /// Render `<name> <type>[ NOT NULL][ <default>]`.
    pub fn to_ddl(&self) -> String {
        let mut def = format!("{} {}", self.name, self.field.type_sql());
        if self.not_null {
            def.push_str(" NOT NULL");
        }
        if let Some(ref default) = self.default_source {
            def.push(' ');
            def.push_str(default);
        }
        def
    }
}

/// Table metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    /// Table name.
    pub name: String,

    /// Columns in declared position order.
    pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    /// Render the `CREATE TABLE` statement, one column per indented line.
    pub fn to_ddl(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(|c| c.to_ddl()).collect();
        format!(
            "CREATE TABLE {} (\n    {}\n)",
            self.name,
            columns.join(",\n    ")
        )
    }
}

/// Stored procedure metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureDescriptor {
    /// Procedure name.
    pub name: String,

    /// `RDB$PROCEDURE_SOURCE`, header and body included.
    pub source_text: String,
}

impl ProcedureDescriptor {
    /// The stored definition, trimmed.
    pub fn to_ddl(&self) -> String {
        self.source_text.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integer() -> FieldSpec {
        FieldSpec {
            field_type: 8,
            ..Default::default()
        }
    }

    fn varchar(len: i32) -> FieldSpec {
        FieldSpec {
            field_type: 37,
            character_length: len,
            ..Default::default()
        }
    }

    #[test]
    fn test_domain_ddl() {
        let domain = DomainDescriptor {
            name: "D_POSITIVE_AMOUNT".to_string(),
            field: integer(),
            not_null: true,
        };
        assert_eq!(
            domain.to_ddl(),
            "CREATE DOMAIN D_POSITIVE_AMOUNT AS INTEGER NOT NULL"
        );

        let nullable = DomainDescriptor {
            not_null: false,
            ..domain
        };
        assert_eq!(nullable.to_ddl(), "CREATE DOMAIN D_POSITIVE_AMOUNT AS INTEGER");
    }

    #[test]
    fn test_table_ddl() {
        let table = TableDescriptor {
            name: "T".to_string(),
            columns: vec![
                ColumnDescriptor {
                    name: "ID".to_string(),
                    field: integer(),
                    not_null: true,
                    default_source: None,
                },
                ColumnDescriptor {
                    name: "NAME".to_string(),
                    field: varchar(50),
                    not_null: false,
                    default_source: None,
                },
            ],
        };
        assert_eq!(
            table.to_ddl(),
            "CREATE TABLE T (\n    ID INTEGER NOT NULL,\n    NAME VARCHAR(50)\n)"
        );
    }

    #[test]
    fn test_column_with_default() {
        let col = ColumnDescriptor {
            name: "QTY".to_string(),
            field: integer(),
            not_null: true,
            default_source: Some("DEFAULT 0".to_string()),
        };
        assert_eq!(col.to_ddl(), "QTY INTEGER NOT NULL DEFAULT 0");
    }

    #[test]
    fn test_resolve_default_prefers_column() {
        assert_eq!(
            ColumnDescriptor::resolve_default(
                Some(" DEFAULT 1 ".to_string()),
                Some("DEFAULT 2".to_string())
            ),
            Some("DEFAULT 1".to_string())
        );
    }

    #[test]
    fn test_resolve_default_falls_back_to_domain() {
        assert_eq!(
            ColumnDescriptor::resolve_default(None, Some("DEFAULT 'N'\n".to_string())),
            Some("DEFAULT 'N'".to_string())
        );
        assert_eq!(ColumnDescriptor::resolve_default(None, None), None);
    }

    #[test]
    fn test_resolve_default_blank_column_default_is_dropped() {
        // A present-but-blank column default still shadows the domain default.
        assert_eq!(
            ColumnDescriptor::resolve_default(
                Some("   ".to_string()),
                Some("DEFAULT 2".to_string())
            ),
            None
        );
    }

    #[test]
    fn test_procedure_ddl_is_trimmed() {
        let proc = ProcedureDescriptor {
            name: "P".to_string(),
            source_text: "\n  CREATE PROCEDURE P AS BEGIN END  \n".to_string(),
        };
        assert_eq!(proc.to_ddl(), "CREATE PROCEDURE P AS BEGIN END");
    }
}
