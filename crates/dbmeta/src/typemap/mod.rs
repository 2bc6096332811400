//! Type mapping from Firebird catalog field types to DDL type names.
//!
//! The codes are the values stored in `RDB$FIELDS.RDB$FIELD_TYPE`.

/// Map a Firebird field type code to its DDL type.
///
/// `sub_type` is accepted for BLOB sub-type distinction but not used yet.
/// Codes without a mapping render as `UNKNOWN_TYPE_<code>` so an export keeps
/// running and the gap shows up in the generated script.
pub fn map_field_type(field_type: i16, _sub_type: i16, scale: i16, length: i32) -> String {
    match field_type {
        7 => "SMALLINT".to_string(),
        8 => "INTEGER".to_string(),
        10 => "FLOAT".to_string(),
        12 => "DATE".to_string(),
        13 => "TIME".to_string(),
        14 => format!("CHAR({})", length),

        // INT64 storage backs both BIGINT and scaled NUMERIC/DECIMAL
        16 => {
            if scale < 0 {
                format!("NUMERIC(18, {})", i32::from(scale).abs())
            } else {
                "BIGINT".to_string()
            }
        }

        23 => "BOOLEAN".to_string(),
        27 => "DOUBLE PRECISION".to_string(),
        35 => "TIMESTAMP".to_string(),
        37 => format!("VARCHAR({})", length),
        261 => "BLOB".to_string(),

        other => format!("UNKNOWN_TYPE_{}", other),
    }
}
