//! Schema exporter: one DDL script per domain, table and procedure.
//!
//! File names carry a numeric prefix so that the exported directory, fed back
//! to the script runner, loads domains before tables before procedures:
//!
//! - `1_domain_<name>.sql`
//! - `2_table_<name>.sql`
//! - `3_procedure_<name>.sql`
//!
//! Existing files are overwritten. Any catalog or write error aborts the
//! export.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::schema::TableDescriptor;
use crate::core::traits::CatalogReader;
use crate::error::{MetaError, Result};

/// Kind of exported schema object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Domain,
    Table,
    Procedure,
}

impl ObjectKind {
    /// Load-order prefix used in the file name.
    pub fn order_prefix(self) -> u8 {
        match self {
            ObjectKind::Domain => 1,
            ObjectKind::Table => 2,
            ObjectKind::Procedure => 3,
        }
    }

    /// Lower-case kind label used in the file name.
    pub fn label(self) -> &'static str {
        match self {
            ObjectKind::Domain => "domain",
            ObjectKind::Table => "table",
            ObjectKind::Procedure => "procedure",
        }
    }

    /// `<prefix>_<kind>_<name>.sql`
    pub fn file_name(self, object_name: &str) -> String {
        format!("{}_{}_{}.sql", self.order_prefix(), self.label(), object_name)
    }
}

/// Files written by one export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Domain scripts.
    pub domains: Vec<PathBuf>,

    /// Table scripts.
    pub tables: Vec<PathBuf>,

    /// Procedure scripts.
    pub procedures: Vec<PathBuf>,
}

impl ExportSummary {
    /// Total number of files written.
    pub fn total(&self) -> usize {
        self.domains.len() + self.tables.len() + self.procedures.len()
    }
}

/// Exports schema objects read from a catalog into an output directory.
pub struct SchemaExporter<'a, R: CatalogReader + ?Sized> {
    reader: &'a mut R,
    output_dir: PathBuf,
}

impl<'a, R: CatalogReader + ?Sized> SchemaExporter<'a, R> {
    /// Create an exporter writing into `output_dir`, which must exist.
    pub fn new(reader: &'a mut R, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            output_dir: output_dir.into(),
        }
    }

    /// Run the domain, table and procedure passes in that order.
    pub fn export_all(&mut self) -> Result<ExportSummary> {
        let domains = self.export_domains()?;
        let tables = self.export_tables()?;
        let procedures = self.export_procedures()?;

        let summary = ExportSummary {
            domains,
            tables,
            procedures,
        };
        info!(
            "Exported {} scripts to {} ({} domains, {} tables, {} procedures)",
            summary.total(),
            self.output_dir.display(),
            summary.domains.len(),
            summary.tables.len(),
            summary.procedures.len()
        );
        Ok(summary)
    }

    /// Write `CREATE DOMAIN` scripts.
    pub fn export_domains(&mut self) -> Result<Vec<PathBuf>> {
        let domains = self.reader.list_domains()?;
        let mut written = Vec::with_capacity(domains.len());
        for domain in &domains {
            written.push(self.write_script(ObjectKind::Domain, &domain.name, &domain.to_ddl())?);
        }
        Ok(written)
    }

    /// Write `CREATE TABLE` scripts, columns in declared order.
    pub fn export_tables(&mut self) -> Result<Vec<PathBuf>> {
        let names = self.reader.list_tables()?;
        let mut written = Vec::with_capacity(names.len());
        for name in names {
            let columns = self.reader.load_columns(&name)?;
            let table = TableDescriptor { name, columns };
            written.push(self.write_script(ObjectKind::Table, &table.name, &table.to_ddl())?);
        }
        Ok(written)
    }

    /// Write stored procedure definitions. Procedures without source are skipped.
    pub fn export_procedures(&mut self) -> Result<Vec<PathBuf>> {
        let procedures = self.reader.list_procedures()?;
        let mut written = Vec::with_capacity(procedures.len());
        for procedure in &procedures {
            if procedure.source_text.trim().is_empty() {
                debug!("Skipping procedure {} without source", procedure.name);
                continue;
            }
            written.push(self.write_script(
                ObjectKind::Procedure,
                &procedure.name,
                &procedure.to_ddl(),
            )?);
        }
        Ok(written)
    }

    fn write_script(&self, kind: ObjectKind, name: &str, ddl: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(kind.file_name(name));
        write_ddl(&path, ddl)
            .map_err(|e| MetaError::export(format!("{} {}", kind.label(), name), e.to_string()))?;
        debug!("Wrote {}", path.display());
        Ok(path)
    }
}

/// Write one statement followed by a single `\n`.
fn write_ddl(path: &Path, ddl: &str) -> std::io::Result<()> {
    let mut content = String::with_capacity(ddl.len() + 1);
    content.push_str(ddl);
    content.push('\n');
    std::fs::write(path, content)
}
