//! Script runner: ordered execution of a directory of `.sql` files.
//!
//! Every non-blank script runs in its own transaction. A failing script is
//! rolled back and recorded, and the run moves on to the next file, so one bad
//! script never blocks the rest of the directory. There is no transaction
//! spanning the whole run.
//!
//! Execution order is the case-insensitive order of the full file paths.
//! Scripts that depend on each other must be named so that this order is the
//! order they need (e.g. `1_domain_*.sql` before `2_table_*.sql`).

mod report;

pub use report::{ScriptExecutionResult, ScriptReport};

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::core::traits::ScriptExecutor;
use crate::error::{MetaError, Result};

/// UTF-8 byte-order mark some editors put at the start of a file.
const BOM: char = '\u{feff}';

/// Find every `*.sql` file below `directory`, in execution order.
pub fn discover_scripts(directory: &Path) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(MetaError::DirectoryNotFound(directory.to_path_buf()));
    }

    let mut scripts = Vec::new();
    for entry in WalkDir::new(directory).follow_links(true) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && is_sql_file(entry.path()) {
            scripts.push(entry.into_path());
        }
    }

    // Case-insensitive first; the exact path breaks ties so the order is total.
    scripts.sort_by_cached_key(|p| (case_insensitive_key(p), p.clone()));
    Ok(scripts)
}

/// Uppercase one character at a time, keeping characters whose uppercase
/// form is longer than one character (`ß` stays `ß`).
fn case_insensitive_key(path: &Path) -> String {
    path.to_string_lossy()
        .chars()
        .map(|c| {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => c,
            }
        })
        .collect()
}

fn is_sql_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("sql"))
        .unwrap_or(false)
}

/// Run every script below `directory` against `executor`.
///
/// Fails only if the directory is missing or cannot be listed. Script
/// failures are reported in the returned [`ScriptReport`].
pub fn execute_scripts_in_directory<E>(executor: &mut E, directory: &Path) -> Result<ScriptReport>
where
    E: ScriptExecutor + ?Sized,
{
    let scripts = discover_scripts(directory)?;
    info!(
        "Executing {} scripts from {}",
        scripts.len(),
        directory.display()
    );

    let mut results = Vec::with_capacity(scripts.len());
    for path in scripts {
        results.push(execute_script_file(executor, path));
    }

    let report = ScriptReport::new(results);
    info!(
        "Script run finished: {} total, {} succeeded, {} failed",
        report.total(),
        report.succeeded(),
        report.failed()
    );
    Ok(report)
}

fn execute_script_file<E>(executor: &mut E, path: PathBuf) -> ScriptExecutionResult
where
    E: ScriptExecutor + ?Sized,
{
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Cannot read script {}: {}", path.display(), e);
            return ScriptExecutionResult::failed(path, e.to_string());
        }
    };

    let sql = content.strip_prefix(BOM).unwrap_or(&content);
    if sql.trim().is_empty() {
        debug!("Skipping blank script {}", path.display());
        return ScriptExecutionResult::succeeded(path);
    }

    debug!("Executing script {}", path.display());
    match run_in_transaction(executor, sql) {
        Ok(()) => ScriptExecutionResult::succeeded(path),
        Err(e) => {
            let message = error_text(&e);
            warn!("Script {} failed: {}", path.display(), message);
            ScriptExecutionResult::failed(path, message)
        }
    }
}

/// Execute `sql` in a fresh transaction: commit on success, roll back otherwise.
fn run_in_transaction<E>(executor: &mut E, sql: &str) -> Result<()>
where
    E: ScriptExecutor + ?Sized,
{
    let mut tx = TransactionGuard::begin(executor)?;
    match tx.execute(sql) {
        Ok(()) => tx.commit(),
        Err(e) => {
            if let Err(rollback_err) = tx.rollback() {
                warn!("Rollback failed: {}", error_text(&rollback_err));
            }
            Err(e)
        }
    }
}

/// Driver errors are reported with the server message only.
fn error_text(err: &MetaError) -> String {
    match err {
        MetaError::Database(e) => e.to_string(),
        other => other.to_string(),
    }
}

/// An open transaction that rolls back when dropped unfinished.
struct TransactionGuard<'a, E: ScriptExecutor + ?Sized> {
    executor: &'a mut E,
    finished: bool,
}

impl<'a, E: ScriptExecutor + ?Sized> TransactionGuard<'a, E> {
    fn begin(executor: &'a mut E) -> Result<Self> {
        executor.begin_transaction()?;
        Ok(Self {
            executor,
            finished: false,
        })
    }

    fn execute(&mut self, sql: &str) -> Result<()> {
        self.executor.execute_batch(sql)
    }

    fn commit(mut self) -> Result<()> {
        // A failed commit leaves `finished` unset, so drop rolls back.
        self.executor.commit()?;
        self.finished = true;
        Ok(())
    }

    fn rollback(mut self) -> Result<()> {
        self.finished = true;
        self.executor.rollback()
    }
}

impl<E: ScriptExecutor + ?Sized> Drop for TransactionGuard<'_, E> {
    fn drop(&mut self) {
        if !self.finished {
            if let Err(e) = self.executor.rollback() {
                warn!("Rollback of unfinished transaction failed: {}", error_text(&e));
            }
        }
    }
}
