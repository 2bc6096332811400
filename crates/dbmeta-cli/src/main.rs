//! dbmeta CLI - build, export and update Firebird database schemas.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use dbmeta::error::EXIT_USAGE_ERROR;
use dbmeta::{Config, Dispatcher, ExportSummary, MetaError, ScriptReport};
use std::ffi::OsString;
use std::fmt::Write as _;
use std::process::ExitCode;
use tracing::{info, Level};

/// Environment variable naming an optional YAML configuration file.
const CONFIG_ENV: &str = "DBMETA_CONFIG";

/// Environment variable for log verbosity: debug, info, warn, error.
const LOG_LEVEL_ENV: &str = "DBMETA_LOG";

/// Environment variable for log format: text or json.
const LOG_FORMAT_ENV: &str = "DBMETA_LOG_FORMAT";

#[derive(Parser)]
#[command(name = "dbmeta")]
#[command(about = "Build, export and update Firebird database schemas")]
#[command(version)]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new database and run the scripts directory against it
    BuildDb {
        /// Directory that will hold the new database file
        #[arg(long)]
        db_dir: String,

        /// Directory of .sql scripts, searched recursively
        #[arg(long)]
        scripts_dir: String,
    },

    /// Export domains, tables and procedures as one .sql file per object
    ExportScripts {
        /// Connection string (firebird://... URL or Key=Value; pairs)
        #[arg(long)]
        connection_string: String,

        /// Directory to write the scripts to (created if absent)
        #[arg(long)]
        output_dir: String,
    },

    /// Run the scripts directory against an existing database
    UpdateDb {
        /// Connection string (firebird://... URL or Key=Value; pairs)
        #[arg(long)]
        connection_string: String,

        /// Directory of .sql scripts, searched recursively
        #[arg(long)]
        scripts_dir: String,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(normalize_command(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) => return usage_exit(e),
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

/// Command names are matched case-insensitively (`BUILD-DB` runs `build-db`).
fn normalize_command<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();
    if let Some(name) = args.get(1).and_then(|a| a.to_str()).map(str::to_lowercase) {
        let known = Cli::command()
            .get_subcommands()
            .any(|sub| sub.get_name() == name);
        if known {
            args[1] = OsString::from(name);
        }
    }
    args
}

/// Help and version exit 0; every other parse failure is a usage error.
fn usage_exit(err: clap::Error) -> ExitCode {
    let _ = err.print();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::from(EXIT_USAGE_ERROR),
    }
}

fn run(cli: Cli) -> Result<(), MetaError> {
    setup_logging(
        &std::env::var(LOG_LEVEL_ENV).unwrap_or_default(),
        &std::env::var(LOG_FORMAT_ENV).unwrap_or_default(),
    )
    .map_err(MetaError::Config)?;

    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let config = Config::load(&path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => Config::default(),
    };

    let dispatcher = Dispatcher::new(config);

    match cli.command {
        Commands::BuildDb {
            db_dir,
            scripts_dir,
        } => {
            let report = dispatcher.build_database(&db_dir, &scripts_dir)?;
            print!("{}", render_report(&report, "build-db"));
            println!("Database built successfully.");
        }

        Commands::ExportScripts {
            connection_string,
            output_dir,
        } => {
            let summary = dispatcher.export_scripts(&connection_string, &output_dir)?;
            print!("{}", render_export_summary(&summary, &output_dir));
            println!("Scripts exported successfully.");
        }

        Commands::UpdateDb {
            connection_string,
            scripts_dir,
        } => {
            let report = dispatcher.update_database(&connection_string, &scripts_dir)?;
            print!("{}", render_report(&report, "update-db"));
            println!("Database updated successfully.");
        }
    }

    Ok(())
}

fn render_report(report: &ScriptReport, label: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "=== Script execution report ({}) ===", label);
    let _ = writeln!(out, "  Total files: {}", report.total());
    let _ = writeln!(out, "  Succeeded:   {}", report.succeeded());
    let _ = writeln!(out, "  Failed:      {}", report.failed());
    let _ = writeln!(out);

    if !report.is_success() {
        let _ = writeln!(out, "  Failed files:");
        for (path, message) in report.failures() {
            let _ = writeln!(out, "    - {}", path.display());
            let _ = writeln!(out, "      Error: {}", message);
        }
        let _ = writeln!(out);
    }
    out
}

fn render_export_summary(summary: &ExportSummary, output_dir: &str) -> String {
    format!(
        "Exported {} domains, {} tables, {} procedures to {}\n",
        summary.domains.len(),
        summary.tables.len(),
        summary.procedures.len(),
        output_dir
    )
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so the report on stdout stays clean
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if format.eq_ignore_ascii_case("json") {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };

    result.map_err(|e| format!("failed to initialise logging: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbmeta::ScriptExecutionResult;
    use std::path::PathBuf;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_command_names_ignore_case() {
        assert_eq!(
            normalize_command(args(&["dbmeta", "BUILD-DB", "--db-dir", "X"])),
            args(&["dbmeta", "build-db", "--db-dir", "X"])
        );
        assert_eq!(
            normalize_command(args(&["dbmeta", "Update-Db"])),
            args(&["dbmeta", "update-db"])
        );
    }

    #[test]
    fn test_unknown_and_flag_arguments_are_untouched() {
        assert_eq!(
            normalize_command(args(&["dbmeta", "DROP-DB"])),
            args(&["dbmeta", "DROP-DB"])
        );
        assert_eq!(
            normalize_command(args(&["dbmeta", "--HELP"])),
            args(&["dbmeta", "--HELP"])
        );
        assert_eq!(normalize_command(args(&["dbmeta"])), args(&["dbmeta"]));
    }

    #[test]
    fn test_report_lists_counts_and_failures() {
        let report = ScriptReport::new(vec![
            ScriptExecutionResult::failed("scripts/a.sql", "Token unknown"),
            ScriptExecutionResult::succeeded("scripts/b.sql"),
            ScriptExecutionResult::succeeded("scripts/c.sql"),
        ]);

        let text = render_report(&report, "update-db");

        assert!(text.contains("=== Script execution report (update-db) ==="));
        assert!(text.contains("  Total files: 3\n"));
        assert!(text.contains("  Succeeded:   2\n"));
        assert!(text.contains("  Failed:      1\n"));
        let failed_path = PathBuf::from("scripts/a.sql");
        assert!(text.contains(&format!(
            "    - {}\n      Error: Token unknown\n",
            failed_path.display()
        )));
        assert!(!text.contains("b.sql"));
    }

    #[test]
    fn test_report_without_failures_has_no_failure_section() {
        let report = ScriptReport::new(vec![ScriptExecutionResult::succeeded("a.sql")]);
        let text = render_report(&report, "build-db");
        assert!(text.contains("  Failed:      0\n"));
        assert!(!text.contains("Failed files"));
    }

    #[test]
    fn test_export_summary_counts_each_kind() {
        let summary = ExportSummary {
            domains: vec![PathBuf::from("out/1_domain_D.sql")],
            tables: vec![
                PathBuf::from("out/2_table_A.sql"),
                PathBuf::from("out/2_table_B.sql"),
            ],
            procedures: Vec::new(),
        };
        assert_eq!(
            render_export_summary(&summary, "out"),
            "Exported 1 domains, 2 tables, 0 procedures to out\n"
        );
    }
}
