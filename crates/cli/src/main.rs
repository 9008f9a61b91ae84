// netrecon CLI - fetch both source tables, then reconcile them.
//
// Each step is standalone: a table fetched earlier stays on disk and is
// reusable even when a later step fails.

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use netrecon_audit::{AuditClient, AuditError};
use netrecon_billing::{BillingClient, BillingError};
use netrecon_config::Settings;

use exit_codes::{
    EXIT_FETCH_AUTH, EXIT_FETCH_PARSE, EXIT_FETCH_UPSTREAM, EXIT_FETCH_VALIDATION, EXIT_IO,
    EXIT_RECON_INPUT, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "netrecon")]
#[command(about = "Reconcile provisioned router assignments against monitored ones")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Alternate settings file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a settings file template to fill in with endpoints and credentials
    Init,

    /// Fetch a source table and write it to an xlsx file
    Fetch {
        #[command(subcommand)]
        source: FetchCommands,
    },

    /// Join two fetched tables and write the reconciliation report
    #[command(after_help = "\
Examples:
  netrecon reconcile inventory.xlsx speed-audit.xlsx
  netrecon reconcile inventory.xlsx speed-audit.xlsx --output report.xlsx
  netrecon reconcile inventory.xlsx speed-audit.xlsx --json")]
    Reconcile {
        /// Inventory table fetched from the billing system
        inventory: PathBuf,

        /// Speed-audit table fetched from the monitoring system
        audit: PathBuf,

        /// Output xlsx file
        #[arg(long, short = 'o', default_value = "reconciliation.xlsx")]
        output: PathBuf,

        /// Print the full report as JSON to stdout instead of writing xlsx
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum FetchCommands {
    /// Inventory export from the billing system (source A)
    #[command(after_help = "\
Examples:
  netrecon fetch inventory
  netrecon fetch inventory --output inventory.xlsx --page-size 500")]
    Inventory {
        /// Output xlsx file
        #[arg(long, short = 'o', default_value = "inventory.xlsx")]
        output: PathBuf,

        /// Batch size for paged retrieval (overrides settings)
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Speed-audit snapshot from the monitoring system (source B)
    #[command(after_help = "\
Examples:
  netrecon fetch audit --date 2026.08.25
  netrecon fetch audit --date 2026.08.25 --output speed-audit.xlsx")]
    Audit {
        /// Output xlsx file
        #[arg(long, short = 'o', default_value = "speed-audit.xlsx")]
        output: PathBuf,

        /// Snapshot date, YYYY.MM.DD (overrides settings)
        #[arg(long)]
        date: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => fail(err),
    }
}

// `init` must run before any settings load: the whole point is that the
// file does not exist yet.
fn run_command(cli: Cli) -> Result<(), CliError> {
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Init => cmd_init(config),
        Commands::Fetch { source } => {
            let settings = load_settings(config)?;
            match source {
                FetchCommands::Inventory { output, page_size } => {
                    cmd_fetch_inventory(&settings, &output, page_size)
                }
                FetchCommands::Audit { output, date } => cmd_fetch_audit(&settings, &output, date),
            }
        }
        Commands::Reconcile {
            inventory,
            audit,
            output,
            json,
        } => {
            let settings = load_settings(config)?;
            cmd_reconcile(&settings, &inventory, &audit, &output, json)
        }
    }
}

fn fail(CliError { code, message, hint }: CliError) -> ExitCode {
    if !message.is_empty() {
        eprintln!("error: {}", message);
    }
    if let Some(hint) = hint {
        eprintln!("hint:  {}", hint);
    }
    ExitCode::from(code)
}

fn load_settings(path: Option<&Path>) -> Result<Settings, CliError> {
    match path {
        Some(path) => netrecon_config::load_from(path).map_err(CliError::io),
        None => netrecon_config::load().map_err(CliError::io),
    }
}

// ── Commands ────────────────────────────────────────────────────────

fn cmd_init(config: Option<&Path>) -> Result<(), CliError> {
    let path = match config {
        Some(path) => path.to_path_buf(),
        None => netrecon_config::settings_path()
            .ok_or_else(|| CliError::io("Could not determine config directory"))?,
    };

    if path.exists() {
        return Err(CliError {
            code: EXIT_USAGE,
            message: format!("settings file already exists at {}", path.display()),
            hint: Some("edit it in place, or pass --config for an alternate file".into()),
        });
    }

    netrecon_config::save_to(&path, &Settings::default()).map_err(CliError::io)?;
    println!("settings template written to {}", path.display());
    Ok(())
}

fn cmd_fetch_inventory(
    settings: &Settings,
    output: &Path,
    page_size: Option<usize>,
) -> Result<(), CliError> {
    let billing = &settings.billing;
    if billing.endpoint.is_empty() {
        return Err(CliError {
            code: EXIT_USAGE,
            message: "billing endpoint is not configured".into(),
            hint: Some("set billing.endpoint in settings.json or pass --config".into()),
        });
    }

    let page_size = page_size.unwrap_or(billing.page_size);
    let client = BillingClient::new(&billing.endpoint, &billing.username, &billing.password);

    eprintln!("fetching inventory in pages of {}...", page_size);
    let records = client.fetch_all(page_size)?;
    eprintln!("  {} records", records.len());

    netrecon_io::write_inventory(output, &records).map_err(CliError::io)?;
    println!("inventory written to {}", output.display());
    Ok(())
}

fn cmd_fetch_audit(
    settings: &Settings,
    output: &Path,
    date: Option<String>,
) -> Result<(), CliError> {
    let audit = &settings.audit;
    if audit.base_url.is_empty() {
        return Err(CliError {
            code: EXIT_USAGE,
            message: "audit base URL is not configured".into(),
            hint: Some("set audit.base_url in settings.json or pass --config".into()),
        });
    }

    let date = date.or_else(|| settings.date.clone()).ok_or(CliError {
        code: EXIT_USAGE,
        message: "no snapshot date given".into(),
        hint: Some("pass --date YYYY.MM.DD or set date in settings.json".into()),
    })?;

    let client = AuditClient::new(&audit.base_url);
    let token = client.sign_in(&audit.email, &audit.password)?;

    eprintln!("fetching speed-audit snapshot for {}...", date);
    let records = client.fetch_snapshot(&token, &date)?;
    eprintln!("  {} records", records.len());

    netrecon_io::write_audit(output, &records).map_err(CliError::io)?;
    println!("speed-audit snapshot written to {}", output.display());
    Ok(())
}

fn cmd_reconcile(
    settings: &Settings,
    inventory_path: &Path,
    audit_path: &Path,
    output: &Path,
    json: bool,
) -> Result<(), CliError> {
    let inventory = netrecon_io::read_inventory(inventory_path).map_err(CliError::recon_input)?;
    let audit = netrecon_io::read_audit(audit_path).map_err(CliError::recon_input)?;
    let directory = settings.directory();

    let report = netrecon_recon::run(&inventory, &audit, &directory);

    if json {
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::io(format!("Failed to serialize report: {}", e)))?;
        println!("{}", out);
        return Ok(());
    }

    let s = &report.summary;
    eprintln!(
        "  {} inventory rows, {} audit rows",
        s.inventory_records, s.audit_records,
    );
    println!(
        "{} reconciled: {} correct, {} incorrect ({} unknown router)",
        s.reconciled, s.correct, s.incorrect, s.unknown_router,
    );

    netrecon_io::write_report(output, &report.rows).map_err(CliError::io)?;
    println!("report written to {}", output.display());
    Ok(())
}

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn io(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_IO,
            message: msg.into(),
            hint: None,
        }
    }

    fn recon_input(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_RECON_INPUT,
            message: msg.into(),
            hint: Some("fetch the table first: netrecon fetch inventory / fetch audit".into()),
        }
    }
}

impl From<BillingError> for CliError {
    fn from(err: BillingError) -> Self {
        let code = match &err {
            BillingError::Network(_) | BillingError::Http(_, _) => EXIT_FETCH_UPSTREAM,
            BillingError::Parse(_) => EXIT_FETCH_PARSE,
        };
        Self {
            code,
            message: format!("inventory fetch failed: {}", err),
            hint: None,
        }
    }
}

impl From<AuditError> for CliError {
    fn from(err: AuditError) -> Self {
        let (code, hint) = match &err {
            AuditError::Auth(_, _) => (
                EXIT_FETCH_AUTH,
                Some("check audit.email / audit.password in settings.json".to_string()),
            ),
            AuditError::Network(_) | AuditError::Http(_, _) => (EXIT_FETCH_UPSTREAM, None),
            AuditError::Parse(_) | AuditError::Schema { .. } => (EXIT_FETCH_PARSE, None),
            AuditError::InvalidDate(_) => (
                EXIT_FETCH_VALIDATION,
                Some("dates use the YYYY.MM.DD form, e.g. 2026.08.25".to_string()),
            ),
        };
        Self {
            code,
            message: format!("audit fetch failed: {}", err),
            hint,
        }
    }
}
