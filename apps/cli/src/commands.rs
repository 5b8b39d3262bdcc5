//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use juicescout_core::pipeline::{MigrationConfig, MigrationReport, ProgressReporter};
use juicescout_shared::{
    AppConfig, DestinationConfig, init_config, load_config, resolve_api_key,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// JuiceScout — migrate HelpJuice docs over to Help Scout.
#[derive(Parser)]
#[command(
    name = "juicescout",
    version,
    about = "Migrate a HelpJuice knowledge base export into Help Scout Docs.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the migration.
    Migrate(MigrateArgs),

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Flags for `juicescout migrate`.
#[derive(Args)]
pub(crate) struct MigrateArgs {
    /// Path of the HelpJuice categories.csv file.
    #[arg(short, long, env = "CATEGORIES_PATH")]
    pub categories: PathBuf,

    /// Path of the HelpJuice questions.csv file.
    #[arg(short, long, env = "QUESTIONS_PATH")]
    pub questions: PathBuf,

    /// Path of the HelpJuice answers.csv file.
    #[arg(short, long, env = "ANSWERS_PATH")]
    pub answers: PathBuf,

    /// Name of the HelpJuice account being migrated.
    #[arg(short = 'j', long)]
    pub source_name: Option<String>,

    /// API key for Help Scout Docs.
    #[arg(short = 's', long, env = "HELPSCOUT_API", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Collection to migrate into (defaults to the first collection).
    #[arg(long)]
    pub collection: Option<String>,

    /// Override the Docs API base URL.
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Load `.env` from the working directory. Only a missing file is ignored.
pub(crate) fn load_dotenv() -> Result<()> {
    dotenv_outcome(dotenvy::dotenv())
}

fn dotenv_outcome(loaded: std::result::Result<PathBuf, dotenvy::Error>) -> Result<()> {
    match loaded {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(eyre!("failed to load .env: {e}")),
    }
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "juicescout=info",
        1 => "juicescout=debug",
        _ => "juicescout=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Migrate(args) => cmd_migrate(args).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

/// Merge flags over the config file into a runtime [`MigrationConfig`].
fn build_migration_config(args: MigrateArgs, mut config: AppConfig) -> Result<MigrationConfig> {
    let source_name = args
        .source_name
        .or(config.source.name.take())
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| eyre!("missing --source-name: name of the HelpJuice account is required"))?;

    if let Some(base_url) = args.base_url {
        config.destination.base_url = base_url;
    }

    let api_key = resolve_api_key(&config, args.api_key.as_deref())?;
    let destination = DestinationConfig::new(&config.destination, api_key)?;

    Ok(MigrationConfig {
        categories_path: args.categories,
        questions_path: args.questions,
        answers_path: args.answers,
        source_name,
        collection_id: args.collection.or(config.destination.collection_id),
        destination,
    })
}

async fn cmd_migrate(args: MigrateArgs) -> Result<()> {
    let config = build_migration_config(args, load_config()?)?;

    info!(
        source = %config.source_name,
        categories = %config.categories_path.display(),
        questions = %config.questions_path.display(),
        answers = %config.answers_path.display(),
        "starting migration"
    );

    let reporter = CliProgress::new();
    let result = juicescout_core::pipeline::run_migration(&config, &reporter).await;
    if result.is_err() {
        reporter.spinner.abandon();
    }
    let report = result?;

    println!();
    println!("  Migration from {} complete!", report.source_name);
    println!("  Collection: {}", report.collection_id);
    println!(
        "  Categories: {} created, {} rejected ({} parsed)",
        report.categories_created, report.categories_failed, report.categories
    );
    println!(
        "  Mappings:   {} ({} without a source category)",
        report.mappings, report.orphan_mappings
    );
    println!(
        "  Articles:   {} created, {} rejected ({} assembled)",
        report.articles_created, report.articles_failed, report.articles
    );
    println!("  Started:    {}", report.started_at.to_rfc3339());
    println!("  Time:       {:.1}s", report.elapsed.as_secs_f64());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn item(&self, kind: &str, name: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Creating {kind} [{current}/{total}] {name}"));
    }

    fn done(&self, _report: &MigrationReport) {
        self.spinner.finish_and_clear();
    }
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(source_name: Option<&str>) -> MigrateArgs {
        MigrateArgs {
            categories: "categories.csv".into(),
            questions: "questions.csv".into(),
            answers: "answers.csv".into(),
            source_name: source_name.map(String::from),
            api_key: Some("key".into()),
            collection: None,
            base_url: None,
        }
    }

    #[test]
    fn cli_parses_migrate_flags() {
        let cli = Cli::try_parse_from([
            "juicescout",
            "migrate",
            "-c",
            "c.csv",
            "-q",
            "q.csv",
            "-a",
            "a.csv",
            "-j",
            "acme",
            "-s",
            "secret",
            "--collection",
            "col-9",
        ])
        .expect("parse");

        match cli.command {
            Command::Migrate(args) => {
                assert_eq!(args.categories, PathBuf::from("c.csv"));
                assert_eq!(args.source_name.as_deref(), Some("acme"));
                assert_eq!(args.collection.as_deref(), Some("col-9"));
            }
            Command::Config { .. } => panic!("expected migrate"),
        }
    }

    #[test]
    fn missing_dotenv_is_ignored() {
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "no .env");
        assert!(dotenv_outcome(Err(dotenvy::Error::Io(missing))).is_ok());
        assert!(dotenv_outcome(Ok(PathBuf::from(".env"))).is_ok());
    }

    #[test]
    fn unparsable_dotenv_is_an_error() {
        let err = dotenv_outcome(Err(dotenvy::Error::LineParse("BAD LINE".into(), 3))).unwrap_err();
        assert!(err.to_string().contains("failed to load .env"));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(dotenv_outcome(Err(dotenvy::Error::Io(denied))).is_err());
    }

    #[test]
    fn source_name_is_required() {
        let err = build_migration_config(args(None), AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--source-name"));
    }

    #[test]
    fn source_name_falls_back_to_config() {
        let mut app = AppConfig::default();
        app.source.name = Some("from-file".into());
        let config = build_migration_config(args(None), app).unwrap();
        assert_eq!(config.source_name, "from-file");
    }

    #[test]
    fn flags_override_config_file() {
        let mut app = AppConfig::default();
        app.destination.collection_id = Some("file-col".into());

        let mut flags = args(Some("acme"));
        flags.base_url = Some("http://localhost:8080".into());
        flags.collection = Some("flag-col".into());

        let config = build_migration_config(flags, app).unwrap();
        assert_eq!(config.collection_id.as_deref(), Some("flag-col"));
        assert_eq!(config.destination.base_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.destination.api_key, "key");
    }
}
