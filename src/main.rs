use anyhow::Result;
use clap::{Parser, Subcommand};

use spendwise::advisor::GeminiClient;
use spendwise::auth::LocalAuthProvider;
use spendwise::cli::{
    handle_ask_command, handle_auth_command, handle_budget_command, handle_category_command,
    handle_export_command, handle_profile_command, handle_recommend_command,
    handle_report_command, handle_transaction_command,
};
use spendwise::config::{paths::SpendwisePaths, settings::Settings};
use spendwise::gate::require_profile;
use spendwise::models::UserProfile;
use spendwise::storage::{ProfileRepository, Storage};

#[derive(Parser)]
#[command(
    name = "spendwise",
    version,
    about = "Terminal personal-finance tracker",
    long_about = "Spendwise records your income and expenses, tracks monthly \
                  category budgets, charts where the money goes and can ask an \
                  AI coach for advice, all from the command line."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Sign up, sign in and out
    #[command(subcommand)]
    Auth(spendwise::cli::AuthCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(spendwise::cli::TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(spendwise::cli::BudgetCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(spendwise::cli::CategoryCommands),

    /// Dashboard, analytics and month comparison
    #[command(subcommand)]
    Report(spendwise::cli::ReportCommands),

    /// Export transactions and budgets
    #[command(subcommand)]
    Export(spendwise::cli::ExportCommands),

    /// Ask the financial coach a question
    Ask {
        /// Your question
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Get budget recommendations from the coach
    Recommend {
        /// Monthly income (defaults to the income recorded this or last month)
        #[arg(long)]
        income: Option<String>,
        /// Month to recommend for (YYYY-MM, default: current)
        #[arg(short, long)]
        month: Option<String>,
        /// Create budgets from the recommendations
        #[arg(long)]
        apply: bool,
    },

    /// Profile and preferences
    #[command(subcommand)]
    Profile(spendwise::cli::ProfileCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let paths = SpendwisePaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;

    let auth = LocalAuthProvider::new(&paths);
    let profiles = ProfileRepository::open(paths.profiles_file())?;

    let Some(command) = cli.command else {
        println!("Spendwise - terminal personal-finance tracker");
        println!();
        println!("Run 'spendwise --help' for usage information.");
        println!("Run 'spendwise auth signup <email>' to get started.");
        return Ok(());
    };

    match command {
        Commands::Auth(cmd) => handle_auth_command(&auth, &profiles, cmd)?,
        Commands::Config => print_config(&paths, &settings),
        protected => {
            let profile = require_profile(&auth, &profiles)?;
            let storage = Storage::open(paths.clone(), profile.id)?;
            run_protected(protected, &storage, &settings, &auth, profile)?;
        }
    }

    Ok(())
}

/// Commands that need a signed-in user with a profile
fn run_protected(
    command: Commands,
    storage: &Storage,
    settings: &Settings,
    auth: &LocalAuthProvider,
    profile: UserProfile,
) -> Result<()> {
    match command {
        Commands::Tui => spendwise::tui::run_tui(storage, settings, profile)?,
        Commands::Transaction(cmd) => handle_transaction_command(storage, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(storage, cmd)?,
        Commands::Category(cmd) => handle_category_command(storage, cmd)?,
        Commands::Report(cmd) => handle_report_command(storage, settings.recent_transactions, cmd)?,
        Commands::Export(cmd) => handle_export_command(storage, cmd)?,
        Commands::Profile(cmd) => handle_profile_command(storage, auth, cmd)?,
        Commands::Ask { query } => {
            let client = GeminiClient::from_settings(&settings.advisor)?;
            handle_ask_command(storage, &client, settings.advisor.history_limit, &query.join(" "))?;
        }
        Commands::Recommend { income, month, apply } => {
            let client = GeminiClient::from_settings(&settings.advisor)?;
            handle_recommend_command(storage, &client, income.as_deref(), month.as_deref(), apply)?;
        }
        Commands::Audit { limit } => {
            let entries = storage
                .audit_logger()
                .read_recent_for_user(profile.id, limit)?;
            if entries.is_empty() {
                println!("No audit entries yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Commands::Auth(_) | Commands::Config => {}
    }
    Ok(())
}

fn print_config(paths: &SpendwisePaths, settings: &Settings) {
    println!("Spendwise Configuration");
    println!("=======================");
    println!("Base directory:    {}", paths.base_dir().display());
    println!("Data directory:    {}", paths.data_dir().display());
    println!("Exports directory: {}", paths.exports_dir().display());
    println!("Audit log:         {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Date format:         {}", settings.date_format);
    println!("  Recent transactions: {}", settings.recent_transactions);
    println!("  Advisor model:       {}", settings.advisor.model);
    println!("  Advisor API key env: {}", settings.advisor.api_key_env);
}
