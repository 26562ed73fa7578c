use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use splitledger::cli::{
    handle_balances_command, handle_expense_command, handle_export_command,
    handle_group_command, handle_member_command, handle_settle_command, OutputFormat,
};
use splitledger::config::{paths::LedgerPaths, settings::Settings};
use splitledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "splitledger",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based shared expense tracker",
    long_about = "splitledger keeps track of expenses shared within a group, \
                  shows who owes whom, and suggests the payments that would \
                  settle everyone up."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Member management commands
    #[command(subcommand)]
    Member(splitledger::cli::MemberCommands),

    /// Group management commands
    #[command(subcommand)]
    Group(splitledger::cli::GroupCommands),

    /// Expense commands
    #[command(subcommand)]
    Expense(splitledger::cli::ExpenseCommands),

    /// Settlement commands
    #[command(subcommand)]
    Settle(splitledger::cli::SettleCommands),

    /// Show balances and suggested settlements for a group
    Balances {
        /// Group name or ID
        group: String,
    },

    /// Export a group's balances and suggested settlements
    Export {
        /// Group name or ID
        group: String,
        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    // Diagnostics go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "splitledger=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Member(cmd)) => handle_member_command(&storage, cmd)?,
        Some(Commands::Group(cmd)) => handle_group_command(&storage, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Settle(cmd)) => handle_settle_command(&storage, &settings, cmd)?,
        Some(Commands::Balances { group }) => {
            handle_balances_command(&storage, &settings, &group)?
        }
        Some(Commands::Export {
            group,
            format,
            output,
        }) => handle_export_command(&storage, &settings, &group, format, output)?,
        Some(Commands::History { limit }) => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("splitledger is already initialized at: {}", paths.base_dir().display());
                return Ok(());
            }
            println!("Initializing splitledger at: {}", paths.base_dir().display());
            storage.save_all()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  splitledger member add <name>");
            println!("  splitledger group create <name>");
            println!("  splitledger group add-member <group> <member>...");
        }
        Some(Commands::Config) => {
            println!("splitledger Configuration");
            println!("=========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", storage.audit().path().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Export format:   {:?}", settings.default_export_format);
        }
        None => {
            println!("splitledger - shared expenses and settle-up suggestions");
            println!();
            println!("Run 'splitledger --help' for usage information.");
        }
    }

    Ok(())
}
