use anyhow::Result;
use clap::{Parser, Subcommand};

use balance_digest::cli::{handle_preview_command, handle_run_command, handle_snapshot_command};
use balance_digest::config::{DigestPaths, Settings};
use balance_digest::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "balance-digest",
    version,
    about = "Report budget category balances and their change since the last run",
    long_about = "balance-digest reads the current month's subcategory balances from a \
                  budget export, compares them with the balances saved by the previous \
                  run, and queues a report for people who don't use the budgeting tool."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the report, queue it for delivery, and save balances (default)
    Run,

    /// Print the report without sending it or saving balances
    Preview {
        /// Print the HTML document instead of plain text
        #[arg(long)]
        html: bool,
    },

    /// Show the balances saved by the last run
    Snapshot,

    /// Write a default configuration file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = DigestPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => handle_run_command(&paths, &settings)?,
        Commands::Preview { html } => handle_preview_command(&paths, &settings, html)?,
        Commands::Snapshot => handle_snapshot_command(&paths)?,
        Commands::Init => {
            if paths.is_initialized() {
                println!(
                    "Configuration already exists at {}",
                    paths.settings_file().display()
                );
            } else {
                settings.save(&paths)?;
                println!("Wrote {}", paths.settings_file().display());
                println!("Set provider_export, from_address and recipients before running.");
            }
        }
        Commands::Config => {
            println!("balance-digest Configuration");
            println!("============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Snapshot file:  {}", paths.snapshot_file().display());
            println!("Outbox:         {}", paths.outbox_dir().display());
            println!();
            println!("Settings:");
            println!("  Budget:           {}", settings.budget_name);
            match &settings.provider_export {
                Some(path) => println!("  Provider export:  {}", path.display()),
                None => println!("  Provider export:  (not set)"),
            }
            println!("  From:             {}", settings.from_address);
            println!("  Recipients:       {}", settings.recipients.join(", "));
            println!("  Persist policy:   {:?}", settings.persist_policy);
            println!("  Duplicate policy: {:?}", settings.duplicate_policy);
        }
    }

    Ok(())
}
