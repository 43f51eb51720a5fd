mod config;
mod import_cmd;
mod io;
mod table_cmds;
#[cfg(test)]
mod test_util;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use tabplan_core::Period;

use config::TabplanConfig;
use import_cmd::{ImportArgs, ImportStatus};

#[derive(Parser)]
#[command(name = "tabplan", about = "Import pasted tables into lesson plans")]
struct Cli {
    /// Print compact JSON (overrides TABPLAN_PRETTY and the config file)
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default tabplan config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Show how pasted text is tokenized and how split headers are repaired
    Parse {
        /// Input text file (omit or `-` for stdin)
        file: Option<PathBuf>,
    },
    /// Show the semantic tag assigned to each header
    Classify {
        /// Input text file (omit or `-` for stdin)
        file: Option<PathBuf>,
    },
    /// Merge pasted text into a plan document and print {matched, data}
    Import {
        /// Plan period: daily, weekly, monthly or yearly
        #[arg(long)]
        period: Option<Period>,
        /// Current plan document as JSON (defaults to an empty plan)
        #[arg(long)]
        plan: Option<PathBuf>,
        /// Output file path (defaults to stdout)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Input text file (omit or `-` for stdin)
        file: Option<PathBuf>,
    },
    /// Print every line as a positional row for manual column selection
    Preview {
        /// Input text file (omit or `-` for stdin)
        file: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Exit status when an import only produced blank records.
const EXIT_RAW_PREVIEW: i32 = 2;

/// Execute the `tabplan init` command: write config file.
fn cmd_init(force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile::default();
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  import.default_period = {}", cfg.import.default_period);
    println!("  output.pretty = {}", cfg.output.pretty);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => {
            cmd_init(force)?;
        }
        Commands::Parse { file } => {
            let resolved = TabplanConfig::resolve(None, cli.compact)?;
            table_cmds::run_parse(file.as_deref(), resolved.pretty)?;
        }
        Commands::Classify { file } => {
            let resolved = TabplanConfig::resolve(None, cli.compact)?;
            table_cmds::run_classify(file.as_deref(), resolved.pretty)?;
        }
        Commands::Import {
            period,
            plan,
            output,
            file,
        } => {
            let resolved = TabplanConfig::resolve(period, cli.compact)?;
            let status = import_cmd::run_import(&ImportArgs {
                input: file.as_deref(),
                plan: plan.as_deref(),
                output: output.as_deref(),
                period: resolved.period,
                pretty: resolved.pretty,
            })?;
            if status == ImportStatus::RawPreview {
                std::process::exit(EXIT_RAW_PREVIEW);
            }
        }
        Commands::Preview { file } => {
            let resolved = TabplanConfig::resolve(None, cli.compact)?;
            table_cmds::run_preview(file.as_deref(), resolved.pretty)?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "tabplan", &mut std::io::stdout());
        }
    }

    Ok(())
}
