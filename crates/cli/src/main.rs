mod commands;
mod logging;

use clap::{Parser, Subcommand};
use commands::request::RequestArgs;
use logging::LoggingConfig;
use scaffold_core::ScaffoldConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scaffold")]
#[command(about = "Generate authorization-aware request classes for CRUD actions")]
#[command(version)]
struct Cli {
    /// Configuration file (YAML); SCAFFOLD_* variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Project root to generate into
    #[arg(long, global = true)]
    base_path: Option<PathBuf>,

    /// Log every per-action decision
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate request classes for a model
    Request {
        /// Model class, fully qualified (App\Models\Post) or bare (Post)
        model: String,

        /// Comma separated actions (default: index,show,create,store,edit,update,destroy)
        #[arg(long)]
        only: Option<String>,

        /// Generate API requests
        #[arg(long)]
        api: bool,

        /// Folder name for the classes (default: the model's table)
        #[arg(long)]
        name: Option<String>,

        /// Model manifest
        #[arg(long, default_value = "models.yaml")]
        manifest: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config,
}

fn load_config(cli: &Cli) -> anyhow::Result<ScaffoldConfig> {
    let config = match &cli.config {
        Some(path) => ScaffoldConfig::load(path)?,
        None => ScaffoldConfig::from_env()?,
    };

    Ok(match &cli.base_path {
        Some(base_path) => config.with_base_path(base_path.clone()),
        None => config,
    })
}

fn logging_config(cli: &Cli) -> LoggingConfig {
    let config = if cli.verbose {
        LoggingConfig::verbose()
    } else if cli.quiet {
        LoggingConfig::quiet()
    } else {
        LoggingConfig::default()
    };
    config.with_json(cli.log_json)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&logging_config(&cli))?;

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Request {
            model,
            only,
            api,
            name,
            manifest,
            json,
        } => {
            let args = RequestArgs {
                model,
                only,
                api,
                name,
                manifest,
                json,
            };
            commands::request::run(&args, config)?;
        }
        Commands::Config => {
            commands::config::run(&config);
        }
    }

    Ok(())
}
