//! Haspen CLI
//!
//! Export the resolved design tokens and manage the persisted theme mode.

mod commands;
mod config;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use commands::TokenFormat;
use config::HaspenConfig;
use haspen_theme::{FileStorage, ThemeEnvironment, ThemeMode, DEFAULT_STORAGE_KEY};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "haspen")]
#[command(version)]
#[command(about = "Haspen theme tooling: export design tokens and manage the theme mode")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved theme as CSS custom properties
    Css(CssArgs),

    /// Print the resolved theme tokens
    Tokens(TokensArgs),

    /// Create a haspen.toml with default settings
    Init {
        /// Directory to create the config in
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing haspen.toml
        #[arg(long)]
        force: bool,
    },

    /// Read or write the persisted mode selection
    Mode {
        #[command(subcommand)]
        action: ModeAction,
    },
}

/// Options shared by commands that resolve a theme
#[derive(Args)]
struct ResolveArgs {
    /// Mode to resolve (light, dark or auto); overrides the config
    #[arg(short, long)]
    mode: Option<ThemeMode>,

    /// Path to haspen.toml, or a directory containing it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mode store to read the persisted selection from
    #[arg(long)]
    store: Option<PathBuf>,

    /// Key of the persisted selection in the store
    #[arg(long, requires = "store")]
    key: Option<String>,
}

#[derive(Args)]
struct CssArgs {
    #[command(flatten)]
    resolve: ResolveArgs,

    /// Selector to declare the variables under
    #[arg(short, long)]
    selector: Option<String>,
}

#[derive(Args)]
struct TokensArgs {
    #[command(flatten)]
    resolve: ResolveArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = TokenFormat::Json)]
    format: TokenFormat,
}

#[derive(Subcommand)]
enum ModeAction {
    /// Print the stored mode
    Get(StoreArgs),

    /// Store a mode
    Set {
        /// light, dark or auto
        mode: ThemeMode,

        #[command(flatten)]
        store: StoreArgs,
    },
}

#[derive(Args)]
struct StoreArgs {
    /// Mode store file
    #[arg(long)]
    store: PathBuf,

    /// Key of the selection in the store
    #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
    key: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Css(args) => {
            let (config, env) = prepare(&args.resolve)?;
            let selector = args.selector.unwrap_or(config.output.selector);
            print!("{}", commands::css(&config.provider, env, &selector));
        }

        Commands::Tokens(args) => {
            let (config, env) = prepare(&args.resolve)?;
            println!("{}", commands::tokens(&config.provider, env, args.format)?);
        }

        Commands::Init { path, force } => {
            let written = config::write_default_config(&path, force)?;
            println!("Created {}", written.display());
        }

        Commands::Mode { action } => match action {
            ModeAction::Get(store) => match commands::mode_get(&store.store, &store.key)? {
                Some(mode) => println!("{mode}"),
                None => println!("unset"),
            },
            ModeAction::Set { mode, store } => {
                commands::mode_set(&store.store, &store.key, mode)?;
                println!("{mode}");
            }
        },
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config, apply command-line overrides and build the environment
fn prepare(args: &ResolveArgs) -> Result<(HaspenConfig, ThemeEnvironment)> {
    let mut config = HaspenConfig::discover(args.config.as_deref())?;
    if let Some(mode) = args.mode {
        config.provider.mode = mode;
    }

    let mut env = ThemeEnvironment::detect();
    if let Some(store) = &args.store {
        let key = args
            .key
            .clone()
            .unwrap_or_else(|| config.provider.storage_key.clone());
        config.provider = config.provider.with_persistence(key);
        env = env.with_storage(FileStorage::new(store));
    }

    // An explicit --mode wins over a persisted selection
    if args.mode.is_some() {
        config.provider.persist_mode = false;
    }

    Ok((config, env))
}
