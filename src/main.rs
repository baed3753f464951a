use clap::{Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

use rei_bot::application::errors::{BotError, StorageError};
use rei_bot::application::events::EventBus;
use rei_bot::application::messaging::{spawn_inbound, MessageDispatcher, PrefixResolver};
use rei_bot::application::permissions::RolePermissionGate;
use rei_bot::domain::entities::{CommandRegistry, PlatformEvent};
use rei_bot::domain::traits::{AuditSink, Platform, PrefixStore};
use rei_bot::handlers::HandlerCatalog;
use rei_bot::infrastructure::adapters::ConsoleAdapter;
use rei_bot::infrastructure::config::Config;
use rei_bot::infrastructure::database::{SqlitePrefixStore, StaticPrefixStore};
use rei_bot::infrastructure::plugins::PluginLoader;
use rei_bot::infrastructure::sinks::{JsonlAuditSink, LogAuditSink, ReplyingErrorSink};

#[derive(Parser)]
#[command(name = "rei-bot")]
#[command(about = "Guild moderation bot core", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot against the console adapter
    Run,
    /// Show version
    Version,
    /// Print a default config
    InitConfig,
    /// List the commands the plugin directory provides
    Commands,
    /// Store a command prefix for a guild
    SetPrefix { guild: String, prefix: String },
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Version => {
            println!("rei-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
        Commands::Commands => {
            list_commands(&load_config(&cli.config));
            Ok(())
        }
        Commands::Run => block_on(run_bot(load_config(&cli.config))),
        Commands::SetPrefix { guild, prefix } => {
            block_on(set_prefix(load_config(&cli.config), guild, prefix))
        }
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn block_on<F: std::future::Future<Output = Result<(), BotError>>>(fut: F) -> Result<(), BotError> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))?;
    rt.block_on(fut)
}

fn load_config(config_path: &str) -> Config {
    if Path::new(config_path).exists() {
        match Config::load(config_path) {
            Ok(config) => config.with_env(),
            Err(e) => {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::load_env()
            }
        }
    } else {
        Config::load_env()
    }
}

fn init_config() -> Result<(), BotError> {
    let yaml = Config::default().to_yaml()?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}

fn catalog(config: &Config) -> HandlerCatalog {
    HandlerCatalog::builtin(config.presence.statuses.clone(), config.presence.interval())
}

fn load_registry(config: &Config, loader: &PluginLoader) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    let report = loader.load_commands(&config.plugins.commands, &mut registry);
    if !report.skipped.is_empty() {
        tracing::warn!("{} command manifests were skipped", report.skipped.len());
    }
    registry
}

fn list_commands(config: &Config) {
    let registry = load_registry(config, &PluginLoader::new(catalog(config)));
    for cmd in registry.all() {
        println!(
            "{}{} {:<20} [{}] {}",
            config.bot.default_prefix,
            cmd.name,
            cmd.usage.as_deref().unwrap_or(""),
            cmd.category.as_deref().unwrap_or("general"),
            cmd.description.as_deref().unwrap_or("")
        );
    }
}

fn prefix_store(config: &Config) -> Result<Arc<dyn PrefixStore>, StorageError> {
    match &config.prefixes.database {
        Some(path) => Ok(Arc::new(SqlitePrefixStore::open(path)?)),
        None => Ok(Arc::new(StaticPrefixStore::new(config.prefixes.guilds.clone()))),
    }
}

fn audit_sink(config: &Config) -> Arc<dyn AuditSink> {
    match (config.audit.enabled, &config.audit.path) {
        (true, Some(path)) => Arc::new(JsonlAuditSink::new(path)),
        _ => Arc::new(LogAuditSink),
    }
}

async fn set_prefix(config: Config, guild: String, prefix: String) -> Result<(), BotError> {
    let Some(path) = &config.prefixes.database else {
        return Err(BotError::Internal(
            "prefixes.database is not configured".to_string(),
        ));
    };
    if prefix.trim().is_empty() {
        return Err(BotError::Internal("prefix must not be empty".to_string()));
    }

    SqlitePrefixStore::open(path)?.set_prefix(&guild, &prefix).await?;
    tracing::info!("Prefix for guild {} set to \"{}\"", guild, prefix);
    Ok(())
}

async fn run_bot(config: Config) -> Result<(), BotError> {
    tracing::info!("Starting {}", config.bot.name);

    let console = Arc::new(ConsoleAdapter::new(&config.console));
    let platform: Arc<dyn Platform> = console.clone();

    // Registry and subscriptions are complete before any message is read
    let loader = PluginLoader::new(catalog(&config));
    let registry = Arc::new(load_registry(&config, &loader));
    let bus = Arc::new(EventBus::new());
    loader.load_events(&config.plugins.events, &bus);

    let dispatcher = Arc::new(MessageDispatcher::new(
        Arc::clone(&registry),
        Arc::clone(&platform),
        PrefixResolver::new(prefix_store(&config)?, &config.bot.default_prefix),
        Arc::new(RolePermissionGate::new()),
        audit_sink(&config),
        Arc::new(ReplyingErrorSink),
    ));

    bus.emit(&platform, &PlatformEvent::Ready { user: platform.bot_user() })
        .await;

    tracing::info!(
        "Reading messages from stdin as {} in {} (Ctrl-D to stop)",
        config.console.actor.username,
        config.console.guild_name
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tasks = JoinSet::new();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                bus.emit(&platform, &PlatformEvent::Error { message: e.to_string() })
                    .await;
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let message = console.message_from_line(&line);
        spawn_inbound(&mut tasks, &bus, &dispatcher, &platform, message);

        while let Some(done) = tasks.try_join_next() {
            if let Err(e) = done {
                tracing::error!("Message task aborted: {}", e);
            }
        }
    }

    while let Some(done) = tasks.join_next().await {
        if let Err(e) = done {
            tracing::error!("Message task aborted: {}", e);
        }
    }

    tracing::info!("Console closed, {} bans recorded", console.bans().len());
    Ok(())
}
