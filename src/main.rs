use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;

use lingo_bot::application::errors::BotError;
use lingo_bot::application::messaging::{MessageDispatcher, MessageParser};
use lingo_bot::application::services::{CommandService, GrammarService, LanguageFilter, TranslationService};
use lingo_bot::domain::traits::Bot;
use lingo_bot::infrastructure::adapters::TelegramAdapter;
use lingo_bot::infrastructure::config::Config;
use lingo_bot::infrastructure::grammar::LanguageToolClient;
use lingo_bot::infrastructure::language::WhatlangDetector;
use lingo_bot::infrastructure::translation::GoogleTranslator;

#[derive(Parser)]
#[command(name = "lingo-bot")]
#[command(about = "Telegram bot for grammar fixes and English translation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config and BOT_TOKEN)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
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

    match cli.command {
        Commands::Run => {
            if let Err(e) = run_bot(&cli.config, cli.token) {
                tracing::error!("{}", e);
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("lingo-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

fn load_config(config_path: &str, token_override: Option<String>) -> Result<Config, BotError> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let mut config = if std::path::Path::new(config_path).exists() {
        Config::load(config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        })
    } else {
        Config::default()
    };

    config.apply_env()?;
    if let Some(token) = token_override {
        config.telegram.token = Some(token);
    }
    config.require_token()?;

    Ok(config)
}

fn run_bot(config_path: &str, token_override: Option<String>) -> Result<(), BotError> {
    let config = load_config(config_path, token_override)?;

    tracing::info!("Starting {}", config.bot.name);
    tracing::debug!(port = config.server.port, "Port reserved for webhook mode, using long polling");

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))?;
    rt.block_on(run_telegram_bot(config))
}

/// Backend clients are built once and shared read-only by every command
fn build_commands(config: &Config) -> CommandService {
    let checker = LanguageToolClient::with_base_url(
        &config.grammar.api_url,
        &config.grammar.language,
        Duration::from_secs(config.grammar.timeout_secs),
    );
    let translator = GoogleTranslator::with_base_url(
        &config.translation.api_url,
        &config.translation.source,
        &config.translation.target,
        Duration::from_secs(config.translation.timeout_secs),
    );
    let filter = LanguageFilter::new(Arc::new(WhatlangDetector::new()));

    CommandService::new(
        GrammarService::new(Arc::new(checker)),
        TranslationService::new(Arc::new(translator), filter),
        &config.translation.target_name,
    )
}

async fn run_telegram_bot(config: Config) -> Result<(), BotError> {
    let token = config.require_token()?;
    let mut bot = TelegramAdapter::with_api_base(token, &config.telegram.api_base);

    // Fetch bot info
    bot.fetch_bot_info().await?;

    // Register bot commands with Telegram
    if let Err(e) = bot.register_commands().await {
        tracing::warn!("Failed to register commands: {}", e);
    }

    let info = bot.bot_info();
    tracing::info!("Bot started: @{}", info.username);

    let commands = build_commands(&config);
    tracing::info!(
        "Grammar: {} ({}), translation: {} → {}",
        config.grammar.api_url,
        config.grammar.language,
        config.translation.source,
        commands.translation_target()
    );

    let bot = Arc::new(bot);
    let dispatcher = Arc::new(MessageDispatcher::new(
        Arc::clone(&bot),
        MessageParser::new(info.username),
        commands,
    ));

    let mut offset: i64 = 0;
    let timeout_seconds = config.telegram.poll_timeout_secs;

    tracing::info!("Starting message loop...");

    loop {
        let result = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                return Ok(());
            }
            result = bot.get_updates(offset, timeout_seconds) => result,
        };

        match result {
            Ok(updates) => {
                if !updates.is_empty() {
                    tracing::debug!("Received {} updates", updates.len());
                }
                for update in &updates {
                    let Some(msg) = &update.message else {
                        continue;
                    };
                    let message = msg.to_domain();
                    let dispatcher = Arc::clone(&dispatcher);
                    tokio::spawn(async move {
                        dispatcher.dispatch(message).await;
                    });
                }

                // Update offset
                offset = TelegramAdapter::get_next_offset(&updates, offset);
            }
            Err(e) => {
                tracing::error!("Failed to get updates: {}", e);
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
        }
    }
}

fn init_config() {
    match serde_yaml::to_string(&Config::default()) {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
        }
        Err(e) => eprintln!("Failed to render config: {}", e),
    }
}
