//! Configuration management

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::errors::ConfigError;
use crate::domain::entities::Permission;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub plugins: PluginConfig,
    #[serde(default)]
    pub prefixes: PrefixConfig,
    pub audit: AuditConfig,
    #[serde(default)]
    pub presence: PresenceConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    /// Prefix used by guilds that never set their own
    pub default_prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PluginConfig {
    pub commands: PathBuf,
    pub events: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PrefixConfig {
    /// SQLite file holding per-guild prefixes
    #[serde(default)]
    pub database: Option<PathBuf>,
    /// Static overrides, used when no database is configured
    #[serde(default)]
    pub guilds: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AuditConfig {
    pub enabled: bool,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PresenceConfig {
    #[serde(default)]
    pub statuses: Vec<String>,
    #[serde(default = "default_presence_interval")]
    pub interval_seconds: u64,
}

fn default_presence_interval() -> u64 {
    30
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            statuses: Vec::new(),
            interval_seconds: default_presence_interval(),
        }
    }
}

impl PresenceConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }
}

/// A user known to the console adapter
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default = "default_true")]
    pub moderatable: bool,
    #[serde(default)]
    pub bot: bool,
}

fn default_true() -> bool {
    true
}

impl ConsoleUser {
    fn new(id: &str, username: &str) -> Self {
        Self {
            id: id.to_string(),
            username: username.to_string(),
            permissions: Vec::new(),
            moderatable: true,
            bot: false,
        }
    }
}

/// In-memory guild used when running against the console
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub guild_id: String,
    pub guild_name: String,
    pub channel_id: String,
    pub bot: ConsoleUser,
    /// The user typing into the console
    pub actor: ConsoleUser,
    /// Current guild members besides the actor
    #[serde(default)]
    pub members: Vec<ConsoleUser>,
    /// Known users that are not members of the guild
    #[serde(default)]
    pub users: Vec<ConsoleUser>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        let mut actor = ConsoleUser::new("100000000000000001", "misato");
        actor.permissions = vec![Permission::Administrator];

        let mut bot = ConsoleUser::new("100000000000000000", "rei-bot");
        bot.bot = true;

        let mut commander = ConsoleUser::new("100000000000000003", "gendo");
        commander.moderatable = false;

        Self {
            guild_id: "900000000000000000".to_string(),
            guild_name: "NERV HQ".to_string(),
            channel_id: "900000000000000001".to_string(),
            bot,
            actor,
            members: vec![ConsoleUser::new("100000000000000002", "shinji"), commander],
            users: vec![ConsoleUser::new("123456789", "kaworu")],
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "rei-bot".to_string(),
                default_prefix: "!".to_string(),
            },
            plugins: PluginConfig {
                commands: PathBuf::from("./plugins/commands"),
                events: PathBuf::from("./plugins/events"),
            },
            prefixes: PrefixConfig::default(),
            audit: AuditConfig {
                enabled: true,
                path: Some(PathBuf::from("logs/audit.jsonl")),
            },
            presence: PresenceConfig {
                statuses: vec![
                    "Watching the server".to_string(),
                    "Type !help".to_string(),
                ],
                interval_seconds: default_presence_interval(),
            },
            console: ConsoleConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.default_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "bot.default-prefix must not be empty".to_string(),
            ));
        }
        if let Some((guild, _)) = self.prefixes.guilds.iter().find(|(_, p)| p.trim().is_empty()) {
            return Err(ConfigError::InvalidValue(format!(
                "prefixes.guilds.{} must not be empty",
                guild
            )));
        }
        Ok(())
    }

    /// Apply `BOT_PREFIX` and `BOT_PLUGINS_DIR` overrides
    pub fn with_env(mut self) -> Self {
        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            if !prefix.trim().is_empty() {
                self.bot.default_prefix = prefix;
            }
        }

        if let Ok(dir) = std::env::var("BOT_PLUGINS_DIR") {
            let dir = PathBuf::from(dir);
            self.plugins.commands = dir.join("commands");
            self.plugins.events = dir.join("events");
        }

        self
    }

    pub fn load_env() -> Self {
        Config::default().with_env()
    }
}
