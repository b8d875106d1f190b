use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::engine::session::{BotTimings, TicTacToeSessionSettings};
use common::games::tictactoe::{DEFAULT_BOT_NAME, DEFAULT_HUMAN_NAME};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const CONFIG_FILE_NAME: &str = "tictactoe_config.yaml";
const MAX_DELAY_MS: u32 = 10_000;

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    override_path: Option<PathBuf>,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(override_path.unwrap_or_else(get_config_path))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub players: PlayersConfig,
    pub bot: BotConfig,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.players.validate()?;
        self.bot.validate()?;
        Ok(())
    }
}

impl Config {
    pub fn to_session_settings(&self) -> TicTacToeSessionSettings {
        TicTacToeSessionSettings {
            human_name: self.players.human_name.clone(),
            bot_name: self.players.bot_name.clone(),
            timings: BotTimings {
                think_delay: Duration::from_millis(u64::from(self.bot.think_delay_ms)),
                highlight_delay: Duration::from_millis(u64::from(self.bot.highlight_delay_ms)),
            },
            seed: self.seed,
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct PlayersConfig {
    pub human_name: String,
    pub bot_name: String,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        Self {
            human_name: DEFAULT_HUMAN_NAME.to_string(),
            bot_name: DEFAULT_BOT_NAME.to_string(),
        }
    }
}

impl Validate for PlayersConfig {
    fn validate(&self) -> Result<(), String> {
        if self.human_name.trim().is_empty() {
            return Err("human_name must not be empty".to_string());
        }
        if self.bot_name.trim().is_empty() {
            return Err("bot_name must not be empty".to_string());
        }
        if self.human_name == self.bot_name {
            return Err("human_name and bot_name must differ".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct BotConfig {
    pub think_delay_ms: u32,
    pub highlight_delay_ms: u32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            think_delay_ms: 500,
            highlight_delay_ms: 350,
        }
    }
}

impl Validate for BotConfig {
    fn validate(&self) -> Result<(), String> {
        if self.think_delay_ms > MAX_DELAY_MS {
            return Err(format!("think_delay_ms must be at most {}", MAX_DELAY_MS));
        }
        if self.highlight_delay_ms > MAX_DELAY_MS {
            return Err(format!("highlight_delay_ms must be at most {}", MAX_DELAY_MS));
        }
        Ok(())
    }
}
