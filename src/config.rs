use std::time::Duration;

use config::ConfigError;
use serde::{Deserialize, Serialize};
use serde_aux::prelude::deserialize_number_from_string;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub application: ApplicationSettings,
    pub allow_cors: bool,
    pub game: GameSettings,
    pub text_generation: TextGenerationSettings,
    pub preferences: Preferences,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GameSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub inactivity_timeout_seconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub tick_interval_millis: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub stop_round_seconds: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub words_round_seconds: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub board_turn_seconds: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub player_ping_timeout_millis: u64,
}

impl GameSettings {
    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_seconds)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_millis.max(1))
    }

    pub fn player_ping_timeout(&self) -> Duration {
        Duration::from_millis(self.player_ping_timeout_millis)
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            inactivity_timeout_seconds: 300,
            tick_interval_millis: 1000,
            stop_round_seconds: 60,
            words_round_seconds: 30,
            board_turn_seconds: 60,
            player_ping_timeout_millis: 2500,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct TextGenerationSettings {
    pub url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_seconds: u64,
}

impl Default for TextGenerationSettings {
    fn default() -> Self {
        TextGenerationSettings {
            url: String::default(),
            timeout_seconds: 10,
        }
    }
}

impl TextGenerationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn is_enabled(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Preferences {
    pub dark_mode: bool,
    pub simple_mode: bool,
}

impl Config {
    pub fn get() -> Result<Config, ConfigError> {
        let base_path = std::env::current_dir().map_err(|error| {
            ConfigError::Message(format!(
                "Failed to determine the current directory. Error: '{error}'."
            ))
        })?;
        let configuration_directory = base_path.join("config");

        let environment: Environment = std::env::var("ENVIRONMENT")
            .map_err(|_| ConfigError::NotFound("ENVIRONMENT".to_string()))?
            .try_into()
            .map_err(ConfigError::Message)?;

        let environment_filename = format!("{}.yaml", environment.as_str());

        let config = config::Config::builder()
            .add_source(config::File::from(
                configuration_directory.join("base.yaml"),
            ))
            .add_source(config::File::from(
                configuration_directory.join(environment_filename),
            ))
            .add_source(config::Environment::with_prefix("SOFA").separator("__"))
            .build()?;

        config.try_deserialize::<Config>()
    }
}

enum Environment {
    Dev,
    Prod,
}

const DEV: &str = "dev";
const PROD: &str = "prod";

impl Environment {
    fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => DEV,
            Environment::Prod => PROD,
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(string: String) -> Result<Self, Self::Error> {
        match string.to_lowercase().as_str() {
            DEV => Ok(Self::Dev),
            PROD => Ok(Self::Prod),
            other => Err(format!(
                "{other} is not a supported environment. Use either `{DEV}` or `{PROD}`.",
            )),
        }
    }
}
