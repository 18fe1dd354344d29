pub mod actor;
pub mod actor_client;

use std::collections::HashMap;
use std::sync::Arc;

use rand::distributions::{Alphanumeric, DistString};

use crate::config::{GameSettings, TextGenerationSettings};
use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::game::actor::GameActor;
use crate::game::actor_client::GameClient;
use crate::game::mode::GameMode;
use crate::game_factory::actor_client::GameFactoryClient;
use crate::text_generation::TextGenerator;

pub struct GameFactory {
    game_channels: HashMap<String, GameClient>,
    game_settings: GameSettings,
    text_generation: TextGenerationSettings,
    text_generator: Arc<dyn TextGenerator>,
}

impl GameFactory {
    pub fn new(
        game_settings: GameSettings,
        text_generation: TextGenerationSettings,
        text_generator: Arc<dyn TextGenerator>,
    ) -> Self {
        GameFactory {
            game_channels: HashMap::default(),
            game_settings,
            text_generation,
            text_generator,
        }
    }

    pub fn create_new_game(&mut self, mode: GameMode, game_factory: GameFactoryClient) -> String {
        let id = self.create_unique_game_id();
        self.game_channels.insert(
            id.clone(),
            GameActor::spawn(
                &id,
                mode,
                self.game_settings.clone(),
                &self.text_generation,
                Arc::clone(&self.text_generator),
                game_factory,
            ),
        );
        log::info!("Game created. GameId: '{id}', Mode: '{mode}'.");

        id
    }

    pub fn remove_game(&mut self, game_id: &str) -> Option<GameClient> {
        self.game_channels.remove(game_id)
    }

    pub fn get_game(&self, game_id: &str) -> Result<&GameClient, Error> {
        match self.game_channels.get(game_id) {
            Some(game) => Ok(game),
            None => Err(Error::Domain(DomainError::GameDoesNotExist(
                game_id.to_string(),
            ))),
        }
    }

    fn create_unique_game_id(&self) -> String {
        loop {
            let id = Alphanumeric
                .sample_string(&mut rand::thread_rng(), 5)
                .replace('O', "P")
                .replace('0', "1")
                .replace('I', "J")
                .replace('l', "m");
            if !self.game_channels.contains_key(&id) {
                return id;
            }
        }
    }
}
