use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::TextGenerator;
use crate::error::Error;

#[derive(Default)]
pub struct ScriptedTextGenerator {
    responses: Mutex<VecDeque<Result<Value, Error>>>,
    prompts: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl ScriptedTextGenerator {
    pub fn new(responses: Vec<Result<Value, Error>>) -> Self {
        ScriptedTextGenerator {
            responses: Mutex::new(responses.into()),
            ..ScriptedTextGenerator::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedTextGenerator {
    async fn generate(&self, prompt: &str, _schema: Option<&Value>) -> Result<Value, Error> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::TextGeneration("No scripted response left.".to_string())))
    }
}
