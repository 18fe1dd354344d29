#[cfg(test)]
pub mod scripted;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::config::TextGenerationSettings;
use crate::error::Error;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, schema: Option<&Value>) -> Result<Value, Error>;
}

pub fn from_settings(settings: &TextGenerationSettings) -> Arc<dyn TextGenerator> {
    if !settings.is_enabled() {
        log::info!("No text generation url configured, the opponent will use fallback answers.");
        return Arc::new(DisabledTextGenerator);
    }
    match HttpTextGenerator::new(settings) {
        Ok(generator) => Arc::new(generator),
        Err(error) => {
            log::error!("Could not build the text generation client, the opponent will use fallback answers. Error: '{error}'.");
            Arc::new(DisabledTextGenerator)
        }
    }
}

pub struct DisabledTextGenerator;

#[async_trait]
impl TextGenerator for DisabledTextGenerator {
    async fn generate(&self, _prompt: &str, _schema: Option<&Value>) -> Result<Value, Error> {
        Err(Error::TextGeneration(
            "Text generation is disabled.".to_string(),
        ))
    }
}

pub struct HttpTextGenerator {
    client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct GenerationRequest<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_json_schema: Option<&'a Value>,
}

impl HttpTextGenerator {
    pub fn new(settings: &TextGenerationSettings) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|error| {
                Error::TextGeneration(format!("Failed to create HTTP client. Error: '{error}'."))
            })?;
        Ok(HttpTextGenerator {
            client,
            url: settings.url.trim().to_string(),
        })
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, prompt: &str, schema: Option<&Value>) -> Result<Value, Error> {
        let response = self
            .client
            .post(&self.url)
            .json(&GenerationRequest {
                prompt,
                response_json_schema: schema,
            })
            .send()
            .await
            .map_err(|error| Error::TextGeneration(format!("Request failed. Error: '{error}'.")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response body unavailable>".to_string());
            return Err(Error::TextGeneration(format!(
                "Service returned {status}. Body: '{body}'."
            )));
        }

        response.json::<Value>().await.map_err(|error| {
            Error::TextGeneration(format!("Response is not valid JSON. Error: '{error}'."))
        })
    }
}
