use std::time::Duration;

use rand::Rng;
use serde_json::{json, Map, Value};

use crate::board::Board;
use crate::game::mode::GameMode;
use crate::metrics::OPPONENT_FALLBACKS;
use crate::round::scorer::CAPTURE;
use crate::round::{Entry, Round};
use crate::text_generation::TextGenerator;

#[derive(Debug, Clone, PartialEq)]
pub struct OpponentRequest {
    pub round_id: u64,
    pub mode: GameMode,
    pub letter: String,
    pub categories: Vec<String>,
}

impl OpponentRequest {
    pub fn from_round(mode: GameMode, round: &Round) -> Self {
        OpponentRequest {
            round_id: round.id,
            mode,
            letter: round.prompt.clone(),
            categories: round.categories.clone(),
        }
    }

    pub fn prompt(&self) -> String {
        let letter = &self.letter;
        match self.mode {
            GameMode::Words => format!(
                "Estamos jugando a Palabras Rápidas. Escribe todas las palabras que se te ocurran \
                 de la categoría \"{}\" que empiecen por la letra {letter}. \
                 Responde en español con un objeto JSON con la lista en la clave \"words\".",
                self.categories.first().map(String::as_str).unwrap_or_default()
            ),
            _ => format!(
                "Estamos jugando a Stop/Basta con la letra {letter}. \
                 Da una sola palabra que empiece por {letter} para cada una de estas categorías: {}. \
                 Responde en español con un objeto JSON con una clave por categoría.",
                self.categories.join(", ")
            ),
        }
    }

    pub fn schema(&self) -> Value {
        match self.mode {
            GameMode::Words => json!({
                "type": "object",
                "properties": {
                    "words": { "type": "array", "items": { "type": "string" } }
                }
            }),
            _ => {
                let properties: Map<String, Value> = self
                    .categories
                    .iter()
                    .map(|category| (category.clone(), json!({ "type": "string" })))
                    .collect();
                json!({ "type": "object", "properties": properties })
            }
        }
    }

    /// Reads the structured response. `None` when it does not have the requested shape.
    pub fn parse(&self, response: &Value) -> Option<Vec<Entry>> {
        match self.mode {
            GameMode::Words => {
                let category = self.categories.first().cloned();
                let words = response.get("words")?.as_array()?;
                Some(
                    words
                        .iter()
                        .filter_map(Value::as_str)
                        .map(|word| {
                            Entry::opponent(self.round_id, category.clone(), word.to_string())
                        })
                        .collect(),
                )
            }
            _ => {
                let answers = response.as_object()?;
                Some(
                    self.categories
                        .iter()
                        .map(|category| {
                            let value = answers
                                .get(category)
                                .and_then(Value::as_str)
                                .unwrap_or_default();
                            Entry::opponent(
                                self.round_id,
                                Some(category.clone()),
                                value.to_string(),
                            )
                        })
                        .collect(),
                )
            }
        }
    }

    pub fn fallback(&self) -> Vec<Entry> {
        match self.mode {
            GameMode::Words => Vec::default(),
            _ => self
                .categories
                .iter()
                .map(|category| {
                    Entry::opponent(self.round_id, Some(category.clone()), String::new())
                })
                .collect(),
        }
    }
}

/// Never fails. Errors, malformed answers and timeouts turn into the fallback entries.
pub async fn respond(
    generator: &dyn TextGenerator,
    request: &OpponentRequest,
    timeout: Duration,
) -> Vec<Entry> {
    let schema = request.schema();
    let result =
        tokio::time::timeout(timeout, generator.generate(&request.prompt(), Some(&schema))).await;
    let failure = match result {
        Ok(Ok(response)) => match request.parse(&response) {
            Some(entries) => return entries,
            None => format!("unexpected response shape '{response}'"),
        },
        Ok(Err(error)) => error.to_string(),
        Err(_) => format!("no response after {} ms", timeout.as_millis()),
    };
    log::warn!(
        "Opponent answers degraded to fallback. RoundId: '{}', Mode: '{}', Reason: {failure}.",
        request.round_id,
        request.mode
    );
    OPPONENT_FALLBACKS.inc();
    request.fallback()
}

pub fn respond_locally<R: Rng + ?Sized>(
    round_id: u64,
    board: &mut Board,
    rng: &mut R,
) -> Vec<Entry> {
    board
        .opponent_move(rng)
        .map(|applied| {
            let category = applied.captured.then(|| CAPTURE.to_string());
            Entry::opponent(round_id, category, applied.notation)
        })
        .into_iter()
        .collect()
}
