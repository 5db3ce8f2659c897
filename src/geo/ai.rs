//! AI-estimated distances for cities the offline tables miss.
//!
//! Strictly opt-in (`--ai`). One batch prompt asks for a JSON object mapping
//! city name to km from the origin; the reply is parsed defensively (models
//! like to wrap JSON in prose). Every failure mode — missing key, network,
//! unparseable reply — degrades to an empty map, which the resolver turns into
//! the constant fallback. Nothing here ever errors out of the module.

use std::collections::HashMap;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

pub struct AiDistanceClient {
    client: Client,
    api_key: String,
    model: String,
}

impl AiDistanceClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("MANDI_AI_API_KEY")
            .map_err(|_| AppError::new(2, "Missing MANDI_AI_API_KEY in environment (.env)."))?;
        let model = std::env::var("MANDI_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(api_key, model))
    }

    /// Estimate distances from `origin` to each city in one prompt.
    ///
    /// Returns only the entries that came back as sane numbers; keys are
    /// lowercased. An empty map on any failure.
    pub fn estimate_batch(&self, origin: &str, cities: &[String]) -> HashMap<String, f64> {
        if cities.is_empty() {
            return HashMap::new();
        }
        let prompt = batch_prompt(origin, cities);
        match self.complete(&prompt) {
            Ok(reply) => parse_distance_map(&reply),
            Err(err) => {
                eprintln!("warning: {err} Using default distances.");
                HashMap::new()
            }
        }
    }

    fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let request = ChatRequest {
            model: self.model.clone(),
            temperature: 0.0,
            messages: vec![Message {
                role: "user",
                content: prompt.to_string(),
            }],
        };

        let resp = self
            .client
            .post(API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .map_err(|e| AppError::new(4, format!("AI distance request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("AI distance request failed with status {}.", resp.status()),
            ));
        }

        let body: ChatResponse = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse AI response: {e}")))?;

        Ok(body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default())
    }
}

fn batch_prompt(origin: &str, cities: &[String]) -> String {
    format!(
        "Estimate the road distance in kilometres from {origin}, India to each of \
         these places in India: {}. Respond with only a JSON object mapping each \
         place name to a number of kilometres, nothing else.",
        cities.join(", ")
    )
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    temperature: f64,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Pull the first `{ ... }` out of the reply and read it as a city → km map.
///
/// Values may come back as numbers or numeric strings; anything non-numeric,
/// non-finite, or negative is dropped.
fn parse_distance_map(reply: &str) -> HashMap<String, f64> {
    let Some(json) = extract_json_object(reply) else {
        return HashMap::new();
    };
    let Ok(raw) = serde_json::from_str::<HashMap<String, serde_json::Value>>(json) else {
        return HashMap::new();
    };

    let mut out = HashMap::new();
    for (city, value) in raw {
        let km = match value {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        if let Some(km) = km {
            if km.is_finite() && km >= 0.0 {
                out.insert(city.trim().to_lowercase(), km);
            }
        }
    }
    out
}

fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clean_json() {
        let map = parse_distance_map(r#"{"Sendhwa": 780, "Atlantis": 333.5}"#);
        assert_eq!(map.get("sendhwa"), Some(&780.0));
        assert_eq!(map.get("atlantis"), Some(&333.5));
    }

    #[test]
    fn parses_json_wrapped_in_prose() {
        let reply = "Sure! Here are the estimates:\n{\"Sendhwa\": \"780\"}\nHope that helps.";
        let map = parse_distance_map(reply);
        assert_eq!(map.get("sendhwa"), Some(&780.0));
    }

    #[test]
    fn drops_junk_values() {
        let map = parse_distance_map(r#"{"a": "far", "b": -5, "c": null, "d": 120}"#);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("d"), Some(&120.0));
    }

    #[test]
    fn garbage_reply_yields_empty_map() {
        assert!(parse_distance_map("no json here").is_empty());
        assert!(parse_distance_map("{broken").is_empty());
        assert!(parse_distance_map("").is_empty());
    }

    #[test]
    fn prompt_lists_all_cities() {
        let cities = vec!["sendhwa".to_string(), "atlantis".to_string()];
        let prompt = batch_prompt("delhi", &cities);
        assert!(prompt.contains("sendhwa"));
        assert!(prompt.contains("atlantis"));
        assert!(prompt.contains("JSON"));
    }
}
