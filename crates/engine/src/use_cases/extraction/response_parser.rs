//! LLM response parser for dream attribute records.
//!
//! Expected shape (see `prompt.rs`):
//! `{"setting": str, "mood": str, "characters": [str], "objects": [str], "objective": str}`
//!
//! Missing or blank fields take their defaults. Anything that is not a JSON
//! object, or a field with the wrong type, is a malformed response.

use regex_lite::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::LazyLock;

use dreamforge_domain::DreamAttributes;

// Regex to remove model-specific special tokens:
// - <|...|> style tokens (common in many models)
// - [INST], [/INST] tokens (llama)
// - <<SYS>>, <</SYS>> tokens (llama)
static SPECIAL_TOKENS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<\|[^|>]+\|>|\[/?INST\]|<</?SYS>>").expect("valid regex")
});

// gpt-oss puts its analysis first; only the final channel is the answer.
static FINAL_CONTENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<\|channel\|>final<\|message\|>(.*)$").expect("valid regex"));

static FENCED_JSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("valid regex"));

/// Record as the model returns it. Keys are normalized before decoding.
#[derive(Debug, Deserialize)]
struct RawAttributes {
    setting: Option<String>,
    mood: Option<String>,
    characters: Option<Vec<String>>,
    objects: Option<Vec<String>>,
    #[serde(alias = "game_logic", alias = "gamelogic")]
    objective: Option<String>,
}

/// Remove special tokens that leak through from some models.
pub fn strip_special_tokens(raw: &str) -> String {
    if let Some(content) = FINAL_CONTENT_RE.captures(raw).and_then(|caps| caps.get(1)) {
        return SPECIAL_TOKENS_RE
            .replace_all(content.as_str().trim(), "")
            .to_string();
    }
    SPECIAL_TOKENS_RE.replace_all(raw, "").to_string()
}

/// Find the JSON object in a completion: a fenced block first, otherwise the
/// span from the first `{` to the last `}`.
fn locate_json_object(text: &str) -> Option<&str> {
    if let Some(block) = FENCED_JSON_RE.captures(text).and_then(|caps| caps.get(1)) {
        return Some(block.as_str());
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// `"Game Logic"` -> `"game_logic"`, `"Setting"` -> `"setting"`.
fn normalize_keys(object: Map<String, Value>) -> Map<String, Value> {
    object
        .into_iter()
        .map(|(key, value)| (key.trim().to_lowercase().replace([' ', '-'], "_"), value))
        .collect()
}

// Blank character tokens can never match a rule, so they are dropped.
fn clean_character_tokens(tokens: Vec<String>) -> Vec<String> {
    tokens
        .into_iter()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

// Every object token places one object, whatever its text.
fn clean_object_tokens(tokens: Vec<String>) -> Vec<String> {
    tokens
        .into_iter()
        .map(|token| token.trim().to_string())
        .collect()
}

/// Parse a completion into attributes for `raw_text`.
///
/// Returns a description of the problem when the response is malformed.
pub fn parse_dream_attributes(raw_text: &str, completion: &str) -> Result<DreamAttributes, String> {
    let cleaned = strip_special_tokens(completion);
    let json = locate_json_object(&cleaned)
        .ok_or_else(|| "response contains no JSON object".to_string())?;

    let object = match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(object)) => object,
        Ok(other) => return Err(format!("expected a JSON object, got {}", type_name(&other))),
        Err(e) => return Err(format!("invalid JSON: {}", e)),
    };

    let raw: RawAttributes = serde_json::from_value(Value::Object(normalize_keys(object)))
        .map_err(|e| format!("unexpected field shape: {}", e))?;

    let mut attributes = DreamAttributes::fallback(raw_text);
    if let Some(setting) = raw.setting {
        attributes = attributes.with_setting(setting.trim());
    }
    if let Some(mood) = raw.mood {
        attributes = attributes.with_mood(mood.trim());
    }
    if let Some(characters) = raw.characters {
        attributes = attributes.with_characters(clean_character_tokens(characters));
    }
    if let Some(objects) = raw.objects {
        attributes = attributes.with_objects(clean_object_tokens(objects));
    }
    if let Some(objective) = raw.objective {
        attributes = attributes.with_objective(objective.trim());
    }
    Ok(attributes)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
