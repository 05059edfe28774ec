use serde_json::{Map, Value};

/// First decode stage: the agent's `response` field, flattened into a loose map.
///
/// The agent may answer with an object, an object nested under `result`, a
/// JSON-encoded string (sometimes encoded twice), or plain prose. Prose ends
/// up under `fallback_key` so nothing the agent said is lost.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoosePayload(Map<String, Value>);

/// JavaScript-style truthiness, which is how the agent's envelope was designed to be read.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl LoosePayload {
    #[must_use]
    pub fn decode(response: Option<&Value>, fallback_key: &str) -> Self {
        let data = response
            .and_then(|r| r.get("result"))
            .filter(|v| truthy(v))
            .or_else(|| response.filter(|v| truthy(v)));

        match data {
            Some(Value::Object(map)) => Self(map.clone()),
            Some(Value::String(text)) => Self::from_text(text, fallback_key),
            _ => Self::default(),
        }
    }

    fn from_text(text: &str, fallback_key: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Self(map),
            // Double-encoded: a JSON string holding a JSON document.
            Ok(Value::String(inner)) => match serde_json::from_str::<Value>(&inner) {
                Ok(Value::Object(map)) => Self(map),
                _ => Self::note(fallback_key, inner),
            },
            Ok(_) => Self::default(),
            Err(_) => Self::note(fallback_key, text.to_string()),
        }
    }

    fn note(key: &str, text: String) -> Self {
        let mut map = Map::new();
        map.insert(key.to_string(), Value::String(text));
        Self(map)
    }

    /// First truthy value among `keys`. Non-string values are rendered as JSON text.
    #[must_use]
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|k| self.0.get(*k))
            .find(|v| truthy(v))
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
    }

    /// Numeric value under `key`; strings are not coerced.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
